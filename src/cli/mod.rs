//! CLI Module
//!
//! Command-line harness around the mixing engine.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::channel::Layout;
use crate::engine::SampleFormat;

/// Chanmix - remix interleaved audio between channel layouts
#[derive(Parser, Debug)]
#[command(name = "chanmix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON mixer configuration (policy and coefficient table)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fail instead of silencing output channels nothing maps onto
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the gain matrix for a layout conversion
    #[command(name = "matrix")]
    Matrix {
        /// Input layout, e.g. FL,FR,FC,LFE,BL,BR
        #[arg(short, long)]
        input: Layout,

        /// Output layout, e.g. FL,FR
        #[arg(short, long)]
        output: Layout,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mix interleaved samples given on the command line
    #[command(name = "mix")]
    Mix {
        /// Input layout
        #[arg(short, long)]
        input: Layout,

        /// Output layout
        #[arg(short, long)]
        output: Layout,

        /// Sample format of the values
        #[arg(short, long, default_value = "f32")]
        format: SampleFormat,

        /// Interleaved input samples in the raw sample domain
        #[arg(allow_hyphen_values = true, required = true)]
        samples: Vec<f64>,
    },

    /// Remix a WAV file into another layout
    #[command(name = "wav")]
    Wav {
        /// Source WAV file
        source: PathBuf,

        /// Destination WAV file
        dest: PathBuf,

        /// Output layout
        #[arg(short, long)]
        output: Layout,

        /// Source layout (defaults to the conventional one for its channel count)
        #[arg(short, long)]
        input: Option<Layout>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the channel roles and their classification
    #[command(name = "roles")]
    Roles,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_mix() {
        let cli = Cli::parse_from([
            "chanmix", "mix", "-i", "FC", "-o", "FL,FR", "-f", "i16", "--", "1000", "-1000",
        ]);
        match cli.command {
            Commands::Mix {
                input,
                output,
                format,
                samples,
            } => {
                assert_eq!(input, Layout::mono());
                assert_eq!(output, Layout::stereo());
                assert_eq!(format, SampleFormat::I16);
                assert_eq!(samples, vec![1000.0, -1000.0]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_layout_rejected() {
        let result = Cli::try_parse_from(["chanmix", "matrix", "-i", "FL,XX", "-o", "FL"]);
        assert!(result.is_err());
    }
}
