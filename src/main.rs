//! Chanmix CLI - Channel Layout Mixer
//!
//! Command-line interface for the Chanmix mixing engine.

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chanmix::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!("Chanmix v{}", env!("CARGO_PKG_VERSION"));

    let config = commands::load_config(cli.config.as_deref(), cli.strict)
        .context("failed to load mixer configuration")?;

    match cli.command {
        Commands::Matrix {
            input,
            output,
            json,
        } => commands::show_matrix(input, output, json, &config)
            .context("failed to resolve gain matrix")?,
        Commands::Mix {
            input,
            output,
            format,
            samples,
        } => commands::mix_samples(input, output, format, &samples, &config)
            .context("failed to mix samples")?,
        Commands::Wav {
            source,
            dest,
            output,
            input,
            json,
        } => commands::remix_file(&source, &dest, input, output, json, &config)
            .with_context(|| format!("failed to remix {}", source.display()))?,
        Commands::Roles => commands::list_roles()?,
    }

    Ok(())
}
