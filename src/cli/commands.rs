//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fmt::Display;
use std::path::Path;

use num_traits::NumCast;
use tracing::info;

use crate::channel::{ChannelRole, Classification, Layout};
use crate::config::MixerConfig;
use crate::engine::{remix_wav, Sample, SampleFormat};
use crate::error::{ChanmixError, Result};
use crate::matrix::MappingPolicy;
use crate::session::Session;

/// Build the effective configuration from an optional file and `--strict`
pub fn load_config(path: Option<&Path>, strict: bool) -> Result<MixerConfig> {
    let mut config = match path {
        Some(path) => {
            info!("Loading configuration: {}", path.display());
            MixerConfig::load(path)?
        }
        None => MixerConfig::default(),
    };
    if strict {
        config.policy = MappingPolicy::Strict;
    }
    Ok(config)
}

/// Print the resolved gain matrix.
pub fn show_matrix(input: Layout, output: Layout, json: bool, config: &MixerConfig) -> Result<()> {
    let matrix = config.builder().build(&input, &output)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matrix)?);
        return Ok(());
    }

    println!(
        "{} -> {} (coefficient table v{})",
        input,
        output,
        matrix.table_version()
    );
    print!("{}", matrix);

    let dropped: Vec<String> = (0..matrix.input_channels())
        .filter(|&i| matrix.is_input_dropped(i) && !input[i].is_silence())
        .map(|i| format!("{}#{}", input[i].short_name(), i))
        .collect();
    if !dropped.is_empty() {
        println!("dropped inputs: {}", dropped.join(", "));
    }

    Ok(())
}

/// Mix samples given on the command line and print the output frames.
pub fn mix_samples(
    input: Layout,
    output: Layout,
    format: SampleFormat,
    values: &[f64],
    config: &MixerConfig,
) -> Result<()> {
    let session = Session::from_layouts(format, input, output, config)?;

    let lines = match format {
        SampleFormat::U8 => run_mix::<u8>(&session, values)?,
        SampleFormat::I16 => run_mix::<i16>(&session, values)?,
        SampleFormat::I32 => run_mix::<i32>(&session, values)?,
        SampleFormat::F32 => run_mix::<f32>(&session, values)?,
        SampleFormat::F64 => run_mix::<f64>(&session, values)?,
    };

    for line in lines {
        println!("{}", line);
    }

    session.destroy();
    Ok(())
}

fn run_mix<T>(session: &Session, values: &[f64]) -> Result<Vec<String>>
where
    T: Sample + NumCast + Display,
{
    let input = values
        .iter()
        .map(|&value| {
            <T as NumCast>::from(value).ok_or_else(|| ChanmixError::UnsupportedFormat {
                details: format!("{} does not fit in {}", value, T::FORMAT),
            })
        })
        .collect::<Result<Vec<T>>>()?;

    let in_channels = session.input_layout().channels();
    let out_channels = session.output_layout().channels();
    let frames = input.len() / in_channels;
    let mut output = vec![T::default(); frames * out_channels];
    session.mix(&input, &mut output)?;

    Ok(output
        .chunks_exact(out_channels)
        .enumerate()
        .map(|(frame, samples)| {
            let values: Vec<String> = samples.iter().map(|s| s.to_string()).collect();
            format!("frame {}: {}", frame, values.join(" "))
        })
        .collect())
}

/// Remix a WAV file and print the report.
pub fn remix_file(
    source: &Path,
    dest: &Path,
    input: Option<Layout>,
    output: Layout,
    json: bool,
    config: &MixerConfig,
) -> Result<()> {
    info!("Remixing {} into {}", source.display(), dest.display());

    let report = remix_wav(source, dest, input, output, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Remixed {} frames of {} audio at {} Hz: {} -> {}",
            report.frames, report.format, report.sample_rate, report.input, report.output
        );
        println!("Written: {}", dest.display());
    }

    Ok(())
}

/// List every channel role with its classification.
pub fn list_roles() -> Result<()> {
    println!("{:<5} {:<5} {:<14} classification", "code", "short", "name");
    println!("{:-<50}", "");
    for role in ChannelRole::ALL {
        let class = match role.classify() {
            Classification::Spatial { lateral, depth } => format!("{:?} / {:?}", lateral, depth),
            Classification::LowFrequency => "low-frequency".to_string(),
            Classification::Silence => "silence".to_string(),
        };
        println!(
            "{:<5} {:<5} {:<14} {}",
            role.code(),
            role.short_name(),
            role.name(),
            class
        );
    }
    Ok(())
}
