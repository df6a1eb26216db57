//! WAV remixing for Chanmix
//!
//! Streams a WAV file through a session block by block: one input block and
//! one output block are allocated up front and reused for the whole file.
//! Supported encodings are 16-bit and 32-bit integer PCM and 32-bit float.

use std::fs::File;
use std::io::{BufWriter, Read, Seek, Write};
use std::path::Path;

use hound::{SampleFormat as WavSampleFormat, WavReader, WavSpec, WavWriter};
use serde::Serialize;
use tracing::info;

use super::sample::{Sample, SampleFormat};
use crate::channel::Layout;
use crate::config::MixerConfig;
use crate::error::{ChanmixError, Result};
use crate::session::Session;

/// Frames mixed per block when streaming a file
pub const DEFAULT_BLOCK_FRAMES: usize = 1024;

/// Summary of a finished remix
#[derive(Debug, Clone, Serialize)]
pub struct RemixReport {
    pub format: SampleFormat,
    pub sample_rate: u32,
    pub frames: u64,
    pub input: Layout,
    pub output: Layout,
}

/// Map a WAV header to the sample format used to mix it
pub fn wav_sample_format(spec: &WavSpec) -> Result<SampleFormat> {
    match (spec.sample_format, spec.bits_per_sample) {
        (WavSampleFormat::Int, 16) => Ok(SampleFormat::I16),
        (WavSampleFormat::Int, 32) => Ok(SampleFormat::I32),
        (WavSampleFormat::Float, 32) => Ok(SampleFormat::F32),
        (encoding, bits) => Err(ChanmixError::UnsupportedFormat {
            details: format!("{}-bit {:?} WAV", bits, encoding),
        }),
    }
}

/// Remix `input_path` into `output_path` with the given output layout
///
/// # Arguments
/// * `input_layout` - Layout of the source file; when `None`, the
///   conventional layout for its channel count is assumed
/// * `output_layout` - Layout of the written file
/// * `config` - Matrix resolution settings
pub fn remix_wav(
    input_path: &Path,
    output_path: &Path,
    input_layout: Option<Layout>,
    output_layout: Layout,
    config: &MixerConfig,
) -> Result<RemixReport> {
    let mut reader = WavReader::open(input_path)?;
    let spec = reader.spec();
    let format = wav_sample_format(&spec)?;

    let file_channels = spec.channels as usize;
    let input_layout = match input_layout {
        Some(layout) if layout.channels() != file_channels => {
            return Err(ChanmixError::invalid_layout(format!(
                "layout {} has {} channels but {} has {}",
                layout,
                layout.channels(),
                input_path.display(),
                file_channels
            )));
        }
        Some(layout) => layout,
        None => Layout::default_for_channels(file_channels).ok_or_else(|| {
            ChanmixError::invalid_layout(format!(
                "no default layout for {} channels; pass one explicitly",
                file_channels
            ))
        })?,
    };

    let out_channels = u16::try_from(output_layout.channels()).map_err(|_| {
        ChanmixError::invalid_layout(format!(
            "{} output channels do not fit in a WAV header",
            output_layout.channels()
        ))
    })?;
    let out_spec = WavSpec {
        channels: out_channels,
        ..spec
    };

    let session = Session::from_layouts(format, input_layout, output_layout, config)?;
    let mut writer = WavWriter::create(output_path, out_spec)?;

    let frames = match format {
        SampleFormat::I16 => remix_samples::<i16, _, _>(&mut reader, &mut writer, &session)?,
        SampleFormat::I32 => remix_samples::<i32, _, _>(&mut reader, &mut writer, &session)?,
        SampleFormat::F32 => remix_samples::<f32, _, _>(&mut reader, &mut writer, &session)?,
        other => {
            return Err(ChanmixError::UnsupportedFormat {
                details: format!("{} is not a WAV sample format", other),
            })
        }
    };
    writer.finalize()?;

    let report = RemixReport {
        format,
        sample_rate: spec.sample_rate,
        frames,
        input: session.input_layout().clone(),
        output: session.output_layout().clone(),
    };
    info!(
        input = %input_path.display(),
        output = %output_path.display(),
        frames,
        "remixed WAV file"
    );
    Ok(report)
}

fn remix_samples<T, R, W>(
    reader: &mut WavReader<R>,
    writer: &mut WavWriter<W>,
    session: &Session,
) -> Result<u64>
where
    T: Sample + hound::Sample,
    R: Read,
    W: Write + Seek,
{
    let in_channels = session.input_layout().channels();
    let out_channels = session.output_layout().channels();
    let block_samples = DEFAULT_BLOCK_FRAMES * in_channels;

    let mut in_block: Vec<T> = Vec::with_capacity(block_samples);
    let mut out_block = vec![T::default(); DEFAULT_BLOCK_FRAMES * out_channels];
    let mut samples = reader.samples::<T>();
    let mut total = 0_u64;

    loop {
        in_block.clear();
        for sample in samples.by_ref().take(block_samples) {
            in_block.push(sample?);
        }
        if in_block.is_empty() {
            break;
        }

        // A truncated trailing frame makes the mix fail with BufferSizeMismatch
        let frames = in_block.len() / in_channels;
        let out = &mut out_block[..frames * out_channels];
        session.mix(&in_block, out)?;
        for &sample in out.iter() {
            writer.write_sample(sample)?;
        }
        total += frames as u64;
    }

    Ok(total)
}

/// Write interleaved samples to a new WAV file
pub fn write_wav<T>(path: &Path, spec: WavSpec, samples: &[T]) -> Result<()>
where
    T: hound::Sample + Copy,
{
    let mut writer: WavWriter<BufWriter<File>> = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Read every interleaved sample of a WAV file
pub fn read_wav<T>(path: &Path) -> Result<(WavSpec, Vec<T>)>
where
    T: hound::Sample,
{
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let samples = reader.samples::<T>().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok((spec, samples))
}
