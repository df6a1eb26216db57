//! Mixing kernel
//!
//! For each frame f and output channel o:
//! `output[f][o] = Σ_i gain[o][i] * input[f][i]`.
//!
//! All validation happens before the first write, so a failed call leaves the
//! output buffer untouched. The success path does not allocate, lock, or log.

use super::frames::{Frames, FramesMut};
use super::sample::Sample;
use crate::error::{ChanmixError, Result};
use crate::matrix::GainMatrix;

/// Mix interleaved `input` into interleaved `output` through `matrix`
///
/// The frame count is inferred from the input length and must match the
/// frame count implied by the output length. Returns the number of frames
/// mixed; two empty buffers mix zero frames successfully.
///
/// No clipping is applied to float formats. Integer formats saturate at
/// their representable range.
pub fn mix_frames<T: Sample>(matrix: &GainMatrix, input: &[T], output: &mut [T]) -> Result<usize> {
    let input = Frames::new(input, matrix.input_channels())?;
    let mut output = FramesMut::new(output, matrix.output_channels())?;

    let frames = input.frame_count();
    if frames != output.frame_count() {
        return Err(ChanmixError::buffer_size(format!(
            "input holds {} frames but output holds {}",
            frames,
            output.frame_count()
        )));
    }

    if matrix.is_identity() {
        output.as_mut_slice().copy_from_slice(input.as_slice());
        return Ok(frames);
    }

    for (in_frame, out_frame) in input.iter().zip(output.iter_mut()) {
        for (o, out) in out_frame.iter_mut().enumerate() {
            *out = T::from_mix(mix_row(matrix.row(o), in_frame));
        }
    }

    Ok(frames)
}

/// Dot product of one matrix row with one input frame
///
/// Zero gains are skipped so a silent row stays exactly zero even when the
/// input holds NaN or infinity.
#[inline(always)]
fn mix_row<T: Sample>(row: &[f64], frame: &[T]) -> f64 {
    let mut acc = 0.0_f64;
    for (&gain, &sample) in row.iter().zip(frame) {
        if gain != 0.0 {
            acc += gain * sample.to_mix();
        }
    }
    acc
}
