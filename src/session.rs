//! Mixing sessions
//!
//! A `Session` freezes one (sample format, input layout, output layout,
//! gain matrix) tuple. It is created once, mixes any number of buffers, and
//! is released either explicitly with [`Session::destroy`] or on scope exit.
//! Because `destroy` consumes the session, mixing after release does not
//! compile:
//!
//! ```compile_fail
//! use chanmix::{ChannelRole, SampleFormat, Session};
//!
//! let session = Session::create(
//!     SampleFormat::F32,
//!     &[ChannelRole::FrontCenter],
//!     &[ChannelRole::FrontLeft, ChannelRole::FrontRight],
//! )
//! .unwrap();
//! session.destroy();
//! let mut out = [0.0_f32; 2];
//! session.mix(&[1.0_f32], &mut out).unwrap();
//! ```
//!
//! A session holds no interior mutability: it is `Send + Sync`, and two
//! sessions never share state.

use tracing::debug;

use crate::channel::{ChannelRole, Layout};
use crate::config::MixerConfig;
use crate::engine::{mix_frames, Sample, SampleFormat};
use crate::error::{ChanmixError, Result};
use crate::matrix::GainMatrix;

/// Resolved, immutable mixing state for one layout conversion
///
/// # Example
/// ```
/// use chanmix::{ChannelRole, SampleFormat, Session};
///
/// let session = Session::create(
///     SampleFormat::F32,
///     &[ChannelRole::FrontLeft, ChannelRole::Silence, ChannelRole::FrontRight],
///     &[ChannelRole::FrontLeft, ChannelRole::FrontRight],
/// )
/// .unwrap();
///
/// let input = [1.0_f32, 2.0, 3.0];
/// let mut output = [0.0_f32; 2];
/// session.mix(&input, &mut output).unwrap();
/// assert_eq!(output, [1.0, 3.0]);
///
/// session.destroy();
/// ```
#[derive(Debug)]
pub struct Session {
    format: SampleFormat,
    matrix: GainMatrix,
}

impl Session {
    /// Create a session with the default configuration
    ///
    /// # Errors
    /// `InvalidLayout` if either layout is empty.
    pub fn create(
        format: SampleFormat,
        input: &[ChannelRole],
        output: &[ChannelRole],
    ) -> Result<Self> {
        Self::with_config(format, input, output, &MixerConfig::default())
    }

    /// Create a session resolving its matrix with `config`
    ///
    /// # Errors
    /// `InvalidLayout` if either layout is empty, `UnsupportedMapping` under
    /// the strict policy, `Config` if the coefficient table is invalid.
    pub fn with_config(
        format: SampleFormat,
        input: &[ChannelRole],
        output: &[ChannelRole],
        config: &MixerConfig,
    ) -> Result<Self> {
        let input = layout("input", input)?;
        let output = layout("output", output)?;
        Self::from_layouts(format, input, output, config)
    }

    /// Create a session from already validated layouts
    pub fn from_layouts(
        format: SampleFormat,
        input: Layout,
        output: Layout,
        config: &MixerConfig,
    ) -> Result<Self> {
        let matrix = config.builder().build(&input, &output)?;
        debug!(
            %format,
            input = %input,
            output = %output,
            policy = ?config.policy,
            "session created"
        );
        Ok(Self { format, matrix })
    }

    /// Mix one interleaved input buffer into one interleaved output buffer
    ///
    /// Both buffers must use the session's sample format and describe the
    /// same number of frames. Returns the number of frames mixed. On error
    /// the output buffer is left untouched.
    ///
    /// # Errors
    /// `FormatMismatch` if `T` is not the session format,
    /// `BufferSizeMismatch` if a buffer holds a partial frame or the frame
    /// counts differ.
    pub fn mix<T: Sample>(&self, input: &[T], output: &mut [T]) -> Result<usize> {
        if T::FORMAT != self.format {
            return Err(ChanmixError::FormatMismatch {
                expected: self.format,
                actual: T::FORMAT,
            });
        }
        mix_frames(&self.matrix, input, output)
    }

    /// Release the session
    ///
    /// Equivalent to dropping it; provided so release can be spelled out at
    /// the call site.
    pub fn destroy(self) {
        drop(self);
    }

    pub fn format(&self) -> SampleFormat {
        self.format
    }

    pub fn input_layout(&self) -> &Layout {
        self.matrix.input_layout()
    }

    pub fn output_layout(&self) -> &Layout {
        self.matrix.output_layout()
    }

    /// The frozen gain matrix
    pub fn matrix(&self) -> &GainMatrix {
        &self.matrix
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        debug!(
            format = %self.format,
            input = %self.matrix.input_layout(),
            output = %self.matrix.output_layout(),
            "session released"
        );
    }
}

fn layout(side: &str, roles: &[ChannelRole]) -> Result<Layout> {
    if roles.is_empty() {
        return Err(ChanmixError::invalid_layout(format!(
            "{} layout needs at least one channel",
            side
        )));
    }
    Layout::new(roles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ChannelRole::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_session_is_send_sync() {
        assert_send_sync::<Session>();
    }

    #[test]
    fn test_create_rejects_empty_layouts() {
        let err = Session::create(SampleFormat::F32, &[], &[FrontLeft]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LAYOUT");
        assert!(err.to_string().contains("input"));

        let err = Session::create(SampleFormat::F32, &[FrontLeft], &[]).unwrap_err();
        assert!(err.to_string().contains("output"));
    }

    #[test]
    fn test_strict_create_fails_without_session() {
        let result = Session::with_config(
            SampleFormat::I16,
            &[FrontLeft, FrontRight],
            &[LowFrequency],
            &MixerConfig::strict(),
        );
        assert_eq!(result.unwrap_err().error_code(), "UNSUPPORTED_MAPPING");
    }

    #[test]
    fn test_mix_center_fold() {
        let session = Session::create(SampleFormat::F32, &[FrontCenter], &[FrontLeft, FrontRight])
            .unwrap();
        let mut output = [0.0_f32; 2];
        session.mix(&[2.0_f32], &mut output).unwrap();
        let expected = 2.0 * session.matrix().get(0, 0) as f32;
        assert_relative_eq!(output[0], expected);
        assert_relative_eq!(output[1], expected);
    }

    #[test]
    fn test_wrong_sample_type_rejected() {
        let session = Session::create(SampleFormat::I16, &[FrontLeft], &[FrontLeft]).unwrap();
        let mut output = [5.0_f32];
        let err = session.mix(&[1.0_f32], &mut output).unwrap_err();
        assert_eq!(err.error_code(), "FORMAT_MISMATCH");
        assert_eq!(output, [5.0]);
    }

    #[test]
    fn test_accessors() {
        let session = Session::create(SampleFormat::U8, &[FrontLeft, FrontRight], &[FrontCenter])
            .unwrap();
        assert_eq!(session.format(), SampleFormat::U8);
        assert_eq!(session.input_layout(), &Layout::stereo());
        assert_eq!(session.output_layout(), &Layout::mono());
        assert_eq!(session.matrix().output_channels(), 1);
    }

    #[test]
    fn test_repeated_mix_is_bit_identical() {
        let session =
            Session::create(SampleFormat::F32, Layout::surround_5_1().roles(), &[FrontCenter])
                .unwrap();
        let input: Vec<f32> = (0..60).map(|i| (i as f32 * 0.37).sin()).collect();
        let mut first = vec![0.0_f32; 10];
        let mut second = vec![0.0_f32; 10];
        session.mix(&input, &mut first).unwrap();
        session.mix(&input, &mut second).unwrap();
        assert_eq!(
            first.iter().map(|s| s.to_bits()).collect::<Vec<_>>(),
            second.iter().map(|s| s.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_destroy_consumes() {
        let session = Session::create(SampleFormat::F64, &[Silence], &[Silence]).unwrap();
        session.destroy();
    }
}
