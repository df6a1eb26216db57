//! Sample representations
//!
//! Every format converts to a canonical `f64` for the multiply-accumulate and
//! back on write. Integer PCM is normalised to [-1, 1) and saturates on the
//! way back, since an out-of-range integer sample cannot be represented.
//! Float formats are never clamped.

use std::fmt;
use std::str::FromStr;

use num_traits::{clamp, AsPrimitive, Bounded};
use serde::{Deserialize, Serialize};

use crate::error::{ChanmixError, Result};

// ============================================================================
// Sample Format
// ============================================================================

/// Sample representation of both buffers a session mixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    /// Unsigned 8-bit PCM, offset binary (128 is silence)
    U8,
    /// Signed 16-bit PCM
    I16,
    /// Signed 32-bit PCM
    I32,
    /// 32-bit IEEE float
    F32,
    /// 64-bit IEEE float
    F64,
}

impl SampleFormat {
    pub const ALL: [SampleFormat; 5] = [
        SampleFormat::U8,
        SampleFormat::I16,
        SampleFormat::I32,
        SampleFormat::F32,
        SampleFormat::F64,
    ];

    /// Size of one sample in bytes
    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleFormat::U8 => 1,
            SampleFormat::I16 => 2,
            SampleFormat::I32 | SampleFormat::F32 => 4,
            SampleFormat::F64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, SampleFormat::F32 | SampleFormat::F64)
    }

    pub fn name(self) -> &'static str {
        match self {
            SampleFormat::U8 => "u8",
            SampleFormat::I16 => "i16",
            SampleFormat::I32 => "i32",
            SampleFormat::F32 => "f32",
            SampleFormat::F64 => "f64",
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleFormat {
    type Err = ChanmixError;

    fn from_str(s: &str) -> Result<Self> {
        SampleFormat::ALL
            .iter()
            .copied()
            .find(|format| s.trim().eq_ignore_ascii_case(format.name()))
            .ok_or_else(|| ChanmixError::UnsupportedFormat {
                details: format!("unknown sample format '{}'", s),
            })
    }
}

// ============================================================================
// Sample Trait
// ============================================================================

/// A primitive that can be stored in a mixed buffer
pub trait Sample: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Format tag this type represents
    const FORMAT: SampleFormat;

    /// Convert to the canonical mixing value
    fn to_mix(self) -> f64;

    /// Convert a mixed value back, rounding and saturating integer formats
    fn from_mix(value: f64) -> Self;
}

/// Scale, round and saturate a canonical value into an integer sample
#[inline]
fn quantize<T>(value: f64, scale: f64, offset: f64) -> T
where
    T: Bounded + AsPrimitive<f64>,
    f64: AsPrimitive<T>,
{
    let lo: f64 = T::min_value().as_();
    let hi: f64 = T::max_value().as_();
    clamp((value * scale + offset).round(), lo, hi).as_()
}

const U8_SCALE: f64 = 128.0;
const I16_SCALE: f64 = 32_768.0;
const I32_SCALE: f64 = 2_147_483_648.0;

impl Sample for u8 {
    const FORMAT: SampleFormat = SampleFormat::U8;

    #[inline]
    fn to_mix(self) -> f64 {
        (self as f64 - U8_SCALE) / U8_SCALE
    }

    #[inline]
    fn from_mix(value: f64) -> Self {
        quantize(value, U8_SCALE, U8_SCALE)
    }
}

impl Sample for i16 {
    const FORMAT: SampleFormat = SampleFormat::I16;

    #[inline]
    fn to_mix(self) -> f64 {
        self as f64 / I16_SCALE
    }

    #[inline]
    fn from_mix(value: f64) -> Self {
        quantize(value, I16_SCALE, 0.0)
    }
}

impl Sample for i32 {
    const FORMAT: SampleFormat = SampleFormat::I32;

    #[inline]
    fn to_mix(self) -> f64 {
        self as f64 / I32_SCALE
    }

    #[inline]
    fn from_mix(value: f64) -> Self {
        quantize(value, I32_SCALE, 0.0)
    }
}

impl Sample for f32 {
    const FORMAT: SampleFormat = SampleFormat::F32;

    #[inline]
    fn to_mix(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_mix(value: f64) -> Self {
        value as f32
    }
}

impl Sample for f64 {
    const FORMAT: SampleFormat = SampleFormat::F64;

    #[inline]
    fn to_mix(self) -> f64 {
        self
    }

    #[inline]
    fn from_mix(value: f64) -> Self {
        value
    }
}
