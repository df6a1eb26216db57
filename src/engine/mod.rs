//! Mixing Engine
//!
//! Core audio processing including:
//! - Sample formats and their canonical float conversion
//! - Bounds-checked interleaved buffer views
//! - The per-frame matrix mixing kernel
//! - WAV file remixing

pub mod frames;
pub mod io;
pub mod mix;
pub mod sample;

pub use frames::{Frames, FramesMut};
pub use io::{read_wav, remix_wav, write_wav, RemixReport};
pub use mix::mix_frames;
pub use sample::{Sample, SampleFormat};
