//! Chanmix - Multichannel Channel-Layout Mixing
//!
//! Chanmix adapts interleaved audio from one channel layout to another. The
//! mapping between layouts is resolved once into a fixed gain matrix and then
//! applied, frame by frame, to any number of buffers.
//!
//! # Architecture
//!
//! - `channel`: the closed catalog of channel roles and the layouts built from them
//! - `matrix`: resolution of a gain matrix from an (input, output) layout pair
//! - `engine`: sample formats and the allocation-free mixing kernel
//! - `session`: the create / mix / destroy lifecycle tying it together
//!
//! # Example
//! ```
//! use chanmix::{ChannelRole, SampleFormat, Session};
//!
//! let session = Session::create(
//!     SampleFormat::F32,
//!     &[ChannelRole::FrontCenter],
//!     &[ChannelRole::FrontLeft, ChannelRole::FrontRight],
//! )
//! .unwrap();
//!
//! let mut stereo = [0.0_f32; 4];
//! session.mix(&[0.5_f32, -0.5], &mut stereo).unwrap();
//! assert_eq!(stereo[0], stereo[1]);
//! ```

pub mod channel;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod session;

pub use channel::{ChannelRole, Layout};
pub use config::MixerConfig;
pub use engine::{Sample, SampleFormat};
pub use error::{ChanmixError, Result};
pub use matrix::{CoefficientTable, GainMatrix, MappingPolicy};
pub use session::Session;
