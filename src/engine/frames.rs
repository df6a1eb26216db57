//! Interleaved buffer views
//!
//! A view pairs a caller's slice with a channel count and checks once, at
//! construction, that the slice holds a whole number of frames. After that
//! frames are handed out as fixed-width chunks with no further checks.

use std::slice::{ChunksExact, ChunksExactMut};

use crate::error::{ChanmixError, Result};

fn frame_count(len: usize, channels: usize, what: &str) -> Result<usize> {
    if channels == 0 {
        return Err(ChanmixError::buffer_size(format!(
            "{} buffer has zero channels",
            what
        )));
    }
    if len % channels != 0 {
        return Err(ChanmixError::buffer_size(format!(
            "{} buffer length {} is not divisible by channel count {}",
            what, len, channels
        )));
    }
    Ok(len / channels)
}

/// Read-only view of an interleaved buffer
#[derive(Debug, Clone, Copy)]
pub struct Frames<'a, T> {
    samples: &'a [T],
    channels: usize,
    frames: usize,
}

impl<'a, T> Frames<'a, T> {
    /// Wrap `samples` as frames of `channels` samples each
    ///
    /// # Errors
    /// `BufferSizeMismatch` if `channels` is zero or does not divide the
    /// slice length.
    pub fn new(samples: &'a [T], channels: usize) -> Result<Self> {
        let frames = frame_count(samples.len(), channels, "input")?;
        Ok(Self {
            samples,
            channels,
            frames,
        })
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.samples
    }

    /// One frame: a sample for every channel
    pub fn frame(&self, index: usize) -> Option<&'a [T]> {
        if index >= self.frames {
            return None;
        }
        let start = index * self.channels;
        Some(&self.samples[start..start + self.channels])
    }

    pub fn iter(&self) -> ChunksExact<'a, T> {
        self.samples.chunks_exact(self.channels)
    }
}

/// Writable view of an interleaved buffer
#[derive(Debug)]
pub struct FramesMut<'a, T> {
    samples: &'a mut [T],
    channels: usize,
    frames: usize,
}

impl<'a, T> FramesMut<'a, T> {
    /// Wrap `samples` as frames of `channels` samples each
    ///
    /// # Errors
    /// `BufferSizeMismatch` if `channels` is zero or does not divide the
    /// slice length.
    pub fn new(samples: &'a mut [T], channels: usize) -> Result<Self> {
        let frames = frame_count(samples.len(), channels, "output")?;
        Ok(Self {
            samples,
            channels,
            frames,
        })
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames == 0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.samples
    }

    pub fn frame_mut(&mut self, index: usize) -> Option<&mut [T]> {
        if index >= self.frames {
            return None;
        }
        let start = index * self.channels;
        Some(&mut self.samples[start..start + self.channels])
    }

    pub fn iter_mut(&mut self) -> ChunksExactMut<'_, T> {
        self.samples.chunks_exact_mut(self.channels)
    }
}
