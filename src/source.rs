// SPDX-License-Identifier: GPL-3.0-only

//! Device and frame reader seams
//!
//! The sensor runtime (device enumeration, USB plumbing, event delivery) is
//! an external collaborator. This module defines the traits the stream views
//! consume, replacing the runtime's pushed per-frame callbacks with an
//! explicit poll operation: the caller asks for the latest frame from
//! whatever loop or executor it runs, and conversion stays a plain
//! synchronous call.
//!
//! Each stream serializes its own frames (`poll_frame` takes `&mut self`);
//! distinct streams may be polled from distinct threads.

use crate::errors::{DeviceError, SourceError};
use crate::frame::FrameDescription;

/// Result of polling a reader for its latest frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePoll {
    /// A frame arrived and was copied into the caller's buffer
    Frame,
    /// The runtime had no frame for this tick (dropped by the device).
    /// Not an error; the caller skips the update and waits for the next tick.
    Dropped,
}

/// A sensor device handle
///
/// Stream setup is deferred until the device reports availability, and
/// happens exactly once per run. `close` releases the device handle and is
/// idempotent; readers must be released (streams dropped) before the handle.
pub trait SensorDevice {
    /// Whether the physical device is currently present
    fn is_available(&self) -> bool;

    /// Open the device, failing with [`DeviceError::NotAvailable`] when no
    /// device is present
    fn open(&mut self) -> Result<(), DeviceError>;

    /// Release the device handle. Safe to call repeatedly or from teardown
    /// paths.
    fn close(&mut self);
}

/// A readable sensor stream delivering fixed-size raw frames
///
/// The implementation copies the latest frame into the caller's buffer and
/// reclaims its own storage immediately afterwards; the library never holds
/// a reference to runtime-owned frame memory across calls.
pub trait FrameSource {
    /// Raw sample type of this stream (`u8` for color and body-index
    /// labels, `u16` for depth and infrared)
    type Sample: Copy;

    /// Fixed metadata for this stream, valid for its whole lifetime
    fn frame_description(&self) -> FrameDescription;

    /// Copy the latest frame into `dest`, which the caller sizes against
    /// [`FrameSource::frame_description`]
    fn poll_frame(&mut self, dest: &mut [Self::Sample]) -> Result<FramePoll, SourceError>;
}
