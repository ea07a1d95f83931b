// SPDX-License-Identifier: GPL-3.0-only

//! sensorview - frame conversion and audio capture primitives for
//! motion-sensing cameras
//!
//! This library packages the per-frame transform layer of a motion-sensing
//! camera: raw sensor frames (color, depth, infrared, body-index) become
//! display-ready pixel buffers, and raw audio sub-frames accumulate into a
//! playable waveform file. Device acquisition, event delivery, skeletal
//! tracking and UI rendering stay behind the seams in [`source`].
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`frame`]: frame descriptors, display buffers and the pure conversion
//!   routines
//! - [`stream`]: per-kind stream views binding a converter to a reader
//! - [`audio`]: waveform file sink and float sample decoding
//! - [`correlation`]: audio-beam / body-tracking correlation state
//! - [`source`]: device and frame reader traits
//! - [`config`]: stream-open time configuration types
//!
//! # Example
//!
//! ```ignore
//! let mut depth = DepthStream::open(reader, DepthDisplayMode::Rgba8, range);
//! loop {
//!     if depth.update()? == FrameStatus::Updated {
//!         ui.present(depth.display_bytes());
//!     }
//! }
//! ```

pub mod audio;
pub mod config;
pub mod constants;
pub mod correlation;
pub mod errors;
pub mod frame;
pub mod source;
pub mod stream;

// Re-export commonly used types
pub use audio::{BeamSubFrame, WaveFileSink};
pub use config::{DepthDisplayMode, WaveFormat};
pub use correlation::{CorrelationCell, CorrelationSnapshot, TrackedBody};
pub use errors::{SensorError, SensorResult};
pub use frame::{DepthRange, DisplayBuffer, FrameDescription};
pub use source::{FramePoll, FrameSource, SensorDevice};
pub use stream::{
    BodyIndexStream, ColorStream, DepthStream, FrameStatus, InfraredStream, StreamView,
};
