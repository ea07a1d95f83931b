// SPDX-License-Identifier: GPL-3.0-only

//! Per-kind sensor stream views
//!
//! A stream view binds one conversion variant to one reader at open time.
//! It owns the stream's descriptor, a raw-copy buffer and the display
//! buffer, all sized once; `update` polls the reader for the latest frame
//! and rewrites the display buffer in place. A dropped tick skips the
//! update entirely and leaves the previous display contents intact.

pub mod body_index;
pub mod color;
pub mod depth;
pub mod infrared;

pub use body_index::BodyIndexStream;
pub use color::ColorStream;
pub use depth::DepthStream;
pub use infrared::InfraredStream;

use crate::frame::FrameDescription;

/// Outcome of one stream tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// A frame arrived and the display buffer was rewritten
    Updated,
    /// The device dropped this tick; the display buffer is unchanged
    Skipped,
}

/// Common UI-facing surface of a stream view
///
/// The display buffer reference stays valid for the stream's lifetime and
/// is rewritten in place after each successful update.
pub trait StreamView {
    /// Fixed metadata for this stream
    fn frame_description(&self) -> &FrameDescription;

    /// Current display pixels as raw bytes
    fn display_bytes(&self) -> &[u8];
}
