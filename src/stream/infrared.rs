// SPDX-License-Identifier: GPL-3.0-only

//! Infrared stream view (16-bit intensity passthrough)

use tracing::{debug, info};

use super::{FrameStatus, StreamView};
use crate::errors::SensorError;
use crate::frame::{DisplayBuffer, FrameDescription, convert};
use crate::source::{FramePoll, FrameSource};

/// Infrared stream: intensity samples are already display-ready, so the
/// frame is reinterpreted as 16-bit grayscale without arithmetic
pub struct InfraredStream<S: FrameSource<Sample = u16>> {
    source: S,
    desc: FrameDescription,
    raw: Vec<u16>,
    display: DisplayBuffer,
}

impl<S: FrameSource<Sample = u16>> InfraredStream<S> {
    /// Open the stream, sizing buffers once against the reader's descriptor
    pub fn open(source: S) -> Self {
        let desc = source.frame_description();
        info!(
            width = desc.width,
            height = desc.height,
            "opened infrared stream"
        );
        Self {
            raw: vec![0; desc.pixel_count()],
            display: DisplayBuffer::gray16(&desc),
            source,
            desc,
        }
    }

    /// Poll for the latest frame and rewrite the display buffer
    pub fn update(&mut self) -> Result<FrameStatus, SensorError> {
        match self.source.poll_frame(&mut self.raw)? {
            FramePoll::Dropped => {
                debug!("infrared frame dropped");
                Ok(FrameStatus::Skipped)
            }
            FramePoll::Frame => {
                if let DisplayBuffer::Gray16(dest) = &mut self.display {
                    convert::infrared_to_gray16(&self.desc, &self.raw, dest)?;
                }
                Ok(FrameStatus::Updated)
            }
        }
    }

    /// Current display buffer
    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }
}

impl<S: FrameSource<Sample = u16>> StreamView for InfraredStream<S> {
    fn frame_description(&self) -> &FrameDescription {
        &self.desc
    }

    fn display_bytes(&self) -> &[u8] {
        self.display.as_bytes()
    }
}
