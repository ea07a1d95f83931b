// SPDX-License-Identifier: GPL-3.0-only

//! Color stream view (4-byte pixel passthrough)

use tracing::{debug, info};

use super::{FrameStatus, StreamView};
use crate::errors::SensorError;
use crate::frame::{DisplayBuffer, FrameDescription, convert};
use crate::source::{FramePoll, FrameSource};

/// Color stream: the device already delivers display-format 4-byte pixels,
/// so conversion is a checked byte-identical copy
pub struct ColorStream<S: FrameSource<Sample = u8>> {
    source: S,
    desc: FrameDescription,
    raw: Vec<u8>,
    display: DisplayBuffer,
}

impl<S: FrameSource<Sample = u8>> ColorStream<S> {
    /// Open the stream: size the raw and display buffers once against the
    /// reader's descriptor
    pub fn open(source: S) -> Self {
        let desc = source.frame_description();
        info!(
            width = desc.width,
            height = desc.height,
            "opened color stream"
        );
        Self {
            raw: vec![0; desc.byte_len()],
            display: DisplayBuffer::rgba(&desc),
            source,
            desc,
        }
    }

    /// Poll for the latest frame and rewrite the display buffer
    pub fn update(&mut self) -> Result<FrameStatus, SensorError> {
        match self.source.poll_frame(&mut self.raw)? {
            FramePoll::Dropped => {
                debug!("color frame dropped");
                Ok(FrameStatus::Skipped)
            }
            FramePoll::Frame => {
                if let DisplayBuffer::Rgba(dest) = &mut self.display {
                    convert::copy_color(&self.desc, &self.raw, dest)?;
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

impl<S: FrameSource<Sample = u8>> StreamView for ColorStream<S> {
    fn frame_description(&self) -> &FrameDescription {
        &self.desc
    }

    fn display_bytes(&self) -> &[u8] {
        self.display.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::testing::ScriptedSource;

    #[test]
    fn test_update_copies_frame() {
        let desc = FrameDescription::new(2, 1, 4);
        let mut source = ScriptedSource::new(desc);
        source.push_frame(vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let mut stream = ColorStream::open(source);
        assert_eq!(stream.update().unwrap(), FrameStatus::Updated);
        assert_eq!(stream.display_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_dropped_tick_keeps_previous_pixels() {
        let desc = FrameDescription::new(1, 1, 4);
        let mut source = ScriptedSource::new(desc);
        source.push_frame(vec![9, 9, 9, 255]).push_drop();

        let mut stream = ColorStream::open(source);
        stream.update().unwrap();
        assert_eq!(stream.update().unwrap(), FrameStatus::Skipped);
        assert_eq!(stream.display_bytes(), &[9, 9, 9, 255]);
    }
}
