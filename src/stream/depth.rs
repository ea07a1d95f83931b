// SPDX-License-Identifier: GPL-3.0-only

//! Depth stream view (millimeter samples to grayscale display)

use tracing::{debug, info};

use super::{FrameStatus, StreamView};
use crate::config::DepthDisplayMode;
use crate::errors::SensorError;
use crate::frame::{DepthRange, DisplayBuffer, FrameDescription, convert};
use crate::source::{FramePoll, FrameSource};

/// Depth stream: scales millimeter range samples into an 8-bit RGBA or
/// 16-bit grayscale display buffer, and answers point-of-interest distance
/// queries against its copy of the latest raw frame
pub struct DepthStream<S: FrameSource<Sample = u16>> {
    source: S,
    desc: FrameDescription,
    range: DepthRange,
    mode: DepthDisplayMode,
    raw: Vec<u16>,
    display: DisplayBuffer,
}

impl<S: FrameSource<Sample = u16>> DepthStream<S> {
    /// Open the stream in the given display mode, sizing all buffers once
    /// against the reader's descriptor
    pub fn open(source: S, mode: DepthDisplayMode, range: DepthRange) -> Self {
        let desc = source.frame_description();
        info!(
            width = desc.width,
            height = desc.height,
            mode = mode.display_name(),
            min_reliable_mm = range.min_reliable_mm,
            max_reliable_mm = range.max_reliable_mm,
            "opened depth stream"
        );
        Self {
            raw: vec![0; desc.pixel_count()],
            display: match mode {
                DepthDisplayMode::Rgba8 => DisplayBuffer::rgba(&desc),
                DepthDisplayMode::Gray16 => DisplayBuffer::gray16(&desc),
            },
            source,
            desc,
            range,
            mode,
        }
    }

    /// Poll for the latest frame and rewrite the display buffer
    pub fn update(&mut self) -> Result<FrameStatus, SensorError> {
        match self.source.poll_frame(&mut self.raw)? {
            FramePoll::Dropped => {
                debug!("depth frame dropped");
                Ok(FrameStatus::Skipped)
            }
            FramePoll::Frame => {
                match &mut self.display {
                    DisplayBuffer::Rgba(dest) => {
                        convert::depth_to_rgba(&self.desc, &self.raw, dest)?
                    }
                    DisplayBuffer::Gray16(dest) => {
                        convert::depth_to_gray16(&self.desc, &self.raw, dest)?
                    }
                }
                Ok(FrameStatus::Updated)
            }
        }
    }

    /// Raw millimeter distance at a pixel coordinate, from the latest
    /// received frame
    pub fn depth_at(&self, x: u32, y: u32) -> Option<u16> {
        self.desc.index_of(x, y).map(|index| self.raw[index])
    }

    /// Display mode selected at open time
    pub fn mode(&self) -> DepthDisplayMode {
        self.mode
    }

    /// Device-reported reliable range
    pub fn range(&self) -> DepthRange {
        self.range
    }

    /// Current display buffer
    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }
}

impl<S: FrameSource<Sample = u16>> StreamView for DepthStream<S> {
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

    fn open_stream(
        desc: FrameDescription,
        mode: DepthDisplayMode,
        frames: Vec<Vec<u16>>,
    ) -> DepthStream<ScriptedSource<u16>> {
        let mut source = ScriptedSource::new(desc);
        for frame in frames {
            source.push_frame(frame);
        }
        DepthStream::open(source, mode, DepthRange::default())
    }

    #[test]
    fn test_rgba_mode_update() {
        let desc = FrameDescription::new(2, 1, 2);
        let mut stream = open_stream(desc, DepthDisplayMode::Rgba8, vec![vec![4000, 8000]]);

        assert_eq!(stream.update().unwrap(), FrameStatus::Updated);
        assert_eq!(
            stream.display_bytes(),
            &[127, 127, 127, 255, 255, 255, 255, 255]
        );
    }

    #[test]
    fn test_gray16_mode_update() {
        let desc = FrameDescription::new(2, 1, 2);
        let mut stream = open_stream(desc, DepthDisplayMode::Gray16, vec![vec![4000, 0]]);

        stream.update().unwrap();
        match stream.display() {
            DisplayBuffer::Gray16(data) => assert_eq!(data, &vec![32767, 0]),
            other => panic!("unexpected display buffer: {:?}", other),
        }
    }

    #[test]
    fn test_point_query_returns_raw_millimeters() {
        let desc = FrameDescription::new(3, 2, 2);
        let mut stream = open_stream(
            desc,
            DepthDisplayMode::Rgba8,
            vec![vec![10, 20, 30, 40, 50, 60]],
        );

        stream.update().unwrap();
        assert_eq!(stream.depth_at(0, 0), Some(10));
        assert_eq!(stream.depth_at(1, 1), Some(50));
        assert_eq!(stream.depth_at(3, 0), None);
        assert_eq!(stream.depth_at(0, 2), None);
    }

    #[test]
    fn test_dropped_tick_keeps_previous_frame() {
        let desc = FrameDescription::new(1, 1, 2);
        let mut source = ScriptedSource::new(desc);
        source.push_frame(vec![8000]).push_drop();

        let mut stream = DepthStream::open(source, DepthDisplayMode::Rgba8, DepthRange::default());
        stream.update().unwrap();
        assert_eq!(stream.update().unwrap(), FrameStatus::Skipped);
        assert_eq!(stream.display_bytes(), &[255, 255, 255, 255]);
        assert_eq!(stream.depth_at(0, 0), Some(8000));
    }
}
