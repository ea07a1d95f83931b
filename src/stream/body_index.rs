// SPDX-License-Identifier: GPL-3.0-only

//! Body-index stream view (per-pixel body labels to classification colors)

use tracing::{debug, info};

use super::{FrameStatus, StreamView};
use crate::correlation::CorrelationCell;
use crate::errors::SensorError;
use crate::frame::{DisplayBuffer, FrameDescription, convert};
use crate::source::{FramePoll, FrameSource};

/// Body-index stream: colorizes per-pixel body labels, highlighting the
/// body the audio beam currently points at
///
/// The correlation cell is read exactly once per frame pass, so the whole
/// frame is classified against a single consistent snapshot even while the
/// audio and body callbacks keep publishing updates.
pub struct BodyIndexStream<S: FrameSource<Sample = u8>> {
    source: S,
    desc: FrameDescription,
    correlation: CorrelationCell,
    labels: Vec<u8>,
    display: DisplayBuffer,
}

impl<S: FrameSource<Sample = u8>> BodyIndexStream<S> {
    /// Open the stream against a shared correlation cell, sizing buffers
    /// once against the reader's descriptor
    pub fn open(source: S, correlation: CorrelationCell) -> Self {
        let desc = source.frame_description();
        info!(
            width = desc.width,
            height = desc.height,
            "opened body-index stream"
        );
        Self {
            labels: vec![0; desc.pixel_count()],
            display: DisplayBuffer::rgba(&desc),
            source,
            desc,
            correlation,
        }
    }

    /// Poll for the latest label frame and rewrite the display buffer
    pub fn update(&mut self) -> Result<FrameStatus, SensorError> {
        match self.source.poll_frame(&mut self.labels)? {
            FramePoll::Dropped => {
                debug!("body-index frame dropped");
                Ok(FrameStatus::Skipped)
            }
            FramePoll::Frame => {
                // One snapshot for the whole pass
                let highlight = self.correlation.snapshot().tracking_index;
                if let DisplayBuffer::Rgba(dest) = &mut self.display {
                    convert::body_index_to_rgba(&self.desc, &self.labels, highlight, dest)?;
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

impl<S: FrameSource<Sample = u8>> StreamView for BodyIndexStream<S> {
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
    use crate::audio::BeamSubFrame;
    use crate::correlation::TrackedBody;
    use crate::stream::testing::ScriptedSource;

    #[test]
    fn test_highlight_follows_correlation() {
        let desc = FrameDescription::new(4, 1, 1);
        let mut source = ScriptedSource::new(desc);
        source.push_frame(vec![255, 3, 3, 255]);

        let cell = CorrelationCell::new();
        cell.update_from_beam(&BeamSubFrame {
            correlated_tracking_id: Some(42),
            ..Default::default()
        });
        let mut bodies = [TrackedBody::default(); 6];
        bodies[3] = TrackedBody::tracked(42);
        cell.resolve_index(&bodies);

        let mut stream = BodyIndexStream::open(source, cell);
        assert_eq!(stream.update().unwrap(), FrameStatus::Updated);
        assert_eq!(
            stream.display_bytes(),
            &[
                255, 255, 255, 255, // background
                255, 0, 0, 255, // highlighted body
                255, 0, 0, 255, // highlighted body
                255, 255, 255, 255, // background
            ]
        );
    }

    #[test]
    fn test_no_correlation_renders_bodies_blue() {
        let desc = FrameDescription::new(2, 1, 1);
        let mut source = ScriptedSource::new(desc);
        source.push_frame(vec![0, 255]);

        let mut stream = BodyIndexStream::open(source, CorrelationCell::new());
        stream.update().unwrap();
        assert_eq!(
            stream.display_bytes(),
            &[0, 0, 255, 255, 255, 255, 255, 255]
        );
    }

    #[test]
    fn test_dropped_tick_is_skipped() {
        let desc = FrameDescription::new(1, 1, 1);
        let mut source = ScriptedSource::new(desc);
        source.push_drop();

        let mut stream = BodyIndexStream::open(source, CorrelationCell::new());
        assert_eq!(stream.update().unwrap(), FrameStatus::Skipped);
    }
}
