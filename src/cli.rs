// SPDX-License-Identifier: GPL-3.0-only

//! CLI sample commands
//!
//! Each command stands in for one of the sensor sample applications, with a
//! synthetic frame source in place of device input:
//! - Depth frame conversion plus the point-of-interest distance query
//! - Body-index colorizing driven by the audio/body correlation
//! - Audio sub-frame recording to a waveform file

use std::path::PathBuf;

use sensorview::audio::BeamSubFrame;
use sensorview::config::DepthDisplayMode;
use sensorview::constants::{audio, body};
use sensorview::correlation::{CorrelationCell, TrackedBody};
use sensorview::errors::SourceError;
use sensorview::frame::DepthRange;
use sensorview::source::{FramePoll, FrameSource};
use sensorview::stream::{BodyIndexStream, DepthStream, StreamView};
use sensorview::{FrameDescription, WaveFileSink};

/// Synthetic reader delivering the same frame on every poll
struct StaticSource<T: Copy> {
    desc: FrameDescription,
    frame: Vec<T>,
}

impl<T: Copy> FrameSource for StaticSource<T> {
    type Sample = T;

    fn frame_description(&self) -> FrameDescription {
        self.desc
    }

    fn poll_frame(&mut self, dest: &mut [T]) -> Result<FramePoll, SourceError> {
        dest.copy_from_slice(&self.frame);
        Ok(FramePoll::Frame)
    }
}

/// Convert one synthetic depth frame and report the center distance
pub fn demo_depth(
    width: u32,
    height: u32,
    gray16: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let desc = FrameDescription::new(width, height, 2);

    // Horizontal ramp from the sensor face out to the scale maximum
    let frame: Vec<u16> = (0..desc.pixel_count())
        .map(|i| ((i as u32 % width) * 8000 / width.max(1)) as u16)
        .collect();

    let source = StaticSource { desc, frame };
    let mode = if gray16 {
        DepthDisplayMode::Gray16
    } else {
        DepthDisplayMode::Rgba8
    };
    let mut stream = DepthStream::open(source, mode, DepthRange::default());
    stream.update()?;

    let (cx, cy) = (width / 2, height / 2);
    println!("Depth frame: {}x{}, mode {}", width, height, mode.display_name());
    match stream.depth_at(cx, cy) {
        Some(mm) => println!("Distance at center ({}, {}): {}mm", cx, cy, mm),
        None => println!("Center point out of range"),
    }

    let bytes = stream.display_bytes();
    println!(
        "Display buffer: {} bytes, first pixel {:?}",
        bytes.len(),
        &bytes[..4.min(bytes.len())]
    );
    Ok(())
}

/// Colorize one synthetic body-index frame with body 2 highlighted
pub fn demo_body_index() -> Result<(), Box<dyn std::error::Error>> {
    let desc = FrameDescription::new(16, 4, 1);

    // Two people in front of a background: slots 1 and 2
    let frame: Vec<u8> = (0..desc.pixel_count())
        .map(|i| match i % 8 {
            2 | 3 => 1,
            5 | 6 => 2,
            _ => body::NO_BODY,
        })
        .collect();

    // Audio beam points at the person in slot 2
    let cell = CorrelationCell::new();
    cell.update_from_beam(&BeamSubFrame {
        beam_angle: 0.31,
        beam_angle_confidence: 0.9,
        correlated_tracking_id: Some(1042),
    });
    let mut bodies = [TrackedBody::default(); body::MAX_BODIES];
    bodies[2] = TrackedBody::tracked(1042);
    cell.resolve_index(&bodies);

    let source = StaticSource { desc, frame };
    let mut stream = BodyIndexStream::open(source, cell);
    stream.update()?;

    let mut white = 0;
    let mut red = 0;
    let mut blue = 0;
    for px in stream.display_bytes().chunks_exact(4) {
        match px {
            [255, 255, 255, 255] => white += 1,
            [255, 0, 0, 255] => red += 1,
            _ => blue += 1,
        }
    }
    println!(
        "Body-index frame: {} background, {} highlighted, {} other body pixels",
        white, red, blue
    );
    Ok(())
}

/// Record a sine sweep through the waveform sink
pub fn record(output: PathBuf, seconds: u32) -> Result<(), Box<dyn std::error::Error>> {
    let mut sink = WaveFileSink::native();
    sink.open(&output)?;

    let subframes = (seconds * audio::SAMPLE_RATE) as usize / audio::SUBFRAME_SAMPLES;
    let mut phase = 0.0f32;
    let mut buffer = Vec::with_capacity(audio::SUBFRAME_SAMPLES * audio::BYTES_PER_SAMPLE);

    for frame in 0..subframes {
        // Sweep from 200 Hz up to 2 kHz over the recording
        let hz = 200.0 + 1800.0 * frame as f32 / subframes.max(1) as f32;
        let step = std::f32::consts::TAU * hz / audio::SAMPLE_RATE as f32;

        buffer.clear();
        for _ in 0..audio::SUBFRAME_SAMPLES {
            phase = (phase + step) % std::f32::consts::TAU;
            let sample = 0.5 * phase.sin();
            buffer.extend_from_slice(&sample.to_le_bytes());
        }
        sink.write(&buffer)?;
    }

    let bytes = sink.bytes_written();
    sink.close()?;
    println!(
        "Recorded {} sub-frames ({} bytes) to {}",
        subframes,
        bytes,
        output.display()
    );
    Ok(())
}
