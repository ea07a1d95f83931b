// SPDX-License-Identifier: GPL-3.0-only

//! Stream-open time configuration types
//!
//! Everything here is fixed when a stream or sink is opened and stays
//! constant for its lifetime.

use serde::{Deserialize, Serialize};

use crate::constants::audio;
use crate::errors::AudioSinkError;

/// Display mode for the depth stream, selected once at stream open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepthDisplayMode {
    /// 8-bit grayscale expanded into an RGBA buffer
    #[default]
    Rgba8,
    /// One 16-bit grayscale sample per pixel
    Gray16,
}

impl DepthDisplayMode {
    /// Display name for the mode
    pub fn display_name(&self) -> &'static str {
        match self {
            DepthDisplayMode::Rgba8 => "8-bit RGBA",
            DepthDisplayMode::Gray16 => "16-bit grayscale",
        }
    }
}

/// Waveform container format (the `fmt` chunk contents)
///
/// Defaults to the device's native capture format: 16 kHz, one beam-formed
/// channel, 32-bit IEEE float samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Bits per sample; only 32-bit float is accepted by the sink
    pub bits_per_sample: u16,
}

impl Default for WaveFormat {
    fn default() -> Self {
        Self {
            sample_rate: audio::SAMPLE_RATE,
            channels: audio::CHANNELS,
            bits_per_sample: audio::BITS_PER_SAMPLE,
        }
    }
}

impl WaveFormat {
    /// Bytes per sample frame across all channels
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Build the encoder spec, rejecting formats the device never produces
    pub(crate) fn wav_spec(&self) -> Result<hound::WavSpec, AudioSinkError> {
        if self.bits_per_sample != audio::BITS_PER_SAMPLE {
            return Err(AudioSinkError::Encode(format!(
                "unsupported bits per sample: {} (sub-frames are 32-bit float)",
                self.bits_per_sample
            )));
        }
        Ok(hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format: hound::SampleFormat::Float,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_format_defaults() {
        let format = WaveFormat::default();
        assert_eq!(format.sample_rate, 16_000);
        assert_eq!(format.channels, 1);
        assert_eq!(format.bits_per_sample, 32);
        assert_eq!(format.block_align(), 4);
        assert_eq!(format.byte_rate(), 64_000);
    }

    #[test]
    fn test_non_float_format_rejected() {
        let format = WaveFormat {
            bits_per_sample: 16,
            ..Default::default()
        };
        assert!(matches!(
            format.wav_spec(),
            Err(AudioSinkError::Encode(_))
        ));
    }
}
