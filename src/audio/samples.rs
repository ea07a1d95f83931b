// SPDX-License-Identifier: GPL-3.0-only

//! Raw sub-frame sample decoding and beam metadata

use crate::constants::audio::BYTES_PER_SAMPLE;

/// Decode a raw sub-frame buffer as 32-bit little-endian IEEE float samples.
///
/// Read-only inspection; the sink writes the original bytes regardless. A
/// trailing partial sample (buffer length not a multiple of 4) is not
/// yielded.
pub fn float_samples(bytes: &[u8]) -> impl ExactSizeIterator<Item = f32> + '_ {
    bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Decode the sample at `index` within a raw sub-frame buffer, or `None`
/// when the buffer holds no complete sample at that index
pub fn sample_at(bytes: &[u8], index: usize) -> Option<f32> {
    let start = index.checked_mul(BYTES_PER_SAMPLE)?;
    let chunk = bytes.get(start..start + BYTES_PER_SAMPLE)?;
    Some(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
}

/// Beam metadata delivered with one audio sub-frame
///
/// Produced by the external audio runtime; the beam direction estimate
/// itself is out of scope. Consumed by
/// [`crate::correlation::CorrelationCell::update_from_beam`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BeamSubFrame {
    /// Estimated beam direction in radians
    pub beam_angle: f32,
    /// Confidence of the direction estimate, 0.0 to 1.0
    pub beam_angle_confidence: f32,
    /// Tracking id of the body the beam correlates with, if any
    pub correlated_tracking_id: Option<u64>,
}
