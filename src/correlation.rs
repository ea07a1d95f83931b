// SPDX-License-Identifier: GPL-3.0-only

//! Audio beam / body tracking correlation state
//!
//! The audio stream reports which tracking id the microphone beam points at;
//! the body stream reports which body slot currently carries that id. The
//! body-index colorizer reads both to pick its highlight color. The three
//! callbacks run on independent serialization domains, so the pair is
//! published as a whole value: readers copy one complete snapshot and can
//! never observe a half-updated `(tracking_id, tracking_index)`.

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::audio::BeamSubFrame;

/// One tracked body slot as reported by the external body tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackedBody {
    /// Tracker-assigned id, stable while the body stays tracked
    pub tracking_id: u64,
    /// Whether this slot currently holds a tracked body
    pub is_tracked: bool,
}

impl TrackedBody {
    /// A slot holding a tracked body with the given id
    pub fn tracked(tracking_id: u64) -> Self {
        Self {
            tracking_id,
            is_tracked: true,
        }
    }
}

/// A self-consistent view of the audio/body correlation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CorrelationSnapshot {
    /// Tracking id of the body the audio beam points at, if any
    pub tracking_id: Option<u64>,
    /// Body slot index resolved for `tracking_id`, if the body is currently
    /// tracked
    pub tracking_index: Option<u8>,
    /// Beam direction in radians as reported with the last audio sub-frame
    pub beam_angle: f32,
}

/// Shared correlation cell
///
/// Cloneable handle; the audio callback and the body callback write through
/// their own clones, the body-index callback reads one snapshot per frame
/// pass. Updates replace the whole snapshot under the lock.
#[derive(Debug, Clone, Default)]
pub struct CorrelationCell {
    inner: Arc<Mutex<CorrelationSnapshot>>,
}

impl CorrelationCell {
    /// Create a cell with an empty correlation
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out the current snapshot
    pub fn snapshot(&self) -> CorrelationSnapshot {
        self.inner.lock().map(|guard| *guard).unwrap_or_default()
    }

    /// Apply an audio sub-frame: record the beam angle and the correlated
    /// tracking id (clearing both id and index when the beam correlates
    /// with nobody)
    pub fn update_from_beam(&self, beam: &BeamSubFrame) {
        if let Ok(mut guard) = self.inner.lock() {
            let next = CorrelationSnapshot {
                tracking_id: beam.correlated_tracking_id,
                tracking_index: if beam.correlated_tracking_id == guard.tracking_id {
                    guard.tracking_index
                } else {
                    None
                },
                beam_angle: beam.beam_angle,
            };
            if next.tracking_id != guard.tracking_id {
                debug!(tracking_id = ?next.tracking_id, "audio beam correlation changed");
            }
            *guard = next;
        }
    }

    /// Apply a body frame: resolve the current tracking id to a body slot
    /// index, clearing the index when the id is absent from the array
    pub fn resolve_index(&self, bodies: &[TrackedBody]) {
        if let Ok(mut guard) = self.inner.lock() {
            let index = guard.tracking_id.and_then(|id| {
                bodies
                    .iter()
                    .position(|body| body.is_tracked && body.tracking_id == id)
                    .map(|slot| slot as u8)
            });
            *guard = CorrelationSnapshot {
                tracking_index: index,
                ..*guard
            };
        }
    }
}
