//! Minimum-spacing guard spawn sampling inside a bounding rectangle.

use rand::Rng;

use crate::seed::GenRng;
use crate::types::{Bounds, Vec2};

/// Sampling attempts budgeted per requested spawn.
pub const SPAWN_ATTEMPTS_PER_GUARD: usize = 20;

#[derive(Clone, Debug, PartialEq)]
pub struct SpawnPlacement {
    pub points: Vec<Vec2>,
    pub requested: usize,
    /// Candidates drawn, accepted or not.
    pub attempts: usize,
}

impl SpawnPlacement {
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.points.len())
    }
}

pub fn place_spawns(
    rng: &mut GenRng,
    bounds: Bounds,
    requested: usize,
    min_spacing: f32,
) -> SpawnPlacement {
    let bounds = bounds.normalized();
    let extent = bounds.max - bounds.min;
    if !extent.x.is_finite() || !extent.y.is_finite() {
        log::warn!("guard spawn bounds {bounds:?} have no finite extent, placing none");
        return SpawnPlacement { points: Vec::new(), requested, attempts: 0 };
    }
    let max_attempts = requested.saturating_mul(SPAWN_ATTEMPTS_PER_GUARD);

    let mut points: Vec<Vec2> = Vec::new();
    let mut attempts = 0;
    while points.len() < requested && attempts < max_attempts {
        attempts += 1;
        let candidate = Vec2 {
            x: rng.gen_range(bounds.min.x..=bounds.max.x),
            y: rng.gen_range(bounds.min.y..=bounds.max.y),
        };
        if points.iter().all(|accepted| accepted.distance(candidate) >= min_spacing) {
            points.push(candidate);
        }
    }

    let placement = SpawnPlacement { points, requested, attempts };
    if placement.shortfall() > 0 {
        log::warn!(
            "found {} of {} guard spawns with spacing {min_spacing} after {} attempts",
            placement.points.len(),
            placement.requested,
            placement.attempts
        );
    }
    placement
}
