//! Guard encounter orchestration: spawn sampling, then one record per spawn.

use crate::config::EncounterConfig;
use crate::seed::{ENCOUNTER_STREAM, GenRng, rng_for_stream};

use super::model::GuardEncounterSet;
use super::routes::{RouteContext, synthesize_guard};
use super::spawns::place_spawns;

pub struct EncounterGenerator {
    config: EncounterConfig,
}

impl EncounterGenerator {
    pub fn new(config: EncounterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> GuardEncounterSet {
        self.generate_with(&mut rng_for_stream(seed, ENCOUNTER_STREAM))
    }

    /// All spawns are drawn before any route, so the spawn layout for a seed
    /// does not depend on patrol settings.
    pub fn generate_with(&self, rng: &mut GenRng) -> GuardEncounterSet {
        let config = &self.config;
        let bounds = config.bounds.normalized();
        let requested = config.requested_guard_count();

        let placement = place_spawns(rng, bounds, requested, config.min_spacing);
        let context = RouteContext {
            bounds,
            patrol_percentage: config.patrol_percentage,
            waypoint_count: config.waypoint_count,
            max_patrol_distance: config.max_patrol_distance,
            difficulty: config.difficulty,
        };
        let guards: Vec<_> = placement
            .points
            .iter()
            .enumerate()
            .map(|(index, &spawn)| synthesize_guard(rng, index, spawn, &context))
            .collect();

        let encounters = GuardEncounterSet { guards, requested };
        log::debug!(
            "encounters: {} guards ({} requested, {} patrolling) after {} spawn attempts",
            encounters.guards.len(),
            requested,
            encounters.patrolling_count(),
            placement.attempts
        );
        encounters
    }
}
