//! Guard encounter generation: spaced spawns inside a rectangle, each with a
//! patrol route and vision parameters.

pub mod model;

mod generator;
mod routes;
mod spawns;

pub use generator::EncounterGenerator;
pub use model::{GuardEncounterSet, GuardPatrolRecord, PatrolType};
pub use routes::{
    BASE_VISION_RANGE, MAX_PATROL_LEG, MIN_PATROL_LEG, RouteContext, VISION_ANGLE_DEGREES,
    VISION_RANGE_PER_DIFFICULTY, synthesize_guard,
};
pub use spawns::{SPAWN_ATTEMPTS_PER_GUARD, SpawnPlacement, place_spawns};

use crate::config::EncounterConfig;

pub fn generate_encounters(config: &EncounterConfig, seed: u64) -> GuardEncounterSet {
    EncounterGenerator::new(config.clone()).generate(seed)
}
