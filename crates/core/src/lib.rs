pub mod config;
pub mod encounters;
pub mod generator;
pub mod invariants;
pub mod mapgen;
pub mod seed;
pub mod types;

pub use config::{ConfigError, EncounterConfig, GenerationConfig, LevelConfig};
pub use encounters::{GuardEncounterSet, GuardPatrolRecord, PatrolType, generate_encounters};
pub use generator::{GeneratedMission, MissionGenerator};
pub use mapgen::{LevelLayout, Room, SpecialPoints, TileSets, generate_layout};
pub use seed::{RANDOM_SEED_SENTINEL, SeedChoice, resolve_seed};
pub use types::*;
