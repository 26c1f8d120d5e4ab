//! Procedural level layout generation split into coherent submodules.

pub mod model;

mod generator;
mod landmarks;
mod layout;
mod obstacles;
mod walls;

pub use generator::LayoutGenerator;
pub use landmarks::place_special_points;
pub use layout::{
    BORDER_MARGIN, CorridorNetwork, ROOM_PLACEMENT_ATTEMPTS, RoomPlacement, carve_room,
    connect_rooms, place_rooms,
};
pub use model::{Corridor, LevelLayout, Room, SpecialPoints, TileSets};
pub use obstacles::{ObstacleContext, carve_obstacles};
pub use walls::derive_walls;

use crate::config::LevelConfig;

pub fn generate_layout(config: &LevelConfig, seed: u64) -> LevelLayout {
    LayoutGenerator::new(config.clone()).generate(seed)
}
