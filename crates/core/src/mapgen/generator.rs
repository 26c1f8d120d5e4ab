//! Level generation orchestration that composes the layout phases.
//!
//! Phases consume the random stream in a fixed order: rooms, corridors,
//! obstacles, walls, special points. Reordering them changes every later draw.

use std::collections::BTreeSet;

use crate::config::LevelConfig;
use crate::seed::{GenRng, LAYOUT_STREAM, rng_for_stream};

use super::landmarks::place_special_points;
use super::layout::{carve_room, connect_rooms, place_rooms};
use super::model::{LevelLayout, TileSets};
use super::obstacles::{ObstacleContext, carve_obstacles};
use super::walls::derive_walls;

pub struct LayoutGenerator {
    config: LevelConfig,
}

impl LayoutGenerator {
    pub fn new(config: LevelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> LevelLayout {
        self.generate_with(&mut rng_for_stream(seed, LAYOUT_STREAM))
    }

    pub fn generate_with(&self, rng: &mut GenRng) -> LevelLayout {
        let config = &self.config;

        let placement = place_rooms(rng, config);
        let mut floor = BTreeSet::new();
        for room in &placement.rooms {
            carve_room(&mut floor, room);
        }

        let network = connect_rooms(rng, &placement.rooms, config.corridor_width, &mut floor);

        let unprotected = BTreeSet::new();
        let protected = if config.harden_corridors { &network.tiles } else { &unprotected };
        let obstacle = carve_obstacles(
            rng,
            ObstacleContext {
                floor: &mut floor,
                protected,
                chance: config.obstacle_chance,
                cluster: config.obstacle_cluster,
            },
        );

        let wall = derive_walls(&floor, &obstacle);
        let objective_count = config.objective_count as usize;
        let special_points = place_special_points(&placement.rooms, objective_count);

        log::debug!(
            "layout: {} rooms ({} requested), {} corridors, {} floor, {} obstacle, {} wall tiles",
            placement.rooms.len(),
            placement.requested,
            network.corridors.len(),
            floor.len(),
            obstacle.len(),
            wall.len()
        );

        LevelLayout {
            width: config.width,
            height: config.height,
            rooms: placement.rooms,
            corridors: network.corridors,
            tiles: TileSets { floor, wall, obstacle },
            special_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;

    use super::*;
    use crate::types::{Pos, Span};

    #[test]
    fn same_seed_produces_byte_identical_layout() {
        let generator = LayoutGenerator::new(LevelConfig::default());
        let a = generator.generate(123_456);
        let b = generator.generate(123_456);
        assert_eq!(a, b);
        assert_eq!(a.canonical_bytes(), b.canonical_bytes());
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn generator_keeps_its_config() {
        let config = LevelConfig { width: 64, obstacle_chance: 0.0, ..Default::default() };
        let generator = LayoutGenerator::new(config.clone());
        assert_eq!(generator.config(), &config);
        assert_eq!(generator.generate(8).width, generator.config().width);
    }

    #[test]
    fn changing_seed_changes_layout() {
        let generator = LayoutGenerator::new(LevelConfig::default());
        assert_ne!(generator.generate(1).fingerprint(), generator.generate(2).fingerprint());
    }

    #[test]
    fn special_points_sit_on_room_centers() {
        let layout = LayoutGenerator::new(LevelConfig::default()).generate(42);
        let centers: Vec<Pos> = layout.rooms.iter().map(|room| room.center()).collect();
        assert_eq!(layout.special_points.start, centers[0]);
        assert_eq!(layout.special_points.extraction, *centers.last().unwrap());
        assert_eq!(layout.special_points.objectives.len(), 3);
        let objectives = &layout.special_points.objectives;
        assert!(objectives.iter().all(|objective| centers.contains(objective)));
    }

    #[test]
    fn hardened_corridors_keep_every_room_reachable() {
        let config = LevelConfig {
            obstacle_chance: 0.4,
            obstacle_cluster: Span::new(2, 3),
            harden_corridors: true,
            ..Default::default()
        };
        let generator = LayoutGenerator::new(config);
        for seed in 0..10 {
            let layout = generator.generate(seed);
            let reachable = flood_fill(&layout.tiles.floor, layout.special_points.start);
            for room in &layout.rooms {
                assert!(
                    reachable.contains(&room.center()),
                    "room {room:?} cut off for seed={seed}"
                );
            }
        }
    }

    #[test]
    fn hardening_does_not_shift_the_random_stream() {
        let faithful = LevelConfig { obstacle_chance: 0.1, ..Default::default() };
        let hardened = LevelConfig { harden_corridors: true, ..faithful.clone() };
        let a = LayoutGenerator::new(faithful).generate(5);
        let b = LayoutGenerator::new(hardened).generate(5);
        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a.corridors, b.corridors);
        assert!(b.tiles.obstacle.len() <= a.tiles.obstacle.len());
    }

    fn flood_fill(floor: &BTreeSet<Pos>, start: Pos) -> BTreeSet<Pos> {
        let mut open = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);
        while let Some(pos) = open.pop_front() {
            for next in [pos.offset(0, -1), pos.offset(1, 0), pos.offset(0, 1), pos.offset(-1, 0)] {
                if floor.contains(&next) && seen.insert(next) {
                    open.push_back(next);
                }
            }
        }
        seen
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]
        #[test]
        fn generated_tiles_stay_disjoint_with_supported_walls(
            seed in any::<u64>(),
            obstacle_percent in 0_u32..=20,
            corridor_width in 1_i32..=3,
        ) {
            let config = LevelConfig {
                obstacle_chance: obstacle_percent as f32 / 100.0,
                corridor_width,
                ..Default::default()
            };
            let layout = LayoutGenerator::new(config).generate(seed);
            let tiles = &layout.tiles;

            prop_assert!(tiles.is_disjoint());
            for wall in &tiles.wall {
                prop_assert!(
                    wall.neighbors8().iter().any(|neighbor| tiles.floor.contains(neighbor)),
                    "wall {wall:?} has no floor neighbor"
                );
            }
            for floor in &tiles.floor {
                for neighbor in floor.neighbors8() {
                    prop_assert!(
                        tiles.floor.contains(&neighbor) || tiles.is_impassable(neighbor),
                        "floor {floor:?} leaks into unclassified {neighbor:?}"
                    );
                }
            }
        }
    }
}
