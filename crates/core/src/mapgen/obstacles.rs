//! Interior obstacle carving over a snapshot of the floor.

use std::collections::BTreeSet;

use rand::Rng;

use crate::seed::GenRng;
use crate::types::{Pos, Span};

pub struct ObstacleContext<'a> {
    pub floor: &'a mut BTreeSet<Pos>,
    /// Tiles that clusters must leave on the floor.
    pub protected: &'a BTreeSet<Pos>,
    pub chance: f32,
    pub cluster: Span<i32>,
}

/// Moves square clusters of tiles from the floor into a new obstacle set.
///
/// Anchors are visited in the order of a snapshot taken before any carving,
/// so a tile removed by an earlier cluster still gets its own roll.
pub fn carve_obstacles(rng: &mut GenRng, context: ObstacleContext<'_>) -> BTreeSet<Pos> {
    let chance = if context.chance.is_nan() { 0.0 } else { context.chance.clamp(0.0, 1.0) };
    let cluster = context.cluster.ordered();
    let snapshot: Vec<Pos> = context.floor.iter().copied().collect();

    let mut obstacles = BTreeSet::new();
    for anchor in snapshot {
        if !rng.gen_bool(f64::from(chance)) {
            continue;
        }
        let side = rng.gen_range(cluster.min..=cluster.max).max(1);
        for dy in 0..side {
            for dx in 0..side {
                let tile = anchor.offset(dx, dy);
                if context.protected.contains(&tile) {
                    continue;
                }
                if context.floor.remove(&tile) {
                    obstacles.insert(tile);
                }
            }
        }
    }
    obstacles
}

#[cfg(test)]
mod tests {
    use rand::{RngCore, SeedableRng};

    use super::*;

    fn square_floor(size: i32) -> BTreeSet<Pos> {
        (0..size).flat_map(|y| (0..size).map(move |x| Pos::new(x, y))).collect()
    }

    #[test]
    fn zero_chance_leaves_floor_untouched() {
        let mut floor = square_floor(8);
        let before = floor.clone();
        let obstacles = carve_obstacles(
            &mut GenRng::seed_from_u64(1),
            ObstacleContext {
                floor: &mut floor,
                protected: &BTreeSet::new(),
                chance: 0.0,
                cluster: Span::new(1, 3),
            },
        );
        assert!(obstacles.is_empty());
        assert_eq!(floor, before);
    }

    #[test]
    fn carved_tiles_move_from_floor_to_obstacles() {
        let mut floor = square_floor(12);
        let before = floor.clone();
        let obstacles = carve_obstacles(
            &mut GenRng::seed_from_u64(2),
            ObstacleContext {
                floor: &mut floor,
                protected: &BTreeSet::new(),
                chance: 0.1,
                cluster: Span::new(1, 3),
            },
        );

        assert!(!obstacles.is_empty());
        assert!(floor.is_disjoint(&obstacles));
        let union: BTreeSet<Pos> = floor.union(&obstacles).copied().collect();
        assert_eq!(union, before, "carving must only reclassify existing floor tiles");
    }

    #[test]
    fn certain_chance_clears_everything_that_is_not_protected() {
        let mut floor = square_floor(6);
        let protected: BTreeSet<Pos> = (0..6).map(|x| Pos::new(x, 2)).collect();
        let obstacles = carve_obstacles(
            &mut GenRng::seed_from_u64(3),
            ObstacleContext {
                floor: &mut floor,
                protected: &protected,
                chance: 1.0,
                cluster: Span::new(1, 1),
            },
        );

        assert_eq!(floor, protected);
        assert_eq!(obstacles.len(), 30);
    }

    #[test]
    fn carved_tiles_still_roll_as_anchors() {
        let original = square_floor(10);
        let chance = 0.3;
        let mut floor = original.clone();
        let mut rng = GenRng::seed_from_u64(6);
        let obstacles = carve_obstacles(
            &mut rng,
            ObstacleContext {
                floor: &mut floor,
                protected: &BTreeSet::new(),
                chance,
                cluster: Span::new(2, 3),
            },
        );

        // One roll per tile of the untouched floor, in its iteration order.
        let mut replay = GenRng::seed_from_u64(6);
        let mut expected = BTreeSet::new();
        for anchor in &original {
            if !replay.gen_bool(f64::from(chance)) {
                continue;
            }
            let side = replay.gen_range(2..=3);
            for dy in 0..side {
                for dx in 0..side {
                    let tile = anchor.offset(dx, dy);
                    if original.contains(&tile) {
                        expected.insert(tile);
                    }
                }
            }
        }

        assert!(expected.len() < original.len(), "clusters should overlap live anchors");
        assert_eq!(obstacles, expected);
        assert_eq!(rng.next_u64(), replay.next_u64(), "both passes must consume equal draws");
    }

    #[test]
    fn same_seed_carves_same_obstacles() {
        let carve = |seed| {
            let mut floor = square_floor(16);
            carve_obstacles(
                &mut GenRng::seed_from_u64(seed),
                ObstacleContext {
                    floor: &mut floor,
                    protected: &BTreeSet::new(),
                    chance: 0.05,
                    cluster: Span::new(1, 4),
                },
            )
        };
        assert_eq!(carve(77), carve(77));
    }
}
