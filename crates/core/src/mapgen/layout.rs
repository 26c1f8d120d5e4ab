//! Room placement and corridor carving logic for base level topology.

use std::collections::BTreeSet;

use rand::Rng;

use crate::config::LevelConfig;
use crate::seed::GenRng;
use crate::types::Pos;

use super::model::{Corridor, Room};

/// Placement attempts per requested room before the slot is skipped.
pub const ROOM_PLACEMENT_ATTEMPTS: usize = 50;
/// Tiles kept free of rooms along every level edge.
pub const BORDER_MARGIN: i32 = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomPlacement {
    pub rooms: Vec<Room>,
    pub requested: usize,
}

impl RoomPlacement {
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.rooms.len())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorridorNetwork {
    pub corridors: Vec<Corridor>,
    /// Every tile carved by any corridor, including tiles inside rooms.
    pub tiles: BTreeSet<Pos>,
}

pub fn place_rooms(rng: &mut GenRng, config: &LevelConfig) -> RoomPlacement {
    let count = config.room_count.ordered();
    let room_widths = config.room_width.ordered();
    let room_heights = config.room_height.ordered();
    let spacing = config.room_spacing.max(0);
    let requested = rng.gen_range(count.min..=count.max) as usize;

    let mut rooms: Vec<Room> = Vec::with_capacity(requested);
    for _ in 0..requested {
        for _ in 0..ROOM_PLACEMENT_ATTEMPTS {
            let room_width = rng.gen_range(room_widths.min..=room_widths.max).max(1);
            let room_height = rng.gen_range(room_heights.min..=room_heights.max).max(1);
            let max_x = config.width - room_width - BORDER_MARGIN;
            let max_y = config.height - room_height - BORDER_MARGIN;
            if max_x < BORDER_MARGIN || max_y < BORDER_MARGIN {
                continue;
            }

            let x = rng.gen_range(BORDER_MARGIN..=max_x);
            let y = rng.gen_range(BORDER_MARGIN..=max_y);
            let candidate = Room::new(x, y, room_width, room_height);
            let candidate_with_margin = candidate.inflated(spacing);
            if rooms.iter().any(|existing_room: &Room| {
                existing_room.inflated(spacing).overlaps(&candidate_with_margin)
            }) {
                continue;
            }
            rooms.push(candidate);
            break;
        }
    }

    let placement = RoomPlacement { rooms, requested };
    if placement.shortfall() > 0 {
        log::warn!(
            "placed {} of {} requested rooms after {} attempts per room",
            placement.rooms.len(),
            placement.requested,
            ROOM_PLACEMENT_ATTEMPTS
        );
    }
    placement
}

pub fn carve_room(floor: &mut BTreeSet<Pos>, room: &Room) {
    floor.extend(room.tiles());
}

/// Chains every room to its successor in placement order, then adds a few
/// random extra links to form loops.
pub fn connect_rooms(
    rng: &mut GenRng,
    rooms: &[Room],
    corridor_width: i32,
    floor: &mut BTreeSet<Pos>,
) -> CorridorNetwork {
    let mut network = CorridorNetwork::default();
    if rooms.len() < 2 {
        return network;
    }

    for pair in rooms.windows(2) {
        carve_corridor(rng, &mut network, pair[0].center(), pair[1].center(), corridor_width);
    }

    let extra_upper = (rooms.len() / 3).max(2);
    let extra_count = rng.gen_range(1..extra_upper);
    for _ in 0..extra_count {
        let from = rng.gen_range(0..rooms.len());
        let to = rng.gen_range(0..rooms.len());
        carve_corridor(rng, &mut network, rooms[from].center(), rooms[to].center(), corridor_width);
    }

    floor.extend(network.tiles.iter().copied());
    network
}

fn carve_corridor(
    rng: &mut GenRng,
    network: &mut CorridorNetwork,
    start: Pos,
    end: Pos,
    corridor_width: i32,
) {
    let half_width = corridor_width.max(1) / 2;
    let tiles = &mut network.tiles;
    if rng.gen_bool(0.5) {
        carve_vertical_line(tiles, start.x, start.y, end.y, half_width);
        carve_horizontal_line(tiles, end.y, start.x, end.x, half_width);
    } else {
        carve_horizontal_line(tiles, start.y, start.x, end.x, half_width);
        carve_vertical_line(tiles, end.x, start.y, end.y, half_width);
    }
    network.corridors.push(Corridor { start, end });
}

fn carve_horizontal_line(
    tiles: &mut BTreeSet<Pos>,
    y: i32,
    left_x: i32,
    right_x: i32,
    half_width: i32,
) {
    for x in left_x.min(right_x)..=left_x.max(right_x) {
        for offset in -half_width..=half_width {
            tiles.insert(Pos { y: y + offset, x });
        }
    }
}

fn carve_vertical_line(
    tiles: &mut BTreeSet<Pos>,
    x: i32,
    top_y: i32,
    bottom_y: i32,
    half_width: i32,
) {
    for y in top_y.min(bottom_y)..=top_y.max(bottom_y) {
        for offset in -half_width..=half_width {
            tiles.insert(Pos { y, x: x + offset });
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::SeedableRng;

    use super::*;
    use crate::types::Span;

    fn rng(seed: u64) -> GenRng {
        GenRng::seed_from_u64(seed)
    }

    #[test]
    fn placed_rooms_respect_spacing_and_border() {
        let config = LevelConfig::default();
        for seed in 0..20 {
            let placement = place_rooms(&mut rng(seed), &config);
            assert!(!placement.rooms.is_empty());
            assert!(placement.rooms.len() <= placement.requested);

            for (index, left) in placement.rooms.iter().enumerate() {
                assert!(left.x >= BORDER_MARGIN && left.y >= BORDER_MARGIN);
                assert!(left.right() <= config.width - BORDER_MARGIN);
                assert!(left.bottom() <= config.height - BORDER_MARGIN);
                for right in &placement.rooms[index + 1..] {
                    assert!(
                        !left
                            .inflated(config.room_spacing)
                            .overlaps(&right.inflated(config.room_spacing)),
                        "rooms must keep their spacing: {left:?} vs {right:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn crowded_level_reports_shortfall_instead_of_failing() {
        let config = LevelConfig {
            width: 20,
            height: 20,
            room_count: Span::new(10, 10),
            room_width: Span::new(6, 6),
            room_height: Span::new(6, 6),
            ..Default::default()
        };
        let placement = place_rooms(&mut rng(3), &config);
        assert_eq!(placement.requested, 10);
        assert!(placement.shortfall() > 0);
        assert!(!placement.rooms.is_empty());
    }

    #[test]
    fn rooms_too_large_for_level_are_skipped() {
        let config = LevelConfig {
            width: 10,
            height: 10,
            room_width: Span::new(8, 8),
            ..Default::default()
        };
        let placement = place_rooms(&mut rng(1), &config);
        assert!(placement.rooms.is_empty());
        assert_eq!(placement.shortfall(), placement.requested);
    }

    #[test]
    fn chained_corridors_connect_every_room() {
        let config = LevelConfig::default();
        let mut generator_rng = rng(11);
        let placement = place_rooms(&mut generator_rng, &config);
        let mut floor = BTreeSet::new();
        for room in &placement.rooms {
            carve_room(&mut floor, room);
        }
        let network = connect_rooms(&mut generator_rng, &placement.rooms, 1, &mut floor);

        assert!(network.corridors.len() >= placement.rooms.len() - 1);
        for (index, pair) in placement.rooms.windows(2).enumerate() {
            let expected = Corridor { start: pair[0].center(), end: pair[1].center() };
            assert_eq!(network.corridors[index], expected);
        }

        let start = placement.rooms[0].center();
        let reachable = flood_fill(&floor, start);
        for room in &placement.rooms {
            assert!(reachable.contains(&room.center()), "room {room:?} should be reachable");
        }
    }

    fn row_of_rooms(count: i32) -> Vec<Room> {
        (0..count).map(|index| Room::new(2 + index * 10, 2, 6, 6)).collect()
    }

    #[test]
    fn extra_links_stay_below_the_half_open_upper_bound() {
        // n / 3 is the exclusive cap, raised to 2, so six rooms still get exactly one.
        for (room_count, allowed) in [(2, 1..=1), (5, 1..=1), (6, 1..=1), (9, 1..=2)] {
            let rooms = row_of_rooms(room_count);
            let chain = rooms.len() - 1;
            let mut seen = BTreeSet::new();
            for seed in 0..64 {
                let mut floor = BTreeSet::new();
                let network = connect_rooms(&mut rng(seed), &rooms, 1, &mut floor);
                let extra = network.corridors.len() - chain;
                assert!(allowed.contains(&extra), "{room_count} rooms got {extra} extra links");
                seen.insert(extra);
            }
            assert_eq!(seen.into_iter().collect::<Vec<_>>(), allowed.collect::<Vec<_>>());
        }
    }

    #[test]
    fn single_room_gets_no_corridors() {
        let rooms = [Room::new(4, 4, 6, 6)];
        let mut floor = BTreeSet::new();
        let network = connect_rooms(&mut rng(5), &rooms, 1, &mut floor);
        assert!(network.corridors.is_empty());
        assert!(floor.is_empty());
    }

    #[test]
    fn corridor_width_thickens_both_segments() {
        let mut network = CorridorNetwork::default();
        carve_corridor(&mut rng(9), &mut network, Pos::new(5, 5), Pos::new(12, 9), 3);

        // Start and end are joined by two segments, each three tiles across.
        for offset in -1..=1 {
            assert!(
                network.tiles.contains(&Pos::new(5 + offset, 5))
                    || network.tiles.contains(&Pos::new(5, 5 + offset))
            );
        }
        let vertical_first = network.tiles.contains(&Pos::new(4, 7));
        if vertical_first {
            assert!(network.tiles.contains(&Pos::new(6, 7)));
            assert!(network.tiles.contains(&Pos::new(9, 10)));
        } else {
            assert!(network.tiles.contains(&Pos::new(9, 4)));
            assert!(network.tiles.contains(&Pos::new(13, 7)));
        }
        assert!(network.tiles.contains(&Pos::new(12, 9)));
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
}
