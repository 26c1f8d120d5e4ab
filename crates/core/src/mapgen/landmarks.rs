//! Start, extraction and objective selection from room centers.

use crate::types::Pos;

use super::model::{Room, SpecialPoints};

/// Start is the first room's center and extraction the last's. Objective `i`
/// sits in room `i + 1`, reusing the last room once the list runs out, so
/// objectives may coincide with extraction (or start, with a single room).
/// Without rooms every point falls back to the origin.
pub fn place_special_points(rooms: &[Room], objective_count: usize) -> SpecialPoints {
    let Some(last_index) = rooms.len().checked_sub(1) else {
        return SpecialPoints {
            start: Pos::ORIGIN,
            extraction: Pos::ORIGIN,
            objectives: vec![Pos::ORIGIN; objective_count],
        };
    };

    let objectives =
        (0..objective_count).map(|index| rooms[(index + 1).min(last_index)].center()).collect();

    SpecialPoints {
        start: rooms[0].center(),
        extraction: rooms[last_index].center(),
        objectives,
    }
}
