//! Boundary wall inference from 8-neighbor adjacency to the floor.

use std::collections::BTreeSet;

use crate::types::Pos;

/// Every tile touching the floor (diagonals included) that is neither floor
/// nor obstacle becomes a wall.
pub fn derive_walls(floor: &BTreeSet<Pos>, obstacles: &BTreeSet<Pos>) -> BTreeSet<Pos> {
    floor
        .iter()
        .flat_map(|pos| pos.neighbors8())
        .filter(|neighbor| !floor.contains(neighbor) && !obstacles.contains(neighbor))
        .collect()
}
