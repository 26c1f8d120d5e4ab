//! Public data models for generated level layouts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::Pos;

/// Axis-aligned room; covers `x..x + width` by `y..y + height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height
    }

    pub fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn inflated(self, margin: i32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2 * margin,
            height: self.height + 2 * margin,
        }
    }

    /// Open-interval overlap; rooms that merely share an edge do not overlap.
    pub fn overlaps(self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    pub fn tiles(self) -> impl Iterator<Item = Pos> {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| Pos { y, x }))
    }
}

/// Two room centers joined by a carved L-shaped path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub start: Pos,
    pub end: Pos,
}

/// The three mutually exclusive tile classifications.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSets {
    pub floor: BTreeSet<Pos>,
    pub wall: BTreeSet<Pos>,
    pub obstacle: BTreeSet<Pos>,
}

impl TileSets {
    pub fn is_impassable(&self, pos: Pos) -> bool {
        self.wall.contains(&pos) || self.obstacle.contains(&pos)
    }

    pub fn is_disjoint(&self) -> bool {
        self.floor.is_disjoint(&self.wall)
            && self.floor.is_disjoint(&self.obstacle)
            && self.wall.is_disjoint(&self.obstacle)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialPoints {
    pub start: Pos,
    pub extraction: Pos,
    pub objectives: Vec<Pos>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub width: i32,
    pub height: i32,
    pub rooms: Vec<Room>,
    pub corridors: Vec<Corridor>,
    pub tiles: TileSets,
    pub special_points: SpecialPoints,
}

impl LevelLayout {
    /// A layout without rooms has nowhere to start or extract from.
    pub fn is_viable(&self) -> bool {
        !self.rooms.is_empty()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.width.to_le_bytes());
        bytes.extend(self.height.to_le_bytes());

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend(room.x.to_le_bytes());
            bytes.extend(room.y.to_le_bytes());
            bytes.extend(room.width.to_le_bytes());
            bytes.extend(room.height.to_le_bytes());
        }

        bytes.extend((self.corridors.len() as u32).to_le_bytes());
        for corridor in &self.corridors {
            push_pos(&mut bytes, corridor.start);
            push_pos(&mut bytes, corridor.end);
        }

        for set in [&self.tiles.floor, &self.tiles.wall, &self.tiles.obstacle] {
            bytes.extend((set.len() as u32).to_le_bytes());
            for &pos in set {
                push_pos(&mut bytes, pos);
            }
        }

        push_pos(&mut bytes, self.special_points.start);
        push_pos(&mut bytes, self.special_points.extraction);
        bytes.extend((self.special_points.objectives.len() as u32).to_le_bytes());
        for &objective in &self.special_points.objectives {
            push_pos(&mut bytes, objective);
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: Pos) {
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.x.to_le_bytes());
}
