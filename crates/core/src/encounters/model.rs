//! Public data models for guard encounters.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::Vec2;

/// How a guard walks its route. Interpreted by the runtime guard behavior,
/// never by route generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatrolType {
    Stationary,
    Loop,
    PingPong,
    Random,
}

impl PatrolType {
    pub const PATROLLING: [PatrolType; 3] =
        [PatrolType::Loop, PatrolType::PingPong, PatrolType::Random];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuardPatrolRecord {
    pub id: String,
    pub spawn: Vec2,
    pub is_patrolling: bool,
    /// Starts at the spawn point; a single waypoint means the guard stands still.
    pub waypoints: Vec<Vec2>,
    pub patrol_type: PatrolType,
    pub facing: Vec2,
    pub vision_range: f32,
    /// Full cone angle in degrees.
    pub vision_angle: f32,
}

impl GuardPatrolRecord {
    pub fn is_stationary(&self) -> bool {
        self.waypoints.len() == 1
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuardEncounterSet {
    pub guards: Vec<GuardPatrolRecord>,
    /// Guards asked for; `guards` may be shorter when spawn sampling ran out of attempts.
    pub requested: usize,
}

impl GuardEncounterSet {
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.guards.len())
    }

    pub fn patrolling_count(&self) -> usize {
        self.guards.iter().filter(|guard| guard.is_patrolling).count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.requested as u32).to_le_bytes());
        bytes.extend((self.guards.len() as u32).to_le_bytes());
        for guard in &self.guards {
            bytes.extend((guard.id.len() as u32).to_le_bytes());
            bytes.extend(guard.id.as_bytes());
            push_vec2(&mut bytes, guard.spawn);
            bytes.push(u8::from(guard.is_patrolling));
            bytes.extend((guard.waypoints.len() as u32).to_le_bytes());
            for &waypoint in &guard.waypoints {
                push_vec2(&mut bytes, waypoint);
            }
            bytes.push(match guard.patrol_type {
                PatrolType::Stationary => 0,
                PatrolType::Loop => 1,
                PatrolType::PingPong => 2,
                PatrolType::Random => 3,
            });
            push_vec2(&mut bytes, guard.facing);
            bytes.extend(guard.vision_range.to_bits().to_le_bytes());
            bytes.extend(guard.vision_angle.to_bits().to_le_bytes());
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

fn push_vec2(bytes: &mut Vec<u8>, point: Vec2) {
    bytes.extend(point.x.to_bits().to_le_bytes());
    bytes.extend(point.y.to_bits().to_le_bytes());
}
