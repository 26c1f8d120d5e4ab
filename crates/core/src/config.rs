//! Generation parameters for levels and guard encounters, loadable from TOML.
//!
//! Every field has a default so that partial files work. Range checks live in
//! [`GenerationConfig::validate`], which callers run before generating; the
//! generators themselves only normalize values (reorder spans, clamp
//! probabilities) and never reject a configuration.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encounters::MAX_PATROL_LEG;
use crate::seed::RANDOM_SEED_SENTINEL;
use crate::types::{Bounds, Span, Vec2};

/// Largest accepted level width or height, in tiles.
pub const MAX_LEVEL_EXTENT: i32 = 4096;
pub const MAX_ROOMS: u32 = 256;
pub const MAX_CORRIDOR_WIDTH: i32 = 15;
pub const MAX_OBSTACLE_CLUSTER: i32 = 16;
pub const MAX_OBJECTIVES: u32 = 64;
/// Upper bound on spawns requested after difficulty scaling.
pub const MAX_GUARDS: usize = 1024;
pub const MAX_WAYPOINTS: u32 = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub seed: i64,
    pub level: LevelConfig,
    pub encounters: EncounterConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: RANDOM_SEED_SENTINEL,
            level: LevelConfig::default(),
            encounters: EncounterConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub width: i32,
    pub height: i32,
    pub room_count: Span<u32>,
    pub room_width: Span<i32>,
    pub room_height: Span<i32>,
    /// Margin by which both rectangles are inflated in the room overlap test.
    pub room_spacing: i32,
    pub corridor_width: i32,
    /// Chance per floor tile of anchoring an obstacle cluster.
    pub obstacle_chance: f32,
    /// Side length of the square obstacle clusters.
    pub obstacle_cluster: Span<i32>,
    pub objective_count: u32,
    /// Exclude corridor tiles from obstacle carving.
    pub harden_corridors: bool,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 50,
            room_count: Span::new(4, 8),
            room_width: Span::new(6, 15),
            room_height: Span::new(6, 15),
            room_spacing: 2,
            corridor_width: 1,
            obstacle_chance: 0.02,
            obstacle_cluster: Span::new(1, 2),
            objective_count: 3,
            harden_corridors: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    pub bounds: Bounds,
    pub guard_count: u32,
    pub min_spacing: f32,
    /// Probability that a spawned guard patrols instead of standing still.
    pub patrol_percentage: f32,
    pub waypoint_count: Span<u32>,
    pub max_patrol_distance: f32,
    pub difficulty: u32,
    /// Multiply `guard_count` by the difficulty when requesting spawns.
    pub scale_count_with_difficulty: bool,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0)),
            guard_count: 8,
            min_spacing: 5.0,
            patrol_percentage: 0.7,
            waypoint_count: Span::new(2, 4),
            max_patrol_distance: 8.0,
            difficulty: 1,
            scale_count_with_difficulty: false,
        }
    }
}

impl EncounterConfig {
    pub fn requested_guard_count(&self) -> usize {
        if self.scale_count_with_difficulty {
            (self.guard_count as usize).saturating_mul(self.difficulty.max(1) as usize)
        } else {
            self.guard_count as usize
        }
    }
}

impl GenerationConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level.validate()?;
        self.encounters.validate()
    }
}

impl LevelConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 4 || self.height <= 4 {
            return Err(invalid("level.width/height", "level must exceed its 2-tile border"));
        }
        if self.width > MAX_LEVEL_EXTENT || self.height > MAX_LEVEL_EXTENT {
            return Err(invalid(
                "level.width/height",
                format!("level may not exceed {MAX_LEVEL_EXTENT} tiles per side"),
            ));
        }
        check_span("level.room_count", self.room_count)?;
        check_span("level.room_width", self.room_width)?;
        check_span("level.room_height", self.room_height)?;
        check_span("level.obstacle_cluster", self.obstacle_cluster)?;
        if self.room_count.max > MAX_ROOMS {
            return Err(invalid("level.room_count", format!("at most {MAX_ROOMS} rooms")));
        }
        if self.room_width.min < 1 || self.room_height.min < 1 {
            return Err(invalid("level.room_width/room_height", "room sizes must be positive"));
        }
        if self.room_width.max > self.width || self.room_height.max > self.height {
            return Err(invalid("level.room_width/room_height", "rooms must fit the level"));
        }
        if self.obstacle_cluster.min < 1 || self.obstacle_cluster.max > MAX_OBSTACLE_CLUSTER {
            return Err(invalid(
                "level.obstacle_cluster",
                format!("cluster size must be within 1..={MAX_OBSTACLE_CLUSTER}"),
            ));
        }
        if !(0..=MAX_LEVEL_EXTENT).contains(&self.room_spacing) {
            return Err(invalid(
                "level.room_spacing",
                format!("spacing must be within 0..={MAX_LEVEL_EXTENT}"),
            ));
        }
        if !(1..=MAX_CORRIDOR_WIDTH).contains(&self.corridor_width) {
            return Err(invalid(
                "level.corridor_width",
                format!("corridor width must be within 1..={MAX_CORRIDOR_WIDTH}"),
            ));
        }
        if self.objective_count > MAX_OBJECTIVES {
            return Err(invalid(
                "level.objective_count",
                format!("at most {MAX_OBJECTIVES} objectives"),
            ));
        }
        check_probability("level.obstacle_chance", self.obstacle_chance)
    }
}

impl EncounterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.is_empty() {
            return Err(invalid("encounters.bounds", "min must not exceed max"));
        }
        let extent = self.bounds.max - self.bounds.min;
        if !extent.x.is_finite() || !extent.y.is_finite() {
            return Err(invalid("encounters.bounds", "bounds must span a finite area"));
        }
        let requested = self.requested_guard_count();
        if requested > MAX_GUARDS {
            return Err(invalid(
                "encounters.guard_count",
                format!("{requested} guards requested, at most {MAX_GUARDS} allowed"),
            ));
        }
        check_span("encounters.waypoint_count", self.waypoint_count)?;
        if self.waypoint_count.min < 1 {
            return Err(invalid("encounters.waypoint_count", "routes need at least one waypoint"));
        }
        if self.waypoint_count.max > MAX_WAYPOINTS {
            return Err(invalid(
                "encounters.waypoint_count",
                format!("at most {MAX_WAYPOINTS} waypoints"),
            ));
        }
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(invalid("encounters.min_spacing", "spacing must be finite and >= 0"));
        }
        let distance = self.max_patrol_distance;
        if distance.is_nan() || distance <= 0.0 || distance > MAX_PATROL_LEG {
            return Err(invalid(
                "encounters.max_patrol_distance",
                format!("distance must be within (0, {MAX_PATROL_LEG}]"),
            ));
        }
        check_probability("encounters.patrol_percentage", self.patrol_percentage)
    }
}

fn check_span<T: PartialOrd + Copy + Debug>(
    field: &'static str,
    span: Span<T>,
) -> Result<(), ConfigError> {
    if span.is_ordered() {
        Ok(())
    } else {
        Err(invalid(field, format!("min {:?} exceeds max {:?}", span.min, span.max)))
    }
}

fn check_probability(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not a probability in [0, 1]")))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}
