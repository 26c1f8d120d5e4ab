//! Structural checks over generated output, shared by the integration tests
//! and the seed-sweep fuzz binary.

use crate::config::{EncounterConfig, LevelConfig};
use crate::encounters::{
    BASE_VISION_RANGE, GuardEncounterSet, PatrolType, VISION_ANGLE_DEGREES,
    VISION_RANGE_PER_DIFFICULTY,
};
use crate::mapgen::{BORDER_MARGIN, LevelLayout};

const FLOAT_TOLERANCE: f32 = 1e-3;

pub fn check_layout(layout: &LevelLayout, config: &LevelConfig) -> Result<(), String> {
    let spacing = config.room_spacing.max(0);
    for (index, room) in layout.rooms.iter().enumerate() {
        if room.x < BORDER_MARGIN
            || room.y < BORDER_MARGIN
            || room.right() > layout.width - BORDER_MARGIN
            || room.bottom() > layout.height - BORDER_MARGIN
        {
            return Err(format!("room {room:?} crosses the level border"));
        }
        for other in &layout.rooms[index + 1..] {
            if room.inflated(spacing).overlaps(&other.inflated(spacing)) {
                return Err(format!("rooms {room:?} and {other:?} violate spacing {spacing}"));
            }
        }
    }

    let tiles = &layout.tiles;
    if !tiles.is_disjoint() {
        return Err("tile classification sets intersect".to_string());
    }
    for wall in &tiles.wall {
        if !wall.neighbors8().iter().any(|neighbor| tiles.floor.contains(neighbor)) {
            return Err(format!("wall {wall:?} has no floor neighbor"));
        }
    }
    for floor in &tiles.floor {
        for neighbor in floor.neighbors8() {
            if !tiles.floor.contains(&neighbor) && !tiles.is_impassable(neighbor) {
                return Err(format!("floor {floor:?} borders unclassified {neighbor:?}"));
            }
        }
    }

    let points = &layout.special_points;
    if points.objectives.len() != config.objective_count as usize {
        return Err(format!(
            "expected {} objectives, found {}",
            config.objective_count,
            points.objectives.len()
        ));
    }
    if let (Some(first), Some(last)) = (layout.rooms.first(), layout.rooms.last())
        && (points.start != first.center() || points.extraction != last.center())
    {
        return Err("start or extraction is not on its room center".to_string());
    }
    Ok(())
}

pub fn check_encounters(
    encounters: &GuardEncounterSet,
    config: &EncounterConfig,
) -> Result<(), String> {
    let bounds = config.bounds.normalized();
    if encounters.guards.len() > encounters.requested {
        return Err(format!(
            "{} guards exceed the {} requested",
            encounters.guards.len(),
            encounters.requested
        ));
    }

    let range_scale = 1.0 + config.difficulty as f32 * VISION_RANGE_PER_DIFFICULTY;
    for (index, guard) in encounters.guards.iter().enumerate() {
        let Some(&first) = guard.waypoints.first() else {
            return Err(format!("{} has no waypoints", guard.id));
        };
        if first != guard.spawn {
            return Err(format!("{} route does not start at its spawn", guard.id));
        }
        if let Some(outside) = guard.waypoints.iter().find(|&&point| !bounds.contains(point)) {
            return Err(format!("{} waypoint {outside:?} escapes {bounds:?}", guard.id));
        }
        if guard.is_patrolling != (guard.waypoints.len() >= 2)
            || guard.is_patrolling == (guard.patrol_type == PatrolType::Stationary)
        {
            return Err(format!("{} patrol flag disagrees with its route", guard.id));
        }
        if (guard.facing.length() - 1.0).abs() > FLOAT_TOLERANCE {
            return Err(format!("{} facing {:?} is not a unit vector", guard.id, guard.facing));
        }
        let range = guard.vision_range / range_scale;
        if range < BASE_VISION_RANGE.min - FLOAT_TOLERANCE
            || range > BASE_VISION_RANGE.max + FLOAT_TOLERANCE
            || !VISION_ANGLE_DEGREES.contains(guard.vision_angle)
        {
            return Err(format!("{} vision parameters out of range", guard.id));
        }
        for other in &encounters.guards[index + 1..] {
            let distance = guard.spawn.distance(other.spawn);
            if distance < config.min_spacing - FLOAT_TOLERANCE {
                return Err(format!(
                    "{} and {} spawn {distance} apart, under {}",
                    guard.id, other.id, config.min_spacing
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounters::generate_encounters;
    use crate::mapgen::generate_layout;
    use crate::types::Pos;

    #[test]
    fn generated_output_passes_checks() {
        let level = LevelConfig::default();
        let encounters = EncounterConfig::default();
        for seed in 0..16 {
            check_layout(&generate_layout(&level, seed), &level).unwrap();
            check_encounters(&generate_encounters(&encounters, seed), &encounters).unwrap();
        }
    }

    #[test]
    fn stray_wall_is_reported() {
        let level = LevelConfig::default();
        let mut layout = generate_layout(&level, 1);
        layout.tiles.wall.insert(Pos::new(-40, -40));
        assert!(check_layout(&layout, &level).unwrap_err().contains("no floor neighbor"));
    }

    #[test]
    fn crowded_spawns_are_reported() {
        let config = EncounterConfig::default();
        let mut encounters = generate_encounters(&config, 2);
        assert!(encounters.guards.len() >= 2);
        encounters.guards[1].spawn = encounters.guards[0].spawn;
        encounters.guards[1].waypoints[0] = encounters.guards[0].spawn;
        assert!(check_encounters(&encounters, &config).is_err());
    }
}
