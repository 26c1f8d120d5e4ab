//! Patrol route and vision parameter synthesis for accepted spawns.

use std::f32::consts::TAU;

use rand::Rng;

use crate::seed::GenRng;
use crate::types::{Bounds, Span, Vec2};

use super::model::{GuardPatrolRecord, PatrolType};

/// Shortest leg between consecutive waypoints before clamping.
pub const MIN_PATROL_LEG: f32 = 3.0;
pub const MAX_PATROL_LEG: f32 = 1.0e6;
pub const BASE_VISION_RANGE: Span<f32> = Span { min: 6.0, max: 10.0 };
pub const VISION_ANGLE_DEGREES: Span<f32> = Span { min: 75.0, max: 120.0 };
/// Vision range bonus per difficulty step.
pub const VISION_RANGE_PER_DIFFICULTY: f32 = 0.2;

pub struct RouteContext {
    pub bounds: Bounds,
    pub patrol_percentage: f32,
    pub waypoint_count: Span<u32>,
    pub max_patrol_distance: f32,
    pub difficulty: u32,
}

/// Builds one guard record. Draw order per guard: patrol roll, route and
/// facing, patrol type (patrolling guards only), vision range, vision angle.
pub fn synthesize_guard(
    rng: &mut GenRng,
    index: usize,
    spawn: Vec2,
    context: &RouteContext,
) -> GuardPatrolRecord {
    let patrol_chance = if context.patrol_percentage.is_nan() {
        0.0
    } else {
        context.patrol_percentage.clamp(0.0, 1.0)
    };
    let is_patrolling = rng.gen_bool(f64::from(patrol_chance));

    let (waypoints, facing, patrol_type) = if is_patrolling {
        let waypoints = build_patrol_route(rng, spawn, context);
        let facing = match (waypoints[1] - spawn).normalized() {
            Some(direction) => direction,
            None => random_direction(rng),
        };
        let patrol_type = PatrolType::PATROLLING[rng.gen_range(0..PatrolType::PATROLLING.len())];
        (waypoints, facing, patrol_type)
    } else {
        (vec![spawn], random_direction(rng), PatrolType::Stationary)
    };

    let difficulty_scale = 1.0 + context.difficulty as f32 * VISION_RANGE_PER_DIFFICULTY;
    let vision_range =
        rng.gen_range(BASE_VISION_RANGE.min..=BASE_VISION_RANGE.max) * difficulty_scale;
    let vision_angle = rng.gen_range(VISION_ANGLE_DEGREES.min..=VISION_ANGLE_DEGREES.max);

    GuardPatrolRecord {
        id: format!("guard_{index:02}"),
        spawn,
        is_patrolling,
        waypoints,
        patrol_type,
        facing,
        vision_range,
        vision_angle,
    }
}

/// Random walk from the spawn: each leg picks a direction and a length, and
/// the next waypoint is clamped into the bounds before the walk continues
/// from it.
fn build_patrol_route(rng: &mut GenRng, spawn: Vec2, context: &RouteContext) -> Vec<Vec2> {
    let counts = context.waypoint_count.ordered();
    let waypoint_count = rng.gen_range(counts.min.max(2)..=counts.max.max(2)) as usize;
    let max_leg = if context.max_patrol_distance.is_finite() {
        context.max_patrol_distance.clamp(MIN_PATROL_LEG, MAX_PATROL_LEG)
    } else {
        MIN_PATROL_LEG
    };

    let mut waypoints = Vec::with_capacity(waypoint_count);
    waypoints.push(spawn);
    let mut current = spawn;
    for _ in 1..waypoint_count {
        let direction = random_direction(rng);
        let magnitude = rng.gen_range(MIN_PATROL_LEG..=max_leg);
        let next = context.bounds.clamp(current + direction.scaled(magnitude));
        waypoints.push(next);
        current = next;
    }
    waypoints
}

fn random_direction(rng: &mut GenRng) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}
