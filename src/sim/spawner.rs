//! Obstacle spawning
//!
//! One obstacle per spawn interval, with speed ramping up as the round goes on.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, GameState, Obstacle, ObstacleKind};
use crate::consts::*;

/// Map a uniform roll in [0, 1) to an obstacle variant
pub fn kind_for_roll(roll: f32) -> ObstacleKind {
    if roll > 0.85 {
        ObstacleKind::Fighter
    } else if roll > 0.6 {
        ObstacleKind::Bird
    } else {
        ObstacleKind::Mine
    }
}

/// Speed for a uniform roll in [0, 1) at a point in the round
///
/// The elapsed-time term is unbounded: late obstacles keep getting faster.
pub fn obstacle_speed(roll: f32, elapsed_ms: f64) -> f32 {
    OBSTACLE_BASE_SPEED + roll * OBSTACLE_SPEED_SPREAD + elapsed_ms as f32 / DIFFICULTY_RAMP_MS
}

/// Accumulate `dt` and report whether a spawn is due
///
/// The overshoot past the interval is carried into the next cycle so the
/// cadence does not drift with frame timing. At most one spawn per frame.
pub fn spawn_due(state: &mut GameState, dt: f32) -> bool {
    state.spawn_timer += dt;
    if state.spawn_timer > state.spawn_interval {
        state.spawn_timer = (state.spawn_timer - state.spawn_interval).min(state.spawn_interval);
        true
    } else {
        false
    }
}

/// Add one random obstacle just past the right edge
pub fn spawn_random(state: &mut GameState) -> GameEvent {
    let kind = kind_for_roll(state.rng.random::<f32>());
    let lane = state.rng.random_range(0..state.lane_count.max(1));
    let speed = obstacle_speed(state.rng.random::<f32>(), state.elapsed_ms);
    let y = state
        .lanes
        .get(lane)
        .copied()
        .unwrap_or(state.viewport.height / 2.0);
    let x = state.viewport.width + OBSTACLE_ENTRY_MARGIN;

    state
        .obstacles
        .push(Obstacle::new(kind, lane, Vec2::new(x, y), speed));
    log::debug!("Spawned {:?} in lane {} at speed {:.2}", kind, lane, speed);

    GameEvent::ObstacleSpawned { kind, lane }
}
