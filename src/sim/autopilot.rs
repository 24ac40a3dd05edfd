//! Idle/demo mode - the game plays itself
//!
//! Shoots whatever is coming down the current lane and sidesteps when
//! something gets close while the gun is still reloading.

use super::input::Command;
use super::state::GameState;

/// Obstacles closer than this (in x, ahead of the player) force a dodge
const DANGER_DISTANCE: f32 = 220.0;

/// Free space ahead of the player in a lane
///
/// Distance along x to the nearest unhit obstacle that has not yet passed the
/// player, or infinity when the lane is clear.
pub fn lane_clearance(state: &GameState, lane: usize) -> f32 {
    let player_x = state.player.pos.x;
    state
        .obstacles
        .iter()
        .filter(|o| !o.hit && o.lane == lane && o.pos.x + o.radius > player_x - state.player.radius)
        .map(|o| (o.pos.x - player_x).max(0.0))
        .fold(f32::INFINITY, f32::min)
}

/// Pick this frame's command, if any
pub fn choose_command(state: &GameState) -> Option<Command> {
    if !state.is_running() {
        return None;
    }

    let lane = state.player.lane;
    let here = lane_clearance(state, lane);
    let reloaded = state.player.reload <= 0.0;

    if here < DANGER_DISTANCE && !reloaded {
        let up = lane.checked_sub(1).map(|l| (Command::MoveUp, lane_clearance(state, l)));
        let down = (lane + 1 < state.lane_count)
            .then(|| (Command::MoveDown, lane_clearance(state, lane + 1)));

        let best = [up, down]
            .into_iter()
            .flatten()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        if let Some((command, clearance)) = best {
            if clearance > here {
                return Some(command);
            }
        }
    }

    if here.is_finite() && reloaded {
        return Some(Command::Shoot);
    }

    None
}
