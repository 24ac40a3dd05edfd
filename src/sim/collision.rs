//! Collision detection and response
//!
//! Everything is a circle, so detection is a center distance check. Two passes
//! run each frame: projectiles against obstacles, then obstacles against the
//! player.

use glam::Vec2;

use super::state::{GameEvent, GameState, Outcome};
use crate::consts::PLAYER_HITBOX_SLACK;

/// Whether two circles overlap (touching edges do not count)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Projectiles against obstacles
///
/// Every projectile is checked against every unhit obstacle in list order. A
/// projectile keeps going after a hit, so one shot takes out everything it
/// overlaps; the hit flag keeps an obstacle from scoring twice.
pub fn resolve_projectile_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for projectile in &mut state.projectiles {
        for obstacle in state.obstacles.iter_mut().filter(|o| !o.hit) {
            if !circles_overlap(projectile.pos, projectile.radius, obstacle.pos, obstacle.radius) {
                continue;
            }

            obstacle.hit = true;
            projectile.dead = true;
            let points = obstacle.kind.points();
            state.score += points as f32;
            events.push(GameEvent::ObstacleDestroyed {
                kind: obstacle.kind,
                points,
            });
        }
    }
}

/// Obstacles against the player
///
/// The player's hitbox is slightly smaller than its drawn radius. Stops as soon
/// as the last life is lost.
pub fn resolve_player_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius - PLAYER_HITBOX_SLACK;

    for obstacle in state.obstacles.iter_mut().filter(|o| !o.hit) {
        if !circles_overlap(player_pos, player_radius, obstacle.pos, obstacle.radius) {
            continue;
        }

        obstacle.hit = true;
        state.lives = state.lives.saturating_sub(1);
        events.push(GameEvent::PlayerHit { lives: state.lives });
        log::debug!("Player hit by {:?}, {} lives left", obstacle.kind, state.lives);

        if state.lives == 0 {
            break;
        }
    }

    if state.lives == 0 && state.end(Outcome::Lost) {
        events.push(GameEvent::RoundEnded(Outcome::Lost));
    }
}

/// Run both collision passes
pub fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    resolve_projectile_hits(state, events);
    resolve_player_hits(state, events);
}
