//! Scene assembly
//!
//! The whole frame is rebuilt from the game state every tick, back to front.

use glam::Vec2;

use super::shapes::{ROUND_SEGMENTS, circle, ellipse, gradient_rect, rect};
use super::vertex::{Vertex, colors};
use crate::consts::LANE_BAND_HALF_HEIGHT;
use crate::sim::{GamePhase, GameState, Obstacle, ObstacleKind, Player};

/// Player hull half extents
const PLAYER_HULL: Vec2 = Vec2::new(28.0, 16.0);

/// Build the triangle list for the current frame
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let size = Vec2::new(state.viewport.width, state.viewport.height);
    let mut vertices = Vec::new();

    vertices.extend(gradient_rect(
        Vec2::ZERO,
        size,
        colors::SKY_TOP,
        colors::SKY_BOTTOM,
    ));

    for &y in &state.lanes {
        vertices.extend(rect(
            Vec2::new(0.0, y - LANE_BAND_HALF_HEIGHT),
            Vec2::new(size.x, y + LANE_BAND_HALF_HEIGHT),
            colors::LANE_BAND,
        ));
    }

    vertices.extend(player_shape(&state.player));

    for projectile in &state.projectiles {
        vertices.extend(circle(
            projectile.pos,
            projectile.radius,
            colors::PROJECTILE,
            ROUND_SEGMENTS,
        ));
    }

    for obstacle in &state.obstacles {
        vertices.extend(obstacle_shape(obstacle));
    }

    if matches!(state.phase, GamePhase::Ended(_)) {
        vertices.extend(rect(Vec2::ZERO, size, colors::END_OVERLAY));
    }

    vertices
}

fn player_shape(player: &Player) -> Vec<Vertex> {
    let mut vertices = ellipse(player.pos, PLAYER_HULL, colors::PLAYER, ROUND_SEGMENTS);
    // Tail fin above the hull
    vertices.extend(rect(
        player.pos + Vec2::new(-6.0, -20.0),
        player.pos + Vec2::new(6.0, -14.0),
        colors::PLAYER_FIN,
    ));
    vertices
}

fn obstacle_shape(obstacle: &Obstacle) -> Vec<Vertex> {
    let r = obstacle.radius;
    match obstacle.kind {
        ObstacleKind::Mine => circle(obstacle.pos, r, colors::MINE, ROUND_SEGMENTS),
        ObstacleKind::Bird => ellipse(
            obstacle.pos,
            Vec2::new(r + 6.0, r - 2.0),
            colors::BIRD,
            ROUND_SEGMENTS,
        ),
        ObstacleKind::Fighter => ellipse(
            obstacle.pos,
            Vec2::new(r + 8.0, r + 6.0),
            colors::FIGHTER,
            ROUND_SEGMENTS,
        ),
    }
}
