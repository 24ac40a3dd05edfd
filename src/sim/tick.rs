//! Per-frame simulation step
//!
//! Advances timers, spawns, moves entities, resolves collisions and prunes
//! whatever died. Frames are variable length; entity speeds are normalized
//! against a 16 ms reference frame.

use super::collision::resolve_collisions;
use super::spawner::{spawn_due, spawn_random};
use super::state::{GameEvent, GameState, Outcome};
use crate::consts::SCORE_PER_MS;

/// Advance a running round by `dt` milliseconds
///
/// Does nothing outside `Running`. When the countdown reaches zero the round
/// is won and the rest of the step is skipped, so a win and a loss can never
/// both be reported.
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_running() {
        return events;
    }
    let dt = dt.max(0.0);

    // Timers
    state.elapsed_ms += dt as f64;
    state.timer = ((state.round_ms - state.elapsed_ms).max(0.0) / 1000.0) as f32;
    let spawn = spawn_due(state, dt);

    if state.timer <= 0.0 {
        if state.end(Outcome::Won) {
            events.push(GameEvent::RoundEnded(Outcome::Won));
        }
        return events;
    }

    if spawn {
        events.push(spawn_random(state));
    }

    // Movement
    state.player.update(dt, &state.lanes);
    let width = state.viewport.width;
    for projectile in &mut state.projectiles {
        projectile.update(dt, width);
    }
    for obstacle in &mut state.obstacles {
        obstacle.update(dt);
    }

    resolve_collisions(state, &mut events);

    // Prune
    state.projectiles.retain(|p| !p.dead);
    state.obstacles.retain(|o| o.is_live());

    if state.is_running() {
        state.score += dt * SCORE_PER_MS;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sim::lanes::Viewport;
    use crate::sim::state::{GamePhase, Obstacle, ObstacleKind};
    use glam::Vec2;

    fn running_state(seed: u64) -> GameState {
        let mut state = GameState::new(&Settings::default(), Viewport::new(1280.0, 720.0), seed);
        state.start(seed);
        state
    }

    #[test]
    fn test_idle_does_not_tick() {
        let mut state = GameState::new(&Settings::default(), Viewport::default(), 1);
        let events = tick(&mut state, 16.0);
        assert!(events.is_empty());
        assert_eq!(state.elapsed_ms, 0.0);
        assert_eq!(state.score, 0.0);
    }

    #[test]
    fn test_survive_full_round() {
        let mut state = running_state(7);
        state.spawn_interval = f32::INFINITY;

        let mut ended = Vec::new();
        for _ in 0..5000 {
            ended.extend(tick(&mut state, 16.0));
        }

        assert_eq!(state.elapsed_ms, 80_000.0);
        assert_eq!(state.timer, 0.0);
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Won));
        assert_eq!(state.lives, 3);
        assert_eq!(ended, vec![GameEvent::RoundEnded(Outcome::Won)]);

        // Ended is terminal
        let score = state.score;
        assert!(tick(&mut state, 16.0).is_empty());
        assert_eq!(state.score, score);
    }

    #[test]
    fn test_one_frame_short_of_the_end() {
        let mut state = running_state(7);
        state.spawn_interval = f32::INFINITY;
        for _ in 0..4999 {
            tick(&mut state, 16.0);
        }
        assert!(state.is_running());
        assert!(state.timer > 0.0);
    }

    #[test]
    fn test_shot_mine_removed_next_frame() {
        let mut state = running_state(3);
        state.spawn_interval = f32::INFINITY;
        state.move_player(-1);
        state.player.pos.y = state.lanes[0];
        assert!(state.player_shoot());

        let shot_pos = state.projectiles[0].pos;
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Mine, 0, shot_pos, 3.0));

        let before = state.score;
        let events = tick(&mut state, 16.0);

        assert!(state.projectiles.is_empty());
        assert!(state.obstacles.is_empty());
        let passive = 16.0 * SCORE_PER_MS;
        assert!((state.score - before - passive - 15.0).abs() < 1e-3);
        assert_eq!(state.lives, 3);
        assert!(events.contains(&GameEvent::ObstacleDestroyed {
            kind: ObstacleKind::Mine,
            points: 15
        }));
    }

    #[test]
    fn test_obstacles_scroll_off_and_are_pruned() {
        let mut state = running_state(3);
        state.spawn_interval = f32::INFINITY;
        // Lane 0 while the player sits in lane 1
        let y = state.lanes[0];
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Bird, 0, Vec2::new(-90.0, y), 10.0));
        tick(&mut state, 16.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_loss_stops_the_round() {
        let mut state = running_state(3);
        state.spawn_interval = f32::INFINITY;
        state.lives = 1;
        let player = state.player.pos;
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Mine, 1, player, 0.0));

        let events = tick(&mut state, 16.0);
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Lost));
        assert_eq!(events.last(), Some(&GameEvent::RoundEnded(Outcome::Lost)));
        assert!(!events.contains(&GameEvent::RoundEnded(Outcome::Won)));
    }

    #[test]
    fn test_win_beats_loss_on_the_last_frame() {
        let mut state = running_state(3);
        state.spawn_interval = f32::INFINITY;
        state.elapsed_ms = 79_990.0;
        state.lives = 1;
        let player = state.player.pos;
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Mine, 1, player, 0.0));

        let events = tick(&mut state, 16.0);
        assert_eq!(state.phase, GamePhase::Ended(Outcome::Won));
        assert_eq!(state.lives, 1);
        assert_eq!(events, vec![GameEvent::RoundEnded(Outcome::Won)]);
    }

    #[test]
    fn test_score_never_decreases_while_running() {
        let mut state = running_state(11);
        let mut last = state.score;
        for i in 0..3000 {
            if i % 7 == 0 {
                state.player_shoot();
            }
            if i % 50 == 0 {
                state.move_player(if i % 100 == 0 { 1 } else { -1 });
            }
            tick(&mut state, 16.0);
            assert!(state.score >= last);
            last = state.score;
            if !state.is_running() {
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = running_state(99999);
        let mut b = running_state(99999);
        for i in 0..2000 {
            if i % 9 == 0 {
                a.player_shoot();
                b.player_shoot();
            }
            let ea = tick(&mut a, 16.0 + (i % 3) as f32);
            let eb = tick(&mut b, 16.0 + (i % 3) as f32);
            assert_eq!(ea, eb);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
    }
}
