//! Game state and core simulation types
//!
//! Everything a round needs lives in `GameState`; nothing here touches the
//! DOM or the GPU.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::lanes::{Viewport, compute_lanes};
use crate::config::Settings;
use crate::consts::*;

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Countdown reached zero with lives left
    Won,
    /// Lives ran out
    Lost,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first start
    Idle,
    /// Active gameplay
    Running,
    /// Round over; only a restart leaves this phase
    Ended(Outcome),
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ObstacleSpawned { kind: ObstacleKind, lane: usize },
    ObstacleDestroyed { kind: ObstacleKind, points: u32 },
    PlayerHit { lives: u32 },
    RoundEnded(Outcome),
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    /// Target lane index
    pub lane: usize,
    pub pos: Vec2,
    pub radius: f32,
    /// Cooldown remaining before the next shot (ms)
    pub reload: f32,
    /// Cooldown applied after each shot (ms)
    pub reload_time: f32,
}

impl Player {
    pub fn new(lane: usize, pos: Vec2, reload_time: f32) -> Self {
        Self {
            lane,
            pos,
            radius: PLAYER_RADIUS,
            reload: 0.0,
            reload_time,
        }
    }

    /// Retarget to a lane, clamped into range
    pub fn move_to(&mut self, lane: isize, lane_count: usize) {
        let last = lane_count.saturating_sub(1) as isize;
        self.lane = lane.clamp(0, last) as usize;
    }

    /// Decay the reload cooldown and ease toward the target lane
    pub fn update(&mut self, dt: f32, lanes: &[f32]) {
        if self.reload > 0.0 {
            self.reload = (self.reload - dt).max(0.0);
        }
        if let Some(&target_y) = lanes.get(self.lane) {
            self.pos.y += (target_y - self.pos.y) * PLAYER_EASING;
        }
    }

    /// Fire if reloaded
    pub fn shoot(&mut self) -> Option<Projectile> {
        if self.reload > 0.0 {
            return None;
        }
        self.reload = self.reload_time;
        Some(Projectile::new(Vec2::new(
            self.pos.x + MUZZLE_OFFSET,
            self.pos.y,
        )))
    }
}

/// Obstacle variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Mine,
    Bird,
    Fighter,
}

impl ObstacleKind {
    pub fn radius(self) -> f32 {
        match self {
            ObstacleKind::Mine => 20.0,
            ObstacleKind::Bird => 14.0,
            ObstacleKind::Fighter => 18.0,
        }
    }

    /// Points for shooting one down
    pub fn points(self) -> u32 {
        match self {
            ObstacleKind::Fighter => 50,
            ObstacleKind::Mine | ObstacleKind::Bird => 15,
        }
    }
}

/// An obstacle scrolling leftward along a lane
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub lane: usize,
    pub pos: Vec2,
    /// Units per reference frame
    pub speed: f32,
    pub radius: f32,
    pub hit: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, lane: usize, pos: Vec2, speed: f32) -> Self {
        Self {
            kind,
            lane,
            pos,
            speed,
            radius: kind.radius(),
            hit: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.pos.x -= self.speed * (dt / REFERENCE_FRAME_MS);
    }

    /// Still worth keeping after this frame
    pub fn is_live(&self) -> bool {
        !self.hit && self.pos.x > OBSTACLE_EXIT_X
    }
}

/// A shot travelling rightward
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    /// Units per reference frame
    pub speed: f32,
    pub radius: f32,
    pub dead: bool,
}

impl Projectile {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            speed: PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            dead: false,
        }
    }

    pub fn update(&mut self, dt: f32, viewport_width: f32) {
        self.pos.x += self.speed * (dt / REFERENCE_FRAME_MS);
        if self.pos.x > viewport_width + PROJECTILE_EXIT_MARGIN {
            self.dead = true;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current round
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    /// Play time this round (ms)
    pub elapsed_ms: f64,
    /// Round length (ms)
    pub round_ms: f64,
    /// Countdown remaining (seconds)
    pub timer: f32,
    pub score: f32,
    pub lives: u32,
    pub starting_lives: u32,
    pub lane_count: usize,
    /// Lane center Y coordinates, top to bottom
    pub lanes: Vec<f32>,
    pub viewport: Viewport,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Active projectiles in firing order
    pub projectiles: Vec<Projectile>,
    /// Time since the last spawn (ms)
    pub spawn_timer: f32,
    pub spawn_interval: f32,
    /// Rounds started this session (drives the briefing rotation)
    pub rounds_started: u32,
}

impl GameState {
    /// Create an idle session
    pub fn new(settings: &Settings, viewport: Viewport, seed: u64) -> Self {
        let lanes = compute_lanes(viewport.height, settings.lane_count);
        let player = Self::spawn_player(settings.lane_count, &lanes, viewport, settings.reload_ms);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            elapsed_ms: 0.0,
            round_ms: settings.round_ms(),
            timer: settings.round_seconds,
            score: 0.0,
            lives: settings.starting_lives,
            starting_lives: settings.starting_lives,
            lane_count: settings.lane_count,
            lanes,
            viewport,
            player,
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval: settings.spawn_interval_ms,
            rounds_started: 0,
        }
    }

    /// Player centered on the middle lane at the left of the viewport
    fn spawn_player(lane_count: usize, lanes: &[f32], viewport: Viewport, reload_ms: f32) -> Player {
        let lane = lane_count / 2;
        let y = lanes.get(lane).copied().unwrap_or(viewport.height / 2.0);
        Player::new(lane, Vec2::new(viewport.width * PLAYER_X_FRACTION, y), reload_ms)
    }

    /// Begin a fresh round, discarding everything from the previous one
    pub fn start(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.phase = GamePhase::Running;
        self.elapsed_ms = 0.0;
        self.timer = (self.round_ms / 1000.0) as f32;
        self.score = 0.0;
        self.lives = self.starting_lives;
        self.obstacles.clear();
        self.projectiles.clear();
        self.spawn_timer = 0.0;
        self.lanes = compute_lanes(self.viewport.height, self.lane_count);
        self.player = Self::spawn_player(
            self.lane_count,
            &self.lanes,
            self.viewport,
            self.player.reload_time,
        );
        self.rounds_started += 1;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Outcome of the round, once it has ended
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Move to `Ended` unless already there
    pub(crate) fn end(&mut self, outcome: Outcome) -> bool {
        if matches!(self.phase, GamePhase::Ended(_)) {
            return false;
        }
        self.phase = GamePhase::Ended(outcome);
        true
    }

    /// Adapt geometry to a new viewport size
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.lanes = compute_lanes(viewport.height, self.lane_count);
        self.player.pos.x = viewport.width * PLAYER_X_FRACTION;
        if !self.is_running() {
            if let Some(&y) = self.lanes.get(self.player.lane) {
                self.player.pos.y = y;
            }
        }
        for obstacle in &mut self.obstacles {
            if let Some(&y) = self.lanes.get(obstacle.lane) {
                obstacle.pos.y = y;
            }
        }
    }

    /// Shift the player's target lane by `delta`
    pub fn move_player(&mut self, delta: isize) {
        let target = self.player.lane as isize + delta;
        self.player.move_to(target, self.lane_count);
    }

    /// Fire a projectile if the player is reloaded
    pub fn player_shoot(&mut self) -> bool {
        match self.player.shoot() {
            Some(projectile) => {
                self.projectiles.push(projectile);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(&Settings::default(), Viewport::new(1000.0, 1000.0), 1);
        state.start(1);
        state
    }

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(&Settings::default(), Viewport::new(1000.0, 1000.0), 1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.lanes.len(), state.lane_count);
        assert_eq!(state.player.lane, 1);
        assert_eq!(state.player.pos, Vec2::new(150.0, 500.0));
    }

    #[test]
    fn test_start_resets_round() {
        let mut state = running_state();
        state.score = 120.0;
        state.lives = 1;
        state.player.lane = 0;
        state.obstacles.push(Obstacle::new(ObstacleKind::Bird, 0, Vec2::ZERO, 4.0));
        state.projectiles.push(Projectile::new(Vec2::ZERO));
        state.phase = GamePhase::Ended(Outcome::Lost);

        state.start(2);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.timer, 80.0);
        assert_eq!(state.player.lane, 1);
        assert!(state.obstacles.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.rounds_started, 2);
    }

    #[test]
    fn test_player_clamps_at_edges() {
        let mut state = running_state();
        state.move_player(-1);
        state.move_player(-1);
        state.move_player(-1);
        assert_eq!(state.player.lane, 0);
        state.move_player(5);
        assert_eq!(state.player.lane, 2);
    }

    #[test]
    fn test_player_eases_toward_lane() {
        let mut player = Player::new(0, Vec2::new(0.0, 100.0), 350.0);
        player.update(16.0, &[200.0]);
        assert!((player.pos.y - 125.0).abs() < 1e-4);
        player.update(16.0, &[200.0]);
        assert!((player.pos.y - 143.75).abs() < 1e-4);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut state = running_state();
        assert!(state.player_shoot());
        assert!(!state.player_shoot());
        assert_eq!(state.projectiles.len(), 1);

        let lanes = state.lanes.clone();
        state.player.update(349.0, &lanes);
        assert!(!state.player_shoot());
        state.player.update(1.0, &lanes);
        assert!(state.player_shoot());
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_projectile_spawns_ahead_of_player() {
        let mut player = Player::new(0, Vec2::new(150.0, 200.0), 350.0);
        let shot = player.shoot().unwrap();
        assert_eq!(shot.pos, Vec2::new(186.0, 200.0));
        assert_eq!(player.reload, 350.0);
    }

    #[test]
    fn test_motion_is_frame_rate_normalized() {
        let mut a = Obstacle::new(ObstacleKind::Mine, 0, Vec2::new(500.0, 0.0), 4.0);
        let mut b = a.clone();
        a.update(32.0);
        b.update(16.0);
        b.update(16.0);
        assert!((a.pos.x - b.pos.x).abs() < 1e-4);
        assert!((a.pos.x - 492.0).abs() < 1e-4);

        let mut shot = Projectile::new(Vec2::new(990.0, 0.0));
        shot.update(16.0, 1000.0);
        assert!(!shot.dead);
        shot.update(96.0, 1000.0);
        assert!(shot.dead);
    }

    #[test]
    fn test_resize_reseats_entities() {
        let mut state = running_state();
        state
            .obstacles
            .push(Obstacle::new(ObstacleKind::Mine, 2, Vec2::new(900.0, 800.0), 4.0));
        state.resize(Viewport::new(2000.0, 500.0));
        assert_eq!(state.lanes, vec![100.0, 250.0, 400.0]);
        assert_eq!(state.player.pos.x, 300.0);
        assert_eq!(state.obstacles[0].pos.y, 400.0);
    }

    proptest! {
        #[test]
        fn lane_index_stays_in_range(moves in proptest::collection::vec(-3isize..=3, 0..64), lanes in 1usize..8) {
            let settings = Settings { lane_count: lanes, ..Settings::default() };
            let mut state = GameState::new(&settings, Viewport::default(), 3);
            state.start(3);
            for delta in moves {
                state.move_player(delta);
                prop_assert!(state.player.lane < lanes);
            }
        }
    }
}
