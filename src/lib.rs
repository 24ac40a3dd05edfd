//! Lane Runner - A lane-based survival shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, entities, spawning, collisions)
//! - `game`: Frame loop driver shared by the browser and headless runners
//! - `renderer`: WebGPU rendering pipeline
//! - `hud`: HUD text projection and end-of-round overlay
//! - `config`: Data-driven round settings

pub mod config;
pub mod game;
pub mod hud;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, Settings};
pub use game::{Frame, Game};
pub use hud::{HudSink, HudSnapshot};

/// Game configuration constants
pub mod consts {
    /// Reference frame length (ms) that entity speeds are expressed against
    pub const REFERENCE_FRAME_MS: f32 = 16.0;
    /// Largest frame delta fed to the simulation (tab switches, debugger pauses)
    pub const MAX_FRAME_DT_MS: f32 = 100.0;

    /// Vertical band the lanes are spread across (fractions of viewport height)
    pub const LANE_BAND_TOP: f32 = 0.2;
    pub const LANE_BAND_BOTTOM: f32 = 0.8;
    /// Half height of the translucent band drawn behind each lane
    pub const LANE_BAND_HALF_HEIGHT: f32 = 40.0;

    /// Player defaults - x is anchored to a fraction of the viewport width
    pub const PLAYER_X_FRACTION: f32 = 0.15;
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Fraction of the remaining distance to the lane covered each frame
    pub const PLAYER_EASING: f32 = 0.25;
    /// Player hitbox shrink against obstacles
    pub const PLAYER_HITBOX_SLACK: f32 = 2.0;
    /// Projectiles leave the player this far ahead of its center
    pub const MUZZLE_OFFSET: f32 = 36.0;

    /// Projectile defaults (speed in units per reference frame)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 6.0;
    /// Projectiles die this far past the right edge
    pub const PROJECTILE_EXIT_MARGIN: f32 = 50.0;

    /// Obstacles enter this far past the right edge
    pub const OBSTACLE_ENTRY_MARGIN: f32 = 80.0;
    /// Obstacles are pruned once x drops to this value
    pub const OBSTACLE_EXIT_X: f32 = -100.0;
    /// Base obstacle speed range (units per reference frame)
    pub const OBSTACLE_BASE_SPEED: f32 = 3.0;
    pub const OBSTACLE_SPEED_SPREAD: f32 = 3.0;
    /// Elapsed ms per extra unit of obstacle speed
    pub const DIFFICULTY_RAMP_MS: f32 = 20_000.0;

    /// Passive score per ms of play
    pub const SCORE_PER_MS: f32 = 0.02;
}
