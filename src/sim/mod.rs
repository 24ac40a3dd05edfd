//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn/fire order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod lanes;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::choose_command;
pub use collision::{circles_overlap, resolve_collisions};
pub use input::{Command, KeyEvent, apply_command, command_for};
pub use lanes::{Viewport, compute_lanes};
pub use spawner::spawn_random;
pub use state::{
    GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Outcome, Player, Projectile,
};
pub use tick::tick;
