//! Frame loop driver
//!
//! Owns the session, turns host timestamps into frame deltas and decides
//! whether another frame should be requested. The browser entry point and the
//! headless runner both drive the game through this type.

use crate::config::Settings;
use crate::consts::MAX_FRAME_DT_MS;
use crate::hud::{HudSink, HudSnapshot, Overlay};
use crate::sim::{
    Command, GameEvent, GameState, KeyEvent, Viewport, apply_command, choose_command, command_for,
    tick,
};

/// Turns absolute frame timestamps (ms) into clamped deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    /// Forget the previous timestamp; the next frame has a zero delta
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Delta since the previous timestamp, clamped to [0, MAX_FRAME_DT_MS]
    pub fn delta(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now - last) as f32,
            None => 0.0,
        };
        self.last = Some(now);
        dt.clamp(0.0, MAX_FRAME_DT_MS)
    }
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub events: Vec<GameEvent>,
    /// Whether the host should request another frame
    pub schedule_next: bool,
}

/// A game session plus its frame bookkeeping
#[derive(Debug, Clone)]
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    /// Autopilot plays instead of the keyboard
    pub idle_mode: bool,
    clock: FrameClock,
}

impl Game {
    /// Create an idle game; nothing runs until `start`
    pub fn new(settings: Settings, viewport: Viewport, seed: u64) -> Self {
        let seed = settings.seed.unwrap_or(seed);
        Self {
            state: GameState::new(&settings, viewport, seed),
            settings,
            idle_mode: false,
            clock: FrameClock::default(),
        }
    }

    /// Seed for the next round: the configured seed, or one derived from the last
    fn next_seed(&self) -> u64 {
        match self.settings.seed {
            Some(seed) => seed,
            None if self.state.rounds_started == 0 => self.state.seed,
            None => splitmix64(self.state.seed),
        }
    }

    /// Start from idle or restart after a finished round
    ///
    /// Returns true when a round began and the host must start requesting
    /// frames. A round in progress is left alone.
    pub fn start(&mut self, hud: &mut impl HudSink) -> bool {
        if self.state.is_running() {
            return false;
        }
        let seed = self.next_seed();
        self.state.start(seed);
        self.clock.reset();
        hud.show_overlay(None);
        hud.show_stats(&HudSnapshot::from_state(&self.state));
        log::info!(
            "Round {} started (seed {}, {} lanes)",
            self.state.rounds_started,
            seed,
            self.state.lane_count
        );
        true
    }

    /// Viewport changed size
    pub fn resize(&mut self, viewport: Viewport) {
        log::info!("Viewport resized to {}x{}", viewport.width, viewport.height);
        self.state.resize(viewport);
    }

    /// Apply a keyboard event immediately
    ///
    /// Returns true when the event started a round and the host must start
    /// requesting frames.
    pub fn handle_key(&mut self, event: KeyEvent<'_>, hud: &mut impl HudSink) -> bool {
        match command_for(event) {
            Some(Command::Start) => self.start(hud),
            Some(Command::ToggleIdle) => {
                self.idle_mode = !self.idle_mode;
                log::info!("Idle mode: {}", self.idle_mode);
                false
            }
            Some(command) if !self.idle_mode => {
                apply_command(&mut self.state, command);
                false
            }
            _ => false,
        }
    }

    /// Advance one frame at host timestamp `now` (ms)
    pub fn frame(&mut self, now: f64, hud: &mut impl HudSink) -> Frame {
        let dt = self.clock.delta(now);

        if self.idle_mode {
            if let Some(command) = choose_command(&self.state) {
                apply_command(&mut self.state, command);
            }
        }

        let was_running = self.state.is_running();
        let events = tick(&mut self.state, dt);
        if was_running {
            hud.show_stats(&HudSnapshot::from_state(&self.state));
        }

        for event in &events {
            match *event {
                GameEvent::RoundEnded(outcome) => {
                    log::info!(
                        "Round {} ended: {:?} (score {}, {} lives)",
                        self.state.rounds_started,
                        outcome,
                        self.state.score.floor(),
                        self.state.lives
                    );
                    let overlay = Overlay::for_outcome(
                        outcome,
                        &self.settings.briefings,
                        self.state.rounds_started,
                    );
                    hud.show_overlay(Some(&overlay));
                }
                GameEvent::ObstacleDestroyed { kind, points } => {
                    log::debug!("Destroyed {:?} for {} points", kind, points);
                }
                GameEvent::PlayerHit { lives } => {
                    log::info!("Player hit, {} lives left", lives);
                }
                GameEvent::ObstacleSpawned { .. } => {}
            }
        }

        Frame {
            events,
            schedule_next: self.state.is_running(),
        }
    }
}

/// SplitMix64 step, used to derive successive round seeds
fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
