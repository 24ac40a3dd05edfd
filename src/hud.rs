//! HUD projection
//!
//! The HUD is a pure view of the session: rounded numbers for the three text
//! fields and the end-of-round banner. Hosts implement `HudSink` to put them
//! on screen.

use serde::Serialize;

use crate::sim::{GameState, Outcome};

/// Values shown in the HUD text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HudSnapshot {
    /// Score rounded down
    pub score: u64,
    /// Seconds remaining rounded up
    pub time: u32,
    pub lives: u32,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score.max(0.0).floor() as u64,
            time: state.timer.max(0.0).ceil() as u32,
            lives: state.lives,
        }
    }
}

/// End-of-round banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub briefing: Option<String>,
}

impl Overlay {
    /// Banner for a finished round; briefings rotate one per round
    pub fn for_outcome(outcome: Outcome, briefings: &[String], round: u32) -> Self {
        let title = match outcome {
            Outcome::Won => "You Survived!",
            Outcome::Lost => "Game Over",
        };
        let briefing = if briefings.is_empty() {
            None
        } else {
            let index = round.saturating_sub(1) as usize % briefings.len();
            Some(briefings[index].clone())
        };
        Self { title, briefing }
    }
}

/// Where HUD values end up (DOM text fields in the browser)
pub trait HudSink {
    /// Update score, time and lives
    fn show_stats(&mut self, hud: &HudSnapshot);

    /// Show the end banner, or hide it with `None`
    fn show_overlay(&mut self, overlay: Option<&Overlay>);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::sim::Viewport;

    #[test]
    fn test_snapshot_rounding() {
        let mut state = GameState::new(&Settings::default(), Viewport::default(), 1);
        state.start(1);
        state.score = 41.99;
        state.timer = 12.01;
        state.lives = 2;
        let hud = HudSnapshot::from_state(&state);
        assert_eq!(
            hud,
            HudSnapshot {
                score: 41,
                time: 13,
                lives: 2
            }
        );
    }

    #[test]
    fn test_snapshot_serializes_flat() {
        let hud = HudSnapshot {
            score: 12,
            time: 3,
            lives: 1,
        };
        let json = serde_json::to_value(hud).unwrap();
        assert_eq!(json, serde_json::json!({ "score": 12, "time": 3, "lives": 1 }));
        assert_eq!(serde_json::to_value(Outcome::Won).unwrap(), "won");
    }

    #[test]
    fn test_overlay_titles() {
        assert_eq!(Overlay::for_outcome(Outcome::Won, &[], 1).title, "You Survived!");
        assert_eq!(Overlay::for_outcome(Outcome::Lost, &[], 1).title, "Game Over");
        assert_eq!(Overlay::for_outcome(Outcome::Lost, &[], 1).briefing, None);
    }

    #[test]
    fn test_briefings_rotate() {
        let briefings = vec!["a".to_string(), "b".to_string()];
        let line = |round| Overlay::for_outcome(Outcome::Won, &briefings, round).briefing;
        assert_eq!(line(1).as_deref(), Some("a"));
        assert_eq!(line(2).as_deref(), Some("b"));
        assert_eq!(line(3).as_deref(), Some("a"));
    }
}
