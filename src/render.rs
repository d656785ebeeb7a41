//! Frame composition and presentation
//!
//! `compose` is a pure function of session state: it produces an abstract
//! frame description (fills, sprite placements, text overlays) and never
//! mutates anything. Presentation is behind `FrameSink`, so the same core
//! drives the SPI LCD, an HDMI screen or a test harness.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{SessionPhase, SessionState};
use crate::Rect;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

pub const WHITE: Color = Color(255, 255, 255);
pub const BLACK: Color = Color(0, 0, 0);
pub const GROUND_COLOR: Color = Color(140, 120, 100);

/// Bitmap reference for a sprite placement. Sinks map these to whatever
/// assets they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteId {
    Player,
    ObstacleShort,
    ObstacleTall,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpritePlacement {
    pub sprite: SpriteId,
    pub rect: Rect,
}

/// A label plus numeric value, positioned in field coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub label: String,
    pub value: i64,
    pub pos: Vec2,
}

/// One composed frame. Everything a sink needs to draw, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub background: Color,
    /// Ground band; absent on the game-over tally screen
    pub ground: Option<Rect>,
    pub sprites: Vec<SpritePlacement>,
    pub overlays: Vec<TextOverlay>,
}

/// Compose the current session state into a frame description.
pub fn compose(state: &SessionState) -> Frame {
    let mut frame = Frame {
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
        background: WHITE,
        ground: None,
        sprites: Vec::new(),
        overlays: Vec::new(),
    };

    match state.phase {
        SessionPhase::Standby => {
            frame.ground = Some(ground_band());
            frame.sprites.push(SpritePlacement {
                sprite: SpriteId::Player,
                rect: state.player.rect,
            });
            frame.overlays.push(TextOverlay {
                label: "emotion".into(),
                value: state.initial_budget as i64,
                pos: Vec2::new(10.0, 10.0),
            });
        }
        SessionPhase::Active => {
            frame.ground = Some(ground_band());
            frame.sprites.push(SpritePlacement {
                sprite: SpriteId::Player,
                rect: state.player.rect,
            });
            for obs in state.obstacles.iter() {
                let sprite = match obs.class {
                    crate::sim::HeightClass::Short => SpriteId::ObstacleShort,
                    crate::sim::HeightClass::Tall => SpriteId::ObstacleTall,
                };
                frame.sprites.push(SpritePlacement {
                    sprite,
                    rect: obs.rect(),
                });
            }
            frame.overlays.push(TextOverlay {
                label: "emotion".into(),
                value: state.budget as i64,
                pos: Vec2::new(10.0, 10.0),
            });
            frame.overlays.push(TextOverlay {
                label: "score".into(),
                value: state.score as i64,
                pos: Vec2::new(10.0, 40.0),
            });
        }
        SessionPhase::Over | SessionPhase::Exited => {
            // Final tally screen: text only, centered block
            frame.overlays.push(TextOverlay {
                label: "final score".into(),
                value: state.score as i64,
                pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 3.0),
            });
            frame.overlays.push(TextOverlay {
                label: "remaining emotion".into(),
                value: state.budget as i64,
                pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0),
            });
        }
    }

    frame
}

fn ground_band() -> Rect {
    Rect::new(0.0, GROUND_Y, FIELD_WIDTH, GROUND_BAND)
}

/// Presentation sink. Implementations draw the frame on an SPI LCD, an HDMI
/// framebuffer, a terminal, or nothing at all.
pub trait FrameSink {
    fn present(&mut self, frame: &Frame);
}

/// Sink that discards every frame. Useful for headless tests and benchmarks.
#[derive(Debug, Default)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &Frame) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{tick, GameOverReason, TickInput};
    use crate::tuning::Tuning;

    fn active_state() -> SessionState {
        let mut state = SessionState::new(350, 5, Tuning::default()).unwrap();
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        state
    }

    #[test]
    fn test_compose_is_pure() {
        let state = active_state();
        assert_eq!(compose(&state), compose(&state));
    }

    #[test]
    fn test_active_frame_has_player_obstacles_and_stats() {
        let state = active_state();
        let frame = compose(&state);
        assert!(frame.ground.is_some());
        assert!(frame
            .sprites
            .iter()
            .any(|s| s.sprite == SpriteId::Player));
        // One pre-spawned obstacle
        assert_eq!(frame.sprites.len(), 1 + state.obstacles.len());
        let labels: Vec<&str> = frame.overlays.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["emotion", "score"]);
    }

    #[test]
    fn test_over_frame_shows_final_tally() {
        let mut state = active_state();
        state.score = 42;
        state.budget = 308;
        state.end_attempt(GameOverReason::Collision);
        let frame = compose(&state);
        assert!(frame.ground.is_none());
        assert!(frame.sprites.is_empty());
        assert_eq!(frame.overlays[0].value, 42);
        assert_eq!(frame.overlays[1].value, 308);
    }
}
