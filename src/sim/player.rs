//! Player physics: vertical kinematics, jump state, jump buffering
//!
//! The tricky part is the jump buffer. A jump pressed slightly before landing
//! would otherwise be lost, which feels like the game ate the input. Instead
//! the press records a deadline; if the player lands before it expires, the
//! jump fires immediately on landing.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::Rect;

/// The runner. X is fixed at the left of the field; only y moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity (positive = falling)
    pub vy: f32,
    pub airborne: bool,
    /// Deadline for a buffered jump in session milliseconds (0 = none pending)
    pub jump_buffer_expires_at: u64,
}

impl Default for Player {
    fn default() -> Self {
        let mut rect = Rect::new(PLAYER_X, 0.0, PLAYER_WIDTH, PLAYER_HEIGHT);
        rect.set_bottom(GROUND_Y);
        Self {
            rect,
            vy: 0.0,
            airborne: false,
            jump_buffer_expires_at: 0,
        }
    }
}

impl Player {
    /// Advance one tick of vertical physics.
    ///
    /// `now_ms` is session time derived from the tick counter, so the buffer
    /// deadline is deterministic for a given input script.
    pub fn advance(&mut self, jump_requested: bool, now_ms: u64, tuning: &Tuning) {
        if jump_requested {
            if !self.airborne {
                self.start_jump(tuning);
                self.jump_buffer_expires_at = 0;
            } else {
                self.jump_buffer_expires_at = now_ms + tuning.jump_buffer_ms;
            }
        }

        if self.airborne {
            self.vy += tuning.gravity;
            self.rect.min.y += self.vy;

            if self.rect.bottom() >= GROUND_Y {
                self.rect.set_bottom(GROUND_Y);
                self.airborne = false;
                self.vy = 0.0;
                // Landed: fire the buffered jump if it is still live
                if self.jump_buffer_expires_at > now_ms {
                    self.start_jump(tuning);
                }
                self.jump_buffer_expires_at = 0;
            }
        }
    }

    fn start_jump(&mut self, tuning: &Tuning) {
        self.airborne = true;
        self.vy = tuning.jump_strength;
    }
}
