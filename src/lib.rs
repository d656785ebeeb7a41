//! Vent Runner - obstacle-dodge game core for a stress-relief installation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, obstacle pool, progression, session state machine)
//! - `render`: Pure frame composition and the `FrameSink` presentation trait
//! - `session`: Fixed-timestep session runner and collaborator traits
//! - `tuning`: Documented gameplay parameters with fail-fast validation
//! - `emotion`: Negative-emotion index used to seed the session budget

pub mod emotion;
pub mod render;
pub mod session;
pub mod sim;
pub mod tuning;

pub use emotion::EmotionCalculator;
pub use session::{Session, SessionResult};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Play field geometry. Structural, not tunable: sprite assets and the
/// installation displays are sized against these.
pub mod consts {
    /// Play field dimensions in logical pixels
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 300.0;

    /// Height of the ground band at the bottom of the field
    pub const GROUND_BAND: f32 = 50.0;
    /// Y coordinate of the ground surface (sprites stand on this line)
    pub const GROUND_Y: f32 = FIELD_HEIGHT - GROUND_BAND;

    /// Player sprite placement and size
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 34.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;

    /// Obstacle sprite width (both height classes)
    pub const OBSTACLE_WIDTH: f32 = 20.0;
}

/// Axis-aligned rectangle, origin at top-left (screen coordinates: y grows
/// downward, so `bottom` is the larger y value).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Move the rect so its bottom edge sits on `y`
    pub fn set_bottom(&mut self, y: f32) {
        self.min.y = y - self.size.y;
    }

    /// Strict AABB overlap (touching edges do not collide)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn test_rect_set_bottom() {
        let mut r = Rect::new(0.0, 0.0, 10.0, 48.0);
        r.set_bottom(consts::GROUND_Y);
        assert_eq!(r.bottom(), consts::GROUND_Y);
        assert_eq!(r.top(), consts::GROUND_Y - 48.0);
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(10.0, 0.0, 10.0, 10.0); // shares an edge only
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }
}
