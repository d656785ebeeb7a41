//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the session state
//! - No rendering or platform dependencies

pub mod obstacles;
pub mod player;
pub mod progression;
pub mod state;
pub mod tick;

pub use obstacles::{HeightClass, Obstacle, ObstaclePool};
pub use player::Player;
pub use progression::{Progression, spawn_window};
pub use state::{GameOverReason, SessionPhase, SessionState};
pub use tick::{TickInput, tick};
