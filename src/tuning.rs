//! Data-driven game balance
//!
//! Every documented gameplay parameter lives here. Tuning documents are
//! plain JSON and validated before a session is constructed, so impossible
//! combinations fail fast instead of misbehaving mid-game.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gameplay parameters for one session.
///
/// Defaults match the installation's 60 Hz deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation and presentation rate (ticks per second)
    pub fps: u32,

    // === Player physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative = upward)
    pub jump_strength: f32,
    /// Grace window for a jump pressed while airborne: if the player lands
    /// within this many milliseconds, the jump fires on landing
    pub jump_buffer_ms: u64,

    // === Speed ramp ===
    /// Obstacle scroll speed at session start (pixels per tick)
    pub initial_speed: f32,
    /// Speed increase applied at each milestone
    pub speed_step: f32,
    /// Hard cap on obstacle speed
    pub max_speed: f32,
    /// Points per speed milestone (a bump fires each time `score / this`
    /// passes a new integer)
    pub milestone_points: u32,

    // === Spawn scheduling ===
    /// Average ticks between spawns at score 0
    pub initial_spawn_avg: f32,
    /// Average ticks between spawns once fully ramped
    pub min_spawn_avg: f32,
    /// Score at which the average spawn gap reaches `min_spawn_avg`
    pub score_for_min_spawn: u32,
    /// Width of the uniform window around the current average
    pub spawn_random_range: f32,
    /// Absolute floor on the spawn gap, regardless of progress
    pub absolute_min_spawn: u32,

    // === Scoring ===
    /// Reward range for passing a short obstacle (inclusive)
    pub short_reward_min: u32,
    pub short_reward_max: u32,
    /// Reward range for passing a tall obstacle (inclusive)
    pub tall_reward_min: u32,
    pub tall_reward_max: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: 60,

            gravity: 1.0,
            jump_strength: -16.0,
            jump_buffer_ms: 180,

            initial_speed: 5.0,
            speed_step: 0.5,
            max_speed: 12.0,
            milestone_points: 10,

            initial_spawn_avg: 120.0,
            min_spawn_avg: 50.0,
            score_for_min_spawn: 2000,
            spawn_random_range: 30.0,
            absolute_min_spawn: 30,

            short_reward_min: 5,
            short_reward_max: 7,
            tall_reward_min: 8,
            tall_reward_max: 10,
        }
    }
}

/// Rejected tuning document. Produced by [`Tuning::validate`] at session
/// construction time, never mid-game.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// fps must be positive to derive a tick duration
    ZeroFps,
    /// gravity must pull the player back down
    NonPositiveGravity,
    /// jump strength must be negative (upward in screen coordinates)
    NonNegativeJumpStrength,
    /// min average spawn gap exceeds the initial average
    SpawnGapInverted { min: f32, initial: f32 },
    /// the spawn-gap ramp needs a positive score target
    ZeroScoreForMinSpawn,
    /// the absolute spawn floor must allow at least one tick between spawns
    ZeroAbsoluteMinSpawn,
    /// initial speed must be positive
    NonPositiveInitialSpeed,
    /// speed cap below the starting speed
    SpeedCapBelowInitial { max: f32, initial: f32 },
    /// milestone size of zero would divide by zero
    ZeroMilestonePoints,
    /// a reward range with min > max
    RewardRangeInverted { min: u32, max: u32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::ZeroFps => write!(f, "fps must be > 0"),
            TuningError::NonPositiveGravity => write!(f, "gravity must be > 0"),
            TuningError::NonNegativeJumpStrength => {
                write!(f, "jump_strength must be negative (upward)")
            }
            TuningError::SpawnGapInverted { min, initial } => {
                write!(f, "min_spawn_avg ({min}) exceeds initial_spawn_avg ({initial})")
            }
            TuningError::ZeroScoreForMinSpawn => write!(f, "score_for_min_spawn must be > 0"),
            TuningError::ZeroAbsoluteMinSpawn => write!(f, "absolute_min_spawn must be > 0"),
            TuningError::NonPositiveInitialSpeed => write!(f, "initial_speed must be > 0"),
            TuningError::SpeedCapBelowInitial { max, initial } => {
                write!(f, "max_speed ({max}) is below initial_speed ({initial})")
            }
            TuningError::ZeroMilestonePoints => write!(f, "milestone_points must be > 0"),
            TuningError::RewardRangeInverted { min, max } => {
                write!(f, "reward range inverted: min {min} > max {max}")
            }
        }
    }
}

impl std::error::Error for TuningError {}

impl Tuning {
    /// Check the document for impossible combinations.
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.fps == 0 {
            return Err(TuningError::ZeroFps);
        }
        if self.gravity <= 0.0 {
            return Err(TuningError::NonPositiveGravity);
        }
        if self.jump_strength >= 0.0 {
            return Err(TuningError::NonNegativeJumpStrength);
        }
        if self.min_spawn_avg > self.initial_spawn_avg {
            return Err(TuningError::SpawnGapInverted {
                min: self.min_spawn_avg,
                initial: self.initial_spawn_avg,
            });
        }
        if self.score_for_min_spawn == 0 {
            return Err(TuningError::ZeroScoreForMinSpawn);
        }
        if self.absolute_min_spawn == 0 {
            return Err(TuningError::ZeroAbsoluteMinSpawn);
        }
        if self.initial_speed <= 0.0 {
            return Err(TuningError::NonPositiveInitialSpeed);
        }
        if self.max_speed < self.initial_speed {
            return Err(TuningError::SpeedCapBelowInitial {
                max: self.max_speed,
                initial: self.initial_speed,
            });
        }
        if self.milestone_points == 0 {
            return Err(TuningError::ZeroMilestonePoints);
        }
        if self.short_reward_min > self.short_reward_max {
            return Err(TuningError::RewardRangeInverted {
                min: self.short_reward_min,
                max: self.short_reward_max,
            });
        }
        if self.tall_reward_min > self.tall_reward_max {
            return Err(TuningError::RewardRangeInverted {
                min: self.tall_reward_min,
                max: self.tall_reward_max,
            });
        }
        Ok(())
    }

    /// Duration of one tick in milliseconds
    #[inline]
    pub fn tick_ms(&self) -> u64 {
        1000 / self.fps as u64
    }

    /// Parse and validate a JSON tuning document.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_spawn_gap_inverted_rejected() {
        let t = Tuning {
            min_spawn_avg: 200.0,
            initial_spawn_avg: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(TuningError::SpawnGapInverted { .. })
        ));
    }

    #[test]
    fn test_speed_cap_below_initial_rejected() {
        let t = Tuning {
            initial_speed: 5.0,
            max_speed: 4.0,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(TuningError::SpeedCapBelowInitial { .. })
        ));
    }

    #[test]
    fn test_upward_gravity_rejected() {
        let t = Tuning {
            gravity: -1.0,
            ..Default::default()
        };
        assert_eq!(t.validate(), Err(TuningError::NonPositiveGravity));
    }

    #[test]
    fn test_reward_range_inverted_rejected() {
        let t = Tuning {
            tall_reward_min: 10,
            tall_reward_max: 8,
            ..Default::default()
        };
        assert!(matches!(
            t.validate(),
            Err(TuningError::RewardRangeInverted { min: 10, max: 8 })
        ));
    }

    #[test]
    fn test_from_json_partial_document() {
        // Unspecified fields fall back to defaults
        let t = Tuning::from_json(r#"{ "fps": 30, "jump_buffer_ms": 120 }"#).unwrap();
        assert_eq!(t.fps, 30);
        assert_eq!(t.jump_buffer_ms, 120);
        assert_eq!(t.gravity, 1.0);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(Tuning::from_json(r#"{ "fps": 0 }"#).is_err());
    }

    #[test]
    fn test_tick_ms() {
        assert_eq!(Tuning::default().tick_ms(), 16);
        let t = Tuning {
            fps: 30,
            ..Default::default()
        };
        assert_eq!(t.tick_ms(), 33);
    }
}
