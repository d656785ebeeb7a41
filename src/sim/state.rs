//! Session state and lifecycle types
//!
//! One `SessionState` owns everything a run needs: player, obstacle pool,
//! progression, RNG and tuning. Nothing is ambient or global; tick functions
//! thread the state explicitly.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstaclePool;
use super::player::Player;
use super::progression::Progression;
use crate::tuning::{Tuning, TuningError};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Idle, awaiting a start signal (button or key)
    Standby,
    /// Simulation running
    Active,
    /// Run finished; showing the final tally, awaiting restart-or-exit
    Over,
    /// Terminal: session is done
    Exited,
}

/// Why a run ended. Not an error: a first-class outcome surfaced to the
/// caller and to feedback hardware (LED/audio pick an animation off this).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// Player hit an obstacle
    Collision,
    /// The negative-emotion budget was fully worked off
    MileageZero,
    /// External quit signal
    QuitEvent,
}

/// Complete game state for one session. Deterministic: same seed, same
/// tuning, same input script, same trajectory.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub over_reason: Option<GameOverReason>,
    /// Ticks since the current attempt started
    pub time_ticks: u64,

    /// Budget the session was seeded with (emotion index)
    pub initial_budget: u32,
    /// Remaining budget: `initial_budget - score`, floored at zero
    pub budget: u32,
    /// Points earned by passing obstacles in the current attempt
    pub score: u32,
    /// Obstacle scroll speed in pixels per tick
    pub speed: f32,

    pub player: Player,
    pub obstacles: ObstaclePool,
    pub progression: Progression,

    tuning: Tuning,
}

impl SessionState {
    /// Create a session in `Standby`. The tuning document is validated here;
    /// a bad document never reaches the tick loop.
    pub fn new(initial_budget: u32, seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Standby,
            over_reason: None,
            time_ticks: 0,
            initial_budget,
            budget: initial_budget,
            score: 0,
            speed: tuning.initial_speed,
            player: Player::default(),
            obstacles: ObstaclePool::new(),
            progression: Progression::new(&tuning),
            tuning,
        };
        state.reset_attempt();
        state.phase = SessionPhase::Standby;
        Ok(state)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Session time in milliseconds, derived from the tick counter so the
    /// jump-buffer deadline is deterministic.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.time_ticks * self.tuning.tick_ms()
    }

    /// Reset for a fresh attempt (start or restart). The initial budget is
    /// kept; one obstacle is pre-spawned so the field is never empty.
    pub fn reset_attempt(&mut self) {
        self.time_ticks = 0;
        self.score = 0;
        self.budget = self.initial_budget;
        self.speed = self.tuning.initial_speed;
        self.player = Player::default();
        self.obstacles = ObstaclePool::new();
        self.obstacles.spawn(&mut self.rng);
        self.progression = Progression::new(&self.tuning);
        self.over_reason = None;
        self.phase = SessionPhase::Active;
        log::info!(
            "attempt started: budget {} speed {}",
            self.initial_budget,
            self.speed
        );
    }

    /// Terminate the current attempt.
    pub fn end_attempt(&mut self, reason: GameOverReason) {
        self.phase = SessionPhase::Over;
        self.over_reason = Some(reason);
        log::info!(
            "attempt over ({:?}): score {} budget {}",
            reason,
            self.score,
            self.budget
        );
    }
}
