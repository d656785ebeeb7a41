//! Progression policy: speed ramp and spawn-interval scheduling
//!
//! Speed follows a monotone staircase keyed to score milestones. Spawn gaps
//! shrink stochastically as score grows, bounded so the randint window is
//! never degenerate.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Bounds for the next spawn-interval draw at a given score.
///
/// The average gap is interpolated linearly from `initial_spawn_avg` down to
/// `min_spawn_avg` as score approaches `score_for_min_spawn`, then widened by
/// the random-range window. The low bound is clamped to the absolute floor
/// and the high bound to at least `low + 1`, so the window stays non-empty
/// even at extreme scores.
pub fn spawn_window(score: u32, tuning: &Tuning) -> (u32, u32) {
    let progress = (score as f32 / tuning.score_for_min_spawn as f32).min(1.0);
    let avg = tuning.initial_spawn_avg - progress * (tuning.initial_spawn_avg - tuning.min_spawn_avg);

    let half = tuning.spawn_random_range / 2.0;
    let low_candidate = (avg - half) as i64;
    let high_candidate = (avg + half) as i64;

    let low = (tuning.absolute_min_spawn as i64).max(low_candidate) as u32;
    let high = ((low as i64) + 1).max(high_candidate) as u32;
    (low, high)
}

/// Per-session progression state: the spawn countdown and the last speed
/// milestone already paid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Ticks accumulated since the last spawn
    pub spawn_timer: u32,
    /// Target gap for the next spawn
    pub spawn_interval: u32,
    /// Last `score / milestone_points` value that triggered a speed bump
    pub last_milestone: u32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            spawn_timer: 0,
            spawn_interval: tuning.initial_spawn_avg as u32,
            last_milestone: 0,
        }
    }

    /// Apply the speed ramp for the current score. The first tick where the
    /// floor-divided score exceeds the stored milestone wins; repeated calls
    /// within the same decile are no-ops.
    pub fn on_tick(&mut self, score: u32, speed: &mut f32, tuning: &Tuning) {
        let milestone = score / tuning.milestone_points;
        if milestone > self.last_milestone {
            let bumped = (*speed + tuning.speed_step).min(tuning.max_speed);
            log::debug!(
                "speed milestone {} reached at score {}: {} -> {}",
                milestone,
                score,
                speed,
                bumped
            );
            *speed = bumped;
            self.last_milestone = milestone;
        }
    }

    /// Advance the countdown; true when an obstacle is due.
    pub fn spawn_due(&mut self) -> bool {
        self.spawn_timer += 1;
        self.spawn_timer > self.spawn_interval
    }

    /// Reset the countdown and draw the next target interval.
    pub fn on_spawn_due(&mut self, score: u32, rng: &mut Pcg32, tuning: &Tuning) -> u32 {
        self.spawn_timer = 0;
        let (low, high) = spawn_window(score, tuning);
        self.spawn_interval = rng.random_range(low..=high);
        self.spawn_interval
    }
}
