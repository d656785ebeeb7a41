//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one tick. The Active tick order
//! is fixed: input, physics, progression, obstacle spawn/advance/score/reap,
//! collision, budget. A quit signal aborts the remainder of the tick.

use super::state::{GameOverReason, SessionPhase, SessionState};

/// Input events for a single tick. Origin (keyboard, piezo trigger,
/// scripted) is the caller's business.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump requested this tick
    pub jump: bool,
    /// Start signal (Standby only)
    pub start: bool,
    /// Restart choice (Over only)
    pub restart: bool,
    /// Exit choice (Over only)
    pub exit: bool,
    /// External quit signal; honored in any phase
    pub quit: bool,
}

/// Advance the session state by one fixed timestep.
pub fn tick(state: &mut SessionState, input: &TickInput) {
    // A quit signal short-circuits everything else this tick. The session
    // runner promotes Over(QuitEvent) straight to Exited, skipping the
    // game-over display.
    if input.quit && state.phase != SessionPhase::Exited {
        state.end_attempt(GameOverReason::QuitEvent);
        return;
    }

    match state.phase {
        SessionPhase::Standby => {
            if input.start {
                state.reset_attempt();
            }
        }
        SessionPhase::Active => active_tick(state, input.jump),
        SessionPhase::Over => {
            if input.restart {
                state.reset_attempt();
            } else if input.exit {
                state.phase = SessionPhase::Exited;
            }
        }
        SessionPhase::Exited => {}
    }
}

fn active_tick(state: &mut SessionState, jump: bool) {
    state.time_ticks += 1;
    let now_ms = state.now_ms();
    let tuning = state.tuning().clone();

    // Physics
    state.player.advance(jump, now_ms, &tuning);

    // Progression: speed ramp, then spawn scheduling
    state
        .progression
        .on_tick(state.score, &mut state.speed, &tuning);
    if state.progression.spawn_due() {
        state.obstacles.spawn(&mut state.rng);
        state
            .progression
            .on_spawn_due(state.score, &mut state.rng, &tuning);
    }

    // Obstacles: advance, score passes, retire
    state.obstacles.advance(state.speed);
    let points = state
        .obstacles
        .score_passes(state.player.rect.left(), &mut state.rng, &tuning);
    state.score += points;
    state.obstacles.reap_offscreen();

    // Collision ends the attempt immediately
    if state.obstacles.collides(&state.player.rect) {
        state.budget = state.initial_budget.saturating_sub(state.score);
        state.end_attempt(GameOverReason::Collision);
        return;
    }

    // Budget recompute; exhaustion is the win condition
    state.budget = state.initial_budget.saturating_sub(state.score);
    if state.budget == 0 {
        state.end_attempt(GameOverReason::MileageZero);
    }
}
