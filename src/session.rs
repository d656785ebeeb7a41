//! Session runner: the fixed-timestep loop and its collaborators
//!
//! The installation historically grew three near-identical game loops (LCD,
//! HDMI, async). Here there is exactly one, parameterized by narrow
//! capability traits: an input source, a frame sink and an optional feedback
//! sink. Hardware adapters live outside the crate.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::render::{compose, FrameSink};
use crate::sim::{tick, GameOverReason, SessionPhase, SessionState, TickInput};
use crate::tuning::{Tuning, TuningError};

/// Outcome of a full session, surfaced to the caller once the state machine
/// reaches `Exited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub final_score: u32,
    pub final_budget: u32,
    pub reason: GameOverReason,
}

/// Per-tick input provider. Implementations poll a keyboard, a piezo
/// trigger, or a script; polling must not block.
pub trait InputSource {
    fn poll(&mut self, state: &SessionState) -> TickInput;
}

/// Fire-and-forget feedback (LED animations, sound cues). The core never
/// reads anything back.
pub trait FeedbackSink {
    fn on_game_over(&mut self, reason: GameOverReason);
}

/// Default feedback collaborator: does nothing.
#[derive(Debug, Default)]
pub struct NoFeedback;

impl FeedbackSink for NoFeedback {
    fn on_game_over(&mut self, _reason: GameOverReason) {}
}

/// Strike sensor. Used strictly before a session to seed the budget, never
/// inside the tick loop.
pub trait SensorSource {
    /// Highest voltage seen over the sampling window
    fn read_peak_voltage(&mut self, duration: Duration) -> f32;
    /// True if any channel currently exceeds the threshold
    fn check_trigger(&mut self, threshold: f32) -> bool;
}

/// Blocking frame pacer. One `wait` per tick sleeps off whatever remains of
/// the tick period.
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            last: Instant::now(),
        }
    }

    pub fn wait(&mut self) {
        let elapsed = self.last.elapsed();
        if elapsed < self.period {
            std::thread::sleep(self.period - elapsed);
        }
        self.last = Instant::now();
    }
}

/// One game session: state machine plus collaborators. Single-threaded; all
/// state is owned here and mutated only inside `run`.
pub struct Session<I, S, F = NoFeedback>
where
    I: InputSource,
    S: FrameSink,
    F: FeedbackSink,
{
    state: SessionState,
    input: I,
    sink: S,
    feedback: F,
    paced: bool,
}

impl<I, S> Session<I, S, NoFeedback>
where
    I: InputSource,
    S: FrameSink,
{
    /// Build a session in `Standby` with the given starting budget. Tuning
    /// is validated here; nothing fails later.
    pub fn new(
        initial_budget: u32,
        seed: u64,
        tuning: Tuning,
        input: I,
        sink: S,
    ) -> Result<Self, TuningError> {
        Ok(Self {
            state: SessionState::new(initial_budget, seed, tuning)?,
            input,
            sink,
            feedback: NoFeedback,
            paced: true,
        })
    }
}

impl<I, S, F> Session<I, S, F>
where
    I: InputSource,
    S: FrameSink,
    F: FeedbackSink,
{
    /// Swap in a feedback collaborator (LED/audio adapter).
    pub fn with_feedback<F2: FeedbackSink>(self, feedback: F2) -> Session<I, S, F2> {
        Session {
            state: self.state,
            input: self.input,
            sink: self.sink,
            feedback,
            paced: self.paced,
        }
    }

    /// Disable the frame clock. Tests and benchmarks run at full speed.
    pub fn unpaced(mut self) -> Self {
        self.paced = false;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Drive the session until it exits. One loop iteration is one tick and
    /// one presented frame.
    pub fn run(mut self) -> SessionResult {
        log::info!(
            "session starting: budget {} seed {}",
            self.state.initial_budget,
            self.state.seed
        );
        let mut clock = self
            .paced
            .then(|| FrameClock::new(self.state.tuning().fps));

        loop {
            let input = self.input.poll(&self.state);
            let was_active = self.state.phase == SessionPhase::Active;

            tick(&mut self.state, &input);

            if was_active && self.state.phase == SessionPhase::Over {
                if let Some(reason) = self.state.over_reason {
                    self.feedback.on_game_over(reason);
                }
            }
            // A quit signal skips the game-over display entirely
            if self.state.phase == SessionPhase::Over
                && self.state.over_reason == Some(GameOverReason::QuitEvent)
            {
                self.state.phase = SessionPhase::Exited;
            }
            if self.state.phase == SessionPhase::Exited {
                break;
            }

            let frame = compose(&self.state);
            self.sink.present(&frame);

            if let Some(clock) = clock.as_mut() {
                clock.wait();
            }
        }

        let result = SessionResult {
            final_score: self.state.score,
            final_budget: self.state.budget,
            reason: self.state.over_reason.unwrap_or(GameOverReason::QuitEvent),
        };
        log::info!(
            "session exited: score {} budget {} ({:?})",
            result.final_score,
            result.final_budget,
            result.reason
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSink;

    /// Scripted input: start immediately, never jump, exit after game over.
    struct StartAndExit;

    impl InputSource for StartAndExit {
        fn poll(&mut self, state: &SessionState) -> TickInput {
            match state.phase {
                SessionPhase::Standby => TickInput {
                    start: true,
                    ..Default::default()
                },
                SessionPhase::Over => TickInput {
                    exit: true,
                    ..Default::default()
                },
                _ => TickInput::default(),
            }
        }
    }

    /// Quits a fixed number of ticks in.
    struct QuitAfter(u64);

    impl InputSource for QuitAfter {
        fn poll(&mut self, state: &SessionState) -> TickInput {
            match state.phase {
                SessionPhase::Standby => TickInput {
                    start: true,
                    ..Default::default()
                },
                SessionPhase::Active if state.time_ticks >= self.0 => TickInput {
                    quit: true,
                    ..Default::default()
                },
                _ => TickInput::default(),
            }
        }
    }

    #[derive(Default)]
    struct RecordingFeedback {
        reasons: Vec<GameOverReason>,
    }

    impl FeedbackSink for &mut RecordingFeedback {
        fn on_game_over(&mut self, reason: GameOverReason) {
            self.reasons.push(reason);
        }
    }

    #[test]
    fn test_run_to_collision_and_exit() {
        let session = Session::new(350, 42, Tuning::default(), StartAndExit, NullSink)
            .unwrap()
            .unpaced();
        let result = session.run();
        assert_eq!(result.reason, GameOverReason::Collision);
        assert_eq!(result.final_score, 0);
        assert_eq!(result.final_budget, 350);
    }

    #[test]
    fn test_quit_bypasses_game_over_display() {
        let session = Session::new(350, 42, Tuning::default(), QuitAfter(10), NullSink)
            .unwrap()
            .unpaced();
        let result = session.run();
        assert_eq!(result.reason, GameOverReason::QuitEvent);
    }

    #[test]
    fn test_feedback_fires_on_game_over_edge() {
        let mut feedback = RecordingFeedback::default();
        let session = Session::new(350, 42, Tuning::default(), StartAndExit, NullSink)
            .unwrap()
            .unpaced()
            .with_feedback(&mut feedback);
        session.run();
        assert_eq!(feedback.reasons, vec![GameOverReason::Collision]);
    }

    #[test]
    fn test_result_serializes_wire_format() {
        let result = SessionResult {
            final_score: 12,
            final_budget: 0,
            reason: GameOverReason::MileageZero,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"mileage_zero\""));
    }
}
