//! Vent Runner entry point
//!
//! Headless demo driver: seeds a session from the command line (no sensor
//! hardware here), runs it with an autopilot player against an ASCII
//! terminal sink, and prints the session result as JSON.
//!
//! Usage: `vent-runner [BUDGET] [SEED]`

use std::time::{SystemTime, UNIX_EPOCH};

use vent_runner::consts::*;
use vent_runner::render::{Frame, FrameSink, SpriteId};
use vent_runner::session::{InputSource, Session};
use vent_runner::sim::{SessionPhase, SessionState, TickInput};
use vent_runner::Tuning;

/// Terminal columns and rows the field is downscaled to
const COLS: usize = 100;
const ROWS: usize = 24;

/// Draws frames as ASCII art, homing the cursor between frames.
struct TerminalSink {
    canvas: Vec<u8>,
}

impl TerminalSink {
    fn new() -> Self {
        // Clear screen once up front
        print!("\x1b[2J");
        Self {
            canvas: vec![b' '; COLS * ROWS],
        }
    }

    fn plot(&mut self, x: f32, y: f32, w: f32, h: f32, glyph: u8, frame: &Frame) {
        let sx = COLS as f32 / frame.width;
        let sy = ROWS as f32 / frame.height;
        let x0 = (x * sx).max(0.0) as usize;
        let x1 = (((x + w) * sx) as usize).min(COLS);
        let y0 = (y * sy).max(0.0) as usize;
        let y1 = ((((y + h) * sy) as usize) + 1).min(ROWS);
        for row in y0..y1 {
            for col in x0..x1 {
                self.canvas[row * COLS + col] = glyph;
            }
        }
    }
}

impl FrameSink for TerminalSink {
    fn present(&mut self, frame: &Frame) {
        self.canvas.fill(b' ');

        if let Some(ground) = frame.ground {
            self.plot(
                ground.left(),
                ground.top(),
                ground.size.x,
                ground.size.y,
                b'=',
                frame,
            );
        }
        for placement in &frame.sprites {
            let glyph = match placement.sprite {
                SpriteId::Player => b'@',
                SpriteId::ObstacleShort => b'x',
                SpriteId::ObstacleTall => b'X',
            };
            let r = placement.rect;
            self.plot(r.left(), r.top(), r.size.x, r.size.y, glyph, frame);
        }

        // Home the cursor and redraw
        print!("\x1b[H");
        for row in 0..ROWS {
            let line = &self.canvas[row * COLS..(row + 1) * COLS];
            println!("{}", String::from_utf8_lossy(line));
        }
        for overlay in &frame.overlays {
            println!("{}: {}   ", overlay.label, overlay.value);
        }
    }
}

/// Scripted player: starts immediately, jumps when the nearest unscored
/// obstacle closes in, exits at the first game-over screen.
struct AutoPilot;

impl InputSource for AutoPilot {
    fn poll(&mut self, state: &SessionState) -> TickInput {
        match state.phase {
            SessionPhase::Standby => TickInput {
                start: true,
                ..Default::default()
            },
            SessionPhase::Active => {
                // Jump when an approaching obstacle is within reaction range.
                // Range scales with speed so faster scroll still clears.
                let reaction = state.speed * 14.0;
                let jump = state.obstacles.iter().any(|obs| {
                    !obs.scored
                        && obs.right() > PLAYER_X
                        && obs.x - (PLAYER_X + PLAYER_WIDTH) < reaction
                });
                TickInput {
                    jump,
                    ..Default::default()
                }
            }
            SessionPhase::Over => TickInput {
                exit: true,
                ..Default::default()
            },
            SessionPhase::Exited => TickInput::default(),
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let budget: u32 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(350);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    log::info!("vent-runner demo: budget {budget} seed {seed}");

    let result = match Session::new(budget, seed, Tuning::default(), AutoPilot, TerminalSink::new())
    {
        Ok(session) => session.run(),
        Err(err) => {
            eprintln!("invalid tuning: {err}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("result serialization failed: {err}"),
    }
}
