mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;

use sky_barrage::compute::{init_state, tick};
use sky_barrage::entities::{FrameInput, GameState, GameStatus, HeldKeys};

/// 50 simulation ticks per second.
const FRAME: Duration = Duration::from_millis(20);

/// How long the final frame stays up after the player is hit.
const LOSS_PAUSE: Duration = Duration::from_secs(2);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 7 frames (≈140 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 7;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits or is hit by a bomb.
///
/// Input model: instead of acting on each key event individually, we maintain
/// a `key_frame` map that records the frame number of the last press/repeat
/// event for every key.  Each frame we check which keys are still "fresh"
/// (within `HOLD_WINDOW` frames) and feed all of them to the simulation at
/// once, so diagonal movement and boost combine freely.  Fire and
/// area-activation stay discrete: they trigger on the press event only.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire naturally after `HOLD_WINDOW` frames of
///   silence, which is shorter than the OS repeat interval, so the key stays
///   live while it is actively generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    // Last frame on which any event carried the SHIFT modifier; plain
    // Shift presses are invisible to most terminals, so boost rides on
    // the modifier bits of the movement keys themselves.
    let mut shift_frame: u64 = 0;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut fire = false;
        let mut fire_spread = false;
        let mut activate_area = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            if modifiers.contains(KeyModifiers::SHIFT) {
                shift_frame = frame;
            }
            match kind {
                // Press: record key + handle one-shot actions
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c')
                            if modifiers.contains(KeyModifiers::CONTROL) =>
                        {
                            return Ok(());
                        }
                        KeyCode::Char(' ') => {
                            if modifiers.contains(KeyModifiers::CONTROL) {
                                fire_spread = true;
                            } else {
                                fire = true;
                            }
                        }
                        KeyCode::Enter => {
                            activate_area = true;
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = FrameInput {
            held: HeldKeys {
                up: is_held(&key_frame, &KeyCode::Up, frame),
                down: is_held(&key_frame, &KeyCode::Down, frame),
                left: is_held(&key_frame, &KeyCode::Left, frame),
                right: is_held(&key_frame, &KeyCode::Right, frame),
                boost: frame.saturating_sub(shift_frame) <= HOLD_WINDOW && shift_frame > 0,
            },
            fire,
            fire_spread,
            activate_area,
        };

        *state = tick(state, &input, &mut rng);

        display::render(out, state)?;

        // Loss condition: leave the final frame up briefly, then exit
        if state.status == GameStatus::GameOver {
            thread::sleep(LOSS_PAUSE);
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    // HUD row, two border rows, and the hint row frame the playfield
    let field_w = width.saturating_sub(2).max(20);
    let field_h = height.saturating_sub(4).max(10);

    let mut state = init_state(field_w, field_h);
    game_loop(out, &mut state, rx)
}
