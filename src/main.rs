use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scramble::display;
use scramble::entities::BulletKind;
use scramble::session::{FirePolicy, GameSession};

const FRAME: Duration = Duration::from_millis(33); // ≈30 ticks/sec

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

#[derive(Parser, Debug)]
#[command(name = "scramble", about = "Side-scrolling arcade shooter")]
struct Args {
    /// Seed for enemy spawn placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Start at this stage index instead of the beginning.
    #[arg(long)]
    stage: Option<usize>,

    /// Lift the one-bullet-in-flight-per-kind cap.
    #[arg(long)]
    relaxed_fire: bool,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    key_frame
        .get(&key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: instead of acting on each key event individually, we keep a
/// `key_frame` map recording the frame number of the last press/repeat per
/// key. Each frame the directional keys still "fresh" become the ship's
/// intent flags, all applied simultaneously and always before the tick runs.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Enter => session.start(),
                        KeyCode::Char('p') | KeyCode::Char('P') => {
                            let paused = session.is_paused();
                            session.set_paused(!paused);
                        }
                        KeyCode::Char(' ') => {
                            session.fire(BulletKind::Horizontal);
                        }
                        KeyCode::Char('b') | KeyCode::Char('B') => {
                            session.fire(BulletKind::Bomb);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so the key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Intent flags from held keys, then the tick ────────────────────────
        let ship = session.ship_mut();
        ship.left = is_held(&key_frame, KeyCode::Left, frame);
        ship.right = is_held(&key_frame, KeyCode::Right, frame);
        ship.up = is_held(&key_frame, KeyCode::Up, frame);
        ship.down = is_held(&key_frame, KeyCode::Down, frame);

        session.tick(rng);
        display::render(out, session)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut session = GameSession::new()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    if args.relaxed_fire {
        session.set_fire_policy(FirePolicy::Unrestricted);
    }
    if let Some(stage) = args.stage {
        if !session.jump_to_stage(stage) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("no such stage: {stage}"),
            ));
        }
    }
    let mut rng = StdRng::seed_from_u64(args.seed.unwrap_or_else(|| rand::thread_rng().gen()));

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread; the game loop only
    // ever drains the channel, so it never stalls on input.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut session, &mut rng, &rx);

    // Restore the terminal whatever the loop returned
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
