use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bullet_hell::compute::init_state;
use bullet_hell::config::GameConfig;
use bullet_hell::display::{self, Viewport};
use bullet_hell::entities::GameState;
use bullet_hell::game::{primary_button, step};
use bullet_hell::input::{KeyTracker, Signal};
use bullet_hell::scene;

#[derive(Parser)]
#[command(name = "bullet_hell")]
#[command(about = "Dodge and shoot descending enemy waves in your terminal")]
struct Args {
    /// JSON file overriding the default game balance
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for a reproducible enemy pattern
    #[arg(long)]
    seed: Option<u64>,
    /// Where log output goes (the terminal is busy drawing the game)
    #[arg(long, default_value = "bullet_hell.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialise logger")?;
    Ok(())
}

// ── Frame driver ──────────────────────────────────────────────────────────────

/// Poll input, step the game, draw, then sleep off the rest of the frame
/// budget.  Slow frames are never caught up.  Returns on quit.
fn game_loop<W: Write>(
    out: &mut W,
    mut state: GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut impl Rng,
) -> std::io::Result<()> {
    let clock = Instant::now();
    let budget = Duration::from_millis(state.config.frame_budget_ms());
    let mut keys = KeyTracker::new(state.config.target_fps);

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;
        let (cols, rows) = terminal::size()?;
        let viewport = Viewport::new(cols, rows, &state.config);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut clicks = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            match keys.handle(&ev, state.frame) {
                Some(Signal::Quit) => return Ok(()),
                Some(Signal::Confirm) => {
                    if let Some(button) = primary_button(&state) {
                        clicks.push(button.center());
                    }
                }
                Some(Signal::Pointer { col, row }) => clicks.push(viewport.to_field(col, row)),
                None => {}
            }
        }

        let mut input = keys.snapshot(state.frame);
        input.clicks = clicks;

        let before = state.status;
        state = step(&state, &input, now_ms, rng);
        if state.status != before {
            log::debug!("State {:?} -> {:?}", before, state.status);
        }
        if state.quit_requested {
            return Ok(());
        }

        display::render(out, &scene::build(&state, now_ms), &viewport)?;

        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => {
            log::info!("Using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    log::info!(
        "Bullet Hell starting ({}x{} field, {} fps)",
        config.screen_width,
        config.screen_height,
        config.target_fps
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let setup = out
        .execute(terminal::EnterAlternateScreen)
        .and_then(|o| o.execute(cursor::Hide))
        .and_then(|o| o.execute(EnableMouseCapture))
        .map(|_| ());

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = setup.is_ok()
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    let result = setup.and_then(|()| {
        // Dedicate a thread exclusively to blocking event reads, sending them
        // through a channel so the game loop never has to block on I/O.
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
        });
        game_loop(&mut out, init_state(config), &rx, &mut rng)
    });

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    for restore in [
        out.execute(DisableMouseCapture).map(|_| ()),
        out.execute(cursor::Show).map(|_| ()),
        out.execute(terminal::LeaveAlternateScreen).map(|_| ()),
        terminal::disable_raw_mode(),
    ] {
        if let Err(e) = restore {
            log::warn!("Terminal restore failed: {e}");
        }
    }

    result.context("terminal session failed")?;
    log::info!("Bye");
    Ok(())
}
