//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from the term crate.
//! The engine answers each activation with a list of transitions; they are
//! replayed onto a display snapshot one at a time, pausing for each
//! transition's `hint_ms` so clears and refills are visible.

use std::fs::File;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_match3::cli::Cli;
use tui_match3::core::{GameSnapshot, Transition};
use tui_match3::engine::{Engine, TracingObserver};
use tui_match3::input::{handle_key_event, mouse_click, should_quit, Cursor};
use tui_match3::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::{Coord, GameAction};

/// Input poll interval while idle.
const IDLE_POLL_MS: u64 = 250;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut engine = Engine::new(seed);
    engine.subscribe(Box::new(TracingObserver));
    // Validate before touching the terminal so config errors print normally.
    let snapshot = engine
        .new_game(cli.game_config())
        .context("cannot start game")?;
    info!(seed, "starting terminal game");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let view = GameView::default().with_ascii(cli.ascii);
    let result = run(&mut term, &view, &mut engine, snapshot);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let log_file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

struct Screen<'a> {
    term: &'a mut TerminalRenderer,
    view: &'a GameView,
    fb: FrameBuffer,
}

impl Screen<'_> {
    fn viewport() -> Viewport {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        Viewport::new(w, h)
    }

    fn draw(&mut self, snap: &GameSnapshot, cursor: Coord) -> Result<()> {
        self.view
            .render_into(snap, Some(cursor), Self::viewport(), &mut self.fb);
        self.term.draw_swap(&mut self.fb)
    }

    /// Step through `transitions`, redrawing and pausing after each.
    fn play(
        &mut self,
        display: &mut GameSnapshot,
        cursor: Coord,
        transitions: &[Transition],
    ) -> Result<()> {
        for t in transitions {
            display.apply(t);
            self.draw(display, cursor)?;
            if t.hint_ms > 0 {
                std::thread::sleep(Duration::from_millis(t.hint_ms as u64));
            }
        }
        // Drop input that piled up during the animation.
        while event::poll(Duration::ZERO)? {
            let _ = event::read()?;
        }
        Ok(())
    }
}

fn run(
    term: &mut TerminalRenderer,
    view: &GameView,
    engine: &mut Engine,
    mut display: GameSnapshot,
) -> Result<()> {
    let mut screen = Screen {
        term,
        view,
        fb: FrameBuffer::new(0, 0),
    };
    let mut cursor = Cursor::new(display.size);

    loop {
        screen.draw(&display, cursor.coord())?;

        if !event::poll(Duration::from_millis(IDLE_POLL_MS))? {
            continue;
        }

        let target = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(GameAction::Activate) => Some(cursor.coord()),
                    Some(GameAction::Restart) => {
                        display = engine.restart()?;
                        cursor.resize(display.size);
                        None
                    }
                    Some(action) => {
                        cursor.apply(action);
                        None
                    }
                    None => None,
                }
            }
            Event::Mouse(mouse) => mouse_click(mouse).and_then(|(x, y)| {
                view.hit_test(display.size, Screen::viewport(), x, y)
            }),
            Event::Resize(..) => {
                screen.term.invalidate();
                None
            }
            _ => None,
        };

        let Some(coord) = target else {
            continue;
        };
        cursor.set(coord);

        match engine.activate_tile(coord) {
            Ok(transitions) => {
                screen.play(&mut display, cursor.coord(), &transitions)?;
                if let Some(snap) = engine.snapshot() {
                    display = snap;
                }
            }
            Err(err) => warn!(%err, "activation rejected"),
        }
    }
}
