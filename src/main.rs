//! Terminal falling-block game (default binary).
//!
//! Configuration comes from the environment:
//!
//! - `BLOCKFALL_USERNAME`: record key (defaults to `USER`, then "player")
//! - `BLOCKFALL_MAX_LEVEL`, `BLOCKFALL_FALL_DELAY_MS`, `BLOCKFALL_FALL_DELAY_STEP_MS`, `BLOCKFALL_SEED`
//! - `BLOCKFALL_RECORDS_PATH`: records file (default `blockfall-records.json`)
//! - `BLOCKFALL_LOG_PATH`: enable logging to this file; level from `BLOCKFALL_LOG`

use std::env;
use std::fs::File;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, warn};

use tui_blockfall::core::{
    env_u32, GameConfig, GameController, MemoryRecordStore, RecordStore, SEED_VAR,
};
use tui_blockfall::input::{handle_command_key, handle_key_event, Command};
use tui_blockfall::store::{JsonFileStore, DEFAULT_RECORDS_FILE};
use tui_blockfall::term::{FrameBuffer, GameView, Screen, TerminalRenderer, Viewport};
use tui_blockfall::types::{Outcome, FRAME_MS};

type Game = GameController<Box<dyn RecordStore>, Screen>;

fn main() -> Result<()> {
    init_logging()?;

    let mut config = GameConfig::from_env();
    if env_u32(SEED_VAR).is_none() {
        config.seed = clock_seed();
    }
    let records_path =
        env::var("BLOCKFALL_RECORDS_PATH").unwrap_or_else(|_| DEFAULT_RECORDS_FILE.to_string());
    let store: Box<dyn RecordStore> = match JsonFileStore::open(&records_path) {
        Ok(store) => {
            info!("records at {}", store.path().display());
            Box::new(store)
        }
        Err(err) => {
            warn!("{:#}; records will not be kept", err);
            Box::new(MemoryRecordStore::new())
        }
    };

    let screen = Screen::new(config.username.clone());
    let mut game = GameController::new(config, store, screen);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = env::var("BLOCKFALL_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("BLOCKFALL_LOG", "info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(FRAME_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let running = game.is_running();
        game.renderer_mut().set_running(running);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(game.renderer(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = frame.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = handle_command_key(key) {
                        match command {
                            Command::Quit => {
                                game.stop(None);
                                return Ok(());
                            }
                            Command::Toggle if game.is_running() => {
                                game.stop(Some(Outcome::Defeat))
                            }
                            Command::Toggle | Command::Restart => game.start(),
                        }
                    } else if let Some(action) = handle_key_event(key) {
                        debug!("input {}", action.as_str());
                        game.tick(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            game.update(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
        }
    }
}
