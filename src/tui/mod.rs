//! # TUI Adapter
//!
//! The ratatui-specific layer. Owns the terminal, renders the shell's
//! surfaces, and turns key presses into screen actions.
//!
//! This is the only module that knows about ratatui and crossterm. The
//! coordinator graph underneath only sees view handles and ports.
//!
//! ## Event Loop
//!
//! Everything runs on one thread inside a `LocalSet`. Coordinators queue
//! their response awaits on the shell; the loop spawns them locally so they
//! make progress between ticks. Each tick:
//!
//! 1. spawns queued tasks, yields to local tasks, then runs one main-queue
//!    turn (finalization)
//! 2. redraws if the shell was marked dirty
//! 3. polls for input (up to 50ms) and drains everything pending

mod component;
mod components;
mod event;
pub mod flows;
pub mod screen;
mod ui;

use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use log::{debug, info};
use ratatui::DefaultTerminal;

use crate::core::config::ResolvedConfig;
use crate::core::main_queue;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::flows::{Shell, launch};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Upper bound on main-queue turns spent settling finalizations at exit.
const SHUTDOWN_TURNS: usize = 16;

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (cursor hidden)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Run the demo until the user quits. Must be awaited inside a `LocalSet`.
pub async fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let shell = Shell::new(config.motion());
    let root = launch(&shell);
    info!("Demo started (animations: {})", shell.motion.allows_animation());

    let mut terminal = ratatui::init();
    let result = match TerminalModeGuard::new() {
        Ok(_guard) => event_loop(&mut terminal, &shell).await,
        Err(e) => Err(e),
    };
    ratatui::restore();

    shell.teardown();
    drop(root);
    let turns = main_queue::run_until_idle(SHUTDOWN_TURNS);
    debug!("Shutdown settled in {} main-queue turn(s)", turns);
    result
}

async fn event_loop(terminal: &mut DefaultTerminal, shell: &Shell) -> std::io::Result<()> {
    loop {
        shell.spawn_deferred();
        main_queue::yield_turn().await;

        if shell.take_dirty() {
            terminal.draw(|f| ui::draw_ui(f, shell))?;
        }

        let first_event = poll_event_timeout(POLL_INTERVAL);
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if !dispatch(shell, event) {
                info!("Quit requested");
                return Ok(());
            }
        }
    }
}

/// Apply one event to the shell. Returns `false` when the loop should stop.
fn dispatch(shell: &Shell, event: TuiEvent) -> bool {
    match event {
        TuiEvent::Quit => return false,
        TuiEvent::Back => {
            if !shell.back() {
                debug!("Back ignored, nothing to dismiss");
            }
        }
        TuiEvent::Key(key) => {
            if !shell.activate(key) {
                debug!("No action bound to {:?}", key);
            }
        }
        TuiEvent::Resize => shell.mark_dirty(),
    }
    true
}
