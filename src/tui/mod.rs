//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the current
//! list, and routes keyboard events to it.
//!
//! ```text
//! Screens ──(selection)──► mpsc::Sender<Navigation> ──► event loop ──► NavigationStack
//!    │                                                       │
//!    └── tokio::spawn(client.request) ──► Completion ──► ListController::poll
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Loading**: wakes every ~80ms so arriving items show up promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.

pub mod cell;
pub mod component;
pub mod components;
pub mod event;
pub mod navigation;
pub mod screen;
pub mod screens;
mod ui;

use log::{debug, info};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::StartScreen;
use crate::core::config::ResolvedConfig;
use crate::github::{GithubClient, ReqwestTransport, TokenAuth};
use crate::tui::component::EventHandler;
use crate::tui::components::ListEvent;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::navigation::NavigationStack;
use crate::tui::screens::{Navigation, Screens};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, Hide)?;
        info!("Terminal modes enabled (mouse, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, Show);
    }
}

/// Builds the API client from resolved credentials.
pub fn build_client(config: &ResolvedConfig) -> io::Result<GithubClient> {
    let token = config.token.clone().ok_or_else(|| {
        io::Error::other(
            "GitHub token must be set (GITHUB_TOKEN env var or [github] token in ~/.ghissues/config.toml)",
        )
    })?;
    GithubClient::new(
        Arc::new(ReqwestTransport::new()),
        &config.base_url,
        TokenAuth::new(token),
        config.user_agent.clone(),
    )
    .map_err(io::Error::other)
}

/// What the loop should do after an event.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn dispatch(stack: &mut NavigationStack, event: &TuiEvent) -> Flow {
    match event {
        TuiEvent::Quit | TuiEvent::ForceQuit => Flow::Quit,
        TuiEvent::Resize => Flow::Continue,
        _ => match stack.top_mut().handle_event(event) {
            Some(ListEvent::Back) => {
                if stack.pop() {
                    Flow::Continue
                } else {
                    Flow::Quit
                }
            }
            Some(ListEvent::Selected(index)) => {
                debug!("Selected row {index} of '{}'", stack.top().title());
                Flow::Continue
            }
            _ => Flow::Continue,
        },
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let client = Arc::new(build_client(&config)?);
    let (tx, rx) = mpsc::channel();
    let screens = Screens::new(client, tx);
    let root = match config.start {
        StartScreen::Repos => screens.repositories(config.user.clone()),
        StartScreen::Orgs => screens.organizations(),
    };
    let mut stack = NavigationStack::new(root);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_guard| event_loop(&mut terminal, &mut stack, &rx));
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    stack: &mut NavigationStack,
    rx: &mpsc::Receiver<Navigation>,
) -> io::Result<()> {
    let mut needs_redraw = true;

    loop {
        // Lists pushed by selection callbacks
        while let Ok(Navigation::Push(list)) = rx.try_recv() {
            info!("Presenting '{}'", list.title());
            stack.push(list);
            needs_redraw = true;
        }

        if stack.poll() {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, stack))?;
            needs_redraw = false;
        }

        let timeout = if stack.top().is_loading() {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };

        // First event waits, the rest drain before the next draw
        let mut pending = poll_event_timeout(timeout)?;
        while let Some(event) = pending {
            needs_redraw = true;
            if dispatch(stack, &event) == Flow::Quit {
                info!("Quitting at depth {}", stack.depth());
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }
    }
}
