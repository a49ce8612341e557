// Preview module - terminal rendition of the navbar and hero
//
// This module manages the terminal using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (mouse and keyboard input, timer deadlines)
// - Translating terminal input into page events and interactions

pub mod app;
pub mod layout;
pub mod ui;

use crate::config::Config;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::PreviewApp;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::time::Instant;

/// Longest the loop waits for input before redrawing
const INPUT_POLL: Duration = Duration::from_millis(16);

/// Run the preview
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, including when the loop fails.
pub async fn run_preview(config: Config, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = PreviewApp::new(&config, log_buffer);
    tracing::info!(
        "Preview started ({} dropdown, reveal after {}ms)",
        config.dropdown.activation.as_str(),
        config.reveal.delay_ms
    );

    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Each pass brings the page clock up to wall time, draws, then waits for
/// whichever comes first: terminal input or the next instant the picture
/// changes on its own (a timer deadline or a staggered element start).
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut PreviewApp,
) -> Result<()> {
    let origin = Instant::now();

    loop {
        app.sync_clock(origin.elapsed());

        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        let wake = app.next_wake();

        tokio::select! {
            _ = sleep_until_deadline(origin, wake) => {}

            input = poll_input(INPUT_POLL) => {
                match input {
                    Some(Event::Key(key_event)) => handle_key_event(app, key_event),
                    Some(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                    _ => {}
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Sleep until `deadline` on the virtual clock anchored at `origin`
///
/// With no deadline this never completes, leaving the other branch to wake
/// the loop.
pub async fn sleep_until_deadline(origin: Instant, deadline: Option<Duration>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(origin + deadline).await,
        None => std::future::pending().await,
    }
}

async fn poll_input(timeout: Duration) -> Option<Event> {
    if event::poll(timeout).unwrap_or(false) {
        event::read().ok()
    } else {
        None
    }
}

/// Handle keyboard input
fn handle_key_event(app: &mut PreviewApp, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('r') | KeyCode::Char('R') => {
            tracing::info!("Remounting page");
            app.remount();
        }
        KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_dropdown(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
        _ => {}
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut PreviewApp, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollDown => app.scroll_down(),
        MouseEventKind::ScrollUp => app.scroll_up(),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer_moved(mouse_event.column, mouse_event.row)
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.pointer_pressed(mouse_event.column, mouse_event.row)
        }
        _ => {}
    }
}
