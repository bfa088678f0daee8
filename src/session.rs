use anyhow::{Context, Result};
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, Event};
use std::time::Duration;

use crate::app::{App, Redraw};

/// Terminal owned for the length of a review session
///
/// Raw mode and the alternate screen are restored when this is dropped, and
/// by ratatui's panic hook if the session panics.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        let terminal = ratatui::try_init().context("Failed to initialize terminal")?;
        log::debug!("Terminal acquired");
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        ratatui::restore();
        log::debug!("Terminal restored");
    }
}

/// Run the review loop until the session asks to quit
///
/// Each iteration waits at most `poll_interval` for one input event; when
/// none arrives the active mode gets an idle tick instead.
pub fn run(app: &mut App, poll_interval: Duration) -> Result<()> {
    let mut session = TerminalSession::enter()?;
    let terminal = &mut session.terminal;

    loop {
        match app.take_redraw() {
            Redraw::Full => terminal.clear().context("Failed to clear terminal")?,
            Redraw::Lines(rows) => log::trace!("Redrawing rows {:?}", rows),
            Redraw::Clean => {}
        }
        terminal
            .draw(|frame| app.draw(frame))
            .context("Failed to render terminal")?;

        if event::poll(poll_interval).context("Failed to poll terminal events")? {
            match event::read().context("Failed to read terminal event")? {
                Event::Key(key) => app.handle_key(key),
                Event::Resize(..) => {
                    terminal.autoresize().context("Failed to resize terminal")?;
                    app.handle_resize();
                }
                _ => {}
            }
        } else {
            app.update();
        }

        if app.should_quit {
            break;
        }
    }

    log::info!("Review session ended with {} clip(s) left", app.model.len());
    Ok(())
}
