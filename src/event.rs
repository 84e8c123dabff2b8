use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

/// Application events
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Text was pasted into the terminal
    Paste(String),
    /// No input arrived within the tick rate (drives the note autosave)
    Tick,
}

/// Poll for events with a timeout.
///
/// Returns `Some(AppEvent)` if an event occurred, or `None` if no relevant event.
pub fn poll_event(tick_rate: Duration) -> color_eyre::Result<Option<AppEvent>> {
    if event::poll(tick_rate)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
            Event::Paste(text) => Ok(Some(AppEvent::Paste(text))),
            _ => Ok(None),
        }
    } else {
        Ok(Some(AppEvent::Tick))
    }
}
