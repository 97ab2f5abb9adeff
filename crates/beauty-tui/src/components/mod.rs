//! Component trait and all TUI components.
//!
//! Components own view-only state (cursor, scroll offset, focus). The
//! data they show lives in the shared `Session`; a component changes it
//! only by returning a `Msg`.

pub mod carousel;
pub mod categories;
pub mod chat;
pub mod comparer;
pub mod help;
pub mod input;
pub mod inventory;
pub mod questions;
pub mod recommendation;
pub mod settings;
pub mod status_bar;

use ratatui::layout::Rect;
use ratatui::Frame;

use beauty_core::{Msg, Session};

use crate::action::Action;

/// Braille spinner frames.
pub const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Trait implemented by all TUI components.
pub trait Component {
    /// Handle an action and optionally return a session message to apply.
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Msg> {
        let _ = (action, session);
        None
    }

    /// Render the component into the given area.
    fn render(&self, frame: &mut Frame, area: Rect, session: &Session);
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len < 4 {
        return s.chars().take(max_len).collect();
    }
    let kept: String = s.chars().take(max_len - 3).collect();
    format!("{kept}...")
}

#[cfg(test)]
pub(crate) mod testing {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::Component;
    use beauty_core::Session;

    /// Render `component` into an off-screen buffer and return its text, one row per line.
    pub fn render_to_string(
        component: &dyn Component,
        session: &Session,
        width: u16,
        height: u16,
    ) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
        terminal
            .draw(|frame| component.render(frame, frame.area(), session))
            .expect("draw");
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("Kajal", 10), "Kajal");
        assert_eq!(truncate("Highlighter Palette", 10), "Highlig...");
        assert_eq!(truncate("₹₹₹₹₹₹", 5), "₹₹...");
    }
}
