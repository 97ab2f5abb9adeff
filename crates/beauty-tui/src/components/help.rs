//! Help overlay: keybinding reference.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use beauty_core::{Msg, Session};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct HelpComponent {
    pub visible: bool,
}

impl HelpComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centered in `area`.
pub(crate) fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(height),
        Constraint::Min(0),
    ])
    .flex(Flex::Center)
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(width),
        Constraint::Min(0),
    ])
    .flex(Flex::Center)
    .split(vertical[1]);

    horizontal[1]
}

impl Component for HelpComponent {
    fn handle_action(&mut self, action: &Action, _session: &Session) -> Option<Msg> {
        match action {
            Action::ToggleHelp => self.visible = !self.visible,
            // Ticks keep flowing while help is open; anything else closes it.
            Action::Tick | Action::Completed(_) => {}
            _ if self.visible => self.visible = false,
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, _session: &Session) {
        if !self.visible {
            return;
        }

        let dialog = centered_rect(area, 60, 24);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Help: Keybindings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));

        let help_text = vec![
            Line::from(""),
            key_line("q / Ctrl+C", "Quit"),
            key_line("? / F1", "Toggle this help"),
            key_line("s / F2", "Store settings"),
            key_line("Esc", "Start over"),
            key_line("Up / Down / j / k", "Scroll / select"),
            key_line("Left / Right / h / l", "Choose option / browse"),
            key_line("Enter", "Confirm"),
            Line::from(""),
            Line::from(Span::styled("── Wizard ──", Theme::header())),
            Line::from(""),
            key_line("c / i / p", "Chat / inventory / comparer"),
            key_line("r", "Get recommendation (2+ answers)"),
            key_line("[ / ]", "Previous / next product card"),
            Line::from(""),
            Line::from(Span::styled("── Text boxes ──", Theme::header())),
            Line::from(""),
            key_line("Enter", "Send / check / compare"),
            key_line("Tab", "Switch comparer box"),
            key_line("Ctrl+W", "Delete word"),
            key_line("Ctrl+L", "Clear"),
        ];

        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, dialog);
    }
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<22}", key), Theme::selected()),
        Span::styled(desc, Theme::normal()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_key_closes_but_ticks_do_not() {
        let session = Session::new("WH001");
        let mut help = HelpComponent::new();
        help.handle_action(&Action::ToggleHelp, &session);
        assert!(help.visible);
        help.handle_action(&Action::Tick, &session);
        assert!(help.visible);
        help.handle_action(&Action::ScrollDown, &session);
        assert!(!help.visible);
    }
}
