//! Status bar at the bottom of the TUI. Also shows and expires error notices.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use beauty_core::{Msg, Session, Stage};

use crate::action::{Action, InputMode};
use crate::components::{truncate, Component};
use crate::theme::Theme;

pub struct StatusBarComponent {
    /// Letters are text while editing, so the key hints change with it.
    pub input_mode: InputMode,
    /// Ticks a notice stays on screen.
    notice_ticks: u32,
    /// Notice currently being timed, and for how long.
    timing: Option<(u64, u32)>,
}

impl StatusBarComponent {
    pub fn new(notice_ticks: u32) -> Self {
        Self {
            input_mode: InputMode::Normal,
            notice_ticks: notice_ticks.max(1),
            timing: None,
        }
    }

    fn stage_hint(session: &Session) -> &'static str {
        match session.stage {
            Stage::Categories => "Pick a category to start",
            Stage::Questions => "←/→ choose, Enter answer, r recommend",
            Stage::Recommendation => "Enter to find another product",
            Stage::Chat => "Enter send, ↑/↓ scroll, Esc start over",
            Stage::Inventory => "Enter check, Ctrl+L clear, Esc start over",
            Stage::Comparer => "Tab switch, Enter compare, Ctrl+L clear",
        }
    }
}

impl Component for StatusBarComponent {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Msg> {
        if !matches!(action, Action::Tick) {
            return None;
        }
        let Some(notice) = &session.notice else {
            self.timing = None;
            return None;
        };

        let elapsed = match self.timing {
            Some((id, ticks)) if id == notice.id => ticks + 1,
            _ => 0,
        };
        self.timing = Some((notice.id, elapsed));

        (elapsed >= self.notice_ticks).then_some(Msg::DismissNotice(notice.id))
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let width = area.width as usize;

        let hints = match self.input_mode {
            InputMode::Normal => "q·?·F2·Esc",
            InputMode::Editing => "Ctrl+C·F1·F2·Esc",
        };
        let hints_len = hints.chars().count() + 1;

        let badge = session.stage.label();
        let badge_len = badge.len() + 2;

        let budget = width
            .saturating_sub(badge_len)
            .saturating_sub(hints_len)
            .saturating_sub(4);

        let (msg, style) = match &session.notice {
            Some(notice) => (
                truncate(&format!("{}: {}", notice.title, notice.message), budget),
                Theme::notice(),
            ),
            None => (truncate(Self::stage_hint(session), budget), Theme::dim()),
        };

        let used = badge_len + 2 + msg.chars().count();
        let pad = width.saturating_sub(used + hints_len);

        let line = Line::from(vec![
            Span::styled(format!(" {badge} "), Theme::muted()),
            Span::styled("  ", Theme::dim()),
            Span::styled(msg, style),
            Span::raw(" ".repeat(pad)),
            Span::styled(hints, Theme::key_hint()),
            Span::raw(" "),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
