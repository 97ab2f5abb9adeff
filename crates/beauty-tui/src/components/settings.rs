//! Settings overlay for the store id sent with chat, inventory and compare requests.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use beauty_core::session::{Edit, Field};
use beauty_core::{Msg, Session};

use crate::action::Action;
use crate::components::help::centered_rect;
use crate::components::input::{edit_msg, render_input};
use crate::components::Component;
use crate::theme::Theme;

pub struct SettingsComponent {
    pub visible: bool,
}

impl SettingsComponent {
    pub fn new() -> Self {
        Self { visible: false }
    }
}

impl Default for SettingsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SettingsComponent {
    fn handle_action(&mut self, action: &Action, _session: &Session) -> Option<Msg> {
        match action {
            Action::ToggleSettings => {
                self.visible = !self.visible;
                None
            }
            _ if !self.visible => None,
            Action::SubmitForm | Action::Back => {
                self.visible = false;
                None
            }
            Action::ClearForm => Some(Msg::Edit {
                field: Field::StoreId,
                edit: Edit::Clear,
            }),
            other => edit_msg(other, Field::StoreId),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        if !self.visible {
            return;
        }

        let dialog = centered_rect(area, 50, 8);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .title(" Settings ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::accent()));
        let inner = block.inner(dialog);
        frame.render_widget(block, dialog);

        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).split(inner);
        render_input(
            frame,
            chunks[0],
            "Store ID",
            &session.store_id,
            "e.g. WH001",
            true,
        );
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "Used for chat, inventory and compare.",
                    Theme::dim(),
                )),
                Line::from(vec![
                    Span::styled("[Enter/Esc]", Theme::key_hint()),
                    Span::styled(" close", Theme::dim()),
                ]),
            ]),
            chunks[1],
        );
    }
}
