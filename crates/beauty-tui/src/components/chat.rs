//! Free-form chat with the beauty assistant.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use beauty_core::chat::{ChatMessage, Role};
use beauty_core::product::dedup_by_sku;
use beauty_core::session::{Edit, Field};
use beauty_core::{Msg, Session};

use crate::action::Action;
use crate::components::carousel::Carousel;
use crate::components::input::{edit_msg, render_input};
use crate::components::{Component, SPINNER};
use crate::theme::Theme;

pub struct ChatComponent {
    /// Lines scrolled up from the bottom of the transcript.
    scroll_back: u16,
    spinner: usize,
    carousel: Carousel,
}

impl ChatComponent {
    pub fn new() -> Self {
        Self {
            scroll_back: 0,
            spinner: 0,
            carousel: Carousel::new(),
        }
    }

    pub fn reset(&mut self) {
        self.scroll_back = 0;
        self.carousel.reset();
    }
}

impl Default for ChatComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ChatComponent {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Msg> {
        match action {
            Action::Tick => {
                self.spinner = (self.spinner + 1) % SPINNER.len();
                None
            }
            Action::SubmitForm => {
                self.scroll_back = 0;
                Some(Msg::SendChat)
            }
            Action::ScrollUp => {
                self.scroll_back = self.scroll_back.saturating_add(1);
                None
            }
            Action::ScrollDown => {
                self.scroll_back = self.scroll_back.saturating_sub(1);
                None
            }
            Action::PagePrev => {
                self.carousel.prev();
                None
            }
            Action::PageNext => {
                self.carousel
                    .next(dedup_by_sku(&session.chat_recommendations).len());
                None
            }
            Action::ClearForm => Some(Msg::Edit {
                field: Field::ChatMessage,
                edit: Edit::Clear,
            }),
            other => edit_msg(other, Field::ChatMessage),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let has_products = !session.chat_recommendations.is_empty();
        let chunks = Layout::vertical([
            Constraint::Min(5),
            Constraint::Length(if has_products { 9 } else { 0 }),
            Constraint::Length(3),
        ])
        .split(area);

        let block = Block::default()
            .title(" Beauty Assistant ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let mut lines: Vec<Line> = Vec::new();
        if session.chat.is_empty() {
            lines.push(Line::from(Span::styled(
                "Ask me anything about makeup, skincare or fragrance.",
                Theme::dim(),
            )));
        }
        for message in &session.chat {
            lines.extend(message_lines(message));
        }
        if session.chat_loading {
            lines.push(Line::from(Span::styled(
                format!("{} Thinking...", SPINNER[self.spinner % SPINNER.len()]),
                Theme::muted(),
            )));
        }

        // Stick to the bottom unless the user scrolled back.
        let total = wrapped_height(&lines, inner.width);
        let bottom = total.saturating_sub(inner.height);
        let scroll = bottom.saturating_sub(self.scroll_back);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0)),
            inner,
        );

        if has_products {
            self.carousel
                .render(frame, chunks[1], &session.chat_recommendations);
        }

        render_input(
            frame,
            chunks[2],
            "Message",
            &session.chat_input,
            "Type a message and press Enter",
            true,
        );
    }
}

fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let (who, style) = match message.role {
        Role::User => ("You", Theme::user_message()),
        Role::Assistant => ("Assistant", Theme::badge()),
    };
    let body_style = match message.role {
        Role::User => Theme::user_message(),
        Role::Assistant => Theme::assistant_message(),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(who, style),
        Span::styled(format!("  {}", message.sent_at.format("%H:%M")), Theme::dim()),
    ])];
    lines.extend(
        message
            .content
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), body_style))),
    );
    lines.push(Line::default());
    lines
}

/// Rows `lines` occupy once wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    rows.min(u16::MAX as usize) as u16
}
