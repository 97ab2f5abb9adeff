//! Horizontally paged strip of product cards.
//!
//! Entries are deduplicated by SKU before display. Paging moves one card
//! at a time and stops once the last card is visible.

use std::cell::Cell;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use beauty_core::product::{dedup_by_sku, format_price, FurtherRecommendation};

use crate::components::truncate;
use crate::theme::Theme;

/// Minimum width of one card, borders included.
const CARD_WIDTH: u16 = 30;

#[derive(Debug, Default)]
pub struct Carousel {
    offset: usize,
    /// Cards that fit at the last render. Written during render.
    visible: Cell<usize>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn prev(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Advance one card, given how many unique cards there are.
    pub fn next(&mut self, unique_len: usize) {
        let visible = self.visible.get().max(1);
        if self.offset + visible < unique_len {
            self.offset += 1;
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, items: &[FurtherRecommendation]) {
        let unique = dedup_by_sku(items);
        let per_row = ((area.width / CARD_WIDTH) as usize).max(1);
        self.visible.set(per_row);

        let offset = self.offset.min(unique.len().saturating_sub(per_row));
        let shown: Vec<&FurtherRecommendation> =
            unique.iter().skip(offset).take(per_row).copied().collect();

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(area);

        let can_prev = offset > 0;
        let can_next = offset + per_row < unique.len();
        let arrows = Line::from(vec![
            Span::styled("‹ prev", if can_prev { Theme::key_hint() } else { Theme::dim() }),
            Span::styled(
                format!("  {}-{} of {}  ", offset + 1, offset + shown.len(), unique.len()),
                Theme::muted(),
            ),
            Span::styled("next ›", if can_next { Theme::key_hint() } else { Theme::dim() }),
        ]);
        frame.render_widget(Paragraph::new(arrows), rows[0]);

        let columns =
            Layout::horizontal(vec![Constraint::Ratio(1, per_row as u32); per_row]).split(rows[1]);
        for (item, column) in shown.iter().zip(columns.iter()) {
            render_card(frame, *column, item);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, item: &FurtherRecommendation) {
    let width = area.width.saturating_sub(2) as usize;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let mut lines = Vec::new();
    if !item.reason.is_empty() {
        lines.push(Line::from(Span::styled(
            truncate(&item.reason, width),
            Theme::badge(),
        )));
    }
    lines.push(Line::from(Span::styled(
        truncate(&item.name, width),
        Theme::header(),
    )));
    lines.push(Line::from(Span::styled(
        truncate(&item.brand, width),
        Theme::muted(),
    )));
    if let Some(price) = format_price(item.price) {
        lines.push(Line::from(Span::styled(price, Theme::price())));
    }
    lines.push(Line::from(Span::styled(
        truncate(&format!("SKU: {}", item.sku_id), width),
        Theme::dim(),
    )));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}
