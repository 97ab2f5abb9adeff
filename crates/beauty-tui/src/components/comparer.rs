//! Side-by-side product comparison with the service's written analysis.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use beauty_core::analysis::{format_analysis, Block as AnalysisBlock};
use beauty_core::product::{format_price, ProductDetail};
use beauty_core::session::Field;
use beauty_core::{Msg, Session};

use crate::action::Action;
use crate::components::input::{edit_msg, render_input};
use crate::components::{Component, SPINNER};
use crate::theme::Theme;

/// Colors listed per product card.
const MAX_COLORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    First,
    Second,
}

impl Focus {
    fn field(self) -> Field {
        match self {
            Focus::First => Field::CompareFirst,
            Focus::Second => Field::CompareSecond,
        }
    }

    fn toggle(self) -> Self {
        match self {
            Focus::First => Focus::Second,
            Focus::Second => Focus::First,
        }
    }
}

pub struct ComparerComponent {
    focus: Focus,
    scroll: u16,
    spinner: usize,
}

impl ComparerComponent {
    pub fn new() -> Self {
        Self {
            focus: Focus::First,
            scroll: 0,
            spinner: 0,
        }
    }

    pub fn reset(&mut self) {
        self.focus = Focus::First;
        self.scroll = 0;
    }
}

impl Default for ComparerComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ComparerComponent {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Msg> {
        match action {
            Action::Tick => {
                self.spinner = (self.spinner + 1) % SPINNER.len();
                None
            }
            Action::SwitchInputField => {
                self.focus = self.focus.toggle();
                None
            }
            Action::SubmitForm => {
                // Enter on the first box moves on while the second is still empty.
                if self.focus == Focus::First && session.compare_second.trim().is_empty() {
                    self.focus = Focus::Second;
                    return None;
                }
                self.scroll = 0;
                Some(Msg::Compare)
            }
            Action::ClearForm => {
                self.reset();
                Some(Msg::ClearComparison)
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            Action::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                None
            }
            other => edit_msg(other, self.focus.field()),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(5)]).split(area);
        let inputs = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        render_input(
            frame,
            inputs[0],
            "First product",
            &session.compare_first,
            "Name or SKU",
            self.focus == Focus::First,
        );
        render_input(
            frame,
            inputs[1],
            "Second product",
            &session.compare_second,
            "Name or SKU",
            self.focus == Focus::Second,
        );

        let mut title = vec![Span::styled(" Product Comparer ", Theme::title())];
        if session.compare_loading {
            title.push(Span::styled(
                format!("{} Comparing... ", SPINNER[self.spinner % SPINNER.len()]),
                Theme::muted(),
            ));
        }
        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Theme::dim());
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let Some(comparison) = &session.comparison else {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(Span::styled(
                        "Enter two products and press Enter to compare.",
                        Theme::dim(),
                    )),
                    Line::from(vec![
                        Span::styled("[Tab]", Theme::key_hint()),
                        Span::styled(" switch box  ", Theme::dim()),
                        Span::styled("[Ctrl+L]", Theme::key_hint()),
                        Span::styled(" clear", Theme::dim()),
                    ]),
                ]),
                inner,
            );
            return;
        };

        let body = Layout::vertical([Constraint::Length(9), Constraint::Min(3)]).split(inner);
        let cards = Layout::horizontal([
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Min(10),
        ])
        .split(body[0]);

        render_product(frame, cards[0], comparison.product1.as_ref());
        let vs_row = Rect {
            y: cards[1].y + cards[1].height / 2,
            height: 1,
            ..cards[1]
        };
        frame.render_widget(
            Paragraph::new(Span::styled("VS", Theme::title())).alignment(Alignment::Center),
            vs_row,
        );
        render_product(frame, cards[2], comparison.product2.as_ref());

        let mut lines = vec![Line::from(Span::styled("Expert Analysis", Theme::title()))];
        match comparison.analysis.as_deref() {
            Some(text) if !text.trim().is_empty() => lines.extend(analysis_lines(text)),
            _ => lines.push(Line::from(Span::styled(
                "No analysis available.",
                Theme::dim(),
            ))),
        }
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            body[1],
        );
    }
}

fn render_product(frame: &mut Frame, area: Rect, product: Option<&ProductDetail>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let Some(product) = product else {
        frame.render_widget(
            Paragraph::new(Span::styled("No details", Theme::dim())).block(block),
            area,
        );
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(product.name.clone(), Theme::header())),
        Line::from(Span::styled(product.brand.clone(), Theme::muted())),
    ];
    if let Some(price) = format_price(product.price) {
        lines.push(Line::from(Span::styled(price, Theme::price())));
    }
    if let Some(category) = &product.category {
        lines.push(Line::from(Span::styled(category.clone(), Theme::badge())));
    }
    if !product.colors.is_empty() {
        let colors: Vec<&str> = product
            .colors
            .iter()
            .take(MAX_COLORS)
            .map(String::as_str)
            .collect();
        lines.push(Line::from(vec![
            Span::styled("Colors: ", Theme::dim()),
            Span::styled(colors.join(", "), Theme::normal()),
        ]));
    }
    if let Some(finish) = product.finishes.first() {
        lines.push(Line::from(vec![
            Span::styled("Finish: ", Theme::dim()),
            Span::styled(finish.clone(), Theme::normal()),
        ]));
    }
    if !product.sku_id.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("SKU: {}", product.sku_id),
            Theme::dim(),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn analysis_lines(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in format_analysis(text) {
        match block {
            AnalysisBlock::Heading(title) => {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(title, Theme::header())));
            }
            AnalysisBlock::Bullet(item) => lines.push(Line::from(vec![
                Span::styled("  • ", Theme::badge()),
                Span::styled(item, Theme::normal()),
            ])),
            AnalysisBlock::Paragraph(para) => {
                lines.push(Line::from(Span::styled(para, Theme::normal())))
            }
        }
    }
    lines
}
