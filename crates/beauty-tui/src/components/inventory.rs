//! Store inventory lookup.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use beauty_core::product::{format_price, InventoryResult};
use beauty_core::session::{Edit, Field};
use beauty_core::{Msg, Session};

use crate::action::Action;
use crate::components::input::{edit_msg, render_input};
use crate::components::{truncate, Component, SPINNER};
use crate::theme::Theme;

/// Rows per result: name, details, spacer.
const ROWS_PER_RESULT: u16 = 3;

pub struct InventoryComponent {
    scroll: u16,
    spinner: usize,
}

impl InventoryComponent {
    pub fn new() -> Self {
        Self {
            scroll: 0,
            spinner: 0,
        }
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }
}

impl Default for InventoryComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for InventoryComponent {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Msg> {
        match action {
            Action::Tick => {
                self.spinner = (self.spinner + 1) % SPINNER.len();
                None
            }
            Action::SubmitForm => {
                self.scroll = 0;
                Some(Msg::CheckInventory)
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(ROWS_PER_RESULT);
                None
            }
            Action::ScrollDown => {
                let max = (session.inventory_results.len() as u16)
                    .saturating_sub(1)
                    .saturating_mul(ROWS_PER_RESULT);
                self.scroll = self.scroll.saturating_add(ROWS_PER_RESULT).min(max);
                None
            }
            Action::ClearForm => Some(Msg::Edit {
                field: Field::InventoryQuery,
                edit: Edit::Clear,
            }),
            other => edit_msg(other, Field::InventoryQuery),
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);

        let title = format!("Product name or SKU (store {})", session.store_id);
        render_input(
            frame,
            chunks[0],
            &title,
            &session.inventory_input,
            "e.g. Velvet Matte Lipstick",
            true,
        );

        // The spinner sits in the title so earlier results stay readable.
        let mut title = vec![Span::styled(" Inventory ", Theme::title())];
        if session.inventory_loading {
            title.push(Span::styled(
                format!("{} Checking... ", SPINNER[self.spinner % SPINNER.len()]),
                Theme::muted(),
            ));
        }
        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_style(Theme::dim());
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        if session.inventory_results.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Enter a product name or SKU and press Enter.",
                    Theme::dim(),
                )),
                inner,
            );
            return;
        }

        let width = inner.width as usize;
        let lines: Vec<Line> = session
            .inventory_results
            .iter()
            .flat_map(|row| result_lines(row, width))
            .collect();
        frame.render_widget(Paragraph::new(lines).scroll((self.scroll, 0)), inner);
    }
}

fn result_lines(row: &InventoryResult, width: usize) -> Vec<Line<'static>> {
    let mut details = vec![Span::styled(format!("SKU: {}", row.sku), Theme::dim())];
    if !row.brand.is_empty() {
        details.push(Span::styled(format!("  {}", row.brand), Theme::muted()));
    }
    if let Some(mrp) = format_price(Some(row.mrp)) {
        details.push(Span::styled(format!("  MRP {mrp}"), Theme::price()));
    }

    let mut stock = vec![Span::styled(
        if row.is_in_stock {
            "In Stock"
        } else {
            "Out of Stock"
        },
        Theme::stock(row.is_in_stock),
    )];
    if row.is_in_stock {
        stock.push(Span::styled(
            format!(" ({} available)", row.quantity),
            Theme::muted(),
        ));
    }

    let mut name = vec![Span::styled(
        format!("{}  ", truncate(&row.name, width.saturating_sub(24))),
        Theme::header(),
    )];
    name.extend(stock);

    vec![Line::from(name), Line::from(details), Line::default()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::render_to_string;
    use beauty_core::Stage;

    fn row(name: &str, in_stock: bool, quantity: i64, mrp: f64) -> InventoryResult {
        InventoryResult {
            sku: format!("SKU-{name}"),
            name: name.to_string(),
            is_in_stock: in_stock,
            quantity,
            mrp,
            brand: "Kohl Co".into(),
        }
    }

    fn session() -> Session {
        let mut session = Session::new("WH007");
        session.stage = Stage::Inventory;
        session
    }

    #[test]
    fn rows_show_stock_quantity_and_mrp() {
        let mut session = session();
        session.inventory_results = vec![row("Kajal", true, 12, 199.0), row("Liner", false, 0, 0.0)];
        let text = render_to_string(&InventoryComponent::new(), &session, 80, 16);
        assert!(text.contains("In Stock (12 available)"));
        assert!(text.contains("MRP ₹199"));
        assert!(text.contains("Out of Stock"));
        assert!(!text.contains("(0 available)"));
        assert!(text.contains("store WH007"));
    }

    #[test]
    fn enter_checks_inventory() {
        let session = session();
        let mut component = InventoryComponent::new();
        assert!(matches!(
            component.handle_action(&Action::SubmitForm, &session),
            Some(Msg::CheckInventory)
        ));
        assert!(matches!(
            component.handle_action(&Action::ClearForm, &session),
            Some(Msg::Edit { field: Field::InventoryQuery, edit: Edit::Clear })
        ));
    }

    #[test]
    fn previous_results_stay_visible_while_checking() {
        let mut session = session();
        session.inventory_results = vec![row("Kajal", true, 4, 199.0)];
        session.inventory_loading = true;
        let text = render_to_string(&InventoryComponent::new(), &session, 80, 16);
        assert!(text.contains("Checking..."));
        assert!(text.contains("Kajal"));
        assert!(text.contains("In Stock (4 available)"));
    }

    #[test]
    fn scrolling_near_the_limit_does_not_overflow() {
        let mut session = session();
        session.inventory_results = vec![row("A", true, 1, 10.0), row("B", true, 1, 10.0)];
        let mut component = InventoryComponent::new();
        component.scroll = u16::MAX - 1;
        component.handle_action(&Action::ScrollDown, &session);
        assert_eq!(component.scroll, ROWS_PER_RESULT);
    }

    #[test]
    fn scrolling_stops_at_last_result() {
        let mut session = session();
        session.inventory_results = vec![row("A", true, 1, 10.0), row("B", true, 1, 10.0)];
        let mut component = InventoryComponent::new();
        for _ in 0..5 {
            component.handle_action(&Action::ScrollDown, &session);
        }
        assert_eq!(component.scroll, ROWS_PER_RESULT);
    }
}
