//! Category picker: the starting screen, with shortcuts to the side features.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use beauty_core::{Msg, Session, Stage};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

pub struct CategoriesComponent {
    /// Highlighted category.
    selected: usize,
}

impl CategoriesComponent {
    pub fn new() -> Self {
        Self { selected: 0 }
    }
}

impl Default for CategoriesComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CategoriesComponent {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Msg> {
        let count = session.categories.len();
        match action {
            Action::ScrollUp | Action::SelectPrev => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Action::ScrollDown | Action::SelectNext => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                None
            }
            Action::Confirm => session
                .categories
                .get(self.selected.min(count.saturating_sub(1)))
                .map(|c| Msg::SelectCategory(c.name.clone())),
            Action::OpenChat => Some(Msg::Navigate(Stage::Chat)),
            Action::OpenInventory => Some(Msg::Navigate(Stage::Inventory)),
            Action::OpenComparer => Some(Msg::Navigate(Stage::Comparer)),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let block = Block::default()
            .title(" Choose a Category ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Side features
            Constraint::Length(1), // Subtitle
            Constraint::Min(3),    // Category list
        ])
        .split(inner);

        let nav = Line::from(vec![
            Span::styled("[c]", Theme::key_hint()),
            Span::styled(" Custom Chat   ", Theme::normal()),
            Span::styled("[i]", Theme::key_hint()),
            Span::styled(" Inventory Check   ", Theme::normal()),
            Span::styled("[p]", Theme::key_hint()),
            Span::styled(" Product Comparer", Theme::normal()),
        ]);
        frame.render_widget(Paragraph::new(nav), chunks[0]);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Select the type of product you're looking for",
                Theme::muted(),
            )),
            chunks[1],
        );

        if session.categories.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled("Loading categories...", Theme::dim())),
                chunks[2],
            );
            return;
        }

        let items: Vec<ListItem> = session
            .categories
            .iter()
            .map(|category| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<14}", category.name), Theme::header()),
                    Span::styled(category.tagline(), Theme::muted()),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Theme::selection().patch(Theme::selected()))
            .highlight_symbol("› ");
        let mut state =
            ListState::default().with_selected(Some(self.selected.min(session.categories.len() - 1)));
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::render_to_string;
    use beauty_core::catalog::default_categories;

    fn session() -> Session {
        let mut session = Session::new("WH001");
        session.categories = default_categories();
        session
    }

    #[test]
    fn confirm_selects_highlighted_category() {
        let session = session();
        let mut component = CategoriesComponent::new();
        component.handle_action(&Action::ScrollDown, &session);
        component.handle_action(&Action::ScrollDown, &session);
        let msg = component.handle_action(&Action::Confirm, &session);
        assert!(matches!(msg, Some(Msg::SelectCategory(name)) if name == "Foundation"));
    }

    #[test]
    fn selection_stops_at_last_category() {
        let session = session();
        let mut component = CategoriesComponent::new();
        for _ in 0..20 {
            component.handle_action(&Action::ScrollDown, &session);
        }
        let msg = component.handle_action(&Action::Confirm, &session);
        assert!(matches!(msg, Some(Msg::SelectCategory(name)) if name == "Serum"));
    }

    #[test]
    fn shortcuts_navigate_to_side_features() {
        let session = session();
        let mut component = CategoriesComponent::new();
        assert!(matches!(
            component.handle_action(&Action::OpenComparer, &session),
            Some(Msg::Navigate(Stage::Comparer))
        ));
    }

    #[test]
    fn renders_taglines() {
        let text = render_to_string(&CategoriesComponent::new(), &session(), 80, 20);
        assert!(text.contains("Find your perfect eyeliner"));
        assert!(text.contains("Product Comparer"));
    }
}
