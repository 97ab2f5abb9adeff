//! The recommended product, its match score, and the alternatives carousel.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use beauty_core::product::{dedup_by_sku, format_price, format_score, match_fraction};
use beauty_core::{Msg, Session};

use crate::action::Action;
use crate::components::carousel::Carousel;
use crate::components::Component;
use crate::theme::Theme;

pub struct RecommendationComponent {
    carousel: Carousel,
}

impl RecommendationComponent {
    pub fn new() -> Self {
        Self {
            carousel: Carousel::new(),
        }
    }

    pub fn reset(&mut self) {
        self.carousel.reset();
    }
}

impl Default for RecommendationComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for RecommendationComponent {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Msg> {
        match action {
            Action::SelectPrev | Action::PagePrev => {
                self.carousel.prev();
                None
            }
            Action::SelectNext | Action::PageNext => {
                let unique = dedup_by_sku(&session.further_recommendations).len();
                self.carousel.next(unique);
                None
            }
            Action::Confirm => Some(Msg::StartOver),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let block = Block::default()
            .title(" Perfect Match Found! ")
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(product) = &session.recommendation else {
            frame.render_widget(
                Paragraph::new(Span::styled("No recommendation yet.", Theme::dim())),
                inner,
            );
            return;
        };

        let has_more = !session.further_recommendations.is_empty();
        let chunks = Layout::vertical([
            Constraint::Length(5), // Product
            Constraint::Length(1), // Score bar
            Constraint::Length(2), // Caption
            Constraint::Min(if has_more { 9 } else { 0 }),
            Constraint::Length(1), // Footer
        ])
        .split(inner);

        let mut details = vec![
            Line::from(Span::styled(product.name.clone(), Theme::header())),
            Line::from(Span::styled(product.brand.clone(), Theme::muted())),
        ];
        if let Some(price) = format_price(product.price) {
            details.push(Line::from(Span::styled(price, Theme::price())));
        }
        if !product.sku_id.is_empty() {
            details.push(Line::from(Span::styled(
                format!("SKU: {}", product.sku_id),
                Theme::dim(),
            )));
        }
        frame.render_widget(Paragraph::new(details), chunks[0]);

        let asked = session.questions.len();
        let fraction = match_fraction(product.score, asked);
        let gauge = Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(Theme::score_color(fraction))
                    .bg(Theme::border_color()),
            )
            .ratio(fraction)
            .label(Span::styled(
                format!("{:.0}% match", fraction * 100.0),
                Theme::header(),
            ));
        frame.render_widget(gauge, chunks[1]);

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(
                    "{} out of {} features matched",
                    format_score(product.score),
                    asked
                ),
                Theme::muted(),
            )),
            chunks[2],
        );

        if has_more {
            let more = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).split(chunks[3]);
            frame.render_widget(
                Paragraph::new(Span::styled("More Options for You", Theme::title())),
                more[0],
            );
            self.carousel
                .render(frame, more[1], &session.further_recommendations);
        }

        let footer = Line::from(vec![
            Span::styled("[Enter]", Theme::key_hint()),
            Span::styled(" Find Another Product  ", Theme::normal()),
            Span::styled("[←/→]", Theme::key_hint()),
            Span::styled(" Browse", Theme::normal()),
        ]);
        frame.render_widget(Paragraph::new(footer), chunks[4]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::render_to_string;
    use beauty_core::catalog::Question;
    use beauty_core::product::{FurtherRecommendation, Recommendation};
    use beauty_core::Stage;

    fn session(questions: usize) -> Session {
        let mut session = Session::new("WH001");
        session.stage = Stage::Recommendation;
        session.questions = (0..questions)
            .map(|i| Question {
                attribute: format!("attr{i}"),
                question: format!("Question {i}?"),
                options: vec!["Yes".into()],
            })
            .collect();
        session.recommendation = Some(Recommendation {
            name: "Silk Glow Foundation".into(),
            price: Some(1299.0),
            score: 3.0,
            sku_id: "FD-7".into(),
            main_image: String::new(),
            brand: "Aura".into(),
        });
        session
    }

    #[test]
    fn shows_score_against_question_count() {
        let text = render_to_string(&RecommendationComponent::new(), &session(5), 80, 24);
        assert!(text.contains("Silk Glow Foundation"));
        assert!(text.contains("₹1299"));
        assert!(text.contains("3 out of 5 features matched"));
        assert!(text.contains("60% match"));
        assert!(!text.contains("More Options for You"));
    }

    #[test]
    fn zero_questions_shows_empty_bar() {
        let text = render_to_string(&RecommendationComponent::new(), &session(0), 80, 24);
        assert!(text.contains("3 out of 0 features matched"));
        assert!(text.contains("0% match"));
    }

    #[test]
    fn alternatives_render_below_match() {
        let mut session = session(4);
        session.further_recommendations = vec![FurtherRecommendation {
            name: "Dew Tint".into(),
            sku_id: "FD-9".into(),
            main_image: String::new(),
            brand: "Aura".into(),
            price: None,
            reason: "Lighter coverage".into(),
        }];
        let text = render_to_string(&RecommendationComponent::new(), &session, 80, 24);
        assert!(text.contains("More Options for You"));
        assert!(text.contains("Dew Tint"));
    }

    #[test]
    fn confirm_starts_over() {
        let mut component = RecommendationComponent::new();
        assert!(matches!(
            component.handle_action(&Action::Confirm, &session(2)),
            Some(Msg::StartOver)
        ));
    }
}
