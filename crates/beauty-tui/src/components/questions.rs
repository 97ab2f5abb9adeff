//! Preference questions for the chosen category.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use beauty_core::catalog::{AnswerSet, Question};
use beauty_core::{Msg, Session};

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Rows taken by one question: prompt, options, spacer.
const ROWS_PER_QUESTION: usize = 3;

pub struct QuestionsComponent {
    focus: usize,
    option: usize,
}

impl QuestionsComponent {
    pub fn new() -> Self {
        Self {
            focus: 0,
            option: 0,
        }
    }

    pub fn reset(&mut self) {
        self.focus = 0;
        self.option = 0;
    }

    fn focused<'a>(&self, session: &'a Session) -> Option<(usize, &'a Question)> {
        if session.questions.is_empty() {
            return None;
        }
        let index = self.focus.min(session.questions.len() - 1);
        Some((index, &session.questions[index]))
    }

    /// Put the option cursor on the current answer, or the first option.
    fn move_focus(&mut self, index: usize, session: &Session) {
        self.focus = index;
        self.option = session
            .questions
            .get(index)
            .and_then(|q| {
                let chosen = session.answers.get(&q.attribute)?;
                q.options.iter().position(|o| o == chosen)
            })
            .unwrap_or(0);
    }
}

impl Default for QuestionsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for QuestionsComponent {
    fn handle_action(&mut self, action: &Action, session: &Session) -> Option<Msg> {
        let (index, question) = self.focused(session)?;
        match action {
            Action::ScrollUp => {
                self.move_focus(index.saturating_sub(1), session);
                None
            }
            Action::ScrollDown => {
                if index + 1 < session.questions.len() {
                    self.move_focus(index + 1, session);
                }
                None
            }
            Action::SelectPrev => {
                self.option = self.option.saturating_sub(1);
                None
            }
            Action::SelectNext => {
                if self.option + 1 < question.options.len() {
                    self.option += 1;
                }
                None
            }
            Action::Confirm => {
                let option = question.options.get(self.option)?.clone();
                let msg = Msg::Answer {
                    attribute: question.attribute.clone(),
                    option,
                };
                // Move on to the next question once this one is answered.
                if index + 1 < session.questions.len() {
                    self.move_focus(index + 1, session);
                }
                Some(msg)
            }
            Action::Recommend => Some(Msg::RequestRecommendation),
            _ => None,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, session: &Session) {
        let title = match &session.selected_category {
            Some(category) => format!(" {category} "),
            None => " Questions ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .title_style(Theme::title())
            .borders(Borders::ALL)
            .border_style(Theme::dim());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(2), // Subtitle
            Constraint::Min(3),    // Questions
            Constraint::Length(1), // Footer
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Help us understand your preferences",
                Theme::muted(),
            )),
            chunks[0],
        );

        let focus = self.focused(session).map(|(i, _)| i);
        let mut lines = Vec::new();
        for (i, question) in session.questions.iter().enumerate() {
            let is_focused = focus == Some(i);
            let marker = if is_focused { "› " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(marker, Theme::selected()),
                Span::styled(
                    format!("{}. {}", i + 1, question.question),
                    if is_focused {
                        Theme::selected()
                    } else {
                        Theme::header()
                    },
                ),
            ]));
            lines.push(option_line(
                question,
                &session.answers,
                is_focused.then_some(self.option),
            ));
            lines.push(Line::default());
        }

        let height = chunks[1].height as usize;
        let bottom = (focus.unwrap_or(0) + 1) * ROWS_PER_QUESTION;
        let scroll = bottom.saturating_sub(height);
        frame.render_widget(
            Paragraph::new(lines).scroll((scroll as u16, 0)),
            chunks[1],
        );

        frame.render_widget(Paragraph::new(footer_line(session)), chunks[2]);
    }
}

fn option_line(question: &Question, answers: &AnswerSet, cursor: Option<usize>) -> Line<'static> {
    let chosen = answers.get(&question.attribute);
    let mut spans = vec![Span::raw("    ")];
    for (i, option) in question.options.iter().enumerate() {
        let picked = chosen == Some(option.as_str());
        let label = if picked {
            format!("[✓ {option}]")
        } else {
            format!("[ {option} ]")
        };
        let mut style = if picked {
            Theme::badge()
        } else {
            Theme::normal()
        };
        if cursor == Some(i) {
            style = style.patch(Theme::selection());
        }
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn footer_line(session: &Session) -> Line<'static> {
    if session.can_request_recommendation() {
        Line::from(vec![
            Span::styled("[r]", Theme::key_hint()),
            Span::styled(" Get Recommendation", Theme::normal()),
        ])
    } else {
        Line::from(Span::styled(
            format!(
                "Answer at least {min} questions ({answered}/{min})",
                min = AnswerSet::MIN_FOR_RECOMMENDATION,
                answered = session.answers.len(),
            ),
            Theme::dim(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::testing::render_to_string;
    use beauty_core::session::Stage;

    fn session() -> Session {
        let mut session = Session::new("WH001");
        session.stage = Stage::Questions;
        session.selected_category = Some("Lipgloss".into());
        session.questions = vec![
            Question {
                attribute: "finish".into(),
                question: "Which finish do you prefer?".into(),
                options: vec!["Glossy".into(), "Shimmer".into()],
            },
            Question {
                attribute: "tint".into(),
                question: "How much tint?".into(),
                options: vec!["Clear".into(), "Sheer".into(), "Full".into()],
            },
        ];
        session
    }

    #[test]
    fn confirm_answers_focused_question_and_advances() {
        let session = session();
        let mut component = QuestionsComponent::new();
        component.handle_action(&Action::SelectNext, &session);
        let msg = component.handle_action(&Action::Confirm, &session);
        assert!(matches!(
            msg,
            Some(Msg::Answer { ref attribute, ref option }) if attribute == "finish" && option == "Shimmer"
        ));

        component.handle_action(&Action::SelectNext, &session);
        component.handle_action(&Action::SelectNext, &session);
        component.handle_action(&Action::SelectNext, &session);
        let msg = component.handle_action(&Action::Confirm, &session);
        assert!(matches!(
            msg,
            Some(Msg::Answer { ref attribute, ref option }) if attribute == "tint" && option == "Full"
        ));
    }

    #[test]
    fn returning_to_answered_question_restores_cursor() {
        let mut session = session();
        session.answers.answer("finish", "Shimmer");
        let mut component = QuestionsComponent::new();
        component.handle_action(&Action::ScrollDown, &session);
        component.handle_action(&Action::ScrollUp, &session);
        let msg = component.handle_action(&Action::Confirm, &session);
        assert!(matches!(msg, Some(Msg::Answer { ref option, .. }) if option == "Shimmer"));
    }

    #[test]
    fn footer_counts_answers_until_enough() {
        let mut session = session();
        session.answers.answer("finish", "Glossy");
        let text = render_to_string(&QuestionsComponent::new(), &session, 80, 16);
        assert!(text.contains("Answer at least 2 questions (1/2)"));

        session.answers.answer("tint", "Sheer");
        let text = render_to_string(&QuestionsComponent::new(), &session, 80, 16);
        assert!(text.contains("Get Recommendation"));
        assert!(text.contains("[✓ Sheer]"));
    }
}
