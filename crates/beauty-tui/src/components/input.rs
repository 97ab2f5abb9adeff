//! Single-line text inputs shared by the chat, inventory, comparer and settings views.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use beauty_core::session::{Edit, Field};
use beauty_core::Msg;

use crate::action::Action;
use crate::theme::Theme;

/// Translate a text-editing action into an edit of `field`.
pub fn edit_msg(action: &Action, field: Field) -> Option<Msg> {
    let edit = match action {
        Action::CharInput(c) => Edit::Insert(*c),
        Action::BackspaceInput => Edit::Backspace,
        Action::DeleteWord => Edit::DeleteWord,
        // Inputs are single-line; pasted newlines become spaces.
        Action::PasteBulk(text) => Edit::InsertStr(text.replace(['\r', '\n'], " ")),
        _ => return None,
    };
    Some(Msg::Edit { field, edit })
}

/// Draw a bordered input box. The focused box gets an accent border and a cursor.
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let border = if focused {
        Theme::focused_border()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(if focused { Theme::title() } else { Theme::muted() })
        .borders(Borders::ALL)
        .border_style(border);

    let inner_width = area.width.saturating_sub(2) as usize;
    let line = if value.is_empty() {
        Line::from(Span::styled(placeholder.to_string(), Theme::dim()))
    } else {
        // Keep the tail visible when the text is wider than the box.
        let chars: Vec<char> = value.chars().collect();
        let start = chars.len().saturating_sub(inner_width.saturating_sub(1));
        let visible: String = chars[start..].iter().collect();
        Line::from(Span::styled(visible, Theme::normal()))
    };

    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused {
        let shown = value.chars().count().min(inner_width.saturating_sub(1));
        frame.set_cursor_position((area.x + 1 + shown as u16, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_actions_become_edits() {
        let msg = edit_msg(&Action::CharInput('k'), Field::InventoryQuery);
        assert!(matches!(
            msg,
            Some(Msg::Edit { field: Field::InventoryQuery, edit: Edit::Insert('k') })
        ));
        assert!(edit_msg(&Action::Confirm, Field::InventoryQuery).is_none());
    }

    #[test]
    fn pasted_newlines_are_flattened() {
        let msg = edit_msg(&Action::PasteBulk("red\nmatte".into()), Field::ChatMessage);
        match msg {
            Some(Msg::Edit { edit: Edit::InsertStr(text), .. }) => assert_eq!(text, "red matte"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
