use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use unicode_width::UnicodeWidthChar;

use super::util::{panel_block, KeyHandleResult, Shortcut};
use crate::task_manager::{TaskManager, PLACEHOLDER};

const BUTTON_WIDTH: u16 = 9;

/// Text field plus the Add button.
#[derive(Default)]
pub struct InputPanel {
    /// Screen areas from the last render, used for mouse hits
    field_area: Rect,
    button_area: Rect,
}

impl InputPanel {
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        task_manager: &TaskManager,
    ) {
        let [field_area, button_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(BUTTON_WIDTH)])
                .spacing(1)
                .areas(area);
        self.field_area = field_area;
        self.button_area = button_area;

        let title = if task_manager.editing().is_some() {
            " Edit Task "
        } else {
            " New Task "
        };
        let block = panel_block(title, focused);
        let inner = block.inner(field_area);
        frame.render_widget(block, field_area);

        let input = task_manager.input();
        // Last column is kept free for the cursor
        let available_width = inner.width.saturating_sub(1) as usize;
        let (scroll, cursor_col) = visible_window(input.text(), input.cursor(), available_width);

        if input.is_empty() {
            let hint = Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray));
            frame.render_widget(Paragraph::new(hint), inner);
        } else {
            let visible_text: String = input.text().chars().skip(scroll).collect();
            let text = Span::styled(visible_text, Style::default().fg(Color::White));
            frame.render_widget(Paragraph::new(text), inner);
        }

        if focused {
            let cursor_x = inner.x + cursor_col as u16;
            if cursor_x < inner.x + inner.width {
                frame.set_cursor_position((cursor_x, inner.y));
            }
        }

        let button = Paragraph::new(Span::styled(
            "Add",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(panel_block("", false));
        frame.render_widget(button, button_area);
    }

    pub fn handle_key(&mut self, key: KeyEvent, task_manager: &mut TaskManager) -> KeyHandleResult {
        let input = task_manager.input_mut();
        match key.code {
            KeyCode::Enter => KeyHandleResult::Submit,
            KeyCode::Esc => KeyHandleResult::FocusTasks,
            KeyCode::Backspace => {
                input.backspace();
                KeyHandleResult::Consumed
            }
            KeyCode::Delete => {
                input.delete();
                KeyHandleResult::Consumed
            }
            KeyCode::Left => {
                input.move_left();
                KeyHandleResult::Consumed
            }
            KeyCode::Right => {
                input.move_right();
                KeyHandleResult::Consumed
            }
            KeyCode::Home => {
                input.move_home();
                KeyHandleResult::Consumed
            }
            KeyCode::End => {
                input.move_end();
                KeyHandleResult::Consumed
            }
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                input.insert(c);
                KeyHandleResult::Consumed
            }
            _ => KeyHandleResult::Ignored,
        }
    }

    pub fn hits_button(&self, position: Position) -> bool {
        self.button_area.contains(position)
    }

    pub fn hits_field(&self, position: Position) -> bool {
        self.field_area.contains(position)
    }

    pub fn shortcuts(&self) -> Vec<Shortcut> {
        vec![
            Shortcut {
                key: "Enter",
                description: "Add",
            },
            Shortcut {
                key: "Esc",
                description: "Back to List",
            },
        ]
    }
}

/// First visible character and the cursor's display column, scrolling so
/// the text before the cursor fits in `width` columns.
fn visible_window(text: &str, cursor: usize, width: usize) -> (usize, usize) {
    let widths: Vec<usize> = text
        .chars()
        .take(cursor)
        .map(|c| c.width().unwrap_or(0))
        .collect();
    let mut scroll = 0;
    let mut col: usize = widths.iter().sum();
    while col > width && scroll < widths.len() {
        col -= widths[scroll];
        scroll += 1;
    }
    (scroll, col)
}
