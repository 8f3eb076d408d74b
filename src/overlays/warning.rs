use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::util::{centered_rect, render_overlay_frame};
use crate::task_manager::InputError;

/// Modal warning. While one is shown it swallows all input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub title: &'static str,
    pub message: String,
}

impl Warning {
    pub fn invalid_input(err: InputError) -> Self {
        Self {
            title: "Invalid Input",
            message: err.to_string(),
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let overlay_width = 36u16;
        let inner_width = overlay_width.saturating_sub(6) as usize;

        let msg_lines = if inner_width > 0 {
            self.message.len().div_ceil(inner_width).max(1)
        } else {
            1
        };
        let content_height = (1 + msg_lines + 1 + 1 + 1 + 1) as u16 + 2;
        let overlay_height = content_height.min(frame.area().height);

        let overlay_area = centered_rect(frame.area(), overlay_width, overlay_height);
        let title = format!(" {} ", self.title);
        let inner = render_overlay_frame(frame, overlay_area, &title, Color::Yellow);

        let rows = Layout::vertical([
            Constraint::Length(1),                // pad
            Constraint::Length(msg_lines as u16), // message
            Constraint::Length(1),                // pad
            Constraint::Length(1),                // button
            Constraint::Length(1),                // hint
            Constraint::Min(0),                   // pad
        ])
        .split(inner);

        let msg_area = Rect {
            x: rows[1].x + 2,
            width: rows[1].width.saturating_sub(4),
            ..rows[1]
        };
        let msg = Paragraph::new(Span::styled(
            self.message.as_str(),
            Style::default().fg(Color::White),
        ))
        .wrap(Wrap { trim: true });
        frame.render_widget(msg, msg_area);

        let button = Line::from(Span::styled(
            "[ OK ]",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(
            Paragraph::new(button).alignment(Alignment::Center),
            rows[3],
        );

        let hint = Paragraph::new(Span::styled(
            "Press any key to dismiss",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, rows[4]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_invalid_input_warning_text() {
        let warning = Warning::invalid_input(InputError::EmptyOrPlaceholder);
        assert_eq!(warning.title, "Invalid Input");
        assert_eq!(warning.message, "Please enter a task.");
    }

    #[test]
    fn test_render_shows_title_and_message() {
        let mut terminal = Terminal::new(TestBackend::new(50, 20)).unwrap();
        let warning = Warning::invalid_input(InputError::EmptyOrPlaceholder);
        terminal.draw(|frame| warning.render(frame)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Invalid Input"));
        assert!(text.contains("Please enter a task."));
        assert!(text.contains("[ OK ]"));
    }
}
