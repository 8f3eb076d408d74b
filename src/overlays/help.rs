use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::util::{centered_rect, render_overlay_frame, shortcut_line};
use crate::panels::Shortcut;

const GLOBAL_SHORTCUTS: [(&str, &str); 2] = [("Tab", "Switch Focus"), ("Ctrl-C", "Quit")];

pub fn render_help_overlay(frame: &mut Frame, panel_name: &str, shortcuts: &[Shortcut]) {
    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("  {panel_name} Panel"),
        Style::default().fg(Color::White),
    )));

    for shortcut in shortcuts {
        lines.push(shortcut_line(shortcut.key, shortcut.description));
    }

    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "  Global",
        Style::default().fg(Color::White),
    )));
    for (key, desc) in GLOBAL_SHORTCUTS {
        lines.push(shortcut_line(key, desc));
    }

    lines.push(Line::from(""));

    let content_height = lines.len() as u16 + 2;
    let overlay_width = 32u16;
    let overlay_height = content_height.min(frame.area().height);

    let overlay_area = centered_rect(frame.area(), overlay_width, overlay_height);
    let inner = render_overlay_frame(frame, overlay_area, " Help ", Color::Cyan);
    frame.render_widget(Paragraph::new(lines), inner);
}
