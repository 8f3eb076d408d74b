use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::overlays::{centered_rect, render_help_overlay};
use crate::panels::PanelId;

pub const APP_TITLE: &str = "Task App";

/// Fixed window size in cells. The window never resizes with the terminal.
pub const WINDOW_WIDTH: u16 = 52;
pub const WINDOW_HEIGHT: u16 = 30;

pub struct AppLayout {
    pub window: Rect,
    pub header: Rect,
    pub input: Rect,
    pub tasks: Rect,
}

/// Place the window in the middle of `area`, or `None` if it does not fit.
pub fn create_layout(area: Rect) -> Option<AppLayout> {
    if area.width < WINDOW_WIDTH || area.height < WINDOW_HEIGHT {
        return None;
    }

    let window = centered_rect(area, WINDOW_WIDTH, WINDOW_HEIGHT);
    let inner = window_block().inner(window);
    let [header, input, tasks] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(inner);

    Some(AppLayout {
        window,
        header,
        input,
        tasks,
    })
}

pub fn render(frame: &mut Frame, app: &mut App) {
    let Some(layout) = create_layout(frame.area()) else {
        app.window_fits = false;
        render_too_small(frame);
        return;
    };
    app.window_fits = true;

    frame.render_widget(window_block(), layout.window);

    let header = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, layout.header);

    app.input_panel.render(
        frame,
        layout.input,
        app.focused_panel == PanelId::Input,
        &app.task_manager,
    );
    app.tasks_panel.render(
        frame,
        layout.tasks,
        app.focused_panel == PanelId::Tasks,
        &app.task_manager,
        &app.icons,
    );

    // Render overlays
    if let Some(ref warning) = app.warning {
        warning.render(frame);
    } else if app.help_visible {
        render_help_overlay(frame, app.focused_panel.name(), &app.focused_shortcuts());
    }
}

fn window_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .title(format!(" {APP_TITLE} "))
        .title_alignment(Alignment::Center)
}

fn render_too_small(frame: &mut Frame) {
    let message = format!(
        "Terminal too small: {APP_TITLE} needs {WINDOW_WIDTH}x{WINDOW_HEIGHT}, have {}x{}",
        frame.area().width,
        frame.area().height
    );
    let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(Color::Yellow)))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, frame.area());
}
