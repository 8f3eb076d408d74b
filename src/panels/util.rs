use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders},
};

pub fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyHandleResult {
    Consumed,
    Ignored,
    Submit,
    FocusInput,
    FocusTasks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    Input,
    Tasks,
}

impl PanelId {
    pub const fn other(self) -> Self {
        match self {
            Self::Input => Self::Tasks,
            Self::Tasks => Self::Input,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Input => "Input",
            Self::Tasks => "Tasks",
        }
    }
}

/// Keyboard shortcut display with key and description
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub description: &'static str,
}
