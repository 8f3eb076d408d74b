use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use super::util::{panel_block, KeyHandleResult, Shortcut};
use crate::assets::Icons;
use crate::task::{Task, TaskId};
use crate::task_manager::TaskManager;

/// Clickable parts of a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowControl {
    Label,
    Toggle,
    Edit,
    Delete,
}

#[derive(Debug, Clone)]
struct RowHit {
    id: TaskId,
    toggle: Rect,
    label: Rect,
    edit: Rect,
    delete: Rect,
}

pub struct TasksPanel {
    selected: usize,
    /// First visible row
    offset: usize,
    /// Number of rows the list scrolls over
    extent: usize,
    /// Visible task rows (updated during render)
    viewport: usize,
    list_area: Rect,
    rows: Vec<RowHit>,
}

impl Default for TasksPanel {
    fn default() -> Self {
        Self {
            selected: 0,
            offset: 0,
            extent: 0,
            viewport: 10,
            list_area: Rect::default(),
            rows: Vec::new(),
        }
    }
}

impl TasksPanel {
    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[cfg(test)]
    pub fn extent(&self) -> usize {
        self.extent
    }

    pub fn selected_id(&self, task_manager: &TaskManager) -> Option<TaskId> {
        task_manager.tasks().get(self.selected).map(|t| t.id)
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        focused: bool,
        task_manager: &TaskManager,
        icons: &Icons,
    ) {
        let block = panel_block(" Tasks ", focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [list_area, scrollbar_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        self.list_area = list_area;
        self.viewport = (list_area.height as usize).max(1);
        self.recompute_extent(task_manager.len());
        self.rows.clear();

        if task_manager.is_empty() {
            let centered = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .split(list_area)[0];
            let placeholder = Paragraph::new("(empty)")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, centered);
            return;
        }

        let icon_width = icons.width() + 1;
        for (row, (index, task)) in task_manager
            .tasks()
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.viewport)
            .enumerate()
        {
            let row_area = Rect {
                y: list_area.y + row as u16,
                height: 1,
                ..list_area
            };
            let is_selected = focused && index == self.selected;
            let is_editing = task_manager.editing() == Some(task.id);
            let hit = Self::render_row(
                frame,
                row_area,
                task,
                is_selected,
                is_editing,
                icons,
                icon_width,
            );
            self.rows.push(hit);
        }

        let mut scrollbar_state = ScrollbarState::new(self.extent)
            .viewport_content_length(self.viewport)
            .position(self.offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }

    pub fn handle_key(&mut self, key: KeyEvent, task_manager: &mut TaskManager) -> KeyHandleResult {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.select(self.selected + 1);
                KeyHandleResult::Consumed
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.select(self.selected.saturating_sub(1));
                KeyHandleResult::Consumed
            }
            KeyCode::PageDown => {
                self.select(self.selected + self.viewport);
                KeyHandleResult::Consumed
            }
            KeyCode::PageUp => {
                self.select(self.selected.saturating_sub(self.viewport));
                KeyHandleResult::Consumed
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.select(0);
                KeyHandleResult::Consumed
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.select(self.extent.saturating_sub(1));
                KeyHandleResult::Consumed
            }
            KeyCode::Char(' ' | 'x') => {
                if let Some(id) = self.selected_id(task_manager) {
                    task_manager.toggle_complete(id);
                }
                KeyHandleResult::Consumed
            }
            KeyCode::Char('e') | KeyCode::Enter => match self.selected_id(task_manager) {
                Some(id) if task_manager.begin_edit(id) => KeyHandleResult::FocusInput,
                _ => KeyHandleResult::Consumed,
            },
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_id(task_manager) {
                    self.delete(id, task_manager);
                }
                KeyHandleResult::Consumed
            }
            KeyCode::Char('a' | 'i') => KeyHandleResult::FocusInput,
            _ => KeyHandleResult::Ignored,
        }
    }

    pub fn shortcuts(&self) -> Vec<Shortcut> {
        vec![
            Shortcut {
                key: "j/k",
                description: "Navigate",
            },
            Shortcut {
                key: "Space",
                description: "Complete",
            },
            Shortcut {
                key: "e",
                description: "Edit",
            },
            Shortcut {
                key: "d",
                description: "Delete",
            },
            Shortcut {
                key: "a",
                description: "Add",
            },
            Shortcut {
                key: "?",
                description: "Help",
            },
            Shortcut {
                key: "q",
                description: "Quit",
            },
        ]
    }

    /// Delete a row and shrink the scroll extent to match.
    pub fn delete(&mut self, id: TaskId, task_manager: &mut TaskManager) {
        if task_manager.delete(id) {
            self.recompute_extent(task_manager.len());
        }
    }

    /// Resize the scrollable range to `len` rows, keeping selection and
    /// offset inside it.
    pub fn recompute_extent(&mut self, len: usize) {
        self.extent = len;
        self.selected = self.selected.min(len.saturating_sub(1));
        self.offset = self.offset.min(self.max_offset());
    }

    /// Which task and control sit under a screen position.
    pub fn hit_test(&self, position: Position) -> Option<(TaskId, RowControl)> {
        let row = self.rows.iter().find(|r| {
            r.toggle.contains(position)
                || r.label.contains(position)
                || r.edit.contains(position)
                || r.delete.contains(position)
        })?;
        let control = if row.toggle.contains(position) {
            RowControl::Toggle
        } else if row.edit.contains(position) {
            RowControl::Edit
        } else if row.delete.contains(position) {
            RowControl::Delete
        } else {
            RowControl::Label
        };
        Some((row.id, control))
    }

    pub fn hits_list(&self, position: Position) -> bool {
        self.list_area.contains(position)
    }

    /// Select the row holding `id`, scrolling it into view.
    pub fn select_id(&mut self, id: TaskId, task_manager: &TaskManager) {
        if let Some(index) = task_manager.position(id) {
            self.select(index);
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
    }

    // -- Navigation helpers --

    fn select(&mut self, index: usize) {
        if self.extent == 0 {
            self.selected = 0;
            return;
        }
        self.selected = index.min(self.extent - 1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + self.viewport {
            self.offset = self.selected + 1 - self.viewport;
        }
    }

    fn max_offset(&self) -> usize {
        self.extent.saturating_sub(self.viewport)
    }

    // -- Rendering helpers --

    fn render_row(
        frame: &mut Frame,
        area: Rect,
        task: &Task,
        is_selected: bool,
        is_editing: bool,
        icons: &Icons,
        icon_width: u16,
    ) -> RowHit {
        let [marker, toggle, label, edit, delete] = Layout::horizontal([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(icon_width),
            Constraint::Length(icon_width),
        ])
        .areas(area);

        if is_selected {
            frame.render_widget(
                Paragraph::new(Span::styled("> ", Style::default().fg(Color::Cyan))),
                marker,
            );
        }

        let checkbox = if task.completed { "[x]" } else { "[ ]" };
        frame.render_widget(
            Paragraph::new(Span::styled(checkbox, Style::default().fg(Color::DarkGray))),
            toggle,
        );

        let mut style = if is_editing {
            Style::default().fg(Color::Yellow)
        } else if task.completed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };
        if task.completed {
            style = style.add_modifier(Modifier::CROSSED_OUT);
        }
        if is_selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        let text = truncate_with_ellipsis(&task.description, label.width as usize);
        frame.render_widget(Paragraph::new(Span::styled(text, style)), label);

        frame.render_widget(
            Paragraph::new(Span::styled(&icons.edit, Style::default().fg(Color::Blue))),
            edit,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(&icons.delete, Style::default().fg(Color::Red))),
            delete,
        );

        RowHit {
            id: task.id,
            toggle,
            label,
            edit,
            delete,
        }
    }
}

fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    if max_width < 3 {
        return ".".repeat(max_width);
    }
    let limit = max_width - 3; // room for "..."
    let mut result = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > limit {
            break;
        }
        result.push(c);
        width += w;
    }
    format!("{}...", result.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn icons() -> Icons {
        Icons {
            edit: "E".to_string(),
            delete: "D".to_string(),
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn manager_with(texts: &[&str]) -> TaskManager {
        let mut manager = TaskManager::new();
        for text in texts {
            manager.input_mut().set_text(text);
            manager.submit().unwrap();
        }
        manager
    }

    fn render(panel: &mut TasksPanel, manager: &TaskManager, height: u16) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(30, height)).unwrap();
        terminal
            .draw(|frame| panel.render(frame, frame.area(), true, manager, &icons()))
            .unwrap();
        terminal
    }

    fn line(terminal: &Terminal<TestBackend>, y: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
    }

    #[test]
    fn test_render_rows_with_controls() {
        let manager = manager_with(&["Buy milk", "Walk dog"]);
        let mut panel = TasksPanel::default();
        let terminal = render(&mut panel, &manager, 6);

        let first = line(&terminal, 1);
        assert!(first.contains("> [ ] Buy milk"));
        assert!(first.contains('E'));
        assert!(first.contains('D'));
        assert!(line(&terminal, 2).contains("[ ] Walk dog"));
    }

    #[test]
    fn test_render_empty_list() {
        let manager = TaskManager::new();
        let mut panel = TasksPanel::default();
        let terminal = render(&mut panel, &manager, 5);
        let text: String = (0..5).map(|y| line(&terminal, y)).collect();
        assert!(text.contains("(empty)"));
    }

    #[test]
    fn test_completed_row_is_crossed_out() {
        let mut manager = manager_with(&["Buy milk"]);
        let id = manager.tasks()[0].id;
        manager.toggle_complete(id);

        let mut panel = TasksPanel::default();
        let terminal = render(&mut panel, &manager, 4);
        assert!(line(&terminal, 1).contains("[x] Buy milk"));

        let buffer = terminal.backend().buffer();
        // label starts after "│" + "> " + "[x] "
        let cell = &buffer[(7, 1)];
        assert_eq!(cell.symbol(), "B");
        assert!(cell.modifier.contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_space_toggles_selected_row() {
        let mut manager = manager_with(&["a", "b"]);
        let mut panel = TasksPanel::default();
        panel.recompute_extent(manager.len());

        panel.handle_key(press(KeyCode::Char('j')), &mut manager);
        panel.handle_key(press(KeyCode::Char(' ')), &mut manager);
        assert!(!manager.tasks()[0].completed);
        assert!(manager.tasks()[1].completed);
    }

    #[test]
    fn test_edit_key_starts_session_and_requests_input_focus() {
        let mut manager = manager_with(&["a"]);
        let mut panel = TasksPanel::default();
        panel.recompute_extent(manager.len());

        assert_eq!(
            panel.handle_key(press(KeyCode::Char('e')), &mut manager),
            KeyHandleResult::FocusInput
        );
        assert_eq!(manager.editing(), Some(manager.tasks()[0].id));
        assert_eq!(manager.input().text(), "a");
    }

    #[test]
    fn test_keys_on_empty_list_do_nothing() {
        let mut manager = TaskManager::new();
        let mut panel = TasksPanel::default();
        for code in [KeyCode::Char(' '), KeyCode::Char('d'), KeyCode::Char('j')] {
            panel.handle_key(press(code), &mut manager);
        }
        assert_eq!(
            panel.handle_key(press(KeyCode::Char('e')), &mut manager),
            KeyHandleResult::Consumed
        );
        assert_eq!(manager.editing(), None);
        assert_eq!(panel.selected(), 0);
    }

    #[test]
    fn test_delete_last_row_clamps_selection() {
        let mut manager = manager_with(&["a", "b", "c"]);
        let mut panel = TasksPanel::default();
        panel.recompute_extent(manager.len());
        panel.handle_key(press(KeyCode::End), &mut manager);
        assert_eq!(panel.selected(), 2);

        panel.handle_key(press(KeyCode::Char('d')), &mut manager);
        assert_eq!(manager.len(), 2);
        assert_eq!(panel.extent(), 2);
        assert_eq!(panel.selected(), 1);
    }

    #[test]
    fn test_selection_scrolls_viewport() {
        let texts: Vec<String> = (0..10).map(|i| format!("task {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let mut manager = manager_with(&refs);
        let mut panel = TasksPanel::default();
        // 5 rows tall: 3 visible task rows inside the border
        render(&mut panel, &manager, 5);

        panel.handle_key(press(KeyCode::End), &mut manager);
        assert_eq!(panel.selected(), 9);
        assert_eq!(panel.offset(), 7);

        let terminal = render(&mut panel, &manager, 5);
        assert!(line(&terminal, 3).contains("task 9"));

        panel.handle_key(press(KeyCode::Home), &mut manager);
        assert_eq!(panel.offset(), 0);
    }

    #[test]
    fn test_scroll_by_is_clamped_to_extent() {
        let texts: Vec<String> = (0..6).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let manager = manager_with(&refs);
        let mut panel = TasksPanel::default();
        render(&mut panel, &manager, 5);

        panel.scroll_by(100);
        assert_eq!(panel.offset(), 3);
        panel.scroll_by(-1);
        assert_eq!(panel.offset(), 2);
        panel.scroll_by(-100);
        assert_eq!(panel.offset(), 0);
    }

    fn thumb_cells(terminal: &Terminal<TestBackend>) -> usize {
        let buffer = terminal.backend().buffer();
        let x = buffer.area.width - 2;
        (1..buffer.area.height - 1)
            .filter(|&y| buffer[(x, y)].symbol() == "█")
            .count()
    }

    #[test]
    fn test_scrollbar_tracks_row_count() {
        let manager = manager_with(&["a", "b", "c"]);
        let mut panel = TasksPanel::default();
        let terminal = render(&mut panel, &manager, 12);
        assert!(thumb_cells(&terminal) > 0);

        let texts: Vec<String> = (0..20).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let manager = manager_with(&refs);
        let mut panel = TasksPanel::default();
        let terminal = render(&mut panel, &manager, 12);
        let thumb = thumb_cells(&terminal);
        assert!(thumb > 0 && thumb < 8, "thumb was {thumb} cells");
    }

    #[test]
    fn test_hit_test_maps_columns_to_controls() {
        let manager = manager_with(&["Buy milk"]);
        let id = manager.tasks()[0].id;
        let mut panel = TasksPanel::default();
        render(&mut panel, &manager, 4);

        // list spans columns 1-27: marker 1-2, toggle 3-6, label 7-23, edit 24-25, delete 26-27
        assert_eq!(
            panel.hit_test(Position::new(4, 1)),
            Some((id, RowControl::Toggle))
        );
        assert_eq!(
            panel.hit_test(Position::new(10, 1)),
            Some((id, RowControl::Label))
        );
        assert_eq!(
            panel.hit_test(Position::new(24, 1)),
            Some((id, RowControl::Edit))
        );
        assert_eq!(
            panel.hit_test(Position::new(26, 1)),
            Some((id, RowControl::Delete))
        );
        assert_eq!(panel.hit_test(Position::new(10, 2)), None);
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("a longer task", 9), "a long...");
        assert_eq!(truncate_with_ellipsis("abcdef", 2), "..");
        assert_eq!(truncate_with_ellipsis("日本語のタスク", 7), "日本...");
    }
}
