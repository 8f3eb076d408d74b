use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, warn};
use ratatui::layout::Position;

use crate::assets::Icons;
use crate::overlays::Warning;
use crate::panels::{InputPanel, KeyHandleResult, PanelId, RowControl, Shortcut, TasksPanel};
use crate::task_manager::{Submission, TaskManager};

pub struct App {
    pub should_quit: bool,
    pub task_manager: TaskManager,
    pub input_panel: InputPanel,
    pub tasks_panel: TasksPanel,
    pub focused_panel: PanelId,
    pub warning: Option<Warning>,
    pub help_visible: bool,
    /// False while the terminal is too small to draw the window
    pub window_fits: bool,
    pub icons: Icons,
}

impl App {
    pub fn new(icons: Icons) -> Self {
        Self {
            should_quit: false,
            task_manager: TaskManager::new(),
            input_panel: InputPanel::default(),
            tasks_panel: TasksPanel::default(),
            focused_panel: PanelId::Input,
            warning: None,
            help_visible: false,
            window_fits: true,
            icons,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        // Nothing is drawn to act on
        if !self.window_fits {
            return;
        }
        // Modal warning swallows the key that dismisses it
        if self.warning.take().is_some() {
            return;
        }
        if self.help_visible {
            self.help_visible = false;
            return;
        }

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.focused_panel = self.focused_panel.other();
            return;
        }

        // Pass to focused panel
        let result = match self.focused_panel {
            PanelId::Input => self.input_panel.handle_key(key, &mut self.task_manager),
            PanelId::Tasks => self.tasks_panel.handle_key(key, &mut self.task_manager),
        };

        match result {
            KeyHandleResult::Submit => self.submit(),
            KeyHandleResult::FocusInput => self.focused_panel = PanelId::Input,
            KeyHandleResult::FocusTasks => self.focused_panel = PanelId::Tasks,
            KeyHandleResult::Ignored => self.handle_unbound_key(key),
            KeyHandleResult::Consumed => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let is_click = matches!(mouse.kind, MouseEventKind::Down(_));
        if self.warning.is_some() {
            if is_click {
                self.warning = None;
            }
            return;
        }
        if self.help_visible {
            if is_click {
                self.help_visible = false;
            }
            return;
        }
        if !self.window_fits {
            return;
        }

        let position = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.click(position),
            MouseEventKind::ScrollDown if self.tasks_panel.hits_list(position) => {
                self.tasks_panel.scroll_by(1);
            }
            MouseEventKind::ScrollUp if self.tasks_panel.hits_list(position) => {
                self.tasks_panel.scroll_by(-1);
            }
            _ => {}
        }
    }

    /// The Add action: append a task or commit the pending edit.
    pub fn submit(&mut self) {
        match self.task_manager.submit() {
            Ok(Submission::Added(_)) => {
                self.tasks_panel.recompute_extent(self.task_manager.len());
            }
            Ok(Submission::Updated(_)) => {}
            Err(err) => {
                warn!(
                    "Rejected input {:?}: {err}",
                    self.task_manager.input().text()
                );
                self.warning = Some(Warning::invalid_input(err));
            }
        }
    }

    pub fn focused_shortcuts(&self) -> Vec<Shortcut> {
        match self.focused_panel {
            PanelId::Input => self.input_panel.shortcuts(),
            PanelId::Tasks => self.tasks_panel.shortcuts(),
        }
    }

    fn handle_unbound_key(&mut self, key: KeyEvent) {
        if self.focused_panel != PanelId::Tasks {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.help_visible = true,
            _ => {}
        }
    }

    fn click(&mut self, position: Position) {
        if self.input_panel.hits_button(position) {
            self.submit();
        } else if self.input_panel.hits_field(position) {
            self.focused_panel = PanelId::Input;
        } else if let Some((id, control)) = self.tasks_panel.hit_test(position) {
            debug!("Clicked {control:?} on task {id}");
            self.focused_panel = PanelId::Tasks;
            self.tasks_panel.select_id(id, &self.task_manager);
            match control {
                RowControl::Toggle => {
                    self.task_manager.toggle_complete(id);
                }
                RowControl::Edit => {
                    if self.task_manager.begin_edit(id) {
                        self.focused_panel = PanelId::Input;
                    }
                }
                RowControl::Delete => self.tasks_panel.delete(id, &mut self.task_manager),
                RowControl::Label => {}
            }
        }
    }
}
