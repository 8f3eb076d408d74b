use log::{debug, info, warn};
use thiserror::Error;

use crate::input::InputField;
use crate::task::{Task, TaskId};

/// Hint text shown in the empty input field. Never accepted as a task.
pub const PLACEHOLDER: &str = "Write your task here";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter a task.")]
    EmptyOrPlaceholder,
}

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Added(TaskId),
    Updated(TaskId),
}

/// Owns the ordered task rows, the input buffer and the editing session.
pub struct TaskManager {
    tasks: Vec<Task>,
    next_id: u64,
    editing: Option<TaskId>,
    input: InputField,
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
            editing: None,
            input: InputField::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// The row currently targeted by the editing session, if any.
    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn input(&self) -> &InputField {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputField {
        &mut self.input
    }

    /// Add a new task from the input, or commit the pending edit.
    ///
    /// Appending clears the input; committing an edit leaves it untouched.
    /// Rejected input changes nothing.
    pub fn submit(&mut self) -> Result<Submission, InputError> {
        let text = validate(self.input.text())?.to_string();

        if let Some(id) = self.editing.take() {
            if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                info!("Updated task {id}: {text:?}");
                task.description = text;
                return Ok(Submission::Updated(id));
            }
            warn!("Editing session pointed at missing task {id}, adding instead");
        }

        let id = self.push(text);
        self.input.clear();
        Ok(Submission::Added(id))
    }

    /// Start editing a task, loading its description into the input.
    ///
    /// Any pending edit target is replaced and whatever was typed is lost.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        let Some(description) = self.get(id).map(|t| t.description.clone()) else {
            return false;
        };
        if let Some(previous) = self.editing.filter(|&p| p != id) {
            debug!("Abandoning edit of task {previous}");
        }
        self.input.set_text(&description);
        self.editing = Some(id);
        info!("Editing task {id}");
        true
    }

    /// Flip completion on a task. Returns the new state.
    pub fn toggle_complete(&mut self, id: TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        info!("Task {id} completed: {}", task.completed);
        Some(task.completed)
    }

    /// Remove a task permanently. Deleting the edit target ends the session.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.tasks.remove(index);
        if self.editing == Some(id) {
            self.editing = None;
            info!("Deleted task {id} while editing it, session cleared");
        } else {
            info!("Deleted task {id}");
        }
        true
    }

    fn push(&mut self, description: String) -> TaskId {
        let id = TaskId::new(self.next_id);
        self.next_id += 1;
        info!("Added task {id}: {description:?}");
        self.tasks.push(Task::new(id, description));
        id
    }
}

/// Trim the input and reject empty or placeholder text.
pub fn validate(raw: &str) -> Result<&str, InputError> {
    let text = raw.trim();
    if text.is_empty() || text == PLACEHOLDER {
        Err(InputError::EmptyOrPlaceholder)
    } else {
        Ok(text)
    }
}
