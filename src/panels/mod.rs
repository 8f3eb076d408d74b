mod input;
mod tasks;
mod util;

pub use input::InputPanel;
pub use tasks::{RowControl, TasksPanel};
pub use util::{KeyHandleResult, PanelId, Shortcut};
