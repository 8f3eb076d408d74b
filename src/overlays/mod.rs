mod help;
mod util;
mod warning;

pub use help::render_help_overlay;
pub use util::centered_rect;
pub use warning::Warning;
