use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use unicode_width::UnicodeWidthStr;

use crate::error::AppError;

pub const EDIT_ICON_FILE: &str = "edit-icon.txt";
pub const DELETE_ICON_FILE: &str = "delete-icon.txt";

/// Widest glyph a row can fit in its icon columns
pub const ICON_MAX_WIDTH: usize = 2;

/// Glyphs drawn for the per-row edit and delete controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icons {
    pub edit: String,
    pub delete: String,
}

impl Icons {
    /// Load both icons from `dir`. Either one missing is an error.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let edit = read_icon(&dir.join(EDIT_ICON_FILE))?;
        let delete = read_icon(&dir.join(DELETE_ICON_FILE))?;
        info!("Loaded icons from {}: edit={edit} delete={delete}", dir.display());
        Ok(Self { edit, delete })
    }

    pub fn width(&self) -> u16 {
        self.edit.width().max(self.delete.width()) as u16
    }
}

fn read_icon(path: &Path) -> Result<String, AppError> {
    let content = fs::read_to_string(path).map_err(|source| AppError::AssetUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let invalid = |reason: &str| AppError::AssetInvalid {
        path: PathBuf::from(path),
        reason: reason.to_string(),
    };

    let glyph = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| invalid("file is blank"))?;

    if glyph.width() > ICON_MAX_WIDTH {
        return Err(invalid(&format!(
            "{glyph:?} is wider than {ICON_MAX_WIDTH} columns"
        )));
    }

    Ok(glyph.to_string())
}
