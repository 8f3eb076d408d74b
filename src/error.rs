use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the application from starting or running.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("cannot read icon {}: {source}", path.display())]
    AssetUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid icon {}: {reason}", path.display())]
    AssetInvalid { path: PathBuf, reason: String },

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}
