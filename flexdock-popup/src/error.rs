//! Popup error types.

use flexdock_surface::SurfaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PopupError {
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}
