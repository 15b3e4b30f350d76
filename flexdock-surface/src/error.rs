//! Surface error types.

use thiserror::Error;

use crate::element_id::ElementId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    #[error("cannot append {0} inside its own subtree")]
    InvalidHierarchy(ElementId),

    #[error("a glass overlay is already active")]
    GlassAlreadyActive,
}
