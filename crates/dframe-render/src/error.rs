//! Error types for the render crate.

use thiserror::Error;

use crate::SurfaceId;

/// Errors that can occur while mutating a render tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The surface was never created or has been released.
    #[error("unknown or released surface {0:?}")]
    UnknownSurface(SurfaceId),

    /// Appending would make a surface its own ancestor.
    #[error("appending {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: SurfaceId, child: SurfaceId },

    /// The surface is not a child of the given parent.
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild { parent: SurfaceId, child: SurfaceId },
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
