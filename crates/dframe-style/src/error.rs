//! Error types for the styling system.

use dframe_core::ObjectError;
use dframe_render::RenderError;

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the styling system.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Selector is not a flat type or class selector.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    /// Invalid property name or value.
    #[error("Invalid value for property '{property}': {message}")]
    InvalidValue { property: String, message: String },

    /// The document has no head region to hold the style resource.
    #[error("Document has no head region for the style resource")]
    HeadUnavailable,

    /// The render substrate rejected an operation.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The object tree rejected an operation.
    #[error("Object error: {0}")]
    Object(#[from] ObjectError),
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}
