//! Error types for widgets, layouts and the application context.

use dframe_core::ObjectError;
use dframe_render::RenderError;

/// Result type alias for DFrame operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised synchronously at the call site of a misused operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The object tree rejected an operation.
    #[error("Object error: {0}")]
    Object(#[from] ObjectError),

    /// The render substrate rejected an operation.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// The style sheet rejected an operation.
    #[error("Style error: {0}")]
    Style(#[from] dframe_style::Error),

    /// The widget does not emit an event with this name.
    #[error("{widget} has no event named '{event}'")]
    UnknownEvent { widget: &'static str, event: String },

    /// The widget has been destroyed and no longer has a render surface.
    #[error("Widget has no render surface")]
    NoSurface,

    /// The widget is already an entry of this layout.
    #[error("Widget is already managed by this layout")]
    WidgetAlreadyAdded,

    /// The widget is the layout's parent or one of its ancestors.
    #[error("A layout's parent widget or its ancestors cannot be added to the layout")]
    LayoutCycle,

    /// The widget the layout is bound to has been destroyed.
    #[error("Layout parent widget has been destroyed")]
    ParentDestroyed,
}

impl Error {
    /// Create an unknown-event error.
    pub fn unknown_event(widget: &'static str, event: impl Into<String>) -> Self {
        Self::UnknownEvent {
            widget,
            event: event.into(),
        }
    }
}
