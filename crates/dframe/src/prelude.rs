//! Prelude module for DFrame.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use dframe::prelude::*;
//! ```

// ============================================================================
// Application
// ============================================================================

pub use crate::{Application, FrameConfig, Positioning};

// ============================================================================
// Signal/Slot and Object System
// ============================================================================

pub use dframe_core::{ConnectionId, Object, ObjectBase, ObjectId, ObjectKind, QObject, Signal, Slot};

// ============================================================================
// Widgets and Layouts
// ============================================================================

pub use crate::widget::layout::{
    Alignment, BoxLayout, ContentMargins, LayoutOptions, Orientation, QHBoxLayout, QVBoxLayout,
};
pub use crate::widget::widgets::{QLabel, QPushButton, QWidget};
pub use crate::widget::{Widget, WidgetBase};

// ============================================================================
// Styling and Rendering
// ============================================================================

pub use dframe_render::{Document, Rect, Size, SurfaceId};
pub use dframe_style::{QStyleSheet, StyleSheet};
