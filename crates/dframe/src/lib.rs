//! DFrame - Qt-style object trees, widgets, box layouts and style sheets
//! over a browser-style document.
//!
//! This is the umbrella crate that re-exports all public APIs:
//!
//! - Object ownership and signals from `dframe-core` (re-exported at the root)
//! - The render substrate under [`render`]
//! - Style sheets under [`style`]
//! - [`Application`], [`widget`] and [`widget::layout`] defined here
//!
//! # Example
//!
//! ```
//! use dframe::prelude::*;
//!
//! let app = Application::in_memory();
//! let window = QWidget::new(&app, None).unwrap();
//! app.mount(&window).unwrap();
//!
//! let label = QLabel::with_parent(&app, "Name:", Some(&window)).unwrap();
//! let button = QPushButton::with_parent(&app, "OK", Some(&window)).unwrap();
//!
//! let mut layout = QVBoxLayout::vbox(&app, &window).unwrap();
//! layout.add_widget(&label, LayoutOptions::default()).unwrap();
//! layout.add_widget(&button, LayoutOptions::default()).unwrap();
//!
//! let mut sheet = app.style_sheet().unwrap();
//! sheet.add_rule(".QPushButton", [("color", "white")]).unwrap();
//! assert_eq!(sheet.apply_to(&window).unwrap(), 3);
//!
//! // Destroying the root releases every surface in the tree.
//! assert_eq!(window.destroy(), 3);
//! assert!(!app.document().contains(button.surface()));
//! ```

mod application;
mod config;
mod error;
pub mod prelude;
pub mod widget;

pub use application::Application;
pub use config::{FrameConfig, Positioning, DEFAULT_NAME_ATTRIBUTE, DEFAULT_WIDGET_SIZE};
pub use error::{Error, Result};

pub use dframe_core::*;

/// Render substrate module.
pub mod render {
    pub use dframe_render::*;
}

/// Style sheet module.
pub mod style {
    pub use dframe_style::*;
}

static_assertions::assert_impl_all!(Application: Send, Sync, Clone);
static_assertions::assert_impl_all!(widget::widgets::QPushButton: Send, Sync);
static_assertions::assert_impl_all!(widget::layout::BoxLayout: Send, Sync);
static_assertions::assert_obj_safe!(widget::Widget);
