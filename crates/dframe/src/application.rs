//! The application context.

use dframe_core::init_global_registry;
use dframe_render::{Document, SurfaceId};
use dframe_style::StyleSheet;

use crate::config::FrameConfig;
use crate::error::Result;
use crate::widget::Widget;

/// Shared context for building a widget tree.
///
/// Holds the render document widgets create their surfaces in and the
/// [`FrameConfig`] their constructors apply. Creating an application
/// initializes the global object registry. Cloning yields another handle to
/// the same document.
///
/// # Example
///
/// ```
/// use dframe::prelude::*;
///
/// let app = Application::in_memory();
/// let root = QWidget::new(&app, None).unwrap();
/// app.mount(&root).unwrap();
///
/// let button = QPushButton::with_parent(&app, "OK", Some(&root)).unwrap();
/// button.set_object_name("ok").unwrap();
///
/// assert_eq!(app.find_widget_surface("ok"), Some(button.surface()));
/// ```
#[derive(Debug, Clone)]
pub struct Application {
    document: Document,
    config: FrameConfig,
}

impl Application {
    /// Create an application over `document` with the default configuration.
    pub fn new(document: Document) -> Self {
        Self::with_config(document, FrameConfig::default())
    }

    /// Create an application over `document` with a custom configuration.
    pub fn with_config(document: Document, config: FrameConfig) -> Self {
        init_global_registry();
        tracing::debug!(target: "dframe::application", ?config, "application created");
        Self { document, config }
    }

    /// Create an application over a fresh in-memory document.
    pub fn in_memory() -> Self {
        Self::new(Document::in_memory())
    }

    /// The render document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The active configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }

    /// Attach a top-level widget's surface to the document body.
    ///
    /// Widgets with a widget ancestor are attached automatically; only roots
    /// need mounting. Without a body region this does nothing.
    pub fn mount(&self, widget: &dyn Widget) -> Result<()> {
        if let Some(body) = self.document.body() {
            self.document.append_child(body, widget.surface())?;
        }
        Ok(())
    }

    /// Create a style sheet for this application's document.
    pub fn style_sheet(&self) -> Result<StyleSheet> {
        Ok(StyleSheet::new(&self.document)?)
    }

    /// The first surface whose widget carries the given object name.
    pub fn find_widget_surface(&self, name: &str) -> Option<SurfaceId> {
        self.find_widget_surfaces(name).into_iter().next()
    }

    /// Every surface whose widget carries the given object name.
    ///
    /// Names are not unique; surfaces are returned in creation order.
    pub fn find_widget_surfaces(&self, name: &str) -> Vec<SurfaceId> {
        self.document
            .query_by_attribute(self.config.name_attribute(), name)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::in_memory()
    }
}
