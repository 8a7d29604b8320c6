//! Label widget implementation.

use dframe_core::{Object, ObjectId, ObjectKind};

use crate::application::Application;
use crate::error::Result;
use crate::widget::{Widget, WidgetBase};

/// A widget displaying a line of text in a `span` surface.
///
/// # Example
///
/// ```
/// use dframe::prelude::*;
///
/// let app = Application::in_memory();
/// let mut label = QLabel::new(&app, "Hello").unwrap();
/// label.set_text("Hello, World!").unwrap();
///
/// assert_eq!(label.text(), "Hello, World!");
/// assert_eq!(app.document().text(label.surface()).unwrap(), "Hello, World!");
/// ```
#[derive(Debug)]
pub struct QLabel {
    base: WidgetBase,
    text: String,
}

impl QLabel {
    /// Create a top-level label.
    pub fn new(app: &Application, text: impl Into<String>) -> Result<Self> {
        Self::with_parent(app, text, None)
    }

    /// Create a label under `parent`.
    pub fn with_parent(
        app: &Application,
        text: impl Into<String>,
        parent: Option<&dyn Object>,
    ) -> Result<Self> {
        let base = WidgetBase::new(
            app,
            ObjectKind::Label,
            "span",
            parent.map(|p| p.object_id()),
        )?;
        let mut label = Self {
            base,
            text: String::new(),
        };
        if let Err(err) = label.set_text(text) {
            label.base.destroy();
            return Err(err);
        }
        Ok(label)
    }

    /// The label's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the label's text.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.base.document().set_text(self.base.surface(), &text)?;
        self.text = text;
        Ok(())
    }
}

impl Object for QLabel {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for QLabel {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lives_on_span_surface() {
        let app = Application::in_memory();
        let label = QLabel::new(&app, "Name:").unwrap();

        assert_eq!(label.kind(), ObjectKind::Label);
        assert_eq!(app.document().tag(label.surface()).unwrap(), "span");
        assert_eq!(app.document().text(label.surface()).unwrap(), "Name:");
        label.destroy();
    }

    #[test]
    fn destroyed_label_rejects_text() {
        let app = Application::in_memory();
        let mut label = QLabel::new(&app, "before").unwrap();
        label.destroy();

        assert!(label.set_text("after").is_err());
        assert_eq!(label.text(), "before");
        assert!(!app.document().contains(label.surface()));
    }
}
