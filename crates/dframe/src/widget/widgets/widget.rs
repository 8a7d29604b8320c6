//! The plain container widget.

use dframe_core::{Object, ObjectId, ObjectKind};

use crate::application::Application;
use crate::error::Result;
use crate::widget::{Widget, WidgetBase};

/// A plain widget backed by a `div` surface.
///
/// Used as a window root or as the parent of a layout.
#[derive(Debug)]
pub struct QWidget {
    base: WidgetBase,
}

impl QWidget {
    /// Create a widget, optionally under `parent`.
    pub fn new(app: &Application, parent: Option<&dyn Object>) -> Result<Self> {
        let base = WidgetBase::new(
            app,
            ObjectKind::Widget,
            "div",
            parent.map(|p| p.object_id()),
        )?;
        Ok(Self { base })
    }
}

impl Object for QWidget {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for QWidget {
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
    use dframe_core::QObject;
    use dframe_render::Rect;

    #[test]
    fn default_surface_styles() {
        let app = Application::in_memory();
        let widget = QWidget::new(&app, None).unwrap();
        let doc = app.document();

        assert_eq!(doc.tag(widget.surface()).unwrap(), "div");
        assert_eq!(doc.style_property(widget.surface(), "width").unwrap().as_deref(), Some("100px"));
        assert_eq!(doc.style_property(widget.surface(), "height").unwrap().as_deref(), Some("50px"));
        assert_eq!(
            doc.style_property(widget.surface(), "position").unwrap().as_deref(),
            Some("relative")
        );
        assert_eq!(widget.geometry(), Rect::new(0.0, 0.0, 100.0, 50.0));
        widget.destroy();
    }

    #[test]
    fn surface_nests_under_nearest_widget_ancestor() {
        let app = Application::in_memory();
        let root = QWidget::new(&app, None).unwrap();
        let holder = QObject::new(Some(&root)).unwrap();
        let child = QWidget::new(&app, Some(&holder)).unwrap();

        assert_eq!(child.parent(), Some(holder.object_id()));
        assert_eq!(child.parent_widget(), Some(root.object_id()));
        assert_eq!(
            app.document().parent(child.surface()).unwrap(),
            Some(root.surface())
        );
        assert_eq!(root.destroy(), 3);
    }

    #[test]
    fn object_name_is_exposed_on_surface() {
        let app = Application::in_memory();
        let widget = QWidget::new(&app, None).unwrap();
        widget.set_object_name("sidebar").unwrap();

        assert_eq!(widget.object_name().as_deref(), Some("sidebar"));
        assert_eq!(
            app.document()
                .attribute(widget.surface(), "data-object-name")
                .unwrap()
                .as_deref(),
            Some("sidebar")
        );
        assert_eq!(app.find_widget_surface("sidebar"), Some(widget.surface()));
        widget.destroy();
    }

    #[test]
    fn hide_and_show_restore_display() {
        let app = Application::in_memory();
        let widget = QWidget::new(&app, None).unwrap();
        let doc = app.document();

        widget.hide().unwrap();
        assert!(!widget.is_visible());
        assert_eq!(doc.style_property(widget.surface(), "display").unwrap().as_deref(), Some("none"));

        widget.show().unwrap();
        assert!(widget.is_visible());
        assert_eq!(doc.style_property(widget.surface(), "display").unwrap(), None);

        doc.set_style_property(widget.surface(), "display", "grid").unwrap();
        widget.set_visible(false).unwrap();
        widget.set_visible(false).unwrap();
        widget.set_visible(true).unwrap();
        assert_eq!(doc.style_property(widget.surface(), "display").unwrap().as_deref(), Some("grid"));
        widget.destroy();
    }

    #[test]
    fn geometry_writes_inline_styles() {
        let app = Application::in_memory();
        let mut widget = QWidget::new(&app, None).unwrap();
        let doc = app.document();

        widget.set_geometry(Rect::new(5.0, 10.0, 200.0, 80.0)).unwrap();
        assert_eq!(doc.style_property(widget.surface(), "left").unwrap().as_deref(), Some("5px"));
        assert_eq!(doc.style_property(widget.surface(), "top").unwrap().as_deref(), Some("10px"));

        widget.resize(120.0, 40.0).unwrap();
        widget.move_to(1.0, 2.0).unwrap();
        assert_eq!(widget.geometry(), Rect::new(1.0, 2.0, 120.0, 40.0));
        assert_eq!(doc.style_property(widget.surface(), "width").unwrap().as_deref(), Some("120px"));
        widget.destroy();
    }

    #[test]
    fn set_parent_moves_surface() {
        let app = Application::in_memory();
        let a = QWidget::new(&app, None).unwrap();
        let b = QWidget::new(&app, None).unwrap();
        let child = QWidget::new(&app, Some(&a)).unwrap();
        let doc = app.document();

        child.set_parent(Some(&b)).unwrap();
        assert_eq!(doc.parent(child.surface()).unwrap(), Some(b.surface()));
        assert!(doc.children(a.surface()).unwrap().is_empty());

        child.set_parent(None).unwrap();
        assert_eq!(doc.parent(child.surface()).unwrap(), None);
        assert_eq!(child.parent_widget(), None);

        assert!(child.set_parent(Some(&child)).is_err());
        for w in [&a, &b, &child] {
            w.destroy();
        }
    }

    #[test]
    fn moving_plain_holder_moves_widget_surfaces() {
        let app = Application::in_memory();
        let first = QWidget::new(&app, None).unwrap();
        let second = QWidget::new(&app, None).unwrap();
        let holder = QObject::new(Some(&first)).unwrap();
        let child = QWidget::new(&app, Some(&holder)).unwrap();
        let grandchild = QWidget::new(&app, Some(&child)).unwrap();
        let doc = app.document();

        holder.set_parent(Some(&second)).unwrap();
        assert_eq!(child.parent_widget(), Some(second.object_id()));
        assert_eq!(doc.parent(child.surface()).unwrap(), Some(second.surface()));
        assert!(doc.children(first.surface()).unwrap().is_empty());
        assert_eq!(doc.parent(grandchild.surface()).unwrap(), Some(child.surface()));

        holder.set_parent(None).unwrap();
        assert_eq!(doc.parent(child.surface()).unwrap(), None);

        first.destroy();
        second.destroy();
        assert_eq!(holder.destroy(), 3);
    }

    #[test]
    fn failed_construction_unregisters_object() {
        let app = Application::in_memory();
        let parent = QWidget::new(&app, None).unwrap();
        assert!(app.document().release_surface(parent.surface()));

        assert!(QWidget::new(&app, Some(&parent)).is_err());
        let registry = dframe_core::global_registry().unwrap();
        assert!(registry.children(parent.object_id()).unwrap().is_empty());
        assert_eq!(parent.destroy(), 1);
    }
}
