//! Core widget trait definitions.
//!
//! This module defines the [`Widget`] trait implemented by every visual
//! object. Most methods have default implementations delegating to the
//! widget's [`WidgetBase`].

use dframe_core::{Object, ObjectId, ObjectKind};
use dframe_render::{Rect, SurfaceId};

use super::base::WidgetBase;
use crate::error::Result;

/// The base trait for all widgets.
///
/// # Required Methods
///
/// Implementors must provide
/// [`widget_base()`](Self::widget_base) and
/// [`widget_base_mut()`](Self::widget_base_mut). Everything else delegates
/// to the [`WidgetBase`].
///
/// # Implementing Object
///
/// Widgets must also implement the [`Object`] trait. The simplest way is to
/// delegate to the [`WidgetBase`]:
///
/// ```
/// use dframe::prelude::*;
/// use dframe::widget::WidgetBase;
///
/// struct Panel {
///     base: WidgetBase,
/// }
///
/// impl Panel {
///     fn new(app: &Application) -> dframe::Result<Self> {
///         let base = WidgetBase::new(app, ObjectKind::Widget, "section", None)?;
///         Ok(Self { base })
///     }
/// }
///
/// impl Object for Panel {
///     fn object_id(&self) -> ObjectId {
///         self.base.object_id()
///     }
/// }
///
/// impl Widget for Panel {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
/// }
///
/// let app = Application::in_memory();
/// let panel = Panel::new(&app).unwrap();
/// assert_eq!(app.document().tag(panel.surface()).unwrap(), "section");
/// ```
pub trait Widget: Object + Send + Sync {
    // =========================================================================
    // Required Methods
    // =========================================================================

    /// Get a reference to the widget's base.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    // =========================================================================
    // Identity
    // =========================================================================

    /// The widget's kind.
    fn kind(&self) -> ObjectKind {
        self.widget_base().kind()
    }

    /// The widget's render surface.
    fn surface(&self) -> SurfaceId {
        self.widget_base().surface()
    }

    /// Get the object name.
    fn object_name(&self) -> Option<String> {
        self.widget_base().object_name()
    }

    /// Set the object name, also exposing it on the surface.
    fn set_object_name(&self, name: &str) -> Result<()> {
        self.widget_base().set_object_name(name)
    }

    /// Whether the widget has not been destroyed.
    fn is_alive(&self) -> bool {
        self.widget_base().is_alive()
    }

    // =========================================================================
    // Hierarchy
    // =========================================================================

    /// The parent object, widget or not.
    fn parent(&self) -> Option<ObjectId> {
        self.widget_base().parent()
    }

    /// The nearest ancestor that is a widget.
    fn parent_widget(&self) -> Option<ObjectId> {
        self.widget_base().parent_widget()
    }

    /// Reparent the widget and move its surface along.
    fn set_parent(&self, parent: Option<&dyn Object>) -> Result<()> {
        self.widget_base()
            .set_parent(parent.map(|p| p.object_id()))
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Check if the widget is visible.
    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    /// Set the widget's visibility.
    fn set_visible(&self, visible: bool) -> Result<()> {
        self.widget_base().set_visible(visible)
    }

    /// Show the widget.
    fn show(&self) -> Result<()> {
        self.widget_base().show()
    }

    /// Hide the widget.
    fn hide(&self) -> Result<()> {
        self.widget_base().hide()
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Get the widget's geometry.
    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    /// Set the widget's geometry.
    fn set_geometry(&mut self, rect: Rect) -> Result<()> {
        self.widget_base_mut().set_geometry(rect)
    }

    /// Set the widget's size.
    fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.widget_base_mut().resize(width, height)
    }

    /// Set the widget's position.
    fn move_to(&mut self, x: f32, y: f32) -> Result<()> {
        self.widget_base_mut().move_to(x, y)
    }

    // =========================================================================
    // Lifetime
    // =========================================================================

    /// Destroy the widget, its descendants and their surfaces.
    fn destroy(&self) -> usize {
        self.widget_base().destroy()
    }
}
