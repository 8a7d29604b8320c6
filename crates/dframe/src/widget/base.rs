//! Widget base implementation.
//!
//! This module provides `WidgetBase`, the common implementation details
//! for all widgets. It owns the widget's render surface and coordinates
//! the surface tree with the object system.

use std::sync::Arc;

use dframe_core::{
    global_registry, Object, ObjectBase, ObjectError, ObjectId, ObjectKind, SharedObjectRegistry,
    WidgetState,
};
use dframe_render::{px, Document, Rect, RenderResult, SurfaceId};

use crate::application::Application;
use crate::config::FrameConfig;
use crate::error::{Error, Result};

const TARGET: &str = "dframe::widget";

/// Attribute holding the `display` value a hidden surface returns to.
const SHOWN_DISPLAY_ATTRIBUTE: &str = "data-dframe-display";

/// The base implementation for all widgets.
///
/// A widget is an object of a widget [`ObjectKind`] bound to exactly one
/// render surface:
///
/// - The surface is created by [`WidgetBase::new`] with the configured
///   default size and positioning.
/// - While the widget has a widget ancestor, its surface is a child of
///   that ancestor's surface unless a layout has moved it.
/// - Destroying the widget (directly or through an ancestor) releases the
///   surface exactly once. Child surfaces are orphaned, never released,
///   because each belongs to its own widget.
///
/// Widget implementations include this as a field and delegate to it
/// through the [`Widget`](super::Widget) trait.
pub struct WidgetBase {
    object: ObjectBase,
    kind: ObjectKind,
    surface: SurfaceId,
    document: Document,
    name_attribute: String,
    geometry: Rect,
}

impl WidgetBase {
    /// Create the object and its surface.
    ///
    /// `tag` is the element tag of the surface. When `parent` has a widget
    /// ancestor (or is one), the surface is appended to that widget's surface.
    /// On failure nothing is left behind: no object, no surface.
    pub fn new(
        app: &Application,
        kind: ObjectKind,
        tag: &str,
        parent: Option<ObjectId>,
    ) -> Result<Self> {
        if !kind.is_widget() {
            return Err(ObjectError::NotAWidget.into());
        }
        let registry = global_registry()?;
        let object = ObjectBase::new(kind, parent)?;
        let document = app.document().clone();
        let surface = document.create_surface(tag);

        let built = Self::install_hooks(registry, &document, object.id(), surface)
            .and_then(|()| Self::init_surface(registry, &document, object.id(), surface, app.config()));
        if let Err(err) = built {
            registry.destroy(object.id());
            document.release_surface(surface);
            return Err(err);
        }

        let size = app.config().default_size();
        tracing::debug!(target: TARGET, id = ?object.id(), %kind, ?surface, "created widget");
        Ok(Self {
            object,
            kind,
            surface,
            document,
            name_attribute: app.config().name_attribute().to_string(),
            geometry: Rect::from_size(size),
        })
    }

    /// Tie the surface to the object: released on destroy, re-homed when a
    /// reparent changes the nearest widget ancestor.
    fn install_hooks(
        registry: &SharedObjectRegistry,
        document: &Document,
        id: ObjectId,
        surface: SurfaceId,
    ) -> Result<()> {
        let release_document = document.clone();
        registry.add_destroy_hook(
            id,
            Box::new(move |id| {
                if release_document.release_surface(surface) {
                    tracing::trace!(target: TARGET, ?id, ?surface, "released widget surface");
                }
            }),
        )?;

        let move_document = document.clone();
        registry.add_reparent_hook(
            id,
            Arc::new(move |id| {
                if let Err(err) = follow_widget_parent(&move_document, id, surface) {
                    tracing::warn!(target: TARGET, ?id, ?surface, %err, "could not move widget surface");
                }
            }),
        )?;
        Ok(())
    }

    fn init_surface(
        registry: &SharedObjectRegistry,
        document: &Document,
        id: ObjectId,
        surface: SurfaceId,
        config: &FrameConfig,
    ) -> Result<()> {
        let size = config.default_size();
        document.set_style_property(surface, "width", &px(size.width))?;
        document.set_style_property(surface, "height", &px(size.height))?;
        document.set_style_property(surface, "position", config.positioning().as_css())?;
        registry.init_widget_state(
            id,
            WidgetState {
                visible: true,
                surface: surface.as_raw(),
            },
        )?;
        if let Some(container) = nearest_widget_surface(registry, id)? {
            document.append_child(container, surface)?;
        }
        Ok(())
    }

    // =========================================================================
    // Object System Delegation
    // =========================================================================

    /// Get the widget's unique object ID.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object.id()
    }

    /// Get the underlying object handle.
    pub fn object(&self) -> &ObjectBase {
        &self.object
    }

    /// The widget's kind.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The widget's render surface.
    ///
    /// The ID stays valid as a key after destruction, but the document no
    /// longer contains it.
    #[inline]
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// The document the surface lives in.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the widget has not been destroyed.
    pub fn is_alive(&self) -> bool {
        self.object.is_alive()
    }

    /// Get the widget's object name.
    pub fn object_name(&self) -> Option<String> {
        self.object.name()
    }

    /// Set the object name and expose it on the surface for lookup.
    pub fn set_object_name(&self, name: &str) -> Result<()> {
        self.object.set_name(name)?;
        self.document
            .set_attribute(self.surface, &self.name_attribute, name)?;
        Ok(())
    }

    /// Get the parent object's ID.
    pub fn parent(&self) -> Option<ObjectId> {
        self.object.parent()
    }

    /// The nearest ancestor that is a widget, skipping plain objects.
    pub fn parent_widget(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.nearest_widget_ancestor(self.object_id()))
            .ok()
            .flatten()
    }

    /// Move the widget under `parent`, or make it a root.
    ///
    /// The surface follows: it becomes the last child of the new nearest
    /// widget ancestor's surface, or is detached when there is none. The
    /// same happens when any ancestor object is reparented.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> Result<()> {
        global_registry()?.set_parent(self.object_id(), parent)?;
        tracing::debug!(target: TARGET, id = ?self.object_id(), ?parent, "reparented widget");
        Ok(())
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Whether the widget is visible (its own state, ignoring ancestors).
    pub fn is_visible(&self) -> bool {
        global_registry()
            .and_then(|r| r.widget_state(self.object_id()))
            .ok()
            .flatten()
            .is_some_and(|state| state.visible)
    }

    /// Show or hide the widget through its inline `display` property.
    ///
    /// Hiding remembers the display value the surface had, so a layout's
    /// box display survives a hide/show cycle.
    pub fn set_visible(&self, visible: bool) -> Result<()> {
        let registry = global_registry()?;
        let state = registry
            .widget_state(self.object_id())?
            .ok_or(Error::NoSurface)?;
        if state.visible == visible {
            return Ok(());
        }
        apply_visibility(&self.document, self.surface, visible)?;
        registry.set_widget_visible(self.object_id(), visible)?;
        Ok(())
    }

    /// Show the widget.
    pub fn show(&self) -> Result<()> {
        self.set_visible(true)
    }

    /// Hide the widget.
    pub fn hide(&self) -> Result<()> {
        self.set_visible(false)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The last geometry set on the widget.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set position and size as inline `left`/`top`/`width`/`height`.
    pub fn set_geometry(&mut self, rect: Rect) -> Result<()> {
        self.write_position(rect.left(), rect.top())?;
        self.write_size(rect.width(), rect.height())?;
        self.geometry = rect;
        Ok(())
    }

    /// Set the size, keeping the position.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        self.write_size(width, height)?;
        self.geometry.size.width = width;
        self.geometry.size.height = height;
        Ok(())
    }

    /// Set the position, keeping the size.
    pub fn move_to(&mut self, x: f32, y: f32) -> Result<()> {
        self.write_position(x, y)?;
        self.geometry.origin.x = x;
        self.geometry.origin.y = y;
        Ok(())
    }

    fn write_size(&self, width: f32, height: f32) -> Result<()> {
        self.document
            .set_style_property(self.surface, "width", &px(width))?;
        self.document
            .set_style_property(self.surface, "height", &px(height))?;
        Ok(())
    }

    fn write_position(&self, x: f32, y: f32) -> Result<()> {
        self.document
            .set_style_property(self.surface, "left", &px(x))?;
        self.document
            .set_style_property(self.surface, "top", &px(y))?;
        Ok(())
    }

    // =========================================================================
    // Lifetime
    // =========================================================================

    /// Destroy the widget and all of its descendants.
    ///
    /// Returns how many objects were destroyed; `0` when already destroyed.
    pub fn destroy(&self) -> usize {
        self.object.destroy()
    }
}

impl Object for WidgetBase {
    fn object_id(&self) -> ObjectId {
        self.object.id()
    }
}

impl std::fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.object.id())
            .field("kind", &self.kind)
            .field("surface", &self.surface)
            .field("geometry", &self.geometry)
            .finish()
    }
}

/// The surface of a live widget.
pub(crate) fn widget_surface(
    registry: &SharedObjectRegistry,
    id: ObjectId,
) -> Result<Option<SurfaceId>> {
    Ok(registry
        .widget_state(id)?
        .map(|state| SurfaceId::from_raw(state.surface)))
}

/// Move a widget's surface under its current nearest widget ancestor's.
fn follow_widget_parent(document: &Document, id: ObjectId, surface: SurfaceId) -> Result<()> {
    match nearest_widget_surface(global_registry()?, id)? {
        Some(container) => document.append_child(container, surface)?,
        None => {
            document.detach(surface)?;
        }
    }
    Ok(())
}

/// The surface a widget's surface belongs under: its nearest widget ancestor's.
pub(crate) fn nearest_widget_surface(
    registry: &SharedObjectRegistry,
    id: ObjectId,
) -> Result<Option<SurfaceId>> {
    match registry.nearest_widget_ancestor(id)? {
        Some(ancestor) => widget_surface(registry, ancestor),
        None => Ok(None),
    }
}

fn apply_visibility(document: &Document, surface: SurfaceId, visible: bool) -> RenderResult<()> {
    if visible {
        match document.attribute(surface, SHOWN_DISPLAY_ATTRIBUTE)? {
            Some(display) => {
                document.set_style_property(surface, "display", &display)?;
                document.remove_attribute(surface, SHOWN_DISPLAY_ATTRIBUTE)?;
            }
            None => {
                document.remove_style_property(surface, "display")?;
            }
        }
    } else {
        if let Some(display) = document.style_property(surface, "display")? {
            if display != "none" {
                document.set_attribute(surface, SHOWN_DISPLAY_ATTRIBUTE, &display)?;
            }
        }
        document.set_style_property(surface, "display", "none")?;
    }
    Ok(())
}

/// Set the `display` value a surface uses while visible.
///
/// For a hidden widget the value is stored and applied when it is shown.
pub(crate) fn set_shown_display(
    document: &Document,
    surface: SurfaceId,
    visible: bool,
    display: &str,
) -> RenderResult<()> {
    if visible {
        document.set_style_property(surface, "display", display)
    } else {
        document.set_attribute(surface, SHOWN_DISPLAY_ATTRIBUTE, display)
    }
}
