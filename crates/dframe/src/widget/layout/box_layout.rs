//! Box layout for arranging widgets in a row or column.
//!
//! `BoxLayout` arranges the surfaces of its entries along one axis. The
//! order of entries is the order of `add_widget` calls, regardless of the
//! order the widgets were constructed in.

use dframe_core::{global_registry, ObjectId, SharedObjectRegistry};
use dframe_render::{px, Document, SurfaceId};

use super::ContentMargins;
use crate::application::Application;
use crate::error::{Error, Result};
use crate::widget::base::{set_shown_display, widget_surface};
use crate::widget::Widget;

const TARGET: &str = "dframe::layout";

/// Layout orientation for box layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Items are arranged left to right.
    #[default]
    Horizontal,
    /// Items are arranged top to bottom.
    Vertical,
}

impl Orientation {
    /// Get the cross (perpendicular) orientation.
    #[inline]
    pub fn cross(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// The `flex-direction` value for this axis.
    pub fn flex_direction(self) -> &'static str {
        match self {
            Orientation::Horizontal => "row",
            Orientation::Vertical => "column",
        }
    }
}

/// Alignment of an item on the layout's cross axis.
///
/// For horizontal layouts, this affects vertical positioning of items.
/// For vertical layouts, this affects horizontal positioning of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align at the start (left/top).
    Start,
    /// Center.
    Center,
    /// Align at the end (right/bottom).
    End,
    /// Stretch to fill the cross axis (default).
    #[default]
    Stretch,
}

impl Alignment {
    /// The `align-self` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Start => "flex-start",
            Alignment::Center => "center",
            Alignment::End => "flex-end",
            Alignment::Stretch => "stretch",
        }
    }
}

/// Options for one layout entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutOptions {
    /// Share of free space along the flow axis, written as `flex-grow`.
    /// Zero leaves the surface's own value alone.
    pub stretch: u32,
    /// Cross-axis alignment, written as `align-self` when set.
    pub alignment: Option<Alignment>,
}

impl LayoutOptions {
    /// Options with no stretch and the container's alignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stretch factor.
    pub fn with_stretch(mut self, stretch: u32) -> Self {
        self.stretch = stretch;
        self
    }

    /// Set the cross-axis alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }
}

/// A widget managed by a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    widget: ObjectId,
    surface: SurfaceId,
    options: LayoutOptions,
}

impl LayoutEntry {
    /// The managed widget.
    pub fn widget(&self) -> ObjectId {
        self.widget
    }

    /// The widget's surface.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// The options the widget was added with.
    pub fn options(&self) -> LayoutOptions {
        self.options
    }
}

/// A box layout that arranges widgets horizontally or vertically.
///
/// The layout is bound to its parent widget when created and switches the
/// parent surface to box flow. Entries are append-only.
///
/// `add_widget` makes the parent widget the widget's object parent, so the
/// entry is owned (and destroyed) with the parent and is reached by
/// subtree operations such as style sheet application.
#[derive(Debug, Clone)]
pub struct BoxLayout {
    parent: ObjectId,
    parent_surface: SurfaceId,
    document: Document,
    orientation: Orientation,
    spacing: f32,
    margins: ContentMargins,
    entries: Vec<LayoutEntry>,
}

impl BoxLayout {
    /// Create a layout on `parent` with the specified orientation.
    ///
    /// Spacing and margins start from the application's configuration.
    pub fn new(app: &Application, parent: &dyn Widget, orientation: Orientation) -> Result<Self> {
        let registry = global_registry()?;
        let parent_id = parent.object_id();
        let parent_surface = live_widget_surface(registry, parent_id).ok_or(Error::ParentDestroyed)?;
        let document = parent.widget_base().document().clone();

        let layout = Self {
            parent: parent_id,
            parent_surface,
            document,
            orientation,
            spacing: app.config().layout_spacing(),
            margins: app.config().layout_margins(),
            entries: Vec::new(),
        };

        set_shown_display(&layout.document, parent_surface, parent.is_visible(), "flex")?;
        layout.document.set_style_property(
            parent_surface,
            "flex-direction",
            orientation.flex_direction(),
        )?;
        layout.write_spacing()?;
        layout.write_margins()?;

        tracing::debug!(
            target: TARGET,
            parent = ?parent_id,
            ?orientation,
            "layout bound to parent"
        );
        Ok(layout)
    }

    /// Create a horizontal box layout.
    pub fn hbox(app: &Application, parent: &dyn Widget) -> Result<Self> {
        Self::new(app, parent, Orientation::Horizontal)
    }

    /// Create a vertical box layout.
    pub fn vbox(app: &Application, parent: &dyn Widget) -> Result<Self> {
        Self::new(app, parent, Orientation::Vertical)
    }

    // =========================================================================
    // Entries
    // =========================================================================

    /// Append `widget` to the layout.
    ///
    /// The widget's surface becomes the last child of the parent surface and
    /// the parent widget becomes its object parent. On error neither the
    /// entries nor any surface are changed.
    pub fn add_widget(&mut self, widget: &dyn Widget, options: LayoutOptions) -> Result<()> {
        let registry = self.live_registry()?;
        let id = widget.object_id();
        let surface = live_widget_surface(registry, id).ok_or(Error::NoSurface)?;

        if self.entries.iter().any(|entry| entry.widget == id) {
            return Err(Error::WidgetAlreadyAdded);
        }
        if id == self.parent || registry.ancestors(self.parent)?.contains(&id) {
            return Err(Error::LayoutCycle);
        }

        let old_parent = registry.parent(id)?;
        if old_parent != Some(self.parent) {
            registry.set_parent(id, Some(self.parent))?;
        }
        if let Err(err) = self.document.append_child(self.parent_surface, surface) {
            if old_parent != Some(self.parent) {
                let _ = registry.set_parent(id, old_parent);
            }
            return Err(err.into());
        }

        if options.stretch > 0 {
            self.document
                .set_style_property(surface, "flex-grow", &options.stretch.to_string())?;
        }
        if let Some(alignment) = options.alignment {
            self.document
                .set_style_property(surface, "align-self", alignment.as_css())?;
        }

        self.entries.push(LayoutEntry {
            widget: id,
            surface,
            options,
        });
        tracing::debug!(
            target: TARGET,
            parent = ?self.parent,
            widget = ?id,
            index = self.entries.len() - 1,
            "widget added to layout"
        );
        Ok(())
    }

    /// The live entries' widgets, in the order they were added.
    ///
    /// An entry stops being live when its widget is destroyed or its surface
    /// is moved out of the parent surface.
    pub fn widgets(&self) -> Vec<ObjectId> {
        self.live_entries().map(|entry| entry.widget).collect()
    }

    /// Every entry ever added, in order, including ones no longer live.
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Number of live entries.
    pub fn count(&self) -> usize {
        self.live_entries().count()
    }

    /// Whether the layout has no live entries.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn live_entries(&self) -> impl Iterator<Item = &LayoutEntry> + '_ {
        let registry = global_registry().ok();
        self.entries.iter().filter(move |entry| {
            registry.is_some_and(|r| r.contains(entry.widget))
                && self.document.parent(entry.surface) == Ok(Some(self.parent_surface))
        })
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// The widget this layout arranges.
    pub fn parent(&self) -> ObjectId {
        self.parent
    }

    /// The flow axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Spacing between entries.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Set the spacing between entries, written as the parent's `gap`.
    pub fn set_spacing(&mut self, spacing: f32) -> Result<()> {
        self.live_registry()?;
        self.spacing = spacing;
        self.write_spacing()
    }

    /// Margins between the parent's edges and the entries.
    pub fn contents_margins(&self) -> ContentMargins {
        self.margins
    }

    /// Set the content margins, written as the parent's `padding`.
    pub fn set_contents_margins(&mut self, margins: ContentMargins) -> Result<()> {
        self.live_registry()?;
        self.margins = margins;
        self.write_margins()
    }

    fn write_spacing(&self) -> Result<()> {
        self.document
            .set_style_property(self.parent_surface, "gap", &px(self.spacing))?;
        Ok(())
    }

    fn write_margins(&self) -> Result<()> {
        self.document
            .set_style_property(self.parent_surface, "padding", &self.margins.to_css())?;
        Ok(())
    }

    fn live_registry(&self) -> Result<&'static SharedObjectRegistry> {
        let registry = global_registry()?;
        if registry.contains(self.parent) {
            Ok(registry)
        } else {
            Err(Error::ParentDestroyed)
        }
    }
}

fn live_widget_surface(registry: &SharedObjectRegistry, id: ObjectId) -> Option<SurfaceId> {
    if !registry.contains(id) {
        return None;
    }
    widget_surface(registry, id).ok().flatten()
}

/// Horizontal box layout.
///
/// Items are arranged left to right. Construct with [`BoxLayout::hbox`].
pub type QHBoxLayout = BoxLayout;

/// Vertical box layout.
///
/// Items are arranged top to bottom. Construct with [`BoxLayout::vbox`].
pub type QVBoxLayout = BoxLayout;
