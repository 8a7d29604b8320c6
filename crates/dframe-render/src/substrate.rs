//! The render substrate contract and the shared [`Document`] handle.
//!
//! A render substrate is a retained tree of surfaces (elements) that something
//! outside DFrame turns into pixels. DFrame only ever talks to it through
//! [`RenderSubstrate`]; [`MemoryDocument`](crate::MemoryDocument) is the
//! in-process implementation.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::new_key_type;

use crate::error::RenderResult;

new_key_type! {
    /// Handle to a surface in a render substrate.
    pub struct SurfaceId;
}

impl SurfaceId {
    /// Convert the SurfaceId to a raw u64 value.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create a SurfaceId from a raw u64 value.
    ///
    /// Note: This does not check that the surface exists.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Target used for document tracing.
pub(crate) const TARGET: &str = "dframe_render::document";

/// Operations DFrame needs from a retained render tree.
///
/// Every operation on a released or unknown surface fails with
/// [`RenderError::UnknownSurface`](crate::RenderError::UnknownSurface),
/// except [`release_surface`](Self::release_surface) and
/// [`contains`](Self::contains), which report it as `false`.
pub trait RenderSubstrate {
    /// Create a detached surface with the given element tag.
    fn create_surface(&mut self, tag: &str) -> SurfaceId;

    /// Release a surface.
    ///
    /// The surface is detached from its parent first. Its children are
    /// orphaned, not released: each is owned by someone else. Returns `false`
    /// if the surface was already released.
    fn release_surface(&mut self, surface: SurfaceId) -> bool;

    /// Whether the surface exists.
    fn contains(&self, surface: SurfaceId) -> bool;

    /// The element tag the surface was created with.
    fn tag(&self, surface: SurfaceId) -> RenderResult<String>;

    /// The surface's own text content.
    fn text(&self, surface: SurfaceId) -> RenderResult<String>;

    /// Replace the surface's own text content.
    fn set_text(&mut self, surface: SurfaceId, text: &str) -> RenderResult<()>;

    /// Get an attribute value.
    fn attribute(&self, surface: SurfaceId, name: &str) -> RenderResult<Option<String>>;

    /// Set an attribute, replacing any previous value.
    fn set_attribute(&mut self, surface: SurfaceId, name: &str, value: &str) -> RenderResult<()>;

    /// Remove an attribute. Returns whether it was present.
    fn remove_attribute(&mut self, surface: SurfaceId, name: &str) -> RenderResult<bool>;

    /// Get an inline style property.
    fn style_property(&self, surface: SurfaceId, property: &str) -> RenderResult<Option<String>>;

    /// Set an inline style property, replacing any previous value.
    fn set_style_property(
        &mut self,
        surface: SurfaceId,
        property: &str,
        value: &str,
    ) -> RenderResult<()>;

    /// Remove an inline style property. Returns whether it was present.
    fn remove_style_property(&mut self, surface: SurfaceId, property: &str) -> RenderResult<bool>;

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent (including `parent` itself) is moved.
    /// Fails with [`RenderError::CycleDetected`](crate::RenderError::CycleDetected)
    /// if `child` is `parent` or one of its ancestors.
    fn append_child(&mut self, parent: SurfaceId, child: SurfaceId) -> RenderResult<()>;

    /// Remove `child` from `parent`, leaving it detached.
    fn remove_child(&mut self, parent: SurfaceId, child: SurfaceId) -> RenderResult<()>;

    /// The surface's parent, if attached.
    fn parent(&self, surface: SurfaceId) -> RenderResult<Option<SurfaceId>>;

    /// The surface's children in order.
    fn children(&self, surface: SurfaceId) -> RenderResult<Vec<SurfaceId>>;

    /// The document head region, if the substrate has one.
    fn head(&self) -> Option<SurfaceId>;

    /// The document body region, if the substrate has one.
    fn body(&self) -> Option<SurfaceId>;

    /// All live surfaces whose attribute `name` equals `value`, in creation order.
    fn query_by_attribute(&self, name: &str, value: &str) -> Vec<SurfaceId>;
}

/// A shared, lock-guarded handle to a render substrate.
///
/// Cloning the handle yields another reference to the same tree. The lock is
/// only held for the duration of one call, never across user callbacks.
#[derive(Clone)]
pub struct Document {
    inner: Arc<Mutex<dyn RenderSubstrate + Send>>,
}

impl Document {
    /// Wrap a substrate in a shared handle.
    pub fn new<S>(substrate: S) -> Self
    where
        S: RenderSubstrate + Send + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(substrate)),
        }
    }

    /// A handle to a fresh [`MemoryDocument`](crate::MemoryDocument).
    pub fn in_memory() -> Self {
        Self::new(crate::MemoryDocument::new())
    }

    /// Run `f` with exclusive access to the substrate.
    pub fn with<R>(&self, f: impl FnOnce(&mut dyn RenderSubstrate) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Whether two handles refer to the same substrate.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Create a detached surface.
    pub fn create_surface(&self, tag: &str) -> SurfaceId {
        let surface = self.with(|s| s.create_surface(tag));
        tracing::trace!(target: TARGET, ?surface, tag, "created surface");
        surface
    }

    /// Release a surface; `false` if it was already released.
    pub fn release_surface(&self, surface: SurfaceId) -> bool {
        let released = self.with(|s| s.release_surface(surface));
        if released {
            tracing::trace!(target: TARGET, ?surface, "released surface");
        }
        released
    }

    /// Whether the surface exists.
    pub fn contains(&self, surface: SurfaceId) -> bool {
        self.with(|s| s.contains(surface))
    }

    /// The surface's element tag.
    pub fn tag(&self, surface: SurfaceId) -> RenderResult<String> {
        self.with(|s| s.tag(surface))
    }

    /// The surface's own text.
    pub fn text(&self, surface: SurfaceId) -> RenderResult<String> {
        self.with(|s| s.text(surface))
    }

    /// Replace the surface's own text.
    pub fn set_text(&self, surface: SurfaceId, text: &str) -> RenderResult<()> {
        self.with(|s| s.set_text(surface, text))
    }

    /// Get an attribute.
    pub fn attribute(&self, surface: SurfaceId, name: &str) -> RenderResult<Option<String>> {
        self.with(|s| s.attribute(surface, name))
    }

    /// Set an attribute.
    pub fn set_attribute(&self, surface: SurfaceId, name: &str, value: &str) -> RenderResult<()> {
        self.with(|s| s.set_attribute(surface, name, value))
    }

    /// Remove an attribute.
    pub fn remove_attribute(&self, surface: SurfaceId, name: &str) -> RenderResult<bool> {
        self.with(|s| s.remove_attribute(surface, name))
    }

    /// Get an inline style property.
    pub fn style_property(&self, surface: SurfaceId, property: &str) -> RenderResult<Option<String>> {
        self.with(|s| s.style_property(surface, property))
    }

    /// Set an inline style property.
    pub fn set_style_property(
        &self,
        surface: SurfaceId,
        property: &str,
        value: &str,
    ) -> RenderResult<()> {
        self.with(|s| s.set_style_property(surface, property, value))
    }

    /// Remove an inline style property.
    pub fn remove_style_property(&self, surface: SurfaceId, property: &str) -> RenderResult<bool> {
        self.with(|s| s.remove_style_property(surface, property))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&self, parent: SurfaceId, child: SurfaceId) -> RenderResult<()> {
        self.with(|s| s.append_child(parent, child))?;
        tracing::trace!(target: TARGET, ?parent, ?child, "appended surface");
        Ok(())
    }

    /// Remove `child` from `parent`.
    pub fn remove_child(&self, parent: SurfaceId, child: SurfaceId) -> RenderResult<()> {
        self.with(|s| s.remove_child(parent, child))
    }

    /// Detach a surface from whatever parent it has.
    ///
    /// Returns the former parent.
    pub fn detach(&self, surface: SurfaceId) -> RenderResult<Option<SurfaceId>> {
        self.with(|s| -> RenderResult<Option<SurfaceId>> {
            let parent = s.parent(surface)?;
            if let Some(parent) = parent {
                s.remove_child(parent, surface)?;
            }
            Ok(parent)
        })
    }

    /// The surface's parent.
    pub fn parent(&self, surface: SurfaceId) -> RenderResult<Option<SurfaceId>> {
        self.with(|s| s.parent(surface))
    }

    /// The surface's children in order.
    pub fn children(&self, surface: SurfaceId) -> RenderResult<Vec<SurfaceId>> {
        self.with(|s| s.children(surface))
    }

    /// The head region.
    pub fn head(&self) -> Option<SurfaceId> {
        self.with(|s| s.head())
    }

    /// The body region.
    pub fn body(&self) -> Option<SurfaceId> {
        self.with(|s| s.body())
    }

    /// All surfaces whose attribute `name` equals `value`.
    pub fn query_by_attribute(&self, name: &str, value: &str) -> Vec<SurfaceId> {
        self.with(|s| s.query_by_attribute(name, value))
    }

    // =========================================================================
    // Class list
    // =========================================================================

    /// The surface's classes, in order.
    pub fn classes(&self, surface: SurfaceId) -> RenderResult<Vec<String>> {
        Ok(self
            .attribute(surface, "class")?
            .map(|list| list.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default())
    }

    /// Whether the surface carries the class.
    pub fn has_class(&self, surface: SurfaceId, class: &str) -> RenderResult<bool> {
        Ok(self.classes(surface)?.iter().any(|c| c == class))
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add_class(&self, surface: SurfaceId, class: &str) -> RenderResult<bool> {
        self.with(|s| -> RenderResult<bool> {
            let current = s.attribute(surface, "class")?.unwrap_or_default();
            if current.split_whitespace().any(|c| c == class) {
                return Ok(false);
            }
            let updated = if current.trim().is_empty() {
                class.to_string()
            } else {
                format!("{} {}", current.trim_end(), class)
            };
            s.set_attribute(surface, "class", &updated)?;
            Ok(true)
        })
    }

    /// Remove a class. Returns whether it was present.
    pub fn remove_class(&self, surface: SurfaceId, class: &str) -> RenderResult<bool> {
        self.with(|s| -> RenderResult<bool> {
            let Some(current) = s.attribute(surface, "class")? else {
                return Ok(false);
            };
            let remaining: Vec<&str> = current.split_whitespace().filter(|c| *c != class).collect();
            if remaining.len() == current.split_whitespace().count() {
                return Ok(false);
            }
            s.set_attribute(surface, "class", &remaining.join(" "))?;
            Ok(true)
        })
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("ptr", &Arc::as_ptr(&self.inner))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_tree() {
        let doc = Document::in_memory();
        let other = doc.clone();
        let surface = doc.create_surface("div");
        assert!(other.contains(surface));
        assert!(doc.ptr_eq(&other));
        assert!(!doc.ptr_eq(&Document::in_memory()));
    }

    #[test]
    fn test_class_list() {
        let doc = Document::in_memory();
        let surface = doc.create_surface("div");

        assert!(doc.add_class(surface, "QWidget").unwrap());
        assert!(!doc.add_class(surface, "QWidget").unwrap());
        assert!(doc.add_class(surface, "primary").unwrap());
        assert_eq!(doc.classes(surface).unwrap(), vec!["QWidget", "primary"]);
        assert_eq!(
            doc.attribute(surface, "class").unwrap().as_deref(),
            Some("QWidget primary")
        );

        assert!(doc.remove_class(surface, "QWidget").unwrap());
        assert!(!doc.remove_class(surface, "QWidget").unwrap());
        assert!(doc.has_class(surface, "primary").unwrap());
    }

    #[test]
    fn test_detach() {
        let doc = Document::in_memory();
        let body = doc.body().unwrap();
        let surface = doc.create_surface("div");

        assert_eq!(doc.detach(surface), Ok(None));
        doc.append_child(body, surface).unwrap();
        assert_eq!(doc.detach(surface), Ok(Some(body)));
        assert_eq!(doc.parent(surface), Ok(None));
    }

    #[test]
    fn test_raw_round_trip() {
        let doc = Document::in_memory();
        let surface = doc.create_surface("span");
        assert_eq!(SurfaceId::from_raw(surface.as_raw()), surface);
    }
}
