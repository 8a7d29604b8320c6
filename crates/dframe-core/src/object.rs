//! Object model for DFrame.
//!
//! Provides the base object system with:
//! - Unique object identifiers via arena-based storage
//! - Parent-child ownership with explicit, cascading destruction
//! - Optional, non-unique object names for lookup
//! - Named signals whose registrations are released with their object
//!
//! This is the Rust equivalent of Qt's QObject system. Parents and children
//! refer to each other by [`ObjectId`] only, so the ownership graph never
//! forms reference cycles and destruction walks keys rather than live
//! references.
//!
//! # Key Types
//!
//! - [`Object`] - Base trait that all objects implement
//! - [`ObjectBase`] - Handle struct for implementing [`Object`]
//! - [`QObject`] - The plain, non-visual object
//! - [`ObjectKind`] - Closed type tag assigned at construction
//! - [`ObjectRegistry`] - Central arena managing all objects
//! - [`SharedObjectRegistry`] - Lock-guarded wrapper around [`ObjectRegistry`]
//!
//! # Lifetime
//!
//! Dropping a handle never destroys the object it refers to. Objects are
//! destroyed by an explicit [`ObjectBase::destroy`], which cascades
//! depth-first through the children, and is a no-op the second time.

use std::fmt;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use crate::logging::{span_names, targets, PerfSpan};
use crate::signal::{Signal, SignalEmitter};

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// `ObjectId`s are stable handles that remain valid even as the object tree
    /// changes. They become invalid when the object is destroyed and are never
    /// reused for a different object.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    ///
    /// The raw value can be converted back using [`ObjectId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create an ObjectId from a raw u64 value.
    ///
    /// Note: This does not check if the ObjectId exists in the registry.
    #[inline]
    pub fn from_raw(raw: u64) -> Option<Self> {
        let key_data = slotmap::KeyData::from_ffi(raw);
        Some(Self::from(key_data))
    }
}

/// The closed set of object types.
///
/// Assigned once at construction and used for anything type-directed: widget
/// detection when walking ancestors, and the class name the style sheet tags
/// render surfaces with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// A plain, non-visual object.
    Object,
    /// A generic widget.
    Widget,
    /// A text label.
    Label,
    /// A clickable push button.
    PushButton,
}

impl ObjectKind {
    /// The declared type name, e.g. `"QPushButton"`.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Object => "QObject",
            Self::Widget => "QWidget",
            Self::Label => "QLabel",
            Self::PushButton => "QPushButton",
        }
    }

    /// Whether objects of this kind own a render surface.
    pub fn is_widget(self) -> bool {
        !matches!(self, Self::Object)
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to set an object as its own parent/ancestor.
    CircularParentage,
    /// The object is not a widget.
    NotAWidget,
    /// The object registry is not initialized.
    RegistryNotInitialized,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
            Self::NotAWidget => write!(f, "Object is not a widget"),
            Self::RegistryNotInitialized => write!(f, "Object registry not initialized"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Widget-specific state stored in the registry.
///
/// Kept next to the ownership data so that the style sheet and layouts can
/// reach a widget's surface knowing only its [`ObjectId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WidgetState {
    /// Whether the widget is visible (its own state, not considering ancestors).
    pub visible: bool,
    /// Raw key of the widget's render surface.
    pub surface: u64,
}

/// Callback run once when its object is destroyed.
pub type DestroyHook = Box<dyn FnOnce(ObjectId) + Send + Sync>;

/// Callback run after a reparent may have changed a widget's nearest widget
/// ancestor.
pub type ReparentHook = Arc<dyn Fn(ObjectId) + Send + Sync>;

/// Internal data stored in the registry for each object.
struct ObjectData {
    name: Option<String>,
    kind: ObjectKind,
    parent: Option<ObjectId>,
    /// Child objects (owned), in insertion order.
    children: Vec<ObjectId>,
    destroyed: Arc<Signal<ObjectId>>,
    /// Signals released when the object is destroyed.
    signals: Vec<(&'static str, Arc<dyn SignalEmitter>)>,
    destroy_hooks: Vec<DestroyHook>,
    reparent_hooks: Vec<ReparentHook>,
    widget_state: Option<WidgetState>,
}

impl ObjectData {
    fn new(id: ObjectId, kind: ObjectKind, parent: Option<ObjectId>) -> Self {
        Self {
            name: None,
            kind,
            parent,
            children: Vec::new(),
            destroyed: Arc::new(Signal::with_owner(id)),
            signals: Vec::new(),
            destroy_hooks: Vec::new(),
            reparent_hooks: Vec::new(),
            widget_state: None,
        }
    }
}

/// An object that has been removed from the registry but not yet released.
///
/// Produced by [`ObjectRegistry::destroy`] in depth-first post-order; call
/// [`release`](Self::release) on each, in order, once no registry lock is
/// held.
pub struct DestroyedObject {
    id: ObjectId,
    kind: ObjectKind,
    destroyed: Arc<Signal<ObjectId>>,
    signals: Vec<(&'static str, Arc<dyn SignalEmitter>)>,
    destroy_hooks: Vec<DestroyHook>,
}

impl DestroyedObject {
    /// The destroyed object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The destroyed object's kind.
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// Run destroy hooks, emit `destroyed`, then drop every signal registration.
    pub fn release(self) {
        for hook in self.destroy_hooks {
            hook(self.id);
        }
        self.destroyed.emit(self.id);
        for (_, signal) in &self.signals {
            signal.disconnect_all();
        }
        self.destroyed.disconnect_all();
    }
}

impl fmt::Debug for DestroyedObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestroyedObject")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The central registry that manages all objects and their relationships.
///
/// Uses arena-based storage via SlotMap for stable object IDs and efficient
/// parent-child relationship management.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object, optionally as the last child of `parent`.
    ///
    /// Fails without registering anything if `parent` does not exist.
    pub fn register(
        &mut self,
        kind: ObjectKind,
        parent: Option<ObjectId>,
    ) -> ObjectResult<ObjectId> {
        if let Some(parent_id) = parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
        }

        let id = self
            .objects
            .insert_with_key(|id| ObjectData::new(id, kind, parent));
        if let Some(parent_data) = parent.and_then(|p| self.objects.get_mut(p)) {
            parent_data.children.push(id);
        }
        tracing::trace!(target: targets::OBJECT, ?id, %kind, ?parent, "registered object");
        Ok(id)
    }

    /// Remove an object and all its descendants from the registry.
    ///
    /// Descendants come first in the returned list (depth-first post-order),
    /// the object itself last. The object is detached from its parent's child
    /// list. Destroying an unknown or already destroyed object returns an
    /// empty list.
    pub fn destroy(&mut self, id: ObjectId) -> Vec<DestroyedObject> {
        if !self.objects.contains_key(id) {
            tracing::trace!(target: targets::OBJECT, ?id, "destroy of unknown object ignored");
            return Vec::new();
        }

        let order = self.collect_postorder(id);

        // Remove from parent's children list.
        if let Some(parent_id) = self.objects.get(id).and_then(|d| d.parent) {
            if let Some(parent_data) = self.objects.get_mut(parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        order
            .into_iter()
            .filter_map(|object_id| {
                self.objects.remove(object_id).map(|data| DestroyedObject {
                    id: object_id,
                    kind: data.kind,
                    destroyed: data.destroyed,
                    signals: data.signals,
                    destroy_hooks: data.destroy_hooks,
                })
            })
            .collect()
    }

    fn collect_postorder(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut result = Vec::new();
        self.postorder_into(id, &mut result);
        result
    }

    fn postorder_into(&self, id: ObjectId, result: &mut Vec<ObjectId>) {
        if let Some(data) = self.objects.get(id) {
            for &child_id in &data.children {
                self.postorder_into(child_id, result);
            }
            result.push(id);
        }
    }

    /// Check if an object exists in the registry.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Set the parent of an object.
    ///
    /// This handles removing from the old parent and appending to the new
    /// parent. Passing `None` makes the object a root object. Setting the
    /// current parent again is a no-op.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        let old_parent = self
            .objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)?;

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        if old_parent == new_parent {
            return Ok(());
        }

        if let Some(parent_data) = old_parent.and_then(|p| self.objects.get_mut(p)) {
            parent_data.children.retain(|&child| child != id);
        }
        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }
        if let Some(parent_data) = new_parent.and_then(|p| self.objects.get_mut(p)) {
            parent_data.children.push(id);
        }

        tracing::trace!(target: targets::OBJECT, ?id, ?old_parent, ?new_parent, "reparented object");
        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the children of an object, in insertion order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the object's kind.
    pub fn kind(&self, id: ObjectId) -> ObjectResult<ObjectKind> {
        self.objects
            .get(id)
            .map(|d| d.kind)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<Option<&str>> {
        self.objects
            .get(id)
            .map(|d| d.name.as_deref())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set or clear the object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: Option<String>) -> ObjectResult<()> {
        self.objects
            .get_mut(id)
            .map(|d| d.name = name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Find a child by name (direct children only).
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        let children = self.children(id)?;
        Ok(children.iter().copied().find(|&child_id| {
            self.objects
                .get(child_id)
                .is_some_and(|d| d.name.as_deref() == Some(name))
        }))
    }

    /// Recursively find all descendants with the given name.
    pub fn find_descendants_by_name(
        &self,
        id: ObjectId,
        name: &str,
    ) -> ObjectResult<Vec<ObjectId>> {
        let mut result = self.depth_first_preorder(id)?;
        result.remove(0);
        result.retain(|&d| {
            self.objects
                .get(d)
                .is_some_and(|data| data.name.as_deref() == Some(name))
        });
        Ok(result)
    }

    /// Get all ancestors of an object from immediate parent to root.
    pub fn ancestors(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        let mut current = self.parent(id)?;

        while let Some(current_id) = current {
            result.push(current_id);
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }

        Ok(result)
    }

    /// The nearest ancestor that is a widget, skipping plain objects.
    pub fn nearest_widget_ancestor(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        Ok(self
            .ancestors(id)?
            .into_iter()
            .find(|&a| self.objects.get(a).is_some_and(|d| d.kind.is_widget())))
    }

    /// Depth-first pre-order traversal: the node, then its children recursively.
    pub fn depth_first_preorder(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            if let Some(data) = self.objects.get(current) {
                stack.extend(data.children.iter().rev());
            }
        }
        Ok(result)
    }

    /// Depth-first post-order traversal: children recursively, then the node.
    pub fn depth_first_postorder(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }
        Ok(self.collect_postorder(id))
    }

    /// Register a named signal to be released when the object is destroyed.
    pub fn register_signal(
        &mut self,
        id: ObjectId,
        name: &'static str,
        signal: Arc<dyn SignalEmitter>,
    ) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.signals.push((name, signal));
        Ok(())
    }

    /// Names of the object's signals, `destroyed` first.
    pub fn signal_names(&self, id: ObjectId) -> ObjectResult<Vec<&'static str>> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        Ok(std::iter::once("destroyed")
            .chain(data.signals.iter().map(|(name, _)| *name))
            .collect())
    }

    /// The signal emitted when the object is destroyed.
    pub fn destroyed_signal(&self, id: ObjectId) -> ObjectResult<Arc<Signal<ObjectId>>> {
        self.objects
            .get(id)
            .map(|d| d.destroyed.clone())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Add a hook that runs when the object is destroyed.
    pub fn add_destroy_hook(&mut self, id: ObjectId, hook: DestroyHook) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.destroy_hooks.push(hook);
        Ok(())
    }

    /// Add a hook that runs when a reparent moves the object to a
    /// different place in the widget tree.
    pub fn add_reparent_hook(&mut self, id: ObjectId, hook: ReparentHook) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.reparent_hooks.push(hook);
        Ok(())
    }

    /// Reparent hooks affected by moving `id`.
    ///
    /// Those are the hooks of `id` itself when it is a widget, otherwise of
    /// its topmost widget descendants. Widgets further down keep their
    /// nearest widget ancestor.
    fn reparent_hooks_under(&self, id: ObjectId) -> Vec<(ObjectId, ReparentHook)> {
        let mut hooks = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(data) = self.objects.get(current) else {
                continue;
            };
            if data.widget_state.is_some() {
                hooks.extend(data.reparent_hooks.iter().map(|hook| (current, hook.clone())));
            } else {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        hooks
    }

    // =========================================================================
    // Widget State
    // =========================================================================

    /// Initialize widget state for an object.
    ///
    /// Fails with [`ObjectError::NotAWidget`] for plain objects.
    pub fn init_widget_state(&mut self, id: ObjectId, state: WidgetState) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        if !data.kind.is_widget() {
            return Err(ObjectError::NotAWidget);
        }
        data.widget_state = Some(state);
        Ok(())
    }

    /// Get the widget state for an object.
    ///
    /// Returns `None` if the object is not a widget.
    pub fn widget_state(&self, id: ObjectId) -> ObjectResult<Option<WidgetState>> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        Ok(data.widget_state)
    }

    /// Set the visible state for a widget.
    pub fn set_widget_visible(&mut self, id: ObjectId, visible: bool) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        let state = data.widget_state.as_mut().ok_or(ObjectError::NotAWidget)?;
        state.visible = visible;
        Ok(())
    }

    /// Get the number of registered objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over all root objects (objects with no parent).
    pub fn root_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Debug dump of the object tree.
    pub fn dump_object_tree(&self, id: ObjectId) -> ObjectResult<String> {
        let mut output = String::new();
        self.dump_object_tree_recursive(id, 0, &mut output)?;
        Ok(output)
    }

    fn dump_object_tree_recursive(
        &self,
        id: ObjectId,
        depth: usize,
        output: &mut String,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        let indent = "  ".repeat(depth);
        let name_display = data.name.as_deref().unwrap_or("(unnamed)");
        output.push_str(&format!(
            "{}[{:?}] {} ({})\n",
            indent, id, name_display, data.kind
        ));
        for &child_id in &data.children {
            self.dump_object_tree_recursive(child_id, depth + 1, output)?;
        }
        Ok(())
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`ObjectRegistry`].
///
/// Provides concurrent read access with exclusive write access via `RwLock`.
/// Destroy hooks and `destroyed` slots run after the lock is released, so
/// they may freely call back into the registry.
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new shared object registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    /// Register a new object.
    pub fn register(&self, kind: ObjectKind, parent: Option<ObjectId>) -> ObjectResult<ObjectId> {
        self.inner.write().register(kind, parent)
    }

    /// Destroy an object and its descendants.
    ///
    /// Returns how many objects were destroyed; `0` if `id` was already gone.
    pub fn destroy(&self, id: ObjectId) -> usize {
        let _perf = PerfSpan::new(span_names::DESTROY);
        let destroyed = self.inner.write().destroy(id);
        let count = destroyed.len();
        if count > 0 {
            tracing::debug!(target: targets::OBJECT, ?id, count, "destroying object tree");
        }
        for object in destroyed {
            object.release();
        }
        count
    }

    /// Check if an object exists.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Set the parent of an object.
    ///
    /// When the parent changes, the reparent hooks of the widgets that moved
    /// run after the lock is released.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        let hooks = {
            let mut inner = self.inner.write();
            let old_parent = inner.parent(id)?;
            inner.set_parent(id, parent)?;
            if old_parent == parent {
                return Ok(());
            }
            inner.reparent_hooks_under(id)
        };
        for (object, hook) in hooks {
            hook(object);
        }
        Ok(())
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Get the children of an object (returns owned Vec for thread safety).
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Get the object's kind.
    pub fn kind(&self, id: ObjectId) -> ObjectResult<ObjectKind> {
        self.inner.read().kind(id)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<Option<String>> {
        self.inner
            .read()
            .object_name(id)
            .map(|name| name.map(str::to_string))
    }

    /// Set or clear the object's name.
    pub fn set_object_name(&self, id: ObjectId, name: Option<String>) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().find_child_by_name(id, name)
    }

    /// Recursively find all descendants with the given name.
    pub fn find_descendants_by_name(
        &self,
        id: ObjectId,
        name: &str,
    ) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().find_descendants_by_name(id, name)
    }

    /// Get all ancestors from immediate parent to root.
    pub fn ancestors(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().ancestors(id)
    }

    /// The nearest widget ancestor.
    pub fn nearest_widget_ancestor(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().nearest_widget_ancestor(id)
    }

    /// Depth-first pre-order traversal.
    pub fn depth_first_preorder(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().depth_first_preorder(id)
    }

    /// Depth-first post-order traversal.
    pub fn depth_first_postorder(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().depth_first_postorder(id)
    }

    /// Register a named signal.
    pub fn register_signal(
        &self,
        id: ObjectId,
        name: &'static str,
        signal: Arc<dyn SignalEmitter>,
    ) -> ObjectResult<()> {
        self.inner.write().register_signal(id, name, signal)
    }

    /// Names of the object's signals.
    pub fn signal_names(&self, id: ObjectId) -> ObjectResult<Vec<&'static str>> {
        self.inner.read().signal_names(id)
    }

    /// The signal emitted when the object is destroyed.
    pub fn destroyed_signal(&self, id: ObjectId) -> ObjectResult<Arc<Signal<ObjectId>>> {
        self.inner.read().destroyed_signal(id)
    }

    /// Add a destroy hook.
    pub fn add_destroy_hook(&self, id: ObjectId, hook: DestroyHook) -> ObjectResult<()> {
        self.inner.write().add_destroy_hook(id, hook)
    }

    /// Add a reparent hook.
    pub fn add_reparent_hook(&self, id: ObjectId, hook: ReparentHook) -> ObjectResult<()> {
        self.inner.write().add_reparent_hook(id, hook)
    }

    /// Initialize widget state.
    pub fn init_widget_state(&self, id: ObjectId, state: WidgetState) -> ObjectResult<()> {
        self.inner.write().init_widget_state(id, state)
    }

    /// Get widget state.
    pub fn widget_state(&self, id: ObjectId) -> ObjectResult<Option<WidgetState>> {
        self.inner.read().widget_state(id)
    }

    /// Set widget visibility.
    pub fn set_widget_visible(&self, id: ObjectId, visible: bool) -> ObjectResult<()> {
        self.inner.write().set_widget_visible(id, visible)
    }

    /// Get the number of registered objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    /// Get all root objects.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.inner.read().root_objects().collect()
    }

    /// Debug dump of the object tree.
    pub fn dump_object_tree(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().dump_object_tree(id)
    }

    /// Execute a closure with read access to the registry.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ObjectRegistry) -> R,
    {
        f(&self.inner.read())
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Initialize the global object registry.
///
/// Called by the application context; calling it again is harmless.
pub fn init_global_registry() {
    GLOBAL_REGISTRY.get_or_init(SharedObjectRegistry::new);
}

/// Get a reference to the global object registry.
///
/// Returns an error if the registry hasn't been initialized.
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    GLOBAL_REGISTRY
        .get()
        .ok_or(ObjectError::RegistryNotInitialized)
}

/// The base trait that all objects implement.
///
/// # Example
///
/// ```
/// use dframe_core::{init_global_registry, Object, ObjectBase, ObjectId, ObjectKind};
///
/// init_global_registry();
///
/// struct Counter {
///     base: ObjectBase,
/// }
///
/// impl Object for Counter {
///     fn object_id(&self) -> ObjectId {
///         self.base.id()
///     }
/// }
///
/// let counter = Counter { base: ObjectBase::new(ObjectKind::Object, None).unwrap() };
/// assert!(counter.base.is_alive());
/// ```
pub trait Object {
    /// Get the unique ID of this object.
    fn object_id(&self) -> ObjectId;
}

impl Object for ObjectId {
    fn object_id(&self) -> ObjectId {
        *self
    }
}

/// Handle to an object in the global registry.
///
/// Holds only the object's ID; getters on a destroyed object return empty
/// values rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a new object of the given kind.
    pub fn new(kind: ObjectKind, parent: Option<ObjectId>) -> ObjectResult<Self> {
        let id = global_registry()?.register(kind, parent)?;
        Ok(Self { id })
    }

    /// Get the object's ID.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Whether the object has not been destroyed.
    pub fn is_alive(&self) -> bool {
        global_registry().is_ok_and(|r| r.contains(self.id))
    }

    /// Get the object's kind.
    pub fn kind(&self) -> ObjectResult<ObjectKind> {
        global_registry()?.kind(self.id)
    }

    /// Get the object's name.
    pub fn name(&self) -> Option<String> {
        global_registry()
            .and_then(|r| r.object_name(self.id))
            .ok()
            .flatten()
    }

    /// Set the object's name.
    pub fn set_name(&self, name: impl Into<String>) -> ObjectResult<()> {
        global_registry()?.set_object_name(self.id, Some(name.into()))
    }

    /// Get the parent object's ID.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.parent(self.id))
            .ok()
            .flatten()
    }

    /// Set the parent object.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry()?.set_parent(self.id, parent)
    }

    /// Get the IDs of child objects.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.children(self.id))
            .unwrap_or_default()
    }

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.find_child_by_name(self.id, name))
            .ok()
            .flatten()
    }

    /// Get all ancestors from immediate parent to root.
    pub fn ancestors(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.ancestors(self.id))
            .unwrap_or_default()
    }

    /// The signal emitted when this object is destroyed.
    pub fn destroyed(&self) -> ObjectResult<Arc<Signal<ObjectId>>> {
        global_registry()?.destroyed_signal(self.id)
    }

    /// Register a named signal to be released with this object.
    pub fn register_signal(
        &self,
        name: &'static str,
        signal: Arc<dyn SignalEmitter>,
    ) -> ObjectResult<()> {
        global_registry()?.register_signal(self.id, name, signal)
    }

    /// Run `hook` when this object is destroyed.
    pub fn on_destroy<F>(&self, hook: F) -> ObjectResult<()>
    where
        F: FnOnce(ObjectId) + Send + Sync + 'static,
    {
        global_registry()?.add_destroy_hook(self.id, Box::new(hook))
    }

    /// Destroy this object and all of its descendants.
    ///
    /// Returns how many objects were destroyed; a second call returns `0`.
    pub fn destroy(&self) -> usize {
        global_registry().map_or(0, |r| r.destroy(self.id))
    }
}

impl Object for ObjectBase {
    fn object_id(&self) -> ObjectId {
        self.id
    }
}

/// The plain, non-visual object.
///
/// # Example
///
/// ```
/// use dframe_core::{init_global_registry, Object, QObject};
///
/// init_global_registry();
///
/// let root = QObject::new(None).unwrap();
/// let child = QObject::new(Some(&root)).unwrap();
/// assert_eq!(child.parent(), Some(root.object_id()));
///
/// assert_eq!(root.destroy(), 2);
/// assert!(!child.is_alive());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QObject {
    base: ObjectBase,
}

impl QObject {
    /// Create an object, optionally owned by `parent`.
    pub fn new(parent: Option<&dyn Object>) -> ObjectResult<Self> {
        let base = ObjectBase::new(ObjectKind::Object, parent.map(|p| p.object_id()))?;
        Ok(Self { base })
    }

    /// Access the underlying object handle.
    pub fn base(&self) -> &ObjectBase {
        &self.base
    }

    /// Get the object's name.
    pub fn object_name(&self) -> Option<String> {
        self.base.name()
    }

    /// Set the object's name.
    pub fn set_object_name(&self, name: impl Into<String>) -> ObjectResult<()> {
        self.base.set_name(name)
    }

    /// Get the parent object's ID.
    pub fn parent(&self) -> Option<ObjectId> {
        self.base.parent()
    }

    /// Move this object under `parent`, or make it a root.
    pub fn set_parent(&self, parent: Option<&dyn Object>) -> ObjectResult<()> {
        self.base.set_parent(parent.map(|p| p.object_id()))
    }

    /// Get the IDs of child objects.
    pub fn children(&self) -> Vec<ObjectId> {
        self.base.children()
    }

    /// Whether the object has not been destroyed.
    pub fn is_alive(&self) -> bool {
        self.base.is_alive()
    }

    /// Destroy this object and all of its descendants.
    pub fn destroy(&self) -> usize {
        self.base.destroy()
    }
}

impl Object for QObject {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_object_creation() {
        setup();
        let obj = QObject::new(None).unwrap();
        assert!(global_registry().unwrap().contains(obj.object_id()));
        assert_eq!(obj.base().kind(), Ok(ObjectKind::Object));
        assert_eq!(obj.parent(), None);
    }

    #[test]
    fn test_object_name() {
        setup();
        let obj = QObject::new(None).unwrap();
        assert_eq!(obj.object_name(), None);
        obj.set_object_name("test_object").unwrap();
        assert_eq!(obj.object_name().as_deref(), Some("test_object"));
    }

    #[test]
    fn test_names_are_not_identity() {
        setup();
        let a = QObject::new(None).unwrap();
        let b = QObject::new(None).unwrap();
        a.set_object_name("twin").unwrap();
        b.set_object_name("twin").unwrap();
        assert_ne!(a, b);
        assert_ne!(a.object_id(), b.object_id());
    }

    #[test]
    fn test_parent_child() {
        setup();
        let parent = QObject::new(None).unwrap();
        let child = QObject::new(Some(&parent)).unwrap();

        assert_eq!(child.parent(), Some(parent.object_id()));
        assert_eq!(parent.children(), vec![child.object_id()]);
    }

    #[test]
    fn test_invalid_parent_leaves_no_entry() {
        setup();
        let parent = QObject::new(None).unwrap();
        parent.destroy();

        let registry = global_registry().unwrap();
        let result = registry.register(ObjectKind::Object, Some(parent.object_id()));
        assert_eq!(result, Err(ObjectError::InvalidObjectId));
        assert!(QObject::new(Some(&parent)).is_err());
    }

    #[test]
    fn test_find_child_by_name() {
        setup();
        let parent = QObject::new(None).unwrap();
        let child1 = QObject::new(Some(&parent)).unwrap();
        let child2 = QObject::new(Some(&parent)).unwrap();
        child1.set_object_name("first").unwrap();
        child2.set_object_name("second").unwrap();

        assert_eq!(
            parent.base().find_child_by_name("second"),
            Some(child2.object_id())
        );
        assert_eq!(parent.base().find_child_by_name("third"), None);
    }

    #[test]
    fn test_find_descendants_by_name() {
        setup();
        let root = QObject::new(None).unwrap();
        let mid = QObject::new(Some(&root)).unwrap();
        let leaf = QObject::new(Some(&mid)).unwrap();
        root.set_object_name("item").unwrap();
        mid.set_object_name("item").unwrap();
        leaf.set_object_name("item").unwrap();

        let found = global_registry()
            .unwrap()
            .find_descendants_by_name(root.object_id(), "item")
            .unwrap();
        assert_eq!(found, vec![mid.object_id(), leaf.object_id()]);
    }

    #[test]
    fn test_cascade_destroy() {
        setup();
        let root = QObject::new(None).unwrap();
        let child1 = QObject::new(Some(&root)).unwrap();
        let child2 = QObject::new(Some(&root)).unwrap();
        let grandchild = QObject::new(Some(&child1)).unwrap();

        assert_eq!(root.destroy(), 4);

        for obj in [root, child1, child2, grandchild] {
            assert!(!obj.is_alive());
        }
    }

    #[test]
    fn test_destroy_is_idempotent() {
        setup();
        let root = QObject::new(None).unwrap();
        let child = QObject::new(Some(&root)).unwrap();

        assert_eq!(child.destroy(), 1);
        assert_eq!(child.destroy(), 0);
        assert!(root.children().is_empty());
        assert_eq!(root.destroy(), 1);
        assert_eq!(root.destroy(), 0);
    }

    #[test]
    fn test_destroy_order_is_children_first() {
        setup();
        let root = QObject::new(None).unwrap();
        let child = QObject::new(Some(&root)).unwrap();
        let grandchild = QObject::new(Some(&child)).unwrap();

        let order = Arc::new(Mutex::new(Vec::new()));
        for obj in [root, child, grandchild] {
            let order = order.clone();
            obj.base()
                .on_destroy(move |id| order.lock().push(id))
                .unwrap();
        }

        root.destroy();
        assert_eq!(
            *order.lock(),
            vec![grandchild.object_id(), child.object_id(), root.object_id()]
        );
    }

    #[test]
    fn test_destroyed_signal_fires_once_per_object() {
        setup();
        let root = QObject::new(None).unwrap();
        let mut all = vec![root];
        for _ in 0..3 {
            let child = QObject::new(Some(&root)).unwrap();
            all.push(child);
            all.push(QObject::new(Some(&child)).unwrap());
        }

        let count = Arc::new(AtomicUsize::new(0));
        for obj in &all {
            let count = count.clone();
            obj.base().destroyed().unwrap().connect(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        root.destroy();
        root.destroy();
        assert_eq!(count.load(Ordering::SeqCst), all.len());
    }

    #[test]
    fn test_destroy_releases_named_signals() {
        setup();
        let obj = QObject::new(None).unwrap();
        let signal = Arc::new(Signal::<()>::with_owner(obj.object_id()));
        signal.connect(|_| {});
        obj.base().register_signal("changed", signal.clone()).unwrap();

        assert_eq!(
            global_registry().unwrap().signal_names(obj.object_id()).unwrap(),
            vec!["destroyed", "changed"]
        );

        obj.destroy();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_circular_parentage_rejected() {
        setup();
        let a = QObject::new(None).unwrap();
        let b = QObject::new(Some(&a)).unwrap();

        assert_eq!(a.set_parent(Some(&b)), Err(ObjectError::CircularParentage));
        assert_eq!(a.set_parent(Some(&a)), Err(ObjectError::CircularParentage));
        assert_eq!(a.parent(), None);
    }

    #[test]
    fn test_reparenting() {
        setup();
        let parent1 = QObject::new(None).unwrap();
        let parent2 = QObject::new(None).unwrap();
        let child = QObject::new(Some(&parent1)).unwrap();

        child.set_parent(Some(&parent2)).unwrap();

        assert!(parent1.children().is_empty());
        assert_eq!(parent2.children(), vec![child.object_id()]);
        assert_eq!(child.parent(), Some(parent2.object_id()));

        child.set_parent(None).unwrap();
        assert!(parent2.children().is_empty());
        assert_eq!(child.parent(), None);
    }

    #[test]
    fn test_nearest_widget_ancestor_skips_plain_objects() {
        setup();
        let registry = global_registry().unwrap();
        let widget = registry.register(ObjectKind::Widget, None).unwrap();
        let plain = registry.register(ObjectKind::Object, Some(widget)).unwrap();
        let leaf = registry.register(ObjectKind::Label, Some(plain)).unwrap();

        assert_eq!(registry.nearest_widget_ancestor(leaf), Ok(Some(widget)));
        assert_eq!(registry.nearest_widget_ancestor(widget), Ok(None));
        registry.destroy(widget);
    }

    #[test]
    fn test_widget_state_only_for_widgets() {
        setup();
        let registry = global_registry().unwrap();
        let plain = registry.register(ObjectKind::Object, None).unwrap();
        let state = WidgetState {
            visible: true,
            surface: 1,
        };
        assert_eq!(
            registry.init_widget_state(plain, state),
            Err(ObjectError::NotAWidget)
        );

        let button = registry.register(ObjectKind::PushButton, None).unwrap();
        registry.init_widget_state(button, state).unwrap();
        registry.set_widget_visible(button, false).unwrap();
        assert_eq!(
            registry.widget_state(button).unwrap().map(|s| s.visible),
            Some(false)
        );

        registry.destroy(plain);
        registry.destroy(button);
    }

    #[test]
    fn test_traversals() {
        setup();
        let root = QObject::new(None).unwrap();
        let a = QObject::new(Some(&root)).unwrap();
        let a1 = QObject::new(Some(&a)).unwrap();
        let b = QObject::new(Some(&root)).unwrap();

        let registry = global_registry().unwrap();
        let ids = |objs: &[QObject]| objs.iter().map(|o| o.object_id()).collect::<Vec<_>>();
        assert_eq!(
            registry.depth_first_preorder(root.object_id()).unwrap(),
            ids(&[root, a, a1, b])
        );
        assert_eq!(
            registry.depth_first_postorder(root.object_id()).unwrap(),
            ids(&[a1, a, b, root])
        );
        assert_eq!(a1.base().ancestors(), ids(&[a, root]));
    }

    #[test]
    fn test_reparent_hooks_run_for_moved_widgets() {
        setup();
        let registry = global_registry().unwrap();
        let state = WidgetState { visible: true, surface: 0 };
        let root = registry.register(ObjectKind::Widget, None).unwrap();
        let holder = registry.register(ObjectKind::Object, Some(root)).unwrap();
        let child = registry.register(ObjectKind::Widget, Some(holder)).unwrap();
        let grandchild = registry.register(ObjectKind::Widget, Some(child)).unwrap();
        for id in [root, child, grandchild] {
            registry.init_widget_state(id, state).unwrap();
        }

        let moved = Arc::new(Mutex::new(Vec::new()));
        for id in [child, grandchild] {
            let log = moved.clone();
            registry
                .add_reparent_hook(
                    id,
                    Arc::new(move |id| {
                        // The new parent is already visible to the hook.
                        let parent = global_registry().unwrap().parent(id).unwrap();
                        log.lock().push((id, parent));
                    }),
                )
                .unwrap();
        }

        registry.set_parent(holder, None).unwrap();
        assert_eq!(*moved.lock(), vec![(child, Some(holder))]);

        registry.set_parent(holder, None).unwrap();
        assert_eq!(moved.lock().len(), 1);

        registry.set_parent(child, Some(root)).unwrap();
        assert_eq!(moved.lock()[1], (child, Some(root)));
        assert_eq!(moved.lock().len(), 2);

        assert_eq!(
            registry.set_parent(root, Some(grandchild)),
            Err(ObjectError::CircularParentage)
        );
        assert_eq!(moved.lock().len(), 2);

        registry.destroy(root);
        registry.destroy(holder);
    }

    #[test]
    fn test_object_kind_names() {
        assert_eq!(ObjectKind::PushButton.type_name(), "QPushButton");
        assert_eq!(ObjectKind::Label.to_string(), "QLabel");
        assert!(ObjectKind::Widget.is_widget());
        assert!(!ObjectKind::Object.is_widget());
    }
}
