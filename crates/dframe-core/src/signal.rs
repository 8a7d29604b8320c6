//! Signal/slot system for DFrame.
//!
//! A [`Signal`] is a synchronous, typed publish/subscribe channel bound to
//! (at most) one emitting owner. Slots are plain closures wrapped in a
//! [`Slot`] handle; the handle gives a slot an identity so that connecting
//! the same slot twice is a no-op rather than double delivery.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The channel itself
//! - [`Slot<Args>`] - A connectable callback with identity
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//! - [`SignalEmitter`] - Type-erased view used by the object registry
//!
//! # Delivery
//!
//! [`Signal::emit`] snapshots the connected slots, releases its lock, then
//! invokes every slot in the snapshot exactly once before returning. A slot
//! that connects or disconnects others (or destroys the emitting object)
//! never changes the pass that is already running. Order across slots is
//! unspecified.
//!
//! # Example
//!
//! ```
//! use dframe_core::{Signal, Slot};
//!
//! let text_changed = Signal::<String>::new();
//!
//! let slot = Slot::new(|text: &String| println!("Text changed to: {text}"));
//! text_changed.connect_slot(&slot);
//! text_changed.connect_slot(&slot); // already connected: no-op
//! assert_eq!(text_changed.connection_count(), 1);
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect_slot(&slot);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;
use crate::object::ObjectId;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// # Related
    ///
    /// - [`Signal::connect`] - Returns a `ConnectionId`
    /// - [`Signal::disconnect`] - Removes a connection by ID
    pub struct ConnectionId;
}

type SlotFn<Args> = dyn Fn(Option<ObjectId>, &Args) + Send + Sync;

/// A connectable callback.
///
/// Cloning a `Slot` yields the same slot: clones compare equal under
/// [`Slot::same_slot`] and a signal treats them as one registration.
pub struct Slot<Args> {
    callback: Arc<SlotFn<Args>>,
}

impl<Args: 'static> Slot<Args> {
    /// Wrap a closure that only needs the emitted arguments.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(move |_sender: Option<ObjectId>, args: &Args| f(args)),
        }
    }

    /// Wrap a closure that also receives the emitting owner.
    ///
    /// The sender is `None` for signals that are not bound to an object.
    pub fn with_sender<F>(f: F) -> Self
    where
        F: Fn(Option<ObjectId>, &Args) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(f),
        }
    }

    /// Whether two handles refer to the same slot.
    pub fn same_slot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }

    fn invoke(&self, sender: Option<ObjectId>, args: &Args) {
        (self.callback)(sender, args);
    }
}

impl<Args> Clone for Slot<Args> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<Args> fmt::Debug for Slot<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// A type-safe signal with set semantics over its connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, i32)` for multiple arguments.
///
/// # Related Types
///
/// - [`Slot`] - What gets connected
/// - [`ConnectionGuard`] - Scoped connection that auto-disconnects on drop
/// - [`crate::ObjectRegistry::register_signal`] - Ties a signal's lifetime to
///   an object's
pub struct Signal<Args> {
    /// The object this signal is emitted on behalf of.
    owner: Option<ObjectId>,
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal that is not bound to an owner.
    pub fn new() -> Self {
        Self {
            owner: None,
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Create a new signal emitted on behalf of `owner`.
    pub fn with_owner(owner: ObjectId) -> Self {
        Self {
            owner: Some(owner),
            ..Self::new()
        }
    }

    /// The object this signal is bound to, if any.
    pub fn owner(&self) -> Option<ObjectId> {
        self.owner
    }

    /// Connect a closure as a new slot.
    ///
    /// Every call creates a distinct slot; use [`connect_slot`](Self::connect_slot)
    /// when the same callback may be registered more than once.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.insert(Slot::new(slot))
    }

    /// Connect a slot, unless it is already connected.
    ///
    /// Returns the existing connection ID if the slot was already registered.
    pub fn connect_slot(&self, slot: &Slot<Args>) -> ConnectionId {
        let mut connections = self.connections.lock();
        if let Some((id, _)) = connections.iter().find(|(_, s)| s.same_slot(slot)) {
            tracing::trace!(target: targets::SIGNAL, ?id, "slot already connected");
            return id;
        }
        connections.insert(slot.clone())
    }

    fn insert(&self, slot: Slot<Args>) -> ConnectionId {
        self.connections.lock().insert(slot)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect a slot.
    ///
    /// Returns `false` if the slot was not connected.
    pub fn disconnect_slot(&self, slot: &Slot<Args>) -> bool {
        let mut connections = self.connections.lock();
        let found = connections
            .iter()
            .find(|(_, s)| s.same_slot(slot))
            .map(|(id, _)| id);
        match found {
            Some(id) => connections.remove(id).is_some(),
            None => false,
        }
    }

    /// Whether a slot is currently connected.
    pub fn is_connected(&self, slot: &Slot<Args>) -> bool {
        self.connections.lock().values().any(|s| s.same_slot(slot))
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking every connected slot once.
    ///
    /// All slots have returned by the time this returns.
    #[tracing::instrument(skip_all, target = "dframe_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let snapshot: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(
            target: targets::SIGNAL,
            owner = ?self.owner,
            connection_count = snapshot.len(),
            "emitting signal"
        );

        for slot in &snapshot {
            slot.invoke(self.owner, &args);
        }
    }

    /// Connect a closure for the lifetime of the returned guard.
    ///
    /// ```
    /// use dframe_core::Signal;
    /// use std::sync::atomic::{AtomicI32, Ordering};
    /// use std::sync::Arc;
    ///
    /// let signal = Signal::<i32>::new();
    /// let counter = Arc::new(AtomicI32::new(0));
    /// {
    ///     let counter_clone = counter.clone();
    ///     let _guard = signal.connect_scoped(move |&n| {
    ///         counter_clone.fetch_add(n, Ordering::SeqCst);
    ///     });
    ///     signal.emit(42);
    /// }
    /// signal.emit(43);
    /// assert_eq!(counter.load(Ordering::SeqCst), 42);
    /// ```
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard { signal: self, id }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("owner", &self.owner)
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

/// Type-erased operations common to all signals.
///
/// The object registry keeps its objects' signals behind this trait so that
/// destroying an object can release every registration without knowing the
/// argument types.
pub trait SignalEmitter: Send + Sync {
    /// Disconnect all slots.
    fn disconnect_all(&self);

    /// Get the number of connected slots.
    fn connection_count(&self) -> usize;

    /// Check if emission is blocked.
    fn is_blocked(&self) -> bool;

    /// Set whether emission is blocked.
    fn set_blocked(&self, blocked: bool);
}

impl<Args: 'static> SignalEmitter for Signal<Args> {
    fn disconnect_all(&self) {
        Signal::disconnect_all(self);
    }

    fn connection_count(&self) -> usize {
        Signal::connection_count(self)
    }

    fn is_blocked(&self) -> bool {
        Signal::is_blocked(self)
    }

    fn set_blocked(&self, blocked: bool) {
        Signal::set_blocked(self, blocked);
    }
}

/// A connection that is removed when the guard goes out of scope.
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args: 'static> ConnectionGuard<'_, Args> {
    /// The guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}
