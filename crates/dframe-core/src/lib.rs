//! Core systems for DFrame.
//!
//! This crate provides the foundational components of the DFrame toolkit:
//!
//! - **Object Model**: Parent-child ownership, naming, explicit cascading destruction
//! - **Signal/Slot System**: Synchronous, typed event dispatch
//! - **Logging**: `tracing` targets and object tree visualization
//!
//! # Signal/Slot Example
//!
//! ```
//! use dframe_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Ownership Example
//!
//! ```
//! use dframe_core::{init_global_registry, QObject};
//!
//! init_global_registry();
//!
//! let window = QObject::new(None).unwrap();
//! let child = QObject::new(Some(&window)).unwrap();
//! child.set_object_name("child").unwrap();
//!
//! // Destroying the parent destroys the child first.
//! assert_eq!(window.destroy(), 2);
//! assert!(!child.is_alive());
//! ```

pub mod logging;
pub mod object;
pub mod signal;

pub use logging::{ObjectTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use object::{
    global_registry, init_global_registry, DestroyHook, DestroyedObject, Object, ObjectBase,
    ObjectError, ObjectId, ObjectKind, ObjectRegistry, ObjectResult, QObject, ReparentHook,
    SharedObjectRegistry, WidgetState,
};
pub use signal::{ConnectionGuard, ConnectionId, Signal, SignalEmitter, Slot};
