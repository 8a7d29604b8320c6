//! Widget system for DFrame.
//!
//! This module provides the widget architecture:
//!
//! - [`Widget`] trait: The base trait for all visual objects
//! - [`WidgetBase`]: Common implementation binding an object to its surface
//! - [`widgets`]: The standard widgets
//! - [`layout`]: Box layouts
//!
//! # Widget Tree
//!
//! Widgets form a tree through parent-child relationships managed by the
//! object system from `dframe-core`. Their surfaces mirror that tree in the
//! render document, skipping plain objects: a widget's surface is a child
//! of its nearest widget ancestor's surface.
//!
//! # Lifetime
//!
//! Dropping a widget handle does not destroy it. The object tree owns the
//! widget until [`Widget::destroy`] is called on it or on an ancestor,
//! at which point its surface is released.

mod base;
pub mod layout;
mod traits;
pub mod widgets;

pub use base::WidgetBase;
pub use traits::Widget;
