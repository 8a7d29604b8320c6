//! Push button widget implementation.
//!
//! This module provides [`QPushButton`], a clickable button backed by a
//! `button` surface.
//!
//! # Example
//!
//! ```
//! use dframe::prelude::*;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let app = Application::in_memory();
//! let button = QPushButton::new(&app, "Click me!").unwrap();
//!
//! let clicks = Arc::new(AtomicUsize::new(0));
//! let counter = clicks.clone();
//! button.connect("clicked", move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }).unwrap();
//!
//! button.click();
//! assert_eq!(clicks.load(Ordering::SeqCst), 1);
//! ```

use std::sync::Arc;

use dframe_core::{ConnectionId, Object, ObjectId, ObjectKind, Signal};

use crate::application::Application;
use crate::error::{Error, Result};
use crate::widget::{Widget, WidgetBase};

/// Name of the signal emitted by [`QPushButton::click`].
pub const CLICKED: &str = "clicked";

/// A standard push button.
///
/// # Signals
///
/// - `clicked`: Emitted by [`click`](Self::click). Released with the button.
#[derive(Debug)]
pub struct QPushButton {
    base: WidgetBase,
    text: String,
    clicked: Arc<Signal<()>>,
}

impl QPushButton {
    /// Create a top-level button.
    pub fn new(app: &Application, text: impl Into<String>) -> Result<Self> {
        Self::with_parent(app, text, None)
    }

    /// Create a button under `parent`.
    pub fn with_parent(
        app: &Application,
        text: impl Into<String>,
        parent: Option<&dyn Object>,
    ) -> Result<Self> {
        let base = WidgetBase::new(
            app,
            ObjectKind::PushButton,
            "button",
            parent.map(|p| p.object_id()),
        )?;
        let clicked = Arc::new(Signal::with_owner(base.object_id()));
        let mut button = Self {
            base,
            text: String::new(),
            clicked,
        };
        let initialized = match button
            .base
            .object()
            .register_signal(CLICKED, button.clicked.clone())
        {
            Ok(()) => button.set_text(text),
            Err(err) => Err(err.into()),
        };
        if let Err(err) = initialized {
            button.base.destroy();
            return Err(err);
        }
        Ok(button)
    }

    /// The signal emitted when the button is clicked.
    pub fn clicked(&self) -> &Signal<()> {
        &self.clicked
    }

    /// Emit `clicked`, running every connected handler before returning.
    pub fn click(&self) {
        tracing::trace!(target: "dframe::widget", id = ?self.object_id(), "button clicked");
        self.clicked.emit(());
    }

    /// Connect `handler` to the event named `event`.
    ///
    /// `"clicked"` is the only event a push button emits; any other name is
    /// an error and nothing is connected.
    pub fn connect<F>(&self, event: &str, handler: F) -> Result<ConnectionId>
    where
        F: Fn() + Send + Sync + 'static,
    {
        match event {
            CLICKED => Ok(self.clicked.connect(move |_| handler())),
            other => Err(Error::unknown_event(self.kind().type_name(), other)),
        }
    }

    /// Disconnect a handler returned by [`connect`](Self::connect).
    ///
    /// Returns `false` if it was not connected.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.clicked.disconnect(id)
    }

    /// The button's text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the button's text.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.base.document().set_text(self.base.surface(), &text)?;
        self.text = text;
        Ok(())
    }
}

impl Object for QPushButton {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Widget for QPushButton {
    fn widget_base(&self) -> &WidgetBase {
        &self.base
    }

    fn widget_base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}
