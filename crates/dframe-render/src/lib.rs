//! Render substrate layer for DFrame.
//!
//! DFrame widgets are bound to surfaces in a retained, browser-style document
//! tree. This crate defines the contract that tree must satisfy and provides
//! an in-memory implementation of it.
//!
//! # Getting Started
//!
//! ```
//! use dframe_render::Document;
//!
//! let doc = Document::in_memory();
//! let body = doc.body().unwrap();
//!
//! let label = doc.create_surface("span");
//! doc.set_text(label, "Hello").unwrap();
//! doc.set_attribute(label, "data-object-name", "greeting").unwrap();
//! doc.append_child(body, label).unwrap();
//!
//! assert_eq!(doc.query_by_attribute("data-object-name", "greeting"), vec![label]);
//! ```
//!
//! # Custom Substrates
//!
//! Implement [`RenderSubstrate`] to drive a different tree (a real browser
//! document, a terminal renderer) and wrap it with [`Document::new`].

mod error;
mod memory;
mod substrate;
mod types;

pub use error::{RenderError, RenderResult};
pub use memory::MemoryDocument;
pub use substrate::{Document, RenderSubstrate, SurfaceId};
pub use types::{px, Point, Rect, Size};
