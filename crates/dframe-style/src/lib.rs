//! Style sheet cascade for DFrame.
//!
//! This crate keeps style rules and mirrors them into the render document:
//!
//! - **Selectors**: Flat type-name (`QLabel`) and class (`.QPushButton`) selectors
//! - **Merging**: Per-property, last write wins, insertion order preserved
//! - **Regeneration**: One style resource per sheet, rewritten after every change
//! - **Type tagging**: Widget surfaces get a class named after their type
//!
//! # Example
//!
//! ```
//! use dframe_render::Document;
//! use dframe_style::prelude::*;
//!
//! let doc = Document::in_memory();
//! let mut sheet = QStyleSheet::new(&doc).unwrap();
//! sheet.add_rule(".QPushButton", [("color", "white"), ("padding", "4px")]).unwrap();
//! sheet.add_rule(".QPushButton", [("color", "black")]).unwrap();
//!
//! assert_eq!(
//!     sheet.css_text(),
//!     ".QPushButton {\n  color: black;\n  padding: 4px;\n}\n"
//! );
//! ```

pub mod rule;
pub mod selector;
pub mod stylesheet;

mod error;

pub use error::{Error, Result};
pub use rule::StyleRule;
pub use selector::Selector;
pub use stylesheet::StyleSheet;

/// Qt-style name for [`StyleSheet`].
pub type QStyleSheet = StyleSheet;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::rule::StyleRule;
    pub use crate::selector::Selector;
    pub use crate::stylesheet::StyleSheet;
    pub use crate::QStyleSheet;
}
