//! Box layouts over the render document.
//!
//! A layout binds to one parent widget for its lifetime and arranges the
//! surfaces of the widgets added to it along a flow axis. Arrangement is
//! delegated to the substrate's box flow: the parent surface is switched to
//! `display: flex` and the layout only maintains child order and the inline
//! properties that drive the flow.
//!
//! - [`BoxLayout`]: the layout, vertical or horizontal by [`Orientation`]
//! - [`LayoutOptions`]: per-entry stretch and cross-axis alignment
//! - [`ContentMargins`]: padding between the parent's edges and its content
//!
//! # Example
//!
//! ```
//! use dframe::prelude::*;
//!
//! let app = Application::in_memory();
//! let root = QWidget::new(&app, None).unwrap();
//! let title = QLabel::with_parent(&app, "Title", Some(&root)).unwrap();
//! let ok = QPushButton::with_parent(&app, "OK", Some(&root)).unwrap();
//!
//! let mut layout = QVBoxLayout::vbox(&app, &root).unwrap();
//! layout.add_widget(&title, LayoutOptions::default()).unwrap();
//! layout.add_widget(&ok, LayoutOptions::new().with_stretch(1)).unwrap();
//!
//! assert_eq!(layout.widgets(), vec![title.object_id(), ok.object_id()]);
//! ```

mod box_layout;

pub use box_layout::{
    Alignment, BoxLayout, LayoutEntry, LayoutOptions, Orientation, QHBoxLayout, QVBoxLayout,
};

use dframe_render::px;

/// Content margins around a layout.
///
/// Written to the parent surface as its `padding`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentMargins {
    /// Left margin.
    pub left: f32,
    /// Top margin.
    pub top: f32,
    /// Right margin.
    pub right: f32,
    /// Bottom margin.
    pub bottom: f32,
}

impl ContentMargins {
    /// Create new content margins.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create uniform margins (same value on all sides).
    pub const fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Create symmetric margins (same horizontal and vertical).
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(horizontal, vertical, horizontal, vertical)
    }

    /// Total horizontal margin (left + right).
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical margin (top + bottom).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// The CSS `padding` shorthand, in top/right/bottom/left order.
    pub fn to_css(&self) -> String {
        format!(
            "{} {} {} {}",
            px(self.top),
            px(self.right),
            px(self.bottom),
            px(self.left)
        )
    }
}

/// Default spacing between items in a layout.
pub const DEFAULT_SPACING: f32 = 6.0;

/// Default content margins for layouts.
pub const DEFAULT_MARGINS: ContentMargins = ContentMargins::uniform(9.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_padding_order() {
        let margins = ContentMargins::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(margins.to_css(), "2px 3px 4px 1px");
        assert_eq!(margins.horizontal(), 4.0);
        assert_eq!(margins.vertical(), 6.0);
    }

    #[test]
    fn default_margins_are_uniform() {
        assert_eq!(DEFAULT_MARGINS.to_css(), "9px 9px 9px 9px");
        assert_eq!(
            ContentMargins::symmetric(4.0, 2.0),
            ContentMargins::new(4.0, 2.0, 4.0, 2.0)
        );
    }
}
