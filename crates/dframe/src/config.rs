//! Frame configuration and builder.
//!
//! [`FrameConfig`] collects the defaults that widget and layout constructors
//! write into the render document.

use dframe_render::Size;

use crate::widget::layout::{ContentMargins, DEFAULT_MARGINS, DEFAULT_SPACING};

/// Default widget size in CSS pixels.
pub const DEFAULT_WIDGET_SIZE: Size = Size {
    width: 100.0,
    height: 50.0,
};

/// Default attribute used to expose object names on surfaces.
pub const DEFAULT_NAME_ATTRIBUTE: &str = "data-object-name";

/// CSS positioning scheme for new widget surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// `position: static`
    Static,
    /// `position: relative`
    #[default]
    Relative,
    /// `position: absolute`
    Absolute,
    /// `position: fixed`
    Fixed,
}

impl Positioning {
    /// The CSS keyword.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }
}

/// Defaults applied by widget and layout constructors.
///
/// # Example
///
/// ```
/// use dframe::{FrameConfig, Positioning};
/// use dframe::render::Size;
///
/// let config = FrameConfig::new()
///     .with_default_size(Size::new(120.0, 32.0))
///     .with_positioning(Positioning::Absolute)
///     .with_name_attribute("data-testid")
///     .with_layout_spacing(4.0);
///
/// assert_eq!(config.name_attribute(), "data-testid");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrameConfig {
    default_size: Size,
    positioning: Positioning,
    name_attribute: String,
    layout_spacing: f32,
    layout_margins: ContentMargins,
}

impl FrameConfig {
    /// Create a configuration with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size new widgets start with.
    pub fn with_default_size(mut self, size: Size) -> Self {
        self.default_size = size;
        self
    }

    /// Set the positioning scheme of new widget surfaces.
    pub fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }

    /// Set the attribute that carries object names.
    pub fn with_name_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.name_attribute = attribute.into();
        self
    }

    /// Set the spacing new layouts start with.
    pub fn with_layout_spacing(mut self, spacing: f32) -> Self {
        self.layout_spacing = spacing;
        self
    }

    /// Set the content margins new layouts start with.
    pub fn with_layout_margins(mut self, margins: ContentMargins) -> Self {
        self.layout_margins = margins;
        self
    }

    /// Size of new widgets.
    pub fn default_size(&self) -> Size {
        self.default_size
    }

    /// Positioning of new widget surfaces.
    pub fn positioning(&self) -> Positioning {
        self.positioning
    }

    /// Attribute carrying object names.
    pub fn name_attribute(&self) -> &str {
        &self.name_attribute
    }

    /// Spacing of new layouts.
    pub fn layout_spacing(&self) -> f32 {
        self.layout_spacing
    }

    /// Content margins of new layouts.
    pub fn layout_margins(&self) -> ContentMargins {
        self.layout_margins
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_WIDGET_SIZE,
            positioning: Positioning::default(),
            name_attribute: DEFAULT_NAME_ATTRIBUTE.to_string(),
            layout_spacing: DEFAULT_SPACING,
            layout_margins: DEFAULT_MARGINS,
        }
    }
}
