//! Standard widgets.
//!
//! - [`QWidget`]: plain container
//! - [`QLabel`]: text display
//! - [`QPushButton`]: clickable button with a `clicked` signal

mod label;
mod push_button;
mod widget;

pub use label::QLabel;
pub use push_button::{QPushButton, CLICKED};
pub use widget::QWidget;
