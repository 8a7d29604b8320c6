//! Logging and debugging facilities for DFrame.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - Debug visualization for object trees
//!
//! # Tracing Integration
//!
//! DFrame emits its diagnostics through the `tracing` crate and never installs
//! a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("dframe_core::object=debug")
//!         .init();
//! }
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use dframe_core::{init_global_registry, ObjectTreeDebug, QObject};
//!
//! init_global_registry();
//! let root = QObject::new(None).unwrap();
//! root.set_object_name("window").unwrap();
//!
//! let output = ObjectTreeDebug::new().format_subtree(root.base().id()).unwrap();
//! assert!(output.starts_with("window"));
//! ```

use std::fmt::{self, Write as FmtWrite};

use crate::object::{global_registry, ObjectId, ObjectResult};

/// Span names used throughout DFrame for tracing.
pub mod span_names {
    /// Object destruction span.
    pub const DESTROY: &str = "dframe::destroy";
    /// Style regeneration span.
    pub const STYLE: &str = "dframe::style";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "dframe_core::signal";
    /// Object model target.
    pub const OBJECT: &str = "dframe_core::object";
}

/// Style options for object tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for object tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show object IDs.
    pub show_ids: bool,
    /// Whether to show kind names.
    pub show_kinds: bool,
    /// Whether to list each object's named signals.
    pub show_signals: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_kinds: true,
            show_signals: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_signals: true,
            ..Default::default()
        }
    }

    /// Options for minimal output: names only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_kinds: false,
            show_signals: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing the object tree of the global registry.
#[derive(Debug, Clone, Default)]
pub struct ObjectTreeDebug {
    options: TreeFormatOptions,
}

impl ObjectTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format every tree, starting from all root objects.
    pub fn format_all(&self) -> ObjectResult<String> {
        let registry = global_registry()?;
        let roots = registry.root_objects();

        let mut output = String::new();
        let _ = writeln!(
            output,
            "Object Tree ({} total objects):",
            registry.object_count()
        );

        if roots.is_empty() {
            output.push_str("  (empty)\n");
        } else {
            for root_id in roots {
                // A root destroyed by another thread since the snapshot is skipped.
                if registry.contains(root_id) {
                    self.format_subtree_into(root_id, 0, true, &mut output)?;
                }
            }
        }

        Ok(output)
    }

    /// Format a subtree starting from a specific object.
    pub fn format_subtree(&self, root: ObjectId) -> ObjectResult<String> {
        let mut output = String::new();
        self.format_subtree_into(root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        id: ObjectId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> ObjectResult<()> {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }

        let registry = global_registry()?;
        let name = registry.object_name(id)?;
        let kind = registry.kind(id)?;
        let children = registry.children(id)?;

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(name.as_deref().unwrap_or("(unnamed)"));

        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }
        if self.options.show_kinds {
            let _ = write!(output, " ({})", kind);
        }
        output.push('\n');

        if self.options.show_signals {
            let prefix = self.build_detail_prefix(depth);
            for signal in registry.signal_names(id)? {
                let _ = writeln!(output, "{}  ~{}", prefix, signal);
            }
        }

        let child_count = children.len();
        for (i, child_id) in children.into_iter().enumerate() {
            self.format_subtree_into(child_id, depth + 1, i + 1 == child_count, output)?;
        }

        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }

    fn build_detail_prefix(&self, depth: usize) -> String {
        let branch = match self.options.style {
            TreeStyle::Ascii => "|",
            TreeStyle::Unicode => "\u{2502}",
            TreeStyle::Compact => "",
        };
        let mut prefix = String::new();
        for _ in 0..depth {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix
    }
}

impl fmt::Display for ObjectTreeDebug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format_all() {
            Ok(output) => f.write_str(&output),
            Err(e) => write!(f, "Error formatting object tree: {}", e),
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Wraps the operations named in [`span_names`] so a subscriber with span
/// close events (`FmtSpan::CLOSE`) reports their duration.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span for `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "dframe::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}
