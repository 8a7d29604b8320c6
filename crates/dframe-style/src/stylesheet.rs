//! The style sheet cascade.

use dframe_core::logging::span_names;
use dframe_core::{global_registry, Object, PerfSpan};
use dframe_render::{Document, SurfaceId};

use crate::error::{Error, Result};
use crate::rule::{validate_declaration, StyleRule};
use crate::selector::Selector;

const TARGET: &str = "dframe_style::sheet";

/// An ordered table of style rules mirrored into one style resource.
///
/// Construction creates a `style` surface and appends it to the document
/// head. Every mutation regenerates the CSS text of the whole table and
/// writes it into that surface. Dropping the sheet removes the surface.
///
/// Selector matching itself is done by whatever renders the document; the
/// sheet only keeps rules and tags widget surfaces with their type name
/// via [`apply_to`](Self::apply_to).
///
/// # Example
///
/// ```
/// use dframe_render::Document;
/// use dframe_style::StyleSheet;
///
/// let doc = Document::in_memory();
/// let mut sheet = StyleSheet::new(&doc).unwrap();
/// sheet.add_rule(".QPushButton", [("color", "white")]).unwrap();
///
/// assert_eq!(doc.text(sheet.resource()).unwrap(), ".QPushButton {\n  color: white;\n}\n");
/// ```
#[derive(Debug)]
pub struct StyleSheet {
    document: Document,
    resource: SurfaceId,
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Create a style sheet and insert its resource into the document head.
    ///
    /// Fails with [`Error::HeadUnavailable`] without touching the document if
    /// there is no head region.
    pub fn new(document: &Document) -> Result<Self> {
        let head = document.head().ok_or(Error::HeadUnavailable)?;
        let resource = document.create_surface("style");
        if let Err(err) = document.append_child(head, resource) {
            document.release_surface(resource);
            return Err(err.into());
        }
        tracing::debug!(target: TARGET, ?resource, "created style sheet");
        Ok(Self {
            document: document.clone(),
            resource,
            rules: Vec::new(),
        })
    }

    /// Merge declarations into the rule for `selector`.
    ///
    /// New selectors are appended after existing ones. Properties already
    /// present keep their position and take the new value; other properties
    /// of the rule are left alone. Nothing changes if the selector or any
    /// declaration is invalid.
    pub fn add_rule<I, K, V>(&mut self, selector: &str, properties: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let selector = Selector::parse(selector)?;
        let declarations = properties
            .into_iter()
            .map(|(property, value)| validate_declaration(property.as_ref(), value.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let index = match self.rules.iter().position(|r| r.selector == selector) {
            Some(index) => index,
            None => {
                self.rules.push(StyleRule::new(selector));
                self.rules.len() - 1
            }
        };
        let rule = &mut self.rules[index];
        for (property, value) in declarations {
            rule.set(property, value);
        }
        tracing::debug!(
            target: TARGET,
            selector = %rule.selector,
            declarations = rule.len(),
            "merged style rule"
        );

        self.regenerate()
    }

    /// Remove the whole rule for `selector`.
    ///
    /// Returns `Ok(false)` for a selector with no rule, including selectors
    /// that could never be valid.
    pub fn remove_rule(&mut self, selector: &str) -> Result<bool> {
        let Ok(selector) = Selector::parse(selector) else {
            return Ok(false);
        };
        let before = self.rules.len();
        self.rules.retain(|r| r.selector != selector);
        if self.rules.len() == before {
            return Ok(false);
        }
        tracing::debug!(target: TARGET, %selector, "removed style rule");
        self.regenerate()?;
        Ok(true)
    }

    /// Remove every rule.
    pub fn clear(&mut self) -> Result<()> {
        self.rules.clear();
        self.regenerate()
    }

    /// Tag every widget surface under `root` with its type name as a class.
    ///
    /// Recurses through non-widget objects. Returns the number of widgets
    /// tagged, including ones that already carried the class.
    pub fn apply_to(&self, root: &dyn Object) -> Result<usize> {
        let registry = global_registry()?;
        let mut tagged = 0;
        for id in registry.depth_first_preorder(root.object_id())? {
            let kind = registry.kind(id)?;
            let Some(state) = registry.widget_state(id)? else {
                continue;
            };
            self.document
                .add_class(SurfaceId::from_raw(state.surface), kind.type_name())?;
            tagged += 1;
        }
        tracing::debug!(target: TARGET, root = ?root.object_id(), tagged, "applied type classes");
        Ok(tagged)
    }

    /// The CSS text for the current rules.
    pub fn css_text(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            rule.write_css(&mut out);
        }
        out
    }

    /// The rule for `selector`, if any.
    pub fn rule(&self, selector: &str) -> Option<&StyleRule> {
        let selector = Selector::parse(selector).ok()?;
        self.rules.iter().find(|r| r.selector == selector)
    }

    /// All rules in insertion order.
    pub fn rules(&self) -> &[StyleRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The style surface this sheet writes into.
    pub fn resource(&self) -> SurfaceId {
        self.resource
    }

    /// The document this sheet belongs to.
    pub fn document(&self) -> &Document {
        &self.document
    }

    fn regenerate(&self) -> Result<()> {
        let _perf = PerfSpan::new(span_names::STYLE);
        let text = self.css_text();
        tracing::trace!(target: TARGET, bytes = text.len(), "regenerated style text");
        self.document.set_text(self.resource, &text)?;
        Ok(())
    }
}

impl Drop for StyleSheet {
    fn drop(&mut self) {
        self.document.release_surface(self.resource);
    }
}
