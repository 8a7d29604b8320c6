//! An in-memory render substrate.
//!
//! [`MemoryDocument`] keeps a document tree in a slotmap arena with
//! `html > (head, body)` regions, the same shape a browser document starts
//! with. It renders nothing; it exists so that widget trees, layouts and style
//! sheets can be driven and inspected without a browser.

use std::fmt::Write as _;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::{RenderError, RenderResult};
use crate::substrate::{RenderSubstrate, SurfaceId};

/// Data stored per surface.
#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    text: String,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    /// Creation sequence number; keeps queries in document-creation order.
    seq: u64,
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn upsert(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some((_, v)) => *v = value.to_string(),
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

fn remove(pairs: &mut Vec<(String, String)>, key: &str) -> bool {
    let before = pairs.len();
    pairs.retain(|(k, _)| k != key);
    pairs.len() != before
}

/// An in-memory document tree.
///
/// # Example
///
/// ```
/// use dframe_render::{MemoryDocument, RenderSubstrate};
///
/// let mut doc = MemoryDocument::new();
/// let body = doc.body().unwrap();
/// let button = doc.create_surface("button");
/// doc.set_text(button, "OK").unwrap();
/// doc.append_child(body, button).unwrap();
///
/// assert_eq!(doc.outer_html(body).unwrap(), "<body><button>OK</button></body>");
/// ```
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: SlotMap<SurfaceId, Node>,
    children: SecondaryMap<SurfaceId, Vec<SurfaceId>>,
    parent: SecondaryMap<SurfaceId, SurfaceId>,
    root: SurfaceId,
    head: Option<SurfaceId>,
    body: Option<SurfaceId>,
    next_seq: u64,
}

impl MemoryDocument {
    /// Create a document with `html`, `head` and `body` surfaces.
    pub fn new() -> Self {
        let mut doc = Self::headless();
        let head = doc.create_surface("head");
        doc.attach(doc.root, head);
        if let Some(body) = doc.body {
            // Keep `head` before `body`.
            doc.attach(doc.root, body);
        }
        doc.head = Some(head);
        doc
    }

    /// Create a document without a head region.
    ///
    /// Useful for exercising code that needs the head to be present.
    pub fn headless() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            tag: "html".to_string(),
            ..Node::default()
        });
        let mut doc = Self {
            nodes,
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            root,
            head: None,
            body: None,
            next_seq: 1,
        };
        doc.children.insert(root, Vec::new());
        let body = doc.create_surface("body");
        doc.attach(root, body);
        doc.body = Some(body);
        doc
    }

    /// The `html` root surface.
    pub fn document_element(&self) -> SurfaceId {
        self.root
    }

    /// Number of live surfaces, regions included.
    pub fn surface_count(&self) -> usize {
        self.nodes.len()
    }

    /// Serialize a surface and its subtree to markup, for debugging and tests.
    ///
    /// Attributes are written in insertion order; inline styles become a
    /// `style` attribute. No escaping is performed.
    pub fn outer_html(&self, surface: SurfaceId) -> RenderResult<String> {
        let mut out = String::new();
        self.write_html(surface, &mut out)?;
        Ok(out)
    }

    fn write_html(&self, surface: SurfaceId, out: &mut String) -> RenderResult<()> {
        let node = self.node(surface)?;
        let _ = write!(out, "<{}", node.tag);
        for (name, value) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", name, value);
        }
        if !node.style.is_empty() {
            let style: Vec<String> = node
                .style
                .iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect();
            let _ = write!(out, " style=\"{}\"", style.join(" "));
        }
        out.push('>');
        out.push_str(&node.text);
        for &child in self.children.get(surface).map(Vec::as_slice).unwrap_or(&[]) {
            self.write_html(child, out)?;
        }
        let _ = write!(out, "</{}>", node.tag);
        Ok(())
    }

    fn node(&self, surface: SurfaceId) -> RenderResult<&Node> {
        self.nodes
            .get(surface)
            .ok_or(RenderError::UnknownSurface(surface))
    }

    fn node_mut(&mut self, surface: SurfaceId) -> RenderResult<&mut Node> {
        self.nodes
            .get_mut(surface)
            .ok_or(RenderError::UnknownSurface(surface))
    }

    fn detach_from_parent(&mut self, surface: SurfaceId) {
        if let Some(old_parent) = self.parent.remove(surface) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != surface);
            }
        }
    }

    fn attach(&mut self, parent: SurfaceId, child: SurfaceId) {
        self.detach_from_parent(child);
        self.parent.insert(child, parent);
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(child);
        }
    }

    fn is_ancestor_or_self(&self, candidate: SurfaceId, of: SurfaceId) -> bool {
        let mut current = Some(of);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent.get(id).copied();
        }
        false
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSubstrate for MemoryDocument {
    fn create_surface(&mut self, tag: &str) -> SurfaceId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let id = self.nodes.insert(Node {
            tag: tag.to_string(),
            seq,
            ..Node::default()
        });
        self.children.insert(id, Vec::new());
        id
    }

    fn release_surface(&mut self, surface: SurfaceId) -> bool {
        if !self.nodes.contains_key(surface) {
            return false;
        }
        self.detach_from_parent(surface);
        for child in self.children.remove(surface).unwrap_or_default() {
            self.parent.remove(child);
        }
        if self.head == Some(surface) {
            self.head = None;
        }
        if self.body == Some(surface) {
            self.body = None;
        }
        self.nodes.remove(surface);
        true
    }

    fn contains(&self, surface: SurfaceId) -> bool {
        self.nodes.contains_key(surface)
    }

    fn tag(&self, surface: SurfaceId) -> RenderResult<String> {
        Ok(self.node(surface)?.tag.clone())
    }

    fn text(&self, surface: SurfaceId) -> RenderResult<String> {
        Ok(self.node(surface)?.text.clone())
    }

    fn set_text(&mut self, surface: SurfaceId, text: &str) -> RenderResult<()> {
        self.node_mut(surface)?.text = text.to_string();
        Ok(())
    }

    fn attribute(&self, surface: SurfaceId, name: &str) -> RenderResult<Option<String>> {
        Ok(lookup(&self.node(surface)?.attributes, name).map(str::to_string))
    }

    fn set_attribute(&mut self, surface: SurfaceId, name: &str, value: &str) -> RenderResult<()> {
        upsert(&mut self.node_mut(surface)?.attributes, name, value);
        Ok(())
    }

    fn remove_attribute(&mut self, surface: SurfaceId, name: &str) -> RenderResult<bool> {
        Ok(remove(&mut self.node_mut(surface)?.attributes, name))
    }

    fn style_property(&self, surface: SurfaceId, property: &str) -> RenderResult<Option<String>> {
        Ok(lookup(&self.node(surface)?.style, property).map(str::to_string))
    }

    fn set_style_property(
        &mut self,
        surface: SurfaceId,
        property: &str,
        value: &str,
    ) -> RenderResult<()> {
        upsert(&mut self.node_mut(surface)?.style, property, value);
        Ok(())
    }

    fn remove_style_property(&mut self, surface: SurfaceId, property: &str) -> RenderResult<bool> {
        Ok(remove(&mut self.node_mut(surface)?.style, property))
    }

    fn append_child(&mut self, parent: SurfaceId, child: SurfaceId) -> RenderResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(RenderError::CycleDetected { parent, child });
        }
        self.attach(parent, child);
        Ok(())
    }

    fn remove_child(&mut self, parent: SurfaceId, child: SurfaceId) -> RenderResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.parent.get(child) != Some(&parent) {
            return Err(RenderError::NotAChild { parent, child });
        }
        self.detach_from_parent(child);
        Ok(())
    }

    fn parent(&self, surface: SurfaceId) -> RenderResult<Option<SurfaceId>> {
        self.node(surface)?;
        Ok(self.parent.get(surface).copied())
    }

    fn children(&self, surface: SurfaceId) -> RenderResult<Vec<SurfaceId>> {
        self.node(surface)?;
        Ok(self.children.get(surface).cloned().unwrap_or_default())
    }

    fn head(&self) -> Option<SurfaceId> {
        self.head
    }

    fn body(&self) -> Option<SurfaceId> {
        self.body
    }

    fn query_by_attribute(&self, name: &str, value: &str) -> Vec<SurfaceId> {
        let mut matches: Vec<(u64, SurfaceId)> = self
            .nodes
            .iter()
            .filter(|(_, node)| lookup(&node.attributes, name) == Some(value))
            .map(|(id, node)| (node.seq, id))
            .collect();
        matches.sort_unstable_by_key(|(seq, _)| *seq);
        matches.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions() {
        let doc = MemoryDocument::new();
        let root = doc.document_element();
        assert_eq!(
            doc.children(root).unwrap(),
            vec![doc.head().unwrap(), doc.body().unwrap()]
        );
        assert_eq!(doc.outer_html(root).unwrap(), "<html><head></head><body></body></html>");
    }

    #[test]
    fn test_headless() {
        let doc = MemoryDocument::headless();
        assert_eq!(doc.head(), None);
        assert!(doc.body().is_some());
    }

    #[test]
    fn test_append_moves_existing_child() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let a = doc.create_surface("div");
        let b = doc.create_surface("div");
        doc.append_child(body, a).unwrap();
        doc.append_child(body, b).unwrap();
        doc.append_child(body, a).unwrap();
        assert_eq!(doc.children(body).unwrap(), vec![b, a]);

        let head = doc.head().unwrap();
        doc.append_child(head, b).unwrap();
        assert_eq!(doc.children(body).unwrap(), vec![a]);
        assert_eq!(doc.parent(b).unwrap(), Some(head));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut doc = MemoryDocument::new();
        let outer = doc.create_surface("div");
        let inner = doc.create_surface("div");
        doc.append_child(outer, inner).unwrap();

        assert_eq!(
            doc.append_child(inner, outer),
            Err(RenderError::CycleDetected {
                parent: inner,
                child: outer
            })
        );
        assert!(doc.append_child(outer, outer).is_err());
        assert_eq!(doc.children(outer).unwrap(), vec![inner]);
    }

    #[test]
    fn test_release_orphans_children() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let outer = doc.create_surface("div");
        let inner = doc.create_surface("span");
        doc.append_child(body, outer).unwrap();
        doc.append_child(outer, inner).unwrap();

        assert!(doc.release_surface(outer));
        assert!(!doc.release_surface(outer));
        assert!(doc.children(body).unwrap().is_empty());
        assert!(doc.contains(inner));
        assert_eq!(doc.parent(inner).unwrap(), None);
        assert_eq!(doc.text(outer), Err(RenderError::UnknownSurface(outer)));
    }

    #[test]
    fn test_remove_child_requires_parentage() {
        let mut doc = MemoryDocument::new();
        let body = doc.body().unwrap();
        let stray = doc.create_surface("div");
        assert_eq!(
            doc.remove_child(body, stray),
            Err(RenderError::NotAChild {
                parent: body,
                child: stray
            })
        );
    }

    #[test]
    fn test_attributes_and_styles() {
        let mut doc = MemoryDocument::new();
        let s = doc.create_surface("div");
        doc.set_attribute(s, "data-object-name", "ok").unwrap();
        doc.set_style_property(s, "width", "100px").unwrap();
        doc.set_style_property(s, "height", "50px").unwrap();
        doc.set_style_property(s, "width", "80px").unwrap();

        assert_eq!(
            doc.outer_html(s).unwrap(),
            "<div data-object-name=\"ok\" style=\"width: 80px; height: 50px;\"></div>"
        );
        assert!(doc.remove_style_property(s, "width").unwrap());
        assert!(!doc.remove_style_property(s, "width").unwrap());
        assert!(doc.remove_attribute(s, "data-object-name").unwrap());
        assert_eq!(doc.attribute(s, "data-object-name").unwrap(), None);
    }

    #[test]
    fn test_query_by_attribute_in_creation_order() {
        let mut doc = MemoryDocument::new();
        let first = doc.create_surface("div");
        let other = doc.create_surface("div");
        let second = doc.create_surface("div");
        doc.set_attribute(second, "data-object-name", "twin").unwrap();
        doc.set_attribute(other, "data-object-name", "solo").unwrap();
        doc.set_attribute(first, "data-object-name", "twin").unwrap();

        assert_eq!(
            doc.query_by_attribute("data-object-name", "twin"),
            vec![first, second]
        );
        assert!(doc.query_by_attribute("data-object-name", "none").is_empty());
    }
}
