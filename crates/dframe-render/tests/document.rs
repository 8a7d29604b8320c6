//! Integration tests for the shared document handle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dframe_render::{
    Document, MemoryDocument, RenderError, RenderResult, RenderSubstrate, SurfaceId,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// A substrate that delegates to a [`MemoryDocument`] and counts releases.
struct CountingSubstrate {
    inner: MemoryDocument,
    releases: Arc<AtomicUsize>,
}

impl RenderSubstrate for CountingSubstrate {
    fn create_surface(&mut self, tag: &str) -> SurfaceId {
        self.inner.create_surface(tag)
    }

    fn release_surface(&mut self, surface: SurfaceId) -> bool {
        let released = self.inner.release_surface(surface);
        if released {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
        released
    }

    fn contains(&self, surface: SurfaceId) -> bool {
        self.inner.contains(surface)
    }

    fn tag(&self, surface: SurfaceId) -> RenderResult<String> {
        self.inner.tag(surface)
    }

    fn text(&self, surface: SurfaceId) -> RenderResult<String> {
        self.inner.text(surface)
    }

    fn set_text(&mut self, surface: SurfaceId, text: &str) -> RenderResult<()> {
        self.inner.set_text(surface, text)
    }

    fn attribute(&self, surface: SurfaceId, name: &str) -> RenderResult<Option<String>> {
        self.inner.attribute(surface, name)
    }

    fn set_attribute(&mut self, surface: SurfaceId, name: &str, value: &str) -> RenderResult<()> {
        self.inner.set_attribute(surface, name, value)
    }

    fn remove_attribute(&mut self, surface: SurfaceId, name: &str) -> RenderResult<bool> {
        self.inner.remove_attribute(surface, name)
    }

    fn style_property(&self, surface: SurfaceId, property: &str) -> RenderResult<Option<String>> {
        self.inner.style_property(surface, property)
    }

    fn set_style_property(
        &mut self,
        surface: SurfaceId,
        property: &str,
        value: &str,
    ) -> RenderResult<()> {
        self.inner.set_style_property(surface, property, value)
    }

    fn remove_style_property(&mut self, surface: SurfaceId, property: &str) -> RenderResult<bool> {
        self.inner.remove_style_property(surface, property)
    }

    fn append_child(&mut self, parent: SurfaceId, child: SurfaceId) -> RenderResult<()> {
        self.inner.append_child(parent, child)
    }

    fn remove_child(&mut self, parent: SurfaceId, child: SurfaceId) -> RenderResult<()> {
        self.inner.remove_child(parent, child)
    }

    fn parent(&self, surface: SurfaceId) -> RenderResult<Option<SurfaceId>> {
        self.inner.parent(surface)
    }

    fn children(&self, surface: SurfaceId) -> RenderResult<Vec<SurfaceId>> {
        self.inner.children(surface)
    }

    fn head(&self) -> Option<SurfaceId> {
        self.inner.head()
    }

    fn body(&self) -> Option<SurfaceId> {
        self.inner.body()
    }

    fn query_by_attribute(&self, name: &str, value: &str) -> Vec<SurfaceId> {
        self.inner.query_by_attribute(name, value)
    }
}

#[test]
fn custom_substrate_behind_document() {
    init_tracing();
    let releases = Arc::new(AtomicUsize::new(0));
    let doc = Document::new(CountingSubstrate {
        inner: MemoryDocument::new(),
        releases: releases.clone(),
    });

    let body = doc.body().unwrap();
    let panel = doc.create_surface("div");
    let button = doc.create_surface("button");
    doc.append_child(body, panel).unwrap();
    doc.append_child(panel, button).unwrap();

    assert!(doc.release_surface(panel));
    assert!(!doc.release_surface(panel));
    assert!(doc.release_surface(button));
    assert_eq!(releases.load(Ordering::SeqCst), 2);
    assert!(doc.children(body).unwrap().is_empty());
}

#[test]
fn errors_name_the_surface() {
    init_tracing();
    let doc = Document::in_memory();
    let gone = doc.create_surface("div");
    doc.release_surface(gone);

    let err = doc.set_text(gone, "x").unwrap_err();
    assert_eq!(err, RenderError::UnknownSurface(gone));
    assert!(err.to_string().starts_with("unknown or released surface"));
}

#[test]
fn document_is_shareable_across_threads() {
    let doc = Document::in_memory();
    let body = doc.body().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let doc = doc.clone();
            std::thread::spawn(move || {
                let surface = doc.create_surface("div");
                doc.set_attribute(surface, "data-index", &i.to_string())
                    .unwrap();
                doc.append_child(body, surface).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(doc.children(body).unwrap().len(), 4);
    assert_eq!(doc.query_by_attribute("data-index", "2").len(), 1);
}
