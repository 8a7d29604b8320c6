//! Integration tests for style sheet regeneration and type tagging.

use dframe_core::{global_registry, init_global_registry, ObjectId, ObjectKind, WidgetState};
use dframe_render::{Document, SurfaceId};
use dframe_style::{Error, QStyleSheet};
use pretty_assertions::assert_eq;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("dframe_style=trace,dframe::style=info"))
        .try_init();
}

/// Register a bare object with a fresh surface when `kind` is a widget.
fn register(doc: &Document, kind: ObjectKind, parent: Option<ObjectId>) -> (ObjectId, Option<SurfaceId>) {
    let registry = global_registry().unwrap();
    let id = registry.register(kind, parent).unwrap();
    if !kind.is_widget() {
        return (id, None);
    }
    let surface = doc.create_surface("div");
    registry
        .init_widget_state(
            id,
            WidgetState {
                visible: true,
                surface: surface.as_raw(),
            },
        )
        .unwrap();
    (id, Some(surface))
}

#[test]
fn regeneration_follows_insertion_order() {
    init_tracing();
    let doc = Document::in_memory();
    let mut sheet = QStyleSheet::new(&doc).unwrap();

    sheet.add_rule("QLabel", [("color", "red"), ("font-size", "12px")]).unwrap();
    sheet.add_rule(".QPushButton", [("color", "white")]).unwrap();
    sheet.add_rule("QLabel", [("margin", "2px"), ("color", "blue")]).unwrap();

    let expected = "\
QLabel {
  color: blue;
  font-size: 12px;
  margin: 2px;
}
.QPushButton {
  color: white;
}
";
    assert_eq!(doc.text(sheet.resource()).unwrap(), expected);
    assert_eq!(sheet.css_text(), expected);

    sheet.remove_rule("QLabel").unwrap();
    assert_eq!(
        doc.text(sheet.resource()).unwrap(),
        ".QPushButton {\n  color: white;\n}\n"
    );
}

#[test]
fn merge_round_trip_keeps_unrelated_properties() {
    let doc = Document::in_memory();
    let mut sheet = QStyleSheet::new(&doc).unwrap();

    sheet.add_rule(".panel", [("a", "1"), ("b", "2")]).unwrap();
    sheet.add_rule(".panel", [("b", "3"), ("c", "4")]).unwrap();

    let rule = sheet.rule(".panel").unwrap();
    assert_eq!(
        rule.declarations().collect::<Vec<_>>(),
        vec![("a", "1"), ("b", "3"), ("c", "4")]
    );
}

#[test]
fn apply_tags_widgets_through_plain_objects() {
    init_tracing();
    init_global_registry();
    let doc = Document::in_memory();
    let mut sheet = QStyleSheet::new(&doc).unwrap();
    sheet.add_rule(".QPushButton", [("color", "white")]).unwrap();

    let (root, root_surface) = register(&doc, ObjectKind::Widget, None);
    let (holder, _) = register(&doc, ObjectKind::Object, Some(root));
    let (button, button_surface) = register(&doc, ObjectKind::PushButton, Some(holder));
    let (_label, label_surface) = register(&doc, ObjectKind::Label, Some(root));

    assert_eq!(sheet.apply_to(&root).unwrap(), 3);
    assert_eq!(sheet.apply_to(&root).unwrap(), 3);

    assert_eq!(doc.classes(root_surface.unwrap()).unwrap(), vec!["QWidget"]);
    assert_eq!(
        doc.classes(button_surface.unwrap()).unwrap(),
        vec!["QPushButton"]
    );
    assert_eq!(doc.classes(label_surface.unwrap()).unwrap(), vec!["QLabel"]);
    assert!(doc
        .text(sheet.resource())
        .unwrap()
        .contains(".QPushButton {\n  color: white;\n}\n"));

    // Applying to a subtree only touches that subtree.
    let (other, other_surface) = register(&doc, ObjectKind::Widget, None);
    assert_eq!(sheet.apply_to(&button).unwrap(), 1);
    assert!(doc.classes(other_surface.unwrap()).unwrap().is_empty());

    let registry = global_registry().unwrap();
    registry.destroy(root);
    registry.destroy(other);
}

#[test]
fn apply_to_destroyed_root_fails() {
    init_global_registry();
    let doc = Document::in_memory();
    let sheet = QStyleSheet::new(&doc).unwrap();

    let (root, _) = register(&doc, ObjectKind::Widget, None);
    global_registry().unwrap().destroy(root);

    assert!(matches!(sheet.apply_to(&root), Err(Error::Object(_))));
}

#[test]
fn escaped_selector_stays_one_rule() {
    init_tracing();
    let doc = Document::in_memory();
    let mut sheet = QStyleSheet::new(&doc).unwrap();

    sheet.add_rule(r".a\:hover", [("color", "red")]).unwrap();
    assert_eq!(doc.text(sheet.resource()).unwrap(), ".a\\:hover {\n  color: red;\n}\n");
    assert!(sheet.rule(r".a\:hover").is_some());

    assert!(matches!(
        sheet.add_rule(".b", [("color", "red /* x")]),
        Err(Error::InvalidValue { .. })
    ));
    assert!(sheet.rule(".b").is_none());
}
