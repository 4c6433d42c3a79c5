//! End-to-end editing scenarios through the public API.

use pagebuilder_core::drag::{DragSettings, MoveOutcome};
use pagebuilder_core::{
    Builder, DragController, DragOutcome, DragSource, DropTarget, Element, ElementId,
    ElementUpdate, Modifiers, Point, Rect, Size, Store, rects_overlap, snap_to_grid,
};

fn element(json: &str) -> Element {
    serde_json::from_str(json).unwrap()
}

fn controller() -> DragController {
    DragController::new(DragSettings {
        grid_size: 20.0,
        activation_distance: 4.0,
        default_size: Size::new(100.0, 40.0),
    })
}

#[test]
fn snapping_properties() {
    for grid in [5.0, 10.0, 20.0, 25.0] {
        let mut value = -237.3;
        while value < 412.0 {
            let snapped = snap_to_grid(value, grid);
            assert_eq!(snapped % grid, 0.0, "{} on grid {}", value, grid);
            assert!((snapped - value).abs() <= grid / 2.0);
            value += 3.7;
        }
    }
}

#[test]
fn edge_sharing_rects_do_not_overlap() {
    let a = Rect::new(0.0, 0.0, 100.0, 40.0);
    for b in [
        Rect::new(100.0, 0.0, 200.0, 40.0),
        Rect::new(-50.0, 0.0, 0.0, 40.0),
        Rect::new(0.0, 40.0, 100.0, 80.0),
        Rect::new(20.0, -10.0, 60.0, 0.0),
    ] {
        assert!(!rects_overlap(a, b), "{:?} vs {:?}", a, b);
        assert!(!rects_overlap(b, a));
    }
    assert!(rects_overlap(a, Rect::new(99.0, 39.0, 150.0, 90.0)));
    assert!(rects_overlap(a, Rect::new(10.0, 10.0, 20.0, 20.0)));
}

#[test]
fn button_add_undo_redo() {
    let mut store = Store::new();
    store
        .add(element(
            r#"{"id":"a","type":"button","props":{"style":{"left":"0px","top":"0px"}}}"#,
        ))
        .unwrap();
    let with_a = store.document().clone();
    assert_eq!(store.elements().len(), 1);
    assert_eq!(store.elements()[0].id, ElementId::from("a"));

    assert!(store.undo());
    assert!(store.document().is_empty());

    assert!(store.redo());
    assert_eq!(store.document(), &with_a);
}

#[test]
fn undo_after_update_restores_exactly() {
    let mut store = Store::new();
    store
        .add(element(r#"{"id":"a","type":"text","props":{"style":{},"children":"Hi"}}"#))
        .unwrap();
    let d0 = store.document().clone();

    let mut style = store.get(&ElementId::from("a")).unwrap().style.clone();
    style.set("color", "red");
    assert!(store.update(&ElementId::from("a"), ElementUpdate::new().style(style)));
    let d1 = store.document().clone();

    store.undo();
    assert_eq!(store.document(), &d0);
    store.redo();
    assert_eq!(store.document(), &d1);
}

#[test]
fn new_edit_after_undo_drops_future() {
    let mut store = Store::new();
    store.add(element(r#"{"id":"a","type":"button","props":{"style":{}}}"#)).unwrap();
    store.add(element(r#"{"id":"b","type":"button","props":{"style":{}}}"#)).unwrap();
    store.undo();
    store.add(element(r#"{"id":"c","type":"button","props":{"style":{}}}"#)).unwrap();

    assert!(!store.can_redo());
    assert!(!store.redo());
    assert!(store.get(&ElementId::from("b")).is_none());
}

#[test]
fn add_then_remove_restores_document() {
    let mut store = Store::new();
    store.add(element(r#"{"id":"a","type":"image","props":{"style":{},"src":"x.png"}}"#)).unwrap();
    let before = store.document().clone();

    let id = ElementId::from("b");
    store.add(element(r#"{"id":"b","type":"divider","props":{"style":{}}}"#)).unwrap();
    assert!(store.remove(&id));
    assert_eq!(store.document(), &before);
}

#[test]
fn collision_blocks_overlapping_move() {
    let mut store = Store::new();
    store
        .load_project_json(
            r#"[
                {"id":"first","type":"button","props":{"style":{"left":"0px","top":"0px","width":"100px","height":"40px"}}},
                {"id":"second","type":"button","props":{"style":{"left":"200px","top":"0px","width":"100px","height":"40px"}}}
            ]"#,
        )
        .unwrap();
    let second = ElementId::from("second");
    let mut drag = controller();

    drag.pointer_down(DragSource::Element { id: second.clone() }, Point::new(210.0, 10.0));
    let outcome = drag.pointer_move(Point::new(60.0, 10.0), &mut store);
    assert!(matches!(outcome, MoveOutcome::Rejected { .. }));
    assert_eq!(store.get(&second).unwrap().position(), Point::new(200.0, 0.0));

    let outcome = drag.pointer_move(Point::new(130.0, 10.0), &mut store);
    assert!(matches!(outcome, MoveOutcome::Committed(_)));
    assert_eq!(store.get(&second).unwrap().position(), Point::new(120.0, 0.0));

    let outcome = drag.pointer_up(Point::new(130.0, 10.0), DropTarget::Canvas, &mut store).unwrap();
    assert!(matches!(outcome, DragOutcome::Finished { commits: 1, .. }));
}

#[test]
fn load_project_resets_history() {
    let mut store = Store::new();
    store.add(element(r#"{"id":"old","type":"button","props":{"style":{}}}"#)).unwrap();

    store
        .load_project_json(
            r#"[
                {"id":"a","type":"heading","props":{"style":{},"children":"Welcome"}},
                {"id":"b","type":"paragraph","props":{"style":{}}},
                {"id":"c","type":"container","props":{"style":{}},"children":[
                    {"id":"d","type":"button","props":{"style":{}}}
                ]}
            ]"#,
        )
        .unwrap();
    assert_eq!(store.history_len(), 1);
    assert_eq!(store.history_index(), 0);
    assert!(!store.undo());
    assert_eq!(store.elements().len(), 3);
}

#[test]
fn palette_drop_then_keyboard_editing() {
    let mut builder = Builder::in_memory();

    builder.pointer_down(DragSource::Palette { tag: "paragraph".into() }, Point::new(0.0, 0.0));
    builder.pointer_move(Point::new(150.0, 95.0));
    let DragOutcome::Created(id) = builder.pointer_up(Point::new(150.0, 95.0), DropTarget::Canvas).unwrap()
    else {
        panic!("palette drop should create an element");
    };
    let created = builder.store().get(&id).unwrap();
    assert_eq!(created.position(), Point::new(160.0, 100.0));
    assert_eq!(created.size(Size::ZERO), Size::new(300.0, 80.0));

    builder.store_mut().select(Some(id.clone()));
    builder.key_down("Backspace", Modifiers::NONE).unwrap();
    assert!(builder.store().document().is_empty());

    builder.key_down("z", Modifiers::ctrl()).unwrap();
    assert!(builder.store().get(&id).is_some());

    let artifact = builder.export();
    assert!(artifact.contents.contains("<p style={{"));
    assert!(artifact.contents.contains("Paragraph text</p>"));
}
