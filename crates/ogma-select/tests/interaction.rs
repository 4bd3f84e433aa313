use std::cell::RefCell;
use std::rc::Rc;

use ogma_base::{Guid, NodeId, Point3, Result};
use ogma_scene::{LabelSlot, PointerButton, PointerEvent, PointerEventKind, Selectable};
use ogma_select::{SelectionChange, Session};

const PRIMARY: PointerButton = PointerButton::Primary;

fn at(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

fn record(session: &mut Session) -> Rc<RefCell<Vec<SelectionChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    session.subscribe(move |change| sink.borrow_mut().push(*change));
    log
}

fn change(element: Selectable, selected: bool) -> SelectionChange {
    SelectionChange { element, selected }
}

fn node(session: &Session, name: &str) -> NodeId {
    match session.scene().find_node(name) {
        Some(node) => node,
        None => panic!("no node named {name}"),
    }
}

fn highlighted(session: &Session, id: Guid) -> Result<Option<LabelSlot>> {
    Ok(session.scene().pane_box(id)?.highlighted_label())
}

#[test]
fn box_floor_walkthrough() -> Result<()> {
    let mut session = Session::new();
    let a = session.add_box("A", &["id"])?;
    let b = session.add_box("B", &["id"])?;
    let log = record(&mut session);

    session.click(node(&session, "A.body"), PRIMARY, at(1.0, 1.0), 0)?;
    session.click(node(&session, "B.center"), PRIMARY, at(2.0, 2.0), 1_000)?;
    session.click(node(&session, "floor"), PRIMARY, at(3.0, 3.0), 2_000)?;

    let (a, b) = (Selectable::Box(a), Selectable::Box(b));
    assert_eq!(
        *log.borrow(),
        vec![
            change(a, true),
            change(a, false),
            change(b, true),
            change(b, false),
            change(Selectable::Floor, true),
        ]
    );
    assert!(session.selection().has_selection());
    assert_eq!(session.selection().selected(), Some(Selectable::Floor));
    assert_eq!(
        session.selection().selection_coordinates(),
        Some(at(3.0, 3.0))
    );
    Ok(())
}

#[test]
fn releasing_on_the_bare_sub_scene_selects_it() -> Result<()> {
    let mut session = Session::new();
    let id = session.add_box("A", &[] as &[&str])?;
    session.click(node(&session, "A.body"), PRIMARY, at(0.0, 0.0), 0)?;

    let root = session.scene().root();
    session.click(root, PRIMARY, at(9.0, 9.0), 1_000)?;

    assert_eq!(session.selection().selected(), Some(Selectable::SubScene));
    assert!(!session.scene().pane_box(id)?.is_selected());
    Ok(())
}

#[test]
fn background_ignores_drags_and_other_buttons() -> Result<()> {
    let mut session = Session::new();
    let floor = node(&session, "floor");

    session.click(floor, PointerButton::Secondary, at(0.0, 0.0), 0)?;
    assert!(!session.selection().has_selection());

    session.press(floor, PRIMARY, at(0.0, 0.0), 1_000)?;
    session.drag_to(at(80.0, 0.0))?;
    session.release(at(80.0, 0.0), 1_200)?;
    assert!(!session.selection().has_selection());
    Ok(())
}

#[test]
fn releases_on_box_parts_do_not_select_the_background() -> Result<()> {
    let mut session = Session::new();
    session.add_box("A", &[] as &[&str])?;
    let outline = node(&session, "A.outline");

    session.click(outline, PRIMARY, at(0.0, 0.0), 0)?;

    assert!(!session.selection().has_selection());
    Ok(())
}

#[test]
fn body_click_clears_label_highlights() -> Result<()> {
    let mut session = Session::new();
    let id = session.add_box("Order", &["id", "total"])?;

    session.click(node(&session, "Order.field[1]"), PRIMARY, at(0.0, 0.0), 0)?;
    assert_eq!(highlighted(&session, id)?, Some(LabelSlot::Field(1)));

    session.click(node(&session, "Order.body"), PRIMARY, at(0.0, 0.0), 1_000)?;
    assert_eq!(highlighted(&session, id)?, None);
    assert_eq!(session.selection().selected(), Some(Selectable::Box(id)));
    Ok(())
}

#[test]
fn label_click_highlights_only_that_label_and_is_consumed() -> Result<()> {
    let mut session = Session::new();
    let id = session.add_box("Order", &["id", "total"])?;
    let log = record(&mut session);

    let label = node(&session, "Order.field[0]");
    let event = PointerEvent::clicked(PRIMARY, label, at(0.0, 0.0), 1);
    let outcome = session.dispatch(&event)?;

    assert_eq!(outcome, ogma_scene::Propagation::Stop);
    assert_eq!(highlighted(&session, id)?, Some(LabelSlot::Field(0)));
    // the center handler would have cleared the highlight and notified twice
    assert_eq!(*log.borrow(), vec![change(Selectable::Box(id), true)]);
    Ok(())
}

#[test]
fn outline_click_on_selected_box_keeps_selection() -> Result<()> {
    let mut session = Session::new();
    let id = session.add_box("Order", &["id"])?;

    session.click(node(&session, "Order.field[0]"), PRIMARY, at(0.0, 0.0), 0)?;
    let log = record(&mut session);
    session.click(node(&session, "Order.outline"), PRIMARY, at(0.0, 0.0), 1_000)?;

    assert_eq!(highlighted(&session, id)?, None);
    assert_eq!(session.selection().selected(), Some(Selectable::Box(id)));
    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn double_click_on_top_label_of_selected_box_starts_editing() -> Result<()> {
    let mut session = Session::new();
    let id = session.add_box("Customer", &["name"])?;
    session.click(node(&session, "Customer.body"), PRIMARY, at(0.0, 0.0), 0)?;

    let top = node(&session, "Customer.top");
    session.click(top, PRIMARY, at(0.0, 0.0), 1_000)?;
    assert!(!session.scene().pane_box(id)?.top_label().is_editing());
    session.click(top, PRIMARY, at(0.0, 0.0), 1_150)?;

    let pane = session.scene().pane_box(id)?;
    assert!(pane.top_label().is_editing());
    assert!(pane.top_label().is_highlighted());
    assert_eq!(session.selection().selected(), Some(Selectable::Box(id)));
    Ok(())
}

#[test]
fn double_click_on_field_label_starts_editing_that_field() -> Result<()> {
    let mut session = Session::new();
    let id = session.add_box("Customer", &["name", "email"])?;
    let email = node(&session, "Customer.field[1]");

    session.click(email, PRIMARY, at(0.0, 0.0), 0)?;
    session.click(email, PRIMARY, at(0.0, 0.0), 100)?;

    let pane = session.scene().pane_box(id)?;
    assert!(pane.center_labels()[1].is_editing());
    assert!(!pane.center_labels()[0].is_editing());
    assert!(!pane.top_label().is_editing());
    Ok(())
}

#[test]
fn double_click_on_unselected_box_label_only_selects() -> Result<()> {
    let mut session = Session::new();
    let id = session.add_box("Customer", &["name"])?;
    let top = node(&session, "Customer.top");

    let event = PointerEvent::clicked(PRIMARY, top, at(0.0, 0.0), 2);
    session.dispatch(&event)?;

    let pane = session.scene().pane_box(id)?;
    assert!(pane.is_selected());
    assert!(!pane.top_label().is_editing());
    Ok(())
}

#[test]
fn drag_selects_an_unselected_box_before_moving() -> Result<()> {
    let mut session = Session::new();
    let a = session.add_box("A", &["x"])?;
    let b = session.add_box("B", &["y"])?;
    session.click(node(&session, "A.field[0]"), PRIMARY, at(0.0, 0.0), 0)?;
    let log = record(&mut session);

    session.press(node(&session, "B.top"), PRIMARY, at(0.0, 0.0), 1_000)?;
    session.drag_to(at(40.0, 0.0))?;

    assert_eq!(
        *log.borrow(),
        vec![
            change(Selectable::Box(a), false),
            change(Selectable::Box(b), true),
        ]
    );
    assert_eq!(highlighted(&session, a)?, None);
    assert_eq!(highlighted(&session, b)?, None);

    session.release(at(40.0, 0.0), 1_100)?;
    assert_eq!(session.selection().selected(), Some(Selectable::Box(b)));
    assert_eq!(log.borrow().len(), 2);
    Ok(())
}

#[test]
fn dragging_a_selected_box_does_not_reselect() -> Result<()> {
    let mut session = Session::new();
    let id = session.add_box("A", &["x"])?;
    session.click(node(&session, "A.field[0]"), PRIMARY, at(0.0, 0.0), 0)?;
    let log = record(&mut session);

    session.press(node(&session, "A.center"), PRIMARY, at(0.0, 0.0), 1_000)?;
    session.drag_to(at(0.0, 40.0))?;
    session.release(at(0.0, 40.0), 1_100)?;

    assert!(log.borrow().is_empty());
    assert_eq!(highlighted(&session, id)?, Some(LabelSlot::Field(0)));
    Ok(())
}

#[test]
fn drag_detected_without_drag_detect_flag_is_ignored() -> Result<()> {
    let mut session = Session::new();
    session.add_box("A", &[] as &[&str])?;
    let body = node(&session, "A.body");

    let event = PointerEvent::new(PointerEventKind::DragDetected, PRIMARY, body, at(0.0, 0.0));
    session.dispatch(&event)?;
    assert!(!session.selection().has_selection());

    session.dispatch(&event.with_drag_detect(true))?;
    assert!(session.selection().has_selection());
    Ok(())
}

#[test]
fn clicking_a_selected_arrow_is_a_no_op() -> Result<()> {
    let mut session = Session::new();
    let arrow = Selectable::Arrow(session.add_arrow("owns")?);
    let log = record(&mut session);
    let target = node(&session, "owns");

    session.click(target, PRIMARY, at(0.0, 0.0), 0)?;
    session.click(target, PRIMARY, at(0.0, 0.0), 1_000)?;
    session.click(target, PRIMARY, at(0.0, 0.0), 1_100)?;

    assert_eq!(*log.borrow(), vec![change(arrow, true)]);
    Ok(())
}

#[test]
fn secondary_clicks_never_change_selection() -> Result<()> {
    let mut session = Session::new();
    session.add_box("A", &["x"])?;
    session.add_arrow("owns")?;
    let log = record(&mut session);

    for name in ["A.body", "A.center", "A.top", "A.field[0]", "A.outline", "owns"] {
        session.click(node(&session, name), PointerButton::Secondary, at(0.0, 0.0), 0)?;
    }

    assert!(log.borrow().is_empty());
    assert!(!session.selection().has_selection());
    Ok(())
}

#[test]
fn sessions_are_independent() -> Result<()> {
    let mut first = Session::new();
    let mut second = Session::new();
    first.add_box("A", &[] as &[&str])?;
    second.add_box("A", &[] as &[&str])?;

    first.click(node(&first, "A.body"), PRIMARY, at(0.0, 0.0), 0)?;

    assert!(first.selection().has_selection());
    assert!(!second.selection().has_selection());
    assert!(second.scene().selected_elements().is_empty());
    Ok(())
}

#[test]
fn every_surface_gets_its_handlers() -> Result<()> {
    let mut session = Session::new();
    assert_eq!(session.handler_count(), 2);
    session.add_box("A", &["x", "y"])?;
    // body, center, outline, top, two fields, three drag handlers
    assert_eq!(session.handler_count(), 2 + 9);
    session.add_arrow("owns")?;
    assert_eq!(session.handler_count(), 12);
    Ok(())
}
