use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use ogma_base::{NodeId, Point3};
use ogma_scene::{PointerButton, Selectable};
use ogma_select::{SelectionChange, Session};
use serde::Serialize;
use tracing::{debug, info};

use crate::script::{Script, Step};

/// Clock advance between two replayed steps.
const STEP_GAP_MS: u64 = 1_000;
/// Clock advance between the clicks of a multi-click step.
const CLICK_GAP_MS: u64 = 50;

#[derive(Debug, Serialize)]
pub struct Notification {
    pub step: usize,
    pub element: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub notifications: Vec<Notification>,
    pub selected: Option<String>,
    pub coordinates: Option<[f64; 3]>,
    pub focus: Option<String>,
}

pub fn run(script: &Script) -> Result<Report> {
    let mut session = Session::with_config(script.gestures);
    for spec in &script.boxes {
        session
            .add_box(&spec.name, &spec.fields)
            .with_context(|| format!("failed to add box '{}'", spec.name))?;
    }
    for spec in &script.arrows {
        session
            .add_arrow(&spec.name)
            .with_context(|| format!("failed to add arrow '{}'", spec.name))?;
    }

    let changes: Rc<RefCell<Vec<(usize, SelectionChange)>>> = Rc::default();
    let current_step = Rc::new(RefCell::new(0usize));
    {
        let changes = Rc::clone(&changes);
        let current_step = Rc::clone(&current_step);
        session.subscribe(move |change| {
            changes.borrow_mut().push((*current_step.borrow(), *change));
        });
    }

    let mut clock = 0u64;
    for (index, step) in script.steps.iter().enumerate() {
        *current_step.borrow_mut() = index;
        clock += STEP_GAP_MS;
        debug!(step = index, ?step, "replaying");
        apply(&mut session, step, &mut clock).with_context(|| format!("step {index} failed"))?;
    }

    let scene = session.scene();
    let notifications = changes
        .borrow()
        .iter()
        .map(|(step, change)| Notification {
            step: *step,
            element: scene.describe(change.element),
            selected: change.selected,
        })
        .collect();
    let report = Report {
        notifications,
        selected: session.selection().selected().map(|element| scene.describe(element)),
        coordinates: session
            .selection()
            .selection_coordinates()
            .map(|point| [point.x, point.y, point.z]),
        focus: scene.focus_owner().map(|element| scene.describe(element)),
    };
    info!(
        steps = script.steps.len(),
        notifications = report.notifications.len(),
        "replay complete"
    );
    Ok(report)
}

fn apply(session: &mut Session, step: &Step, clock: &mut u64) -> Result<()> {
    match step {
        Step::Click {
            target,
            at,
            button,
            count,
        } => {
            if *count == 0 {
                bail!("click count for '{target}' must be at least 1");
            }
            let node = resolve_node(session, target)?;
            let button = PointerButton::from(*button);
            for _ in 0..*count {
                session.click(node, button, point(at), *clock)?;
                *clock += CLICK_GAP_MS;
            }
        }
        Step::Press { target, at, button } => {
            let node = resolve_node(session, target)?;
            session.press(node, PointerButton::from(*button), point(at), *clock)?;
        }
        Step::Move { to } => session.drag_to(point(to))?,
        Step::Release { target, at } => {
            if let Some(target) = target {
                let node = resolve_node(session, target)?;
                session.press(node, PointerButton::Primary, point(at), *clock)?;
            }
            session.release(point(at), *clock)?;
        }
        Step::Drag { target, at, to } => {
            let node = resolve_node(session, target)?;
            session.press(node, PointerButton::Primary, point(at), *clock)?;
            session.drag_to(point(to))?;
            session.release(point(to), *clock + CLICK_GAP_MS)?;
        }
        Step::Select { target, selected } => {
            let element = resolve_element(session, target)?;
            session.set_selected(element, *selected)?;
        }
        Step::Wait { ms } => *clock += ms,
    }
    Ok(())
}

fn point(coords: &[f64; 3]) -> Point3 {
    Point3::new(coords[0], coords[1], coords[2])
}

fn resolve_node(session: &Session, name: &str) -> Result<NodeId> {
    match session.scene().find_node(name) {
        Some(node) => Ok(node),
        None => bail!("unknown target '{name}'"),
    }
}

fn resolve_element(session: &Session, name: &str) -> Result<Selectable> {
    let node = resolve_node(session, name)?;
    Ok(session.scene().element_of(node)?)
}
