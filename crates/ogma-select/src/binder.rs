//! Pointer handlers that drive the selection from scene interaction.
//!
//! Every handler ignores events not triggered by the primary button.

use ogma_base::{Guid, Result};
use ogma_scene::{
    EventRouter, LabelSlot, PointerEvent, PointerEventKind, Propagation, Scene, Selectable,
};

use crate::session::EditorContext;

/// Releasing on the bare sub-scene or on the floor after a click (not a drag)
/// selects that background surface.
pub fn enable_sub_scene_selection(router: &mut EventRouter<EditorContext>, scene: &Scene) {
    let root = scene.root();
    router.add_handler(root, PointerEventKind::Released, move |ctx, event| {
        if event.is_primary() && event.drag_detect && event.target == root {
            ctx.select_at(event, Selectable::SubScene)?;
        }
        Ok(Propagation::Continue)
    });

    let floor = scene.floor().node();
    router.add_handler(floor, PointerEventKind::Released, |ctx, event| {
        if event.is_primary() && event.drag_detect {
            ctx.select_at(event, Selectable::Floor)?;
        }
        Ok(Propagation::Continue)
    });
}

pub fn enable_box_selection(
    router: &mut EventRouter<EditorContext>,
    scene: &Scene,
    id: Guid,
) -> Result<()> {
    let pane = scene.pane_box(id)?;
    let element = Selectable::Box(id);

    for node in [pane.body(), pane.center()] {
        router.add_handler(node, PointerEventKind::Clicked, move |ctx, event| {
            if event.is_primary() {
                ctx.scene.pane_box_mut(id)?.set_all_labels_selected(false);
                ctx.select_at(event, element)?;
            }
            Ok(Propagation::Continue)
        });
    }

    router.add_handler(pane.outline(), PointerEventKind::Clicked, move |ctx, event| {
        if event.is_primary() {
            ctx.scene.pane_box_mut(id)?.set_all_labels_selected(false);
        }
        Ok(Propagation::Continue)
    });

    router.add_handler(
        pane.top_label().node(),
        PointerEventKind::Clicked,
        move |ctx, event| label_clicked(ctx, event, id, LabelSlot::Top),
    );
    for (index, label) in pane.center_labels().iter().enumerate() {
        router.add_handler(label.node(), PointerEventKind::Clicked, move |ctx, event| {
            label_clicked(ctx, event, id, LabelSlot::Field(index))
        });
    }

    // dragging an unselected box selects it first
    for node in [pane.body(), pane.center(), pane.top_label().node()] {
        router.add_handler(node, PointerEventKind::DragDetected, move |ctx, event| {
            if event.is_primary() && event.drag_detect && !ctx.scene.is_selected(element)? {
                ctx.scene.pane_box_mut(id)?.set_all_labels_selected(false);
                ctx.select_at(event, element)?;
            }
            Ok(Propagation::Continue)
        });
    }

    Ok(())
}

fn label_clicked(
    ctx: &mut EditorContext,
    event: &PointerEvent,
    id: Guid,
    slot: LabelSlot,
) -> Result<Propagation> {
    if !event.is_primary() {
        return Ok(Propagation::Continue);
    }
    let element = Selectable::Box(id);
    let was_selected = ctx.scene.is_selected(element)?;

    ctx.scene.pane_box_mut(id)?.set_label_selected(slot, true)?;
    ctx.select_at(event, element)?;

    if was_selected && event.click_count >= 2 {
        let pane = ctx.scene.pane_box_mut(id)?;
        match slot {
            LabelSlot::Top => pane.allow_top_text_input(true),
            LabelSlot::Field(index) => pane.allow_center_field_text_input(index, true)?,
        }
    }
    // the center pane would otherwise clear the highlight again
    Ok(Propagation::Stop)
}

/// Clicking an arrow selects it unless it already is.
pub fn enable_arrow_selection(
    router: &mut EventRouter<EditorContext>,
    scene: &Scene,
    id: Guid,
) -> Result<()> {
    let element = Selectable::Arrow(id);
    let node = scene.arrow(id)?.node();
    router.add_handler(node, PointerEventKind::Clicked, move |ctx, event| {
        if event.is_primary() && !ctx.scene.is_selected(element)? {
            ctx.select_at(event, element)?;
        }
        Ok(Propagation::Continue)
    });
    Ok(())
}
