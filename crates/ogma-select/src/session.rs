use ogma_base::{Guid, NodeId, Point3, Result};
use ogma_scene::{
    EventRouter, GestureConfig, GestureTracker, PointerButton, PointerEvent, Propagation,
    Scene, Selectable,
};
use tracing::trace;

use crate::binder;
use crate::controller::SelectionController;
use crate::observers::{SelectionChange, SubscriptionId};

/// The state pointer handlers work on.
#[derive(Debug, Default)]
pub struct EditorContext {
    pub scene: Scene,
    pub selection: SelectionController,
}

impl EditorContext {
    pub fn select_at(&mut self, event: &PointerEvent, element: Selectable) -> Result<()> {
        self.selection
            .set_selected_at(&mut self.scene, event, element, true)
    }
}

/// One diagram being edited: a scene, its selection and the interaction
/// wiring between them. Sessions share nothing.
pub struct Session {
    context: EditorContext,
    router: EventRouter<EditorContext>,
    gestures: GestureTracker,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    pub fn with_config(config: GestureConfig) -> Self {
        let context = EditorContext::default();
        let mut router = EventRouter::new();
        binder::enable_sub_scene_selection(&mut router, &context.scene);
        Self {
            context,
            router,
            gestures: GestureTracker::new(config),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.context.scene
    }

    pub fn selection(&self) -> &SelectionController {
        &self.context.selection
    }

    pub fn handler_count(&self) -> usize {
        self.router.handler_count()
    }

    pub fn add_box<S: AsRef<str>>(&mut self, name: &str, fields: &[S]) -> Result<Guid> {
        let id = self.context.scene.add_box(name, fields)?;
        binder::enable_box_selection(&mut self.router, &self.context.scene, id)?;
        Ok(id)
    }

    pub fn add_arrow(&mut self, name: &str) -> Result<Guid> {
        let id = self.context.scene.add_arrow(name)?;
        binder::enable_arrow_selection(&mut self.router, &self.context.scene, id)?;
        Ok(id)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        self.context.selection.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.context.selection.unsubscribe(id)
    }

    /// Direct selection change, bypassing pointer handling.
    pub fn set_selected(&mut self, element: Selectable, selected: bool) -> Result<()> {
        let EditorContext { scene, selection } = &mut self.context;
        selection.set_selected(scene, element, selected)
    }

    /// Routes one event from its target up to the root.
    pub fn dispatch(&mut self, event: &PointerEvent) -> Result<Propagation> {
        let path = self.context.scene.ancestry(event.target)?;
        trace!(node = %event.target, kind = ?event.kind, "dispatch");
        self.router.dispatch(&mut self.context, &path, event)
    }

    fn dispatch_all(&mut self, events: Vec<PointerEvent>) -> Result<()> {
        for event in &events {
            self.dispatch(event)?;
        }
        Ok(())
    }

    pub fn press(
        &mut self,
        target: NodeId,
        button: PointerButton,
        position: Point3,
        time_ms: u64,
    ) -> Result<()> {
        self.context.scene.node(target)?;
        let events = self.gestures.press(target, button, position, time_ms);
        self.dispatch_all(events)
    }

    pub fn drag_to(&mut self, position: Point3) -> Result<()> {
        let events = self.gestures.moved(position);
        self.dispatch_all(events)
    }

    pub fn release(&mut self, position: Point3, time_ms: u64) -> Result<()> {
        let events = self.gestures.release(position, time_ms);
        self.dispatch_all(events)
    }

    /// Press and release in place.
    pub fn click(
        &mut self,
        target: NodeId,
        button: PointerButton,
        position: Point3,
        time_ms: u64,
    ) -> Result<()> {
        self.press(target, button, position, time_ms)?;
        self.release(position, time_ms)
    }
}
