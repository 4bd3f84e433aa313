use std::sync::{Arc, RwLock};

use ogma_base::{Point3, Result};
use ogma_scene::{PointerEvent, Scene, Selectable};
use tracing::debug;

use crate::observers::{SelectionChange, SelectionObservers, SubscriptionId};

/// Read-only view of a controller's selection that can be sent to other
/// threads.
#[derive(Clone, Debug)]
pub struct SelectionHandle {
    shared: Arc<RwLock<Option<Selectable>>>,
}

impl SelectionHandle {
    pub fn selected(&self) -> Option<Selectable> {
        match self.shared.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selected().is_some()
    }
}

/// Holds the single selected element of a scene and publishes every change.
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<Selectable>,
    shared: Arc<RwLock<Option<Selectable>>>,
    coordinates: Option<Point3>,
    observers: SelectionObservers,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    pub fn selected(&self) -> Option<Selectable> {
        self.selected
    }

    pub fn is_selected(&self, candidate: Selectable) -> bool {
        self.selected == Some(candidate)
    }

    /// Where the last pointer-driven selection happened.
    pub fn selection_coordinates(&self) -> Option<Point3> {
        self.coordinates
    }

    pub fn handle(&self) -> SelectionHandle {
        SelectionHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        self.observers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Records the event position, then applies the transition.
    pub fn set_selected_at(
        &mut self,
        scene: &mut Scene,
        event: &PointerEvent,
        element: Selectable,
        selected: bool,
    ) -> Result<()> {
        scene.ensure_contains(element)?;
        self.coordinates = Some(event.position);
        self.set_selected(scene, element, selected)
    }

    /// Selecting deselects the previous element first, so listeners always
    /// see the old element leave before the new one arrives.
    pub fn set_selected(
        &mut self,
        scene: &mut Scene,
        element: Selectable,
        selected: bool,
    ) -> Result<()> {
        scene.ensure_contains(element)?;

        if selected {
            if let Some(previous) = self.selected.filter(|previous| *previous != element) {
                self.set_selected(scene, previous, false)?;
            }
            scene.set_selected(element, true)?;
            self.store(Some(element));
            scene.request_focus(element)?;
            if let Selectable::Box(id) = element {
                let group = scene.pane_box(id)?.group();
                scene.to_front(group)?;
                let floor = scene.floor().node();
                scene.to_front(floor)?;
            }
        } else {
            scene.set_selected(element, false)?;
            if let Selectable::Box(id) = element {
                scene.pane_box_mut(id)?.set_all_labels_selected(false);
            }
            if self.selected == Some(element) {
                self.store(None);
            }
        }

        debug!(element = %scene.describe(element), selected, "selection changed");
        self.observers.notify(&SelectionChange { element, selected });
        Ok(())
    }

    /// Deselects the current element, if any.
    pub fn clear(&mut self, scene: &mut Scene) -> Result<()> {
        match self.selected {
            Some(current) => self.set_selected(scene, current, false),
            None => Ok(()),
        }
    }

    fn store(&mut self, selected: Option<Selectable>) {
        self.selected = selected;
        match self.shared.write() {
            Ok(mut guard) => *guard = selected,
            Err(poisoned) => *poisoned.into_inner() = selected,
        }
    }
}
