use ogma_scene::Selectable;

/// Published once per executed selection transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionChange {
    pub element: Selectable,
    pub selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SelectionChange)>;

/// Listeners are called synchronously, in subscription order.
#[derive(Default)]
pub struct SelectionObservers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl SelectionObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&SelectionChange) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&mut self, change: &SelectionChange) {
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
    }
}

impl std::fmt::Debug for SelectionObservers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionObservers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
