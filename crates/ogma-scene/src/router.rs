use std::collections::HashMap;

use ogma_base::{NodeId, Result};
use tracing::trace;

use crate::event::{PointerEvent, PointerEventKind};

/// Returned by handlers. `Stop` consumes the event: the remaining handlers of
/// the current node still run, ancestors are not visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

type Handler<C> = Box<dyn Fn(&mut C, &PointerEvent) -> Result<Propagation>>;

/// Pointer event handlers keyed by node and event kind.
///
/// `C` is the state handlers mutate. The router is kept apart from that state
/// so a dispatch can lend it out mutably.
pub struct EventRouter<C> {
    handlers: HashMap<(NodeId, PointerEventKind), Vec<Handler<C>>>,
}

impl<C> Default for EventRouter<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventRouter<C> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn add_handler<F>(&mut self, node: NodeId, kind: PointerEventKind, handler: F)
    where
        F: Fn(&mut C, &PointerEvent) -> Result<Propagation> + 'static,
    {
        self.handlers
            .entry((node, kind))
            .or_default()
            .push(Box::new(handler));
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Delivers `event` along `path` (target first, root last) until a node
    /// consumes it.
    pub fn dispatch(
        &self,
        ctx: &mut C,
        path: &[NodeId],
        event: &PointerEvent,
    ) -> Result<Propagation> {
        for node in path {
            let Some(handlers) = self.handlers.get(&(*node, event.kind)) else {
                continue;
            };
            let mut propagation = Propagation::Continue;
            for handler in handlers {
                if handler(ctx, event)? == Propagation::Stop {
                    propagation = Propagation::Stop;
                }
            }
            if propagation == Propagation::Stop {
                trace!(node = %node, kind = ?event.kind, "event consumed");
                return Ok(Propagation::Stop);
            }
        }
        Ok(Propagation::Continue)
    }
}
