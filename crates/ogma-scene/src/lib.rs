mod element;
mod event;
mod gesture;
mod router;
mod scene;
mod selectable;

pub use element::{Arrow, Floor, Label, LabelSlot, PaneBox};
pub use event::{PointerButton, PointerEvent, PointerEventKind};
pub use gesture::{
    DEFAULT_DOUBLE_CLICK_MS, DEFAULT_DRAG_THRESHOLD, GestureConfig, GestureTracker,
};
pub use ogma_base::{Error, Guid, NodeId, Point3, Result};
pub use router::{EventRouter, Propagation};
pub use scene::{Node, NodeKind, Scene};
pub use selectable::Selectable;
