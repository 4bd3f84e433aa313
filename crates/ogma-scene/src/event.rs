use ogma_base::{NodeId, Point3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Pressed,
    DragDetected,
    Released,
    Clicked,
}

/// A pointer event as delivered to handlers.
///
/// `target` is the picked node; routing bubbles the event from there to the
/// scene root. `drag_detect` on a released event means the press/release
/// cycle went through drag detection without an actual drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: PointerButton,
    pub target: NodeId,
    pub position: Point3,
    pub click_count: u32,
    pub drag_detect: bool,
}

impl PointerEvent {
    pub fn new(
        kind: PointerEventKind,
        button: PointerButton,
        target: NodeId,
        position: Point3,
    ) -> Self {
        Self {
            kind,
            button,
            target,
            position,
            click_count: 0,
            drag_detect: false,
        }
    }

    pub fn clicked(button: PointerButton, target: NodeId, position: Point3, count: u32) -> Self {
        Self::new(PointerEventKind::Clicked, button, target, position).with_click_count(count)
    }

    pub fn with_click_count(mut self, count: u32) -> Self {
        self.click_count = count;
        self
    }

    pub fn with_drag_detect(mut self, drag_detect: bool) -> Self {
        self.drag_detect = drag_detect;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}
