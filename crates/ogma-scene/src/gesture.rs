use cgmath::MetricSpace;
use ogma_base::{NodeId, Point3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::event::{PointerButton, PointerEvent, PointerEventKind};

pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 400;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub drag_threshold: f64,
    pub double_click_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PressState {
    target: NodeId,
    button: PointerButton,
    origin: Point3,
    dragged: bool,
}

#[derive(Clone, Copy, Debug)]
struct ClickState {
    target: NodeId,
    button: PointerButton,
    time_ms: u64,
    count: u32,
}

/// Synthesizes pressed, drag-detected, released and clicked events from raw
/// pointer input.
///
/// Events of a press/release cycle go to the node that received the press.
/// The released event carries `drag_detect == true` when the pointer never
/// travelled past the drag threshold, and only such releases produce a
/// clicked event.
#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    config: GestureConfig,
    press: Option<PressState>,
    last_click: Option<ClickState>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
            last_click: None,
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// A second press while one is active is ignored.
    pub fn press(
        &mut self,
        target: NodeId,
        button: PointerButton,
        position: Point3,
        time_ms: u64,
    ) -> Vec<PointerEvent> {
        if self.press.is_some() {
            trace!(node = %target, "press ignored, gesture in progress");
            return Vec::new();
        }
        trace!(node = %target, time_ms, "press");
        self.press = Some(PressState {
            target,
            button,
            origin: position,
            dragged: false,
        });
        vec![
            PointerEvent::new(PointerEventKind::Pressed, button, target, position)
                .with_drag_detect(true),
        ]
    }

    pub fn moved(&mut self, position: Point3) -> Vec<PointerEvent> {
        let Some(press) = self.press.as_mut() else {
            return Vec::new();
        };
        if press.dragged || press.origin.distance(position) <= self.config.drag_threshold {
            return Vec::new();
        }
        press.dragged = true;
        trace!(node = %press.target, "drag detected");
        vec![
            PointerEvent::new(
                PointerEventKind::DragDetected,
                press.button,
                press.target,
                press.origin,
            )
            .with_drag_detect(true),
        ]
    }

    pub fn release(&mut self, position: Point3, time_ms: u64) -> Vec<PointerEvent> {
        // a release moved past the threshold counts as a drag as well
        let mut events = self.moved(position);
        let Some(press) = self.press.take() else {
            return events;
        };

        events.push(
            PointerEvent::new(
                PointerEventKind::Released,
                press.button,
                press.target,
                position,
            )
            .with_drag_detect(!press.dragged),
        );
        if press.dragged {
            self.last_click = None;
            return events;
        }

        let count = match self.last_click {
            Some(last)
                if last.target == press.target
                    && last.button == press.button
                    && time_ms.saturating_sub(last.time_ms) <= self.config.double_click_ms =>
            {
                last.count + 1
            }
            _ => 1,
        };
        self.last_click = Some(ClickState {
            target: press.target,
            button: press.button,
            time_ms,
            count,
        });
        trace!(node = %press.target, count, "click");
        events.push(PointerEvent::clicked(
            press.button,
            press.target,
            position,
            count,
        ));
        events
    }

    /// Drops an in-flight press without emitting anything.
    pub fn cancel(&mut self) {
        self.press = None;
    }
}
