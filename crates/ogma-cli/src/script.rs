use ogma_scene::{GestureConfig, PointerButton};
use serde::Deserialize;

/// An interaction script: the diagram to build and the pointer input to
/// replay against it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub boxes: Vec<BoxSpec>,
    #[serde(default)]
    pub arrows: Vec<ArrowSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxSpec {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArrowSpec {
    pub name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    #[default]
    Primary,
    Secondary,
    Middle,
}

impl From<Button> for PointerButton {
    fn from(button: Button) -> Self {
        match button {
            Button::Primary => PointerButton::Primary,
            Button::Secondary => PointerButton::Secondary,
            Button::Middle => PointerButton::Middle,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase", deny_unknown_fields)]
pub enum Step {
    Click {
        target: String,
        #[serde(default)]
        at: [f64; 3],
        #[serde(default)]
        button: Button,
        #[serde(default = "single")]
        count: u32,
    },
    Press {
        target: String,
        #[serde(default)]
        at: [f64; 3],
        #[serde(default)]
        button: Button,
    },
    Move {
        to: [f64; 3],
    },
    /// Releases the pointer. With a `target`, presses the primary button on
    /// it first, so the step replays a full press/release on that node.
    Release {
        #[serde(default)]
        target: Option<String>,
        #[serde(default)]
        at: [f64; 3],
    },
    /// Press on `target`, move to `to` and release there.
    Drag {
        target: String,
        #[serde(default)]
        at: [f64; 3],
        to: [f64; 3],
    },
    /// Direct selection change by element name (`floor`, `root` or a box or
    /// arrow name).
    Select {
        target: String,
        #[serde(default = "yes")]
        selected: bool,
    },
    /// Advances the replay clock.
    Wait {
        ms: u64,
    },
}

fn single() -> u32 {
    1
}

fn yes() -> bool {
    true
}

pub fn parse(text: &str) -> serde_json::Result<Script> {
    serde_json::from_str(text)
}
