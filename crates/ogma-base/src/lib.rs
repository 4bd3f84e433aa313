use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub type Point3 = cgmath::Point3<f64>;

/// Identity of a box or arrow. Stays fixed while the element lives in its
/// scene; the floor and the sub-scene root need none.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid {
    uuid: Uuid,
}

impl Guid {
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Leading eight hex digits, enough to tell the elements of one diagram
    /// apart in log lines.
    pub fn short(&self) -> String {
        let mut text = self.uuid.simple().to_string();
        text.truncate(8);
        text
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.short())
    }
}

/// Index of a node in a scene arena. Only meaningful for the scene that issued it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown element: {0}")]
    UnknownElement(Guid),
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guid_displays_its_short_form() {
        let id = Guid::new();
        let shown = id.to_string();
        assert_eq!(shown.len(), 8);
        assert!(id.uuid().simple().to_string().starts_with(&shown));
        assert_ne!(id, Guid::new());
    }
}
