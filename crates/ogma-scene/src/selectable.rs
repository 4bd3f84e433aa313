use ogma_base::Guid;

/// An element of a scene that can carry the selection.
///
/// Boxes and arrows are identified by their guid; every scene has exactly one
/// floor and one sub-scene root, so those variants need no payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Selectable {
    Box(Guid),
    Arrow(Guid),
    Floor,
    SubScene,
}

impl Selectable {
    pub fn box_id(&self) -> Option<Guid> {
        match self {
            Self::Box(id) => Some(*id),
            _ => None,
        }
    }
}

impl std::fmt::Display for Selectable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Box(id) => write!(f, "box {id}"),
            Self::Arrow(id) => write!(f, "arrow {id}"),
            Self::Floor => write!(f, "floor"),
            Self::SubScene => write!(f, "sub-scene"),
        }
    }
}
