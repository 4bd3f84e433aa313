use ogma_base::{Error, Guid, NodeId, Result};

/// Addresses one of the text labels of a [`PaneBox`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelSlot {
    Top,
    Field(usize),
}

#[derive(Clone, Debug)]
pub struct Label {
    node: NodeId,
    text: String,
    highlighted: bool,
    editing: bool,
}

impl Label {
    pub(crate) fn new(node: NodeId, text: impl Into<String>) -> Self {
        Self {
            node,
            text: text.into(),
            highlighted: false,
            editing: false,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }
}

/// A class box: a group node holding the body, the center pane with one
/// label per field, the selection outline and the top (name) label.
#[derive(Clone, Debug)]
pub struct PaneBox {
    id: Guid,
    name: String,
    group: NodeId,
    body: NodeId,
    center: NodeId,
    outline: NodeId,
    top: Label,
    fields: Vec<Label>,
    selected: bool,
}

impl PaneBox {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: Guid,
        name: impl Into<String>,
        group: NodeId,
        body: NodeId,
        center: NodeId,
        outline: NodeId,
        top: Label,
        fields: Vec<Label>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            group,
            body,
            center,
            outline,
            top,
            fields,
            selected: false,
        }
    }

    pub fn id(&self) -> Guid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn group(&self) -> NodeId {
        self.group
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn center(&self) -> NodeId {
        self.center
    }

    pub fn outline(&self) -> NodeId {
        self.outline
    }

    pub fn top_label(&self) -> &Label {
        &self.top
    }

    pub fn center_labels(&self) -> &[Label] {
        &self.fields
    }

    pub fn label(&self, slot: LabelSlot) -> Result<&Label> {
        match slot {
            LabelSlot::Top => Ok(&self.top),
            LabelSlot::Field(index) => self.fields.get(index).ok_or_else(|| {
                Error::InvalidParameter(format!("{} has no field label {index}", self.name))
            }),
        }
    }

    fn label_mut(&mut self, slot: LabelSlot) -> Result<&mut Label> {
        match slot {
            LabelSlot::Top => Ok(&mut self.top),
            LabelSlot::Field(index) => {
                let name = &self.name;
                self.fields.get_mut(index).ok_or_else(|| {
                    Error::InvalidParameter(format!("{name} has no field label {index}"))
                })
            }
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Highlights a single label. At most one label of a box is highlighted.
    pub fn set_label_selected(&mut self, slot: LabelSlot, selected: bool) -> Result<()> {
        // validate before clearing the others
        self.label(slot)?;
        if selected {
            self.set_all_labels_selected(false);
        }
        self.label_mut(slot)?.highlighted = selected;
        Ok(())
    }

    pub fn set_all_labels_selected(&mut self, selected: bool) {
        self.top.highlighted = selected;
        for label in &mut self.fields {
            label.highlighted = selected;
        }
    }

    pub fn highlighted_label(&self) -> Option<LabelSlot> {
        if self.top.highlighted {
            return Some(LabelSlot::Top);
        }
        self.fields
            .iter()
            .position(Label::is_highlighted)
            .map(LabelSlot::Field)
    }

    pub fn allow_top_text_input(&mut self, allow: bool) {
        self.top.editing = allow;
    }

    pub fn allow_center_field_text_input(&mut self, index: usize, allow: bool) -> Result<()> {
        self.label_mut(LabelSlot::Field(index))?.editing = allow;
        Ok(())
    }

    /// Maps a label node back to its slot.
    pub fn slot_of(&self, node: NodeId) -> Option<LabelSlot> {
        if self.top.node == node {
            return Some(LabelSlot::Top);
        }
        self.fields
            .iter()
            .position(|label| label.node == node)
            .map(LabelSlot::Field)
    }
}

#[derive(Clone, Debug)]
pub struct Arrow {
    id: Guid,
    name: String,
    node: NodeId,
    selected: bool,
}

impl Arrow {
    pub(crate) fn new(id: Guid, name: impl Into<String>, node: NodeId) -> Self {
        Self {
            id,
            name: name.into(),
            node,
            selected: false,
        }
    }

    pub fn id(&self) -> Guid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[derive(Clone, Debug)]
pub struct Floor {
    node: NodeId,
    selected: bool,
}

impl Floor {
    pub(crate) fn new(node: NodeId) -> Self {
        Self {
            node,
            selected: false,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}
