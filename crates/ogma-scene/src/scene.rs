use std::collections::HashMap;

use ogma_base::{Error, Guid, NodeId, Result};
use tracing::debug;

use crate::element::{Arrow, Floor, Label, PaneBox};
use crate::selectable::Selectable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SubSceneRoot,
    Floor,
    BoxGroup(Guid),
    BoxBody(Guid),
    BoxCenter(Guid),
    BoxOutline(Guid),
    TopLabel(Guid),
    CenterLabel(Guid, usize),
    Arrow(Guid),
}

#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in back-to-front render order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Headless scene graph of one diagram: a sub-scene root holding the floor,
/// the class boxes and the arrows.
///
/// The scene owns the visible state the selection logic touches: selected
/// flags, label highlights, input focus and render order.
#[derive(Clone, Debug)]
pub struct Scene {
    nodes: Vec<Node>,
    names: HashMap<String, NodeId>,
    root: NodeId,
    floor: Floor,
    sub_scene_selected: bool,
    boxes: HashMap<Guid, PaneBox>,
    arrows: HashMap<Guid, Arrow>,
    focus: Option<Selectable>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            names: HashMap::new(),
            root: NodeId::from_index(0),
            floor: Floor::new(NodeId::from_index(0)),
            sub_scene_selected: false,
            boxes: HashMap::new(),
            arrows: HashMap::new(),
            focus: None,
        };
        let root = scene.push_node(None, NodeKind::SubSceneRoot, "root".to_string());
        let floor = scene.push_node(Some(root), NodeKind::Floor, "floor".to_string());
        scene.root = root;
        scene.floor = Floor::new(floor);
        scene
    }

    fn push_node(&mut self, parent: Option<NodeId>, kind: NodeKind, name: String) -> NodeId {
        let id = NodeId::from_index(self.nodes.len() as u32);
        self.names.insert(name.clone(), id);
        self.nodes.push(Node {
            kind,
            name,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn ensure_free_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(Error::InvalidParameter("element name is empty".to_string()));
        }
        if self.names.contains_key(name) {
            return Err(Error::InvalidParameter(format!(
                "node name '{name}' is already in use"
            )));
        }
        Ok(())
    }

    /// Adds a class box with one center label per field. Node names are
    /// derived from the box name: `<name>.body`, `<name>.center`,
    /// `<name>.outline`, `<name>.top` and `<name>.field[<n>]`.
    pub fn add_box<S: AsRef<str>>(&mut self, name: &str, fields: &[S]) -> Result<Guid> {
        let name = name.trim();
        self.ensure_free_name(name)?;
        for suffix in ["body", "center", "outline", "top"] {
            self.ensure_free_name(&format!("{name}.{suffix}"))?;
        }
        for index in 0..fields.len() {
            self.ensure_free_name(&format!("{name}.field[{index}]"))?;
        }

        let id = Guid::new();
        let group = self.push_node(Some(self.root), NodeKind::BoxGroup(id), name.to_string());
        let body = self.push_node(Some(group), NodeKind::BoxBody(id), format!("{name}.body"));
        let center = self.push_node(Some(group), NodeKind::BoxCenter(id), format!("{name}.center"));
        let labels = fields
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let node = self.push_node(
                    Some(center),
                    NodeKind::CenterLabel(id, index),
                    format!("{name}.field[{index}]"),
                );
                Label::new(node, text.as_ref())
            })
            .collect();
        let outline =
            self.push_node(Some(group), NodeKind::BoxOutline(id), format!("{name}.outline"));
        let top = self.push_node(Some(group), NodeKind::TopLabel(id), format!("{name}.top"));

        let pane = PaneBox::new(
            id,
            name,
            group,
            body,
            center,
            outline,
            Label::new(top, name),
            labels,
        );
        self.boxes.insert(id, pane);
        debug!(%id, name, "box added");
        Ok(id)
    }

    pub fn add_arrow(&mut self, name: &str) -> Result<Guid> {
        let name = name.trim();
        self.ensure_free_name(name)?;
        let id = Guid::new();
        let node = self.push_node(Some(self.root), NodeKind::Arrow(id), name.to_string());
        self.arrows.insert(id, Arrow::new(id, name, node));
        debug!(%id, name, "arrow added");
        Ok(id)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.index()).ok_or(Error::UnknownNode(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    /// The node itself followed by its ancestors up to the root.
    pub fn ancestry(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut path = vec![id];
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            path.push(parent);
            current = self.node(parent)?;
        }
        Ok(path)
    }

    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Back-to-front order of the root's children.
    pub fn render_order(&self) -> &[NodeId] {
        &self.nodes[self.root.index()].children
    }

    /// Moves a node to the front of its siblings.
    pub fn to_front(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        let siblings = &mut self.nodes[parent.index()].children;
        siblings.retain(|child| *child != id);
        siblings.push(id);
        Ok(())
    }

    /// The selectable element a node belongs to, if any.
    pub fn element_of(&self, id: NodeId) -> Result<Selectable> {
        let element = match self.node(id)?.kind {
            NodeKind::SubSceneRoot => Selectable::SubScene,
            NodeKind::Floor => Selectable::Floor,
            NodeKind::BoxGroup(box_id)
            | NodeKind::BoxBody(box_id)
            | NodeKind::BoxCenter(box_id)
            | NodeKind::BoxOutline(box_id)
            | NodeKind::TopLabel(box_id)
            | NodeKind::CenterLabel(box_id, _) => Selectable::Box(box_id),
            NodeKind::Arrow(arrow_id) => Selectable::Arrow(arrow_id),
        };
        Ok(element)
    }

    pub fn pane_box(&self, id: Guid) -> Result<&PaneBox> {
        self.boxes.get(&id).ok_or(Error::UnknownElement(id))
    }

    pub fn pane_box_mut(&mut self, id: Guid) -> Result<&mut PaneBox> {
        self.boxes.get_mut(&id).ok_or(Error::UnknownElement(id))
    }

    pub fn arrow(&self, id: Guid) -> Result<&Arrow> {
        self.arrows.get(&id).ok_or(Error::UnknownElement(id))
    }

    pub fn boxes(&self) -> impl Iterator<Item = &PaneBox> {
        self.boxes.values()
    }

    pub fn arrows(&self) -> impl Iterator<Item = &Arrow> {
        self.arrows.values()
    }

    pub fn contains(&self, element: Selectable) -> bool {
        match element {
            Selectable::Box(id) => self.boxes.contains_key(&id),
            Selectable::Arrow(id) => self.arrows.contains_key(&id),
            Selectable::Floor | Selectable::SubScene => true,
        }
    }

    pub fn ensure_contains(&self, element: Selectable) -> Result<()> {
        match element {
            Selectable::Box(id) | Selectable::Arrow(id) if !self.contains(element) => {
                Err(Error::UnknownElement(id))
            }
            _ => Ok(()),
        }
    }

    /// Node that represents the element as a whole.
    pub fn element_node(&self, element: Selectable) -> Result<NodeId> {
        match element {
            Selectable::Box(id) => Ok(self.pane_box(id)?.group()),
            Selectable::Arrow(id) => Ok(self.arrow(id)?.node()),
            Selectable::Floor => Ok(self.floor.node()),
            Selectable::SubScene => Ok(self.root),
        }
    }

    pub fn is_selected(&self, element: Selectable) -> Result<bool> {
        match element {
            Selectable::Box(id) => Ok(self.pane_box(id)?.is_selected()),
            Selectable::Arrow(id) => Ok(self.arrow(id)?.is_selected()),
            Selectable::Floor => Ok(self.floor.is_selected()),
            Selectable::SubScene => Ok(self.sub_scene_selected),
        }
    }

    /// Sets the element's own selected flag. Does not touch any other element.
    pub fn set_selected(&mut self, element: Selectable, selected: bool) -> Result<()> {
        match element {
            Selectable::Box(id) => self.pane_box_mut(id)?.set_selected(selected),
            Selectable::Arrow(id) => self
                .arrows
                .get_mut(&id)
                .ok_or(Error::UnknownElement(id))?
                .set_selected(selected),
            Selectable::Floor => self.floor.set_selected(selected),
            Selectable::SubScene => self.sub_scene_selected = selected,
        }
        Ok(())
    }

    pub fn request_focus(&mut self, element: Selectable) -> Result<()> {
        self.ensure_contains(element)?;
        self.focus = Some(element);
        Ok(())
    }

    pub fn focus_owner(&self) -> Option<Selectable> {
        self.focus
    }

    /// Every element whose selected flag is set.
    pub fn selected_elements(&self) -> Vec<Selectable> {
        let mut selected: Vec<Selectable> = self
            .boxes
            .values()
            .filter(|pane| pane.is_selected())
            .map(|pane| Selectable::Box(pane.id()))
            .chain(
                self.arrows
                    .values()
                    .filter(|arrow| arrow.is_selected())
                    .map(|arrow| Selectable::Arrow(arrow.id())),
            )
            .collect();
        if self.floor.is_selected() {
            selected.push(Selectable::Floor);
        }
        if self.sub_scene_selected {
            selected.push(Selectable::SubScene);
        }
        selected
    }

    /// Human readable name of an element.
    pub fn describe(&self, element: Selectable) -> String {
        match element {
            Selectable::Box(id) => match self.boxes.get(&id) {
                Some(pane) => format!("box {}", pane.name()),
                None => element.to_string(),
            },
            Selectable::Arrow(id) => match self.arrows.get(&id) {
                Some(arrow) => format!("arrow {}", arrow.name()),
                None => element.to_string(),
            },
            Selectable::Floor | Selectable::SubScene => element.to_string(),
        }
    }
}
