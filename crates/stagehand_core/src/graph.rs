//! Hierarchical scene graph
//!
//! The graph is a parent-owned tree of [`Node`]s. Every participant in the
//! hierarchy has exactly one [`NodeRole`]: the application controller sits at
//! the top, [`Group`]s own children and carry an assignable scene handle, and
//! [`Leaf`] renderables carry no scene handle of their own.

use glam::Vec3;

use crate::SceneRef;

/// Role of a participant in the controller/node hierarchy
///
/// A closed set dispatched on by tag; the scene-reassignment traversal only
/// touches nodes with the `Group` role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// The application controller (the root group's parent)
    Application,
    /// A container node owning children and a scene handle
    Group,
    /// A renderable without children or a scene handle
    Leaf,
}

/// A node in the scene graph
#[derive(Debug)]
pub enum Node {
    /// Container node
    Group(Group),
    /// Renderable node
    Leaf(Leaf),
}

impl Node {
    /// Convenience constructor for a leaf renderable
    pub fn leaf(name: impl Into<String>, position: Vec3) -> Self {
        Node::Leaf(Leaf::new(name, position))
    }

    /// Role tag of this node
    pub fn role(&self) -> NodeRole {
        match self {
            Node::Group(_) => NodeRole::Group,
            Node::Leaf(_) => NodeRole::Leaf,
        }
    }

    /// Node name
    pub fn name(&self) -> &str {
        match self {
            Node::Group(group) => group.name(),
            Node::Leaf(leaf) => leaf.name(),
        }
    }

    /// Children of this node (empty for leaves)
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group(group) => group.children(),
            Node::Leaf(_) => &[],
        }
    }

    /// Mutable children of this node (empty for leaves)
    pub fn children_mut(&mut self) -> &mut [Node] {
        match self {
            Node::Group(group) => group.children_mut(),
            Node::Leaf(_) => &mut [],
        }
    }

    /// Pre-order search of this node's subtree, matching self first
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name() == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }
}

/// A container node in the scene graph
///
/// Groups own their children and carry the scene handle that the
/// scene-replacement traversal reassigns.
#[derive(Debug, Default)]
pub struct Group {
    name: String,
    scene: Option<SceneRef>,
    parent: Option<NodeRole>,
    children: Vec<Node>,
}

impl Group {
    /// Create an empty, unbound group
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the group to a scene and name it
    pub fn initialize_group(&mut self, scene: SceneRef, name: impl Into<String>) {
        self.scene = Some(scene);
        self.name = name.into();
    }

    /// Notification that this group has been attached to a parent
    pub fn on_parented(&mut self, scene: &SceneRef, parent: NodeRole) {
        self.scene = Some(scene.clone());
        self.parent = Some(parent);
    }

    /// Group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Role of this group's parent, if it has been parented
    pub fn parent_role(&self) -> Option<NodeRole> {
        self.parent
    }

    /// Record the role of this group's parent
    pub fn set_parent(&mut self, parent: NodeRole) {
        self.parent = Some(parent);
    }

    /// The scene this group currently points at
    pub fn scene(&self) -> Option<&SceneRef> {
        self.scene.as_ref()
    }

    /// Overwrite the scene handle
    pub fn set_scene(&mut self, scene: SceneRef) {
        self.scene = Some(scene);
    }

    /// Children in insertion order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Mutable access to the children
    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Append a child node
    pub fn add(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Detach and return the first direct child with the given name
    pub fn remove(&mut self, name: &str) -> Option<Node> {
        let index = self.children.iter().position(|child| child.name() == name)?;
        Some(self.children.remove(index))
    }

    /// Detach all children
    pub fn remove_all(&mut self) {
        self.children.clear();
    }

    /// Pre-order, left-to-right search over this group's children
    pub fn find(&self, name: &str) -> Option<&Node> {
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// A renderable node without children
#[derive(Debug, Clone)]
pub struct Leaf {
    name: String,
    position: Vec3,
}

impl Leaf {
    /// Create a leaf at a position
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Leaf name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Leaf position
    pub fn position(&self) -> Vec3 {
        self.position
    }
}
