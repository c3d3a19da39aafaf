use crate::api::types::{NodeId, TextureId};
use crate::components::node::Node;

/// Simple node storage using a flat Vec.
/// Designed for small scenes (tens of nodes, not thousands).
/// Parent/child links live in `TransformGraph`, not here.
pub struct Scene {
    nodes: Vec<Node>,
    /// Reflection environment for lit materials. `None` until the
    /// environment texture finishes loading.
    pub environment: Option<TextureId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(16),
            environment: None,
        }
    }

    /// Add a node to the scene.
    pub fn spawn(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Iterate over all nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = NodeId(1);
        scene.spawn(Node::new(id).with_position(Vec3::new(1.0, 2.0, 3.0)));
        let n = scene.get(id).unwrap();
        assert_eq!(n.local.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn environment_starts_unset() {
        assert!(Scene::new().environment.is_none());
    }
}
