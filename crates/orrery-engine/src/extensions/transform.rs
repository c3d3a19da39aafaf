// extensions/transform.rs
//
// Transform hierarchy: tracks parent-child relationships by NodeId.
// Local transforms live on each Node; the graph only knows who owns whom
// and composes world matrices from the roots down.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.set_parent(moon, Some(planet));
//   graph.propagate(&mut scene);  // writes Node.world for every node

use std::collections::HashMap;
use glam::Mat4;
use crate::api::types::NodeId;
use crate::core::scene::Scene;

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Transform hierarchy graph: manages parent-child relationships.
///
/// Exists separately from Scene so flat scenes pay nothing for it.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<NodeId, TransformNode>,
    /// Nodes with no parent, in registration order.
    roots: Vec<NodeId>,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node as a root. Registering twice is harmless.
    pub fn register(&mut self, id: NodeId) {
        if !self.nodes.contains_key(&id) {
            self.nodes.insert(id, TransformNode::default());
            self.roots.push(id);
        }
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    /// Requests that would create a cycle are ignored.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        self.register(child);
        if let Some(p) = parent {
            self.register(p);
            if p == child || self.is_ancestor(child, p) {
                log::warn!("ignoring parent {:?} for {:?}: would form a cycle", p, child);
                return;
            }
        }

        // Remove from old parent's children
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }
    }

    /// Whether `ancestor` sits somewhere above `id`.
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.get_parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.get_parent(p);
        }
        false
    }

    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Compose world matrices from the roots down and write them to the scene.
    /// Nodes in the scene that were never registered are treated as roots.
    pub fn propagate(&self, scene: &mut Scene) {
        for node in scene.iter_mut() {
            if !self.nodes.contains_key(&node.id) {
                node.world = node.local.matrix();
            }
        }
        for &root in &self.roots {
            self.propagate_recursive(root, Mat4::IDENTITY, scene);
        }
    }

    fn propagate_recursive(&self, id: NodeId, parent_world: Mat4, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };

        let world = match scene.get_mut(id) {
            Some(n) => {
                n.world = parent_world * n.local.matrix();
                n.world
            }
            None => parent_world,
        };

        for &child in &node.children {
            self.propagate_recursive(child, world, scene);
        }
    }

    /// Whether `id` and all of its ancestors are active.
    pub fn is_visible(&self, id: NodeId, scene: &Scene) -> bool {
        let mut current = Some(id);
        while let Some(n) = current {
            if scene.get(n).is_some_and(|node| !node.active) {
                return false;
            }
            current = self.get_parent(n);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = NodeId(1);
        let child = NodeId(2);

        graph.set_parent(child, Some(parent));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.nodes[&parent].children, vec![child]);
        assert!(!graph.roots.contains(&child));
    }

    #[test]
    fn propagate_composes_parent_transform() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = NodeId(1);
        let child = NodeId(2);

        scene.spawn(
            Node::new(parent)
                .with_position(Vec3::new(0.0, -1.0, 0.0))
                .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)),
        );
        scene.spawn(Node::new(child).with_position(Vec3::new(2.0, 0.0, 0.0)));
        graph.set_parent(child, Some(parent));

        graph.propagate(&mut scene);

        // Child offset (2,0,0) rotated a quarter turn about Y lands on -Z
        let p = scene.get(child).unwrap().world_position();
        assert!((p - Vec3::new(0.0, -1.0, -2.0)).length() < 1e-5, "p = {p:?}");
    }

    #[test]
    fn cycles_are_refused() {
        let mut graph = TransformGraph::new();
        let a = NodeId(1);
        let b = NodeId(2);
        graph.set_parent(b, Some(a));
        graph.set_parent(a, Some(b));
        assert_eq!(graph.get_parent(a), None);
        assert_eq!(graph.get_parent(b), Some(a));
    }

    #[test]
    fn inactive_parent_hides_children() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let mut group = Node::new(NodeId(1));
        group.active = false;
        scene.spawn(group);
        scene.spawn(Node::new(NodeId(2)));
        graph.set_parent(NodeId(2), Some(NodeId(1)));
        assert!(!graph.is_visible(NodeId(2), &scene));
    }

    #[test]
    fn unregistered_nodes_use_local_matrix() {
        let graph = TransformGraph::new();
        let mut scene = Scene::new();
        scene.spawn(Node::new(NodeId(9)).with_position(Vec3::new(0.0, 0.0, 5.0)));
        graph.propagate(&mut scene);
        assert_eq!(scene.get(NodeId(9)).unwrap().world_position(), Vec3::new(0.0, 0.0, 5.0));
    }
}
