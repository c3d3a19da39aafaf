use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::NodeId;
use crate::components::mesh::MeshComponent;

/// Transform relative to the parent node (or the world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Compose into a column-major matrix (scale, then rotate, then translate).
    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.position)
    }
}

/// A scene-graph node: a transform plus an optional mesh.
/// Nodes without a mesh are pure containers (groups).
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Inactive nodes (and their subtrees) are not rendered.
    pub active: bool,
    pub local: LocalTransform,
    /// World matrix, written by `TransformGraph::propagate`.
    pub world: Mat4,
    pub mesh: Option<MeshComponent>,
}

impl Node {
    /// Create a new node with the given ID at the origin.
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            local: LocalTransform::default(),
            world: Mat4::IDENTITY,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.local.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.local.rotation = rotation;
        self
    }

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// World-space position, valid after the last propagation.
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }
}
