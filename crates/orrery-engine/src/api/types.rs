use bytemuck::{Pod, Zeroable};

/// Unique identifier for a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Handle to a texture requested from the host page.
/// The numeric value is what the host reports back on load completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TextureId(pub u32);

/// A scene event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32, b: f32, c: f32) -> Self {
        Self { kind: kind as f32, a, b, c }
    }

    /// Event carrying only a kind, e.g. a tween completion.
    pub fn signal(kind: u32) -> Self {
        Self::new(kind, 0.0, 0.0, 0.0)
    }
}
