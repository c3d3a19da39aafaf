use bytemuck::{Pod, Zeroable};

/// Per-mesh render data read by the host renderer.
/// Must match the host protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct MeshInstance {
    /// Column-major world matrix.
    pub model: [f32; 16],
    /// Sphere radius in world units.
    pub radius: f32,
    /// Tessellation (width and height segments).
    pub segments: f32,
    /// Texture id, or -1 while the map is not loaded (renders blank).
    pub texture: f32,
    pub opacity: f32,
    /// 0 = normal, 1 = additive.
    pub blend: f32,
    /// 0 = front, 1 = back, 2 = double.
    pub side: f32,
    /// 0 = basic (unlit), 1 = standard (lit).
    pub material: f32,
    /// Render layer id.
    pub layer: f32,
}

impl MeshInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_TEXTURE: f32 = -1.0;
}

/// Render buffer containing all mesh instances and metadata.
pub struct RenderBuffer {
    /// Normal-blended instances first, then additive ones after `additive_split`.
    pub instances: Vec<MeshInstance>,
    /// Index of the first additive instance.
    pub additive_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            additive_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.additive_split = 0;
    }

    pub fn push(&mut self, instance: MeshInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
