use crate::components::layer::RenderLayer;
use crate::components::material::Material;

/// Geometry primitive. The host tessellates it; Rust only carries the parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Geometry {
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Geometry::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
        }
    }

    /// Bounding radius of the primitive.
    pub fn radius(&self) -> f32 {
        match *self {
            Geometry::Sphere { radius, .. } => radius,
        }
    }

    pub fn segments(&self) -> (u32, u32) {
        match *self {
            Geometry::Sphere {
                width_segments,
                height_segments,
                ..
            } => (width_segments, height_segments),
        }
    }
}

/// Renderable mesh attached to a scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshComponent {
    pub geometry: Geometry,
    pub material: Material,
    pub layer: RenderLayer,
}

impl MeshComponent {
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            layer: RenderLayer::default(),
        }
    }

    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }
}
