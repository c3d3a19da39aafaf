use crate::api::types::TextureId;

/// Shading model the host renderer should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaterialKind {
    /// Unlit, texture/colour only.
    Basic,
    /// Physically based, lit by the scene environment.
    #[default]
    Standard,
}

/// Blend mode for mesh rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending (src-alpha, one-minus-src-alpha).
    #[default]
    Normal,
    /// Additive blending: bright texels brighten what is behind them.
    Additive,
}

/// Which faces of the geometry are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    /// Interior faces only (used for skyboxes and backdrops).
    Back,
    Double,
}

/// Surface description for a mesh.
///
/// `map` stays `None` until the texture registry reports the texture as
/// loaded, so a fresh material renders blank.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub kind: MaterialKind,
    pub map: Option<TextureId>,
    /// Whether `opacity` takes part in blending at all.
    pub transparent: bool,
    pub opacity: f32,
    pub blend: BlendMode,
    pub side: Side,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Standard,
            map: None,
            transparent: false,
            opacity: 1.0,
            blend: BlendMode::Normal,
            side: Side::Front,
        }
    }
}

impl Material {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn basic() -> Self {
        Self {
            kind: MaterialKind::Basic,
            ..Self::default()
        }
    }

    /// Mark the material transparent with the given opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Opacity the renderer should actually use.
    pub fn effective_opacity(&self) -> f32 {
        if self.transparent {
            self.opacity
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_material_is_blank_and_opaque() {
        let m = Material::standard();
        assert!(m.map.is_none());
        assert_eq!(m.effective_opacity(), 1.0);
    }

    #[test]
    fn opacity_only_applies_when_transparent() {
        let mut m = Material::basic();
        m.opacity = 0.3;
        assert_eq!(m.effective_opacity(), 1.0);

        let m = Material::basic().with_opacity(0.3);
        assert!(m.transparent);
        assert!((m.effective_opacity() - 0.3).abs() < 1e-6);
    }
}
