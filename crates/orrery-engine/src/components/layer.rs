/// Render layer: controls draw order for meshes.
///
/// Layers are drawn back-to-front: Backdrop first, Atmosphere last.
/// Default layer is `Bodies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Backdrop = 0,
    #[default]
    Bodies = 1,
    Atmosphere = 2,
}

impl RenderLayer {
    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_bodies() {
        assert_eq!(RenderLayer::default(), RenderLayer::Bodies);
    }

    #[test]
    fn ordering_is_back_to_front() {
        assert!(RenderLayer::Backdrop < RenderLayer::Bodies);
        assert!(RenderLayer::Bodies < RenderLayer::Atmosphere);
    }
}
