/// Planet set and layout constants for the carousel.
///
/// Four bodies sit evenly on one orbit ring; the Earth-like and Venus-like
/// bodies carry an additive cloud shell.

use orrery_engine::{BodyDescriptor, SceneManifest};

/// Body index constants.
pub const ICEWORLD: usize = 0;
pub const EARTH: usize = 1;
pub const MARS: usize = 2;
pub const VENUS: usize = 3;
pub const BODY_COUNT: usize = 4;

/// Whether body `index` carries a cloud shell.
pub fn has_clouds(index: usize) -> bool {
    index == EARTH || index == VENUS
}

/// HDRI used as the reflection environment.
pub const ENVIRONMENT_URL: &str =
    "https://dl.polyhaven.org/file/ph-assets/HDRIs/hdr/1k/moonlit_golf_1k.hdr";

/// Built-in asset list, used when the host does not supply a manifest.
pub fn default_manifest() -> SceneManifest {
    SceneManifest {
        bodies: vec![
            BodyDescriptor::new("iceworld", "./iceworld/map.jpg"),
            BodyDescriptor::new("earth", "./earth/map.jpg").with_clouds("./earth/clouds.jpg"),
            BodyDescriptor::new("mars", "./mars/map.jpg"),
            BodyDescriptor::new("venus", "./venus/map.jpg").with_clouds("./venus/venus_clouds.jpg"),
        ],
        backdrop: Some("./bg_stars.jpg".to_string()),
        environment: Some(ENVIRONMENT_URL.to_string()),
    }
}

/// Tunables for the carousel scene.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub orbit_radius: f32,
    pub body_radius: f32,
    pub segments: u32,

    /// Cloud shell radius as a multiple of the body radius.
    pub cloud_scale: f32,
    pub cloud_opacity: f32,

    pub backdrop_radius: f32,
    pub backdrop_opacity: f32,

    /// OrbitGroup tilt around X, in radians.
    pub group_tilt: f32,
    pub group_offset_y: f32,

    /// Body self-rotation in radians per second.
    pub spin_rate: f32,

    /// Minimum gap between accepted wheel events.
    pub cooldown_ms: f64,
    /// Number of scroll states before wrapping to 0.
    pub states: u8,
    /// Heading slide per advance, in percent of the heading's own height.
    pub heading_step_percent: f32,
    pub transition_duration: f32,
    pub transition_easing: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            orbit_radius: 4.5,
            body_radius: 1.3,
            segments: 64,
            cloud_scale: 1.01,
            cloud_opacity: 0.7,
            backdrop_radius: 50.0,
            backdrop_opacity: 0.3,
            group_tilt: 0.1,
            group_offset_y: -0.8,
            spin_rate: 0.05,
            cooldown_ms: 1000.0,
            states: BODY_COUNT as u8,
            heading_step_percent: 100.0,
            transition_duration: 1.0,
            transition_easing: "power2.inOut".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_has_clouds_on_earth_and_venus() {
        let manifest = default_manifest();
        assert_eq!(manifest.bodies.len(), BODY_COUNT);
        for (i, body) in manifest.bodies.iter().enumerate() {
            assert_eq!(body.clouds.is_some(), has_clouds(i), "body {}", i);
        }
        assert_eq!(manifest.bodies[ICEWORLD].map, "./iceworld/map.jpg");
        assert_eq!(manifest.bodies[MARS].map, "./mars/map.jpg");
    }

    #[test]
    fn clouds_only_on_earth_and_venus() {
        let with: Vec<usize> = (0..BODY_COUNT).filter(|&i| has_clouds(i)).collect();
        assert_eq!(with, vec![EARTH, VENUS]);
    }

    #[test]
    fn default_config_values() {
        let config = CarouselConfig::default();
        assert_eq!(config.orbit_radius, 4.5);
        assert_eq!(config.states, 4);
        assert_eq!(config.cooldown_ms, 1000.0);
    }
}
