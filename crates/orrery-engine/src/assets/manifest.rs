use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Texture manifest describing every image a scene loads.
/// Loaded from a JSON string handed over by the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    /// Orbiting bodies, in orbit order.
    pub bodies: Vec<BodyDescriptor>,
    /// Tiled image painted on the inside of the backdrop sphere.
    #[serde(default)]
    pub backdrop: Option<String>,
    /// Equirectangular HDR image used as reflection environment.
    #[serde(default)]
    pub environment: Option<String>,
}

/// Textures for one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Human-readable name (e.g., "earth"). Used as the node tag.
    pub name: String,
    /// Relative path to the surface colour map.
    pub map: String,
    /// Optional cloud layer drawn on a slightly larger shell.
    #[serde(default)]
    pub clouds: Option<String>,
}

impl BodyDescriptor {
    pub fn new(name: impl Into<String>, map: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            map: map.into(),
            clouds: None,
        }
    }

    pub fn with_clouds(mut self, clouds: impl Into<String>) -> Self {
        self.clouds = Some(clouds.into());
        self
    }
}

impl SceneManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reject manifests that do not list exactly `expected` bodies.
    pub fn expect_bodies(self, expected: usize) -> EngineResult<Self> {
        if self.bodies.len() != expected {
            return Err(EngineError::BodyCount {
                expected,
                found: self.bodies.len(),
            });
        }
        Ok(self)
    }
}
