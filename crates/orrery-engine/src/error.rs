use thiserror::Error;

use crate::api::types::TextureId;

/// Everything that can go wrong inside the engine.
///
/// None of these are fatal: the web bridge logs them and the scene keeps
/// rendering with whatever state it already has.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to parse scene manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    #[error("scene manifest lists {found} bodies, expected {expected}")]
    BodyCount { expected: usize, found: usize },

    #[error("invalid scene manifest: {0}")]
    InvalidManifest(String),

    #[error("texture {0:?} was never requested")]
    UnknownTexture(TextureId),

    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

pub type EngineResult<T> = Result<T, EngineError>;
