pub mod camera;
pub mod instance;

pub use camera::{CameraConfig, CameraUniform, PerspectiveCamera, Viewport};
pub use instance::{MeshInstance, RenderBuffer};
