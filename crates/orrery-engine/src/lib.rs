pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Showcase, EngineConfig, EngineContext};
pub use api::types::{NodeId, TextureId, SceneEvent};
pub use error::{EngineError, EngineResult};
pub use components::node::{Node, LocalTransform};
pub use components::heading::HeadingTrack;
pub use components::layer::RenderLayer;
pub use components::material::{Material, MaterialKind, BlendMode, Side};
pub use components::mesh::{MeshComponent, Geometry};
pub use core::scene::Scene;
pub use core::time::{Clock, FrameScheduler, FrameCallback};
pub use renderer::instance::{MeshInstance, RenderBuffer};
pub use renderer::camera::{PerspectiveCamera, CameraConfig, CameraUniform, Viewport};
pub use input::queue::{InputEvent, InputQueue};
pub use input::throttle::{ThrottleGate, StepCycle, WheelThrottle, Advance, ScrollDirection};
pub use assets::manifest::{SceneManifest, BodyDescriptor};
pub use assets::texture::{
    TextureRegistry, TextureOptions, TextureRequest, TextureStatus, BindTarget,
    ColorSpace, Wrapping, Mapping,
};
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_render_buffer;

// Extensions: decoupled optional systems
pub use extensions::{
    Easing, Curve, EaseMode, lerp, ease,
    TransformGraph,
    TweenState, Tween, TweenId, TweenProperty, TweenValue,
};
