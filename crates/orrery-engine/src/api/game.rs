use crate::api::types::{NodeId, SceneEvent, TextureId};
use crate::assets::manifest::SceneManifest;
use crate::assets::texture::TextureRegistry;
use crate::components::heading::HeadingTrack;
use crate::components::node::Node;
use crate::core::scene::Scene;
use crate::core::time::{Clock, FrameScheduler};
use crate::error::EngineResult;
use crate::extensions::{TransformGraph, TweenState};
use crate::input::queue::InputQueue;
use crate::renderer::camera::{CameraConfig, PerspectiveCamera, Viewport, DEFAULT_MAX_PIXEL_RATIO};

/// Configuration for the engine, provided by the showcase.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of mesh instances per frame (default: 16).
    pub max_instances: usize,
    /// Maximum number of DOM headings the host can declare (default: 16).
    pub max_headings: usize,
    /// Maximum number of scene events per frame (default: 32).
    pub max_events: usize,
    /// Cap applied to the device pixel ratio (default: 2).
    pub max_pixel_ratio: f32,
    /// Viewport size assumed until the host reports its first resize.
    pub initial_width: f32,
    pub initial_height: f32,
    pub camera: CameraConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_instances: 16,
            max_headings: 16,
            max_events: 32,
            max_pixel_ratio: DEFAULT_MAX_PIXEL_RATIO,
            initial_width: 800.0,
            initial_height: 600.0,
            camera: CameraConfig::default(),
        }
    }
}

/// The core contract every showcase must fulfill.
pub trait Showcase {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> EngineConfig {
        EngineConfig::default()
    }

    /// Build the scene graph, request textures, register frame callbacks.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Per-frame input handling. Runs before tweens and frame callbacks.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Showcase::init and Showcase::update.
pub struct EngineContext {
    pub scene: Scene,
    pub graph: TransformGraph,
    pub textures: TextureRegistry,
    pub tweens: TweenState,
    pub headings: HeadingTrack,
    pub scheduler: FrameScheduler,
    pub clock: Clock,
    pub viewport: Viewport,
    pub camera: PerspectiveCamera,
    pub events: Vec<SceneEvent>,
    /// Asset manifest supplied by the host, if any. Set before `init`.
    pub manifest: Option<SceneManifest>,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &EngineConfig) -> Self {
        let viewport = Viewport::new(config.initial_width, config.initial_height, config.max_pixel_ratio);
        let camera = PerspectiveCamera::new(config.camera, viewport.aspect());
        Self {
            scene: Scene::new(),
            graph: TransformGraph::new(),
            textures: TextureRegistry::new(),
            tweens: TweenState::new(),
            headings: HeadingTrack::with_capacity(config.max_headings),
            scheduler: FrameScheduler::new(),
            clock: Clock::new(),
            viewport,
            camera,
            events: Vec::new(),
            manifest: None,
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Generate the next unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a node to the scene and hang it under `parent` (or at the root).
    pub fn attach(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = node.id;
        self.scene.spawn(node);
        self.graph.register(id);
        if parent.is_some() {
            self.graph.set_parent(id, parent);
        }
        id
    }

    /// Emit a scene event to be forwarded to the host.
    /// Events past the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: SceneEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("scene event buffer full, dropping event kind {}", event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Apply a window resize: viewport size, capped pixel ratio, camera aspect.
    /// An invalid size leaves the previous viewport untouched.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> EngineResult<()> {
        self.viewport.resize(width, height, device_pixel_ratio)?;
        self.camera.update_aspect(&self.viewport);
        Ok(())
    }

    /// The host finished loading a texture: bind it wherever it was requested.
    pub fn texture_loaded(&mut self, id: TextureId) -> EngineResult<usize> {
        self.textures.resolve(id, &mut self.scene)
    }

    /// The host failed to load a texture. Its targets stay unmapped.
    pub fn texture_failed(&mut self, id: TextureId) -> EngineResult<()> {
        self.textures.fail(id)
    }

    /// Start a new frame. Returns seconds elapsed since start.
    pub fn begin_frame(&mut self, dt: f32) -> f32 {
        self.clock.advance(dt)
    }

    /// Advance tweens and frame callbacks, then recompute world transforms.
    /// Called after `Showcase::update` each frame.
    pub fn step_systems(&mut self) {
        let dt = self.clock.delta();
        let elapsed = self.clock.elapsed();

        self.tweens.tick(dt, &mut self.scene, &mut self.headings);
        let completed: Vec<u32> = self.tweens.drain_completed().collect();
        for kind in completed {
            self.emit_event(SceneEvent::signal(kind));
        }

        self.scheduler.run(&mut self.scene, elapsed);
        self.graph.propagate(&mut self.scene);
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
