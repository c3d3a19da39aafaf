use orrery_engine::{
    Showcase, EngineConfig, EngineContext,
    InputEvent, InputQueue, RenderBuffer, CameraUniform,
    ProtocolLayout, SceneManifest, TextureId,
};
use orrery_engine::systems::render::build_render_buffer;

/// Generic showcase runner that wires up the engine loop.
///
/// Each concrete showcase (e.g., `planet-carousel`) creates a `thread_local!`
/// ShowcaseRunner and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct ShowcaseRunner<S: Showcase> {
    showcase: S,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    camera_uniform: CameraUniform,
    config: EngineConfig,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<S: Showcase> ShowcaseRunner<S> {
    pub fn new(showcase: S) -> Self {
        let config = showcase.config();
        let layout = ProtocolLayout::from_config(&config);
        let ctx = EngineContext::new(&config);
        let camera_uniform = ctx.camera.uniform();

        Self {
            showcase,
            ctx,
            input: InputQueue::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            camera_uniform,
            layout,
            config,
            initialized: false,
        }
    }

    /// Initialize the showcase. Call once after construction.
    ///
    /// `manifest_json` optionally overrides the showcase's built-in asset
    /// list. A manifest that fails to parse is logged and ignored.
    pub fn init(&mut self, manifest_json: Option<&str>) {
        if let Some(json) = manifest_json {
            match SceneManifest::from_json(json) {
                Ok(manifest) => self.ctx.manifest = Some(manifest),
                Err(e) => log::warn!("{}; using built-in manifest", e),
            }
        }

        self.showcase.init(&mut self.ctx);
        self.ctx.step_systems();
        self.rebuild_frame_buffers();
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: clock, resize, showcase update, tweens and frame
    /// callbacks, transform propagation, then the buffers read by the host.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.begin_frame(dt);

        for event in self.input.iter() {
            if let InputEvent::Resize { width, height, device_pixel_ratio } = *event {
                if let Err(e) = self.ctx.resize(width, height, device_pixel_ratio) {
                    log::warn!("resize ignored: {}", e);
                }
            }
        }

        self.showcase.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.ctx.step_systems();
        self.rebuild_frame_buffers();
    }

    fn rebuild_frame_buffers(&mut self) {
        build_render_buffer(&self.ctx.scene, &self.ctx.graph, &mut self.render_buffer);
        if self.render_buffer.instances.len() > self.config.max_instances {
            log::warn!(
                "{} mesh instances exceed capacity {}, truncating",
                self.render_buffer.instances.len(),
                self.config.max_instances
            );
            self.render_buffer.instances.truncate(self.config.max_instances);
            self.render_buffer.additive_split =
                self.render_buffer.additive_split.min(self.config.max_instances as u32);
        }
        self.camera_uniform = self.ctx.camera.uniform();
    }

    // ---- Host callbacks ----

    pub fn texture_loaded(&mut self, id: u32) {
        if let Err(e) = self.ctx.texture_loaded(TextureId(id)) {
            log::warn!("{}", e);
        }
    }

    pub fn texture_failed(&mut self, id: u32) {
        if let Err(e) = self.ctx.texture_failed(TextureId(id)) {
            log::warn!("{}", e);
        }
    }

    /// Declare how many DOM headings the page has.
    pub fn set_heading_count(&mut self, count: usize) {
        self.ctx.headings.set_count(count);
    }

    /// Pending texture loads as a JSON array; empties the queue.
    pub fn take_texture_requests_json(&mut self) -> String {
        let requests = self.ctx.textures.take_requests();
        match serde_json::to_string(&requests) {
            Ok(json) => json,
            Err(e) => {
                log::error!("failed to serialize texture requests: {}", e);
                String::from("[]")
            }
        }
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn showcase(&self) -> &S {
        &self.showcase
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn additive_split(&self) -> u32 {
        self.render_buffer.additive_split
    }

    pub fn camera_ptr(&self) -> *const f32 {
        &self.camera_uniform as *const CameraUniform as *const f32
    }

    pub fn headings_ptr(&self) -> *const f32 {
        self.ctx.headings.offsets_ptr()
    }

    pub fn heading_count(&self) -> u32 {
        self.ctx.headings.len() as u32
    }

    pub fn scene_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn scene_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.ctx.viewport.pixel_ratio
    }

    /// Environment texture id, or -1 while none is loaded.
    pub fn environment_texture(&self) -> i32 {
        self.ctx.scene.environment.map(|t| t.0 as i32).unwrap_or(-1)
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_headings(&self) -> u32 {
        self.layout.max_headings as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{
        BindTarget, Geometry, Material, MeshComponent, Node, TextureOptions,
    };

    #[derive(Default)]
    struct OneSphere {
        wheel_events: usize,
    }

    impl Showcase for OneSphere {
        fn init(&mut self, ctx: &mut EngineContext) {
            let id = ctx.next_id();
            let mesh = MeshComponent::new(Geometry::sphere(1.0, 16), Material::standard());
            ctx.attach(Node::new(id).with_mesh(mesh), None);
            let path = ctx
                .manifest
                .as_ref()
                .and_then(|m| m.bodies.first())
                .map(|b| b.map.clone())
                .unwrap_or_else(|| "default.jpg".to_string());
            let _ = ctx.textures.request_for(
                path,
                TextureOptions::srgb(),
                BindTarget::MaterialMap(id),
                &mut ctx.scene,
            );
        }

        fn update(&mut self, _ctx: &mut EngineContext, input: &InputQueue) {
            self.wheel_events += input
                .iter()
                .filter(|e| matches!(e, InputEvent::Wheel { .. }))
                .count();
        }
    }

    #[test]
    fn tick_before_init_is_noop() {
        let mut runner = ShowcaseRunner::new(OneSphere::default());
        runner.tick(0.016);
        assert_eq!(runner.instance_count(), 0);
        assert!(!runner.is_initialized());
    }

    #[test]
    fn init_builds_first_frame() {
        let mut runner = ShowcaseRunner::new(OneSphere::default());
        runner.init(None);
        assert_eq!(runner.instance_count(), 1);
        assert!(runner.take_texture_requests_json().contains("default.jpg"));
        assert_eq!(runner.take_texture_requests_json(), "[]");
    }

    #[test]
    fn manifest_override_is_used() {
        let mut runner = ShowcaseRunner::new(OneSphere::default());
        runner.init(Some(r#"{"bodies":[{"name":"x","map":"custom.jpg"}]}"#));
        assert!(runner.take_texture_requests_json().contains("custom.jpg"));
    }

    #[test]
    fn bad_manifest_falls_back() {
        let mut runner = ShowcaseRunner::new(OneSphere::default());
        runner.init(Some("not json"));
        assert!(runner.take_texture_requests_json().contains("default.jpg"));
    }

    #[test]
    fn input_is_drained_after_tick() {
        let mut runner = ShowcaseRunner::new(OneSphere::default());
        runner.init(None);
        runner.push_input(InputEvent::Wheel { delta_y: 10.0, timestamp_ms: 0.0 });
        runner.tick(0.016);
        runner.tick(0.016);
        assert_eq!(runner.showcase().wheel_events, 1);
    }

    #[test]
    fn resize_event_is_applied() {
        let mut runner = ShowcaseRunner::new(OneSphere::default());
        runner.init(None);
        runner.push_input(InputEvent::Resize { width: 1000.0, height: 500.0, device_pixel_ratio: 3.0 });
        runner.tick(0.016);
        assert_eq!(runner.pixel_ratio(), 2.0);
        assert!((runner.context().camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn texture_callbacks_tolerate_unknown_ids() {
        let mut runner = ShowcaseRunner::new(OneSphere::default());
        runner.init(None);
        runner.texture_loaded(42);
        runner.texture_failed(42);
        runner.texture_loaded(0);
        let node = runner.context().scene.iter().next().unwrap();
        assert!(node.mesh.as_ref().unwrap().material.map.is_some());
    }
}
