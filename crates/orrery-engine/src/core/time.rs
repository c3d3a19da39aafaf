use crate::core::scene::Scene;

/// Wall-clock style timer: total seconds since the first frame.
///
/// Frame-driven systems should read `elapsed()` rather than summing their own
/// deltas, so their output depends only on time, not on how it was sliced.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    elapsed: f64,
    last_delta: f32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame's delta. Negative deltas are ignored.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let dt = frame_dt.max(0.0);
        self.elapsed += dt as f64;
        self.last_delta = dt;
        self.elapsed()
    }

    /// Seconds since start. Accumulated in f64 so long sessions stay precise.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn delta(&self) -> f32 {
        self.last_delta
    }
}

/// A per-frame callback, invoked with the elapsed seconds since start.
pub type FrameCallback = Box<dyn FnMut(&mut Scene, f32)>;

/// Explicit replacement for a browser `requestAnimationFrame` loop:
/// callbacks are registered once and run on every frame, in order.
#[derive(Default)]
pub struct FrameScheduler {
    callbacks: Vec<FrameCallback>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_frame_callback(&mut self, callback: impl FnMut(&mut Scene, f32) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Run every registered callback for this frame.
    pub fn run(&mut self, scene: &mut Scene, elapsed: f32) {
        for callback in self.callbacks.iter_mut() {
            callback(scene, elapsed);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
