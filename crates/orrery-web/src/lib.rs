pub mod runner;

pub use runner::ShowcaseRunner;
pub use js_sys;

/// Current window size and device pixel ratio, if running in a browser window.
pub fn window_metrics() -> Option<(f32, f32, f32)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width as f32, height as f32, window.device_pixel_ratio() as f32))
}

/// Host timestamp for a wheel event, or `fallback()` when it is missing or
/// not a finite number.
pub fn wheel_timestamp(now_ms: Option<f64>, fallback: impl FnOnce() -> f64) -> f64 {
    match now_ms {
        Some(t) if t.is_finite() => t,
        _ => fallback(),
    }
}

/// Generate all `#[wasm_bindgen]` exports for a showcase.
///
/// Generates:
/// - `thread_local!` storage for the ShowcaseRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (showcase_init, showcase_tick, input handlers,
///   texture callbacks, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use orrery_engine::*;
///
/// mod game;
/// use game::MyShowcase;
///
/// orrery_web::export_showcase!(MyShowcase, "my-showcase");
/// ```
///
/// # Arguments
///
/// - `$showcase_type`: The struct type that implements `orrery_engine::Showcase`
/// - `$showcase_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_showcase {
    ($showcase_type:ty, $showcase_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ShowcaseRunner<$showcase_type>>> = RefCell::new(None);
        }

        /// Runs `f` against the runner. Calls made before `showcase_init` are
        /// logged and answered with `R::default()`.
        fn with_runner<R: Default>(f: impl FnOnce(&mut $crate::ShowcaseRunner<$showcase_type>) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    log::warn!("{}: not initialized, call showcase_init() first", $showcase_name);
                    R::default()
                }
            })
        }

        #[wasm_bindgen]
        pub fn showcase_init(manifest_json: Option<String>) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let showcase = <$showcase_type>::new();
            let runner = $crate::ShowcaseRunner::new(showcase);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init(manifest_json.as_deref()));
            if let Some((w, h, dpr)) = $crate::window_metrics() {
                with_runner(|r| r.push_input(InputEvent::Resize { width: w, height: h, device_pixel_ratio: dpr }));
            }
            log::info!("{}: initialized", $showcase_name);
        }

        #[wasm_bindgen]
        pub fn showcase_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        /// Wheel signal. Without a usable host timestamp the JS clock is used.
        #[wasm_bindgen]
        pub fn showcase_wheel(delta_y: f32, now_ms: Option<f64>) {
            let timestamp_ms = $crate::wheel_timestamp(now_ms, $crate::js_sys::Date::now);
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y, timestamp_ms }));
        }

        #[wasm_bindgen]
        pub fn showcase_resize(width: f32, height: f32, device_pixel_ratio: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height, device_pixel_ratio }));
        }

        /// Resize from the current browser window metrics.
        #[wasm_bindgen]
        pub fn showcase_resize_to_window() {
            if let Some((width, height, device_pixel_ratio)) = $crate::window_metrics() {
                with_runner(|r| r.push_input(InputEvent::Resize { width, height, device_pixel_ratio }));
            }
        }

        #[wasm_bindgen]
        pub fn showcase_texture_loaded(id: u32) {
            with_runner(|r| r.texture_loaded(id));
        }

        #[wasm_bindgen]
        pub fn showcase_texture_failed(id: u32) {
            with_runner(|r| r.texture_failed(id));
        }

        #[wasm_bindgen]
        pub fn showcase_take_texture_requests() -> String {
            with_runner(|r| r.take_texture_requests_json())
        }

        #[wasm_bindgen]
        pub fn showcase_set_heading_count(count: u32) {
            with_runner(|r| r.set_heading_count(count as usize));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_instances_ptr() -> *const f32 {
            with_runner(|r| r.instances_ptr() as usize) as *const f32
        }

        #[wasm_bindgen]
        pub fn get_instance_count() -> u32 {
            with_runner(|r| r.instance_count())
        }

        #[wasm_bindgen]
        pub fn get_additive_split() -> u32 {
            with_runner(|r| r.additive_split())
        }

        #[wasm_bindgen]
        pub fn get_camera_ptr() -> *const f32 {
            with_runner(|r| r.camera_ptr() as usize) as *const f32
        }

        #[wasm_bindgen]
        pub fn get_headings_ptr() -> *const f32 {
            with_runner(|r| r.headings_ptr() as usize) as *const f32
        }

        #[wasm_bindgen]
        pub fn get_heading_count() -> u32 {
            with_runner(|r| r.heading_count())
        }

        #[wasm_bindgen]
        pub fn get_scene_events_ptr() -> *const f32 {
            with_runner(|r| r.scene_events_ptr() as usize) as *const f32
        }

        #[wasm_bindgen]
        pub fn get_scene_events_len() -> u32 {
            with_runner(|r| r.scene_events_len())
        }

        #[wasm_bindgen]
        pub fn get_pixel_ratio() -> f32 {
            with_runner(|r| r.pixel_ratio())
        }

        #[wasm_bindgen]
        pub fn get_environment_texture() -> i32 {
            with_runner(|r| r.environment_texture())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_instances() -> u32 {
            with_runner(|r| r.max_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_headings() -> u32 {
            with_runner(|r| r.max_headings())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
