/// Planet Carousel: four textured planets on a tilted ring inside a starfield.
///
/// Each accepted scroll tick turns the ring a quarter revolution and slides the
/// page headings up by one; the fourth tick wraps back to the start.

use orrery_engine::*;

use crate::bodies::CarouselConfig;
use crate::builder::{self, CarouselNodes};
use crate::driver::{self, TransitionDriver};

pub struct PlanetCarousel {
    config: CarouselConfig,
    throttle: WheelThrottle,
    nodes: Option<CarouselNodes>,
    driver: Option<TransitionDriver>,
}

impl PlanetCarousel {
    pub fn new() -> Self {
        Self::with_config(CarouselConfig::default())
    }

    pub fn with_config(config: CarouselConfig) -> Self {
        let throttle = WheelThrottle::new(config.cooldown_ms, config.states);
        Self {
            config,
            throttle,
            nodes: None,
            driver: None,
        }
    }

    /// Current scroll state in `0..states`.
    pub fn state(&self) -> u8 {
        self.throttle.state()
    }

    pub fn nodes(&self) -> Option<&CarouselNodes> {
        self.nodes.as_ref()
    }
}

impl Default for PlanetCarousel {
    fn default() -> Self {
        Self::new()
    }
}

impl Showcase for PlanetCarousel {
    fn config(&self) -> EngineConfig {
        EngineConfig {
            max_instances: 16,
            max_headings: 8,
            ..EngineConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let manifest = builder::resolve_manifest(ctx.manifest.take());
        let nodes = match builder::build_scene(ctx, &manifest, &self.config) {
            Ok(nodes) => nodes,
            Err(e) => {
                log::error!("failed to build carousel: {}", e);
                return;
            }
        };

        driver::register_spin(ctx, nodes.bodies.clone(), self.config.spin_rate);
        self.driver = Some(TransitionDriver::new(nodes.group, &self.config));
        ctx.manifest = Some(manifest);
        self.nodes = Some(nodes);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            let InputEvent::Wheel { delta_y, timestamp_ms } = *event else {
                continue;
            };
            // Rejected wheel ticks are dropped, never queued.
            let Some(advance) = self.throttle.on_wheel(delta_y, timestamp_ms) else {
                continue;
            };
            if let Some(driver) = &self.driver {
                driver.start(ctx, advance);
            }
        }
    }
}
