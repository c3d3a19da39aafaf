use std::f32::consts::FRAC_PI_2;

use orrery_engine::*;

use crate::bodies::CarouselConfig;

// ── Scene event kinds to the host ───────────────────────────────────

/// An accepted wheel advance. a = new state, b = direction (−1 up, +1 down).
pub const EVENT_ADVANCE: u32 = 1;
/// The OrbitGroup finished turning to its next resting angle. a = state.
pub const EVENT_TRANSITION_DONE: u32 = 2;

/// Spin every body about its own Y axis: `rotation.y = elapsed * rate`.
///
/// Absolute in time, so the result does not depend on frame pacing.
pub fn register_spin(ctx: &mut EngineContext, bodies: Vec<NodeId>, rate: f32) {
    ctx.scheduler.register_frame_callback(move |scene, elapsed| {
        for &id in &bodies {
            if let Some(node) = scene.get_mut(id) {
                node.local.rotation.y = elapsed * rate;
            }
        }
    });
}

/// Starts the eased transition that follows each accepted advance.
#[derive(Debug, Clone)]
pub struct TransitionDriver {
    group: NodeId,
    easing: Easing,
    duration: f32,
    heading_step: f32,
}

impl TransitionDriver {
    pub fn new(group: NodeId, config: &CarouselConfig) -> Self {
        let easing = Easing::from_name(&config.transition_easing).unwrap_or_else(|| {
            log::warn!("unknown easing '{}', using power2.inOut", config.transition_easing);
            Easing::power(2, EaseMode::InOut)
        });
        Self {
            group,
            easing,
            duration: config.transition_duration,
            heading_step: config.heading_step_percent,
        }
    }

    /// Fire the tweens for one advance. Returns how many were created.
    ///
    /// Headings slide up one step and the OrbitGroup turns a quarter
    /// revolution. On wrap to state 0 the headings are also tweened back to
    /// 0; that tween is created last so it decides their final value.
    pub fn start(&self, ctx: &mut EngineContext, advance: Advance) -> usize {
        let mut created = ctx
            .tweens
            .add_for_headings(&ctx.headings, TweenValue::By(-self.heading_step), self.duration, self.easing)
            .len();

        ctx.tweens.add(
            Tween::by(TweenProperty::RotationY(self.group), -FRAC_PI_2, self.duration, self.easing)
                .with_on_complete(EVENT_TRANSITION_DONE),
        );
        created += 1;

        if advance.wrapped() {
            created += ctx
                .tweens
                .add_for_headings(&ctx.headings, TweenValue::To(0.0), self.duration, self.easing)
                .len();
        }

        ctx.emit_event(SceneEvent::new(
            EVENT_ADVANCE,
            advance.state as f32,
            advance.direction.as_f32(),
            0.0,
        ));
        log::debug!("advance to state {} ({:?}), {} tweens", advance.state, advance.direction, created);
        created
    }
}
