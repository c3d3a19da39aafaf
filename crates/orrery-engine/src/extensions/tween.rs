// extensions/tween.rs
//
// Tween system: fire-and-forget animated transitions of node and heading
// properties. Tweens on the same property stack: they all run, and each tick
// applies them in creation order, so the newest one decides the value.
//
// Usage:
//   let mut tweens = TweenState::new();
//   tweens.add(Tween::by(TweenProperty::RotationY(group), -FRAC_PI_2, 1.0, easing));
//   tweens.tick(dt, &mut scene, &mut headings);

use std::collections::BTreeMap;
use crate::api::types::NodeId;
use crate::components::heading::HeadingTrack;
use crate::core::scene::Scene;
use super::easing::{Easing, ease};

/// What property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenProperty {
    /// Vertical offset of heading `index`, in percent of its own height.
    HeadingOffset(usize),
    RotationY(NodeId),
}

impl TweenProperty {
    fn read(self, scene: &Scene, headings: &HeadingTrack) -> Option<f32> {
        match self {
            TweenProperty::HeadingOffset(i) => headings.get(i),
            TweenProperty::RotationY(id) => scene.get(id).map(|n| n.local.rotation.y),
        }
    }

    fn write(self, value: f32, scene: &mut Scene, headings: &mut HeadingTrack) {
        match self {
            TweenProperty::HeadingOffset(i) => {
                if let Some(offset) = headings.get_mut(i) {
                    *offset = value;
                }
            }
            TweenProperty::RotationY(id) => {
                if let Some(n) = scene.get_mut(id) {
                    n.local.rotation.y = value;
                }
            }
        }
    }
}

/// End value of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenValue {
    /// Absolute target.
    To(f32),
    /// Relative to whatever the property holds when the tween first ticks.
    By(f32),
}

/// A single tween animation.
#[derive(Debug, Clone)]
pub struct Tween {
    pub property: TweenProperty,
    pub value: TweenValue,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    pub easing: Easing,
    /// Optional event kind to report when complete.
    pub on_complete: Option<u32>,
    /// Start and end values, captured on the first tick.
    endpoints: Option<(f32, f32)>,
}

impl Tween {
    pub fn new(property: TweenProperty, value: TweenValue, duration: f32, easing: Easing) -> Self {
        Self {
            property,
            value,
            duration,
            elapsed: 0.0,
            easing,
            on_complete: None,
            endpoints: None,
        }
    }

    /// Animate to an absolute value.
    pub fn to(property: TweenProperty, target: f32, duration: f32, easing: Easing) -> Self {
        Self::new(property, TweenValue::To(target), duration, easing)
    }

    /// Animate by a relative amount.
    pub fn by(property: TweenProperty, delta: f32, duration: f32, easing: Easing) -> Self {
        Self::new(property, TweenValue::By(delta), duration, easing)
    }

    pub fn with_on_complete(mut self, event_kind: u32) -> Self {
        self.on_complete = Some(event_kind);
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn resolve_endpoints(&mut self, current: f32) -> (f32, f32) {
        *self.endpoints.get_or_insert_with(|| match self.value {
            TweenValue::To(target) => (current, target),
            TweenValue::By(delta) => (current, current + delta),
        })
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u32);

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenState {
    /// Ordered by id, which is creation order.
    tweens: BTreeMap<TweenId, Tween>,
    next_id: u32,
    /// Completion events to be polled.
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tween. Returns a handle for later control.
    pub fn add(&mut self, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, tween);
        id
    }

    /// Start the same tween on every heading in the track.
    /// Does nothing when the page has no headings.
    pub fn add_for_headings(
        &mut self,
        headings: &HeadingTrack,
        value: TweenValue,
        duration: f32,
        easing: Easing,
    ) -> Vec<TweenId> {
        (0..headings.len())
            .map(|i| self.add(Tween::new(TweenProperty::HeadingOffset(i), value, duration, easing)))
            .collect()
    }

    /// Advance all tweens and write their values.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene, headings: &mut HeadingTrack) -> usize {
        let mut completed = Vec::new();

        for (&id, tween) in self.tweens.iter_mut() {
            let Some(current) = tween.property.read(scene, headings) else {
                // Target vanished; let the tween expire quietly.
                tween.elapsed += dt;
                if tween.is_complete() {
                    completed.push(id);
                }
                continue;
            };
            // The first tick only captures the start; time runs from the next one.
            if tween.endpoints.is_some() {
                tween.elapsed += dt;
            }
            let (from, to) = tween.resolve_endpoints(current);
            let value = ease(from, to, tween.progress(), tween.easing);
            tween.property.write(value, scene, headings);

            if tween.is_complete() {
                if let Some(kind) = tween.on_complete {
                    self.completed_events.push(kind);
                }
                completed.push(id);
            }
        }

        let count = completed.len();
        for id in completed {
            self.tweens.remove(&id);
        }
        count
    }

    /// Drain completion events.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    /// Number of active tweens on `property`.
    pub fn count_on(&self, property: TweenProperty) -> usize {
        self.tweens.values().filter(|t| t.property == property).count()
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::node::Node;

    const FRAME: f32 = 1.0 / 60.0;

    fn setup() -> (Scene, HeadingTrack) {
        let mut scene = Scene::new();
        scene.spawn(Node::new(NodeId(1)));
        let mut headings = HeadingTrack::with_capacity(4);
        headings.set_count(2);
        (scene, headings)
    }

    fn rotation_y(scene: &Scene) -> f32 {
        scene.get(NodeId(1)).unwrap().local.rotation.y
    }

    #[test]
    fn first_tick_starts_without_advancing() {
        let (mut scene, mut headings) = setup();
        let mut tweens = TweenState::new();
        let id = tweens.add(Tween::by(TweenProperty::RotationY(NodeId(1)), -1.0, 1.0, Easing::LINEAR));

        tweens.tick(0.25, &mut scene, &mut headings);
        assert_eq!(rotation_y(&scene), 0.0);
        assert_eq!(tweens.tweens[&id].progress(), 0.0);

        tweens.tick(0.25, &mut scene, &mut headings);
        assert!((rotation_y(&scene) + 0.25).abs() < 1e-5);
    }

    #[test]
    fn relative_rotation_reaches_target() {
        let (mut scene, mut headings) = setup();
        let mut tweens = TweenState::new();
        tweens.add(Tween::by(TweenProperty::RotationY(NodeId(1)), -1.0, 1.0, Easing::LINEAR));

        tweens.tick(FRAME, &mut scene, &mut headings);
        tweens.tick(0.5, &mut scene, &mut headings);
        let y = rotation_y(&scene);
        assert!((y + 0.5).abs() < 1e-5, "y = {y}");

        tweens.tick(0.5, &mut scene, &mut headings);
        let y = rotation_y(&scene);
        assert!((y + 1.0).abs() < 1e-5, "y = {y}");
        assert!(tweens.is_empty());
    }

    #[test]
    fn relative_start_is_captured_on_first_tick() {
        let (mut scene, mut headings) = setup();
        let mut tweens = TweenState::new();
        tweens.add(Tween::by(TweenProperty::RotationY(NodeId(1)), 2.0, 1.0, Easing::LINEAR));
        scene.get_mut(NodeId(1)).unwrap().local.rotation.y = 10.0;

        tweens.tick(FRAME, &mut scene, &mut headings);
        tweens.tick(1.0, &mut scene, &mut headings);
        assert!((rotation_y(&scene) - 12.0).abs() < 1e-5);
    }

    #[test]
    fn newest_tween_wins_on_shared_property() {
        let (mut scene, mut headings) = setup();
        if let Some(offset) = headings.get_mut(0) {
            *offset = -300.0;
        }
        let mut tweens = TweenState::new();
        tweens.add(Tween::by(TweenProperty::HeadingOffset(0), -100.0, 1.0, Easing::LINEAR));
        tweens.add(Tween::to(TweenProperty::HeadingOffset(0), 0.0, 1.0, Easing::LINEAR));

        // Both capture -300 on the first frame
        tweens.tick(FRAME, &mut scene, &mut headings);
        tweens.tick(0.5, &mut scene, &mut headings);
        assert!((headings.get(0).unwrap() + 150.0).abs() < 1e-3);
        tweens.tick(0.5, &mut scene, &mut headings);
        assert_eq!(headings.get(0), Some(0.0));
    }

    #[test]
    fn heading_tweens_cover_every_heading() {
        let (mut scene, mut headings) = setup();
        let mut tweens = TweenState::new();
        let ids = tweens.add_for_headings(&headings, TweenValue::By(-100.0), 1.0, Easing::LINEAR);
        assert_eq!(ids.len(), 2);
        tweens.tick(FRAME, &mut scene, &mut headings);
        tweens.tick(1.0, &mut scene, &mut headings);
        assert_eq!(headings.get(0), Some(-100.0));
        assert_eq!(headings.get(1), Some(-100.0));
    }

    #[test]
    fn no_headings_means_no_tweens() {
        let headings = HeadingTrack::with_capacity(4);
        let mut tweens = TweenState::new();
        let ids = tweens.add_for_headings(&headings, TweenValue::To(0.0), 1.0, Easing::LINEAR);
        assert!(ids.is_empty());
        assert!(tweens.is_empty());
    }

    #[test]
    fn missing_target_expires_quietly() {
        let (mut scene, mut headings) = setup();
        let mut tweens = TweenState::new();
        tweens.add(Tween::to(TweenProperty::RotationY(NodeId(42)), 1.0, 0.5, Easing::LINEAR));
        assert_eq!(tweens.tick(0.5, &mut scene, &mut headings), 1);
        assert!(tweens.is_empty());
    }

    #[test]
    fn completion_event_is_reported_once() {
        let (mut scene, mut headings) = setup();
        let mut tweens = TweenState::new();
        tweens.add(Tween::to(TweenProperty::RotationY(NodeId(1)), 1.0, 0.1, Easing::LINEAR).with_on_complete(7));
        tweens.tick(FRAME, &mut scene, &mut headings);
        assert_eq!(tweens.drain_completed().count(), 0);
        tweens.tick(0.2, &mut scene, &mut headings);
        let events: Vec<u32> = tweens.drain_completed().collect();
        assert_eq!(events, vec![7]);
        assert_eq!(tweens.drain_completed().count(), 0);
    }
}
