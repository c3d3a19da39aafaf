// extensions/mod.rs
//
// Optional extension modules for Orrery.
// Decoupled from core Node/Scene; scenes opt in by creating these systems.

pub mod easing;
pub mod transform;
pub mod tween;

pub use easing::{Easing, Curve, EaseMode, lerp, ease};
pub use transform::TransformGraph;
pub use tween::{TweenState, Tween, TweenId, TweenProperty, TweenValue};
