// extensions/easing.rs
//
// Pure easing curves for tween interpolation.
// Names follow the CSS-animation-library convention the page's designers
// write in config: "power2.inOut", "sine.out", "expo.easeInOut", "none".

use std::f32::consts::PI;

/// Shape of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// Constant velocity.
    Linear,
    /// Polynomial of degree `n + 1`: power1 is quadratic, power2 cubic, ...
    Power(u8),
    Sine,
    Expo,
}

/// Which end(s) of the animation are slowed down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseMode {
    In,
    Out,
    InOut,
}

/// Easing function: a curve applied in a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Easing {
    pub curve: Curve,
    pub mode: EaseMode,
}

impl Default for Easing {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl Easing {
    pub const LINEAR: Easing = Easing { curve: Curve::Linear, mode: EaseMode::InOut };

    pub const fn power(n: u8, mode: EaseMode) -> Self {
        Easing { curve: Curve::Power(n), mode }
    }

    /// Parse a name like `"power2.inOut"`. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("none") || name.eq_ignore_ascii_case("linear") {
            return Some(Self::LINEAR);
        }

        let (family, mode) = match name.split_once('.') {
            Some((family, mode)) => (family, mode),
            None => (name, "out"),
        };
        let mode = match mode.to_ascii_lowercase().as_str() {
            "in" | "easein" => EaseMode::In,
            "out" | "easeout" => EaseMode::Out,
            "inout" | "easeinout" => EaseMode::InOut,
            _ => return None,
        };
        let curve = match family.to_ascii_lowercase().as_str() {
            "power0" => Curve::Linear,
            "power1" | "quad" => Curve::Power(1),
            "power2" | "cubic" => Curve::Power(2),
            "power3" | "quart" => Curve::Power(3),
            "power4" | "quint" => Curve::Power(4),
            "sine" => Curve::Sine,
            "expo" => Curve::Expo,
            _ => return None,
        };
        Some(Easing { curve, mode })
    }

    /// Apply the easing to normalized time `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self.mode {
            EaseMode::In => ease_in(self.curve, t),
            EaseMode::Out => 1.0 - ease_in(self.curve, 1.0 - t),
            EaseMode::InOut => {
                if t < 0.5 {
                    ease_in(self.curve, 2.0 * t) / 2.0
                } else {
                    1.0 - ease_in(self.curve, 2.0 - 2.0 * t) / 2.0
                }
            }
        }
    }
}

/// The "in" half of every curve; the other modes are derived from it.
#[inline]
fn ease_in(curve: Curve, t: f32) -> f32 {
    match curve {
        Curve::Linear => t,
        Curve::Power(n) => t.powi(n as i32 + 1),
        Curve::Sine => 1.0 - (t * PI / 2.0).cos(),
        Curve::Expo => {
            if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_CURVES: [Curve; 4] = [Curve::Linear, Curve::Power(2), Curve::Sine, Curve::Expo];
    const ALL_MODES: [EaseMode; 3] = [EaseMode::In, EaseMode::Out, EaseMode::InOut];

    #[test]
    fn every_curve_hits_both_endpoints() {
        for curve in ALL_CURVES {
            for mode in ALL_MODES {
                let e = Easing { curve, mode };
                assert!(e.apply(0.0).abs() < 1e-3, "{e:?} at 0");
                assert!((e.apply(1.0) - 1.0).abs() < 1e-3, "{e:?} at 1");
            }
        }
    }

    #[test]
    fn power2_in_out_is_cubic_and_symmetric() {
        let e = Easing::from_name("power2.inOut").unwrap();
        assert_eq!(e, Easing::power(2, EaseMode::InOut));
        assert!((e.apply(0.25) - 0.0625).abs() < 1e-6);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-6);
        assert!((e.apply(0.25) + e.apply(0.75) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn legacy_names_parse() {
        assert_eq!(
            Easing::from_name("expo.easeInOut"),
            Some(Easing { curve: Curve::Expo, mode: EaseMode::InOut })
        );
        assert_eq!(Easing::from_name("none"), Some(Easing::LINEAR));
        assert_eq!(Easing::from_name("sine"), Some(Easing { curve: Curve::Sine, mode: EaseMode::Out }));
        assert!(Easing::from_name("wobble.in").is_none());
    }

    #[test]
    fn out_mode_starts_fast() {
        let mid = Easing::power(1, EaseMode::Out).apply(0.5);
        assert!(mid > 0.5, "power1.out at 0.5 should be > 0.5, got {}", mid);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::LINEAR);
        assert!((result - 150.0).abs() < 0.001);
    }
}
