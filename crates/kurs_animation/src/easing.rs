//! Easing curves for timed transitions
//!
//! Named curves are the CSS/motion cubic-bezier definitions, so a transition
//! configured as `"easeInOut"` here eases exactly like `ease-in-out` in a browser.

use crate::error::{AnimationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Easing curve used by keyframe-style transitions
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EasingRepr", into = "EasingRepr")]
pub enum Easing {
    Linear,
    /// cubic-bezier(0.42, 0, 1, 1)
    EaseIn,
    /// cubic-bezier(0, 0, 0.58, 1)
    EaseOut,
    /// cubic-bezier(0.42, 0, 0.58, 1)
    #[default]
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Build a custom curve, rejecting control points with x outside [0, 1]
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(AnimationError::InvalidBezier { x1, y1, x2, y2 });
        }
        Ok(Easing::CubicBezier(x1, y1, x2, y2))
    }

    /// Control points of the curve (linear is the diagonal)
    pub fn control_points(&self) -> [f32; 4] {
        match *self {
            Easing::Linear => [0.0, 0.0, 1.0, 1.0],
            Easing::EaseIn => [0.42, 0.0, 1.0, 1.0],
            Easing::EaseOut => [0.0, 0.0, 0.58, 1.0],
            Easing::EaseInOut => [0.42, 0.0, 0.58, 1.0],
            Easing::CubicBezier(x1, y1, x2, y2) => [x1, y1, x2, y2],
        }
    }

    /// Map linear progress (0.0 to 1.0) onto the curve
    pub fn apply(&self, t: f32) -> f32 {
        if let Easing::Linear = self {
            return t.clamp(0.0, 1.0);
        }
        let [x1, y1, x2, y2] = self.control_points();
        solve_bezier(t, x1, y1, x2, y2)
    }

    fn name(&self) -> Option<&'static str> {
        match self {
            Easing::Linear => Some("linear"),
            Easing::EaseIn => Some("easeIn"),
            Easing::EaseOut => Some("easeOut"),
            Easing::EaseInOut => Some("easeInOut"),
            Easing::CubicBezier(..) => None,
        }
    }
}

impl FromStr for Easing {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Easing::Linear),
            "easeIn" | "ease-in" => Ok(Easing::EaseIn),
            "easeOut" | "ease-out" => Ok(Easing::EaseOut),
            "easeInOut" | "ease-in-out" => Ok(Easing::EaseInOut),
            other => Err(AnimationError::UnknownEasing(other.to_string())),
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => {
                let [x1, y1, x2, y2] = self.control_points();
                write!(f, "cubic-bezier({x1}, {y1}, {x2}, {y2})")
            }
        }
    }
}

/// Config representation: either a curve name or four control points
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum EasingRepr {
    Named(String),
    Curve([f32; 4]),
}

impl TryFrom<EasingRepr> for Easing {
    type Error = AnimationError;

    fn try_from(repr: EasingRepr) -> Result<Self> {
        match repr {
            EasingRepr::Named(name) => name.parse(),
            EasingRepr::Curve([x1, y1, x2, y2]) => Easing::cubic_bezier(x1, y1, x2, y2),
        }
    }
}

impl From<Easing> for EasingRepr {
    fn from(easing: Easing) -> Self {
        match easing.name() {
            Some(name) => EasingRepr::Named(name.to_string()),
            None => EasingRepr::Curve(easing.control_points()),
        }
    }
}

/// Find the curve parameter whose x equals `t`, then return its y.
///
/// Newton iterations first; bisection when the slope flattens out.
fn solve_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);
    const EPS: f64 = 1e-7;

    let mut u = target;
    for _ in 0..8 {
        let dx = axis(u, x1, x2) - target;
        if dx.abs() < EPS {
            return axis(u, y1, y2) as f32;
        }
        let slope = axis_slope(u, x1, x2);
        if slope.abs() < EPS {
            break;
        }
        u -= dx / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    u = target;
    for _ in 0..32 {
        let x = axis(u, x1, x2);
        if (x - target).abs() < EPS {
            break;
        }
        if x < target {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }

    axis(u, y1, y2) as f32
}

/// One axis of a cubic bezier anchored at 0 and 1
#[inline]
fn axis(u: f64, p1: f64, p2: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * u + b) * u + c) * u
}

#[inline]
fn axis_slope(u: f64, p1: f64, p2: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * u + 2.0 * b) * u + c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_exact() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_is_symmetric() {
        let mid = Easing::EaseInOut.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-4);

        let a = Easing::EaseInOut.apply(0.25);
        let b = Easing::EaseInOut.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_ease_in_starts_slow() {
        assert!(Easing::EaseIn.apply(0.2) < 0.2);
        assert!(Easing::EaseOut.apply(0.2) > 0.2);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("easeInOut".parse::<Easing>(), Ok(Easing::EaseInOut));
        assert_eq!("ease-out".parse::<Easing>(), Ok(Easing::EaseOut));
        assert!(matches!(
            "bouncy".parse::<Easing>(),
            Err(AnimationError::UnknownEasing(_))
        ));
    }

    #[test]
    fn test_invalid_bezier_rejected() {
        assert!(Easing::cubic_bezier(1.5, 0.0, 0.5, 1.0).is_err());
        assert!(Easing::cubic_bezier(0.25, -0.5, 0.75, 1.5).is_ok());
    }

    #[test]
    fn test_deserialize_name_or_curve() {
        #[derive(Deserialize)]
        struct Cfg {
            ease: Easing,
        }

        let named: Cfg = toml::from_str(r#"ease = "easeOut""#).unwrap();
        assert_eq!(named.ease, Easing::EaseOut);

        let curve: Cfg = toml::from_str("ease = [0.4, 0.0, 0.2, 1.0]").unwrap();
        assert_eq!(curve.ease, Easing::CubicBezier(0.4, 0.0, 0.2, 1.0));

        assert!(toml::from_str::<Cfg>(r#"ease = "wobble""#).is_err());
    }
}
