//! Damped spring integrator
//!
//! Springs chase a target that may move at any time. Retargeting keeps the
//! current position and velocity, so an interrupted transition bends toward
//! the new target instead of restarting.

use crate::scheduler::Animated;
use serde::{Deserialize, Serialize};

/// Largest sub-step used by the integrator (seconds)
const MAX_SUBSTEP: f32 = 1.0 / 120.0;

/// Physical parameters of a spring
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    /// Bounciness used when the spring is derived from a duration.
    /// Explicit stiffness/damping take precedence over it.
    pub bounce: f32,
    /// Distance from target under which the spring may come to rest
    pub rest_delta: f32,
    /// Speed under which the spring may come to rest
    pub rest_speed: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
            ..Self::default()
        }
    }

    /// Spring used for expandable card and content sizes
    pub fn expandable() -> Self {
        Self {
            stiffness: 200.0,
            damping: 20.0,
            mass: 1.0,
            bounce: 0.2,
            ..Self::default()
        }
    }

    /// Derive stiffness and damping from a settle duration and a bounce factor.
    ///
    /// `bounce = 0` is critically damped, larger values overshoot more.
    pub fn from_duration(duration_secs: f32, bounce: f32) -> Self {
        let mass = 1.0;
        let zeta = (1.0 - bounce).clamp(0.05, 1.0);
        let omega = std::f32::consts::TAU / duration_secs.max(0.01);
        Self {
            stiffness: omega * omega * mass,
            damping: 2.0 * zeta * omega * mass,
            mass,
            bounce,
            ..Self::default()
        }
    }

    /// Ratio of damping to critical damping
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    fn acceleration(&self, displacement: f32, velocity: f32) -> f32 {
        (-self.stiffness * displacement - self.damping * velocity) / self.mass
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            bounce: 0.25,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

/// A single animated scalar
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    settled: bool,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            settled: true,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Move the target; position and velocity carry over
    pub fn set_target(&mut self, target: f32) {
        if (target - self.target).abs() <= f32::EPSILON && self.settled {
            return;
        }
        self.target = target;
        self.settled = self.at_rest();
    }

    /// Teleport to a value and stop
    pub fn jump_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.settled = true;
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Advance the spring by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.settled || dt <= 0.0 {
            return;
        }

        let substeps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            self.rk4(h);
        }

        if self.at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
            self.settled = true;
        }
    }

    fn rk4(&mut self, h: f32) {
        let cfg = self.config;
        let x = self.value - self.target;
        let v = self.velocity;

        let k1x = v;
        let k1v = cfg.acceleration(x, v);

        let k2x = v + 0.5 * h * k1v;
        let k2v = cfg.acceleration(x + 0.5 * h * k1x, k2x);

        let k3x = v + 0.5 * h * k2v;
        let k3v = cfg.acceleration(x + 0.5 * h * k2x, k3x);

        let k4x = v + h * k3v;
        let k4v = cfg.acceleration(x + h * k3x, k4x);

        self.value += h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
        self.velocity += h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
    }

    fn at_rest(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_delta
            && self.velocity.abs() < self.config.rest_speed
    }
}

impl Animated for Spring {
    fn step(&mut self, dt: f32) {
        Spring::step(self, dt);
    }

    fn is_settled(&self) -> bool {
        Spring::is_settled(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, seconds: f32) {
        let frames = (seconds * 60.0) as usize;
        for _ in 0..frames {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_new_spring_is_settled() {
        let spring = Spring::new(SpringConfig::expandable(), 10.0);
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 10.0);
    }

    #[test]
    fn test_spring_reaches_target_and_stops() {
        let mut spring = Spring::new(SpringConfig::expandable(), 260.0);
        spring.set_target(520.0);
        assert!(!spring.is_settled());

        run(&mut spring, 3.0);

        assert!(spring.is_settled());
        assert_eq!(spring.value(), 520.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn test_expandable_spring_is_underdamped() {
        let config = SpringConfig::expandable();
        let zeta = config.damping_ratio();
        assert!(zeta > 0.6 && zeta < 0.8);

        // Underdamped springs overshoot before settling
        let mut spring = Spring::new(config, 0.0);
        spring.set_target(100.0);
        let mut peak = 0.0_f32;
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
            peak = peak.max(spring.value());
        }
        assert!(peak > 100.0);
        assert!(peak < 110.0);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::expandable(), 0.0);
        spring.set_target(100.0);
        run(&mut spring, 0.1);
        let velocity = spring.velocity();
        assert!(velocity > 0.0);

        spring.set_target(0.0);
        assert_eq!(spring.velocity(), velocity);
        run(&mut spring, 3.0);
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn test_large_dt_is_substepped() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 40.0, 1.0), 0.0);
        spring.set_target(50.0);
        spring.step(0.5);
        assert!(spring.value().is_finite());
        assert!((spring.value() - 50.0).abs() < 5.0);
    }

    #[test]
    fn test_from_duration_zero_bounce_is_critical() {
        let config = SpringConfig::from_duration(0.5, 0.0);
        assert!((config.damping_ratio() - 1.0).abs() < 1e-3);

        let bouncy = SpringConfig::from_duration(0.5, 0.2);
        assert!((bouncy.damping_ratio() - 0.8).abs() < 1e-3);
    }
}
