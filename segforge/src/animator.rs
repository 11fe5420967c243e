use std::f32::consts::PI;
use std::time::Instant;

use crate::error::{Error, Result};

pub const DEFAULT_SNAP_VELOCITY: f32 = 0.01;
pub const DEFAULT_SNAP_POSITION: f32 = 0.005;

/// Shape of a second-order response.
///
/// `frequency` is the natural frequency in Hz, `damping` below 1.0 lets the
/// output overshoot, and `response` scales how hard the output reacts to the
/// target moving (negative values anticipate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    frequency: f32,
    damping: f32,
    response: f32,
}

impl Curve {
    pub fn new(frequency: f32, damping: f32, response: f32) -> Result<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(Error::InvalidCurve { frequency });
        }

        Ok(Self {
            frequency,
            damping: damping.max(0.0),
            response,
        })
    }

    /// Caller guarantees `frequency > 0`.
    pub(crate) const fn from_parts(frequency: f32, damping: f32, response: f32) -> Self {
        Self {
            frequency,
            damping,
            response,
        }
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn response(&self) -> f32 {
        self.response
    }

    fn coefficients(&self) -> (f32, f32, f32) {
        let omega = 2.0 * PI * self.frequency;

        let k1 = self.damping / (PI * self.frequency);
        let k2 = 1.0 / (omega * omega);
        let k3 = self.response * self.damping / omega;

        (k1, k2, k3)
    }
}

/// Drives one scalar toward a moving target with spring-like motion.
///
/// `advance` must run once per frame; the timestep is the wall-clock time
/// since the previous call.
#[derive(Debug, Clone)]
pub struct SecondOrderAnimator {
    position: f32,
    velocity: f32,
    target: f32,
    prev_target: f32,
    k1: f32,
    k2: f32,
    k3: f32,
    last_update: Instant,
    snap_velocity: f32,
    snap_position: f32,
}

impl SecondOrderAnimator {
    pub fn new(position: f32, target: f32, curve: Curve) -> Self {
        let (k1, k2, k3) = curve.coefficients();

        Self {
            position,
            velocity: 0.0,
            target,
            prev_target: target,
            k1,
            k2,
            k3,
            last_update: Instant::now(),
            snap_velocity: DEFAULT_SNAP_VELOCITY,
            snap_position: DEFAULT_SNAP_POSITION,
        }
    }

    /// Keeps position, velocity and target; only the response changes.
    pub fn retune(&mut self, curve: Curve) {
        let (k1, k2, k3) = curve.coefficients();
        self.k1 = k1;
        self.k2 = k2;
        self.k3 = k3;
    }

    pub fn set_snap_thresholds(&mut self, velocity: f32, position: f32) {
        self.snap_velocity = velocity;
        self.snap_position = position;
    }

    pub fn with_snap_thresholds(mut self, velocity: f32, position: f32) -> Self {
        self.set_snap_thresholds(velocity, position);
        self
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    /// Jumps without animating. The next `advance` continues from here.
    pub fn set_position(&mut self, position: f32) {
        self.position = position;
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn is_at_rest(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    pub fn advance(&mut self) -> f32 {
        self.advance_at(Instant::now())
    }

    /// `now` earlier than the last update counts as a zero-length step.
    pub fn advance_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last_update).as_secs_f32();
        self.step(dt);
        self.last_update = now;
        self.position
    }

    /// One integration step of `dt` seconds.
    ///
    /// The target-velocity estimate is `(target - prev_target) * dt`, not a
    /// quotient. Animation timing everywhere is tuned against this product.
    pub fn step(&mut self, dt: f32) -> f32 {
        let target_velocity = (self.target - self.prev_target) * dt;
        self.prev_target = self.target;

        let k2_stable = self
            .k2
            .max(dt * dt / 2.0 + dt * self.k1 / 2.0)
            .max(dt * self.k1);

        self.position += self.velocity * dt;
        self.velocity += dt
            * ((self.target - self.position) + self.k3 * target_velocity
                - self.velocity * dt
                - self.k1 * self.velocity)
            / k2_stable;

        if self.velocity.abs() < self.snap_velocity
            && (self.position - self.target).abs() < self.snap_position
        {
            self.position = self.target;
            self.velocity = 0.0;
        }

        self.position
    }
}
