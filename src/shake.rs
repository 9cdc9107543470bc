//! Cosmetic camera shake as a cancellable per-tick task.
//!
//! The host advances the task once per display frame with its frame
//! delta; there are no real timers here, which keeps the effect
//! deterministic under test. The original position is restored on every
//! exit path, normal completion and early cancellation alike. Typical
//! wiring subscribes [`CameraShake::start`] to a slicer's slice event.

use crate::float_types::Real;
use nalgebra::Point3;
use rand::Rng;

#[derive(Debug, Clone)]
struct ShakeState {
    origin: Point3<Real>,
    elapsed: Real,
}

/// Elapsed-time accumulator that jitters a position on x/y for a fixed
/// duration, then snaps back to the captured origin.
#[derive(Debug)]
pub struct CameraShake<R: Rng> {
    duration: Real,
    intensity: Real,
    rng: R,
    state: Option<ShakeState>,
}

impl<R: Rng> CameraShake<R> {
    pub fn new(duration: Real, intensity: Real, rng: R) -> Self {
        CameraShake {
            duration,
            intensity,
            rng,
            state: None,
        }
    }

    /// Begin (or restart) shaking around `origin`.
    pub fn start(&mut self, origin: Point3<Real>) {
        self.state = Some(ShakeState {
            origin,
            elapsed: 0.0,
        });
    }

    pub fn is_active(&self) -> bool {
        self.state.is_some()
    }

    /// Advance by one frame delta. While running, returns the jittered
    /// position for this frame; on the tick that crosses the duration,
    /// deactivates and returns the exact original position. `None` when
    /// not active.
    pub fn tick(&mut self, dt: Real) -> Option<Point3<Real>> {
        let state = self.state.as_mut()?;
        state.elapsed += dt;

        if state.elapsed >= self.duration {
            let origin = state.origin;
            self.state = None;
            return Some(origin);
        }

        let jitter_x: Real = self.rng.gen_range(-1.0..1.0);
        let jitter_y: Real = self.rng.gen_range(-1.0..1.0);
        let x = state.origin.x + jitter_x * self.intensity;
        let y = state.origin.y + jitter_y * self.intensity;
        Some(Point3::new(x, y, state.origin.z))
    }

    /// Stop early, restoring and returning the original position.
    /// `None` when not active.
    pub fn cancel(&mut self) -> Option<Point3<Real>> {
        self.state.take().map(|state| state.origin)
    }
}
