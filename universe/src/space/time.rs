// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! The time dimension and its clocks
//!
//! [`Time`] is the only thing in a standard universe that changes the delta:
//! whatever arrives is replaced by the elapsed time its [`Clock`] reports,
//! multiplied by the configured scale. Every thing ticked after the space
//! therefore sees the real step.

use crate::space::Dimension;
use crate::thing::{Thing, TickContext};
use std::any::Any;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Source of elapsed time between ticks
pub trait Clock: Send {
    /// Seconds elapsed since the previous call
    fn delta(&mut self) -> f64;
}

/// Monotonic wall clock
///
/// The first reading is 0; afterwards each reading is the time since the
/// previous one.
#[derive(Debug, Default)]
pub struct WallClock {
    last: Option<Instant>,
}

impl WallClock {
    /// Create a clock that has not been read yet
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for WallClock {
    fn delta(&mut self) -> f64 {
        let now = Instant::now();
        let delta = self
            .last
            .map_or(0.0, |last| now.duration_since(last).as_secs_f64());
        self.last = Some(now);
        delta
    }
}

/// Clock that reports the same step on every reading
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    step: f64,
}

impl FixedStep {
    /// Create a fixed-step clock
    ///
    /// # Panics
    ///
    /// Panics if `step` is non-positive, NaN, or infinite.
    pub fn new(step: f64) -> Self {
        assert!(step > 0.0 && step.is_finite(), "Timestep must be positive and finite");
        FixedStep { step }
    }

    /// The constant step
    pub fn step(&self) -> f64 {
        self.step
    }
}

impl Clock for FixedStep {
    fn delta(&mut self) -> f64 {
        self.step
    }
}

/// Clock advanced by hand
///
/// Clones share the same pending time, so a test or a replay driver can keep
/// one handle while the universe owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: Arc<Mutex<f64>>,
}

impl ManualClock {
    /// Create a clock with no pending time
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `seconds` to the time reported by the next reading
    pub fn advance(&self, seconds: f64) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        *pending += seconds;
    }
}

impl Clock for ManualClock {
    fn delta(&mut self) -> f64 {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }
}

/// The time dimension of a space
pub struct Time {
    clock: Box<dyn Clock>,
    scale: f64,
    elapsed: f64,
}

impl Time {
    /// Axis name of the time dimension
    pub const NAME: &'static str = "time";

    /// Create a time dimension driven by `clock`
    pub fn new(clock: impl Clock + 'static) -> Self {
        Time {
            clock: Box::new(clock),
            scale: 1.0,
            elapsed: 0.0,
        }
    }

    /// Time measured by a [`WallClock`]
    pub fn wall_clock() -> Self {
        Self::new(WallClock::new())
    }

    /// Time advancing by `step` every tick
    ///
    /// # Panics
    ///
    /// Panics if `step` is non-positive, NaN, or infinite.
    pub fn fixed(step: f64) -> Self {
        Self::new(FixedStep::new(step))
    }

    /// Time driven by a shared [`ManualClock`]
    pub fn manual(clock: &ManualClock) -> Self {
        Self::new(clock.clone())
    }

    /// Multiply every measured delta by `scale`
    ///
    /// # Panics
    ///
    /// Panics if `scale` is negative or not finite.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.set_scale(scale);
        self
    }

    /// Change the scale factor of a running time dimension
    ///
    /// # Panics
    ///
    /// Panics if `scale` is negative or not finite.
    pub fn set_scale(&mut self, scale: f64) {
        assert!(
            scale >= 0.0 && scale.is_finite(),
            "Time scale must be non-negative and finite"
        );
        self.scale = scale;
    }

    /// Current scale factor
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Total simulated time so far
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Time")
            .field("scale", &self.scale)
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

impl Thing for Time {
    fn happen(&mut self, _delta: f64, ctx: &mut TickContext<'_>) -> f64 {
        let delta = self.clock.delta() * self.scale;
        self.elapsed += delta;
        log::trace!("tick {}: time advanced by {}", ctx.tick(), delta);
        delta
    }

    fn label(&self) -> &str {
        Self::NAME
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Dimension for Time {
    fn name(&self) -> &str {
        Self::NAME
    }
}
