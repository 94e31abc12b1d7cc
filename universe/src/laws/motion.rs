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
//! Motion: positions follow velocities
//!
//! Explicit (forward) Euler integration of position:
//!
//! **x(t + dt) = x(t) + v(t) · dt**
//!
//! Velocity and acceleration are left untouched.

use crate::laws::Law;
use crate::thing::{Thing, TickContext};
use std::any::Any;

/// Moves every body along its velocity
#[derive(Debug, Default, Clone, Copy)]
pub struct Motion;

impl Motion {
    /// Create the law
    pub fn new() -> Self {
        Motion
    }
}

impl Thing for Motion {
    fn happen(&mut self, delta: f64, ctx: &mut TickContext<'_>) -> f64 {
        let axes = ctx.space().dimension();
        for body in ctx.bodies_mut() {
            let velocity = body.velocity().clone();
            let position = body.position_mut().components_mut();
            for (axis, p) in position.iter_mut().enumerate().take(axes) {
                *p += velocity[axis] * delta;
            }
        }
        delta
    }

    fn label(&self) -> &str {
        "motion"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Law for Motion {
    fn name(&self) -> &str {
        "motion"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }
}
