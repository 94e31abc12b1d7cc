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
//! Physical laws
//!
//! A [`Law`] is a thing that acts on every body of its universe once per
//! tick. Laws are registered as ordinary members of a universe and run in
//! insertion order, after the space has supplied the delta.
//!
//! # Built-in laws
//!
//! - [`Motion`]: explicit Euler update of positions from velocities
//! - [`Gravitation`]: pairwise Newtonian attraction with a perfectly
//!   inelastic merge of velocities for close encounters
//!
//! # Writing a law
//!
//! ```rust
//! use universe::laws::Law;
//! use universe::thing::{Thing, TickContext};
//! use std::any::Any;
//!
//! /// Linear drag proportional to velocity
//! struct Drag {
//!     coefficient: f64,
//! }
//!
//! impl Thing for Drag {
//!     fn happen(&mut self, delta: f64, ctx: &mut TickContext<'_>) -> f64 {
//!         let factor = 1.0 - self.coefficient * delta;
//!         for body in ctx.bodies_mut() {
//!             let slowed = body.velocity().multiply_scalar(factor);
//!             body.velocity_mut().copy_from(&slowed);
//!         }
//!         delta
//!     }
//!     fn as_any(&self) -> &dyn Any { self }
//!     fn as_any_mut(&mut self) -> &mut dyn Any { self }
//! }
//!
//! impl Law for Drag {
//!     fn name(&self) -> &str { "drag" }
//!     fn version(&self) -> &str { "1.0.0" }
//! }
//! ```
//!
//! # Version compatibility
//!
//! Laws report the law API version they were written against. The universe
//! refuses laws whose API version is incompatible with [`LAW_API_VERSION`]:
//! major versions must match; for `0.x` the minor versions must match too,
//! and from `1.0` on the law's minor version may not exceed the kernel's.

pub mod gravitation;
pub mod motion;

pub use gravitation::{
    Gravitation, GravitationConfig, DEFAULT_COLLISION_DISTANCE, GRAVITATIONAL_CONSTANT,
};
pub use motion::Motion;

use crate::thing::Thing;
use semver::Version;

/// Version of the law API
///
/// Format: MAJOR.MINOR.PATCH following semantic versioning.
pub const LAW_API_VERSION: &str = "0.1.0";

/// A rule applied to every body of a universe on each tick
pub trait Law: Thing {
    /// Name of this law
    fn name(&self) -> &str;

    /// Version of this law
    ///
    /// Should follow semantic versioning (MAJOR.MINOR.PATCH).
    fn version(&self) -> &str;

    /// Law API version this law was built against
    fn api_version(&self) -> &str {
        LAW_API_VERSION
    }
}

/// Check whether a law built against `law_version` runs on `kernel_version`
pub fn is_version_compatible(law_version: &str, kernel_version: &str) -> bool {
    let (law, kernel) = match (Version::parse(law_version), Version::parse(kernel_version)) {
        (Ok(law), Ok(kernel)) => (law, kernel),
        _ => return false,
    };

    if law.major != kernel.major {
        return false;
    }

    if law.major != 0 {
        law.minor <= kernel.minor
    } else {
        // 0.x minors are breaking
        law.minor == kernel.minor
    }
}
