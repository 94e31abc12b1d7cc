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
//! The thing tree
//!
//! Everything that takes part in a simulation step is a [`Thing`]. A thing
//! receives the current delta, may transform it, and hands the result on to
//! the next sibling. [`Concreta`] is the composite that owns children and
//! threads the delta through them.
//!
//! Things do not keep references to their parents. The owning universe
//! passes itself down explicitly as a [`TickContext`].

mod concreta;
mod context;
mod id;

use std::any::Any;

pub use concreta::Concreta;
pub use context::TickContext;
pub use id::ThingId;
pub(crate) use id::IdAllocator;

/// A node of the simulation tree
///
/// The default `happen` is the identity: it returns `delta` unchanged.
pub trait Thing: Any + Send {
    /// Advance this thing by one step
    ///
    /// Returns the delta handed to the next sibling.
    fn happen(&mut self, delta: f64, _ctx: &mut TickContext<'_>) -> f64 {
        delta
    }

    /// Human-readable label for diagnostics
    fn label(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Allow downcasting to concrete types
    fn as_any(&self) -> &dyn Any;

    /// Allow mutable downcasting to concrete types
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
