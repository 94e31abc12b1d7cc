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
//! Per-tick context threaded through `happen`
//!
//! Rather than every thing walking up to its owning universe, the universe
//! hands each child a [`TickContext`] describing the current step.

use crate::body::Body;
use crate::vector::VectorSpace;

/// State visible to a thing while it happens
///
/// Laws receive mutable access to every body of the universe. Things that run
/// outside a universe, or below a body, see no bodies.
pub struct TickContext<'a> {
    space: &'a VectorSpace,
    bodies: &'a mut [Body],
    tick: u64,
}

impl<'a> TickContext<'a> {
    /// Create a context over the given bodies
    pub fn new(space: &'a VectorSpace, bodies: &'a mut [Body], tick: u64) -> Self {
        TickContext { space, bodies, tick }
    }

    /// Create a context with no bodies
    pub fn detached(space: &'a VectorSpace) -> Self {
        TickContext {
            space,
            bodies: &mut [],
            tick: 0,
        }
    }

    /// Set the tick number reported by this context
    pub fn at_tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// The vector space of the owning universe
    pub fn space(&self) -> &'a VectorSpace {
        self.space
    }

    /// Bodies of the owning universe
    pub fn bodies(&self) -> &[Body] {
        &*self.bodies
    }

    /// Mutable bodies of the owning universe
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut *self.bodies
    }

    /// Number of completed ticks before this one
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_context_has_no_bodies() {
        let space = VectorSpace::new(["x"]).unwrap();
        let mut ctx = TickContext::detached(&space).at_tick(7);
        assert!(ctx.bodies().is_empty());
        assert!(ctx.bodies_mut().is_empty());
        assert_eq!(ctx.tick(), 7);
        assert_eq!(ctx.space().axes(), &["x".to_string()]);
    }

    #[test]
    fn test_context_exposes_bodies() {
        let space = VectorSpace::new(["x"]).unwrap();
        let mut bodies = vec![Body::new(&space), Body::new(&space)];
        let mut ctx = TickContext::new(&space, &mut bodies, 3);
        assert_eq!(ctx.bodies().len(), 2);
        ctx.bodies_mut()[0].set_mass(5.0);
        assert_eq!(ctx.bodies()[0].mass(), 5.0);
    }
}
