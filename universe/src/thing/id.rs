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
//! Thing identifiers
//!
//! Children of a [`Concreta`](crate::thing::Concreta) or a
//! [`Universe`](crate::Universe) are addressed by lightweight generational
//! handles, so a stale handle never aliases a thing added later.

use std::fmt;

/// Handle to a thing owned by a composite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThingId {
    index: u64,
    generation: u32,
}

impl ThingId {
    /// Create a new id with the given index and generation
    pub fn new(index: u64, generation: u32) -> Self {
        ThingId { index, generation }
    }

    /// Get the raw index
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Get the generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ThingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Thing({}, gen: {})", self.index, self.generation)
    }
}

/// Hands out ids and tracks which of them are still attached
#[derive(Debug, Default, Clone)]
pub(crate) struct IdAllocator {
    generations: Vec<u32>,
    alive: Vec<bool>,
    free: Vec<u64>,
}

impl IdAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Allocate an id, reusing a released slot under a new generation
    pub(crate) fn allocate(&mut self) -> ThingId {
        if let Some(index) = self.free.pop() {
            self.alive[index as usize] = true;
            return ThingId::new(index, self.generations[index as usize]);
        }

        let index = self.generations.len() as u64;
        self.generations.push(0);
        self.alive.push(true);
        ThingId::new(index, 0)
    }

    /// Release an id; returns false if it was not live
    pub(crate) fn release(&mut self, id: ThingId) -> bool {
        if !self.is_live(id) {
            return false;
        }
        let index = id.index as usize;
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.alive[index] = false;
        self.free.push(id.index);
        true
    }

    pub(crate) fn is_live(&self, id: ThingId) -> bool {
        let index = id.index as usize;
        self.alive.get(index).copied().unwrap_or(false) && self.generations[index] == id.generation
    }

    pub(crate) fn clear(&mut self) {
        for (index, alive) in self.alive.iter_mut().enumerate() {
            if *alive {
                *alive = false;
                self.generations[index] = self.generations[index].wrapping_add(1);
                self.free.push(index as u64);
            }
        }
    }
}
