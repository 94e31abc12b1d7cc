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
//! Spaces: the coordinate system of a universe
//!
//! A [`Space`] is a composite of [`Dimension`]s. Its physical dimensions, in
//! declaration order, become the axes of the universe's [`VectorSpace`].
//! It usually also holds exactly one [`Time`], which supplies the delta for
//! every tick.
//!
//! # Examples
//!
//! ```
//! use universe::space::{Space, Time};
//!
//! let space = Space::euclidean(&["x", "y", "z"], Time::fixed(1.0)).unwrap();
//! assert_eq!(space.vector_space().axes().len(), 3);
//! assert!(space.time().is_some());
//! ```

mod dimension;
mod time;

pub use dimension::{AbstractDimension, Dimension, PhysicalDimension};
pub use time::{Clock, FixedStep, ManualClock, Time, WallClock};

use crate::error::{Result, UniverseError};
use crate::thing::{Concreta, Thing, ThingId, TickContext};
use crate::vector::VectorSpace;
use std::any::Any;

/// Composite of dimensions
#[derive(Default)]
pub struct Space {
    dimensions: Concreta<dyn Dimension>,
}

impl Space {
    /// Create a space with no dimensions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a space with the given spatial axes followed by `time`
    pub fn euclidean(axes: &[&str], time: Time) -> Result<Self> {
        let mut space = Space::new();
        for axis in axes {
            space.add_dimension(PhysicalDimension::new(*axis))?;
        }
        space.add_dimension(time)?;
        Ok(space)
    }

    /// Builder-style [`add_dimension`](Space::add_dimension)
    pub fn with_dimension(mut self, dimension: impl Dimension) -> Result<Self> {
        self.add_dimension(dimension)?;
        Ok(self)
    }

    /// Append a dimension
    ///
    /// # Errors
    ///
    /// - [`UniverseError::DuplicateAxis`] if a dimension with the same name exists
    /// - [`UniverseError::DuplicateTime`] if a second [`Time`] is added
    pub fn add_dimension(&mut self, dimension: impl Dimension) -> Result<ThingId> {
        if dimension.as_any().is::<Time>() && self.time().is_some() {
            return Err(UniverseError::DuplicateTime);
        }
        if self.dimensions.iter().any(|d| d.name() == dimension.name()) {
            return Err(UniverseError::DuplicateAxis(dimension.name().to_string()));
        }
        let boxed: Box<dyn Dimension> = Box::new(dimension);
        Ok(self.dimensions.add_boxed(boxed))
    }

    /// Remove a dimension; absent ids are ignored
    pub fn remove_dimension(&mut self, id: ThingId) -> Option<Box<dyn Dimension>> {
        self.dimensions.remove(id)
    }

    /// All dimensions in declaration order
    pub fn dimensions(&self) -> impl Iterator<Item = &dyn Dimension> + '_ {
        self.dimensions.iter()
    }

    /// Dimensions that make up position and velocity vectors
    pub fn physical_dimensions(&self) -> impl Iterator<Item = &dyn Dimension> + '_ {
        self.dimensions().filter(|d| d.is_physical())
    }

    /// Every other dimension, including time
    pub fn non_physical_dimensions(&self) -> impl Iterator<Item = &dyn Dimension> + '_ {
        self.dimensions().filter(|d| !d.is_physical())
    }

    /// The time dimension, if declared
    pub fn time(&self) -> Option<&Time> {
        self.dimensions().find_map(|d| d.as_any().downcast_ref::<Time>())
    }

    /// Mutable access to the time dimension, if declared
    pub fn time_mut(&mut self) -> Option<&mut Time> {
        let id = self.dimensions.ids().find(|&id| {
            self.dimensions
                .get(id)
                .map_or(false, |d| d.as_any().is::<Time>())
        })?;
        self.dimensions.get_mut(id)?.as_any_mut().downcast_mut::<Time>()
    }

    /// Number of dimensions
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Whether the space declares no dimensions
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// A fresh vector space over the physical dimension names
    pub fn vector_space(&self) -> VectorSpace {
        // Names are unique, so this cannot fail.
        VectorSpace::new(self.physical_dimensions().map(|d| d.name().to_string()))
            .unwrap_or_else(|_| VectorSpace::empty())
    }
}

impl Thing for Space {
    fn happen(&mut self, delta: f64, ctx: &mut TickContext<'_>) -> f64 {
        self.dimensions.happen_children(delta, ctx)
    }

    fn label(&self) -> &str {
        "space"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
