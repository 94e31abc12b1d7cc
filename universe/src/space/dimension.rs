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
//! Named axes

use crate::thing::Thing;
use std::any::Any;

/// A named axis of a [`Space`](crate::space::Space)
///
/// Physical dimensions become the axes of the universe's vectors; the rest
/// (time, abstract axes) only take part in the tick.
pub trait Dimension: Thing {
    /// Axis name, unique within a space
    fn name(&self) -> &str;

    /// Whether this axis is part of position and velocity vectors
    fn is_physical(&self) -> bool {
        false
    }
}

/// A spatial axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalDimension {
    name: String,
}

impl PhysicalDimension {
    /// Create a spatial axis
    pub fn new(name: impl Into<String>) -> Self {
        PhysicalDimension { name: name.into() }
    }
}

impl Thing for PhysicalDimension {
    fn label(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Dimension for PhysicalDimension {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_physical(&self) -> bool {
        true
    }
}

/// A named axis that is not spatial, such as a colour or charge channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractDimension {
    name: String,
}

impl AbstractDimension {
    /// Create a non-spatial axis
    pub fn new(name: impl Into<String>) -> Self {
        AbstractDimension { name: name.into() }
    }
}

impl Thing for AbstractDimension {
    fn label(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Dimension for AbstractDimension {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thing::TickContext;
    use crate::vector::VectorSpace;

    #[test]
    fn test_physical_flags() {
        let x = PhysicalDimension::new("x");
        let hue = AbstractDimension::new("hue");
        assert!(x.is_physical());
        assert!(!hue.is_physical());
        assert_eq!(x.name(), "x");
        assert_eq!(hue.label(), "hue");
    }

    #[test]
    fn test_dimensions_pass_delta_through() {
        let space = VectorSpace::empty();
        let mut ctx = TickContext::detached(&space);
        assert_eq!(PhysicalDimension::new("x").happen(0.25, &mut ctx), 0.25);
        assert_eq!(AbstractDimension::new("hue").happen(0.25, &mut ctx), 0.25);
    }
}
