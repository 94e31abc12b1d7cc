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
//! Composite things
//!
//! A [`Concreta`] owns an ordered list of child things. Insertion order is
//! tick order: `happen` threads the delta through every child in turn and
//! returns whatever the last child produced.

use crate::thing::id::IdAllocator;
use crate::thing::{Thing, ThingId, TickContext};
use std::any::Any;

/// Ordered collection of child things
///
/// The element type defaults to `dyn Thing`; narrower trait objects such as
/// `dyn Dimension` are used where the children share more behaviour.
///
/// # Examples
///
/// ```
/// use universe::thing::{Concreta, Thing, TickContext};
/// use universe::vector::VectorSpace;
///
/// struct Double;
/// impl Thing for Double {
///     fn happen(&mut self, delta: f64, _ctx: &mut TickContext<'_>) -> f64 {
///         delta * 2.0
///     }
///     fn as_any(&self) -> &dyn std::any::Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
/// }
///
/// let mut concreta: Concreta = Concreta::new();
/// concreta.add(Double);
/// concreta.add(Double);
///
/// let space = VectorSpace::empty();
/// assert_eq!(concreta.happen(1.5, &mut TickContext::detached(&space)), 6.0);
/// ```
pub struct Concreta<T: ?Sized + Thing = dyn Thing> {
    ids: IdAllocator,
    things: Vec<(ThingId, Box<T>)>,
}

impl<T: ?Sized + Thing> Concreta<T> {
    /// Create an empty composite
    pub fn new() -> Self {
        Concreta {
            ids: IdAllocator::new(),
            things: Vec::new(),
        }
    }

    /// Append an already boxed child
    pub fn add_boxed(&mut self, thing: Box<T>) -> ThingId {
        let id = self.ids.allocate();
        self.things.push((id, thing));
        id
    }

    /// Remove a child
    ///
    /// Removing an id that is not (or no longer) a child is a no-op.
    pub fn remove(&mut self, id: ThingId) -> Option<Box<T>> {
        let position = self.things.iter().position(|(child, _)| *child == id)?;
        self.ids.release(id);
        Some(self.things.remove(position).1)
    }

    /// Whether `id` is a current child
    pub fn contains(&self, id: ThingId) -> bool {
        self.ids.is_live(id)
    }

    /// Borrow a child
    pub fn get(&self, id: ThingId) -> Option<&T> {
        self.things
            .iter()
            .find(|(child, _)| *child == id)
            .map(|(_, thing)| thing.as_ref())
    }

    /// Mutably borrow a child
    pub fn get_mut(&mut self, id: ThingId) -> Option<&mut T> {
        self.things
            .iter_mut()
            .find(|(child, _)| *child == id)
            .map(|(_, thing)| thing.as_mut())
    }

    /// Number of children
    pub fn len(&self) -> usize {
        self.things.len()
    }

    /// Whether there are no children
    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// Child ids in tick order
    pub fn ids(&self) -> impl Iterator<Item = ThingId> + '_ {
        self.things.iter().map(|(id, _)| *id)
    }

    /// Children in tick order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.things.iter().map(|(_, thing)| thing.as_ref())
    }

    /// Remove every child
    pub fn clear(&mut self) {
        self.things.clear();
        self.ids.clear();
    }

    /// Fold `delta` through the children in insertion order
    pub fn happen_children(&mut self, delta: f64, ctx: &mut TickContext<'_>) -> f64 {
        self.things
            .iter_mut()
            .fold(delta, |delta, (_, thing)| thing.happen(delta, ctx))
    }
}

impl Concreta<dyn Thing> {
    /// Append a child
    pub fn add<U: Thing>(&mut self, thing: U) -> ThingId {
        self.add_boxed(Box::new(thing))
    }

    /// Borrow a child as its concrete type
    pub fn get_as<U: Thing>(&self, id: ThingId) -> Option<&U> {
        self.get(id)?.as_any().downcast_ref::<U>()
    }
}

impl<T: ?Sized + Thing> Default for Concreta<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + Thing> Thing for Concreta<T> {
    fn happen(&mut self, delta: f64, ctx: &mut TickContext<'_>) -> f64 {
        self.happen_children(delta, ctx)
    }

    fn label(&self) -> &str {
        "concreta"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
