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
//! The universe: aggregate root of a simulation
//!
//! A [`Universe`] owns its members in insertion order. Each member is one of
//! three kinds, expressed by the [`Member`] tagged union:
//!
//! - a [`Space`], which declares the axes and usually supplies the delta
//! - a [`Law`], which acts on every body each tick
//! - a [`Body`], bound to the universe's [`VectorSpace`]
//!
//! One call to [`Universe::happen`] is one simulation step: the delta is
//! folded through every member in insertion order, then every body's
//! acceleration is reset.
//!
//! # Example
//!
//! ```rust
//! use universe::{Universe, Member};
//! use universe::laws::{Gravitation, Motion};
//! use universe::space::{Space, Time};
//!
//! let mut universe = Universe::new([
//!     Member::from(Space::euclidean(&["x", "y", "z"], Time::fixed(1.0)).unwrap()),
//!     Member::from(Motion::new()),
//!     Member::from(Gravitation::default()),
//! ])
//! .unwrap();
//!
//! let probe = universe.new_body().name("probe").velocity(&[("x", 2.0)]).build().unwrap();
//! let id = universe.add(probe).unwrap();
//! universe.set_observer(Some(id)).unwrap();
//!
//! universe.happen();
//! assert_eq!(universe.body(id).unwrap().position().get("x"), Some(2.0));
//! ```

use std::collections::HashMap;

use crate::body::{Body, BodyBuilder};
use crate::error::{Result, UniverseError};
use crate::laws::{is_version_compatible, Gravitation, Law, Motion, LAW_API_VERSION};
use crate::space::{Space, Time};
use crate::thing::{IdAllocator, Thing, ThingId, TickContext};
use crate::vector::{Vector, VectorSpace};

/// Kind of a universe member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A [`Space`]
    Space,
    /// A [`Law`]
    Law,
    /// A [`Body`]
    Body,
}

/// Anything that can be added to a universe
pub enum Member {
    /// The coordinate system
    Space(Space),
    /// A physical law
    Law(Box<dyn Law>),
    /// A body
    Body(Body),
}

impl Member {
    /// Wrap a law
    pub fn law(law: impl Law) -> Self {
        Member::Law(Box::new(law))
    }

    /// Kind of this member
    pub fn kind(&self) -> MemberKind {
        match self {
            Member::Space(_) => MemberKind::Space,
            Member::Law(_) => MemberKind::Law,
            Member::Body(_) => MemberKind::Body,
        }
    }

    /// The body, if this member is one
    pub fn into_body(self) -> Option<Body> {
        match self {
            Member::Body(body) => Some(body),
            _ => None,
        }
    }

    /// The law, if this member is one
    pub fn into_law(self) -> Option<Box<dyn Law>> {
        match self {
            Member::Law(law) => Some(law),
            _ => None,
        }
    }

    /// The space, if this member is one
    pub fn into_space(self) -> Option<Space> {
        match self {
            Member::Space(space) => Some(space),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Member::Space(space) => write!(f, "Space({} dimensions)", space.len()),
            Member::Law(law) => write!(f, "Law({})", law.name()),
            Member::Body(body) => write!(f, "Body({:?})", body.name()),
        }
    }
}

impl From<Space> for Member {
    fn from(space: Space) -> Self {
        Member::Space(space)
    }
}

impl From<Body> for Member {
    fn from(body: Body) -> Self {
        Member::Body(body)
    }
}

impl From<Box<dyn Law>> for Member {
    fn from(law: Box<dyn Law>) -> Self {
        Member::Law(law)
    }
}

impl From<Motion> for Member {
    fn from(law: Motion) -> Self {
        Member::law(law)
    }
}

impl From<Gravitation> for Member {
    fn from(law: Gravitation) -> Self {
        Member::law(law)
    }
}

/// Position of a member inside its kind's bucket
#[derive(Debug, Clone, Copy)]
struct Slot {
    kind: MemberKind,
    index: usize,
}

/// Aggregate root owning a space, laws and bodies
///
/// # Non-reentrancy
///
/// [`happen`](Universe::happen) takes `&mut self`; a tick can never overlap
/// another tick or an outside mutation of the same universe.
pub struct Universe {
    ids: IdAllocator,
    things: Vec<(ThingId, MemberKind)>,
    slots: HashMap<ThingId, Slot>,
    spaces: Vec<(ThingId, Space)>,
    laws: Vec<(ThingId, Box<dyn Law>)>,
    bodies: Vec<Body>,
    vector_space: VectorSpace,
    observer: Option<ThingId>,
    target: Option<ThingId>,
    event_delta: f64,
    ticks: u64,
}

impl Universe {
    /// Create a universe with no members and no axes
    pub fn empty() -> Self {
        Universe {
            ids: IdAllocator::new(),
            things: Vec::new(),
            slots: HashMap::new(),
            spaces: Vec::new(),
            laws: Vec::new(),
            bodies: Vec::new(),
            vector_space: VectorSpace::empty(),
            observer: None,
            target: None,
            event_delta: f64::INFINITY,
            ticks: 0,
        }
    }

    /// Create a universe from its initial members
    ///
    /// Typically one [`Space`] followed by the laws. The vector space is taken
    /// from the first space. Bodies are usually added afterwards, since they
    /// must be built with [`new_body`](Universe::new_body).
    pub fn new<I>(members: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Member>,
    {
        let mut universe = Universe::empty();
        universe.add_all(members)?;
        Ok(universe)
    }

    /// Add a member and return its id
    ///
    /// The first space added to a universe without bodies defines the
    /// universe's vector space; later spaces are kept as members only.
    ///
    /// # Errors
    ///
    /// - [`UniverseError::ForeignBody`] if a body is bound to another vector space
    /// - [`UniverseError::IncompatibleLaw`] if a law targets an incompatible API version
    pub fn add(&mut self, member: impl Into<Member>) -> Result<ThingId> {
        match member.into() {
            Member::Space(space) => {
                if self.spaces.is_empty() && self.bodies.is_empty() {
                    self.vector_space = space.vector_space();
                }
                let id = self.attach(MemberKind::Space, self.spaces.len());
                self.spaces.push((id, space));
                Ok(id)
            }
            Member::Law(law) => {
                if !is_version_compatible(law.api_version(), LAW_API_VERSION) {
                    return Err(UniverseError::IncompatibleLaw {
                        name: law.name().to_string(),
                        found: law.api_version().to_string(),
                        expected: LAW_API_VERSION.to_string(),
                    });
                }
                let id = self.attach(MemberKind::Law, self.laws.len());
                self.laws.push((id, law));
                Ok(id)
            }
            Member::Body(mut body) => {
                if !body.space().same_space(&self.vector_space) {
                    return Err(UniverseError::ForeignBody);
                }
                let id = self.attach(MemberKind::Body, self.bodies.len());
                body.attach(id);
                self.bodies.push(body);
                Ok(id)
            }
        }
    }

    fn attach(&mut self, kind: MemberKind, index: usize) -> ThingId {
        let id = self.ids.allocate();
        self.things.push((id, kind));
        self.slots.insert(id, Slot { kind, index });
        id
    }

    /// Add several members, one at a time
    ///
    /// This is not transactional: when a member fails, the members before it
    /// stay added and the ones after it are not attempted.
    pub fn add_all<I>(&mut self, members: I) -> Result<Vec<ThingId>>
    where
        I: IntoIterator,
        I::Item: Into<Member>,
    {
        members.into_iter().map(|member| self.add(member)).collect()
    }

    /// Remove a member and hand it back
    ///
    /// Removing an id that is not a member is a no-op. Removing the observer
    /// clears it.
    pub fn remove(&mut self, id: ThingId) -> Option<Member> {
        let slot = *self.slots.get(&id)?;
        let index = match slot.kind {
            MemberKind::Body => self.body_index(id)?,
            _ => slot.index,
        };

        self.slots.remove(&id);
        self.things.retain(|(thing, _)| *thing != id);
        self.ids.release(id);
        if self.observer == Some(id) {
            self.observer = None;
        }

        // Later members of the same kind shift down by one
        let member = match slot.kind {
            MemberKind::Space => {
                let (_, space) = self.spaces.remove(index);
                for (position, (later, _)) in self.spaces.iter().enumerate().skip(index) {
                    if let Some(slot) = self.slots.get_mut(later) {
                        slot.index = position;
                    }
                }
                Member::Space(space)
            }
            MemberKind::Law => {
                let (_, law) = self.laws.remove(index);
                for (position, (later, _)) in self.laws.iter().enumerate().skip(index) {
                    if let Some(slot) = self.slots.get_mut(later) {
                        slot.index = position;
                    }
                }
                Member::Law(law)
            }
            MemberKind::Body => {
                let mut body = self.bodies.remove(index);
                body.detach();
                for (position, later) in self.bodies.iter().enumerate().skip(index) {
                    if let Some(slot) = later.attached_as().and_then(|id| self.slots.get_mut(&id)) {
                        slot.index = position;
                    }
                }
                Member::Body(body)
            }
        };
        Some(member)
    }

    /// Remove several members; absent ids are skipped
    pub fn remove_all<I>(&mut self, ids: I) -> Vec<Member>
    where
        I: IntoIterator<Item = ThingId>,
    {
        ids.into_iter().filter_map(|id| self.remove(id)).collect()
    }

    /// Whether `id` is a current member
    pub fn contains(&self, id: ThingId) -> bool {
        self.ids.is_live(id)
    }

    /// Kind of the member `id`
    pub fn kind_of(&self, id: ThingId) -> Option<MemberKind> {
        self.slots.get(&id).map(|slot| slot.kind)
    }

    /// Member ids and kinds in tick order
    pub fn things(&self) -> impl Iterator<Item = (ThingId, MemberKind)> + '_ {
        self.things.iter().copied()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.things.len()
    }

    /// Whether the universe has no members
    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// The first space in insertion order
    ///
    /// Spaces are read-only once added: the universe's vector space was
    /// derived from their physical dimensions and does not follow changes.
    pub fn space(&self) -> Option<&Space> {
        self.spaces.first().map(|(_, space)| space)
    }

    /// The time dimension of the first space, for retuning its scale
    pub fn time_mut(&mut self) -> Option<&mut Time> {
        self.spaces.first_mut().and_then(|(_, space)| space.time_mut())
    }

    /// The vector space bodies of this universe live in
    pub fn vector_space(&self) -> &VectorSpace {
        &self.vector_space
    }

    /// Build a vector of this universe from `(axis, value)` pairs
    pub fn vector(&self, values: &[(&str, f64)]) -> Result<Vector> {
        self.vector_space.vector(values)
    }

    /// Start building a body bound to this universe
    pub fn new_body(&self) -> BodyBuilder {
        Body::builder(&self.vector_space)
    }

    /// Bodies in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable bodies in insertion order
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Slot of a body, or a scan when the bodies were reordered through
    /// [`bodies_mut`](Universe::bodies_mut)
    fn body_index(&self, id: ThingId) -> Option<usize> {
        let slot = self.slots.get(&id)?;
        if slot.kind != MemberKind::Body {
            return None;
        }
        match self.bodies.get(slot.index) {
            Some(body) if body.attached_as() == Some(id) => Some(slot.index),
            _ => self.bodies.iter().position(|body| body.attached_as() == Some(id)),
        }
    }

    /// Borrow a body by id
    pub fn body(&self, id: ThingId) -> Option<&Body> {
        self.body_index(id).map(|index| &self.bodies[index])
    }

    /// Mutably borrow a body by id
    pub fn body_mut(&mut self, id: ThingId) -> Option<&mut Body> {
        let index = self.body_index(id)?;
        Some(&mut self.bodies[index])
    }

    /// Laws in insertion order
    pub fn laws(&self) -> impl Iterator<Item = &dyn Law> + '_ {
        self.laws.iter().map(|(_, law)| law.as_ref())
    }

    /// Borrow a law by id
    pub fn law(&self, id: ThingId) -> Option<&dyn Law> {
        let index = self.law_index(id)?;
        Some(self.laws[index].1.as_ref())
    }

    fn law_index(&self, id: ThingId) -> Option<usize> {
        self.slots
            .get(&id)
            .filter(|slot| slot.kind == MemberKind::Law)
            .map(|slot| slot.index)
    }

    /// Borrow a law by id as its concrete type
    pub fn law_as<L: Law>(&self, id: ThingId) -> Option<&L> {
        self.law(id)?.as_any().downcast_ref::<L>()
    }

    /// Mutably borrow a law by id as its concrete type
    pub fn law_as_mut<L: Law>(&mut self, id: ThingId) -> Option<&mut L> {
        let index = self.law_index(id)?;
        self.laws[index].1.as_any_mut().downcast_mut::<L>()
    }

    /// The member observing this universe
    pub fn observer(&self) -> Option<ThingId> {
        self.observer
    }

    /// Set or clear the observer
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::InvalidObserver`] if `observer` is not a member.
    pub fn set_observer(&mut self, observer: Option<ThingId>) -> Result<()> {
        if let Some(id) = observer {
            if !self.contains(id) {
                return Err(UniverseError::InvalidObserver(id));
            }
        }
        self.observer = observer;
        Ok(())
    }

    /// The selected target, if any
    pub fn target(&self) -> Option<ThingId> {
        self.target
    }

    /// Select a target; any id is accepted
    pub fn set_target(&mut self, target: Option<ThingId>) {
        self.target = target;
    }

    /// Event delta hook (default: `+∞`)
    ///
    /// Not consulted by the built-in laws.
    pub fn event_delta(&self) -> f64 {
        self.event_delta
    }

    /// Set the event delta hook
    pub fn set_event_delta(&mut self, event_delta: f64) {
        self.event_delta = event_delta;
    }

    /// Number of completed ticks
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Run one simulation step
    ///
    /// The fold is seeded with `0.0`; the time dimension of the space replaces
    /// it with the real step. Returns the final delta.
    pub fn happen(&mut self) -> f64 {
        self.happen_with(0.0)
    }

    /// Run one simulation step seeded with `delta`
    pub fn happen_with(&mut self, delta: f64) -> f64 {
        let Universe {
            things,
            slots,
            spaces,
            laws,
            bodies,
            vector_space,
            observer,
            ticks,
            ..
        } = self;
        let tick = *ticks;

        let mut delta = delta;
        for (id, kind) in things.iter() {
            let index = match slots.get(id) {
                Some(slot) => slot.index,
                None => continue,
            };
            delta = match kind {
                MemberKind::Space => match spaces.get_mut(index) {
                    Some((_, space)) => {
                        let mut ctx = TickContext::new(vector_space, bodies, tick);
                        space.happen(delta, &mut ctx)
                    }
                    None => delta,
                },
                MemberKind::Law => match laws.get_mut(index) {
                    Some((_, law)) => {
                        let mut ctx = TickContext::new(vector_space, bodies, tick);
                        law.happen(delta, &mut ctx)
                    }
                    None => delta,
                },
                MemberKind::Body => {
                    // A law may have reordered the slice; fall back to a scan
                    let index = match bodies.get(index) {
                        Some(body) if body.attached_as() == Some(*id) => Some(index),
                        _ => bodies.iter().position(|body| body.attached_as() == Some(*id)),
                    };
                    match index {
                        Some(index) => {
                            let mut ctx = TickContext::detached(vector_space).at_tick(tick);
                            bodies[index].happen(delta, &mut ctx)
                        }
                        None => delta,
                    }
                }
            };
        }

        for (position, body) in bodies.iter_mut().enumerate() {
            body.acceleration_mut().reset();
            if let Some(slot) = body.attached_as().and_then(|id| slots.get_mut(&id)) {
                slot.index = position;
            }
        }

        if observer.is_none() {
            log::warn!("tick {}: universe has no observer", tick);
        }

        *ticks += 1;
        delta
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Universe")
            .field("axes", &self.vector_space.axes())
            .field("spaces", &self.spaces.len())
            .field("laws", &self.laws.len())
            .field("bodies", &self.bodies.len())
            .field("ticks", &self.ticks)
            .finish()
    }
}
