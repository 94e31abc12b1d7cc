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
//! # Universe
//!
//! A small physics simulation kernel: a tree of [`Thing`](thing::Thing)s
//! modelling bodies in an n-dimensional vector space, advanced one step at a
//! time by pluggable physical [laws](laws).
//!
//! ## Features
//!
//! - **Named-axis vectors**: [`Vector`](vector::Vector) arithmetic over the axes a universe declares
//! - **Thing tree**: every member folds the tick delta through its children in order
//! - **Universe aggregate**: one space, any number of laws and bodies, typed membership
//! - **Laws**: explicit-Euler [`Motion`](laws::Motion) and Newtonian
//!   [`Gravitation`](laws::Gravitation) with a close-encounter velocity merge
//! - **Driver**: a [`Scheduler`](scheduler::Scheduler) with an explicit start/stop lifecycle
//!
//! ## Example
//!
//! ```rust
//! use universe::{Member, Universe};
//! use universe::laws::{Gravitation, Motion};
//! use universe::space::{Space, Time};
//!
//! let mut universe = Universe::new([
//!     Member::from(Space::euclidean(&["x", "y"], Time::fixed(1.0)).unwrap()),
//!     Member::from(Motion::new()),
//!     Member::from(Gravitation::default()),
//! ])
//! .unwrap();
//!
//! let sun = universe.new_body().name("sun").mass(1.0e15).build().unwrap();
//! let rock = universe
//!     .new_body()
//!     .name("rock")
//!     .mass(1.0)
//!     .position(&[("x", 1000.0)])
//!     .build()
//!     .unwrap();
//! universe.add(sun).unwrap();
//! let rock = universe.add(rock).unwrap();
//!
//! universe.happen();
//! let vx = universe.body(rock).unwrap().velocity().get("x").unwrap();
//! assert!(vx < 0.0);
//! ```

#![warn(missing_docs)]

/// Bodies and their builder
pub mod body;

/// Error type
pub mod error;

/// Physical laws
pub mod laws;

/// Frame scheduler
pub mod scheduler;

/// Dimensions, spaces and time
pub mod space;

/// The thing tree
pub mod thing;

/// Universe aggregate
pub mod universe;

/// Named-axis vectors
pub mod vector;

#[cfg(test)]
pub(crate) mod testing;

pub use body::Body;
pub use error::{Result, UniverseError};
pub use universe::{Member, MemberKind, Universe};
pub use vector::{Vector, VectorSpace};
