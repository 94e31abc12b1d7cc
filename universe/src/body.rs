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
//! Physical bodies
//!
//! A [`Body`] is a composite thing with mass and extent, located in the
//! vector space of the universe that created it. Position, velocity,
//! acceleration and size all share that space.

use crate::error::{Result, UniverseError};
use crate::laws::gravitation::GRAVITATIONAL_CONSTANT;
use crate::thing::{Concreta, Thing, ThingId, TickContext};
use crate::vector::{Vector, VectorSpace};
use std::any::Any;

/// A massive (or massless) object in a universe
///
/// Bodies are usually built with [`Universe::new_body`](crate::Universe::new_body),
/// which binds them to the universe's vector space. A body bound to another
/// space is rejected when added.
///
/// ```
/// use universe::space::{Space, Time};
/// use universe::{Universe, UniverseError};
///
/// let mut home = Universe::new([Space::euclidean(&["x"], Time::fixed(1.0)).unwrap()]).unwrap();
/// let away = Universe::new([Space::euclidean(&["x"], Time::fixed(1.0)).unwrap()]).unwrap();
///
/// let local = home.new_body().name("local").mass(1.0).build().unwrap();
/// assert!(home.add(local).is_ok());
///
/// let stranger = away.new_body().name("stranger").build().unwrap();
/// assert_eq!(home.add(stranger), Err(UniverseError::ForeignBody));
/// ```
pub struct Body {
    name: String,
    mass: f64,
    size: Vector,
    position: Vector,
    velocity: Vector,
    acceleration: Vector,
    children: Concreta,
    attached: Option<ThingId>,
}

impl Body {
    /// Create a massless, unnamed body at the origin of `space`
    pub fn new(space: &VectorSpace) -> Self {
        Body {
            name: String::new(),
            mass: 0.0,
            size: space.zero(),
            position: space.zero(),
            velocity: space.zero(),
            acceleration: space.zero(),
            children: Concreta::new(),
            attached: None,
        }
    }

    /// Start building a body in `space`
    pub fn builder(space: &VectorSpace) -> BodyBuilder {
        BodyBuilder::new(space.clone())
    }

    /// The vector space this body lives in
    pub fn space(&self) -> &VectorSpace {
        self.position.space()
    }

    /// Display label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the display label
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Mass (0 for massless bodies)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Set the mass
    ///
    /// # Panics
    ///
    /// Panics if `mass` is negative or not finite. Use
    /// [`BodyBuilder::mass`] for a checked alternative.
    pub fn set_mass(&mut self, mass: f64) {
        assert!(
            mass >= 0.0 && mass.is_finite(),
            "Mass must be non-negative and finite"
        );
        self.mass = mass;
    }

    /// Extent along each axis
    pub fn size(&self) -> &Vector {
        &self.size
    }

    /// Position
    pub fn position(&self) -> &Vector {
        &self.position
    }

    /// Velocity
    pub fn velocity(&self) -> &Vector {
        &self.velocity
    }

    /// Accumulated acceleration for the current tick
    pub fn acceleration(&self) -> &Vector {
        &self.acceleration
    }

    /// Mutable position
    pub fn position_mut(&mut self) -> &mut Vector {
        &mut self.position
    }

    /// Mutable velocity
    pub fn velocity_mut(&mut self) -> &mut Vector {
        &mut self.velocity
    }

    /// Mutable acceleration
    pub fn acceleration_mut(&mut self) -> &mut Vector {
        &mut self.acceleration
    }

    /// Replace the size
    pub fn set_size(&mut self, size: Vector) -> Result<()> {
        self.size = self.rebind(size)?;
        Ok(())
    }

    /// Replace the position
    pub fn set_position(&mut self, position: Vector) -> Result<()> {
        self.position = self.rebind(position)?;
        Ok(())
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vector) -> Result<()> {
        self.velocity = self.rebind(velocity)?;
        Ok(())
    }

    /// Replace the acceleration
    pub fn set_acceleration(&mut self, acceleration: Vector) -> Result<()> {
        self.acceleration = self.rebind(acceleration)?;
        Ok(())
    }

    fn rebind(&self, vector: Vector) -> Result<Vector> {
        rebind(self.space(), vector)
    }

    /// Child things carried by this body
    pub fn children(&self) -> &Concreta {
        &self.children
    }

    /// Mutable child things carried by this body
    pub fn children_mut(&mut self) -> &mut Concreta {
        &mut self.children
    }

    /// Whether the body has mass
    pub fn is_massive(&self) -> bool {
        self.mass > 0.0
    }

    /// Product of all size components
    pub fn volume(&self) -> f64 {
        self.size.product()
    }

    /// Mass over volume, or 0 when either is zero
    pub fn density(&self) -> f64 {
        let volume = self.volume();
        if volume != 0.0 && self.mass != 0.0 {
            self.mass / volume
        } else {
            0.0
        }
    }

    /// 2·G·m
    pub fn gravitational_potential(&self) -> f64 {
        2.0 * GRAVITATIONAL_CONSTANT * self.mass
    }

    /// Magnitude of the velocity
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// KE = 0.5 * m * v²
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_sq()
    }

    /// Id this body was given by its universe, if attached
    pub fn attached_as(&self) -> Option<ThingId> {
        self.attached
    }

    pub(crate) fn attach(&mut self, id: ThingId) {
        self.attached = Some(id);
    }

    pub(crate) fn detach(&mut self) {
        self.attached = None;
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Body")
            .field("name", &self.name)
            .field("mass", &self.mass)
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("children", &self.children.len())
            .finish()
    }
}

impl Thing for Body {
    fn happen(&mut self, delta: f64, ctx: &mut TickContext<'_>) -> f64 {
        let space = self.position.space().clone();
        let mut inner = TickContext::detached(&space).at_tick(ctx.tick());
        self.children.happen_children(delta, &mut inner)
    }

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

/// Bind `vector` to `space` when both declare the same axes
fn rebind(space: &VectorSpace, vector: Vector) -> Result<Vector> {
    if vector.space().same_space(space) {
        return Ok(vector);
    }
    if !vector.space().is_compatible(space) {
        return Err(UniverseError::ForeignVector {
            expected: space.axes().to_vec(),
            found: vector.keys().to_vec(),
        });
    }
    let mut bound = space.zero();
    bound.copy_from(&vector);
    Ok(bound)
}

enum VectorInput {
    Pairs(Vec<(String, f64)>),
    Vector(Vector),
}

impl VectorInput {
    fn resolve(self, space: &VectorSpace) -> Result<Vector> {
        match self {
            VectorInput::Pairs(pairs) => {
                let mut vector = space.zero();
                for (axis, value) in pairs {
                    vector.set(&axis, value)?;
                }
                Ok(vector)
            }
            VectorInput::Vector(vector) => rebind(space, vector),
        }
    }
}

fn pairs(values: &[(&str, f64)]) -> VectorInput {
    VectorInput::Pairs(
        values
            .iter()
            .map(|&(axis, value)| (axis.to_string(), value))
            .collect(),
    )
}

/// Builder for bodies bound to a vector space
///
/// Axes left unspecified default to zero.
///
/// # Examples
///
/// ```
/// use universe::body::Body;
/// use universe::vector::VectorSpace;
///
/// let space = VectorSpace::new(["x", "y"]).unwrap();
/// let moon = Body::builder(&space)
///     .name("moon")
///     .mass(7.3e22)
///     .position(&[("x", 3.84e8)])
///     .velocity(&[("y", 1022.0)])
///     .build()
///     .unwrap();
///
/// assert_eq!(moon.position().get("y"), Some(0.0));
/// assert!(moon.is_massive());
/// ```
pub struct BodyBuilder {
    space: VectorSpace,
    name: String,
    mass: f64,
    size: Option<VectorInput>,
    position: Option<VectorInput>,
    velocity: Option<VectorInput>,
    acceleration: Option<VectorInput>,
}

impl BodyBuilder {
    fn new(space: VectorSpace) -> Self {
        BodyBuilder {
            space,
            name: String::new(),
            mass: 0.0,
            size: None,
            position: None,
            velocity: None,
            acceleration: None,
        }
    }

    /// Set the display label
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the mass
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the size from `(axis, value)` pairs
    pub fn size(mut self, values: &[(&str, f64)]) -> Self {
        self.size = Some(pairs(values));
        self
    }

    /// Set the position from `(axis, value)` pairs
    pub fn position(mut self, values: &[(&str, f64)]) -> Self {
        self.position = Some(pairs(values));
        self
    }

    /// Set the velocity from `(axis, value)` pairs
    pub fn velocity(mut self, values: &[(&str, f64)]) -> Self {
        self.velocity = Some(pairs(values));
        self
    }

    /// Set the acceleration from `(axis, value)` pairs
    pub fn acceleration(mut self, values: &[(&str, f64)]) -> Self {
        self.acceleration = Some(pairs(values));
        self
    }

    /// Use a ready-made size vector
    pub fn size_vector(mut self, size: Vector) -> Self {
        self.size = Some(VectorInput::Vector(size));
        self
    }

    /// Use a ready-made position vector
    pub fn position_vector(mut self, position: Vector) -> Self {
        self.position = Some(VectorInput::Vector(position));
        self
    }

    /// Use a ready-made velocity vector
    pub fn velocity_vector(mut self, velocity: Vector) -> Self {
        self.velocity = Some(VectorInput::Vector(velocity));
        self
    }

    /// Build the body
    ///
    /// # Errors
    ///
    /// - [`UniverseError::InvalidMass`] for a negative or non-finite mass
    /// - [`UniverseError::UnknownAxis`] for an axis the space does not declare
    /// - [`UniverseError::ForeignVector`] for a vector with different axes
    pub fn build(self) -> Result<Body> {
        if !(self.mass >= 0.0 && self.mass.is_finite()) {
            return Err(UniverseError::InvalidMass(self.mass));
        }

        let space = self.space;
        let resolve = |input: Option<VectorInput>| match input {
            Some(input) => input.resolve(&space),
            None => Ok(space.zero()),
        };

        let mut body = Body::new(&space);
        body.name = self.name;
        body.mass = self.mass;
        body.size = resolve(self.size)?;
        body.position = resolve(self.position)?;
        body.velocity = resolve(self.velocity)?;
        body.acceleration = resolve(self.acceleration)?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xyz() -> VectorSpace {
        VectorSpace::new(["x", "y", "z"]).unwrap()
    }

    #[test]
    fn test_new_body_defaults() {
        let space = xyz();
        let body = Body::new(&space);
        assert_eq!(body.name(), "");
        assert_eq!(body.mass(), 0.0);
        assert!(!body.is_massive());
        assert_eq!(body.position(), &space.zero());
        assert!(body.space().same_space(&space));
        assert!(body.attached_as().is_none());
    }

    #[test]
    fn test_derived_quantities() {
        let body = Body::builder(&xyz())
            .mass(24.0)
            .size(&[("x", 1.0), ("y", 2.0), ("z", 3.0)])
            .velocity(&[("x", 3.0), ("y", 4.0)])
            .build()
            .unwrap();

        assert_eq!(body.volume(), 6.0);
        assert_eq!(body.density(), 4.0);
        assert_eq!(body.gravitational_potential(), 2.0 * GRAVITATIONAL_CONSTANT * 24.0);
        assert_eq!(body.speed(), 5.0);
        assert_eq!(body.kinetic_energy(), 0.5 * 24.0 * 25.0);
    }

    #[test]
    fn test_density_guards_zero() {
        let flat = Body::builder(&xyz()).mass(5.0).size(&[("x", 1.0)]).build().unwrap();
        assert_eq!(flat.volume(), 0.0);
        assert_eq!(flat.density(), 0.0);

        let massless = Body::builder(&xyz())
            .size(&[("x", 1.0), ("y", 1.0), ("z", 1.0)])
            .build()
            .unwrap();
        assert_eq!(massless.density(), 0.0);
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        let space = xyz();
        assert_eq!(
            Body::builder(&space).mass(-1.0).build().unwrap_err(),
            UniverseError::InvalidMass(-1.0)
        );
        assert!(matches!(
            Body::builder(&space).mass(f64::NAN).build(),
            Err(UniverseError::InvalidMass(_))
        ));
        assert_eq!(
            Body::builder(&space).position(&[("w", 1.0)]).build().unwrap_err(),
            UniverseError::UnknownAxis("w".to_string())
        );

        let planar = VectorSpace::new(["x", "y"]).unwrap().zero();
        assert!(matches!(
            Body::builder(&space).velocity_vector(planar).build(),
            Err(UniverseError::ForeignVector { .. })
        ));
    }

    #[test]
    fn test_compatible_vectors_are_rebound() {
        let space = xyz();
        let lookalike = xyz().vector(&[("z", 9.0)]).unwrap();
        let body = Body::builder(&space).position_vector(lookalike).build().unwrap();
        assert!(body.position().space().same_space(&space));
        assert_eq!(body.position().get("z"), Some(9.0));
    }

    #[test]
    fn test_setters() {
        let space = xyz();
        let mut body = Body::new(&space);
        body.set_name("probe");
        body.set_mass(2.0);
        body.set_velocity(space.vector(&[("x", 1.0)]).unwrap()).unwrap();
        body.position_mut().set("y", 4.0).unwrap();

        assert_eq!(body.name(), "probe");
        assert_eq!(body.label(), "probe");
        assert_eq!(body.velocity().get("x"), Some(1.0));
        assert_eq!(body.position().get("y"), Some(4.0));
        assert!(body.set_size(VectorSpace::new(["a"]).unwrap().zero()).is_err());
    }

    #[test]
    #[should_panic(expected = "Mass must be non-negative and finite")]
    fn test_set_negative_mass_panics() {
        Body::new(&xyz()).set_mass(-3.0);
    }

    #[test]
    fn test_body_happen_folds_children() {
        struct Halve;
        impl Thing for Halve {
            fn happen(&mut self, delta: f64, ctx: &mut TickContext<'_>) -> f64 {
                assert!(ctx.bodies().is_empty());
                delta / 2.0
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let space = xyz();
        let mut body = Body::new(&space);
        body.children_mut().add(Halve);
        body.children_mut().add(Halve);
        assert_eq!(body.happen(8.0, &mut TickContext::detached(&space)), 2.0);
    }
}
