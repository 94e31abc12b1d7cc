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
//! Gravitation: Newton's law of universal gravitation
//!
//! Every massive body is pulled towards every other massive body:
//!
//! **a = G · m / r²**
//!
//! Where:
//! - G is the gravitational constant (6.67384 × 10⁻¹¹ N⋅m²/kg²)
//! - m is the mass of the attracting body
//! - r is the distance between the two bodies
//!
//! # Implementation Details
//!
//! ## Ordered pairs
//!
//! Each ordered pair `(i, j)` with `i ≠ j` is visited once, so every
//! unordered pair is visited twice. A visit only changes the velocity of
//! `i` (far case) or overwrites both velocities (near case), and later
//! visits see the effects of earlier ones. The result therefore depends on
//! body order; this is not a symmetric single pass.
//!
//! ## Far field
//!
//! When the bodies are farther apart than the collision distance, the
//! acceleration is added to the velocity of `i` as an instantaneous
//! increment. By default the increment is *not* multiplied by the tick delta;
//! see [`GravitationConfig::scale_by_delta`].
//!
//! ## Close encounters
//!
//! At or below the collision distance the force would blow up, so the pair is
//! treated as a perfectly inelastic collision: both velocities become the
//! mass-weighted average `(m₁·v₁ + m₂·v₂)/(m₁ + m₂)`. Mass and size are not
//! merged.
//!
//! # References
//!
//! - Newton, I. (1687). "Philosophiæ Naturalis Principia Mathematica"
//! - Aarseth, S. J. (2003). "Gravitational N-Body Simulations"

use crate::body::Body;
use crate::laws::Law;
use crate::thing::{Thing, TickContext};
use std::any::Any;

/// Gravitational constant in SI units (m³/(kg⋅s²))
///
/// CODATA 2010 recommended value: 6.67384(80) × 10⁻¹¹ m³/(kg⋅s²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67384e-11;

/// Separation at or below which two bodies merge velocities
///
/// Expressed in the simulation's length unit and independent of body size.
pub const DEFAULT_COLLISION_DISTANCE: f64 = 20.0;

/// Tunable parameters of [`Gravitation`]
///
/// # Example
///
/// ```rust
/// use universe::laws::{Gravitation, GravitationConfig};
///
/// let config = GravitationConfig::default()
///     .with_collision_distance(1.0)
///     .with_delta_scaling(true);
/// let gravitation = Gravitation::with_config(config);
/// assert_eq!(gravitation.config().collision_distance, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitationConfig {
    /// Gravitational constant (default: GRAVITATIONAL_CONSTANT)
    pub g_constant: f64,
    /// Close-encounter threshold (default: DEFAULT_COLLISION_DISTANCE)
    pub collision_distance: f64,
    /// Multiply far-field velocity increments by the tick delta (default: false)
    pub scale_by_delta: bool,
}

impl Default for GravitationConfig {
    fn default() -> Self {
        GravitationConfig {
            g_constant: GRAVITATIONAL_CONSTANT,
            collision_distance: DEFAULT_COLLISION_DISTANCE,
            scale_by_delta: false,
        }
    }
}

impl GravitationConfig {
    /// Set the gravitational constant
    ///
    /// # Panics
    ///
    /// Panics if `g_constant` is negative or not finite.
    pub fn with_g_constant(mut self, g_constant: f64) -> Self {
        assert!(
            g_constant >= 0.0 && g_constant.is_finite(),
            "Gravitational constant must be non-negative and finite"
        );
        self.g_constant = g_constant;
        self
    }

    /// Set the close-encounter threshold
    ///
    /// # Panics
    ///
    /// Panics if `distance` is negative or not finite.
    pub fn with_collision_distance(mut self, distance: f64) -> Self {
        assert!(
            distance >= 0.0 && distance.is_finite(),
            "Collision distance must be non-negative and finite"
        );
        self.collision_distance = distance;
        self
    }

    /// Choose whether far-field increments are scaled by the tick delta
    pub fn with_delta_scaling(mut self, enabled: bool) -> Self {
        self.scale_by_delta = enabled;
        self
    }
}

/// Outcome of one ordered-pair visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encounter {
    Attraction,
    Collision,
}

/// Pairwise gravitational attraction between massive bodies
pub struct Gravitation {
    config: GravitationConfig,
    /// Whether to warn about non-finite velocities
    warn_on_invalid: bool,
}

impl Gravitation {
    /// Create the law with the given gravitational constant
    ///
    /// # Panics
    ///
    /// Panics if `g_constant` is negative or not finite.
    pub fn new(g_constant: f64) -> Self {
        Self::with_config(GravitationConfig::default().with_g_constant(g_constant))
    }

    /// Create the law from a full configuration
    pub fn with_config(config: GravitationConfig) -> Self {
        Gravitation {
            config,
            warn_on_invalid: true,
        }
    }

    /// Create the law with `GRAVITATIONAL_CONSTANT * scale_factor`
    ///
    /// Useful for demonstrations where the real constant is too weak to see.
    pub fn with_scaled_g(scale_factor: f64) -> Self {
        Self::new(GRAVITATIONAL_CONSTANT * scale_factor)
    }

    /// Current configuration
    pub fn config(&self) -> &GravitationConfig {
        &self.config
    }

    /// Gravitational constant in use
    pub fn g_constant(&self) -> f64 {
        self.config.g_constant
    }

    /// Close-encounter threshold in use
    pub fn collision_distance(&self) -> f64 {
        self.config.collision_distance
    }

    /// Set the close-encounter threshold
    ///
    /// # Panics
    ///
    /// Panics if `distance` is negative or not finite.
    pub fn set_collision_distance(&mut self, distance: f64) {
        self.config = self.config.with_collision_distance(distance);
    }

    /// Choose whether far-field increments are scaled by the tick delta
    pub fn set_scale_by_delta(&mut self, enabled: bool) {
        self.config.scale_by_delta = enabled;
    }

    /// Set whether to warn about non-finite velocities
    pub fn set_warn_on_invalid(&mut self, warn: bool) {
        self.warn_on_invalid = warn;
    }

    /// Apply the ordered pair `(i, j)` to the velocities
    fn interact(&self, particle: &mut Body, other: &mut Body, delta: f64) -> Encounter {
        let differences = other.position().sub(particle.position());
        let distance_squared = differences.length_sq();
        let distance = distance_squared.sqrt();

        if distance > self.config.collision_distance {
            let step = if self.config.scale_by_delta { delta } else { 1.0 };
            let pull = other.mass() / distance_squared;
            let g = self.config.g_constant;
            for (axis, v) in particle.velocity_mut().components_mut().iter_mut().enumerate() {
                *v += pull * (differences[axis] / distance) * g * step;
            }
            Encounter::Attraction
        } else {
            let total_mass = particle.mass() + other.mass();
            let merged = particle
                .velocity()
                .multiply_scalar(particle.mass())
                .add(&other.velocity().multiply_scalar(other.mass()))
                .divide_scalar(total_mass);
            particle.velocity_mut().copy_from(&merged);
            other.velocity_mut().copy_from(&merged);
            Encounter::Collision
        }
    }
}

impl Default for Gravitation {
    fn default() -> Self {
        Self::with_config(GravitationConfig::default())
    }
}

/// Borrow two distinct bodies mutably
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

impl Thing for Gravitation {
    fn happen(&mut self, delta: f64, ctx: &mut TickContext<'_>) -> f64 {
        let tick = ctx.tick();
        let bodies = ctx.bodies_mut();
        let mut collisions = 0usize;

        for i in 0..bodies.len() {
            if !bodies[i].is_massive() {
                continue;
            }
            for j in 0..bodies.len() {
                if i == j || !bodies[j].is_massive() {
                    continue;
                }
                let (particle, other) = pair_mut(bodies, i, j);
                if self.interact(particle, other, delta) == Encounter::Collision {
                    collisions += 1;
                }
            }
        }

        if collisions > 0 {
            log::debug!("tick {}: {} close encounter(s) merged", tick, collisions);
        }

        if self.warn_on_invalid {
            if let Some(body) = bodies.iter().find(|b| !b.velocity().is_finite()) {
                log::warn!(
                    "tick {}: non-finite velocity on body '{}' after gravitation",
                    tick,
                    body.name()
                );
            }
        }

        delta
    }

    fn label(&self) -> &str {
        "gravitation"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Law for Gravitation {
    fn name(&self) -> &str {
        "gravitation"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::VectorSpace;

    fn xyz() -> VectorSpace {
        VectorSpace::new(["x", "y", "z"]).unwrap()
    }

    fn body(space: &VectorSpace, mass: f64, x: f64, vx: f64) -> Body {
        Body::builder(space)
            .mass(mass)
            .position(&[("x", x)])
            .velocity(&[("x", vx)])
            .build()
            .unwrap()
    }

    fn tick(gravitation: &mut Gravitation, space: &VectorSpace, bodies: &mut [Body], delta: f64) -> f64 {
        let mut ctx = TickContext::new(space, bodies, 0);
        gravitation.happen(delta, &mut ctx)
    }

    #[test]
    fn test_warns_on_non_finite_velocity() {
        crate::testing::capture();
        let space = xyz();
        let mut bodies = vec![
            body(&space, 1.0e12, 0.0, f64::INFINITY),
            body(&space, 1.0e12, 100.0, 0.0),
        ];
        let mut gravitation = Gravitation::default();

        tick(&mut gravitation, &space, &mut bodies, 1.0);
        let warnings = crate::testing::take(log::Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("non-finite velocity"));

        gravitation.set_warn_on_invalid(false);
        tick(&mut gravitation, &space, &mut bodies, 1.0);
        assert!(crate::testing::take(log::Level::Warn).is_empty());
    }

    #[test]
    fn test_finite_velocities_do_not_warn() {
        crate::testing::capture();
        let space = xyz();
        let mut bodies = vec![body(&space, 1.0e12, 0.0, 0.0), body(&space, 1.0e12, 100.0, 0.0)];
        tick(&mut Gravitation::default(), &space, &mut bodies, 1.0);
        assert!(crate::testing::take(log::Level::Warn).is_empty());
    }

    #[test]
    fn test_gravitational_constant() {
        assert!(GRAVITATIONAL_CONSTANT > 6.6e-11);
        assert!(GRAVITATIONAL_CONSTANT < 6.7e-11);
    }

    #[test]
    fn test_default_config() {
        let gravitation = Gravitation::default();
        assert_eq!(gravitation.g_constant(), GRAVITATIONAL_CONSTANT);
        assert_eq!(gravitation.collision_distance(), DEFAULT_COLLISION_DISTANCE);
        assert!(!gravitation.config().scale_by_delta);
    }

    #[test]
    fn test_far_field_pulls_bodies_together() {
        let space = xyz();
        let (mass, distance) = (1.0e12, 100.0);
        let mut bodies = vec![body(&space, mass, 0.0, 0.0), body(&space, mass, distance, 0.0)];

        let returned = tick(&mut Gravitation::default(), &space, &mut bodies, 0.5);
        assert_eq!(returned, 0.5);

        let expected = GRAVITATIONAL_CONSTANT * mass / (distance * distance);
        let v0 = bodies[0].velocity();
        let v1 = bodies[1].velocity();
        assert!((v0.component(0) - expected).abs() < expected * 1e-12);
        assert!((v1.component(0) + expected).abs() < expected * 1e-12);
        assert_eq!(v0.component(1), 0.0);
        assert_eq!(v0.component(2), 0.0);
        assert_eq!(bodies[0].position().component(0), 0.0);
    }

    #[test]
    fn test_delta_scaling() {
        let space = xyz();
        let mut bodies = vec![body(&space, 1.0e12, 0.0, 0.0), body(&space, 1.0e12, 100.0, 0.0)];
        let mut gravitation = Gravitation::default();
        gravitation.set_scale_by_delta(true);
        tick(&mut gravitation, &space, &mut bodies, 0.5);

        let expected = 0.5 * GRAVITATIONAL_CONSTANT * 1.0e12 / 1.0e4;
        assert!((bodies[0].velocity().component(0) - expected).abs() < expected * 1e-12);
    }

    #[test]
    fn test_near_field_merges_velocities() {
        let space = xyz();
        let mut bodies = vec![body(&space, 1.0, 0.0, 2.0), body(&space, 3.0, 10.0, 0.0)];

        tick(&mut Gravitation::default(), &space, &mut bodies, 1.0);

        assert_eq!(bodies[0].velocity().components(), &[0.5, 0.0, 0.0]);
        assert_eq!(bodies[1].velocity().components(), &[0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let space = xyz();
        let mut bodies = vec![body(&space, 1.0, 0.0, 1.0), body(&space, 1.0, 20.0, -1.0)];
        tick(&mut Gravitation::default(), &space, &mut bodies, 1.0);
        assert_eq!(bodies[0].velocity().components(), &[0.0, 0.0, 0.0]);
        assert_eq!(bodies[1].velocity().components(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_coincident_bodies_do_not_blow_up() {
        let space = xyz();
        let mut bodies = vec![body(&space, 2.0, 5.0, 3.0), body(&space, 2.0, 5.0, 1.0)];
        tick(&mut Gravitation::default(), &space, &mut bodies, 1.0);
        assert!(bodies.iter().all(|b| b.velocity().is_finite()));
        assert_eq!(bodies[0].velocity().component(0), 2.0);
    }

    #[test]
    fn test_massless_bodies_are_ignored() {
        let space = xyz();
        let mut bodies = vec![body(&space, 0.0, 0.0, 1.0), body(&space, 5.0, 1.0, 0.0)];
        tick(&mut Gravitation::default(), &space, &mut bodies, 1.0);
        assert_eq!(bodies[0].velocity().component(0), 1.0);
        assert_eq!(bodies[1].velocity().component(0), 0.0);
    }

    #[test]
    fn test_single_body_is_unaffected() {
        let space = xyz();
        let mut bodies = vec![body(&space, 5.0, 0.0, 1.0)];
        tick(&mut Gravitation::default(), &space, &mut bodies, 1.0);
        assert_eq!(bodies[0].velocity().component(0), 1.0);
    }

    #[test]
    fn test_custom_collision_distance() {
        let space = xyz();
        let mut bodies = vec![body(&space, 1.0, 0.0, 2.0), body(&space, 3.0, 10.0, 0.0)];
        let mut gravitation = Gravitation::with_scaled_g(1.0);
        gravitation.set_collision_distance(5.0);
        tick(&mut gravitation, &space, &mut bodies, 1.0);
        // Far field now: velocities only change by a tiny pull
        assert!(bodies[0].velocity().component(0) > 1.99);
        assert!(bodies[1].velocity().component(0) < 0.0);
    }

    #[test]
    #[should_panic(expected = "Gravitational constant must be non-negative and finite")]
    fn test_negative_g_panics() {
        Gravitation::new(-1.0);
    }

    #[test]
    #[should_panic(expected = "Collision distance must be non-negative and finite")]
    fn test_negative_collision_distance_panics() {
        Gravitation::default().set_collision_distance(-1.0);
    }
}
