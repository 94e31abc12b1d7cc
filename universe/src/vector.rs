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
//! N-dimensional vectors over named axes
//!
//! A [`VectorSpace`] is the ordered list of axis names a universe declares
//! through the physical dimensions of its space. Every [`Vector`] is bound to
//! one space, and arithmetic matches components by axis name.
//!
//! # Examples
//!
//! ```
//! use universe::vector::VectorSpace;
//!
//! let space = VectorSpace::new(["x", "y"]).unwrap();
//! let a = space.vector(&[("x", 3.0), ("y", 4.0)]).unwrap();
//! assert_eq!(a.length(), 5.0);
//! assert_eq!(a.keys(), &["x".to_string(), "y".to_string()]);
//! ```

use crate::error::{Result, UniverseError};
use std::fmt;
use std::ops::{Add, Div, Index, Mul, Neg, Sub};
use std::sync::Arc;

/// Ordered, duplicate-free list of axis names shared by a family of vectors
///
/// Cloning a space is cheap and keeps its identity: clones are the
/// [same space](VectorSpace::same_space) as the original. Two spaces created
/// separately are only [compatible](VectorSpace::is_compatible) when their
/// axis lists are equal.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    axes: Arc<[String]>,
}

impl VectorSpace {
    /// Create a space from an ordered list of axis names
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::DuplicateAxis`] if a name repeats.
    pub fn new<I, S>(axes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for axis in axes {
            let axis = axis.into();
            if names.contains(&axis) {
                return Err(UniverseError::DuplicateAxis(axis));
            }
            names.push(axis);
        }
        Ok(VectorSpace { axes: names.into() })
    }

    /// Create a zero-dimensional space
    pub fn empty() -> Self {
        VectorSpace {
            axes: Vec::new().into(),
        }
    }

    /// Axis names in declaration order
    pub fn axes(&self) -> &[String] {
        &self.axes
    }

    /// Number of axes
    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    /// Position of the named axis
    pub fn index_of(&self, axis: &str) -> Option<usize> {
        self.axes.iter().position(|name| name == axis)
    }

    /// Whether both handles refer to the same space instance
    pub fn same_space(&self, other: &VectorSpace) -> bool {
        Arc::ptr_eq(&self.axes, &other.axes)
    }

    /// Whether both spaces declare the same axes in the same order
    pub fn is_compatible(&self, other: &VectorSpace) -> bool {
        self.same_space(other) || self.axes == other.axes
    }

    /// The zero vector of this space
    pub fn zero(&self) -> Vector {
        Vector {
            space: self.clone(),
            components: vec![0.0; self.dimension()],
        }
    }

    /// Build a vector from `(axis, value)` pairs
    ///
    /// Axes that are not mentioned default to zero.
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::UnknownAxis`] for a name the space does not declare.
    pub fn vector(&self, values: &[(&str, f64)]) -> Result<Vector> {
        let mut vector = self.zero();
        for &(axis, value) in values {
            vector.set(axis, value)?;
        }
        Ok(vector)
    }

    /// Build a vector from positional components
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::DimensionMismatch`] if the length differs
    /// from the number of axes.
    pub fn from_components(&self, components: Vec<f64>) -> Result<Vector> {
        if components.len() != self.dimension() {
            return Err(UniverseError::DimensionMismatch {
                expected: self.dimension(),
                found: components.len(),
            });
        }
        Ok(Vector {
            space: self.clone(),
            components,
        })
    }
}

impl PartialEq for VectorSpace {
    fn eq(&self, other: &Self) -> bool {
        self.is_compatible(other)
    }
}

/// A vector whose components are addressed by axis name
///
/// All arithmetic is non-mutating and returns a new vector bound to the
/// space of `self`. When the operand belongs to a compatible space the
/// components are paired positionally; otherwise each axis of `self` is
/// looked up by name on the operand and a missing axis contributes `NaN`.
#[derive(Debug, Clone)]
pub struct Vector {
    space: VectorSpace,
    components: Vec<f64>,
}

impl Vector {
    /// The space this vector is bound to
    pub fn space(&self) -> &VectorSpace {
        &self.space
    }

    /// Axis names in order
    pub fn keys(&self) -> &[String] {
        self.space.axes()
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the vector has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components in axis order
    pub fn components(&self) -> &[f64] {
        &self.components
    }

    /// Mutable components in axis order
    pub fn components_mut(&mut self) -> &mut [f64] {
        &mut self.components
    }

    /// Component at the given position
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn component(&self, index: usize) -> f64 {
        self.components[index]
    }

    /// Component for the named axis
    pub fn get(&self, axis: &str) -> Option<f64> {
        self.space.index_of(axis).map(|i| self.components[i])
    }

    /// Set the component for the named axis
    ///
    /// # Errors
    ///
    /// Returns [`UniverseError::UnknownAxis`] if the axis is not declared.
    pub fn set(&mut self, axis: &str, value: f64) -> Result<()> {
        let index = self
            .space
            .index_of(axis)
            .ok_or_else(|| UniverseError::UnknownAxis(axis.to_string()))?;
        self.components[index] = value;
        Ok(())
    }

    /// Overwrite every component of `self` with the matching component of `other`
    pub fn copy_from(&mut self, other: &Vector) {
        if self.space.is_compatible(&other.space) {
            self.components.copy_from_slice(&other.components);
            return;
        }
        for (axis, component) in self.space.axes().iter().zip(self.components.iter_mut()) {
            *component = other.get(axis).unwrap_or(f64::NAN);
        }
    }

    /// Set every component to zero
    pub fn reset(&mut self) {
        self.components.iter_mut().for_each(|c| *c = 0.0);
    }

    fn zip_with(&self, other: &Vector, f: impl Fn(f64, f64) -> f64) -> Vector {
        let components = if self.space.is_compatible(&other.space) {
            self.components
                .iter()
                .zip(&other.components)
                .map(|(&a, &b)| f(a, b))
                .collect()
        } else {
            self.space
                .axes()
                .iter()
                .zip(&self.components)
                .map(|(axis, &a)| f(a, other.get(axis).unwrap_or(f64::NAN)))
                .collect()
        };
        Vector {
            space: self.space.clone(),
            components,
        }
    }

    /// Apply `f` to every component
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Vector {
        Vector {
            space: self.space.clone(),
            components: self.components.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Component-wise sum
    pub fn add(&self, other: &Vector) -> Vector {
        self.zip_with(other, |a, b| a + b)
    }

    /// Component-wise difference
    pub fn sub(&self, other: &Vector) -> Vector {
        self.zip_with(other, |a, b| a - b)
    }

    /// Component-wise product
    pub fn multiply(&self, other: &Vector) -> Vector {
        self.zip_with(other, |a, b| a * b)
    }

    /// Component-wise quotient
    pub fn divide(&self, other: &Vector) -> Vector {
        self.zip_with(other, |a, b| a / b)
    }

    /// Add a scalar to every component
    pub fn add_scalar(&self, scalar: f64) -> Vector {
        self.map(|c| c + scalar)
    }

    /// Subtract a scalar from every component
    pub fn sub_scalar(&self, scalar: f64) -> Vector {
        self.map(|c| c - scalar)
    }

    /// Multiply every component by a scalar
    pub fn multiply_scalar(&self, scalar: f64) -> Vector {
        self.map(|c| c * scalar)
    }

    /// Divide every component by a scalar
    pub fn divide_scalar(&self, scalar: f64) -> Vector {
        self.map(|c| c / scalar)
    }

    /// Raise every component to `exponent`
    pub fn pow(&self, exponent: f64) -> Vector {
        self.map(|c| c.powf(exponent))
    }

    /// Left fold over the components, seeded with the first one
    ///
    /// Returns 0 for a zero-length vector.
    pub fn reduce(&self, f: impl Fn(f64, f64) -> f64) -> f64 {
        let mut iter = self.components.iter().copied();
        match iter.next() {
            Some(first) => iter.fold(first, f),
            None => 0.0,
        }
    }

    /// Sum of the components
    pub fn sum(&self) -> f64 {
        self.reduce(|a, b| a + b)
    }

    /// Product of the components
    pub fn product(&self) -> f64 {
        self.reduce(|a, b| a * b)
    }

    /// Dot product
    pub fn dot(&self, other: &Vector) -> f64 {
        self.multiply(other).sum()
    }

    /// Squared Euclidean length
    pub fn length_sq(&self) -> f64 {
        self.components.iter().map(|c| c * c).sum()
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.length_sq().sqrt()
    }

    /// Unit vector in the same direction
    ///
    /// The zero vector normalizes to a copy of itself.
    pub fn normalized(&self) -> Vector {
        let length = self.length();
        self.divide_scalar(if length == 0.0 { 1.0 } else { length })
    }

    /// Squared Euclidean distance to `other`
    pub fn distance_to_squared(&self, other: &Vector) -> f64 {
        self.sub(other).length_sq()
    }

    /// Euclidean distance to `other`
    pub fn distance_to(&self, other: &Vector) -> f64 {
        self.distance_to_squared(other).sqrt()
    }

    /// Check if all components are finite (not NaN or infinite)
    pub fn is_finite(&self) -> bool {
        self.components.iter().all(|c| c.is_finite())
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.space.is_compatible(&other.space) && self.components == other.components
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.components[index]
    }
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        Vector::add(self, rhs)
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        Vector::sub(self, rhs)
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.multiply_scalar(rhs)
    }
}

impl Div<f64> for &Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        self.divide_scalar(rhs)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.map(|c| -c)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, (axis, value)) in self.keys().iter().zip(&self.components).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", axis, value)?;
        }
        write!(f, ")")
    }
}
