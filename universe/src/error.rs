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
//! Error type shared by the kernel
//!
//! Every failure the kernel reports is a construction-time or membership
//! problem. The steady-state tick never fails.

use crate::thing::ThingId;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, UniverseError>;

/// Errors raised while building or mutating a [`Universe`](crate::Universe)
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UniverseError {
    /// A body bound to another universe's vector space was offered as a member
    #[error("invalid object type: body is bound to a different universe")]
    ForeignBody,

    /// A law was built against an incompatible law API
    #[error("law '{name}' targets API version {found}, which is incompatible with {expected}")]
    IncompatibleLaw {
        /// Name of the offending law
        name: String,
        /// API version the law reported
        found: String,
        /// API version of this crate
        expected: String,
    },

    /// The observer must be a member of the universe
    #[error("invalid observer: {0} is not a member of this universe")]
    InvalidObserver(ThingId),

    /// Two axes of a space share a name
    #[error("duplicate axis '{0}'")]
    DuplicateAxis(String),

    /// An axis name that the vector space does not declare
    #[error("unknown axis '{0}'")]
    UnknownAxis(String),

    /// Component count does not match the number of axes
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    DimensionMismatch {
        /// Number of axes in the space
        expected: usize,
        /// Number of components supplied
        found: usize,
    },

    /// A vector whose axes differ from the space it is used in
    #[error("vector axes {found:?} do not match space axes {expected:?}")]
    ForeignVector {
        /// Axes of the target space
        expected: Vec<String>,
        /// Axes of the supplied vector
        found: Vec<String>,
    },

    /// A space may hold a single time dimension
    #[error("space already declares a time dimension")]
    DuplicateTime,

    /// Mass must be finite and non-negative
    #[error("invalid mass {0}: must be finite and non-negative")]
    InvalidMass(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(
            UniverseError::UnknownAxis("w".to_string()).to_string(),
            "unknown axis 'w'"
        );
        assert_eq!(
            UniverseError::DimensionMismatch { expected: 3, found: 2 }.to_string(),
            "dimension mismatch: expected 3 components, found 2"
        );
        assert!(UniverseError::ForeignBody.to_string().contains("invalid object type"));
    }
}
