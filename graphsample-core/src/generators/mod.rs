//! Graph generators.
//!
//! [`classic`] builds the deterministic families used throughout the tests and
//! [`random`] draws random graphs from an explicit RNG.

pub mod classic;
pub mod random;
