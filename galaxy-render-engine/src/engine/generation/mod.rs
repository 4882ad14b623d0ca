//! Procedural spiral galaxy generation.
//!
//! Turns a small set of numeric parameters into per-point positions and
//! colours. Generation is pure apart from the injected random source, so a
//! seeded source reproduces the same cloud.

/// Generation error type.
pub mod error;

/// Spiral arm placement, jitter and radial colour blending.
pub mod galaxy_generator;

/// Shared generation parameters, validation and render hints.
pub mod parameters;

/// Injectable uniform random source and the application RNG resource.
pub mod random_source;
