//! Material binding the galaxy point shader.
//!
//! Additive blending, no depth writes and per-vertex colour are expressed as
//! material state and pipeline specialisation rather than a custom render
//! phase.

/// Point sprite material and its pipeline key.
pub mod galaxy_material;
