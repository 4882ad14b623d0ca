//! Mesh generation for galaxy point rendering.
//!
//! Each point becomes a six-vertex quad whose corners are expanded in the
//! vertex shader, so a plain triangle list carries the whole cloud.

/// Galaxy point mesh construction and the marker component for its entity.
pub mod galaxy_point_mesh;
