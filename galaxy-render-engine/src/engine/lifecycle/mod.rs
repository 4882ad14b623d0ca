//! Ownership of the live galaxy and its renderer resources.
//!
//! At most one point cloud is installed at a time. Regeneration disposes the
//! previous cloud's geometry, material and scene node before installing the
//! next one, and leaves it untouched when the new parameters are rejected.

/// Bevy implementation of the scene seam: mesh and material assets plus a
/// spawned entity per galaxy.
pub mod bevy_scene;

/// Renderer-agnostic lifecycle manager and the scene trait it drives.
pub mod cloud_lifecycle;
