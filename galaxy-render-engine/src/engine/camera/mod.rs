//! Orbit camera for inspecting the galaxy.
//!
//! Left-drag rotates around the origin and the wheel zooms, both with
//! damping so motion eases out after input stops.

/// Orbit camera resource and controller system.
pub mod orbit_camera;
