//! Startup preset loading.
//!
//! Reads the optional galaxy preset through the asset server, applies it to
//! the live parameters and seeds, then hands over to the running state with
//! an initial regeneration request.

/// Galaxy preset asset, loader resource and the systems applying it.
pub mod preset_loader;
