//! Shared constants for the galaxy generator workspace.
//!
//! Default generation parameters, control panel ranges, render settings and
//! asset paths live here so the engine and any tooling agree on them.

/// Default galaxy generation parameters.
pub mod galaxy_defaults;

/// Numeric ranges and steps the control surfaces bind each parameter to.
pub mod parameter_ranges;

/// Asset paths relative to the Bevy asset folder.
pub mod path;

/// Camera, clear colour and point rendering settings.
pub mod render_settings;
