//! Control surfaces for the galaxy parameters.
//!
//! Both surfaces write the shared `GalaxyParameters` resource through the
//! same edit rules and request regeneration with a commit event once an
//! edit is finished.
//!
//! ## Keyboard panel (native builds)
//!
//! A text overlay lists every parameter with its current value:
//! - `[` / `]` move the selection
//! - holding `↑` / `↓` steps the selected value, `Shift` multiplies the step
//! - colour fields rotate their hue instead of stepping
//! - releasing the arrow key commits, `R` reseeds and regenerates
//!
//! ## RPC (WASM builds)
//!
//! The React frontend edits parameters with `set_galaxy_parameter`; see
//! `crate::rpc` for the method list.
//!
//! ## Edit rules
//!
//! ```text
//! raw value
//!   └─> snap to slider step, clamp to slider range
//!       └─> validate candidate parameters
//!           ├─> ok: write resource
//!           └─> error: resource untouched
//! ```

/// Native keyboard panel, overlay text and outcome reporting.
pub mod control_panel;

/// Field catalogue, slider ranges and the edit operations shared by every
/// control surface.
pub mod parameter_edit;
