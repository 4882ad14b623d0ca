//! JSON-RPC 2.0 control channel for embedding the galaxy in a web page.
//!
//! On wasm the parent window posts requests into the iframe; responses and
//! notifications are posted back. Native builds run the same handlers with
//! no listener attached.
//!
//! ## Methods
//!
//! - `get_galaxy_parameters`: current values, slider ranges and seed
//! - `set_galaxy_parameter`: `{field, value, commit?}`; numbers are snapped
//!   and clamped, colours are `#rrggbb`. `commit: false` edits without
//!   rebuilding
//! - `regenerate_galaxy`: rebuild now, optionally from `{seed}`
//! - `get_fps`: current frame rate
//!
//! Requests without an `id` are executed but not answered. Unknown methods
//! return `-32601`, bad arguments `-32602`, unparsable messages `-32700`.
//!
//! ## Notifications
//!
//! - `galaxy_regenerated`: `{point_count, regeneration, source}`
//! - `galaxy_regeneration_failed`: `{field, message, source}`; the previous
//!   galaxy stays on screen
//! - `fps_update`: frame rate every half second

pub mod web_rpc;
