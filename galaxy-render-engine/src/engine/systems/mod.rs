//! Runtime systems driving regeneration and diagnostics.
//!
//! Regeneration reacts to parameter commits from any control surface and
//! reports each outcome as an event; FPS tracking feeds the native overlay
//! and the RPC frontend.

/// FPS tracking and notification systems for performance monitoring.
///
/// Sends frame rate updates to frontend via RPC and updates native UI overlays.
pub mod fps_tracking;

/// Commit events, regeneration outcomes and the system connecting them to
/// the galaxy lifecycle.
pub mod regeneration;
