use bevy::color::Color;
use bevy::math::Vec3;

pub const CLEAR_COLOR: Color = Color::BLACK;

/// Initial camera eye position, looking at the origin.
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(3.0, 3.0, 3.0);
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

/// Fraction of the remaining orbit delta applied per 1/60 s.
pub const ORBIT_DAMPING: f32 = 0.1;
pub const ORBIT_ROTATE_SENSITIVITY: f32 = 0.005;
pub const ORBIT_ZOOM_SENSITIVITY: f32 = 0.1;
pub const ORBIT_MIN_DISTANCE: f32 = 0.5;
pub const ORBIT_MAX_DISTANCE: f32 = 60.0;

/// Keeps the orbit camera off the poles where yaw degenerates.
pub const ORBIT_PITCH_LIMIT: f32 = 1.55;

/// Hue rotation per control panel step on colour fields.
pub const COLOR_HUE_STEP_DEGREES: f32 = 5.0;

/// Step multiplier while shift is held in the keyboard panel.
pub const COARSE_STEP_MULTIPLIER: f64 = 10.0;

pub const OVERLAY_FONT_SIZE: f32 = 14.0;
