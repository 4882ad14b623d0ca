/// Number of points generated on startup.
pub const DEFAULT_COUNT: usize = 100_000;

/// Rendered point size in world units.
pub const DEFAULT_SIZE: f32 = 0.01;

/// Maximum galactic radius.
pub const DEFAULT_RADIUS: f32 = 5.0;

/// Number of spiral arms.
pub const DEFAULT_BRANCHES: u32 = 3;

/// Radians of twist per unit radius.
pub const DEFAULT_SPIN: f32 = 1.0;

/// Scale of per-axis positional jitter.
pub const DEFAULT_RANDOMNESS: f32 = 0.2;

/// Exponent sharpening the jitter distribution toward zero.
pub const DEFAULT_RANDOMNESS_POWER: f32 = 3.0;

/// Colour at the galactic centre, sRGB `#ff6030`.
pub const DEFAULT_INSIDE_COLOR: [u8; 3] = [0xff, 0x60, 0x30];

/// Colour at the rim, sRGB `#1b3984`.
pub const DEFAULT_OUTSIDE_COLOR: [u8; 3] = [0x1b, 0x39, 0x84];
