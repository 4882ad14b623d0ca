/// Optional parameter preset loaded at startup.
pub const GALAXY_PRESET_PATH: &str = "galaxy_preset.json";

/// Vertex and fragment shader for galaxy points.
pub const GALAXY_POINT_SHADER_PATH: &str = "shaders/galaxy_points.wgsl";
