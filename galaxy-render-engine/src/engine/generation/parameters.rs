use bevy::prelude::*;
use constants::galaxy_defaults::{
    DEFAULT_BRANCHES, DEFAULT_COUNT, DEFAULT_INSIDE_COLOR, DEFAULT_OUTSIDE_COLOR, DEFAULT_RADIUS,
    DEFAULT_RANDOMNESS, DEFAULT_RANDOMNESS_POWER, DEFAULT_SIZE, DEFAULT_SPIN,
};
use constants::parameter_ranges::COUNT_RANGE;
use serde::{Deserialize, Serialize};

use super::error::GenerationError;

/// Shared generation parameters. Written by the control surfaces, read on every
/// regeneration. Field names serialise in camelCase to match preset files.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalaxyParameters {
    pub count: usize,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    #[serde(with = "hex_color")]
    pub inside_color: Srgba,
    #[serde(with = "hex_color")]
    pub outside_color: Srgba,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        let [ir, ig, ib] = DEFAULT_INSIDE_COLOR;
        let [or, og, ob] = DEFAULT_OUTSIDE_COLOR;
        Self {
            count: DEFAULT_COUNT,
            size: DEFAULT_SIZE,
            radius: DEFAULT_RADIUS,
            branches: DEFAULT_BRANCHES,
            spin: DEFAULT_SPIN,
            randomness: DEFAULT_RANDOMNESS,
            randomness_power: DEFAULT_RANDOMNESS_POWER,
            inside_color: Srgba::rgb_u8(ir, ig, ib),
            outside_color: Srgba::rgb_u8(or, og, ob),
        }
    }
}

impl GalaxyParameters {
    /// Check every field against its domain. A zero radius is accepted and
    /// collapses the galaxy onto the origin. Counts are capped at the slider
    /// maximum.
    pub fn validate(&self) -> Result<ValidatedParameters<'_>, GenerationError> {
        if !COUNT_RANGE.contains(self.count as f64) {
            return Err(GenerationError::invalid(
                "count",
                format!("must be at most {}, got {}", COUNT_RANGE.max, self.count),
            ));
        }
        if self.branches < 1 {
            return Err(GenerationError::invalid("branches", "must be at least 1"));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(GenerationError::invalid(
                "radius",
                format!("must be a finite non-negative number, got {}", self.radius),
            ));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(GenerationError::invalid(
                "size",
                format!("must be a finite positive number, got {}", self.size),
            ));
        }
        if !self.spin.is_finite() {
            return Err(GenerationError::invalid("spin", "must be finite"));
        }
        if !self.randomness.is_finite() || self.randomness < 0.0 {
            return Err(GenerationError::invalid(
                "randomness",
                format!("must be a finite non-negative number, got {}", self.randomness),
            ));
        }
        if !self.randomness_power.is_finite() || self.randomness_power <= 0.0 {
            return Err(GenerationError::invalid(
                "randomnessPower",
                format!(
                    "must be a finite positive number, got {}",
                    self.randomness_power
                ),
            ));
        }

        Ok(ValidatedParameters(self))
    }

    /// Rendering hints handed to the scene alongside the generated arrays.
    pub fn render_hints(&self) -> PointRenderHints {
        PointRenderHints {
            size: self.size,
            ..default()
        }
    }
}

/// Parameters that passed [`GalaxyParameters::validate`]. Only obtainable
/// through validation, so generation from it cannot fail.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedParameters<'a>(&'a GalaxyParameters);

impl<'a> ValidatedParameters<'a> {
    pub fn get(&self) -> &'a GalaxyParameters {
        self.0
    }
}

/// Point material configuration. Not used by generation math.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointRenderHints {
    pub size: f32,
    pub size_attenuation: bool,
    pub additive_blending: bool,
    pub depth_write: bool,
    pub vertex_colors: bool,
}

impl Default for PointRenderHints {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            size_attenuation: true,
            additive_blending: true,
            depth_write: false,
            vertex_colors: true,
        }
    }
}

/// `#rrggbb` (de)serialisation for sRGB colours.
pub mod hex_color {
    use bevy::color::{ColorToPacked, Srgba};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Srgba, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Srgba, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<Srgba, String> {
        Srgba::hex(raw.trim()).map_err(|err| format!("invalid colour `{raw}`: {err}"))
    }

    /// Lowercase `#rrggbb`, alpha dropped.
    pub fn to_hex(color: &Srgba) -> String {
        let [r, g, b, _] = color.to_u8_array();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = GalaxyParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(hex_color::to_hex(&params.inside_color), "#ff6030");
        assert_eq!(hex_color::to_hex(&params.outside_color), "#1b3984");
    }

    #[test]
    fn zero_branches_rejected() {
        let params = GalaxyParameters {
            branches: 0,
            ..default()
        };
        let err = params.validate().unwrap_err();
        assert_eq!(err.field(), "branches");
    }

    #[test]
    fn count_above_slider_maximum_rejected() {
        let at_limit = GalaxyParameters {
            count: COUNT_RANGE.max as usize,
            ..default()
        };
        assert!(at_limit.validate().is_ok());

        let oversized = GalaxyParameters {
            count: 1_000_000_000_000,
            ..default()
        };
        assert_eq!(oversized.validate().unwrap_err().field(), "count");
    }

    #[test]
    fn negative_radius_rejected_but_zero_accepted() {
        let negative = GalaxyParameters {
            radius: -1.0,
            ..default()
        };
        assert_eq!(negative.validate().unwrap_err().field(), "radius");

        let zero = GalaxyParameters {
            radius: 0.0,
            ..default()
        };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn non_positive_power_and_size_rejected() {
        let power = GalaxyParameters {
            randomness_power: 0.0,
            ..default()
        };
        assert_eq!(power.validate().unwrap_err().field(), "randomnessPower");

        let size = GalaxyParameters {
            size: 0.0,
            ..default()
        };
        assert_eq!(size.validate().unwrap_err().field(), "size");

        let randomness = GalaxyParameters {
            randomness: f32::NAN,
            ..default()
        };
        assert_eq!(randomness.validate().unwrap_err().field(), "randomness");
    }

    #[test]
    fn preset_json_uses_camel_case_and_hex() {
        let json = r##"{
            "count": 4,
            "radius": 1.0,
            "branches": 2,
            "randomnessPower": 1.5,
            "insideColor": "#ff0000",
            "outsideColor": "#0000FF"
        }"##;
        let params: GalaxyParameters = serde_json::from_str(json).unwrap();

        assert_eq!(params.count, 4);
        assert_eq!(params.branches, 2);
        assert_eq!(params.randomness_power, 1.5);
        // Missing fields fall back to defaults.
        assert_eq!(params.size, DEFAULT_SIZE);
        assert_eq!(params.inside_color, Srgba::rgb_u8(255, 0, 0));
        assert_eq!(params.outside_color, Srgba::rgb_u8(0, 0, 255));

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["insideColor"], "#ff0000");
        assert_eq!(value["randomnessPower"], 1.5);
    }

    #[test]
    fn bad_hex_fails_deserialisation() {
        let json = r#"{ "insideColor": "not-a-colour" }"#;
        assert!(serde_json::from_str::<GalaxyParameters>(json).is_err());
    }

    #[test]
    fn render_hints_pass_size_through() {
        let params = GalaxyParameters {
            size: 0.05,
            ..default()
        };
        let hints = params.render_hints();
        assert_eq!(hints.size, 0.05);
        assert!(hints.additive_blending);
        assert!(!hints.depth_write);
    }
}
