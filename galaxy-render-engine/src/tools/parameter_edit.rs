use bevy::color::Hue;
use bevy::prelude::*;
use constants::parameter_ranges::{
    BRANCHES_RANGE, COUNT_RANGE, ParameterRange, RADIUS_RANGE, RANDOMNESS_POWER_RANGE,
    RANDOMNESS_RANGE, SIZE_RANGE, SPIN_RANGE,
};
use constants::render_settings::{COARSE_STEP_MULTIPLIER, COLOR_HUE_STEP_DEGREES};
use thiserror::Error;

use crate::engine::generation::error::GenerationError;
use crate::engine::generation::parameters::{GalaxyParameters, hex_color};

/// Editable generation parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GalaxyParameterField {
    Count,
    Size,
    Radius,
    Branches,
    Spin,
    Randomness,
    RandomnessPower,
    InsideColor,
    OutsideColor,
}

impl GalaxyParameterField {
    /// Panel order.
    pub const ALL: [Self; 9] = [
        Self::Count,
        Self::Size,
        Self::Radius,
        Self::Branches,
        Self::Spin,
        Self::Randomness,
        Self::RandomnessPower,
        Self::InsideColor,
        Self::OutsideColor,
    ];

    /// Accepts the camelCase wire name or its snake_case spelling.
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "").as_str() {
            "count" => Some(Self::Count),
            "size" => Some(Self::Size),
            "radius" => Some(Self::Radius),
            "branches" => Some(Self::Branches),
            "spin" => Some(Self::Spin),
            "randomness" => Some(Self::Randomness),
            "randomnesspower" => Some(Self::RandomnessPower),
            "insidecolor" => Some(Self::InsideColor),
            "outsidecolor" => Some(Self::OutsideColor),
            _ => None,
        }
    }

    pub fn to_string(&self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Size => "size",
            Self::Radius => "radius",
            Self::Branches => "branches",
            Self::Spin => "spin",
            Self::Randomness => "randomness",
            Self::RandomnessPower => "randomnessPower",
            Self::InsideColor => "insideColor",
            Self::OutsideColor => "outsideColor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Size => "Size",
            Self::Radius => "Radius",
            Self::Branches => "Branches",
            Self::Spin => "Spin",
            Self::Randomness => "Randomness",
            Self::RandomnessPower => "Randomness power",
            Self::InsideColor => "Inside colour",
            Self::OutsideColor => "Outside colour",
        }
    }

    /// Slider bounds; `None` for colour fields.
    pub fn range(&self) -> Option<ParameterRange> {
        match self {
            Self::Count => Some(COUNT_RANGE),
            Self::Size => Some(SIZE_RANGE),
            Self::Radius => Some(RADIUS_RANGE),
            Self::Branches => Some(BRANCHES_RANGE),
            Self::Spin => Some(SPIN_RANGE),
            Self::Randomness => Some(RANDOMNESS_RANGE),
            Self::RandomnessPower => Some(RANDOMNESS_POWER_RANGE),
            Self::InsideColor | Self::OutsideColor => None,
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Value carried by an edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Number(f64),
    Color(Srgba),
}

impl ParameterValue {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Number(value) => serde_json::json!(value),
            Self::Color(color) => serde_json::json!(hex_color::to_hex(color)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterEditError {
    #[error("unknown parameter `{0}`")]
    UnknownField(String),
    #[error("parameter `{field}` expects {expected}")]
    WrongValueType {
        field: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Invalid(#[from] GenerationError),
}

/// Current value of `field`.
pub fn read_parameter(params: &GalaxyParameters, field: GalaxyParameterField) -> ParameterValue {
    use GalaxyParameterField as F;
    match field {
        F::Count => ParameterValue::Number(params.count as f64),
        F::Size => ParameterValue::Number(params.size as f64),
        F::Radius => ParameterValue::Number(params.radius as f64),
        F::Branches => ParameterValue::Number(params.branches as f64),
        F::Spin => ParameterValue::Number(params.spin as f64),
        F::Randomness => ParameterValue::Number(params.randomness as f64),
        F::RandomnessPower => ParameterValue::Number(params.randomness_power as f64),
        F::InsideColor => ParameterValue::Color(params.inside_color),
        F::OutsideColor => ParameterValue::Color(params.outside_color),
    }
}

fn write_number(params: &mut GalaxyParameters, field: GalaxyParameterField, value: f64) {
    use GalaxyParameterField as F;
    match field {
        F::Count => params.count = value.round() as usize,
        F::Size => params.size = value as f32,
        F::Radius => params.radius = value as f32,
        F::Branches => params.branches = value.round() as u32,
        F::Spin => params.spin = value as f32,
        F::Randomness => params.randomness = value as f32,
        F::RandomnessPower => params.randomness_power = value as f32,
        F::InsideColor | F::OutsideColor => {}
    }
}

/// Write one field the way a slider would: numbers are snapped to the step
/// and clamped to the range. Returns the value actually stored.
///
/// The edit is checked against validation before it lands, so a rejected
/// edit leaves `params` untouched.
pub fn apply_parameter_edit(
    params: &mut GalaxyParameters,
    field: GalaxyParameterField,
    value: ParameterValue,
) -> Result<ParameterValue, ParameterEditError> {
    let stored = match (field.range(), value) {
        (Some(range), ParameterValue::Number(raw)) => {
            if field == GalaxyParameterField::Count && raw < 0.0 {
                return Err(GenerationError::invalid("count", "must be non-negative").into());
            }
            ParameterValue::Number(range.clamp_and_snap(raw))
        }
        (None, ParameterValue::Color(color)) => ParameterValue::Color(color),
        (Some(_), ParameterValue::Color(_)) => {
            return Err(ParameterEditError::WrongValueType {
                field: field.to_string(),
                expected: "a number",
            });
        }
        (None, ParameterValue::Number(_)) => {
            return Err(ParameterEditError::WrongValueType {
                field: field.to_string(),
                expected: "a #rrggbb colour",
            });
        }
    };

    let mut candidate = params.clone();
    match stored {
        ParameterValue::Number(value) => write_number(&mut candidate, field, value),
        ParameterValue::Color(color) => match field {
            GalaxyParameterField::InsideColor => candidate.inside_color = color,
            _ => candidate.outside_color = color,
        },
    }
    candidate.validate()?;
    *params = candidate;

    Ok(stored)
}

/// One keyboard step on `field`: a slider step for numbers, a hue rotation
/// for colours. `coarse` multiplies the step.
pub fn nudge_parameter(
    params: &mut GalaxyParameters,
    field: GalaxyParameterField,
    direction: f64,
    coarse: bool,
) -> Result<ParameterValue, ParameterEditError> {
    let multiplier = if coarse { COARSE_STEP_MULTIPLIER } else { 1.0 };

    let value = match (read_parameter(params, field), field.range()) {
        (ParameterValue::Number(current), Some(range)) => {
            ParameterValue::Number(current + direction * range.step * multiplier)
        }
        (ParameterValue::Color(current), _) => {
            let degrees = direction as f32 * COLOR_HUE_STEP_DEGREES * multiplier as f32;
            ParameterValue::Color(rotate_hue(current, degrees))
        }
        (ParameterValue::Number(_), None) => return Ok(read_parameter(params, field)),
    };

    apply_parameter_edit(params, field, value)
}

fn rotate_hue(color: Srgba, degrees: f32) -> Srgba {
    let hsla = Hsla::from(color);
    Srgba::from(hsla.with_hue((hsla.hue + degrees).rem_euclid(360.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_round_trip() {
        for field in GalaxyParameterField::ALL {
            assert_eq!(GalaxyParameterField::from_string(field.to_string()), Some(field));
        }
        assert_eq!(
            GalaxyParameterField::from_string("randomness_power"),
            Some(GalaxyParameterField::RandomnessPower)
        );
        assert_eq!(GalaxyParameterField::from_string("arms"), None);
    }

    #[test]
    fn selection_wraps() {
        assert_eq!(
            GalaxyParameterField::OutsideColor.next(),
            GalaxyParameterField::Count
        );
        assert_eq!(
            GalaxyParameterField::Count.previous(),
            GalaxyParameterField::OutsideColor
        );
    }

    #[test]
    fn numeric_edits_snap_and_clamp() {
        let mut params = GalaxyParameters::default();

        let stored = apply_parameter_edit(
            &mut params,
            GalaxyParameterField::Count,
            ParameterValue::Number(1_249.0),
        )
        .unwrap();
        assert_eq!(stored, ParameterValue::Number(1_200.0));
        assert_eq!(params.count, 1_200);

        apply_parameter_edit(
            &mut params,
            GalaxyParameterField::Branches,
            ParameterValue::Number(1.0),
        )
        .unwrap();
        assert_eq!(params.branches, 2);

        apply_parameter_edit(
            &mut params,
            GalaxyParameterField::Radius,
            ParameterValue::Number(500.0),
        )
        .unwrap();
        assert_eq!(params.radius, 20.0);
    }

    #[test]
    fn negative_count_rejected() {
        let mut params = GalaxyParameters::default();
        let err = apply_parameter_edit(
            &mut params,
            GalaxyParameterField::Count,
            ParameterValue::Number(-5.0),
        )
        .unwrap_err();

        assert!(matches!(err, ParameterEditError::Invalid(ref e) if e.field() == "count"));
        assert_eq!(params, GalaxyParameters::default());
    }

    #[test]
    fn mismatched_value_type_rejected() {
        let mut params = GalaxyParameters::default();

        assert!(matches!(
            apply_parameter_edit(
                &mut params,
                GalaxyParameterField::Spin,
                ParameterValue::Color(Srgba::WHITE)
            ),
            Err(ParameterEditError::WrongValueType { field: "spin", .. })
        ));
        assert!(matches!(
            apply_parameter_edit(
                &mut params,
                GalaxyParameterField::InsideColor,
                ParameterValue::Number(1.0)
            ),
            Err(ParameterEditError::WrongValueType { .. })
        ));
    }

    #[test]
    fn colour_edit_sets_field() {
        let mut params = GalaxyParameters::default();
        let blue = Srgba::rgb_u8(0, 0, 255);

        apply_parameter_edit(
            &mut params,
            GalaxyParameterField::OutsideColor,
            ParameterValue::Color(blue),
        )
        .unwrap();

        assert_eq!(params.outside_color, blue);
        assert_eq!(params.inside_color, GalaxyParameters::default().inside_color);
    }

    #[test]
    fn nudges_step_by_range() {
        let mut params = GalaxyParameters::default();

        nudge_parameter(&mut params, GalaxyParameterField::Branches, 1.0, false).unwrap();
        assert_eq!(params.branches, 4);

        nudge_parameter(&mut params, GalaxyParameterField::Branches, 1.0, true).unwrap();
        assert_eq!(params.branches, 14);

        // Default count sits at the top of its range.
        nudge_parameter(&mut params, GalaxyParameterField::Count, 1.0, false).unwrap();
        assert_eq!(params.count, 100_000);
        nudge_parameter(&mut params, GalaxyParameterField::Count, -1.0, false).unwrap();
        assert_eq!(params.count, 99_900);
    }

    #[test]
    fn colour_nudge_rotates_hue() {
        let mut params = GalaxyParameters::default();
        let before = Hsla::from(params.inside_color);

        nudge_parameter(&mut params, GalaxyParameterField::InsideColor, 1.0, false).unwrap();
        let after = Hsla::from(params.inside_color);

        let delta = (after.hue - before.hue).rem_euclid(360.0);
        assert!((delta - COLOR_HUE_STEP_DEGREES).abs() < 0.5);
        assert!((after.saturation - before.saturation).abs() < 0.01);
    }
}
