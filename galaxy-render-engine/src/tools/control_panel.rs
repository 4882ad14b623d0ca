use bevy::prelude::*;
use constants::render_settings::OVERLAY_FONT_SIZE;

use super::parameter_edit::{GalaxyParameterField, ParameterValue, nudge_parameter, read_parameter};
use crate::engine::generation::parameters::{GalaxyParameters, hex_color};
use crate::engine::generation::random_source::GalaxyRng;
use crate::engine::lifecycle::bevy_scene::ActiveGalaxy;
use crate::engine::systems::regeneration::{
    CommitSource, GalaxyParametersCommitted, GalaxyRegenerationOutcome,
};

/// Keyboard panel state. Holding an arrow key edits the selected field
/// continuously; the galaxy is rebuilt once the key is released.
#[derive(Resource, Debug)]
pub struct ControlPanel {
    pub selected: GalaxyParameterField,
    pub editing: bool,
    pub last_error: Option<String>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selected: GalaxyParameterField::Count,
            editing: false,
            last_error: None,
        }
    }
}

#[derive(Component)]
pub struct ControlPanelText;

/// Handle panel shortcuts:
/// - `[` / `]` select the previous / next field
/// - `↑` / `↓` held: step the selected field, `Shift` for coarse steps
/// - releasing the arrow commits the edit
/// - `R` reseeds the generator and regenerates
pub fn control_panel_keyboard_system(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<ControlPanel>,
    mut params: ResMut<GalaxyParameters>,
    mut rng: ResMut<GalaxyRng>,
    mut commits: EventWriter<GalaxyParametersCommitted>,
) {
    if keyboard.just_pressed(KeyCode::BracketRight) {
        panel.selected = panel.selected.next();
    }
    if keyboard.just_pressed(KeyCode::BracketLeft) {
        panel.selected = panel.selected.previous();
    }

    let direction = match (
        keyboard.pressed(KeyCode::ArrowUp),
        keyboard.pressed(KeyCode::ArrowDown),
    ) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    };

    if direction != 0.0 {
        let coarse = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
        let field = panel.selected;
        match nudge_parameter(&mut params, field, direction, coarse) {
            Ok(_) => {
                panel.editing = true;
                panel.last_error = None;
            }
            Err(error) => {
                warn!("Rejected edit of {}: {}", field.to_string(), error);
                panel.last_error = Some(error.to_string());
            }
        }
    } else if panel.editing {
        panel.editing = false;
        commits.write(GalaxyParametersCommitted {
            source: CommitSource::ControlPanel,
        });
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        rng.reseed(None);
        info!("Galaxy generator reseeded from entropy");
        commits.write(GalaxyParametersCommitted {
            source: CommitSource::ControlPanel,
        });
    }
}

/// Surface regeneration failures on the panel.
pub fn record_regeneration_outcome(
    mut outcomes: EventReader<GalaxyRegenerationOutcome>,
    mut panel: ResMut<ControlPanel>,
) {
    for outcome in outcomes.read() {
        panel.last_error = match outcome {
            GalaxyRegenerationOutcome::Regenerated { .. } => None,
            GalaxyRegenerationOutcome::Failed { error, .. } => Some(error.to_string()),
        };
    }
}

pub fn spawn_control_panel_overlay(commands: &mut Commands) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: OVERLAY_FONT_SIZE,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        ControlPanelText,
    ));
}

pub fn control_panel_text_update_system(
    panel: Res<ControlPanel>,
    params: Res<GalaxyParameters>,
    active: Res<ActiveGalaxy>,
    rng: Res<GalaxyRng>,
    mut query: Query<&mut Text, With<ControlPanelText>>,
) {
    if !(panel.is_changed() || params.is_changed() || active.is_changed() || rng.is_changed()) {
        return;
    }

    let live_points = active.active().map_or(0, |handle| handle.point_count);
    let content = render_panel(&panel, &params, live_points, rng.seed());
    for mut text in &mut query {
        text.0.clone_from(&content);
    }
}

/// Panel text: one row per field, the selection marked with `>`.
pub fn render_panel(
    panel: &ControlPanel,
    params: &GalaxyParameters,
    live_points: usize,
    seed: Option<u64>,
) -> String {
    let mut lines = Vec::with_capacity(GalaxyParameterField::ALL.len() + 4);

    for field in GalaxyParameterField::ALL {
        let marker = if field == panel.selected { ">" } else { " " };
        let value = match read_parameter(params, field) {
            ParameterValue::Number(value) => format_number(field, value),
            ParameterValue::Color(color) => hex_color::to_hex(&color),
        };
        let range = field.range().map_or_else(String::new, |range| {
            format!(
                "  [{}, {}]",
                format_number(field, range.min),
                format_number(field, range.max)
            )
        });
        lines.push(format!("{marker} {:<17} {value:>8}{range}", field.label()));
    }

    lines.push(String::new());
    let seed = seed.map_or_else(|| "random".to_string(), |seed| seed.to_string());
    lines.push(format!("Live points: {live_points}  Seed: {seed}"));
    if panel.editing {
        lines.push("Editing, release to regenerate".to_string());
    }
    if let Some(error) = &panel.last_error {
        lines.push(format!("Error: {error}"));
    }
    lines.push("[ ] select  Up/Down edit  Shift coarse  R reseed".to_string());

    lines.join("\n")
}

fn format_number(field: GalaxyParameterField, value: f64) -> String {
    match field {
        GalaxyParameterField::Count | GalaxyParameterField::Branches => format!("{value:.0}"),
        _ => format!("{value:.3}"),
    }
}
