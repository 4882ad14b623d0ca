use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::reflect::TypePath;
use constants::path::GALAXY_PRESET_PATH;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::AppState;
use crate::engine::generation::error::GenerationError;
use crate::engine::generation::parameters::GalaxyParameters;
use crate::engine::generation::random_source::GalaxyRng;
use crate::engine::systems::regeneration::{CommitSource, GalaxyParametersCommitted};

/// Startup parameters read from `galaxy_preset.json`.
///
/// Missing fields fall back to the built-in defaults. A missing seed keeps
/// the entropy-seeded generator.
#[derive(Asset, TypePath, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyPreset {
    pub parameters: GalaxyParameters,
    pub seed: Option<u64>,
}

#[derive(Resource, Default)]
pub struct PresetLoader {
    handle: Option<Handle<GalaxyPreset>>,
}

/// Start the loading process
pub fn start_loading(mut preset_loader: ResMut<PresetLoader>, asset_server: Res<AssetServer>) {
    info!("Loading galaxy preset from: {}", GALAXY_PRESET_PATH);
    preset_loader.handle = Some(asset_server.load(GALAXY_PRESET_PATH));
}

/// Copy a preset into the live parameters and generator.
///
/// Presets that would not generate are rejected whole; the current values
/// stay in place.
pub fn apply_preset(
    preset: &GalaxyPreset,
    params: &mut GalaxyParameters,
    rng: &mut GalaxyRng,
) -> Result<(), GenerationError> {
    preset.parameters.validate()?;
    *params = preset.parameters.clone();
    if preset.seed.is_some() {
        rng.reseed(preset.seed);
    }
    Ok(())
}

/// Wait for the preset to resolve, apply it, then request the first galaxy.
///
/// A missing or unreadable preset is not fatal: defaults are used instead.
pub fn apply_preset_when_ready(
    preset_loader: Res<PresetLoader>,
    asset_server: Res<AssetServer>,
    presets: Res<Assets<GalaxyPreset>>,
    mut params: ResMut<GalaxyParameters>,
    mut rng: ResMut<GalaxyRng>,
    mut commits: EventWriter<GalaxyParametersCommitted>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = preset_loader.handle.as_ref() else {
        return;
    };

    if let Some(preset) = presets.get(handle) {
        match apply_preset(preset, &mut params, &mut rng) {
            Ok(()) => info!(
                "✓ Galaxy preset applied: {} points, {} branches, seed {:?}",
                params.count,
                params.branches,
                rng.seed()
            ),
            Err(error) => warn!("Galaxy preset ignored, using defaults: {}", error),
        }
    } else if let Some(LoadState::Failed(error)) = asset_server.get_load_state(handle) {
        warn!("Galaxy preset unavailable, using defaults: {}", error);
    } else {
        return;
    }

    commits.write(GalaxyParametersCommitted {
        source: CommitSource::Startup,
    });
    info!("→ Transitioning to Running state");
    next_state.set(AppState::Running);
}
