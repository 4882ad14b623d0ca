use bevy::prelude::*;

use crate::engine::generation::error::GenerationError;
use crate::engine::generation::parameters::GalaxyParameters;
use crate::engine::generation::random_source::GalaxyRng;
use crate::engine::lifecycle::bevy_scene::{ActiveGalaxy, BevyGalaxyScene};
use crate::engine::render::galaxy_material::GalaxyPointMaterial;

/// Where a parameter commit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitSource {
    Startup,
    ControlPanel,
    Rpc,
}

impl CommitSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::ControlPanel => "control_panel",
            Self::Rpc => "rpc",
        }
    }
}

/// Fired when a control finishes changing a parameter, not on every
/// intermediate value.
#[derive(Event, Debug, Clone, Copy)]
pub struct GalaxyParametersCommitted {
    pub source: CommitSource,
}

/// Result of one regeneration pass.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum GalaxyRegenerationOutcome {
    Regenerated {
        point_count: usize,
        regeneration: u64,
        source: CommitSource,
    },
    Failed {
        error: GenerationError,
        source: CommitSource,
    },
}

/// Rebuild the galaxy from the current parameters whenever a commit arrives.
///
/// Commits are drained as a batch: several in one frame produce a single
/// regeneration from the latest parameter values.
pub fn regenerate_galaxy_on_commit(
    mut commits: EventReader<GalaxyParametersCommitted>,
    mut outcomes: EventWriter<GalaxyRegenerationOutcome>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<GalaxyPointMaterial>>,
    mut active: ResMut<ActiveGalaxy>,
    mut rng: ResMut<GalaxyRng>,
    params: Res<GalaxyParameters>,
) {
    let Some(source) = commits.read().last().map(|commit| commit.source) else {
        return;
    };

    let mut scene = BevyGalaxyScene {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
    };

    let result = active
        .regenerate(&params, &mut *rng, &mut scene)
        .map(|handle| handle.point_count);

    match result {
        Ok(point_count) => {
            let regeneration = active.regenerations();
            info!(
                "Galaxy regenerated ({}): {} points, regeneration #{}",
                source.as_str(),
                point_count,
                regeneration
            );
            outcomes.write(GalaxyRegenerationOutcome::Regenerated {
                point_count,
                regeneration,
                source,
            });
        }
        Err(error) => {
            warn!(
                "Galaxy regeneration rejected ({}): {}",
                source.as_str(),
                error
            );
            outcomes.write(GalaxyRegenerationOutcome::Failed { error, source });
        }
    }
}
