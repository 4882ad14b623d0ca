use bevy::prelude::*;

/// Loading covers the preset read; the galaxy is first generated on the
/// transition to Running.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(Component)]
pub struct FpsText;
