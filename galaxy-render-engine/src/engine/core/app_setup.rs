// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::render::camera::PerspectiveProjection;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_START_POSITION, CLEAR_COLOR,
};

// Crate engine modules
use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller};
use crate::engine::core::app_state::AppState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::generation::parameters::GalaxyParameters;
use crate::engine::generation::random_source::GalaxyRng;
use crate::engine::lifecycle::bevy_scene::ActiveGalaxy;
use crate::engine::loading::preset_loader::{
    GalaxyPreset, PresetLoader, apply_preset_when_ready, start_loading,
};
use crate::engine::render::galaxy_material::GalaxyPointMaterial;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::regeneration::{
    GalaxyParametersCommitted, GalaxyRegenerationOutcome, regenerate_galaxy_on_commit,
};

// Crate tools modules
use crate::tools::control_panel::{ControlPanel, record_regeneration_outcome};

// Web RPC
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;
#[cfg(not(target_arch = "wasm32"))]
use crate::tools::control_panel::{
    control_panel_keyboard_system, control_panel_text_update_system, spawn_control_panel_overlay,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Additive, depth-write-free materials skip the prepass and shadow passes.
        .add_plugins(MaterialPlugin::<GalaxyPointMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers GalaxyPreset as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<GalaxyPreset>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(CLEAR_COLOR));

    // Initialise resources early
    app.init_resource::<GalaxyParameters>()
        .init_resource::<GalaxyRng>()
        .init_resource::<ActiveGalaxy>()
        .init_resource::<PresetLoader>()
        .init_resource::<ControlPanel>()
        .add_event::<GalaxyParametersCommitted>()
        .add_event::<GalaxyRegenerationOutcome>();

    // State-based system scheduling
    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            apply_preset_when_ready.run_if(in_state(AppState::Loading)),
        );

    // Regeneration runs in every state so the startup commit is never missed.
    app.add_systems(
        Update,
        (regenerate_galaxy_on_commit, record_regeneration_outcome).chain(),
    );

    app.add_systems(
        Update,
        (camera_controller, fps_notification_system).run_if(in_state(AppState::Running)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            control_panel_keyboard_system
                .before(regenerate_galaxy_on_commit)
                .run_if(in_state(AppState::Running)),
        )
        .add_systems(
            Update,
            (fps_text_update_system, control_panel_text_update_system)
                .after(record_regeneration_outcome),
        );
    }

    app
}

fn spawn_camera(commands: &mut Commands) {
    let orbit = OrbitCamera::looking_at(CAMERA_START_POSITION, Vec3::ZERO);
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        orbit.transform(),
    ));
    commands.insert_resource(orbit);
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    info!("=== GALAXY GENERATOR ===");
    spawn_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });

    spawn_control_panel_overlay(commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
