use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;

use super::cloud_lifecycle::{CloudLifecycleManager, GalaxyScene};
use crate::engine::generation::galaxy_generator::GalaxyPointCloud;
use crate::engine::generation::parameters::PointRenderHints;
use crate::engine::mesh::galaxy_point_mesh::{GalaxyPoints, create_galaxy_point_mesh};
use crate::engine::render::galaxy_material::GalaxyPointMaterial;

/// Everything one installed galaxy owns in the Bevy world.
#[derive(Debug, Clone)]
pub struct GalaxyHandle {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<GalaxyPointMaterial>,
    pub point_count: usize,
}

/// The single live galaxy and its regeneration counter.
#[derive(Resource, Default, Deref, DerefMut)]
pub struct ActiveGalaxy(pub CloudLifecycleManager<GalaxyHandle>);

/// Scene adapter over the Bevy world for one regeneration.
pub struct BevyGalaxyScene<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<GalaxyPointMaterial>,
}

impl GalaxyScene for BevyGalaxyScene<'_, '_, '_> {
    type Handle = GalaxyHandle;

    fn install(&mut self, cloud: GalaxyPointCloud, hints: PointRenderHints) -> GalaxyHandle {
        let point_count = cloud.len();
        let mesh = self.meshes.add(create_galaxy_point_mesh(&cloud));
        let material = self.materials.add(GalaxyPointMaterial::from_hints(&hints));

        let entity = self
            .commands
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::IDENTITY,
                Visibility::Visible,
                GalaxyPoints { point_count },
                NotShadowCaster,
                // Quads extend past the mesh AABB computed from point centres.
                NoFrustumCulling,
            ))
            .id();

        GalaxyHandle {
            entity,
            mesh,
            material,
            point_count,
        }
    }

    fn dispose(&mut self, handle: GalaxyHandle) {
        self.meshes.remove(&handle.mesh);
        self.materials.remove(&handle.material);
        self.commands.entity(handle.entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use bevy::asset::AssetPlugin;
    use bevy::ecs::system::RunSystemOnce;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::engine::generation::parameters::GalaxyParameters;

    #[derive(Resource)]
    struct TestRng(StdRng);

    fn regenerate(
        mut commands: Commands,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<GalaxyPointMaterial>>,
        mut active: ResMut<ActiveGalaxy>,
        mut rng: ResMut<TestRng>,
        params: Res<GalaxyParameters>,
    ) {
        let mut scene = BevyGalaxyScene {
            commands: &mut commands,
            meshes: &mut meshes,
            materials: &mut materials,
        };
        // Invalid parameters are exercised by the lifecycle tests.
        let _ = active.regenerate(&params, &mut rng.0, &mut scene);
    }

    fn test_app(count: usize) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Mesh>()
            .init_asset::<GalaxyPointMaterial>()
            .init_resource::<ActiveGalaxy>()
            .insert_resource(TestRng(StdRng::seed_from_u64(9)))
            .insert_resource(GalaxyParameters {
                count,
                ..default()
            });
        app
    }

    fn galaxy_entity_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&GalaxyPoints>().iter(world).count()
    }

    #[test]
    fn regenerating_replaces_entity_and_assets() {
        let mut app = test_app(64);

        for _ in 0..5 {
            app.world_mut().run_system_once(regenerate).unwrap();
        }

        assert_eq!(galaxy_entity_count(&mut app), 1);
        assert_eq!(app.world().resource::<Assets<Mesh>>().len(), 1);
        assert_eq!(
            app.world()
                .resource::<Assets<GalaxyPointMaterial>>()
                .len(),
            1
        );

        let active = app.world().resource::<ActiveGalaxy>();
        assert_eq!(active.regenerations(), 5);
        let handle = active.active().unwrap();
        assert_eq!(handle.point_count, 64);
    }

    #[test]
    fn failed_regeneration_leaves_entity_in_place() {
        let mut app = test_app(16);
        app.world_mut().run_system_once(regenerate).unwrap();
        let before = app.world().resource::<ActiveGalaxy>().active().unwrap().entity;

        app.world_mut().resource_mut::<GalaxyParameters>().branches = 0;
        app.world_mut().run_system_once(regenerate).unwrap();

        assert_eq!(galaxy_entity_count(&mut app), 1);
        let after = app.world().resource::<ActiveGalaxy>().active().unwrap().entity;
        assert_eq!(before, after);
        assert!(app.world().get_entity(after).is_ok());
    }
}
