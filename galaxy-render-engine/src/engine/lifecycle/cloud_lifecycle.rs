use crate::engine::generation::error::GenerationError;
use crate::engine::generation::galaxy_generator::{GalaxyPointCloud, generate_validated};
use crate::engine::generation::parameters::{GalaxyParameters, PointRenderHints};
use crate::engine::generation::random_source::RandomSource;

/// Renderer-side owner of installed point clouds.
pub trait GalaxyScene {
    /// Ties together every renderer resource created by one install.
    type Handle;

    /// Create geometry and material for `cloud` and attach them to the scene.
    /// The scene owns the arrays from here on.
    fn install(&mut self, cloud: GalaxyPointCloud, hints: PointRenderHints) -> Self::Handle;

    /// Release the geometry and material behind `handle` and detach it.
    fn dispose(&mut self, handle: Self::Handle);
}

/// Keeps at most one point cloud live in a scene.
#[derive(Debug)]
pub struct CloudLifecycleManager<H> {
    active: Option<H>,
    regenerations: u64,
}

impl<H> Default for CloudLifecycleManager<H> {
    fn default() -> Self {
        Self {
            active: None,
            regenerations: 0,
        }
    }
}

impl<H> CloudLifecycleManager<H> {
    pub fn active(&self) -> Option<&H> {
        self.active.as_ref()
    }

    /// Number of successful regenerations so far.
    pub fn regenerations(&self) -> u64 {
        self.regenerations
    }

    /// Replace the live cloud with one generated from `params`.
    ///
    /// Parameters are validated before anything is touched: on error the
    /// previous cloud stays installed. Otherwise the previous cloud is disposed
    /// before the new one is generated and installed.
    pub fn regenerate<S, R>(
        &mut self,
        params: &GalaxyParameters,
        source: &mut R,
        scene: &mut S,
    ) -> Result<&H, GenerationError>
    where
        S: GalaxyScene<Handle = H> + ?Sized,
        R: RandomSource + ?Sized,
    {
        let validated = params.validate()?;

        if let Some(previous) = self.active.take() {
            scene.dispose(previous);
        }

        let cloud = generate_validated(validated, source);
        let handle = scene.install(cloud, params.render_hints());
        self.regenerations += 1;

        Ok(self.active.insert(handle))
    }
}
