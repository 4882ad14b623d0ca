use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::render::mesh::MeshVertexBufferLayoutRef;
use bevy::render::render_resource::{
    AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
};
use bevy::{prelude::*, reflect::TypePath};
use constants::path::GALAXY_POINT_SHADER_PATH;

use crate::engine::generation::parameters::PointRenderHints;

/// Point sprite material for the galaxy cloud.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
#[bind_group_data(GalaxyPointMaterialKey)]
pub struct GalaxyPointMaterial {
    /// x: point size, y: size attenuation flag, z: vertex colour flag.
    #[uniform(0)]
    pub params: Vec4,
    pub alpha_mode: AlphaMode,
    pub depth_write: bool,
}

/// Pipeline variant key; depth writes are a pipeline property, not a uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GalaxyPointMaterialKey {
    depth_write: bool,
}

impl From<&GalaxyPointMaterial> for GalaxyPointMaterialKey {
    fn from(material: &GalaxyPointMaterial) -> Self {
        Self {
            depth_write: material.depth_write,
        }
    }
}

impl GalaxyPointMaterial {
    pub fn from_hints(hints: &PointRenderHints) -> Self {
        let flag = |enabled: bool| if enabled { 1.0 } else { 0.0 };
        Self {
            params: Vec4::new(
                hints.size,
                flag(hints.size_attenuation),
                flag(hints.vertex_colors),
                0.0,
            ),
            alpha_mode: if hints.additive_blending {
                AlphaMode::Add
            } else {
                AlphaMode::Blend
            },
            depth_write: hints.depth_write,
        }
    }
}

impl Material for GalaxyPointMaterial {
    fn vertex_shader() -> ShaderRef {
        GALAXY_POINT_SHADER_PATH.into()
    }

    fn fragment_shader() -> ShaderRef {
        GALAXY_POINT_SHADER_PATH.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
            Mesh::ATTRIBUTE_COLOR.at_shader_location(2),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];

        // Quads are generated facing the camera; winding is irrelevant.
        descriptor.primitive.cull_mode = None;

        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = key.bind_group_data.depth_write;
        }

        Ok(())
    }
}
