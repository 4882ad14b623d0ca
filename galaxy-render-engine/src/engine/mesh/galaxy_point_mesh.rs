use bevy::color::ColorToComponents;
use bevy::prelude::*;
use bevy::{render::mesh::PrimitiveTopology, render::render_asset::RenderAssetUsages};

use crate::engine::generation::galaxy_generator::GalaxyPointCloud;

/// Two triangles per point, expanded into a camera-facing quad by the vertex shader.
pub const VERTICES_PER_POINT: usize = 6;

/// Quad corner offsets in units of half the point size.
const QUAD_CORNERS: [[f32; 2]; VERTICES_PER_POINT] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [1.0, 1.0],
    [-1.0, -1.0],
    [1.0, 1.0],
    [-1.0, 1.0],
];

/// Marker and stats for the entity carrying the live galaxy.
#[derive(Component, Debug, Clone, Copy)]
pub struct GalaxyPoints {
    pub point_count: usize,
}

/// Build the vertex buffer for `cloud`. Every vertex of a quad repeats the
/// point centre and colour; the UV channel holds the corner offset.
pub fn create_galaxy_point_mesh(cloud: &GalaxyPointCloud) -> Mesh {
    let vertex_count = cloud.len() * VERTICES_PER_POINT;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(vertex_count);
    let mut corners: Vec<[f32; 2]> = Vec::with_capacity(vertex_count);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(vertex_count);

    for point in cloud.points() {
        let position = point.position.to_array();
        let color = point.color.to_f32_array();
        for corner in QUAD_CORNERS {
            positions.push(position);
            corners.push(corner);
            colors.push(color);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, corners);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh
}
