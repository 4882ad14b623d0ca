pub mod camera;
pub mod core;
pub mod generation;
pub mod lifecycle;
pub mod loading;
pub mod mesh;
pub mod render;
pub mod systems;
