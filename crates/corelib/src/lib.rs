//! Core types: math re-exports, Trackball, OrbitCamera.

pub use glam::{Mat4, Quat, Vec2, Vec3, vec2, vec3};

pub mod camera;
pub mod trackball;

pub use camera::{OrbitCamera, PointerButton};
pub use trackball::{Trackball, point_to_sphere};
