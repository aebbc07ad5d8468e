//! Common helper functions for converting between shared (serializable) types
//! and glam math types.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use shared::Transform;

/// `[f64; 3]` → `Vec3`
pub fn to_vec3(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32)
}

/// `Vec3` → `[f64; 3]`
pub fn from_vec3(v: Vec3) -> [f64; 3] {
    [v.x as f64, v.y as f64, v.z as f64]
}

/// Plane extent `[x, z]` → `Vec2`
pub fn to_extent(v: [f64; 2]) -> Vec2 {
    Vec2::new(v[0] as f32, v[1] as f32)
}

pub fn from_extent(v: Vec2) -> [f64; 2] {
    [v.x as f64, v.y as f64]
}

/// Build a 4x4 matrix from a shared transform (Euler XYZ rotation)
pub fn transform_to_mat4(t: &Transform) -> Mat4 {
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        t.rotation[0] as f32,
        t.rotation[1] as f32,
        t.rotation[2] as f32,
    );
    Mat4::from_scale_rotation_translation(to_vec3(t.scale), rotation, to_vec3(t.position))
}

/// Decompose a 4x4 matrix into a shared transform
pub fn mat4_to_transform(m: &Mat4) -> Transform {
    let (scale, rotation, translation) = m.to_scale_rotation_translation();
    let (rx, ry, rz) = rotation.to_euler(EulerRot::XYZ);
    Transform {
        position: from_vec3(translation),
        rotation: [rx as f64, ry as f64, rz as f64],
        scale: from_vec3(scale),
    }
}

/// Translation part of a 4x4 matrix
pub fn translation_of(m: &Mat4) -> Vec3 {
    m.w_axis.truncate()
}
