use glam::{Mat4, Vec2, Vec3};

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Point at distance `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Same ray expressed in another coordinate frame
    pub fn transformed(&self, m: &Mat4) -> Ray {
        Ray {
            origin: m.transform_point3(self.origin),
            direction: m.transform_vector3(self.direction),
        }
    }
}

/// Intersect a ray with an infinite plane.
/// Returns the distance along the ray, or None when parallel or behind the origin.
pub fn ray_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-6;

    let denom = normal.dot(ray.direction);
    if denom.abs() < EPSILON {
        return None;
    }

    let t = (point - ray.origin).dot(normal) / denom;
    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

/// Intersect a ray with a detected surface: the y = 0 plane of `node`,
/// limited to `extent` (x, z) around `center` in node space.
/// Returns the world-space hit point and its distance along the ray.
pub fn ray_surface(ray: &Ray, node: &Mat4, center: Vec3, extent: Vec2) -> Option<(Vec3, f32)> {
    let local_ray = ray.transformed(&node.inverse());
    let t = ray_plane(&local_ray, Vec3::ZERO, Vec3::Y)?;
    let local_hit = local_ray.at(t);

    let half = extent * 0.5;
    if (local_hit.x - center.x).abs() > half.x || (local_hit.z - center.z).abs() > half.y {
        return None;
    }

    let world_hit = node.transform_point3(local_hit);
    Some((world_hit, (world_hit - ray.origin).length()))
}
