use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use super::picking::Ray;

const PITCH_LIMIT: f32 = 1.55;

/// Handheld device camera used by the simulated anchor feed.
///
/// The pose follows the usual AR convention: the camera looks down its local
/// -Z axis with +Y up. Screen coordinates have their origin in the top-left
/// corner of the viewport.
#[derive(Clone, Debug)]
pub struct DeviceCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Rotation around world Y (radians)
    pub yaw: f32,
    /// Rotation around the camera X axis (radians, negative looks down)
    pub pitch: f32,
    /// Vertical field of view (radians)
    pub fov: f32,
}

impl DeviceCamera {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 0.3, 0.6),
            yaw: 0.0,
            pitch: -0.6,
            fov: 60.0_f32.to_radians(),
        }
    }

    /// Camera at a given position and orientation
    pub fn at(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            ..Self::new()
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)
    }

    /// Camera-to-world transform
    pub fn pose(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.position)
    }

    /// Viewing direction in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx.to_radians();
        self.pitch = (self.pitch - dy.to_radians()).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move relative to the current heading; `up` is along world Y
    pub fn walk(&mut self, forward: f32, right: f32, up: f32) {
        let heading = Quat::from_rotation_y(self.yaw);
        let fwd = heading * Vec3::NEG_Z;
        let side = heading * Vec3::X;
        self.position += fwd * forward + side * right + Vec3::Y * up;
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        self.pose().inverse()
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, 0.01, 100.0)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Project a world point to screen coordinates; None when behind the camera
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let vp = self.view_projection(viewport.x / viewport.y);
        let p = vp * point.extend(1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        ))
    }

    /// Cast a ray from a screen position into the world
    pub fn screen_ray(&self, screen: Vec2, viewport: Vec2) -> Ray {
        let ndc_x = screen.x / viewport.x * 2.0 - 1.0;
        let ndc_y = 1.0 - screen.y / viewport.y * 2.0;

        let vp_inv = self.view_projection(viewport.x / viewport.y).inverse();

        let near_world = vp_inv * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far_world = vp_inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        let near = near_world.truncate() / near_world.w;
        let far = far_world.truncate() / far_world.w;

        Ray {
            origin: self.position,
            direction: (far - near).normalize_or_zero(),
        }
    }
}

impl Default for DeviceCamera {
    fn default() -> Self {
        Self::new()
    }
}
