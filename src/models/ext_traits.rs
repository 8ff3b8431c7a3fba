use bevy::prelude::*;
use easy_ext::ext;

/// Project world positions onto the ground plane used for sweep geometry.
#[ext(Planar)]
impl Vec3 {
    pub fn planar(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}

/// Lift a ground plane vector back into the world, at zero height.
#[ext(Grounded)]
impl Vec2 {
    pub fn grounded(self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.y)
    }
}

/// Facing helpers. Facing is the rotation around the vertical axis only.
///
/// # Example
/// ```rust
/// use bevy::prelude::*;
/// use tail_sweep::models::Facing;
///
/// let mut transform = Transform::default();
/// transform.face_yaw(std::f32::consts::FRAC_PI_2);
/// assert!((transform.yaw() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
/// ```
#[ext(Facing)]
impl Transform {
    pub fn yaw(&self) -> f32 {
        self.rotation.to_euler(EulerRot::YXZ).0
    }

    pub fn face_yaw(&mut self, yaw: f32) {
        self.rotation = Quat::from_rotation_y(yaw);
    }
}
