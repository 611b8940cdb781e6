/// Model transforms for spinning a point cloud in view
use nalgebra::{Matrix4, Vector3};
use std::f32::consts::{FRAC_PI_2, TAU};

/// Orientation of the galaxy in the viewer (radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    /// Tilt towards the camera, kept within a quarter turn
    pub pitch: f32,
    /// Spin around the galaxy's own axis, wrapped into [0, 2π)
    pub yaw: f32,
}

impl RotationState {
    pub fn new(pitch: f32, yaw: f32) -> Self {
        let mut state = Self { pitch: 0.0, yaw: 0.0 };
        state.rotate(pitch, yaw);
        state
    }

    pub fn zero() -> Self {
        Self { pitch: 0.0, yaw: 0.0 }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, d_pitch: f32, d_yaw: f32) {
        self.pitch = (self.pitch + d_pitch).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.yaw = (self.yaw + d_yaw).rem_euclid(TAU);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Spin around Y first, then tilt around X
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let spin = Matrix4::new_rotation(Vector3::new(0.0, rotation.yaw, 0.0));
        let tilt = Matrix4::new_rotation(Vector3::new(rotation.pitch, 0.0, 0.0));
        tilt * spin
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}
