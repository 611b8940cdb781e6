/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera orbiting a target point
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(3.0, 3.0, 3.0),
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: 75f32.to_radians(),
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        match self.mode {
            ProjectionMode::Perspective => {
                Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let height = self.distance();
                let width = height * self.aspect;
                Matrix4::new_orthographic(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn distance(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Move towards (factor < 1) or away from (factor > 1) the target,
    /// staying between the clip planes
    pub fn zoom(&mut self, factor: f32) {
        let offset = self.position - self.target;
        let distance = (offset.norm() * factor).clamp(self.near * 2.0, self.far * 0.5);
        self.position = self.target + offset.normalize() * distance;
    }

    /// Back off along the current view direction until a disc of radius
    /// `extent` around the target fits in view
    pub fn frame_extent(&mut self, extent: f32) {
        let half_fov = (self.fov * 0.5).min(self.fov * self.aspect * 0.5);
        let distance = extent.max(self.near) / half_fov.tan() * 1.5;
        let direction = (self.position - self.target).normalize();
        self.position = self.target + direction * distance.min(self.far * 0.5);
    }

    /// Project a 3D point to 2D screen space: `(x, y, depth)` with depth in
    /// normalized device coordinates
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        self.project_with(&mvp, point, width, height)
    }

    /// Same as [`project_to_screen`](Self::project_to_screen) with a
    /// precomputed model-view-projection matrix
    pub fn project_with(
        &self,
        mvp: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = mvp * point.to_homogeneous();

        // Behind the camera or degenerate
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc = clip.xyz() / clip.w;

        // Clip test
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z.abs() > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;

        Some((screen_x, screen_y, ndc.z))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!((camera.fov.to_degrees() - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::new(80, 40);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert!((x - 40.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);
        assert!(depth.abs() < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::default();
        let behind = Point3::new(10.0, 10.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }

    #[test]
    fn test_zoom_and_framing() {
        let mut camera = Camera::default();
        let before = camera.distance();
        camera.zoom(0.5);
        assert!((camera.distance() - before * 0.5).abs() < 1e-4);

        camera.zoom(1e6);
        assert!((camera.distance() - camera.far * 0.5).abs() < 1e-3);

        camera.frame_extent(5.0);
        let edge = Point3::new(5.0, 0.0, 0.0);
        assert!(camera
            .project_to_screen(&edge, &Matrix4::identity(), 800, 600)
            .is_some());
    }
}
