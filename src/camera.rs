use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};

use crate::config::CameraConfig;
use crate::types::CameraUniform;

/// Live camera pose: where the camera sits and what it looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, fov_y_degrees: f32) -> Self {
        Self {
            position,
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: fov_y_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            near: config.near,
            far: config.far,
            ..Self::new(Vec3::from_array(config.position), config.fov)
        }
    }

    pub fn look_at_point(&mut self, point: Vec3) {
        self.look_at = point;
    }

    /// Unit vector from the camera toward its look-at point
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, self.up)
    }

    /// Perspective projection with depth in [0, 1]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-6), self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Projects a world point to normalized device coordinates.
    /// Returns `None` for points at or behind the camera plane.
    pub fn project(&self, point: Vec3, aspect: f32) -> Option<Vec3> {
        let clip = self.view_projection(aspect) * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(clip.xyz() / clip.w)
    }

    /// Distance along the view direction, positive in front of the camera
    pub fn view_depth(&self, point: Vec3) -> f32 {
        -(self.view_matrix().transform_point3(point)).z
    }

    /// Pixels covered by one world unit at `depth` for a viewport of `viewport_height` pixels
    pub fn pixels_per_unit(&self, depth: f32, viewport_height: f32) -> f32 {
        if depth <= 0.0 {
            return 0.0;
        }
        viewport_height / (2.0 * depth * (self.fov_y * 0.5).tan())
    }

    /// Maps NDC to top-left-origin pixel coordinates
    pub fn ndc_to_pixels(ndc: Vec3, viewport: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        )
    }

    pub fn to_uniform(&self, aspect: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection(aspect).to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pose_matches_scene_setup() {
        let pose = CameraPose::default();
        assert_eq!(pose.position, Vec3::new(0.0, 0.0, 20.0));
        assert!((pose.fov_y - 50f32.to_radians()).abs() < 1e-6);
        assert_eq!(pose.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let pose = CameraPose::default();
        let ndc = pose.project(Vec3::ZERO, 16.0 / 9.0).unwrap();
        assert!(ndc.x.abs() < 1e-6);
        assert!(ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_point_behind_camera_is_not_projected() {
        let pose = CameraPose::default();
        assert!(pose.project(Vec3::new(0.0, 0.0, 30.0), 1.0).is_none());
    }

    #[test]
    fn test_view_depth() {
        let pose = CameraPose::default();
        assert!((pose.view_depth(Vec3::new(0.0, 0.0, -10.0)) - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_ndc_to_pixels_corners() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(
            CameraPose::ndc_to_pixels(Vec3::new(-1.0, 1.0, 0.0), viewport),
            Vec2::ZERO
        );
        assert_eq!(
            CameraPose::ndc_to_pixels(Vec3::new(1.0, -1.0, 0.0), viewport),
            viewport
        );
    }

    #[test]
    fn test_uniform_is_finite() {
        let uniform = CameraPose::default().to_uniform(1.5);
        assert!(uniform.view_proj.iter().flatten().all(|f| f.is_finite()));
        assert_eq!(uniform.position, [0.0, 0.0, 20.0, 1.0]);
    }
}
