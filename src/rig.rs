//! Pointer-driven camera rig.
//!
//! Each frame the rig derives a target position from the normalized pointer and eases the
//! live camera toward it with exponential damping, then aims the camera at the origin.
//! The easing uses the real frame delta, so the motion is the same at any frame rate.

use glam::Vec3;

use crate::camera::CameraPose;
use crate::config::RigConfig;

/// Cursor position relative to the viewport center, each axis in [-1, 1] (y up)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }.clamped()
    }

    /// Normalizes a cursor position given in pixels from the top-left corner
    pub fn from_cursor(cursor_x: f32, cursor_y: f32, width: f32, height: f32) -> Self {
        if !(width > 0.0 && height > 0.0) {
            return Self::default();
        }
        Self::new(
            cursor_x / width * 2.0 - 1.0,
            -(cursor_y / height) * 2.0 + 1.0,
        )
    }

    /// Clamps to [-1, 1]; non-finite components fall back to 0
    pub fn clamped(self) -> Self {
        fn clamp_axis(v: f32) -> f32 {
            if v.is_finite() {
                v.clamp(-1.0, 1.0)
            } else {
                0.0
            }
        }
        Self {
            x: clamp_axis(self.x),
            y: clamp_axis(self.y),
        }
    }
}

/// Moves `current` toward `target` as the exact solution of
/// `dx/dt = (target - x) / smooth_time` integrated over `delta` seconds.
pub fn damp(current: f32, target: f32, smooth_time: f32, delta: f32) -> f32 {
    if !(delta > 0.0) {
        return current;
    }
    if !(smooth_time > 0.0) {
        return target;
    }
    let blend = 1.0 - (-delta / smooth_time).exp();
    current + (target - current) * blend
}

/// Per-axis [`damp`]
pub fn damp3(current: Vec3, target: Vec3, smooth_time: f32, delta: f32) -> Vec3 {
    Vec3::new(
        damp(current.x, target.x, smooth_time, delta),
        damp(current.y, target.y, smooth_time, delta),
        damp(current.z, target.z, smooth_time, delta),
    )
}

/// Camera rig owned by a single scene
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: RigConfig,
    target: Vec3,
}

impl CameraRig {
    pub fn new(config: RigConfig) -> Self {
        let mut rig = Self {
            config,
            target: Vec3::ZERO,
        };
        rig.target = rig.target_for(PointerState::default());
        rig
    }

    /// Target computed by the most recent update
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn target_for(&self, pointer: PointerState) -> Vec3 {
        let p = pointer.clamped();
        Vec3::new(
            (-p.x).sin() * self.config.sway,
            p.y * self.config.lift,
            self.config.base_distance + p.x.cos() * self.config.dolly,
        )
    }

    /// Advances the camera by one frame
    pub fn update(&mut self, pointer: PointerState, delta: f32, camera: &mut CameraPose) {
        self.target = self.target_for(pointer);
        camera.position = damp3(camera.position, self.target, self.config.smooth_time, delta);
        camera.look_at_point(Vec3::ZERO);
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(RigConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_target_is_25_units_out() {
        let rig = CameraRig::default();
        assert_eq!(rig.target(), Vec3::new(0.0, 0.0, 25.0));
    }

    #[test]
    fn damp_zero_delta_is_identity() {
        assert_eq!(damp(3.0, 10.0, 0.2, 0.0), 3.0);
    }

    #[test]
    fn damp_negative_or_nan_delta_is_identity() {
        assert_eq!(damp(3.0, 10.0, 0.2, -1.0), 3.0);
        assert_eq!(damp(3.0, 10.0, 0.2, f32::NAN), 3.0);
    }

    #[test]
    fn damp_zero_smooth_time_snaps() {
        assert_eq!(damp(3.0, 10.0, 0.0, 0.016), 10.0);
    }

    #[test]
    fn damp_one_time_constant() {
        // After one time constant the remaining gap is 1/e
        let x = damp(0.0, 1.0, 0.2, 0.2);
        assert!((x - (1.0 - (-1.0f32).exp())).abs() < 1e-6);
    }

    #[test]
    fn pointer_from_cursor_center_and_corners() {
        assert_eq!(PointerState::from_cursor(400.0, 300.0, 800.0, 600.0), PointerState::new(0.0, 0.0));
        assert_eq!(PointerState::from_cursor(0.0, 0.0, 800.0, 600.0), PointerState::new(-1.0, 1.0));
        assert_eq!(PointerState::from_cursor(800.0, 600.0, 800.0, 600.0), PointerState::new(1.0, -1.0));
    }

    #[test]
    fn pointer_from_cursor_zero_viewport() {
        assert_eq!(PointerState::from_cursor(10.0, 10.0, 0.0, 600.0), PointerState::default());
    }
}
