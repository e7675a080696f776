use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::config::FloatConfig;
use crate::mode::DisplayMode;

/// Gentle bob and sway applied to the group holding the model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatMotion {
    config: FloatConfig,
}

impl FloatMotion {
    pub fn new(config: FloatConfig) -> Self {
        Self { config }
    }

    fn phase(&self, elapsed: f32) -> f32 {
        (self.config.offset + elapsed) / 4.0 * self.config.speed
    }

    /// Euler XYZ rotation at `elapsed` seconds
    pub fn rotation_at(&self, elapsed: f32) -> Vec3 {
        let phase = self.phase(elapsed);
        let intensity = self.config.rotation_intensity;
        Vec3::new(
            phase.cos() / 8.0 * intensity,
            phase.sin() / 8.0 * intensity,
            phase.sin() / 20.0 * intensity,
        )
    }

    /// Vertical offset at `elapsed` seconds
    pub fn height_at(&self, elapsed: f32) -> f32 {
        let raw = self.phase(elapsed).sin() / 10.0;
        let [lo, hi] = self.config.floating_range;
        map_linear(raw, -0.1, 0.1, lo, hi) * self.config.float_intensity
    }

    pub fn matrix_at(&self, elapsed: f32) -> Mat4 {
        let r = self.rotation_at(elapsed);
        Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            Vec3::new(0.0, self.height_at(elapsed), 0.0),
        )
    }
}

fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

/// Y rotation of each model variant; only the displayed one advances
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModelSpin {
    angles: [f32; 2],
}

impl ModelSpin {
    pub fn advance(&mut self, mode: DisplayMode, radians: f32) {
        let angle = &mut self.angles[mode.index()];
        *angle = (*angle + radians).rem_euclid(std::f32::consts::TAU);
    }

    pub fn angle(&self, mode: DisplayMode) -> f32 {
        self.angles[mode.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_motion() -> FloatMotion {
        FloatMotion::new(FloatConfig::default())
    }

    #[test]
    fn map_linear_identity_range() {
        assert!((map_linear(0.05, -0.1, 0.1, -0.1, 0.1) - 0.05).abs() < 1e-6);
        assert!((map_linear(0.0, -0.1, 0.1, 0.0, 1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rotation_follows_quarter_speed_phase() {
        let t = 3.0f32;
        let phase = t / 4.0;
        let rotation = float_motion().rotation_at(t);
        assert!((rotation.x - phase.cos() / 8.0).abs() < 1e-6);
        assert!((rotation.y - phase.sin() / 8.0).abs() < 1e-6);
        assert!((rotation.z - phase.sin() / 20.0).abs() < 1e-6);
    }

    #[test]
    fn height_scaled_by_float_intensity() {
        let t = 3.0f32;
        let expected = (t / 4.0).sin() / 10.0 * 2.0;
        assert!((float_motion().height_at(t) - expected).abs() < 1e-6);
    }

    #[test]
    fn height_stays_within_floating_range() {
        let motion = float_motion();
        let limit = 0.1 * FloatConfig::default().float_intensity + 1e-6;
        for step in 0..2000 {
            let t = step as f32 * 0.05;
            assert!(motion.height_at(t).abs() <= limit, "height out of range at t={t}");
        }
    }

    #[test]
    fn matrix_combines_rotation_and_height() {
        let motion = float_motion();
        let t = 3.0f32;
        let (scale, rotation, translation) = motion.matrix_at(t).to_scale_rotation_translation();
        let r = motion.rotation_at(t);
        let expected = Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z);
        assert!((scale - Vec3::ONE).abs().max_element() < 1e-5);
        assert!(rotation.abs_diff_eq(expected, 1e-5) || rotation.abs_diff_eq(-expected, 1e-5));
        assert!((translation - Vec3::new(0.0, motion.height_at(t), 0.0)).length() < 1e-6);
    }

    #[test]
    fn offset_shifts_phase() {
        let shifted = FloatMotion::new(FloatConfig {
            offset: 1.0,
            ..FloatConfig::default()
        });
        assert!((shifted.height_at(2.0) - float_motion().height_at(3.0)).abs() < 1e-6);
    }

    #[test]
    fn spin_wraps() {
        let mut spin = ModelSpin::default();
        spin.advance(DisplayMode::Normal, std::f32::consts::TAU + 0.5);
        assert!((spin.angle(DisplayMode::Normal) - 0.5).abs() < 1e-5);
    }
}
