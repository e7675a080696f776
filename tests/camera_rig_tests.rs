use glam::Vec3;
use tunic_viewer::camera::CameraPose;
use tunic_viewer::config::RigConfig;
use tunic_viewer::rig::{damp, damp3, CameraRig, PointerState};

const EPS: f32 = 1e-5;

fn approx_eq(a: Vec3, b: Vec3, tolerance: f32) -> bool {
    (a - b).abs().max_element() <= tolerance
}

#[cfg(test)]
mod target_tests {
    use super::*;

    #[test]
    fn test_target_on_curve_over_pointer_grid() {
        let rig = CameraRig::default();
        for i in 0..=10 {
            for j in 0..=10 {
                let px = -1.0 + i as f32 * 0.2;
                let py = -1.0 + j as f32 * 0.2;
                let target = rig.target_for(PointerState::new(px, py));
                let expected = Vec3::new((-px).sin() * 2.0, py * 3.5, 15.0 + px.cos() * 10.0);
                assert!(approx_eq(target, expected, EPS), "px={px} py={py}");
            }
        }
    }

    #[test]
    fn test_rest_target() {
        let rig = CameraRig::default();
        assert_eq!(rig.target_for(PointerState::default()), Vec3::new(0.0, 0.0, 25.0));
    }

    #[test]
    fn test_out_of_range_pointer_clamped() {
        let rig = CameraRig::default();
        assert_eq!(
            rig.target_for(PointerState { x: 5.0, y: -9.0 }),
            rig.target_for(PointerState::new(1.0, -1.0))
        );
    }

    #[test]
    fn test_nan_pointer_treated_as_center() {
        let rig = CameraRig::default();
        let pointer = PointerState {
            x: f32::NAN,
            y: f32::INFINITY,
        };
        assert_eq!(pointer.clamped(), PointerState::default());
        assert_eq!(rig.target_for(pointer), Vec3::new(0.0, 0.0, 25.0));
    }

    #[test]
    fn test_custom_coefficients() {
        let rig = CameraRig::new(RigConfig {
            smooth_time: 0.2,
            sway: 1.0,
            lift: 1.0,
            base_distance: 5.0,
            dolly: 0.0,
        });
        let target = rig.target_for(PointerState::new(0.0, 1.0));
        assert_eq!(target, Vec3::new(0.0, 1.0, 5.0));
    }
}

#[cfg(test)]
mod damping_tests {
    use super::*;

    #[test]
    fn test_zero_delta_leaves_camera_unchanged() {
        let mut rig = CameraRig::default();
        let mut camera = CameraPose::default();
        rig.update(PointerState::new(0.7, -0.3), 0.0, &mut camera);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 20.0));
    }

    #[test]
    fn test_large_delta_reaches_target() {
        let mut rig = CameraRig::default();
        let mut camera = CameraPose::default();
        let pointer = PointerState::new(0.4, 0.8);
        rig.update(pointer, 100.0, &mut camera);
        assert!(approx_eq(camera.position, rig.target_for(pointer), 1e-4));
    }

    #[test]
    fn test_split_step_matches_single_step() {
        let pointer = PointerState::new(-0.6, 0.25);
        let mut rig_a = CameraRig::default();
        let mut rig_b = CameraRig::default();
        let mut once = CameraPose::default();
        let mut twice = CameraPose::default();

        rig_a.update(pointer, 0.1, &mut once);
        rig_b.update(pointer, 0.05, &mut twice);
        rig_b.update(pointer, 0.05, &mut twice);

        assert!(approx_eq(once.position, twice.position, 1e-4));
    }

    #[test]
    fn test_camera_looks_at_origin_after_update() {
        let mut rig = CameraRig::default();
        let mut camera = CameraPose::default();
        for (i, delta) in [0.016, 0.033, 0.25, 1.0].into_iter().enumerate() {
            let pointer = PointerState::new(i as f32 * 0.3 - 0.5, 0.9 - i as f32 * 0.4);
            rig.update(pointer, delta, &mut camera);
            assert_eq!(camera.look_at, Vec3::ZERO);
            let expected = (-camera.position).normalize();
            assert!(approx_eq(camera.forward(), expected, EPS));
        }
    }

    #[test]
    fn test_rest_scenario_moves_toward_target() {
        let mut rig = CameraRig::default();
        let mut camera = CameraPose::default();
        rig.update(PointerState::default(), 1.0, &mut camera);

        assert_eq!(camera.position.x, 0.0);
        assert_eq!(camera.position.y, 0.0);
        assert!(camera.position.z > 20.0 && camera.position.z < 25.0);
        // One second is five time constants
        let expected = 20.0 + 5.0 * (1.0 - (-5.0f32).exp());
        assert!((camera.position.z - expected).abs() < 1e-4);
    }

    #[test]
    fn test_convergence_is_monotonic() {
        let mut rig = CameraRig::default();
        let mut camera = CameraPose::default();
        let pointer = PointerState::new(1.0, 1.0);
        let target = rig.target_for(pointer);
        let mut last_distance = camera.position.distance(target);
        for _ in 0..120 {
            rig.update(pointer, 1.0 / 60.0, &mut camera);
            let distance = camera.position.distance(target);
            assert!(distance <= last_distance);
            last_distance = distance;
        }
        assert!(last_distance < 1e-3);
    }

    #[test]
    fn test_rig_remembers_last_target() {
        let mut rig = CameraRig::default();
        let mut camera = CameraPose::default();
        let pointer = PointerState::new(0.5, 0.5);
        rig.update(pointer, 0.016, &mut camera);
        assert_eq!(rig.target(), rig.target_for(pointer));
    }

    #[test]
    fn test_rigs_do_not_share_state() {
        let mut first = CameraRig::default();
        let second = CameraRig::default();
        let mut camera = CameraPose::default();
        first.update(PointerState::new(1.0, 1.0), 0.016, &mut camera);
        assert_ne!(first.target(), second.target());
    }

    #[test]
    fn test_damp_snaps_without_smoothing() {
        assert_eq!(damp(1.0, 4.0, 0.0, 0.016), 4.0);
        assert_eq!(damp3(Vec3::ZERO, Vec3::ONE, -1.0, 0.016), Vec3::ONE);
    }

    #[test]
    fn test_damp_ignores_non_finite_delta() {
        assert_eq!(damp(1.0, 4.0, 0.2, f32::NAN), 1.0);
        assert_eq!(damp3(Vec3::ONE, Vec3::ZERO, 0.2, -0.5), Vec3::ONE);
    }
}
