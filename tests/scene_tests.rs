use glam::Vec3;

use tunic_viewer::config::SceneConfig;
use tunic_viewer::frame::FrameInfo;
use tunic_viewer::material::MaterialVariant;
use tunic_viewer::{DisplayMode, PointerState, SceneState};

fn scene() -> SceneState {
    SceneState::new(&SceneConfig::default()).unwrap()
}

fn frame(number: u64, time: f32, delta: f32) -> FrameInfo {
    FrameInfo::new(number, time, delta)
}

#[cfg(test)]
mod navigation_tests {
    use super::*;

    #[test]
    fn test_starts_on_home_route() {
        let scene = scene();
        assert_eq!(scene.location(), "/");
        assert_eq!(scene.mode(), Some(DisplayMode::Normal));
        assert!(matches!(
            scene.active_model().map(|v| v.material),
            Some(MaterialVariant::Transmission(_))
        ));
    }

    #[test]
    fn test_initial_route_from_config() {
        let config = SceneConfig {
            initial_route: "/tunic".to_string(),
            ..SceneConfig::default()
        };
        let scene = SceneState::new(&config).unwrap();
        assert_eq!(scene.mode(), Some(DisplayMode::Ghost));
    }

    #[test]
    fn test_navigate_swaps_variant() {
        let mut scene = scene();
        assert!(scene.navigate("/tunic"));
        assert_eq!(scene.mode(), Some(DisplayMode::Ghost));
        assert!(!scene.navigate("/tunic/"));
        assert!(scene.toggle_mode());
        assert_eq!(scene.mode(), Some(DisplayMode::Normal));
    }

    #[test]
    fn test_unknown_route_shows_no_model() {
        let mut scene = scene();
        assert!(scene.navigate("/gallery"));
        assert_eq!(scene.mode(), None);
        assert!(scene.model_matrix().is_none());
        assert!(scene.draw_uniform(false).is_none());
    }

    #[test]
    fn test_background_depends_on_location() {
        let mut scene = scene();
        let home = scene.background();
        assert_eq!(home, scene.statics().background_home);
        scene.navigate("/tunic");
        assert_eq!(scene.background(), scene.statics().background_elsewhere);
        scene.navigate("/gallery");
        assert_eq!(scene.background(), scene.statics().background_elsewhere);
    }
}

#[cfg(test)]
mod update_tests {
    use super::*;

    #[test]
    fn test_update_eases_camera_toward_target() {
        let mut scene = scene();
        let start = scene.camera().position;
        scene.update(&frame(0, 0.0, 0.0), PointerState::default());
        assert_eq!(scene.camera().position, start);

        scene.update(&frame(1, 0.1, 0.1), PointerState::default());
        let z = scene.camera().position.z;
        assert!(z > 20.0 && z < 25.0);
        assert_eq!(scene.camera().look_at, Vec3::ZERO);
    }

    #[test]
    fn test_pointer_steers_camera() {
        let mut scene = scene();
        for i in 1..=60 {
            scene.update(&frame(i, i as f32 / 60.0, 1.0 / 60.0), PointerState::new(1.0, 1.0));
        }
        let position = scene.camera().position;
        assert!(position.x < 0.0);
        assert!(position.y > 0.0);
        assert_eq!(scene.rig().target(), scene.rig().target_for(PointerState::new(1.0, 1.0)));
    }

    #[test]
    fn test_spin_follows_visible_model_only() {
        let mut scene = scene();
        scene.update(&frame(1, 0.5, 0.5), PointerState::default());
        assert!((scene.spin_angle(DisplayMode::Normal) - 0.5).abs() < 1e-6);
        assert_eq!(scene.spin_angle(DisplayMode::Ghost), 0.0);

        scene.navigate("/tunic");
        scene.update(&frame(2, 0.75, 0.25), PointerState::default());
        assert!((scene.spin_angle(DisplayMode::Ghost) - 0.25).abs() < 1e-6);
        assert!((scene.spin_angle(DisplayMode::Normal) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_elapsed_tracks_frame_time() {
        let mut scene = scene();
        scene.update(&frame(3, 1.25, 0.016), PointerState::default());
        assert_eq!(scene.elapsed(), 1.25);
    }

    #[test]
    fn test_model_matrix_applies_scale() {
        let scene = scene();
        let matrix = scene.model_matrix().unwrap();
        let (scale, _, _) = matrix.to_scale_rotation_translation();
        assert!((scale - Vec3::splat(5.0)).abs().max_element() < 1e-4);
    }

    #[test]
    fn test_backside_uniform_uses_backside_thickness() {
        let scene = scene();
        let front = scene.draw_uniform(false).unwrap();
        let back = scene.draw_uniform(true).unwrap();
        assert_eq!(front.params[0], 5.0);
        assert_eq!(back.params[0], 10.0);
    }
}

#[cfg(test)]
mod status_tests {
    use super::*;

    #[test]
    fn test_status_centered_at_rest() {
        let scene = scene();
        let placement = scene.status_placement(800, 600).unwrap();
        assert!((placement.center.x - 400.0).abs() < 1e-2);
        assert!((placement.center.y - 300.0).abs() < 1e-2);
        // 14 world units seen from 30 units away with a 50 degree fov
        let expected = 14.0 * 600.0 / (2.0 * 30.0 * 25f32.to_radians().tan());
        assert!((placement.font_px - expected).abs() < 1e-2);
    }

    #[test]
    fn test_status_hidden_behind_camera() {
        let mut config = SceneConfig::default();
        config.status.position = [0.0, 0.0, 30.0];
        let scene = SceneState::new(&config).unwrap();
        assert!(scene.status_placement(800, 600).is_none());
    }

    #[test]
    fn test_contact_shadows_on_by_default() {
        assert!(scene().contact_shadows());
    }

    #[test]
    fn test_contact_shadows_follow_shadow_config() {
        let config = SceneConfig::from_json(r#"{ "shadows": { "enabled": false } }"#).unwrap();
        let scene = SceneState::new(&config).unwrap();
        assert!(!scene.contact_shadows());
        // The shadow plane parameters are still composed
        assert_eq!(scene.shadow_uniform(800, 600).params[1], 0.85);
    }

    #[test]
    fn test_frame_uniform_carries_viewport() {
        let scene = scene();
        let uniform = scene.frame_uniform(1024, 512);
        assert_eq!(uniform.viewport[0], 1024.0);
        assert_eq!(uniform.viewport[1], 512.0);
        assert_eq!(uniform.lightformer_position[3], 8.0);
    }
}
