//! Scene composition and per-scene state.
//!
//! [`StaticScene`] is assembled once from configuration. [`SceneState`] owns everything
//! that changes while the viewer runs: the camera rig and pose, the navigator, the
//! active model variant and its animation.

use anyhow::{Context, Result};
use glam::{Mat4, Vec2, Vec3};

use crate::animation::{FloatMotion, ModelSpin};
use crate::camera::CameraPose;
use crate::config::{EnvironmentConfig, ModelConfig, SceneConfig, ShadowConfig};
use crate::frame::FrameInfo;
use crate::material::{ModelSelector, ModelVariant};
use crate::math::{parse_hex_color, srgb_to_linear_rgb};
use crate::mode::{DisplayMode, Navigator};
use crate::rig::{CameraRig, PointerState};
use crate::types::{DrawUniform, FrameUniform, ShadowUniform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    /// Unit vector from the light toward its target
    pub direction: Vec3,
    pub cos_outer: f32,
    pub cos_inner: f32,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusLabel {
    pub text: String,
    pub anchor: Vec3,
    pub font_size: f32,
    pub letter_spacing: f32,
    /// sRGB, as painted by the UI layer
    pub color: [f32; 3],
}

/// Where the status label lands on screen this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusPlacement {
    /// Physical pixels from the top-left corner
    pub center: Vec2,
    pub font_px: f32,
}

/// Scene parts that never change after composition
#[derive(Debug, Clone, PartialEq)]
pub struct StaticScene {
    /// Linear RGB
    pub background_home: [f32; 3],
    pub background_elsewhere: [f32; 3],
    pub spot: SpotLight,
    pub shadows: ShadowConfig,
    pub environment: EnvironmentConfig,
    pub status: StatusLabel,
}

impl StaticScene {
    pub fn compose(config: &SceneConfig) -> Result<Self> {
        let color = |field: &str, value: &str| {
            parse_hex_color(value).with_context(|| format!("{field} is not a #rrggbb color: {value:?}"))
        };

        let light = &config.light;
        let position = Vec3::from_array(light.position);
        let direction = (Vec3::from_array(light.target) - position).normalize_or(Vec3::NEG_Y);

        Ok(Self {
            background_home: srgb_to_linear_rgb(color("background.home", &config.background.home)?),
            background_elsewhere: srgb_to_linear_rgb(color(
                "background.elsewhere",
                &config.background.elsewhere,
            )?),
            spot: SpotLight {
                position,
                direction,
                cos_outer: light.angle.cos(),
                cos_inner: (light.angle * (1.0 - light.penumbra.clamp(0.0, 1.0))).cos(),
                intensity: light.intensity,
            },
            shadows: config.shadows,
            environment: config.environment,
            status: StatusLabel {
                text: config.status.text.clone(),
                anchor: Vec3::from_array(config.status.position),
                font_size: config.status.font_size,
                letter_spacing: config.status.letter_spacing,
                color: color("status.color", &config.status.color)?,
            },
        })
    }
}

/// All mutable state of one mounted scene
#[derive(Debug, Clone)]
pub struct SceneState {
    statics: StaticScene,
    model: ModelConfig,
    float: FloatMotion,
    spin: ModelSpin,
    rig: CameraRig,
    camera: CameraPose,
    navigator: Navigator,
    selector: ModelSelector,
    elapsed: f32,
}

impl SceneState {
    pub fn new(config: &SceneConfig) -> Result<Self> {
        let navigator = Navigator::new(&config.initial_route);
        let mut selector = ModelSelector::new(config.assets.clone());
        selector.select(navigator.mode());

        Ok(Self {
            statics: StaticScene::compose(config)?,
            model: config.model,
            float: FloatMotion::new(config.float),
            spin: ModelSpin::default(),
            rig: CameraRig::new(config.rig),
            camera: CameraPose::from_config(&config.camera),
            navigator,
            selector,
            elapsed: 0.0,
        })
    }

    pub fn statics(&self) -> &StaticScene {
        &self.statics
    }

    pub fn camera(&self) -> &CameraPose {
        &self.camera
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn location(&self) -> &str {
        self.navigator.location()
    }

    pub fn mode(&self) -> Option<DisplayMode> {
        self.selector.mode()
    }

    pub fn active_model(&self) -> Option<&ModelVariant> {
        self.selector.active()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Returns whether the displayed variant changed
    pub fn navigate(&mut self, path: &str) -> bool {
        if !self.navigator.navigate(path) {
            return false;
        }
        self.sync_selection()
    }

    pub fn toggle_mode(&mut self) -> bool {
        if !self.navigator.toggle() {
            return false;
        }
        self.sync_selection()
    }

    fn sync_selection(&mut self) -> bool {
        let changed = self.selector.select(self.navigator.mode());
        if changed {
            match self.selector.active() {
                Some(variant) => log::info!("Showing {} ({})", variant.mode, variant.asset),
                None => log::info!("No model routed at {}", self.navigator.location()),
            }
        }
        changed
    }

    /// One frame of simulation: rig, float phase and spin of the visible model
    pub fn update(&mut self, frame: &FrameInfo, pointer: PointerState) {
        self.rig.update(pointer, frame.delta, &mut self.camera);
        self.elapsed = frame.time;
        if let Some(mode) = self.selector.mode() {
            if frame.delta > 0.0 {
                self.spin.advance(mode, frame.delta * self.model.spin_speed);
            }
        }
    }

    /// Whether the contact-shadow caster and ground plane are drawn
    pub fn contact_shadows(&self) -> bool {
        self.statics.shadows.enabled
    }

    pub fn spin_angle(&self, mode: DisplayMode) -> f32 {
        self.spin.angle(mode)
    }

    /// Linear background color for the current location
    pub fn background(&self) -> [f32; 3] {
        if self.navigator.is_home() {
            self.statics.background_home
        } else {
            self.statics.background_elsewhere
        }
    }

    /// World transform of the active model: float group, spin, then scale
    pub fn model_matrix(&self) -> Option<Mat4> {
        let mode = self.selector.mode()?;
        Some(
            self.float.matrix_at(self.elapsed)
                * Mat4::from_rotation_y(self.spin.angle(mode))
                * Mat4::from_scale(Vec3::splat(self.model.scale)),
        )
    }

    pub fn draw_uniform(&self, backside: bool) -> Option<DrawUniform> {
        let model = self.model_matrix()?;
        let material = self.selector.active()?.material;
        let (color, params) = material.shader_params(backside);
        Some(DrawUniform {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color,
            params,
        })
    }

    pub fn frame_uniform(&self, width: u32, height: u32) -> FrameUniform {
        let aspect = aspect_ratio(width, height);
        let spot = &self.statics.spot;
        let env = &self.statics.environment;
        FrameUniform {
            camera: self.camera.to_uniform(aspect),
            viewport: [width as f32, height as f32, env.intensity, self.elapsed],
            spot_position: spot.position.extend(spot.intensity).to_array(),
            spot_direction: spot.direction.extend(spot.cos_outer).to_array(),
            spot_params: [spot.cos_inner, 0.0, 0.0, 0.0],
            lightformer_position: Vec3::from_array(env.lightformer_position)
                .extend(env.lightformer_intensity)
                .to_array(),
            lightformer_scale: Vec3::from_array(env.lightformer_scale).extend(0.0).to_array(),
        }
    }

    pub fn shadow_uniform(&self, width: u32, height: u32) -> ShadowUniform {
        let shadows = &self.statics.shadows;
        ShadowUniform {
            view_proj: self
                .camera
                .view_projection(aspect_ratio(width, height))
                .to_cols_array_2d(),
            plane: Vec3::from_array(shadows.position)
                .extend(shadows.scale)
                .to_array(),
            params: [
                shadows.far,
                shadows.opacity,
                shadows.blur,
                shadows.resolution as f32,
            ],
        }
    }

    /// Screen position and pixel size of the status label, `None` when behind the camera
    pub fn status_placement(&self, width: u32, height: u32) -> Option<StatusPlacement> {
        let status = &self.statics.status;
        let depth = self.camera.view_depth(status.anchor);
        if depth <= self.camera.near {
            return None;
        }
        let ndc = self.camera.project(status.anchor, aspect_ratio(width, height))?;
        let viewport = Vec2::new(width as f32, height as f32);
        Some(StatusPlacement {
            center: CameraPose::ndc_to_pixels(ndc, viewport),
            font_px: status.font_size * self.camera.pixels_per_unit(depth, viewport.y),
        })
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_linearizes_backgrounds() {
        let statics = StaticScene::compose(&SceneConfig::default()).unwrap();
        let home = statics.background_home;
        assert!(home[0] > 0.7 && home[0] < 0.8);
        assert_eq!(home[0], home[2]);
        assert!(statics.background_elsewhere[0] < 0.02);
    }

    #[test]
    fn spot_points_at_origin() {
        let statics = StaticScene::compose(&SceneConfig::default()).unwrap();
        let expected = Vec3::new(-20.0, -20.0, -10.0).normalize();
        assert!((statics.spot.direction - expected).length() < 1e-6);
        // Full penumbra puts the inner cone on the axis
        assert_eq!(statics.spot.cos_inner, 1.0);
    }

    #[test]
    fn aspect_ratio_of_zero_height() {
        assert_eq!(aspect_ratio(800, 0), 1.0);
        assert_eq!(aspect_ratio(800, 400), 2.0);
    }
}
