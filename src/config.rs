//! Scene configuration loaded from JSON.
//!
//! Every field has a default matching the shipped scene, so an empty `{}` file (or no
//! file at all) yields the stock viewer. CLI flags are applied on top afterwards.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::math::parse_hex_color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub rig: RigConfig,
    pub assets: AssetConfig,
    pub model: ModelConfig,
    pub float: FloatConfig,
    pub light: SpotLightConfig,
    pub shadows: ShadowConfig,
    pub environment: EnvironmentConfig,
    pub background: BackgroundConfig,
    pub status: StatusConfig,
    /// Location the navigator starts at
    pub initial_route: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            rig: RigConfig::default(),
            assets: AssetConfig::default(),
            model: ModelConfig::default(),
            float: FloatConfig::default(),
            light: SpotLightConfig::default(),
            shadows: ShadowConfig::default(),
            environment: EnvironmentConfig::default(),
            background: BackgroundConfig::default(),
            status: StatusConfig::default(),
            initial_route: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Tunic".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 20.0],
            fov: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Pointer-to-camera easing parameters.
///
/// The target is `(sin(-px) * sway, py * lift, base_distance + cos(px) * dolly)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigConfig {
    /// Damping time constant in seconds
    pub smooth_time: f32,
    pub sway: f32,
    pub lift: f32,
    pub base_distance: f32,
    pub dolly: f32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            smooth_time: 0.2,
            sway: 2.0,
            lift: 3.5,
            base_distance: 15.0,
            dolly: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetConfig {
    pub dir: PathBuf,
    pub tunic: String,
    pub tunic_ghost: String,
    pub font: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("public"),
            tunic: "tunic.glb".to_string(),
            tunic_ghost: "tunic_ghost.glb".to_string(),
            font: "universal-serif.ttf".to_string(),
        }
    }
}

impl AssetConfig {
    pub fn path_of(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub scale: f32,
    /// Radians per second around Y
    pub spin_speed: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            scale: 5.0,
            spin_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloatConfig {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub floating_range: [f32; 2],
    /// Phase offset in seconds
    pub offset: f32,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            rotation_intensity: 1.0,
            float_intensity: 2.0,
            floating_range: [-0.1, 0.1],
            offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpotLightConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Cone half-angle in radians
    pub angle: f32,
    pub penumbra: f32,
    pub intensity: f32,
}

impl Default for SpotLightConfig {
    fn default() -> Self {
        Self {
            position: [20.0, 20.0, 10.0],
            target: [0.0, 0.0, 0.0],
            angle: 0.2,
            penumbra: 1.0,
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowConfig {
    /// Draws the blurred ground shadow under the model
    pub enabled: bool,
    pub position: [f32; 3],
    pub scale: f32,
    pub blur: f32,
    pub far: f32,
    pub opacity: f32,
    pub resolution: u32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            position: [0.0, -7.5, 0.0],
            scale: 100.0,
            blur: 1.0,
            far: 100.0,
            opacity: 0.85,
            resolution: 512,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    pub intensity: f32,
    pub lightformer_intensity: f32,
    pub lightformer_position: [f32; 3],
    pub lightformer_scale: [f32; 3],
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            lightformer_intensity: 8.0,
            lightformer_position: [10.0, 5.0, 0.0],
            lightformer_scale: [10.0, 50.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Used when the location is exactly `/`
    pub home: String,
    pub elsewhere: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            home: "#e0e0e0".to_string(),
            elsewhere: "#212121".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusConfig {
    pub text: String,
    pub position: [f32; 3],
    /// Glyph height in world units
    pub font_size: f32,
    /// Extra spacing in em
    pub letter_spacing: f32,
    pub color: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            text: "TUNIC".to_string(),
            position: [0.0, 0.0, -10.0],
            font_size: 14.0,
            letter_spacing: -0.025,
            color: "#000000".to_string(),
        }
    }
}

impl SceneConfig {
    /// Defaults overlaid with the JSON file at `path`, if any
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_json(&text)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => Self::default(),
        };
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(text).context("Failed to parse JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            bail!(
                "window size must be positive, got {}x{}",
                self.window.width,
                self.window.height
            );
        }
        if !(self.camera.fov > 0.0 && self.camera.fov < 180.0) {
            bail!("camera.fov must be in (0, 180), got {}", self.camera.fov);
        }
        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            bail!(
                "camera planes must satisfy 0 < near < far, got near={} far={}",
                self.camera.near,
                self.camera.far
            );
        }
        if !(self.rig.smooth_time >= 0.0 && self.rig.smooth_time.is_finite()) {
            bail!("rig.smooth_time must be finite and >= 0, got {}", self.rig.smooth_time);
        }
        if !(self.model.scale > 0.0 && self.model.scale.is_finite()) {
            bail!("model.scale must be finite and positive, got {}", self.model.scale);
        }
        if self.shadows.resolution == 0 {
            bail!("shadows.resolution must be positive");
        }
        if !(self.shadows.scale > 0.0) || !(self.shadows.far > 0.0) {
            bail!(
                "shadows.scale and shadows.far must be positive, got {} and {}",
                self.shadows.scale,
                self.shadows.far
            );
        }
        if !(0.0..=1.0).contains(&self.shadows.opacity) {
            bail!("shadows.opacity must be in [0, 1], got {}", self.shadows.opacity);
        }
        for (field, value) in [
            ("background.home", &self.background.home),
            ("background.elsewhere", &self.background.elsewhere),
            ("status.color", &self.status.color),
        ] {
            if parse_hex_color(value).is_none() {
                bail!("{field} is not a #rrggbb color: {value:?}");
            }
        }
        Ok(())
    }
}
