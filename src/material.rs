//! Material variants and the display-mode to model mapping.

use crate::config::AssetConfig;
use crate::math::{hex_to_rgb, srgb_to_linear_rgb};
use crate::mode::DisplayMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    /// Source-over alpha blending
    Normal,
    /// `src * alpha + dst`
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Double,
}

/// Refractive glass that samples whatever is drawn behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmissionMaterial {
    /// Also shade back faces before front faces
    pub backside: bool,
    pub backside_thickness: f32,
    pub thickness: f32,
    pub ior: f32,
    pub chromatic_aberration: f32,
    pub roughness: f32,
    pub color: [f32; 3],
}

impl Default for TransmissionMaterial {
    fn default() -> Self {
        Self {
            backside: true,
            backside_thickness: 10.0,
            thickness: 5.0,
            ior: 1.5,
            chromatic_aberration: 0.03,
            roughness: 0.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Translucent lit surface blended additively without writing depth.
/// `color` is linear RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XRayMaterial {
    pub color: [f32; 3],
    pub opacity: f32,
    pub side: Side,
    pub blending: Blending,
    pub depth_write: bool,
}

impl Default for XRayMaterial {
    fn default() -> Self {
        Self {
            color: srgb_to_linear_rgb(hex_to_rgb(0x003366)),
            opacity: 0.5,
            side: Side::Double,
            blending: Blending::Additive,
            depth_write: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialVariant {
    Transmission(TransmissionMaterial),
    XRay(XRayMaterial),
}

impl MaterialVariant {
    pub fn for_mode(mode: DisplayMode) -> Self {
        match mode {
            DisplayMode::Normal => MaterialVariant::Transmission(TransmissionMaterial::default()),
            DisplayMode::Ghost => MaterialVariant::XRay(XRayMaterial::default()),
        }
    }

    pub fn blending(&self) -> Blending {
        match self {
            MaterialVariant::Transmission(_) => Blending::Normal,
            MaterialVariant::XRay(m) => m.blending,
        }
    }

    pub fn side(&self) -> Side {
        match self {
            MaterialVariant::Transmission(_) => Side::Front,
            MaterialVariant::XRay(m) => m.side,
        }
    }

    pub fn depth_write(&self) -> bool {
        match self {
            MaterialVariant::Transmission(_) => true,
            MaterialVariant::XRay(m) => m.depth_write,
        }
    }

    /// Whether a separate back-face pass precedes the front faces
    pub fn has_backside_pass(&self) -> bool {
        matches!(self, MaterialVariant::Transmission(m) if m.backside)
    }

    /// `color` (rgb + opacity) and `params` (thickness, ior, aberration, roughness)
    /// as laid out in `DrawUniform`
    pub fn shader_params(&self, backside: bool) -> ([f32; 4], [f32; 4]) {
        match self {
            MaterialVariant::Transmission(m) => {
                let thickness = if backside { m.backside_thickness } else { m.thickness };
                (
                    [m.color[0], m.color[1], m.color[2], 1.0],
                    [thickness, m.ior, m.chromatic_aberration, m.roughness],
                )
            }
            MaterialVariant::XRay(m) => (
                [m.color[0], m.color[1], m.color[2], m.opacity],
                [0.0, 1.0, 0.0, 0.5],
            ),
        }
    }
}

/// Mesh asset and material shown for one display mode
#[derive(Debug, Clone, PartialEq)]
pub struct ModelVariant {
    pub mode: DisplayMode,
    /// File name inside the asset directory
    pub asset: String,
    pub material: MaterialVariant,
}

impl ModelVariant {
    pub fn resolve(mode: DisplayMode, assets: &AssetConfig) -> Self {
        let asset = match mode {
            DisplayMode::Normal => assets.tunic.clone(),
            DisplayMode::Ghost => assets.tunic_ghost.clone(),
        };
        Self {
            mode,
            asset,
            material: MaterialVariant::for_mode(mode),
        }
    }
}

/// Holds the active variant, re-resolved only when the mode changes
#[derive(Debug, Clone)]
pub struct ModelSelector {
    assets: AssetConfig,
    active: Option<ModelVariant>,
}

impl ModelSelector {
    pub fn new(assets: AssetConfig) -> Self {
        Self {
            assets,
            active: None,
        }
    }

    pub fn active(&self) -> Option<&ModelVariant> {
        self.active.as_ref()
    }

    pub fn mode(&self) -> Option<DisplayMode> {
        self.active.as_ref().map(|v| v.mode)
    }

    /// Returns whether the active variant was replaced
    pub fn select(&mut self, mode: Option<DisplayMode>) -> bool {
        if self.mode() == mode {
            return false;
        }
        self.active = mode.map(|m| ModelVariant::resolve(m, &self.assets));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transmission_params_switch_thickness() {
        let material = MaterialVariant::for_mode(DisplayMode::Normal);
        let (_, front) = material.shader_params(false);
        let (_, back) = material.shader_params(true);
        assert_eq!(front[0], 5.0);
        assert_eq!(back[0], 10.0);
        assert_eq!(front[1], 1.5);
    }

    #[test]
    fn xray_color_carries_opacity() {
        let material = MaterialVariant::for_mode(DisplayMode::Ghost);
        let (color, _) = material.shader_params(false);
        assert_eq!(color[3], 0.5);
        assert!(!material.has_backside_pass());
    }
}
