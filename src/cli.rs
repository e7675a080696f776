// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::SceneConfig;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tunic-viewer")]
#[command(about = "Interactive viewer for the Tunic garment models", long_about = None)]
pub struct Cli {
    /// JSON scene configuration; missing fields keep their defaults
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the models and the status font
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Initial location, `/` or `/tunic`
    #[arg(long)]
    pub route: Option<String>,

    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    /// Camera damping time constant in seconds
    #[arg(long, value_name = "SECONDS")]
    pub smooth_time: Option<f32>,

    /// Hide the navigation overlay
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,

    /// Show a frames-per-second readout
    #[arg(long, default_value = "false")]
    pub show_fps: bool,
}

impl Cli {
    /// Config file (or defaults) with the flags applied on top, validated
    pub fn resolve_config(&self) -> Result<SceneConfig> {
        let mut config = SceneConfig::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut SceneConfig) {
        if let Some(dir) = &self.assets {
            config.assets.dir = dir.clone();
        }
        if let Some(route) = &self.route {
            config.initial_route = route.clone();
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(smooth_time) = self.smooth_time {
            config.rig.smooth_time = smooth_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "tunic-viewer",
            "--route",
            "/tunic",
            "--width",
            "640",
            "--smooth-time",
            "0.5",
            "--no-ui",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.initial_route, "/tunic");
        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.rig.smooth_time, 0.5);
        assert!(cli.no_ui);
        assert!(!cli.show_fps);
    }

    #[test]
    fn invalid_override_rejected() {
        let cli = Cli::parse_from(["tunic-viewer", "--smooth-time=-1"]);
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn infinite_smooth_time_rejected() {
        let cli = Cli::parse_from(["tunic-viewer", "--smooth-time", "inf"]);
        assert_eq!(cli.smooth_time, Some(f32::INFINITY));
        assert!(cli.resolve_config().is_err());
    }
}
