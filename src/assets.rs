//! Background asset load phase.
//!
//! Both model variants and the status font are read on a dedicated thread. The render
//! loop polls the loader once per frame and draws the model only after it is ready.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::channel::oneshot;

use crate::config::AssetConfig;
use crate::loaders::{load_mesh, MeshData};
use crate::mode::DisplayMode;

#[derive(Debug, Clone, PartialEq)]
pub struct AssetPaths {
    pub tunic: PathBuf,
    pub tunic_ghost: PathBuf,
    pub font: PathBuf,
}

impl AssetPaths {
    pub fn from_config(config: &AssetConfig) -> Self {
        Self {
            tunic: config.path_of(&config.tunic),
            tunic_ghost: config.path_of(&config.tunic_ghost),
            font: config.path_of(&config.font),
        }
    }

    pub fn model(&self, mode: DisplayMode) -> &PathBuf {
        match mode {
            DisplayMode::Normal => &self.tunic,
            DisplayMode::Ghost => &self.tunic_ghost,
        }
    }
}

/// Everything the scene needs from disk
#[derive(Debug)]
pub struct SceneAssets {
    meshes: [MeshData; 2],
    /// Raw TTF bytes; `None` falls back to the default proportional font
    pub font: Option<Vec<u8>>,
}

impl SceneAssets {
    pub fn new(tunic: MeshData, tunic_ghost: MeshData, font: Option<Vec<u8>>) -> Self {
        Self {
            meshes: [tunic, tunic_ghost],
            font,
        }
    }

    pub fn load(paths: &AssetPaths) -> Result<Self> {
        let start = Instant::now();
        let tunic = load_mesh(&paths.tunic).context("Failed to load tunic model")?;
        let tunic_ghost =
            load_mesh(&paths.tunic_ghost).context("Failed to load ghost tunic model")?;

        let font = match std::fs::read(&paths.font) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!(
                    "Font {} unavailable ({e}), using the default font",
                    paths.font.display()
                );
                None
            }
        };

        log::info!(
            "Assets loaded in {:.0?}: tunic {} tris, ghost {} tris",
            start.elapsed(),
            tunic.triangle_count(),
            tunic_ghost.triangle_count()
        );
        log::debug!(
            "Model extents: tunic {:?}, ghost {:?}",
            tunic.bounds.extent(),
            tunic_ghost.bounds.extent()
        );
        Ok(Self::new(tunic, tunic_ghost, font))
    }

    pub fn mesh(&self, mode: DisplayMode) -> &MeshData {
        &self.meshes[mode.index()]
    }
}

#[derive(Debug, Clone)]
pub enum LoadState {
    Pending,
    Ready(Arc<SceneAssets>),
    Failed(String),
}

impl LoadState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn assets(&self) -> Option<&Arc<SceneAssets>> {
        match self {
            LoadState::Ready(assets) => Some(assets),
            _ => None,
        }
    }
}

/// One-shot loader; the result is kept after it arrives
#[derive(Debug)]
pub struct AssetLoader {
    receiver: Option<oneshot::Receiver<Result<SceneAssets, String>>>,
    state: LoadState,
}

impl AssetLoader {
    pub fn spawn(paths: AssetPaths) -> Result<Self> {
        let (sender, receiver) = oneshot::channel();
        std::thread::Builder::new()
            .name("asset-loader".to_string())
            .spawn(move || {
                let result = SceneAssets::load(&paths).map_err(|e| format!("{e:#}"));
                // Receiver dropped means the app already shut down
                let _ = sender.send(result);
            })
            .context("Failed to spawn asset loader thread")?;

        Ok(Self {
            receiver: Some(receiver),
            state: LoadState::Pending,
        })
    }

    /// Already-loaded assets, mainly for tests and headless use
    pub fn ready(assets: SceneAssets) -> Self {
        Self {
            receiver: None,
            state: LoadState::Ready(Arc::new(assets)),
        }
    }

    /// Non-blocking check for the load result
    pub fn poll(&mut self) -> &LoadState {
        if let Some(receiver) = self.receiver.as_mut() {
            match receiver.try_recv() {
                Ok(None) => {}
                Ok(Some(Ok(assets))) => {
                    self.state = LoadState::Ready(Arc::new(assets));
                    self.receiver = None;
                }
                Ok(Some(Err(message))) => {
                    log::error!("Asset loading failed: {message}");
                    self.state = LoadState::Failed(message);
                    self.receiver = None;
                }
                Err(oneshot::Canceled) => {
                    self.state = LoadState::Failed("asset loader exited without a result".into());
                    self.receiver = None;
                }
            }
        }
        &self.state
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_config() {
        let paths = AssetPaths::from_config(&AssetConfig::default());
        assert_eq!(paths.model(DisplayMode::Ghost), &PathBuf::from("public/tunic_ghost.glb"));
        assert_eq!(paths.font, PathBuf::from("public/universal-serif.ttf"));
    }

    #[test]
    fn ready_loader_stays_ready() {
        let mut loader = AssetLoader::ready(SceneAssets::new(
            MeshData::default(),
            MeshData::default(),
            None,
        ));
        assert!(loader.poll().assets().is_some());
        assert!(loader.poll().assets().is_some());
    }
}
