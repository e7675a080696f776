pub mod animation;
pub mod assets;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod loaders;
pub mod material;
pub mod math;
pub mod mode;
pub mod overlay;
pub mod renderer;
pub mod rig;
pub mod scene;
pub mod types;

pub use camera::CameraPose;
pub use config::SceneConfig;
pub use mode::DisplayMode;
pub use rig::{damp, damp3, CameraRig, PointerState};
pub use scene::SceneState;
