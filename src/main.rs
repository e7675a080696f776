use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use tunic_viewer::assets::{AssetLoader, AssetPaths, LoadState};
use tunic_viewer::cli::Cli;
use tunic_viewer::config::SceneConfig;
use tunic_viewer::core::{Button, Controller, WinitController};
use tunic_viewer::frame::{FpsCounter, FrameClock};
use tunic_viewer::mode::{GHOST_ROUTE, HOME_ROUTE};
use tunic_viewer::overlay::OverlayView;
use tunic_viewer::renderer::Renderer;
use tunic_viewer::scene::SceneState;

const LOADING_MESSAGE: &str = "Loading models...";

struct App {
    cli: Cli,
    config: SceneConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: SceneState,
    controller: WinitController,
    loader: AssetLoader,
    assets_uploaded: bool,
    clock: FrameClock,
    fps: FpsCounter,
    /// First fatal error, returned from `main` after the loop exits
    error: Option<anyhow::Error>,
}

impl App {
    fn new(cli: Cli, config: SceneConfig, loader: AssetLoader) -> Result<Self> {
        let scene = SceneState::new(&config)?;
        let controller = WinitController::new(config.window.width, config.window.height);
        Ok(Self {
            cli,
            config,
            window: None,
            renderer: None,
            scene,
            controller,
            loader,
            assets_uploaded: false,
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    fn handle_buttons(&mut self, event_loop: &ActiveEventLoop) {
        for button in self.controller.take_pressed() {
            match button {
                Button::Quit => event_loop.exit(),
                Button::ToggleMode => {
                    self.scene.toggle_mode();
                }
                Button::RouteNormal => {
                    self.scene.navigate(HOME_ROUTE);
                }
                Button::RouteGhost => {
                    self.scene.navigate(GHOST_ROUTE);
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.handle_buttons(event_loop);

        let message = match self.loader.poll().clone() {
            LoadState::Pending => Some(LOADING_MESSAGE),
            LoadState::Ready(assets) => {
                if !self.assets_uploaded {
                    if let Some(renderer) = self.renderer.as_mut() {
                        renderer.upload_assets(&assets);
                        self.assets_uploaded = true;
                    }
                }
                None
            }
            LoadState::Failed(message) => {
                self.fail(event_loop, anyhow!(message));
                return;
            }
        };

        let frame = self.clock.tick();
        self.fps.record(frame.delta);
        self.scene.update(&frame, self.controller.pointer());

        let (Some(renderer), Some(window)) = (self.renderer.as_mut(), self.window.as_ref()) else {
            return;
        };
        let view = OverlayView {
            location: self.scene.location(),
            mode: self.scene.mode(),
            show_nav: !self.cli.no_ui,
            fps: self.cli.show_fps.then(|| self.fps.fps()),
            message,
        };
        match renderer.render(window, &self.scene, &view) {
            Ok(Some(route)) => {
                self.scene.navigate(route);
            }
            Ok(None) => {}
            Err(e) => self.fail(event_loop, e.context("Render failed")),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title(self.config.window.title.clone())
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    self.fail(event_loop, anyhow!(e).context("Failed to create window"));
                    return;
                }
            };

            let renderer = match pollster::block_on(Renderer::new(
                window.clone(),
                self.config.shadows.resolution,
            )) {
                Ok(renderer) => renderer,
                Err(e) => {
                    self.fail(event_loop, e.context("Failed to initialize renderer"));
                    return;
                }
            };

            let size = window.inner_size();
            self.controller.set_viewport(size.width, size.height);
            self.window = Some(window);
            self.renderer = Some(renderer);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui see the event first; the pointer keeps tracking under the overlay
        let consumed = match (&mut self.renderer, &self.window) {
            (Some(renderer), Some(window)) => renderer.handle_event(window, &event),
            _ => false,
        };
        if !consumed || matches!(event, WindowEvent::CursorMoved { .. } | WindowEvent::Resized(_)) {
            self.controller.process_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    log::info!(
        "Starting at {} with assets from {}",
        tunic_viewer::mode::normalize_route(&config.initial_route),
        config.assets.dir.display()
    );

    let loader = AssetLoader::spawn(AssetPaths::from_config(&config.assets))?;
    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, config, loader)?;

    log::info!("Controls: move the mouse to orbit, G/Tab toggles ghost, 1/2 pick a route, Escape quits");
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => {
            log::info!("Shutting down");
            Ok(())
        }
    }
}
