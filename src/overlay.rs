//! egui layers: the navigation overlay drawn over the frame, and the status label drawn
//! into the backdrop so the glass model refracts it.

use std::sync::Arc;

use winit::window::Window;

use crate::mode::{DisplayMode, GHOST_ROUTE, HOME_ROUTE};
use crate::scene::{StatusLabel, StatusPlacement};

/// Family name the status font is registered under
pub const STATUS_FONT: &str = "status";
const MAX_STATUS_FONT_PX: f32 = 512.0;

/// What the navigation overlay shows this frame
#[derive(Debug, Clone, Copy)]
pub struct OverlayView<'a> {
    pub location: &'a str,
    pub mode: Option<DisplayMode>,
    pub show_nav: bool,
    pub fps: Option<f32>,
    /// Shown centered at the bottom while assets load
    pub message: Option<&'a str>,
}

/// Tessellated egui output waiting to be recorded into a pass
pub struct PreparedPaint {
    primitives: Vec<egui::ClippedPrimitive>,
    screen: egui_wgpu::ScreenDescriptor,
    free: Vec<egui::TextureId>,
}

/// One egui context and the renderer that draws it
struct EguiLayer {
    ctx: egui::Context,
    renderer: egui_wgpu::Renderer,
}

impl EguiLayer {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        Self {
            ctx: egui::Context::default(),
            renderer: egui_wgpu::Renderer::new(
                device,
                format,
                egui_wgpu::RendererOptions::default(),
            ),
        }
    }

    fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output: egui::FullOutput,
        screen: egui_wgpu::ScreenDescriptor,
    ) -> PreparedPaint {
        let primitives = self.ctx.tessellate(output.shapes, screen.pixels_per_point);
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer
            .update_buffers(device, queue, encoder, &primitives, &screen);
        PreparedPaint {
            primitives,
            screen,
            free: output.textures_delta.free,
        }
    }

    fn paint(&self, pass: &mut wgpu::RenderPass<'static>, prepared: &PreparedPaint) {
        self.renderer
            .render(pass, &prepared.primitives, &prepared.screen);
    }

    fn finish(&mut self, prepared: PreparedPaint) {
        for id in &prepared.free {
            self.renderer.free_texture(id);
        }
    }
}

pub struct Overlay {
    ui: EguiLayer,
    state: egui_winit::State,
    backdrop: EguiLayer,
    status_family: egui::FontFamily,
}

impl Overlay {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        backdrop_format: wgpu::TextureFormat,
    ) -> Self {
        let ui = EguiLayer::new(device, surface_format);
        let state = egui_winit::State::new(
            ui.ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        Self {
            ui,
            state,
            backdrop: EguiLayer::new(device, backdrop_format),
            status_family: egui::FontFamily::Proportional,
        }
    }

    /// Returns true when egui consumed the event
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Registers the TTF used by the status label
    pub fn install_status_font(&mut self, bytes: Vec<u8>) {
        let fonts = status_font_definitions(bytes);
        self.ui.ctx.set_fonts(fonts.clone());
        self.backdrop.ctx.set_fonts(fonts);
        self.status_family = egui::FontFamily::Name(STATUS_FONT.into());
        log::debug!("Status font installed");
    }

    /// Runs the navigation UI; the second value is a route the user picked
    pub fn prepare_ui(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &OverlayView,
        size: (u32, u32),
    ) -> (PreparedPaint, Option<&'static str>) {
        let raw_input = self.state.take_egui_input(window);
        let mut target = None;
        let output = self.ui.ctx.run(raw_input, |ctx| {
            target = draw_overlay(ctx, view);
        });
        self.state
            .handle_platform_output(window, output.platform_output.clone());

        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.0, size.1],
            pixels_per_point: window.scale_factor() as f32,
        };
        let prepared = self.ui.prepare(device, queue, encoder, output, screen);
        (prepared, target)
    }

    /// Lays out the status label in physical pixels
    pub fn prepare_status(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        label: &StatusLabel,
        placement: Option<StatusPlacement>,
        size: (u32, u32),
    ) -> PreparedPaint {
        let raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(size.0 as f32, size.1 as f32),
            )),
            ..Default::default()
        };
        let family = self.status_family.clone();
        let output = self.backdrop.ctx.run(raw_input, |ctx| {
            if let Some(placement) = placement {
                paint_status(ctx, label, placement, family.clone());
            }
        });
        let screen = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [size.0, size.1],
            pixels_per_point: 1.0,
        };
        self.backdrop.prepare(device, queue, encoder, output, screen)
    }

    pub fn paint_ui(&self, pass: &mut wgpu::RenderPass<'static>, prepared: &PreparedPaint) {
        self.ui.paint(pass, prepared);
    }

    pub fn paint_status(&self, pass: &mut wgpu::RenderPass<'static>, prepared: &PreparedPaint) {
        self.backdrop.paint(pass, prepared);
    }

    pub fn finish_ui(&mut self, prepared: PreparedPaint) {
        self.ui.finish(prepared);
    }

    pub fn finish_status(&mut self, prepared: PreparedPaint) {
        self.backdrop.finish(prepared);
    }
}

pub fn status_font_definitions(bytes: Vec<u8>) -> egui::FontDefinitions {
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        STATUS_FONT.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    fonts.families.insert(
        egui::FontFamily::Name(STATUS_FONT.into()),
        vec![STATUS_FONT.to_owned()],
    );
    fonts
}

fn color32(rgb: [f32; 3]) -> egui::Color32 {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    egui::Color32::from_rgb(r, g, b)
}

/// Paints the label centered on its projected anchor
pub fn paint_status(
    ctx: &egui::Context,
    label: &StatusLabel,
    placement: StatusPlacement,
    family: egui::FontFamily,
) {
    let font_px = placement.font_px.clamp(1.0, MAX_STATUS_FONT_PX);
    let color = color32(label.color);
    let job = egui::text::LayoutJob::single_section(
        label.text.clone(),
        egui::TextFormat {
            font_id: egui::FontId::new(font_px, family),
            extra_letter_spacing: label.letter_spacing * font_px,
            color,
            ..Default::default()
        },
    );
    let painter = ctx.layer_painter(egui::LayerId::background());
    let galley = painter.layout_job(job);
    let pos = egui::pos2(placement.center.x, placement.center.y) - galley.size() / 2.0;
    painter.galley(pos, galley, color);
}

/// iOS-style on/off switch
pub fn toggle_switch(ui: &mut egui::Ui, on: &mut bool) -> egui::Response {
    let desired_size = ui.spacing().interact_size.y * egui::vec2(2.0, 1.0);
    let (rect, mut response) = ui.allocate_exact_size(desired_size, egui::Sense::click());
    if response.clicked() {
        *on = !*on;
        response.mark_changed();
    }

    if ui.is_rect_visible(rect) {
        let how_on = ui.ctx().animate_bool_responsive(response.id, *on);
        let visuals = ui.style().interact_selectable(&response, *on);
        let rect = rect.expand(visuals.expansion);
        let radius = 0.5 * rect.height();
        ui.painter().rect(
            rect,
            radius,
            visuals.bg_fill,
            visuals.bg_stroke,
            egui::StrokeKind::Inside,
        );
        let circle_x = egui::lerp((rect.left() + radius)..=(rect.right() - radius), how_on);
        let center = egui::pos2(circle_x, rect.center().y);
        ui.painter()
            .circle(center, 0.75 * radius, visuals.bg_fill, visuals.fg_stroke);
    }

    response
}

/// Navigation links, the Ghost switch and the optional readouts
pub fn draw_overlay(ctx: &egui::Context, view: &OverlayView) -> Option<&'static str> {
    let mut target = None;

    if view.show_nav {
        egui::Area::new(egui::Id::new("nav"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(24.0, 24.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for mode in DisplayMode::ALL {
                        let selected = view.location == mode.route();
                        if ui.selectable_label(selected, mode.label()).clicked() {
                            target = Some(mode.route());
                        }
                    }
                    ui.add_space(16.0);
                    let mut ghost = view.mode == Some(DisplayMode::Ghost);
                    if toggle_switch(ui, &mut ghost).changed() {
                        target = Some(if ghost { GHOST_ROUTE } else { HOME_ROUTE });
                    }
                    ui.label("Ghost");
                });
            });
    }

    if let Some(fps) = view.fps {
        egui::Area::new(egui::Id::new("fps"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-24.0, 24.0))
            .show(ctx, |ui| {
                ui.monospace(format!("{fps:.0} FPS"));
            });
    }

    if let Some(message) = view.message {
        egui::Area::new(egui::Id::new("message"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -32.0))
            .show(ctx, |ui| {
                ui.label(message);
            });
    }

    target
}
