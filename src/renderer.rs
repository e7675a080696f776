use std::sync::Arc;

use anyhow::Result;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::assets::SceneAssets;
use crate::core::GpuContext;
use crate::loaders::MeshData;
use crate::material::{Blending, MaterialVariant, Side};
use crate::mode::DisplayMode;
use crate::overlay::{Overlay, OverlayView};
use crate::scene::SceneState;
use crate::types::{DrawUniform, FrameUniform, ShadowUniform, Vertex};

/// Offscreen target holding everything the glass model refracts
pub const BACKDROP_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
const SHADOW_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::R8Unorm;

const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

const MAX_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Max,
    },
    alpha: wgpu::BlendComponent::REPLACE,
};

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &MeshData, label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

struct UniformSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformSlot {
    fn new<T>(device: &wgpu::Device, layout: &wgpu::BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<T>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    fn write<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }
}

/// Size-dependent textures, rebuilt on resize
struct RenderTargets {
    backdrop_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,
    backdrop_bind_group: wgpu::BindGroup,
}

impl RenderTargets {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        width: u32,
        height: u32,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let backdrop = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Backdrop Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: BACKDROP_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let backdrop_view = backdrop.create_view(&wgpu::TextureViewDescriptor::default());
        let depth_view = depth.create_view(&wgpu::TextureViewDescriptor::default());
        let backdrop_bind_group = texture_bind_group(device, layout, &backdrop_view, sampler, 0);
        Self {
            backdrop_view,
            depth_view,
            backdrop_bind_group,
        }
    }
}

pub struct Renderer {
    gpu: GpuContext,
    overlay: Overlay,
    sampler: wgpu::Sampler,
    texture_layout: wgpu::BindGroupLayout,
    frame_uniform: UniformSlot,
    draw_front: UniformSlot,
    draw_back: UniformSlot,
    shadow_uniform: UniformSlot,
    shadow_map_view: wgpu::TextureView,
    shadow_map_bind_group: wgpu::BindGroup,
    caster_pipeline: wgpu::RenderPipeline,
    plane_pipeline: wgpu::RenderPipeline,
    backside_pipeline: wgpu::RenderPipeline,
    display_pipeline: wgpu::RenderPipeline,
    /// Indexed by `DisplayMode::index`
    model_pipelines: [wgpu::RenderPipeline; 2],
    meshes: [Option<GpuMesh>; 2],
    targets: RenderTargets,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, shadow_resolution: u32) -> Result<Self> {
        let gpu = GpuContext::new(window.clone()).await?;
        let device = gpu.device();
        let (width, height) = gpu.size();

        let uniform_layout = |label: &str| {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(label),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            })
        };
        let frame_layout = uniform_layout("frame_bind_group_layout");
        let draw_layout = uniform_layout("draw_bind_group_layout");
        let shadow_layout = uniform_layout("shadow_bind_group_layout");
        let texture_layout = texture_bind_group_layout(device, 0, "texture_bind_group_layout");
        let shadow_map_layout = texture_bind_group_layout(device, 1, "shadow_map_bind_group_layout");

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let frame_uniform = UniformSlot::new::<FrameUniform>(device, &frame_layout, "Frame Uniform");
        let draw_front = UniformSlot::new::<DrawUniform>(device, &draw_layout, "Draw Front Uniform");
        let draw_back = UniformSlot::new::<DrawUniform>(device, &draw_layout, "Draw Back Uniform");
        let shadow_uniform =
            UniformSlot::new::<ShadowUniform>(device, &shadow_layout, "Shadow Uniform");

        let shadow_map = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Contact Shadow Map"),
            size: wgpu::Extent3d {
                width: shadow_resolution,
                height: shadow_resolution,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SHADOW_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let shadow_map_view = shadow_map.create_view(&wgpu::TextureViewDescriptor::default());
        let shadow_map_bind_group =
            texture_bind_group(device, &shadow_map_layout, &shadow_map_view, &sampler, 1);

        let scene_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
        });
        let display_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Display Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("display.wgsl").into()),
        });

        let layout = |label: &str, groups: &[&wgpu::BindGroupLayout]| {
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(label),
                bind_group_layouts: groups,
                push_constant_ranges: &[],
            })
        };
        let caster_layout = layout("Caster Pipeline Layout", &[&shadow_layout, &draw_layout]);
        let plane_layout = layout("Plane Pipeline Layout", &[&shadow_layout, &shadow_map_layout]);
        let model_layout = layout("Model Pipeline Layout", &[&frame_layout, &draw_layout]);
        let refraction_layout = layout(
            "Refraction Pipeline Layout",
            &[&frame_layout, &draw_layout, &texture_layout],
        );
        let display_layout = layout("Display Pipeline Layout", &[&texture_layout]);

        let caster_pipeline = create_pipeline(
            device,
            PipelineSpec {
                label: "Shadow Caster Pipeline",
                layout: &caster_layout,
                shader: &shadow_shader,
                vs_entry: "vs_caster",
                fs_entry: "fs_caster",
                vertex_buffers: &[Vertex::layout()],
                format: SHADOW_FORMAT,
                blend: Some(MAX_BLENDING),
                cull_mode: None,
                depth: None,
            },
        );
        let plane_pipeline = create_pipeline(
            device,
            PipelineSpec {
                label: "Shadow Plane Pipeline",
                layout: &plane_layout,
                shader: &shadow_shader,
                vs_entry: "vs_plane",
                fs_entry: "fs_plane",
                vertex_buffers: &[],
                format: BACKDROP_FORMAT,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                cull_mode: None,
                depth: Some((true, wgpu::CompareFunction::Less)),
            },
        );
        let backside_pipeline = create_pipeline(
            device,
            PipelineSpec {
                label: "Backside Pipeline",
                layout: &model_layout,
                shader: &scene_shader,
                vs_entry: "vs_main",
                fs_entry: "fs_backside",
                vertex_buffers: &[Vertex::layout()],
                format: BACKDROP_FORMAT,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                cull_mode: Some(wgpu::Face::Front),
                depth: Some((true, wgpu::CompareFunction::Less)),
            },
        );
        let display_pipeline = create_pipeline(
            device,
            PipelineSpec {
                label: "Display Pipeline",
                layout: &display_layout,
                shader: &display_shader,
                vs_entry: "vs_main",
                fs_entry: "fs_main",
                vertex_buffers: &[],
                format: gpu.format(),
                blend: Some(wgpu::BlendState::REPLACE),
                cull_mode: None,
                depth: Some((false, wgpu::CompareFunction::Always)),
            },
        );

        let model_pipelines = DisplayMode::ALL.map(|mode| {
            let material = MaterialVariant::for_mode(mode);
            let (label, fs_entry, layout) = match material {
                MaterialVariant::Transmission(_) => {
                    ("Transmission Pipeline", "fs_transmission", &refraction_layout)
                }
                MaterialVariant::XRay(_) => ("X-Ray Pipeline", "fs_xray", &model_layout),
            };
            create_pipeline(
                device,
                PipelineSpec {
                    label,
                    layout,
                    shader: &scene_shader,
                    vs_entry: "vs_main",
                    fs_entry,
                    vertex_buffers: &[Vertex::layout()],
                    format: gpu.format(),
                    blend: Some(match material.blending() {
                        Blending::Normal => wgpu::BlendState::ALPHA_BLENDING,
                        Blending::Additive => ADDITIVE_BLENDING,
                    }),
                    cull_mode: match material.side() {
                        Side::Front => Some(wgpu::Face::Back),
                        Side::Double => None,
                    },
                    depth: Some((material.depth_write(), wgpu::CompareFunction::Less)),
                },
            )
        });

        let targets = RenderTargets::new(device, &texture_layout, &sampler, width, height);
        let overlay = Overlay::new(&window, device, gpu.format(), BACKDROP_FORMAT);

        log::info!("Renderer ready: {width}x{height}, surface {:?}", gpu.format());

        Ok(Self {
            gpu,
            overlay,
            sampler,
            texture_layout,
            frame_uniform,
            draw_front,
            draw_back,
            shadow_uniform,
            shadow_map_view,
            shadow_map_bind_group,
            caster_pipeline,
            plane_pipeline,
            backside_pipeline,
            display_pipeline,
            model_pipelines,
            meshes: [None, None],
            targets,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.gpu.resize(width, height) {
            self.targets = RenderTargets::new(
                self.gpu.device(),
                &self.texture_layout,
                &self.sampler,
                width,
                height,
            );
        }
    }

    pub fn handle_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.overlay.on_window_event(window, event)
    }

    /// Uploads both model variants and installs the status font
    pub fn upload_assets(&mut self, assets: &SceneAssets) {
        for mode in DisplayMode::ALL {
            self.meshes[mode.index()] = Some(GpuMesh::upload(
                self.gpu.device(),
                assets.mesh(mode),
                mode.label(),
            ));
        }
        if let Some(font) = &assets.font {
            self.overlay.install_status_font(font.clone());
        }
    }

    /// Draws one frame; returns a route picked in the overlay, if any
    pub fn render(
        &mut self,
        window: &Window,
        scene: &SceneState,
        view: &OverlayView,
    ) -> Result<Option<&'static str>> {
        let Some(output) = self.gpu.acquire_frame()? else {
            return Ok(None);
        };
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let size = self.gpu.size();
        let device = self.gpu.device();
        let queue = self.gpu.queue();

        self.frame_uniform
            .write(queue, &scene.frame_uniform(size.0, size.1));
        self.shadow_uniform
            .write(queue, &scene.shadow_uniform(size.0, size.1));

        let material = scene.active_model().map(|variant| variant.material);
        let mesh = scene
            .mode()
            .and_then(|mode| self.meshes[mode.index()].as_ref().map(|mesh| (mode, mesh)));
        if mesh.is_some() {
            if let (Some(front), Some(back)) = (scene.draw_uniform(false), scene.draw_uniform(true)) {
                self.draw_front.write(queue, &front);
                self.draw_back.write(queue, &back);
            }
        }

        let [r, g, b] = scene.background();
        let background = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        // Contact shadow occupancy seen from above
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Caster Pass"),
                color_attachments: &[Some(color_attachment(
                    &self.shadow_map_view,
                    wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                ))],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            match mesh {
                Some((_, mesh)) if scene.contact_shadows() => {
                    pass.set_pipeline(&self.caster_pipeline);
                    pass.set_bind_group(0, &self.shadow_uniform.bind_group, &[]);
                    pass.set_bind_group(1, &self.draw_front.bind_group, &[]);
                    mesh.draw(&mut pass);
                }
                _ => {}
            }
        }

        let status = self.overlay.prepare_status(
            device,
            queue,
            &mut encoder,
            &scene.statics().status,
            scene.status_placement(size.0, size.1),
            size,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Status Pass"),
                    color_attachments: &[Some(color_attachment(
                        &self.targets.backdrop_view,
                        wgpu::LoadOp::Clear(background),
                    ))],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();
            self.overlay.paint_status(&mut pass, &status);
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(color_attachment(
                    &self.targets.backdrop_view,
                    wgpu::LoadOp::Load,
                ))],
                depth_stencil_attachment: Some(depth_attachment(&self.targets.depth_view)),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            if scene.contact_shadows() {
                pass.set_pipeline(&self.plane_pipeline);
                pass.set_bind_group(0, &self.shadow_uniform.bind_group, &[]);
                pass.set_bind_group(1, &self.shadow_map_bind_group, &[]);
                pass.draw(0..6, 0..1);
            }

            if let (Some((_, mesh)), Some(material)) = (mesh, material) {
                if material.has_backside_pass() {
                    pass.set_pipeline(&self.backside_pipeline);
                    pass.set_bind_group(0, &self.frame_uniform.bind_group, &[]);
                    pass.set_bind_group(1, &self.draw_back.bind_group, &[]);
                    mesh.draw(&mut pass);
                }
            }
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Pass"),
                color_attachments: &[Some(color_attachment(
                    &surface_view,
                    wgpu::LoadOp::Clear(background),
                ))],
                depth_stencil_attachment: Some(depth_attachment(&self.targets.depth_view)),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.display_pipeline);
            pass.set_bind_group(0, &self.targets.backdrop_bind_group, &[]);
            pass.draw(0..3, 0..1);

            if let (Some((mode, mesh)), Some(material)) = (mesh, material) {
                pass.set_pipeline(&self.model_pipelines[mode.index()]);
                pass.set_bind_group(0, &self.frame_uniform.bind_group, &[]);
                pass.set_bind_group(1, &self.draw_front.bind_group, &[]);
                if let MaterialVariant::Transmission(_) = material {
                    pass.set_bind_group(2, &self.targets.backdrop_bind_group, &[]);
                }
                mesh.draw(&mut pass);
            }
        }

        let (ui, target) =
            self.overlay
                .prepare_ui(window, device, queue, &mut encoder, view, size);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(color_attachment(
                        &surface_view,
                        wgpu::LoadOp::Load,
                    ))],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();
            self.overlay.paint_ui(&mut pass, &ui);
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.overlay.finish_status(status);
        self.overlay.finish_ui(ui);

        Ok(target)
    }
}

struct PipelineSpec<'a> {
    label: &'a str,
    layout: &'a wgpu::PipelineLayout,
    shader: &'a wgpu::ShaderModule,
    vs_entry: &'a str,
    fs_entry: &'a str,
    vertex_buffers: &'a [wgpu::VertexBufferLayout<'static>],
    format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    cull_mode: Option<wgpu::Face>,
    /// Depth write and compare; `None` for passes without a depth target
    depth: Option<(bool, wgpu::CompareFunction)>,
}

fn create_pipeline(device: &wgpu::Device, spec: PipelineSpec) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(spec.label),
        layout: Some(spec.layout),
        vertex: wgpu::VertexState {
            module: spec.shader,
            entry_point: Some(spec.vs_entry),
            buffers: spec.vertex_buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: spec.shader,
            entry_point: Some(spec.fs_entry),
            targets: &[Some(wgpu::ColorTargetState {
                format: spec.format,
                blend: spec.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: spec.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: spec
            .depth
            .map(|(depth_write_enabled, depth_compare)| wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled,
                depth_compare,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

/// Sampled texture at `first_binding`, its sampler right after
fn texture_bind_group_layout(
    device: &wgpu::Device,
    first_binding: u32,
    label: &str,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: first_binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: first_binding + 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some(label),
    })
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    first_binding: u32,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: first_binding,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: first_binding + 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: None,
    })
}

fn color_attachment(
    view: &wgpu::TextureView,
    load: wgpu::LoadOp<wgpu::Color>,
) -> wgpu::RenderPassColorAttachment<'_> {
    wgpu::RenderPassColorAttachment {
        view,
        resolve_target: None,
        ops: wgpu::Operations {
            load,
            store: wgpu::StoreOp::Store,
        },
        depth_slice: None,
    }
}

fn depth_attachment(view: &wgpu::TextureView) -> wgpu::RenderPassDepthStencilAttachment<'_> {
    wgpu::RenderPassDepthStencilAttachment {
        view,
        depth_ops: Some(wgpu::Operations {
            load: wgpu::LoadOp::Clear(1.0),
            store: wgpu::StoreOp::Store,
        }),
        stencil_ops: None,
    }
}
