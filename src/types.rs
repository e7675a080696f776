/// Mesh vertex uploaded to the GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub const fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

/// Per-frame data shared by every model draw (group 0 of `scene.wgsl`)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub camera: CameraUniform,
    /// width, height, environment intensity, elapsed seconds
    pub viewport: [f32; 4],
    /// xyz position, w intensity
    pub spot_position: [f32; 4],
    /// xyz unit direction, w cosine of the outer cone
    pub spot_direction: [f32; 4],
    /// x cosine of the inner cone
    pub spot_params: [f32; 4],
    /// xyz position, w intensity
    pub lightformer_position: [f32; 4],
    /// xyz rectangle scale
    pub lightformer_scale: [f32; 4],
}

/// Per-draw transform and material (group 1 of `scene.wgsl`)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// rgb, opacity
    pub color: [f32; 4],
    /// thickness, ior, chromatic aberration, roughness
    pub params: [f32; 4],
}

/// Contact shadow parameters (group 0 of `shadow.wgsl`)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShadowUniform {
    pub view_proj: [[f32; 4]; 4],
    /// plane center xyz, w scale
    pub plane: [f32; 4],
    /// far, opacity, blur, resolution
    pub params: [f32; 4],
}
