use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use wgpu::{BindGroup, Buffer, Device, RenderPipeline, Surface, SurfaceConfiguration};
use winit::window::Window;

use super::error::{HostError, HostErrorSender};
use super::gpu_context::GpuContext;
use super::renderer::{FrameRenderer, LineFrame};
use crate::math::Viewport;

/// Two triangles per stroked segment
const MAX_VERTICES: usize = 6;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct LineUniform {
    projection: [[f32; 4]; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct LineVertex {
    position: [f32; 2],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Draws the stroked segment onto a window surface.
///
/// Presenting the surface texture is the buffer swap; the surface is
/// reconfigured whenever the framebuffer size changes or the platform
/// reports it lost or outdated.
pub struct LineRenderer {
    gpu: GpuContext,
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,
    render_pipeline: RenderPipeline,
    uniform_buffer: Buffer,
    vertex_buffer: Buffer,
    bind_group: BindGroup,
    needs_reconfigure: bool,
}

impl LineRenderer {
    /// Create the drawing context for a window
    pub fn new(window: Arc<Window>, errors: HostErrorSender) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;

        let gpu = pollster::block_on(GpuContext::new(&instance, &surface))?;
        gpu.report_errors_to(errors);

        let surface_caps = surface.get_capabilities(gpu.adapter());
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .context("Surface reports no alpha modes")?;

        let surface_config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let needs_reconfigure = size.width == 0 || size.height == 0;
        if !needs_reconfigure {
            surface.configure(gpu.device(), &surface_config);
        }

        let uniform_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("Line Uniform Buffer"),
            size: std::mem::size_of::<LineUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let vertex_buffer = gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("Line Vertex Buffer"),
            size: (MAX_VERTICES * std::mem::size_of::<LineVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (render_pipeline, bind_group) =
            Self::create_render_pipeline(gpu.device(), &uniform_buffer, surface_format);

        Ok(Self {
            gpu,
            surface,
            surface_config,
            render_pipeline,
            uniform_buffer,
            vertex_buffer,
            bind_group,
            needs_reconfigure,
        })
    }

    fn reconfigure(&mut self) {
        if self.surface_config.width == 0 || self.surface_config.height == 0 {
            return;
        }
        self.surface.configure(self.gpu.device(), &self.surface_config);
        self.needs_reconfigure = false;
    }

    /// Create render pipeline for the stroked segment
    fn create_render_pipeline(
        device: &Device,
        uniform_buffer: &Buffer,
        surface_format: wgpu::TextureFormat,
    ) -> (RenderPipeline, BindGroup) {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Line Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/line.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Line Uniform Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Line Uniform Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Line Render Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Line Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[LineVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        (pipeline, bind_group)
    }
}

impl FrameRenderer for LineRenderer {
    fn configure(&mut self, viewport: Viewport) {
        self.surface_config.width = viewport.width;
        self.surface_config.height = viewport.height;

        // Minimized windows report a zero-sized framebuffer
        if viewport.is_empty() {
            self.needs_reconfigure = true;
            return;
        }
        self.reconfigure();
    }

    fn draw(&mut self, frame: &LineFrame) -> Result<(), HostError> {
        if frame.viewport.is_empty() {
            return Ok(());
        }
        if self.needs_reconfigure {
            self.reconfigure();
        }

        let uniform = LineUniform {
            projection: frame.projection.to_cols_array_2d(),
            color: frame.line_color.to_array(),
        };
        self.gpu
            .queue()
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        let vertices: Vec<LineVertex> = frame
            .stroke
            .iter()
            .take(MAX_VERTICES)
            .map(|v| LineVertex {
                position: v.to_array(),
            })
            .collect();
        if !vertices.is_empty() {
            self.gpu
                .queue()
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e) => {
                if matches!(e, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    self.needs_reconfigure = true;
                }
                return Err(e.into());
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Line Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Line Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(frame.clear_color.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let viewport = frame.viewport;
            render_pass.set_viewport(
                viewport.x as f32,
                viewport.y as f32,
                viewport.width as f32,
                viewport.height as f32,
                0.0,
                1.0,
            );
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..vertices.len() as u32, 0..1);
        }

        self.gpu.queue().submit(Some(encoder.finish()));
        surface_texture.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        // mat4x4<f32> followed by vec4<f32>, both 16-byte aligned
        assert_eq!(std::mem::size_of::<LineUniform>(), 80);
    }

    #[test]
    fn test_vertex_layout() {
        let layout = LineVertex::layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn test_vertices_fit_buffer() {
        let line = crate::math::LineSegment::new(glam::Vec2::ZERO, glam::Vec2::new(10.0, 10.0));
        assert!(line.stroke(3.0).len() <= MAX_VERTICES);
    }
}
