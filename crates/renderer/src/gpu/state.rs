use std::sync::Arc;

use tracing::error;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::compile::{compile, link, LinkedProgram, ShaderStage};
use crate::runtime::{time_source_for_policy, BoxedTimeSource};
use crate::types::{FrameTheme, RendererConfig};
use crate::RendererError;

use super::context::SurfaceContext;
use super::pipeline::{uniform_bind_group_layout, WavePipeline, QUAD_VERTICES};
use super::uniforms::WaveUniforms;

/// Owns every GPU resource behind the preview window.
///
/// Construction only fails when no surface can be negotiated. A rejected
/// shader program downgrades the state to clear-only frames instead of
/// failing, so the daemon keeps presenting the backdrop colour.
pub(crate) struct GpuState {
    context: SurfaceContext,
    pipeline: Option<WavePipeline>,
    quad: wgpu::Buffer,
    uniforms: WaveUniforms,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    time_source: BoxedTimeSource,
}

impl GpuState {
    pub(crate) fn new(
        window: Arc<Window>,
        size: PhysicalSize<u32>,
        config: &RendererConfig,
    ) -> Result<Self, RendererError> {
        let context = SurfaceContext::new(window, size)?;
        let layout = uniform_bind_group_layout(&context.device);

        let pipeline = match build_program(&context.device, config) {
            Ok(program) => Some(WavePipeline::new(
                &context.device,
                context.config.format,
                &layout,
                &program,
            )),
            Err(err) => {
                error!(%err, "wave shader rejected, presenting clear frames only");
                None
            }
        };

        let quad = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("wave quad vertices"),
                contents: bytemuck::cast_slice(&QUAD_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let uniforms = WaveUniforms::new(context.size);
        let uniform_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("wave uniforms"),
            size: std::mem::size_of::<WaveUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("wave uniforms bind group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            context,
            pipeline,
            quad,
            uniforms,
            uniform_buffer,
            bind_group,
            time_source: time_source_for_policy(config.time_policy),
        })
    }

    /// Encodes and presents one frame with the supplied theme.
    ///
    /// The whole uniform block is rewritten first so resolution, clock, and
    /// theme flag can never drift apart within a frame.
    pub(crate) fn render_frame(&mut self, theme: FrameTheme) -> Result<(), wgpu::SurfaceError> {
        let sample = self.time_source.sample();
        self.uniforms.set_resolution(self.context.size);
        self.uniforms.set_time(sample);
        self.uniforms.set_light_mode(theme.light_mode);
        self.context.queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&self.uniforms),
        );

        let frame = self.context.surface.get_current_texture()?;
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("wave frame encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("wave pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(theme.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(wave) = &self.pipeline {
                pass.set_pipeline(&wave.pipeline);
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, self.quad.slice(..));
                pass.draw(0..QUAD_VERTICES.len() as u32, 0..1);
            }
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.context.resize(new_size);
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }
}

fn build_program(
    device: &wgpu::Device,
    config: &RendererConfig,
) -> Result<LinkedProgram, RendererError> {
    let vertex = compile(&config.vertex_source, ShaderStage::Vertex)?;
    let fragment = compile(&config.fragment_source, ShaderStage::Fragment)?;
    link(device, vertex, fragment)
}
