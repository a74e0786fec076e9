use std::sync::Arc;

use tracing::{info, warn};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::RendererError;

/// Owns the presentation surface plus the device and queue that feed it.
pub(super) struct SurfaceContext {
    pub(super) surface: wgpu::Surface<'static>,
    pub(super) device: wgpu::Device,
    pub(super) queue: wgpu::Queue,
    pub(super) config: wgpu::SurfaceConfiguration,
    pub(super) size: PhysicalSize<u32>,
    max_dimension: u32,
}

impl SurfaceContext {
    /// Brings up the adapter, device, and swapchain for the given window.
    ///
    /// Every failure along the way collapses into
    /// [`RendererError::UnsupportedSurface`]; the caller decides whether the
    /// process keeps running without a canvas.
    pub(super) fn new(
        window: Arc<Window>,
        size: PhysicalSize<u32>,
    ) -> Result<Self, RendererError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface =
            instance
                .create_surface(window)
                .map_err(|err| RendererError::UnsupportedSurface {
                    message: format!("failed to create rendering surface: {err}"),
                })?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|err| RendererError::UnsupportedSurface {
            message: format!("no suitable GPU adapter: {err}"),
        })?;

        let info = adapter.get_info();
        info!(adapter = %info.name, backend = ?info.backend, "selected GPU adapter");

        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
                label: Some("wavepaper device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            }))
            .map_err(|err| RendererError::UnsupportedSurface {
                message: format!("failed to acquire GPU device: {err}"),
            })?;

        let capabilities = surface.get_capabilities(&adapter);
        // The wave maths was written against a non-sRGB framebuffer; prefer a
        // gamma format so the shader output is not re-encoded.
        let format = match capabilities
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
        {
            Some(format) => format,
            None => capabilities.formats.first().copied().ok_or_else(|| {
                RendererError::UnsupportedSurface {
                    message: "surface reports no supported formats".to_string(),
                }
            })?,
        };
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let max_dimension = device.limits().max_texture_dimension_2d;
        let size = clamp_size(size, max_dimension);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            max_dimension,
        })
    }

    /// Reconfigures the swapchain for a new window size.
    ///
    /// Zero-sized updates are ignored; they show up transiently while a
    /// window is minimised and cannot be configured.
    pub(super) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let Some(new_size) = configurable_size(new_size, self.max_dimension) else {
            return;
        };
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }
}

fn clamp_size(size: PhysicalSize<u32>, max_dimension: u32) -> PhysicalSize<u32> {
    if size.width > max_dimension || size.height > max_dimension {
        warn!(
            width = size.width,
            height = size.height,
            max = max_dimension,
            "requested surface exceeds device limits, clamping"
        );
    }
    PhysicalSize::new(
        size.width.max(1).min(max_dimension),
        size.height.max(1).min(max_dimension),
    )
}

/// Size `resize` may reconfigure to: `None` for a zero dimension, otherwise
/// the requested size clamped to the device limit.
fn configurable_size(size: PhysicalSize<u32>, max_dimension: u32) -> Option<PhysicalSize<u32>> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    Some(clamp_size(size, max_dimension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_size_respects_device_limits() {
        let kept = clamp_size(PhysicalSize::new(1920, 1080), 8192);
        assert_eq!(kept, PhysicalSize::new(1920, 1080));

        let clamped = clamp_size(PhysicalSize::new(10_000, 4096), 8192);
        assert_eq!(clamped, PhysicalSize::new(8192, 4096));

        let floored = clamp_size(PhysicalSize::new(0, 0), 8192);
        assert_eq!(floored, PhysicalSize::new(1, 1));
    }

    #[test]
    fn zero_sized_updates_are_not_configurable() {
        assert_eq!(configurable_size(PhysicalSize::new(0, 1080), 8192), None);
        assert_eq!(configurable_size(PhysicalSize::new(1920, 0), 8192), None);

        assert_eq!(
            configurable_size(PhysicalSize::new(1920, 1080), 8192),
            Some(PhysicalSize::new(1920, 1080))
        );
        assert_eq!(
            configurable_size(PhysicalSize::new(10_000, 1080), 8192),
            Some(PhysicalSize::new(8192, 1080))
        );
    }
}
