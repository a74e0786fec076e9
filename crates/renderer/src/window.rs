use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::gpu::GpuState;
use crate::types::{RendererConfig, ThemeDirector};

/// Opens the preview window and blocks on the event loop until it closes.
///
/// The loop repaints continuously: every `AboutToWait` requests another
/// redraw and presentation is paced by the swapchain. Surface loss is healed
/// in place; only device memory exhaustion or a window close ends the loop.
pub(crate) fn run_windowed(
    config: RendererConfig,
    director: &mut dyn ThemeDirector,
) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let (width, height) = config.surface_size;
    let window = WindowBuilder::new()
        .with_title(&config.window_title)
        .with_inner_size(PhysicalSize::new(width, height))
        .build(&event_loop)
        .context("failed to create preview window")?;
    let window = Arc::new(window);

    // Some platforms report a zero inner size until the first configure.
    let initial_size = window.inner_size();
    let initial_size = if initial_size.width == 0 || initial_size.height == 0 {
        PhysicalSize::new(width, height)
    } else {
        initial_size
    };

    let mut gpu = match GpuState::new(window.clone(), initial_size, &config) {
        Ok(state) => Some(state),
        Err(err) => {
            error!(%err, "GPU surface unavailable, window stays blank");
            None
        }
    };

    director.on_surface_ready(initial_size.width, initial_size.height);

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Wait);
            match event {
                Event::WindowEvent { window_id, event } if window_id == window.id() => {
                    match event {
                        WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                            info!("window closed, shutting down");
                            elwt.exit();
                        }
                        WindowEvent::MouseInput {
                            state: button_state,
                            button,
                            ..
                        } => {
                            if button_state == ElementState::Pressed
                                && button == MouseButton::Left
                            {
                                director.handle_click();
                                window.request_redraw();
                            }
                        }
                        WindowEvent::Resized(new_size) => {
                            if let Some(state) = gpu.as_mut() {
                                state.resize(new_size);
                            }
                        }
                        WindowEvent::ScaleFactorChanged { .. } => {
                            // The matching Resized event carries the new
                            // physical size.
                        }
                        WindowEvent::RedrawRequested => {
                            if let Some(state) = gpu.as_mut() {
                                match state.render_frame(director.frame_theme()) {
                                    Ok(()) => {}
                                    Err(
                                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                                    ) => {
                                        let size = state.size();
                                        state.resize(size);
                                    }
                                    Err(wgpu::SurfaceError::OutOfMemory) => {
                                        error!("GPU reports out of memory, exiting");
                                        elwt.exit();
                                    }
                                    Err(err) => {
                                        warn!(%err, "transient surface error, retrying");
                                    }
                                }
                            }
                        }
                        _ => {}
                    }
                }
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .context("event loop terminated abnormally")
}
