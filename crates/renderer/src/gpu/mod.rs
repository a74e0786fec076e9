//! GPU orchestration for the wave backdrop.
//!
//! The path from uniforms to pixels is deliberately short:
//! - `context` owns wgpu instance/device/surface wiring and knows how to
//!   rebuild swapchain state when the window resizes.
//! - `pipeline` turns a linked shader program into the render pipeline and
//!   the single uniform bind group layout it consumes.
//! - `uniforms` mirrors the WGSL uniform block and is rewritten through the
//!   queue before every frame.
//! - `state` glues the pieces together behind `GpuState`, the only surface
//!   the window loop talks to.

mod context;
mod pipeline;
mod state;
mod uniforms;

pub(crate) use state::GpuState;
