//! Renderer crate for the wavepaper daemon.
//!
//! The module glues the preview window, `wgpu` rendering pipeline, and the
//! generated wave shaders together. The overall flow is:
//!
//! ```text
//!   CLI / wavepaper
//!          │ RendererConfig
//!          ▼
//!   Renderer::run ──▶ winit event loop ──▶ GpuState::render_frame()
//!          ▲                  │
//!          │                  └─▶ ThemeDirector::frame_theme() ─▶ uniforms
//!          └── clicks ◀───────┘
//! ```
//!
//! `GpuState` owns every GPU resource (surface, device, pipeline, uniform
//! buffer) while `Renderer` stays a thin entry point that hands the
//! configuration to the window loop. Shader failures are reported through
//! [`RendererError`] and never tear the daemon down; frames fall back to a
//! plain clear until a working program is available.

mod compile;
mod gpu;
mod runtime;
mod types;
mod window;

pub use compile::{compile, link, CompiledShader, LinkedProgram, ShaderStage};
pub use runtime::{
    time_source_for_policy, BoxedTimeSource, FixedTimeSource, SteppedTimeSource, SystemTimeSource,
    TimePolicy, TimeSample, TimeSource,
};
pub use types::{FrameTheme, RendererConfig, ThemeDirector};

use anyhow::Result;
use thiserror::Error;

/// Failures surfaced by the renderer.
///
/// Shader problems ([`Compile`](RendererError::Compile) and
/// [`Link`](RendererError::Link)) are recoverable: the render loop logs them
/// and keeps presenting clear-colour frames. Surface problems are not; they
/// leave the daemon without anything to draw on.
#[derive(Debug, Error)]
pub enum RendererError {
    /// The WGSL source for one stage failed to parse.
    #[error("failed to compile {stage} shader: {message}")]
    Compile { stage: ShaderStage, message: String },

    /// Validation or entry-point lookup failed while building the program.
    #[error("failed to link shader program: {message}")]
    Link { message: String },

    /// No adapter, device, or swapchain format could be negotiated.
    #[error("no usable rendering surface: {message}")]
    UnsupportedSurface { message: String },
}

/// High-level renderer entry point.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Creates a renderer with the provided configuration.
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Opens the preview window and drives the event loop until it closes.
    ///
    /// The `director` supplies the clear colour and uniform theme flag for
    /// every frame and receives pointer clicks back from the loop.
    pub fn run(self, director: &mut dyn ThemeDirector) -> Result<()> {
        window::run_windowed(self.config, director)
    }
}
