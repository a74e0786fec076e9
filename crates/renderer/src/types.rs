use crate::runtime::TimePolicy;

/// Immutable configuration handed to the renderer at start-up.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Initial window size in physical pixels.
    pub surface_size: (u32, u32),
    /// Title for the preview window.
    pub window_title: String,
    /// WGSL source for the vertex stage.
    pub vertex_source: String,
    /// WGSL source for the fragment stage.
    pub fragment_source: String,
    /// How per-frame timestamps are produced.
    pub time_policy: TimePolicy,
}

impl Default for RendererConfig {
    /// Provides a 1080p animating configuration with no shaders selected.
    fn default() -> Self {
        Self {
            surface_size: (1920, 1080),
            window_title: "wavepaper".to_string(),
            vertex_source: String::new(),
            fragment_source: String::new(),
            time_policy: TimePolicy::default(),
        }
    }
}

/// Presentation state for one frame.
///
/// The clear colour and the uniform flag always travel together so a frame
/// can never mix the light backdrop with the dark wave palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTheme {
    /// Colour the pass clears to before the waves are composited.
    pub clear_color: wgpu::Color,
    /// Whether the fragment stage inverts the accumulated waves against
    /// white.
    pub light_mode: bool,
}

impl FrameTheme {
    /// Opaque white backdrop with the wave sum subtracted from white.
    pub fn light() -> Self {
        Self {
            clear_color: wgpu::Color::WHITE,
            light_mode: true,
        }
    }

    /// Transparent black backdrop with the raw wave sum.
    pub fn dark() -> Self {
        Self {
            clear_color: wgpu::Color::TRANSPARENT,
            light_mode: false,
        }
    }
}

/// Application hooks the render loop calls into.
///
/// The loop pulls a [`FrameTheme`] before every frame and pushes pointer
/// presses back. `on_surface_ready` fires once after the window exists so the
/// caller can react to the real viewport size before anything is drawn.
pub trait ThemeDirector {
    /// The surface came up with the given size in physical pixels.
    fn on_surface_ready(&mut self, width: u32, height: u32);

    /// Presentation state for the frame about to be encoded.
    fn frame_theme(&self) -> FrameTheme;

    /// A left pointer press landed on the surface.
    fn handle_click(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_constructors_pair_clear_colour_with_the_flag() {
        let light = FrameTheme::light();
        assert_eq!(light.clear_color, wgpu::Color::WHITE);
        assert!(light.light_mode);

        let dark = FrameTheme::dark();
        assert_eq!(dark.clear_color, wgpu::Color::TRANSPARENT);
        assert!(!dark.light_mode);
    }
}
