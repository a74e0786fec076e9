use bytemuck::{Pod, Zeroable};
use winit::dpi::PhysicalSize;

use crate::runtime::TimeSample;

/// CPU mirror of the WGSL `WaveUniforms` block.
///
/// Must stay byte-compatible with the uniform struct the `waves` crate
/// emits: `resolution` at offset 0, `time` at 8, `light_mode` at 12, sixteen
/// bytes total. The layout test below pins this down.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(super) struct WaveUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub light_mode: i32,
}

impl WaveUniforms {
    pub fn new(size: PhysicalSize<u32>) -> Self {
        Self {
            resolution: [size.width as f32, size.height as f32],
            time: 0.0,
            light_mode: 0,
        }
    }

    pub fn set_resolution(&mut self, size: PhysicalSize<u32>) {
        self.resolution = [size.width as f32, size.height as f32];
    }

    pub fn set_time(&mut self, sample: TimeSample) {
        self.time = sample.seconds;
    }

    pub fn set_light_mode(&mut self, light_mode: bool) {
        self.light_mode = if light_mode { 1 } else { 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        let uniforms = WaveUniforms::new(PhysicalSize::new(800, 600));
        let base = &uniforms as *const _ as usize;
        let resolution = &uniforms.resolution as *const _ as usize - base;
        let time = &uniforms.time as *const _ as usize - base;
        let light_mode = &uniforms.light_mode as *const _ as usize - base;

        assert_eq!(std::mem::size_of::<WaveUniforms>(), 16);
        assert_eq!(resolution, 0);
        assert_eq!(time, 8);
        assert_eq!(light_mode, 12);
    }

    #[test]
    fn setters_cover_every_field() {
        let mut uniforms = WaveUniforms::new(PhysicalSize::new(1920, 1080));
        assert_eq!(uniforms.resolution, [1920.0, 1080.0]);

        uniforms.set_resolution(PhysicalSize::new(1280, 720));
        uniforms.set_time(TimeSample::new(2.5, 7));
        uniforms.set_light_mode(true);

        assert_eq!(uniforms.resolution, [1280.0, 720.0]);
        assert_eq!(uniforms.time, 2.5);
        assert_eq!(uniforms.light_mode, 1);

        uniforms.set_light_mode(false);
        assert_eq!(uniforms.light_mode, 0);
    }
}
