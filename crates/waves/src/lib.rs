//! Wave band model shared by the CPU reference path and the GPU shader.
//!
//! The backdrop is a stack of seven sine bands travelling horizontally at
//! different speeds. Each band is described by a [`WaveBand`] entry in
//! [`BANDS`], and every pixel is shaded the same way on both sides of the
//! GPU boundary:
//!
//! ```text
//!   BANDS ──▶ band_contribution() ──▶ accumulate() ──▶ shade()   (host tests)
//!     │
//!     └────▶ fragment_source() ─────▶ naga ──▶ render pipeline   (GPU)
//! ```
//!
//! Keeping the table and the math here means the renderer never hard-codes
//! band constants, and unit tests can pin down pixel behaviour without a
//! device.

/// Distance from a band centre, in multiples of its line width, at which the
/// falloff reaches zero.
pub const WAVE_WIDTH_FACTOR: f32 = 1.5;

const BAND_GREY: [f32; 3] = [0.3, 0.3, 0.3];

/// Parameters for one travelling sine band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveBand {
    /// Horizontal travel speed multiplier.
    pub speed: f32,
    /// Spatial frequency multiplier applied together with `speed`.
    pub frequency: f32,
    /// Peak vertical displacement around `vertical_offset`.
    pub amplitude: f32,
    /// Phase offset added to the horizontal coordinate.
    pub phase_shift: f32,
    /// Vertical centre of the band in uv space (0 = bottom, 1 = top).
    pub vertical_offset: f32,
    /// Linear-space colour the band contributes at full intensity.
    pub base_color: [f32; 3],
    /// Half-thickness of the bright core of the band.
    pub line_width: f32,
    /// Exponent shaping how quickly intensity decays off-centre.
    pub sharpness: f32,
    /// When true the glow bleeds upward instead of downward.
    pub invert_falloff: bool,
}

/// The seven bands of the backdrop, upper trio centred at 0.5 and lower
/// quartet at 0.3.
pub const BANDS: [WaveBand; 7] = [
    WaveBand {
        speed: 0.2,
        frequency: 0.2,
        amplitude: 0.2,
        phase_shift: 0.0,
        vertical_offset: 0.5,
        base_color: BAND_GREY,
        line_width: 0.1,
        sharpness: 15.0,
        invert_falloff: false,
    },
    WaveBand {
        speed: 0.4,
        frequency: 0.4,
        amplitude: 0.15,
        phase_shift: 0.0,
        vertical_offset: 0.5,
        base_color: BAND_GREY,
        line_width: 0.1,
        sharpness: 17.0,
        invert_falloff: false,
    },
    WaveBand {
        speed: 0.3,
        frequency: 0.6,
        amplitude: 0.15,
        phase_shift: 0.0,
        vertical_offset: 0.5,
        base_color: BAND_GREY,
        line_width: 0.05,
        sharpness: 23.0,
        invert_falloff: false,
    },
    WaveBand {
        speed: 0.1,
        frequency: 0.26,
        amplitude: 0.07,
        phase_shift: 0.0,
        vertical_offset: 0.3,
        base_color: BAND_GREY,
        line_width: 0.1,
        sharpness: 17.0,
        invert_falloff: true,
    },
    WaveBand {
        speed: 0.3,
        frequency: 0.36,
        amplitude: 0.07,
        phase_shift: 0.0,
        vertical_offset: 0.3,
        base_color: BAND_GREY,
        line_width: 0.1,
        sharpness: 17.0,
        invert_falloff: true,
    },
    WaveBand {
        speed: 0.5,
        frequency: 0.46,
        amplitude: 0.07,
        phase_shift: 0.0,
        vertical_offset: 0.3,
        base_color: BAND_GREY,
        line_width: 0.05,
        sharpness: 23.0,
        invert_falloff: true,
    },
    WaveBand {
        speed: 0.2,
        frequency: 0.58,
        amplitude: 0.05,
        phase_shift: 0.0,
        vertical_offset: 0.3,
        base_color: BAND_GREY,
        line_width: 0.2,
        sharpness: 15.0,
        invert_falloff: true,
    },
];

/// GLSL-style smoothstep evaluated with whichever edge order the caller
/// passes; the bands use a reversed edge pair so intensity is 1 on the wave
/// centre and 0 at `line_width * WAVE_WIDTH_FACTOR`.
pub fn falloff(edge_from: f32, edge_to: f32, x: f32) -> f32 {
    let t = ((x - edge_from) / (edge_to - edge_from)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Colour contributed by a single band at `uv` and elapsed time `time`.
///
/// `uv` uses a bottom-left origin; `time` is in seconds. Distance to the
/// band centre is quadrupled on the non-glow side, which gives each band a
/// hard edge with the glow trailing off the other way.
pub fn band_contribution(band: &WaveBand, uv: [f32; 2], time: f32) -> [f32; 3] {
    let angle = time * band.speed * band.frequency * -1.0 + (band.phase_shift + uv[0]) * 2.0;
    let wave_y = angle.sin() * band.amplitude + band.vertical_offset;
    let delta_y = wave_y - uv[1];
    let mut dist = delta_y.abs();
    if band.invert_falloff {
        if delta_y > 0.0 {
            dist *= 4.0;
        }
    } else if delta_y < 0.0 {
        dist *= 4.0;
    }
    let reach = band.line_width * WAVE_WIDTH_FACTOR;
    let intensity = falloff(reach, 0.0, dist).powf(band.sharpness);
    [
        (band.base_color[0] * intensity).min(band.base_color[0]),
        (band.base_color[1] * intensity).min(band.base_color[1]),
        (band.base_color[2] * intensity).min(band.base_color[2]),
    ]
}

/// Sum of all band contributions at one pixel. The sum is left unclamped;
/// [`shade`] clamps only on the light-mode inversion path.
pub fn accumulate(uv: [f32; 2], time: f32) -> [f32; 3] {
    let mut accum = [0.0f32; 3];
    for band in &BANDS {
        let contribution = band_contribution(band, uv, time);
        accum[0] += contribution[0];
        accum[1] += contribution[1];
        accum[2] += contribution[2];
    }
    accum
}

/// Final pixel colour, or `None` where the shader discards (no band reaches
/// the pixel). Light mode inverts the clamped accumulation against white so
/// the waves read as dark strokes on a light page.
pub fn shade(uv: [f32; 2], time: f32, light_mode: bool) -> Option<[f32; 4]> {
    let accum = accumulate(uv, time);
    let peak = accum[0].max(accum[1]).max(accum[2]);
    if peak <= 0.0 {
        return None;
    }
    if light_mode {
        Some([
            1.0 - accum[0].clamp(0.0, 1.0),
            1.0 - accum[1].clamp(0.0, 1.0),
            1.0 - accum[2].clamp(0.0, 1.0),
            1.0,
        ])
    } else {
        Some([accum[0], accum[1], accum[2], 1.0])
    }
}

/// Vertex stage for the full-screen quad: four clip-space corners drawn as a
/// triangle strip.
pub const VERTEX_SOURCE: &str = r"struct VertexInput {
    @location(0) position: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> @builtin(position) vec4<f32> {
    return vec4<f32>(input.position, 0.0, 1.0);
}
";

/// Shared fragment declarations: the uniform block, the reversed smoothstep,
/// and the per-band evaluation function mirrored by [`band_contribution`].
const FRAGMENT_PRELUDE: &str = r"struct WaveUniforms {
    resolution: vec2<f32>,
    time: f32,
    light_mode: i32,
}

@group(0) @binding(0) var<uniform> waves: WaveUniforms;

fn falloff(edge_from: f32, edge_to: f32, x: f32) -> f32 {
    let t = clamp((x - edge_from) / (edge_to - edge_from), 0.0, 1.0);
    return t * t * (3.0 - 2.0 * t);
}

fn band_contribution(
    uv: vec2<f32>,
    speed: f32,
    frequency: f32,
    amplitude: f32,
    phase_shift: f32,
    vertical_offset: f32,
    base_color: vec3<f32>,
    line_width: f32,
    sharpness: f32,
    invert_falloff: bool,
) -> vec3<f32> {
    let angle = waves.time * speed * frequency * -1.0 + (phase_shift + uv.x) * 2.0;
    let wave_y = sin(angle) * amplitude + vertical_offset;
    let delta_y = wave_y - uv.y;
    var dist = abs(delta_y);
    if invert_falloff {
        if delta_y > 0.0 {
            dist = dist * 4.0;
        }
    } else if delta_y < 0.0 {
        dist = dist * 4.0;
    }
    let intensity = pow(falloff(line_width * WAVE_WIDTH_FACTOR, 0.0, dist), sharpness);
    return min(base_color * intensity, base_color);
}

@fragment
fn fs_main(@builtin(position) frag_coord: vec4<f32>) -> @location(0) vec4<f32> {
    let uv = vec2<f32>(frag_coord.x, waves.resolution.y - frag_coord.y) / waves.resolution;
    var accum = vec3<f32>(0.0, 0.0, 0.0);
";

const FRAGMENT_EPILOGUE: &str = r"    let peak = max(accum.r, max(accum.g, accum.b));
    if peak <= 0.0 {
        discard;
    }
    if waves.light_mode == 1 {
        let inverted = vec3<f32>(1.0, 1.0, 1.0)
            - clamp(accum, vec3<f32>(0.0, 0.0, 0.0), vec3<f32>(1.0, 1.0, 1.0));
        return vec4<f32>(inverted, 1.0);
    }
    return vec4<f32>(accum, 1.0);
}
";

/// Builds the fragment stage by unrolling [`BANDS`] into one
/// `band_contribution` call per band. The uniform block layout here is the
/// contract the renderer's CPU-side uniform struct must match.
pub fn fragment_source() -> String {
    let mut source = String::with_capacity(2048);
    source.push_str(&format!(
        "const WAVE_WIDTH_FACTOR: f32 = {WAVE_WIDTH_FACTOR:?};\n\n"
    ));
    source.push_str(FRAGMENT_PRELUDE);
    for band in &BANDS {
        let [r, g, b] = band.base_color;
        source.push_str(&format!(
            "    accum += band_contribution(uv, {:?}, {:?}, {:?}, {:?}, {:?}, \
             vec3<f32>({:?}, {:?}, {:?}), {:?}, {:?}, {});\n",
            band.speed,
            band.frequency,
            band.amplitude,
            band.phase_shift,
            band.vertical_offset,
            r,
            g,
            b,
            band.line_width,
            band.sharpness,
            band.invert_falloff,
        ));
    }
    source.push_str(FRAGMENT_EPILOGUE);
    source
}
