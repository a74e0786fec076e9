use std::time::Instant;

/// How the shader clock advances between frames.
///
/// `Animate` follows the monotonic system clock and is what the daemon runs
/// with. The other two exist for deterministic rendering: `Fixed` evaluates
/// every frame at one timestamp, `Stepped` advances a simulated clock by a
/// constant amount per sampled frame regardless of wall time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimePolicy {
    /// Follow the monotonic system clock.
    Animate,
    /// Evaluate every frame at the same timestamp, in seconds.
    Fixed { time: f32 },
    /// Advance by `step` seconds per frame, starting at zero.
    Stepped { step: f32 },
}

impl Default for TimePolicy {
    fn default() -> Self {
        Self::Animate
    }
}

/// Snapshot of the clock state uploaded with the frame uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    /// Seconds elapsed on the wall clock or the simulated clock.
    pub seconds: f32,
    /// Frames sampled so far in this session, starting at zero.
    pub frame_index: u64,
}

impl TimeSample {
    pub fn new(seconds: f32, frame_index: u64) -> Self {
        Self {
            seconds,
            frame_index,
        }
    }
}

/// Where frame timestamps come from.
///
/// Implementations are sampled once per presented frame and may be reset when
/// the surface is rebuilt.
pub trait TimeSource: Send {
    /// Rewinds the source to its initial state.
    fn reset(&mut self);
    /// Produces the sample for the frame about to be drawn.
    fn sample(&mut self) -> TimeSample;
}

/// Wall-clock time source backed by [`Instant`].
pub struct SystemTimeSource {
    started: Instant,
    frame_index: u64,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            frame_index: 0,
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn reset(&mut self) {
        self.started = Instant::now();
        self.frame_index = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let sample = TimeSample::new(self.started.elapsed().as_secs_f32(), self.frame_index);
        self.frame_index = self.frame_index.wrapping_add(1);
        sample
    }
}

/// Time source that always reports the same timestamp.
pub struct FixedTimeSource {
    seconds: f32,
    frame_index: u64,
}

impl FixedTimeSource {
    pub fn new(seconds: f32) -> Self {
        Self {
            seconds,
            frame_index: 0,
        }
    }
}

impl TimeSource for FixedTimeSource {
    fn reset(&mut self) {
        self.frame_index = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let sample = TimeSample::new(self.seconds, self.frame_index);
        self.frame_index = self.frame_index.wrapping_add(1);
        sample
    }
}

/// Simulated clock that advances by a fixed step per sampled frame.
///
/// Useful for reproducing a frame sequence without depending on how long the
/// GPU actually took between presents.
pub struct SteppedTimeSource {
    step: f32,
    frame_index: u64,
}

impl SteppedTimeSource {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            frame_index: 0,
        }
    }
}

impl TimeSource for SteppedTimeSource {
    fn reset(&mut self) {
        self.frame_index = 0;
    }

    fn sample(&mut self) -> TimeSample {
        let sample = TimeSample::new(self.step * self.frame_index as f32, self.frame_index);
        self.frame_index = self.frame_index.wrapping_add(1);
        sample
    }
}

/// Owned trait object form used by the render loop.
pub type BoxedTimeSource = Box<dyn TimeSource>;

/// Maps a [`TimePolicy`] onto the time source that realises it.
pub fn time_source_for_policy(policy: TimePolicy) -> BoxedTimeSource {
    match policy {
        TimePolicy::Animate => Box::new(SystemTimeSource::new()),
        TimePolicy::Fixed { time } => Box::new(FixedTimeSource::new(time)),
        TimePolicy::Stepped { step } => Box::new(SteppedTimeSource::new(step)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_source_counts_frames_from_zero() {
        let mut source = SystemTimeSource::new();
        let first = source.sample();
        let second = source.sample();
        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert!(first.seconds >= 0.0);
        assert!(second.seconds >= first.seconds);
    }

    #[test]
    fn fixed_source_repeats_its_timestamp() {
        let mut source = FixedTimeSource::new(1.5);
        assert_eq!(source.sample(), TimeSample::new(1.5, 0));
        assert_eq!(source.sample(), TimeSample::new(1.5, 1));
    }

    #[test]
    fn stepped_source_advances_by_its_step() {
        let mut source = SteppedTimeSource::new(0.25);
        assert_eq!(source.sample(), TimeSample::new(0.0, 0));
        assert_eq!(source.sample(), TimeSample::new(0.25, 1));
        assert_eq!(source.sample(), TimeSample::new(0.5, 2));
    }

    #[test]
    fn reset_rewinds_the_simulated_clocks() {
        let mut source = SteppedTimeSource::new(1.0);
        source.sample();
        source.sample();
        source.reset();
        assert_eq!(source.sample(), TimeSample::new(0.0, 0));
    }

    #[test]
    fn policies_map_onto_matching_sources() {
        let mut fixed = time_source_for_policy(TimePolicy::Fixed { time: 4.0 });
        assert_eq!(fixed.sample().seconds, 4.0);
        assert_eq!(fixed.sample().seconds, 4.0);

        let mut stepped = time_source_for_policy(TimePolicy::Stepped { step: 2.0 });
        stepped.sample();
        assert_eq!(stepped.sample().seconds, 2.0);
    }
}
