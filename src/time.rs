use std::time::Instant;

/// Step used when running without a real clock, such as on a reference or null device
pub const REFERENCE_TIME_STEP: f32 = std::f32::consts::PI * 0.0125;

/// Supplies elapsed seconds to `SceneAnimator::tick`, samples never decrease
#[derive(Clone, Debug)]
pub enum TimeSource {
    /// Seconds since the first sample
    WallClock {
        start: Option<Instant>
    },
    /// Advances by `step` seconds on every sample
    FixedStep {
        step: f32,
        elapsed: f32
    }
}

impl TimeSource {
    pub fn wall_clock() -> Self {
        TimeSource::WallClock {
            start: None
        }
    }

    pub fn fixed_step(step: f32) -> Self {
        TimeSource::FixedStep {
            step: f32::max(step, 0.0),
            elapsed: 0.0
        }
    }

    /// Elapsed seconds for the next frame
    pub fn sample(&mut self) -> f32 {
        match self {
            TimeSource::WallClock { start } => {
                let start = start.get_or_insert_with(Instant::now);
                start.elapsed().as_secs_f32()
            }
            TimeSource::FixedStep { step, elapsed } => {
                *elapsed += *step;
                *elapsed
            }
        }
    }
}
