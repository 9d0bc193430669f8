use std::time::Duration;

/// How many ticks a frame should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPlan {
    /// Whole ticks to simulate now.
    pub ticks_to_run: u32,
    /// Time discarded because the per-frame cap was hit.
    pub dropped_backlog: Duration,
}

/// Fixed-timestep accumulator.
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
    max_frame_delta: Duration,
    accumulator: Duration,
}

impl FixedStep {
    /// Clock running `ticks_per_second` ticks, at most `max_ticks_per_frame`
    /// per frame. Both are raised to 1 if zero.
    pub fn new(ticks_per_second: u32, max_ticks_per_frame: u32) -> Self {
        Self {
            fixed_dt: Duration::from_secs_f64(1.0 / f64::from(ticks_per_second.max(1))),
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            max_frame_delta: Duration::from_millis(250),
            accumulator: Duration::ZERO,
        }
    }

    /// Length of one tick.
    pub fn fixed_dt(&self) -> Duration {
        self.fixed_dt
    }

    /// Adds a frame's elapsed time and returns the ticks it pays for.
    pub fn advance(&mut self, frame_dt: Duration) -> StepPlan {
        self.accumulator = self
            .accumulator
            .saturating_add(frame_dt.min(self.max_frame_delta));

        let mut ticks_to_run = 0u32;
        while self.accumulator >= self.fixed_dt && ticks_to_run < self.max_ticks_per_frame {
            self.accumulator = self.accumulator.saturating_sub(self.fixed_dt);
            ticks_to_run += 1;
        }

        let dropped_backlog = if self.accumulator >= self.fixed_dt {
            std::mem::take(&mut self.accumulator)
        } else {
            Duration::ZERO
        };

        StepPlan {
            ticks_to_run,
            dropped_backlog,
        }
    }
}
