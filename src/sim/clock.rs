//! Fixed-timestep accumulator
//!
//! Converts a stream of frame timestamps into a whole number of simulation
//! ticks whose size depends on the snake's speed, independent of frame rate.

/// Frame clock state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimClock {
    /// Timestamp (ms) of the previous frame; `None` until the first frame
    last_frame_time: Option<f64>,
    /// Time (ms) not yet consumed by ticks
    accumulator: f64,
    /// Wall-clock time (ms) spent playing, for display only
    elapsed_game_time: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame timestamp and return the delta since the previous frame.
    ///
    /// The first observed frame yields 0. Timestamps must not go backwards.
    pub fn observe(&mut self, timestamp_ms: f64) -> f64 {
        let last = self.last_frame_time.unwrap_or(timestamp_ms);
        assert!(
            timestamp_ms >= last,
            "frame timestamp went backwards ({timestamp_ms} < {last})"
        );
        self.last_frame_time = Some(timestamp_ms);
        timestamp_ms - last
    }

    /// Bank a frame delta toward ticks and the play timer
    pub fn accumulate(&mut self, delta_ms: f64) {
        self.elapsed_game_time += delta_ms;
        self.accumulator += delta_ms;
    }

    /// Consume one tick of `interval_ms` if enough time has accumulated
    pub fn try_consume(&mut self, interval_ms: f64) -> bool {
        debug_assert!(interval_ms > 0.0);
        if self.accumulator >= interval_ms {
            self.accumulator -= interval_ms;
            true
        } else {
            false
        }
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn elapsed_game_time(&self) -> f64 {
        self.elapsed_game_time
    }

    pub fn last_frame_time(&self) -> Option<f64> {
        self.last_frame_time
    }
}
