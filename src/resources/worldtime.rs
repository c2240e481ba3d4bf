//! Simulation timing snapshot.
//!
//! Units are milliseconds, matching the velocities used by game code
//! (pixels per millisecond).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldTime {
    /// Scaled milliseconds since the first frame started.
    pub elapsed: f64,
    /// Scaled milliseconds of the current frame.
    pub delta: f32,
    /// Multiplier applied to raw frame deltas; 0 freezes integration.
    pub time_scale: f32,
    /// Frames started so far; the current frame's number.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Start a new frame whose unscaled length is `raw_dt` milliseconds.
    pub fn begin_frame(&mut self, raw_dt: f64) {
        let scaled = raw_dt * self.time_scale as f64;
        self.frame_count += 1;
        self.delta = scaled as f32;
        self.elapsed += scaled;
    }
}
