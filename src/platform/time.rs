//! Frame clock
//!
//! Turns `requestAnimationFrame` timestamps into per-frame deltas. The clock
//! owns the running flag; the game loop asks it for a delta each frame and
//! stops re-arming when it gets `None`.

/// Delta used for the first frame after (re)starting
pub const NOMINAL_FRAME: f32 = 1.0 / 60.0;

/// Longest frame we simulate in one go (tab switches, debugger pauses)
pub const MAX_FRAME_DELTA: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct FrameClock {
    running: bool,
    /// Previous frame timestamp (ms)
    last_time: Option<f64>,
    max_delta: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            running: false,
            last_time: None,
            max_delta,
        }
    }

    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last_time = None;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds since the previous frame, or `None` once stopped
    pub fn frame(&mut self, now_ms: f64) -> Option<f32> {
        if !self.running {
            return None;
        }
        let dt = match self.last_time {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, self.max_delta),
            None => NOMINAL_FRAME,
        };
        self.last_time = Some(now_ms);
        Some(dt)
    }
}
