use std::time::{Duration, Instant};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Minimum time between frames.
const FRAME_INTERVAL: Duration = Duration::from_millis(120);

/// Loading indicator shared by every pending row.
pub struct Spinner {
    index: usize,
    last_tick: Instant,
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spinner {
    pub fn new() -> Self {
        Self {
            index: 0,
            last_tick: Instant::now(),
        }
    }

    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[self.index % SPINNER_FRAMES.len()]
    }

    /// Step to the next frame if enough time passed. Returns whether it moved.
    pub fn advance(&mut self) -> bool {
        self.advance_at(Instant::now())
    }

    fn advance_at(&mut self, now: Instant) -> bool {
        if now.duration_since(self.last_tick) >= FRAME_INTERVAL {
            self.index = (self.index + 1) % SPINNER_FRAMES.len();
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}
