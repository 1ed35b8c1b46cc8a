use std::time::{Duration, Instant};

pub struct Delta {
    last_frame: Instant,
    frame_time: Duration,
}
impl Delta {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_time: Duration::ZERO,
        }
    }
    pub fn update(&mut self, new_frame: Instant) {
        self.frame_time = new_frame.duration_since(self.last_frame);
        self.last_frame = new_frame;
    }
    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }
}
