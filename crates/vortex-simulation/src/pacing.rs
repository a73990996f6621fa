//! Fixed-interval frame pacing and frame time bookkeeping

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const FRAME_TIME_WINDOW: usize = 100;

/// Sleeps away whatever is left of the target frame interval
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePacer {
    frame_interval: Duration,
}

impl FramePacer {
    pub fn new(frame_interval: Duration) -> Self {
        Self { frame_interval }
    }

    /// Never sleeps
    pub fn unpaced() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Time left in the frame after `elapsed` of work; zero once over budget
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.frame_interval.saturating_sub(elapsed)
    }

    /// Sleep until `frame_start + frame_interval`. Returns the work time measured before sleeping.
    pub fn pace(&self, frame_start: Instant) -> Duration {
        let elapsed = frame_start.elapsed();
        let remaining = self.remaining(elapsed);
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        elapsed
    }
}

/// Rolling frame time statistics (last 100 frames)
#[derive(Debug, Default)]
pub struct FrameStats {
    frame_times: VecDeque<f32>, // milliseconds
    last_frame: Option<Instant>,
    frame_count: u64,
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(FRAME_TIME_WINDOW),
            ..Default::default()
        }
    }

    /// Record the time since the previous call as one frame
    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last_frame {
            self.record(now.saturating_duration_since(last));
        }
        self.last_frame = Some(now);
    }

    pub fn record(&mut self, frame_time: Duration) {
        self.frame_times.push_back(frame_time.as_secs_f32() * 1000.0);
        if self.frame_times.len() > FRAME_TIME_WINDOW {
            self.frame_times.pop_front();
        }
        self.frame_count += 1;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn average_frame_time_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32
    }

    pub fn fps(&self) -> f32 {
        let average = self.average_frame_time_ms();
        if average > 0.0 {
            1000.0 / average
        } else {
            0.0
        }
    }
}
