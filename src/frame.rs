use std::time::{Duration, Instant};

/// Frame metadata handed to the scene each redraw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    /// Seconds since the clock started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Monotonic frame clock; the first tick has a zero delta
#[derive(Debug)]
pub struct FrameClock {
    frame_number: u64,
    start: Instant,
    last: Option<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_number: 0,
            start: Instant::now(),
            last: None,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn tick(&mut self) -> FrameInfo {
        self.tick_at(Instant::now())
    }

    /// Same as [`FrameClock::tick`] with an explicit timestamp
    pub fn tick_at(&mut self, now: Instant) -> FrameInfo {
        let delta = match self.last {
            Some(last) => now.saturating_duration_since(last).as_secs_f32(),
            None => 0.0,
        };
        let time = now.saturating_duration_since(self.start).as_secs_f32();
        let info = FrameInfo::new(self.frame_number, time, delta);
        self.frame_number += 1;
        self.last = Some(now);
        info
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames per second averaged over a fixed window
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window: Duration,
    accumulated: Duration,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            accumulated: Duration::ZERO,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Returns the new reading when the window rolls over
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        if !(delta >= 0.0) {
            return None;
        }
        self.accumulated += Duration::from_secs_f32(delta);
        self.frames += 1;
        if self.accumulated < self.window {
            return None;
        }
        self.fps = self.frames as f32 / self.accumulated.as_secs_f32();
        self.accumulated = Duration::ZERO;
        self.frames = 0;
        Some(self.fps)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let frame = clock.tick();
        assert_eq!(frame.number, 0);
        assert_eq!(frame.delta, 0.0);
    }

    #[test]
    fn tick_measures_delta() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();
        clock.tick_at(t0);
        let frame = clock.tick_at(t0 + Duration::from_millis(16));
        assert_eq!(frame.number, 1);
        assert!((frame.delta - 0.016).abs() < 1e-4);
        assert_eq!(clock.frame_number(), 2);
    }

    #[test]
    fn fps_reports_after_window() {
        let mut fps = FpsCounter::new(Duration::from_millis(100));
        let mut reading = None;
        for _ in 0..10 {
            reading = reading.or(fps.record(0.02));
        }
        let value = reading.unwrap();
        assert!((value - 50.0).abs() < 1.0);
    }
}
