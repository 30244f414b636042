use std::time::Instant;

pub const FPS_REPORT_INTERVAL: f32 = 1.0;

/// Wall-clock pacing for the render loop. The tour itself is tick-driven
/// and never reads time; this clock only exists to average frame rate over
/// a reporting window.
pub struct FrameClock {
    last_frame: Instant,
    frames: u32,
    elapsed: f32,
    report_interval: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_report_interval(FPS_REPORT_INTERVAL)
    }

    pub fn with_report_interval(seconds: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            frames: 0,
            elapsed: 0.0,
            report_interval: seconds,
        }
    }

    /// Mark one rendered frame. Once per report interval this returns the
    /// FPS averaged over the elapsed window, `None` on every other frame.
    pub fn tick(&mut self) -> Option<f32> {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.report_interval && self.elapsed > 0.0 {
            let fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(fps)
        } else {
            None
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn stays_quiet_within_the_interval() {
        let mut clock = FrameClock::with_report_interval(3600.0);
        for _ in 0..5 {
            assert_eq!(clock.tick(), None);
        }
    }

    #[test]
    fn reports_once_the_interval_elapses() {
        let mut clock = FrameClock::with_report_interval(0.0);
        thread::sleep(Duration::from_millis(1));

        let fps = clock.tick().expect("an elapsed window should report");
        assert!(fps.is_finite());
        assert!(fps > 0.0);
    }

    #[test]
    fn window_resets_after_a_report() {
        let mut clock = FrameClock::with_report_interval(0.05);
        thread::sleep(Duration::from_millis(60));
        assert!(clock.tick().is_some());

        // Fresh window right after a report: nothing to say yet.
        assert_eq!(clock.tick(), None);
    }
}
