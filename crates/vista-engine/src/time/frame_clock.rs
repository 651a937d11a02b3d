use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    /// Seconds since the clock started. Not clamped.
    pub elapsed: f32,
    pub now: Instant,
    pub frame_index: u64,
}

/// Produces [`FrameTime`] snapshots.
///
/// `dt` is clamped so a debugger pause or a minimized window does not produce
/// a huge step for anything integrating over time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last: start,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Re-baselines `dt` without touching `elapsed`.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
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

    #[test]
    fn elapsed_is_monotonic_and_unclamped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let a = clock.tick_at(t0 + Duration::from_millis(16));
        let b = clock.tick_at(t0 + Duration::from_secs(2));

        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert!((b.elapsed - 2.0).abs() < 1e-4);
        assert!(b.elapsed > a.elapsed);
    }

    #[test]
    fn dt_is_clamped() {
        let t0 = Instant::now();
        let mut clock = FrameClock::starting_at(t0);

        let stall = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((stall.dt - 0.25).abs() < 1e-6);

        let same = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((same.dt - 0.0001).abs() < 1e-6);
    }
}
