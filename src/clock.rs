//! Frame clock supplying `delta_time` to the registry once per frame.

use std::time::Duration;

use web_time::Instant;

/// Source of per-frame delta times (seconds).
#[derive(Debug, Clone)]
pub enum FrameClock {
    /// Constant step; makes a run fully replayable
    Fixed { dt: f32 },
    /// Wall-clock time since the previous frame
    Realtime { last: Instant, frame_budget: Duration },
}

impl FrameClock {
    /// Fixed step at `fps` frames per second (at least 1).
    pub fn fixed(fps: u32) -> Self {
        FrameClock::Fixed {
            dt: 1.0 / fps.max(1) as f32,
        }
    }

    /// Wall clock, pacing frames to roughly `fps`.
    pub fn realtime(fps: u32) -> Self {
        FrameClock::Realtime {
            last: Instant::now(),
            frame_budget: Duration::from_secs_f32(1.0 / fps.max(1) as f32),
        }
    }

    /// Delta for the next frame.
    ///
    /// In realtime mode this sleeps out the rest of the frame budget first.
    pub fn next_delta(&mut self) -> f32 {
        match self {
            FrameClock::Fixed { dt } => *dt,
            FrameClock::Realtime { last, frame_budget } => {
                let spent = last.elapsed();
                if spent < *frame_budget {
                    std::thread::sleep(*frame_budget - spent);
                }
                let now = Instant::now();
                let dt = now.duration_since(*last).as_secs_f32();
                *last = now;
                dt
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_constant() {
        let mut clock = FrameClock::fixed(4);
        assert_eq!(clock.next_delta(), 0.25);
        assert_eq!(clock.next_delta(), 0.25);
    }

    #[test]
    fn test_zero_fps_clamped() {
        let mut clock = FrameClock::fixed(0);
        assert_eq!(clock.next_delta(), 1.0);
    }

    #[test]
    fn test_realtime_respects_budget() {
        let mut clock = FrameClock::realtime(200);
        let dt = clock.next_delta();
        assert!(dt >= 0.004);
    }
}
