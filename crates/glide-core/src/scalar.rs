//! Single-value `f32` tween.

use std::fmt;

use crate::ease::EaseType;
use crate::tween::{sanitize_duration, step_elapsed, Tween};

/// Sink a tween pushes computed values into.
pub type WriteFn<T> = Box<dyn FnMut(T)>;

/// Interpolates one `f32` from a start to an end value over a duration.
///
/// The start value is sampled from the read accessor once, at construction,
/// and never re-read. Every call to [`Tween::advance`] writes exactly one
/// value through the write accessor.
pub struct ScalarTween {
    start: f32,
    end: f32,
    /// Elapsed time (seconds), clamped to `duration`
    elapsed: f32,
    /// Total duration (seconds), zero for an instant tween
    duration: f32,
    ease: EaseType,
    /// Set by the first advance; a zero-duration tween completes on it
    started: bool,
    write: WriteFn<f32>,
}

impl ScalarTween {
    /// Create a tween from the current value returned by `read` to `end`.
    ///
    /// Negative or NaN durations are treated as zero: the tween jumps to
    /// `end` on its first advance. An infinite duration holds `start` forever.
    pub fn new(
        read: impl FnOnce() -> f32,
        write: impl FnMut(f32) + 'static,
        end: f32,
        duration: f32,
    ) -> Self {
        Self {
            start: read(),
            end,
            elapsed: 0.0,
            duration: sanitize_duration(duration),
            ease: EaseType::Linear,
            started: false,
            write: Box::new(write),
        }
    }

    /// Builder-style curve selection.
    pub fn with_ease(mut self, ease: EaseType) -> Self {
        self.set_ease(ease);
        self
    }

    /// Value captured from the read accessor at construction.
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Committed end value.
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Evaluate the tween at normalized `progress` without side effects.
    ///
    /// Progress `1.0` yields exactly `end`.
    pub fn value_at(&self, progress: f32) -> f32 {
        if progress >= 1.0 {
            return self.end;
        }
        let eased = self.ease.apply(progress);
        self.start + (self.end - self.start) * eased
    }
}

impl Tween for ScalarTween {
    fn advance(&mut self, dt: f32) {
        self.started = true;
        self.elapsed = step_elapsed(self.elapsed, dt, self.duration);
        let value = self.value_at(self.progress());
        (self.write)(value);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration && (self.started || self.duration > 0.0)
    }

    fn set_ease(&mut self, ease: EaseType) {
        if !self.is_complete() {
            self.ease = ease;
        }
    }

    fn ease(&self) -> EaseType {
        self.ease
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn duration(&self) -> f32 {
        self.duration
    }
}

impl fmt::Debug for ScalarTween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarTween")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("ease", &self.ease)
            .finish_non_exhaustive()
    }
}
