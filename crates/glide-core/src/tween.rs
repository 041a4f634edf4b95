//! Common tween contract shared by scalar and composite tweens.
//!
//! The registry drives tweens only through this trait, so it never needs
//! to know the concrete value type being animated.

use crate::ease::EaseType;

/// Capability surface every tween exposes to the registry and the host.
///
/// Cancellation is not part of this trait: it is an ownership operation
/// performed on the registry (see [`crate::TweenHandle::cancel`]).
pub trait Tween {
    /// Advance by `dt` seconds and push the new value through the write accessor.
    fn advance(&mut self, dt: f32);

    /// True once elapsed time has reached the duration.
    fn is_complete(&self) -> bool;

    /// Replace the active easing curve. Ignored once complete.
    fn set_ease(&mut self, ease: EaseType);

    /// Currently active easing curve.
    fn ease(&self) -> EaseType;

    /// Elapsed time in seconds, never greater than the duration.
    fn elapsed(&self) -> f32;

    /// Total duration in seconds.
    fn duration(&self) -> f32;

    /// Normalized progress in `[0, 1]`; a zero duration counts as finished
    /// progress once the first advance has happened.
    fn progress(&self) -> f32 {
        normalized_progress(self.elapsed(), self.duration(), self.is_complete())
    }
}

/// Lifecycle of a tween owned by a registry.
///
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenStatus {
    /// Registered and advanced every tick
    Active,
    /// Reached its duration and was retired
    Completed,
    /// Removed before completion
    Cancelled,
}

impl TweenStatus {
    /// True for `Completed` and `Cancelled`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TweenStatus::Active)
    }
}

/// Negative and NaN durations degrade to zero. An infinite duration never
/// completes.
pub(crate) fn sanitize_duration(duration: f32) -> f32 {
    if duration > 0.0 {
        duration
    } else {
        0.0
    }
}

/// Negative and NaN deltas advance nothing.
pub(crate) fn sanitize_delta(dt: f32) -> f32 {
    if dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Advance a timer, clamped to its duration.
pub(crate) fn step_elapsed(elapsed: f32, dt: f32, duration: f32) -> f32 {
    (elapsed + sanitize_delta(dt)).min(duration)
}

pub(crate) fn normalized_progress(elapsed: f32, duration: f32, complete: bool) -> f32 {
    if complete {
        1.0
    } else if duration <= 0.0 {
        0.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_duration() {
        assert_eq!(sanitize_duration(1.5), 1.5);
        assert_eq!(sanitize_duration(0.0), 0.0);
        assert_eq!(sanitize_duration(-2.0), 0.0);
        assert_eq!(sanitize_duration(f32::NAN), 0.0);
        assert_eq!(sanitize_duration(f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn test_infinite_delta_reaches_duration() {
        assert_eq!(step_elapsed(0.25, f32::INFINITY, 1.0), 1.0);
        assert_eq!(step_elapsed(0.0, f32::INFINITY, f32::INFINITY), f32::INFINITY);
        assert_eq!(step_elapsed(0.5, f32::NEG_INFINITY, 1.0), 0.5);
    }

    #[test]
    fn test_progress_of_infinite_duration() {
        assert_eq!(normalized_progress(1.0e6, f32::INFINITY, false), 0.0);
        assert_eq!(normalized_progress(f32::INFINITY, f32::INFINITY, true), 1.0);
    }

    #[test]
    fn test_step_elapsed_clamps() {
        assert_eq!(step_elapsed(0.5, 0.25, 1.0), 0.75);
        assert_eq!(step_elapsed(0.9, 0.5, 1.0), 1.0);
        assert_eq!(step_elapsed(0.5, -1.0, 1.0), 0.5);
        assert_eq!(step_elapsed(0.5, f32::NAN, 1.0), 0.5);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!TweenStatus::Active.is_terminal());
        assert!(TweenStatus::Completed.is_terminal());
        assert!(TweenStatus::Cancelled.is_terminal());
    }
}
