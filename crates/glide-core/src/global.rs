//! Process-wide tween registry
//!
//! A thread-local slot holding at most one [`TweenRegistry`] with an explicit
//! lifecycle:
//! - [`init`] creates the registry; calling it again is harmless
//! - [`shutdown`] cancels every tween and clears the slot, so the next
//!   [`init`] starts from a fresh registry
//!
//! Using the free functions before [`init`] logs an error and does nothing.
//! Hosts that prefer dependency injection can ignore this module and pass a
//! [`TweenRegistry`] around directly.

use std::cell::RefCell;

use crate::composite::Composite;
use crate::error::TweenError;
use crate::registry::{TweenHandle, TweenRegistry};

thread_local! {
    static REGISTRY: RefCell<Option<TweenRegistry>> = const { RefCell::new(None) };
}

/// Create the process-wide registry if it does not exist yet.
pub fn init() -> TweenRegistry {
    REGISTRY.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(registry) = slot.as_ref() {
            log::debug!("Tween registry already initialized");
            return registry.clone();
        }
        log::debug!("Tween registry initialized");
        slot.insert(TweenRegistry::new()).clone()
    })
}

/// Cancel every tween and release the process-wide registry.
pub fn shutdown() {
    let registry = REGISTRY.with(|slot| slot.borrow_mut().take());
    match registry {
        Some(registry) => {
            registry.cancel_all();
            log::debug!("Tween registry shut down");
        }
        None => log::debug!("Tween registry shutdown requested but it was not running"),
    }
}

pub fn is_initialized() -> bool {
    REGISTRY.with(|slot| slot.borrow().is_some())
}

/// The process-wide registry, or [`TweenError::Uninitialized`] (logged).
pub fn instance() -> Result<TweenRegistry, TweenError> {
    REGISTRY
        .with(|slot| slot.borrow().clone())
        .ok_or_else(|| {
            log::error!("{}", TweenError::Uninitialized);
            TweenError::Uninitialized
        })
}

/// Advance the process-wide registry. Logs and returns if uninitialized.
pub fn tick(dt: f32) {
    if let Ok(registry) = instance() {
        registry.tick(dt);
    }
}

/// Cancel every tween in the process-wide registry.
pub fn cancel_all() {
    if let Ok(registry) = instance() {
        registry.cancel_all();
    }
}

/// Register an `f32` tween with the process-wide registry.
///
/// The read accessor is not called when the registry is uninitialized.
pub fn tween_f32(
    read: impl FnOnce() -> f32,
    write: impl FnMut(f32) + 'static,
    end: f32,
    duration: f32,
) -> Result<TweenHandle, TweenError> {
    Ok(instance()?.tween_f32(read, write, end, duration))
}

/// Register a composite tween with the process-wide registry.
pub fn tween_composite<V: Composite>(
    read: impl FnOnce() -> V,
    write: impl FnMut(V) + 'static,
    end: V,
    duration: f32,
) -> Result<TweenHandle, TweenError> {
    Ok(instance()?.tween_composite(read, write, end, duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    // Each test runs on its own thread, so the thread-local starts empty.

    #[test]
    fn test_uninitialized_is_reported_not_fatal() {
        assert!(!is_initialized());
        assert_eq!(instance().err(), Some(TweenError::Uninitialized));

        // No-ops rather than panics
        tick(0.016);
        cancel_all();
        shutdown();

        let read_called = Rc::new(Cell::new(false));
        let flag = Rc::clone(&read_called);
        let result = tween_f32(
            move || {
                flag.set(true);
                0.0
            },
            |_| {},
            1.0,
            1.0,
        );
        assert_eq!(result.err(), Some(TweenError::Uninitialized));
        assert!(!read_called.get());
    }

    #[test]
    fn test_init_is_idempotent() {
        let first = init();
        let value = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&value);
        tween_f32(|| 0.0, move |v| sink.set(v), 1.0, 1.0).expect("initialized");

        let second = init();
        assert_eq!(first.active_count(), 1);
        assert_eq!(second.active_count(), 1);

        shutdown();
    }

    #[test]
    fn test_shutdown_then_init_gives_fresh_registry() {
        init();
        let handle = tween_composite(|| glam::Vec2::ZERO, |_| {}, glam::Vec2::ONE, 1.0)
            .expect("initialized");

        shutdown();
        assert!(!is_initialized());
        assert_eq!(handle.status(), crate::TweenStatus::Cancelled);

        let fresh = init();
        assert!(fresh.is_empty());
        assert_eq!(fresh.tick_count(), 0);
        shutdown();
    }

    #[test]
    fn test_global_tick_drives_tweens() {
        init();
        let value = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&value);
        let handle = tween_f32(|| 0.0, move |v| sink.set(v), 4.0, 1.0).expect("initialized");

        tick(0.5);
        assert!((value.get() - 2.0).abs() < 1e-6);
        tick(0.5);
        assert!(handle.is_complete());

        shutdown();
    }
}
