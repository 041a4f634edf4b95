//! Tween registry
//!
//! Owns every active tween and advances each of them once per tick.
//!
//! Tweens live in an index-stable arena of generational slots:
//! - removal frees the slot in O(1) and bumps its generation, so stale ids
//!   never alias a tween that later reuses the slot
//! - a tick advances a snapshot of the ids that were live when it started;
//!   tweens added mid-tick wait for the next tick
//! - while a tween advances it is moved out of its slot and the registry
//!   borrow is released, so accessors may add, cancel or query tweens
//!
//! The registry is single-threaded. Clones share the same state.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::composite::{Composite, CompositeTween};
use crate::ease::EaseType;
use crate::scalar::ScalarTween;
use crate::tween::{Tween, TweenStatus};

/// Stable identifier of a tween inside one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId {
    index: u32,
    generation: u32,
}

impl TweenId {
    /// Slot index (reused after the tween is retired).
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Generation of the slot when this id was issued.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for TweenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tween({}v{})", self.index, self.generation)
    }
}

struct Entry {
    /// `None` while the tween is being advanced
    tween: Option<Box<dyn Tween>>,
    /// Shared with every handle to this tween
    status: Rc<Cell<TweenStatus>>,
    /// Curve requested while the tween was in flight
    pending_ease: Option<EaseType>,
}

struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

#[derive(Default)]
struct RegistryInner {
    slots: Vec<Slot>,
    free: Vec<u32>,
    active: usize,
    ticking: bool,
    ticks: u64,
}

impl RegistryInner {
    fn entry_mut(&mut self, id: TweenId) -> Option<&mut Entry> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    fn insert(&mut self, tween: Box<dyn Tween>) -> (TweenId, Rc<Cell<TweenStatus>>) {
        let status = Rc::new(Cell::new(TweenStatus::Active));
        let entry = Entry {
            tween: Some(tween),
            status: Rc::clone(&status),
            pending_ease: None,
        };

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].entry = Some(entry);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                (self.slots.len() - 1) as u32
            }
        };
        self.active += 1;

        let id = TweenId {
            index,
            generation: self.slots[index as usize].generation,
        };
        (id, status)
    }

    /// Remove the entry for `id`, recording `status` as its final state.
    ///
    /// Returns the tween (if it is not in flight) so the caller can drop it
    /// after releasing the registry borrow.
    fn retire(&mut self, id: TweenId, status: TweenStatus) -> Option<Box<dyn Tween>> {
        let slot = self
            .slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let entry = slot.entry.take()?;

        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.active -= 1;
        entry.status.set(status);
        entry.tween
    }

    fn live_ids(&self) -> Vec<TweenId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.entry.is_some())
            .map(|(index, slot)| TweenId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    /// Move the tween out of its slot for advancing.
    fn take_for_advance(&mut self, id: TweenId) -> Option<Box<dyn Tween>> {
        self.entry_mut(id).and_then(|entry| entry.tween.take())
    }

    /// Reconcile a tween after its advance returned.
    ///
    /// Returns the tween when it must be dropped: it completed, it panicked,
    /// or it was cancelled while in flight.
    fn finish_advance(
        &mut self,
        id: TweenId,
        mut tween: Box<dyn Tween>,
        outcome: Result<bool, Box<dyn Any + Send>>,
    ) -> Option<Box<dyn Tween>> {
        let Some(entry) = self.entry_mut(id) else {
            // Cancelled during its own advance (slot freed or reused)
            return Some(tween);
        };

        match outcome {
            Ok(false) => {
                if let Some(ease) = entry.pending_ease.take() {
                    tween.set_ease(ease);
                }
                entry.tween = Some(tween);
                None
            }
            Ok(true) => {
                self.retire(id, TweenStatus::Completed);
                Some(tween)
            }
            Err(payload) => {
                log::error!(
                    "{} panicked during advance, cancelling it: {}",
                    id,
                    panic_message(payload.as_ref())
                );
                self.retire(id, TweenStatus::Cancelled);
                Some(tween)
            }
        }
    }

    fn retire_all(&mut self) -> Vec<Box<dyn Tween>> {
        let mut retired = Vec::with_capacity(self.active);
        for id in self.live_ids() {
            if let Some(tween) = self.retire(id, TweenStatus::Cancelled) {
                retired.push(tween);
            }
        }
        retired
    }
}

impl Drop for RegistryInner {
    fn drop(&mut self) {
        for entry in self.slots.iter().filter_map(|slot| slot.entry.as_ref()) {
            entry.status.set(TweenStatus::Cancelled);
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Owner and driver of all active tweens.
///
/// Cloning is cheap and yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct TweenRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl TweenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tween. It is first advanced on the next tick.
    pub fn add(&self, tween: impl Tween + 'static) -> TweenHandle {
        let (id, status) = self.inner.borrow_mut().insert(Box::new(tween));
        log::debug!("Added {} ({} active)", id, self.active_count());

        TweenHandle {
            id,
            status,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Animate an `f32` from its current value (sampled now) to `end`.
    pub fn tween_f32(
        &self,
        read: impl FnOnce() -> f32,
        write: impl FnMut(f32) + 'static,
        end: f32,
        duration: f32,
    ) -> TweenHandle {
        self.add(ScalarTween::new(read, write, end, duration))
    }

    /// Animate a composite value (e.g. a `Vec3`) axis by axis.
    pub fn tween_composite<V: Composite>(
        &self,
        read: impl FnOnce() -> V,
        write: impl FnMut(V) + 'static,
        end: V,
        duration: f32,
    ) -> TweenHandle {
        self.add(CompositeTween::new(read, write, end, duration))
    }

    /// Advance every tween that was active when the tick started, once.
    ///
    /// Completed tweens are retired after their advance. A tween that panics
    /// is logged and cancelled without affecting the others. Calling `tick`
    /// from inside an accessor is ignored.
    pub fn tick(&self, dt: f32) {
        let snapshot = {
            let Ok(mut inner) = self.inner.try_borrow_mut() else {
                log::warn!("Tween registry is busy; tick ignored");
                return;
            };
            if inner.ticking {
                log::warn!("Nested tween tick ignored");
                return;
            }
            inner.ticking = true;
            inner.ticks += 1;
            inner.live_ids()
        };

        let mut advanced = 0usize;
        for id in snapshot {
            let Some(mut tween) = self.inner.borrow_mut().take_for_advance(id) else {
                // Cancelled earlier in this tick
                continue;
            };

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                tween.advance(dt);
                tween.is_complete()
            }));
            advanced += 1;

            let retired = self.inner.borrow_mut().finish_advance(id, tween, outcome);
            drop(retired);
        }

        let mut inner = self.inner.borrow_mut();
        inner.ticking = false;
        log::trace!(
            "Tick {} (dt {:.4}): advanced {}, {} active",
            inner.ticks,
            dt,
            advanced,
            inner.active
        );
    }

    /// Remove a tween immediately. Unknown and retired ids are ignored.
    ///
    /// A tween cancelled while it is being advanced finishes that advance
    /// and is then dropped; it never advances again.
    pub fn cancel(&self, id: TweenId) {
        let retired = self.inner.borrow_mut().retire(id, TweenStatus::Cancelled);
        if retired.is_some() {
            log::debug!("Cancelled {}", id);
        }
        drop(retired);
    }

    /// Cancel every tween, including one that is currently in flight.
    pub fn cancel_all(&self) {
        let retired = self.inner.borrow_mut().retire_all();
        log::debug!("Cancelled all tweens ({} dropped)", retired.len());
        drop(retired);
    }

    /// Set the curve of a live tween. Returns false if `id` is not live.
    pub fn set_ease(&self, id: TweenId, ease: EaseType) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(entry) = inner.entry_mut(id) else {
            return false;
        };
        match entry.tween.as_mut() {
            Some(tween) => tween.set_ease(ease),
            None => entry.pending_ease = Some(ease),
        }
        true
    }

    /// Whether `id` is still registered (neither completed nor cancelled).
    pub fn contains(&self, id: TweenId) -> bool {
        self.inner.borrow_mut().entry_mut(id).is_some()
    }

    /// Normalized progress of a live tween.
    ///
    /// `None` for retired ids and for a tween that is mid-advance.
    pub fn progress(&self, id: TweenId) -> Option<f32> {
        self.inner
            .borrow_mut()
            .entry_mut(id)
            .and_then(|entry| entry.tween.as_ref().map(|tween| tween.progress()))
    }

    /// Number of registered tweens.
    pub fn active_count(&self) -> usize {
        self.inner.borrow().active
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of ticks run so far (for debug stats).
    pub fn tick_count(&self) -> u64 {
        self.inner.borrow().ticks
    }
}

impl fmt::Debug for TweenRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TweenRegistry")
            .field("active", &inner.active)
            .field("slots", &inner.slots.len())
            .field("ticks", &inner.ticks)
            .finish()
    }
}

/// Host-side handle to a registered tween.
///
/// Holds only a weak reference to the registry: once the registry is gone
/// every operation is a no-op and the status stays `Cancelled`.
#[derive(Clone)]
pub struct TweenHandle {
    id: TweenId,
    status: Rc<Cell<TweenStatus>>,
    registry: Weak<RefCell<RegistryInner>>,
}

impl TweenHandle {
    pub fn id(&self) -> TweenId {
        self.id
    }

    /// Fluent curve selection, e.g. `registry.tween_f32(..).with_ease(EaseType::EaseOutBack)`.
    pub fn with_ease(self, ease: EaseType) -> Self {
        self.set_ease(ease);
        self
    }

    /// Replace the curve. No effect once the tween completed or was cancelled.
    pub fn set_ease(&self, ease: EaseType) -> &Self {
        if self.status.get().is_terminal() {
            return self;
        }
        let Some(registry) = self.registry() else {
            return self;
        };
        if !registry.set_ease(self.id, ease) {
            log::warn!(
                "set_ease({}) on {} which is no longer registered",
                ease,
                self.id
            );
        }
        self
    }

    /// Remove the tween from its registry. Idempotent.
    pub fn cancel(&self) {
        if self.status.get().is_terminal() {
            return;
        }
        if let Some(registry) = self.registry() {
            registry.cancel(self.id);
        }
    }

    /// True once the tween reached its end value and was retired.
    pub fn is_complete(&self) -> bool {
        self.status.get() == TweenStatus::Completed
    }

    /// True while the tween is registered.
    pub fn is_active(&self) -> bool {
        self.status.get() == TweenStatus::Active
    }

    pub fn status(&self) -> TweenStatus {
        self.status.get()
    }

    fn registry(&self) -> Option<TweenRegistry> {
        self.registry
            .upgrade()
            .map(|inner| TweenRegistry { inner })
    }
}

impl fmt::Debug for TweenHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TweenHandle")
            .field("id", &self.id)
            .field("status", &self.status.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter_tween(
        registry: &TweenRegistry,
        cell: &Rc<Cell<f32>>,
        end: f32,
        duration: f32,
    ) -> TweenHandle {
        let read = Rc::clone(cell);
        let write = Rc::clone(cell);
        registry.tween_f32(move || read.get(), move |v| write.set(v), end, duration)
    }

    #[test]
    fn test_add_and_complete() {
        let registry = TweenRegistry::new();
        let value = Rc::new(Cell::new(0.0));
        let handle = counter_tween(&registry, &value, 10.0, 1.0);

        assert_eq!(registry.active_count(), 1);
        assert!(handle.is_active());

        registry.tick(0.5);
        assert!((value.get() - 5.0).abs() < 1e-6);
        assert!(!handle.is_complete());

        registry.tick(0.5);
        assert_eq!(value.get(), 10.0);
        assert!(handle.is_complete());
        assert!(registry.is_empty());
        assert!(!registry.contains(handle.id()));
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let registry = TweenRegistry::new();
        let a = Rc::new(Cell::new(0.0));
        let b = Rc::new(Cell::new(0.0));

        let first = counter_tween(&registry, &a, 1.0, 1.0);
        first.cancel();
        let second = counter_tween(&registry, &b, 1.0, 1.0);

        assert_eq!(first.id().index(), second.id().index());
        assert_ne!(first.id(), second.id());

        // Stale id must not touch the new occupant
        registry.cancel(first.id());
        assert!(second.is_active());
        assert!(registry.contains(second.id()));
        assert_eq!(first.status(), TweenStatus::Cancelled);
    }

    #[test]
    fn test_double_cancel_is_noop() {
        let registry = TweenRegistry::new();
        let value = Rc::new(Cell::new(0.0));
        let handle = counter_tween(&registry, &value, 1.0, 1.0);

        handle.cancel();
        handle.cancel();
        registry.cancel(handle.id());

        assert_eq!(handle.status(), TweenStatus::Cancelled);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_cancel_after_completion_keeps_completed() {
        let registry = TweenRegistry::new();
        let value = Rc::new(Cell::new(0.0));
        let handle = counter_tween(&registry, &value, 1.0, 0.1);

        registry.tick(1.0);
        handle.cancel();

        assert!(handle.is_complete());
        assert_eq!(handle.status(), TweenStatus::Completed);
    }

    #[test]
    fn test_with_ease_applies_curve() {
        let registry = TweenRegistry::new();
        let value = Rc::new(Cell::new(0.0));
        let handle =
            counter_tween(&registry, &value, 10.0, 1.0).with_ease(EaseType::EaseInSine);

        registry.tick(0.5);

        let expected = 10.0 * EaseType::EaseInSine.apply(0.5);
        assert!((value.get() - expected).abs() < 1e-5);
        assert!(handle.is_active());
    }

    #[test]
    fn test_progress_query() {
        let registry = TweenRegistry::new();
        let value = Rc::new(Cell::new(0.0));
        let handle = counter_tween(&registry, &value, 1.0, 2.0);

        assert_eq!(registry.progress(handle.id()), Some(0.0));
        registry.tick(0.5);
        assert_eq!(registry.progress(handle.id()), Some(0.25));
        registry.tick(5.0);
        assert_eq!(registry.progress(handle.id()), None);
    }

    #[test]
    fn test_handle_outlives_registry() {
        let value = Rc::new(Cell::new(0.0));
        let handle = {
            let registry = TweenRegistry::new();
            counter_tween(&registry, &value, 1.0, 1.0)
        };

        assert_eq!(handle.status(), TweenStatus::Cancelled);
        handle.cancel();
        handle.set_ease(EaseType::EaseOutBack);
        assert!(!handle.is_complete());
    }

    #[test]
    fn test_tick_count() {
        let registry = TweenRegistry::new();
        registry.tick(0.016);
        registry.tick(0.016);
        assert_eq!(registry.tick_count(), 2);
    }
}
