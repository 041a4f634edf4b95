//! Minimal host object model and tween extension methods.
//!
//! A [`Transform`] is shared between the host and its tweens through
//! [`SharedTransform`]. Tweens hold only a weak reference for writing, so a
//! destroyed transform never keeps itself alive through an animation; the
//! host still cancels the handles of objects it removes.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec3;
use glide_core::{TweenHandle, TweenRegistry};

/// Position and scale of a scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    /// Wrap into a [`SharedTransform`].
    pub fn shared(self) -> SharedTransform {
        Rc::new(RefCell::new(self))
    }
}

/// Transform owned by the host and animated by tweens.
pub type SharedTransform = Rc<RefCell<Transform>>;

/// Tween shortcuts for shared transforms.
pub trait TransformTweenExt {
    /// Animate `position` from its current value to `end` over `duration` seconds.
    fn do_move(&self, registry: &TweenRegistry, end: Vec3, duration: f32) -> TweenHandle;

    /// Animate `scale` from its current value to `end` over `duration` seconds.
    fn do_scale(&self, registry: &TweenRegistry, end: Vec3, duration: f32) -> TweenHandle;
}

impl TransformTweenExt for SharedTransform {
    fn do_move(&self, registry: &TweenRegistry, end: Vec3, duration: f32) -> TweenHandle {
        let target = Rc::downgrade(self);
        registry.tween_composite(
            || self.borrow().position,
            move |v| write_through(&target, |t| t.position = v),
            end,
            duration,
        )
    }

    fn do_scale(&self, registry: &TweenRegistry, end: Vec3, duration: f32) -> TweenHandle {
        let target = Rc::downgrade(self);
        registry.tween_composite(
            || self.borrow().scale,
            move |v| write_through(&target, |t| t.scale = v),
            end,
            duration,
        )
    }
}

fn write_through(target: &Weak<RefCell<Transform>>, apply: impl FnOnce(&mut Transform)) {
    match target.upgrade() {
        Some(transform) => apply(&mut transform.borrow_mut()),
        None => log::trace!("Tween target dropped; write skipped"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_do_move_reaches_end() {
        let registry = TweenRegistry::new();
        let item = Transform::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::ONE).shared();

        let handle = item.do_move(&registry, Vec3::new(5.0, 2.0, 0.0), 1.0);
        registry.tick(0.5);
        assert!((item.borrow().position.x - 0.0).abs() < 1e-5);

        registry.tick(0.5);
        assert_eq!(item.borrow().position, Vec3::new(5.0, 2.0, 0.0));
        assert!(handle.is_complete());
        // Scale untouched
        assert_eq!(item.borrow().scale, Vec3::ONE);
    }

    #[test]
    fn test_do_scale_reaches_end() {
        let registry = TweenRegistry::new();
        let item = Transform::default().shared();

        item.do_scale(&registry, Vec3::splat(2.0), 1.0);
        registry.tick(2.0);

        assert_eq!(item.borrow().scale, Vec3::splat(2.0));
        assert_eq!(item.borrow().position, Vec3::ZERO);
    }

    #[test]
    fn test_dropped_transform_is_skipped() {
        let registry = TweenRegistry::new();
        let item = Transform::default().shared();
        let handle = item.do_move(&registry, Vec3::X, 1.0);

        drop(item);
        registry.tick(0.5);
        registry.tick(0.5);

        assert!(handle.is_complete());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_move_and_scale_run_together() {
        let registry = TweenRegistry::new();
        let item = Transform::default().shared();

        item.do_move(&registry, Vec3::new(4.0, 0.0, 0.0), 1.0);
        item.do_scale(&registry, Vec3::splat(3.0), 2.0);
        registry.tick(1.0);

        let t = *item.borrow();
        assert_eq!(t.position, Vec3::new(4.0, 0.0, 0.0));
        assert!((t.scale.x - 2.0).abs() < 1e-5);
        assert_eq!(registry.active_count(), 1);
    }
}
