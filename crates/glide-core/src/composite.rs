//! Multi-component tweens built from one [`ScalarTween`] per axis.
//!
//! A `CompositeTween<Vec3>` owns three scalar tweens. Each child writes its
//! axis into a shared staging value; after all children have advanced the
//! parent pushes the assembled value through its own write accessor once.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use glam::{Vec2, Vec3, Vec4};
use smallvec::SmallVec;

use crate::ease::EaseType;
use crate::scalar::{ScalarTween, WriteFn};
use crate::tween::{sanitize_duration, step_elapsed, Tween};

/// Fixed-size numeric aggregate whose components interpolate independently.
pub trait Composite: Copy + 'static {
    /// Number of scalar components.
    const COMPONENTS: usize;

    /// Read component `axis`. `axis < COMPONENTS`.
    fn component(&self, axis: usize) -> f32;

    /// Overwrite component `axis`. `axis < COMPONENTS`.
    fn set_component(&mut self, axis: usize, value: f32);
}

impl Composite for Vec2 {
    const COMPONENTS: usize = 2;

    fn component(&self, axis: usize) -> f32 {
        self[axis]
    }

    fn set_component(&mut self, axis: usize, value: f32) {
        self[axis] = value;
    }
}

impl Composite for Vec3 {
    const COMPONENTS: usize = 3;

    fn component(&self, axis: usize) -> f32 {
        self[axis]
    }

    fn set_component(&mut self, axis: usize, value: f32) {
        self[axis] = value;
    }
}

impl Composite for Vec4 {
    const COMPONENTS: usize = 4;

    fn component(&self, axis: usize) -> f32 {
        self[axis]
    }

    fn set_component(&mut self, axis: usize, value: f32) {
        self[axis] = value;
    }
}

impl<const N: usize> Composite for [f32; N] {
    const COMPONENTS: usize = N;

    fn component(&self, axis: usize) -> f32 {
        self[axis]
    }

    fn set_component(&mut self, axis: usize, value: f32) {
        self[axis] = value;
    }
}

/// Tween over a [`Composite`] value, one child tween per component.
///
/// All children share the parent's duration and receive the same delta
/// every advance, so they stay in lock-step with the parent's own timer.
pub struct CompositeTween<V: Composite> {
    start: V,
    end: V,
    /// Parent timer, kept separately from the children
    elapsed: f32,
    duration: f32,
    started: bool,
    axes: SmallVec<[ScalarTween; 4]>,
    /// Written by the children, read back once per advance
    staging: Rc<Cell<V>>,
    write: WriteFn<V>,
}

impl<V: Composite> CompositeTween<V> {
    /// Create a tween from the current value returned by `read` to `end`.
    pub fn new(
        read: impl FnOnce() -> V,
        write: impl FnMut(V) + 'static,
        end: V,
        duration: f32,
    ) -> Self {
        let start = read();
        let duration = sanitize_duration(duration);
        let staging = Rc::new(Cell::new(start));

        let axes = (0..V::COMPONENTS)
            .map(|axis| {
                let sink = Rc::clone(&staging);
                ScalarTween::new(
                    || start.component(axis),
                    move |value| {
                        let mut staged = sink.get();
                        staged.set_component(axis, value);
                        sink.set(staged);
                    },
                    end.component(axis),
                    duration,
                )
            })
            .collect();

        Self {
            start,
            end,
            elapsed: 0.0,
            duration,
            started: false,
            axes,
            staging,
            write: Box::new(write),
        }
    }

    /// Builder-style curve selection for every axis.
    pub fn with_ease(mut self, ease: EaseType) -> Self {
        self.set_ease(ease);
        self
    }

    /// Value captured from the read accessor at construction.
    pub fn start(&self) -> V {
        self.start
    }

    /// Committed end value.
    pub fn end(&self) -> V {
        self.end
    }

    /// Set the curve of a single axis. Out-of-range axes are ignored.
    pub fn set_axis_ease(&mut self, axis: usize, ease: EaseType) {
        if let Some(child) = self.axes.get_mut(axis) {
            child.set_ease(ease);
        }
    }

    /// Curve currently used by `axis`.
    pub fn axis_ease(&self, axis: usize) -> Option<EaseType> {
        self.axes.get(axis).map(|child| child.ease())
    }

    /// Evaluate every axis at normalized `progress` without side effects.
    pub fn value_at(&self, progress: f32) -> V {
        let mut value = self.start;
        for (axis, child) in self.axes.iter().enumerate() {
            value.set_component(axis, child.value_at(progress));
        }
        value
    }
}

impl<V: Composite> Tween for CompositeTween<V> {
    fn advance(&mut self, dt: f32) {
        for child in &mut self.axes {
            child.advance(dt);
        }
        self.started = true;
        self.elapsed = step_elapsed(self.elapsed, dt, self.duration);

        let value = if self.is_complete() {
            self.end
        } else {
            self.staging.get()
        };
        (self.write)(value);
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration && (self.started || self.duration > 0.0)
    }

    /// Applies the same curve to every axis.
    fn set_ease(&mut self, ease: EaseType) {
        if self.is_complete() {
            return;
        }
        for child in &mut self.axes {
            child.set_ease(ease);
        }
    }

    /// Curve of the first axis; all axes match unless set individually.
    fn ease(&self) -> EaseType {
        self.axes.first().map(|child| child.ease()).unwrap_or_default()
    }

    fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn duration(&self) -> f32 {
        self.duration
    }
}

impl<V: Composite + fmt::Debug> fmt::Debug for CompositeTween<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeTween")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("elapsed", &self.elapsed)
            .field("duration", &self.duration)
            .field("axes", &self.axes)
            .finish_non_exhaustive()
    }
}
