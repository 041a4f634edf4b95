//! # Glide - tweening for frame-driven hosts
//!
//! Host-side glue around [`glide_core`]: a minimal transform model with
//! `do_move` / `do_scale` shortcuts, a frame clock, layered configuration,
//! and the headless demo scene behind the `glide` binary.

pub mod clock;
#[cfg(not(target_arch = "wasm32"))]
pub mod config;
pub mod demo;
pub mod host;

pub use glide_core;

/// Common imports for host code
pub mod prelude {
    pub use crate::host::{SharedTransform, Transform, TransformTweenExt};
    pub use glam::Vec3;
    pub use glide_core::{EaseType, TweenHandle, TweenRegistry, TweenStatus};
}
