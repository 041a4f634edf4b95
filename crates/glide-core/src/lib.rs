//! # Glide core
//!
//! Frame-driven tweening engine:
//! - easing curves mapping normalized time to eased progress
//! - scalar (`f32`) and composite (`Vec2`/`Vec3`/`Vec4`/`[f32; N]`) tweens
//!   that write through host-provided accessors
//! - a registry that advances every active tween once per tick and retires
//!   finished or cancelled ones
//!
//! Single-threaded: the host supplies `delta_time` once per frame.

pub mod composite;
pub mod ease;
pub mod error;
pub mod global;
pub mod registry;
pub mod scalar;
pub mod tween;

pub use composite::{Composite, CompositeTween};
pub use ease::{EaseType, ParseEaseError};
pub use error::TweenError;
pub use registry::{TweenHandle, TweenId, TweenRegistry};
pub use scalar::ScalarTween;
pub use tween::{Tween, TweenStatus};
