use thiserror::Error;

/// Errors reported by the process-wide registry API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TweenError {
    /// A registry operation was used before [`crate::global::init`].
    #[error("tween registry not initialized")]
    Uninitialized,
}
