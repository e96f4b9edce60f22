//! Error types for the `lakesim-world` crate.
//!
//! Only constructors validate. Once a [`LakeBounds`] or [`CaptureArea`]
//! exists, every operation on it is infallible.
//!
//! [`LakeBounds`]: crate::area::LakeBounds
//! [`CaptureArea`]: crate::area::CaptureArea

/// Errors that can occur when building lake geometry.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// World dimensions must be positive and finite.
    #[error("invalid lake bounds {width}x{height}: dimensions must be positive and finite")]
    InvalidBounds {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// A capture rectangle must have finite, non-negative extent.
    #[error("invalid capture area ({x}, {y}, {width}, {height}): {reason}")]
    InvalidCaptureArea {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
        /// Explanation of what is wrong.
        reason: String,
    },

    /// A probability must lie in `[0, 1]`.
    #[error("invalid probability {value}: must be within [0, 1]")]
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },
}
