//! Lake geometry: the world rectangle and the fisherman's capture zone.
//!
//! [`LakeBounds`] is the closed rectangle `[0, width] x [0, height]`. Agents
//! that move past an edge are clamped onto it (they stick, they do not wrap
//! or bounce). Random points for wander targets and new plants are drawn
//! uniformly from the same closed rectangle.
//!
//! [`CaptureArea`] is configured as `(x, y, width, height)` and tested as
//! the inclusive region `x1 <= x <= x2`, `y1 <= y <= y2` with
//! `x2 = x + width` and `y2 = y + height`.

use lakesim_types::{Rect, Vec2};
use rand::Rng;

use crate::error::WorldError;

/// Fixed world rectangle anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LakeBounds {
    width: f64,
    height: f64,
}

impl LakeBounds {
    /// Build bounds, rejecting non-positive or non-finite dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self, WorldError> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(Self { width, height })
        } else {
            Err(WorldError::InvalidBounds { width, height })
        }
    }

    /// World width.
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// World height.
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Clamp a point onto the closed world rectangle.
    pub const fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(point.x.clamp(0.0, self.width), point.y.clamp(0.0, self.height))
    }

    /// Whether the point lies inside the closed world rectangle.
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Uniformly random point inside the closed world rectangle.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        let x = rng.random_range(0.0..=self.width);
        let y = rng.random_range(0.0..=self.height);
        Vec2::new(x, y)
    }
}

/// Inclusive rectangular region the fisherman can reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureArea {
    rect: Rect,
}

impl CaptureArea {
    /// Build a capture area from its top-left corner and extent.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Result<Self, WorldError> {
        let invalid = |reason: &str| WorldError::InvalidCaptureArea {
            x,
            y,
            width,
            height,
            reason: reason.to_owned(),
        };

        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(invalid("all components must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(invalid("width and height must not be negative"));
        }

        Ok(Self {
            rect: Rect {
                x1: x,
                y1: y,
                x2: x + width,
                y2: y + height,
            },
        })
    }

    /// Whether `point` lies inside the area, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        (self.rect.x1..=self.rect.x2).contains(&point.x)
            && (self.rect.y1..=self.rect.y2).contains(&point.y)
    }

    /// The area as an `(x1, y1, x2, y2)` rectangle.
    pub const fn to_rect(&self) -> Rect {
        self.rect
    }
}

/// Validate that `value` is a probability in `[0, 1]`.
pub fn check_probability(value: f64) -> Result<f64, WorldError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(WorldError::InvalidProbability { value })
    }
}
