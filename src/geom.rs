//! Playfield coordinates shared by both games (logical canvas units, y down).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance, the only collision primitive the games use.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Clamp both axes into `[min, max]`. An inverted range collapses onto `max`
    /// rather than panicking like `f64::clamp`.
    pub fn clamp(self, min: f64, max: f64) -> Self {
        Self {
            x: self.x.max(min).min(max),
            y: self.y.max(min).min(max),
        }
    }
}
