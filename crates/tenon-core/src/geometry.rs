//! Geometric primitives for block layout.
//!
//! # Coordinate System
//!
//! Tenon uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward
//!
//! In right-to-left mode the drawing pass mirrors x-coordinates by negating
//! them; the types here are direction-agnostic.

/// A 2D point representing a position in block coordinate space.
///
/// # Examples
///
/// ```
/// # use tenon_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Width and height dimensions of a block part.
///
/// # Examples
///
/// ```
/// # use tenon_core::geometry::Size;
/// let size = Size::new(50.0, 30.0);
/// assert_eq!(size.width(), 50.0);
/// assert_eq!(size.height(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size with the specified dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }

    /// Checks if both dimensions are zero
    pub fn is_empty(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Creates a new size grown by the given amounts
    pub fn grow(self, dw: f32, dh: f32) -> Self {
        Self {
            width: self.width + dw,
            height: self.height + dh,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_add_then_sub_roundtrips(a in point_strategy(), b in point_strategy()) {
            let roundtripped = a.add_point(b).sub_point(b);
            prop_assert!((roundtripped.x() - a.x()).abs() < 1e-3);
            prop_assert!((roundtripped.y() - a.y()).abs() < 1e-3);
        }
    }

    #[test]
    fn test_point_add_sub() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(1.0, -2.0);

        let sum = a.add_point(b);
        assert_approx_eq!(f32, sum.x(), 4.0);
        assert_approx_eq!(f32, sum.y(), 2.0);

        let diff = sum.sub_point(b);
        assert_approx_eq!(f32, diff.x(), a.x());
        assert_approx_eq!(f32, diff.y(), a.y());
    }

    #[test]
    fn test_point_with_coordinates() {
        let p = Point::new(1.0, 2.0).with_x(5.0).with_y(-1.0);
        assert_approx_eq!(f32, p.x(), 5.0);
        assert_approx_eq!(f32, p.y(), -1.0);
        assert!(!p.is_zero());
        assert!(Point::default().is_zero());
    }

    #[test]
    fn test_size_grow() {
        let size = Size::new(10.0, 20.0).grow(1.0, 1.0);
        assert_approx_eq!(f32, size.width(), 11.0);
        assert_approx_eq!(f32, size.height(), 21.0);
        assert!(!size.is_empty());
        assert!(Size::default().is_empty());
    }
}
