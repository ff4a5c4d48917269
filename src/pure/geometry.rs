//! Geometry primitives
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An x,y coordinate pair
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    /// An absolute x coordinate relative to the root window
    pub x: u32,
    /// An absolute y coordinate relative to the root window
    pub y: u32,
}

impl Point {
    /// Create a new Point.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<(u32, u32)> for Point {
    fn from(raw: (u32, u32)) -> Self {
        let (x, y) = raw;

        Self { x, y }
    }
}

// A Rect converts to its top left corner
impl From<Rect> for Point {
    fn from(r: Rect) -> Self {
        let Rect { x, y, .. } = r;

        Self { x, y }
    }
}

/// An X window / screen position: top left corner + extent
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Rect {
    /// The x-coordinate of the top left corner of this rect
    pub x: u32,
    /// The y-coordinate of the top left corner of this rect
    pub y: u32,
    /// The width of this rect
    pub w: u32,
    /// The height of this rect
    pub h: u32,
}

impl Rect {
    /// Create a new Rect.
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Rect {
        Rect { x, y, w, h }
    }

    /// Check whether this Rect contains `p`.
    ///
    /// The right and bottom edges are exclusive so that monitors placed edge to edge
    /// never both claim the same point.
    /// ```
    /// # use stackwm::pure::geometry::{Rect, Point};
    /// let r = Rect::new(0, 0, 100, 200);
    ///
    /// assert!(r.contains_point(Point::new(0, 0)));
    /// assert!(r.contains_point(Point::new(99, 199)));
    /// assert!(!r.contains_point(Point::new(100, 10)));
    /// ```
    pub fn contains_point<P>(&self, p: P) -> bool
    where
        P: Into<Point>,
    {
        let p = p.into();

        (self.x..self.x.saturating_add(self.w)).contains(&p.x)
            && (self.y..self.y.saturating_add(self.h)).contains(&p.y)
    }

    /// The Rect covering the top `h` pixels of this one.
    pub fn top_strip(&self, h: u32) -> Self {
        Self {
            h: h.min(self.h),
            ..*self
        }
    }

    /// The (x, y, w, h) values of this Rect as a tuple.
    pub fn values(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.w, self.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    #[test_case(Point::new(0, 0), true; "top left corner")]
    #[test_case(Point::new(1919, 1079), true; "bottom right pixel")]
    #[test_case(Point::new(1920, 10), false; "right edge is exclusive")]
    #[test_case(Point::new(10, 1080), false; "bottom edge is exclusive")]
    #[test]
    fn contains_point(p: Point, expected: bool) {
        let r = Rect::new(0, 0, 1920, 1080);

        assert_eq!(r.contains_point(p), expected);
    }

    #[test]
    fn offset_rect_contains_point() {
        let r = Rect::new(1920, 0, 1280, 1024);

        assert!(!r.contains_point((1919, 10)));
        assert!(r.contains_point((1920, 10)));
    }

    #[test]
    fn top_strip_is_clamped_to_height() {
        let r = Rect::new(10, 20, 100, 15);

        assert_eq!(r.top_strip(20), Rect::new(10, 20, 100, 15));
        assert_eq!(r.top_strip(5), Rect::new(10, 20, 100, 5));
    }
}
