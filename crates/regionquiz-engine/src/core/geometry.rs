use serde::{Deserialize, Serialize};

/// A 2D point.
///
/// Unless stated otherwise, points are in the image's native pixel space
/// (origin at the top-left corner, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height of a drawing surface or an image.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` if both dimensions are finite and strictly positive.
    #[must_use]
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned box with its origin at the top-left corner.
///
/// While a rectangle is being dragged, `width` and `height` may be negative
/// (the pointer moved up or left of the anchor). Use [`Self::normalized`] to
/// obtain the canonical form before storing it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the box spanned by two opposite corners, in either order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// Returns the minimal box enclosing all `points`, or `None` if empty.
    #[must_use]
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in rest {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Returns the same area with non-negative width and height.
    ///
    /// A negative dimension moves the origin by that amount, so a box dragged
    /// backward covers exactly the same pixels as one dragged forward.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let (x, width) = if self.width < 0.0 {
            (self.x + self.width, -self.width)
        } else {
            (self.x, self.width)
        };
        let (y, height) = if self.height < 0.0 {
            (self.y + self.height, -self.height)
        } else {
            (self.y, self.height)
        };
        Self::new(x, y, width, height)
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        (self.width * self.height).abs()
    }

    /// Edge-inclusive containment test. See [`point_in_rectangle`].
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point_in_rectangle(point, self)
    }
}

/// Scales a pointer position on a rendered surface into native pixel space.
///
/// The horizontal and vertical axes are scaled independently by
/// `native / rendered`, so a surface stretched to a different aspect ratio
/// still maps correctly.
///
/// `rendered` must be drawable; callers obtain `native` only once the image
/// has finished loading. Prefer [`Viewport`], which checks both at construction.
#[must_use]
pub fn to_native_coordinates(pointer: Point, rendered: Size, native: Size) -> Point {
    Point::new(
        pointer.x * (native.width / rendered.width),
        pointer.y * (native.height / rendered.height),
    )
}

/// Edge-inclusive rectangle containment.
///
/// The box is normalized first, so the drag direction used to draw it does
/// not matter.
#[must_use]
pub fn point_in_rectangle(point: Point, rect: &BoundingBox) -> bool {
    let r = rect.normalized();
    point.x >= r.x && point.x <= r.x + r.width && point.y >= r.y && point.y <= r.y + r.height
}

/// Even-odd (ray casting) polygon containment.
///
/// The vertex list is treated as closed: the last vertex connects back to
/// the first. An edge is crossed only if the point's `y` lies strictly above
/// one endpoint and at-or-below the other, so horizontal edges are never
/// counted and a ray through a shared vertex is counted once.
///
/// Points exactly on the boundary are not guaranteed a particular answer.
/// For an axis-aligned square, the top and left edges report inside and the
/// bottom and right edges report outside.
///
/// Fewer than three vertices never contain anything.
#[must_use]
pub fn point_in_polygon(point: Point, points: &[Point]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for (i, vi) in points.iter().enumerate() {
        let vj = &points[j];
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A rendered surface paired with the native size of the image it shows.
///
/// A viewport can only be built once the image's native dimensions are
/// known, which makes "hit test before the image has loaded" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    rendered: Size,
    native: Size,
}

impl Viewport {
    /// Returns `None` if either size is zero, negative or not finite.
    #[must_use]
    pub fn new(rendered: Size, native: Size) -> Option<Self> {
        (rendered.is_drawable() && native.is_drawable()).then_some(Self { rendered, native })
    }

    /// A viewport displaying the image at its native size.
    #[must_use]
    pub fn unscaled(native: Size) -> Option<Self> {
        Self::new(native, native)
    }

    #[must_use]
    pub fn to_native(&self, pointer: Point) -> Point {
        to_native_coordinates(pointer, self.rendered, self.native)
    }
}
