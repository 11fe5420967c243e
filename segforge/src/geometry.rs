//! Segment shapes in glyph-cell space and point-in-segment lookup.
//!
//! Glyph-cell space is the unit square with y growing downward. Hit shapes
//! spill past the square to [`CELL_MIN`, `CELL_MAX`] so clicks slightly
//! outside the drawn glyph still land on the nearest segment.

pub const CELL_MIN: f32 = -0.2;
pub const CELL_MAX: f32 = 1.2;

/// Slack admitted by [`locate`] on top of a polygon's own area.
pub const HIT_TOLERANCE: f32 = 0.001;

pub const SEGMENT_COUNT: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// Axis-aligned rectangle in any coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Right and bottom edges are exclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Linear remap of `p` so this rectangle becomes the unit square.
    ///
    /// Degenerate rectangles map everything to the origin.
    pub fn normalize(&self, p: Point) -> Point {
        Point::new(
            remap(self.x, self.right(), p.x),
            remap(self.y, self.bottom(), p.y),
        )
    }

    /// Inverse of [`Bounds::normalize`].
    pub fn denormalize(&self, p: Point) -> Point {
        Point::new(self.x + p.x * self.width, self.y + p.y * self.height)
    }

    /// The region covered by `[lo, hi]` on both axes of this rectangle's
    /// normalized space.
    pub fn scaled(&self, lo: f32, hi: f32) -> Bounds {
        Bounds::new(
            self.x + lo * self.width,
            self.y + lo * self.height,
            (hi - lo) * self.width,
            (hi - lo) * self.height,
        )
    }

    /// Like [`Bounds::contains`] but inclusive on every edge.
    pub fn encloses(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

fn remap(from: f32, to: f32, value: f32) -> f32 {
    let span = to - from;

    if span == 0.0 {
        0.0
    } else {
        (value - from) / span
    }
}

/// Heron's formula. Degenerate triangles clamp to zero instead of NaN.
pub fn triangle_area(a: Point, b: Point, c: Point) -> f32 {
    let ab = a.distance(b);
    let bc = b.distance(c);
    let ca = c.distance(a);
    let s = (ab + bc + ca) / 2.0;

    (s * (s - ab) * (s - bc) * (s - ca)).max(0.0).sqrt()
}

/// Hit shape of one segment. Only quads and pentagons occur in the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Polygon {
    Quad([Point; 4]),
    Pentagon([Point; 5]),
}

impl Polygon {
    pub fn vertices(&self) -> &[Point] {
        match self {
            Polygon::Quad(v) => v.as_slice(),
            Polygon::Pentagon(v) => v.as_slice(),
        }
    }

    /// Triangle fan from vertex 0.
    pub fn area(&self) -> f32 {
        let v = self.vertices();

        v[1..]
            .windows(2)
            .map(|pair| triangle_area(v[0], pair[0], pair[1]))
            .sum()
    }

    /// Sum of the triangles joining `p` to every edge. Equals [`Polygon::area`]
    /// when `p` is inside and grows as `p` moves away.
    pub fn area_from(&self, p: Point) -> f32 {
        let v = self.vertices();

        (0..v.len())
            .map(|i| triangle_area(p, v[i], v[(i + 1) % v.len()]))
            .sum()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.area_from(p) < self.area() + HIT_TOLERANCE
    }
}

/// Index of the first polygon containing `p`.
///
/// Order is priority: where tolerance lets shapes overlap along shared
/// edges, the earlier polygon wins.
pub fn locate(p: Point, polygons: &[Polygon]) -> Option<usize> {
    polygons.iter().position(|polygon| polygon.contains(p))
}

pub fn centroid(points: &[Point]) -> Point {
    let n = points.len().max(1) as f32;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));

    Point::new(sx / n, sy / n)
}

const UP_LEFT: Point = Point::new(0.375, 0.125);
const DOWN_LEFT: Point = Point::new(0.375, 0.875);
const UP_RIGHT: Point = Point::new(0.625, 0.125);
const DOWN_RIGHT: Point = Point::new(0.625, 0.875);
const LEFT_UP: Point = Point::new(0.125, 0.375);
const LEFT_DOWN: Point = Point::new(0.125, 0.625);
const RIGHT_UP: Point = Point::new(0.875, 0.375);
const RIGHT_DOWN: Point = Point::new(0.875, 0.625);

const fn p(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Hit shapes, indexed by segment bit. Declaration order is lookup priority.
pub const SEGMENT_POLYGONS: [Polygon; SEGMENT_COUNT] = [
    Polygon::Pentagon([p(0.5, 1.0), DOWN_RIGHT, p(1.0, 1.0), p(CELL_MAX, CELL_MAX), p(0.5, CELL_MAX)]),
    Polygon::Pentagon([p(1.0, 0.5), RIGHT_DOWN, p(1.0, 1.0), p(CELL_MAX, CELL_MAX), p(CELL_MAX, 0.5)]),
    Polygon::Quad([p(0.5, 0.5), RIGHT_DOWN, p(1.0, 1.0), DOWN_RIGHT]),
    Polygon::Quad([p(1.0, 0.5), RIGHT_DOWN, p(0.5, 0.5), RIGHT_UP]),
    Polygon::Quad([p(0.5, 0.5), RIGHT_UP, p(1.0, 0.0), UP_RIGHT]),
    Polygon::Pentagon([p(1.0, 0.5), RIGHT_UP, p(1.0, 0.0), p(CELL_MAX, CELL_MIN), p(CELL_MAX, 0.5)]),
    Polygon::Quad([p(0.5, 0.0), UP_LEFT, p(0.5, 0.5), UP_RIGHT]),
    Polygon::Pentagon([p(0.5, 0.0), UP_RIGHT, p(1.0, 0.0), p(CELL_MAX, CELL_MIN), p(0.5, CELL_MIN)]),
    Polygon::Pentagon([p(0.5, 1.0), DOWN_LEFT, p(0.0, 1.0), p(CELL_MIN, CELL_MAX), p(0.5, CELL_MAX)]),
    Polygon::Pentagon([p(0.0, 0.5), LEFT_DOWN, p(0.0, 1.0), p(CELL_MIN, CELL_MAX), p(CELL_MIN, 0.5)]),
    Polygon::Quad([p(0.5, 1.0), DOWN_LEFT, p(0.5, 0.5), DOWN_RIGHT]),
    Polygon::Quad([p(0.5, 0.5), LEFT_DOWN, p(0.0, 1.0), DOWN_LEFT]),
    Polygon::Quad([p(0.0, 0.5), LEFT_DOWN, p(0.5, 0.5), LEFT_UP]),
    Polygon::Pentagon([p(0.0, 0.5), LEFT_UP, p(0.0, 0.0), p(CELL_MIN, CELL_MIN), p(CELL_MIN, 0.5)]),
    Polygon::Quad([p(0.5, 0.5), LEFT_UP, p(0.0, 0.0), UP_LEFT]),
    Polygon::Pentagon([p(0.5, 0.0), UP_LEFT, p(0.0, 0.0), p(CELL_MIN, CELL_MIN), p(0.5, CELL_MIN)]),
];

// Drawn bar shapes, upper-left quadrant; the rest are mirrors of these.
const BAR_VERTICAL: [Point; 5] = [p(0.44, 0.145), p(0.56, 0.145), p(0.56, 0.405), p(0.5, 0.45), p(0.44, 0.405)];
const BAR_HORIZONTAL: [Point; 6] = [p(0.47, 0.5), p(0.41, 0.54), p(0.13, 0.54), p(0.07, 0.5), p(0.13, 0.46), p(0.41, 0.46)];
const BAR_SIDE: [Point; 4] = [p(0.0, 0.05), p(0.1, 0.09), p(0.1, 0.4), p(0.0, 0.475)];
const BAR_TOP: [Point; 6] = [p(0.1, 0.0), p(0.08, 0.0075), p(0.05, 0.025), p(0.2, 0.08), p(0.475, 0.08), p(0.475, 0.0)];
const BAR_DIAGONAL: [Point; 4] = [p(0.17, 0.145), p(0.37, 0.29), p(0.37, 0.39), p(0.17, 0.245)];

const fn mirror<const N: usize>(mut points: [Point; N], x: bool, y: bool) -> [Point; N] {
    let mut i = 0;

    while i < N {
        if x {
            points[i].x = 1.0 - points[i].x;
        }
        if y {
            points[i].y = 1.0 - points[i].y;
        }
        i += 1;
    }

    points
}

const TOP_XY: [Point; 6] = mirror(BAR_TOP, true, true);
const SIDE_XY: [Point; 4] = mirror(BAR_SIDE, true, true);
const DIAGONAL_XY: [Point; 4] = mirror(BAR_DIAGONAL, true, true);
const HORIZONTAL_X: [Point; 6] = mirror(BAR_HORIZONTAL, true, false);
const DIAGONAL_X: [Point; 4] = mirror(BAR_DIAGONAL, true, false);
const SIDE_X: [Point; 4] = mirror(BAR_SIDE, true, false);
const TOP_X: [Point; 6] = mirror(BAR_TOP, true, false);
const TOP_Y: [Point; 6] = mirror(BAR_TOP, false, true);
const SIDE_Y: [Point; 4] = mirror(BAR_SIDE, false, true);
const VERTICAL_Y: [Point; 5] = mirror(BAR_VERTICAL, false, true);
const DIAGONAL_Y: [Point; 4] = mirror(BAR_DIAGONAL, false, true);

/// Drawn outline of each segment, indexed like [`SEGMENT_POLYGONS`].
pub const DISPLAY_SEGMENTS: [&[Point]; SEGMENT_COUNT] = [
    &TOP_XY,
    &SIDE_XY,
    &DIAGONAL_XY,
    &HORIZONTAL_X,
    &DIAGONAL_X,
    &SIDE_X,
    &BAR_VERTICAL,
    &TOP_X,
    &TOP_Y,
    &SIDE_Y,
    &VERTICAL_Y,
    &DIAGONAL_Y,
    &BAR_HORIZONTAL,
    &BAR_SIDE,
    &BAR_DIAGONAL,
    &BAR_TOP,
];

/// Even-odd point-in-polygon test for arbitrary drawn outlines.
pub fn outline_contains(points: &[Point], q: Point) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);

    for (i, a) in points.iter().enumerate() {
        let b = points[j];

        if (a.y > q.y) != (b.y > q.y) && q.x < (b.x - a.x) * (q.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }

        j = i;
    }

    inside
}
