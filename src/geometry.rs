//! Rotated-box geometry
//!
//! Conversions between the center/size/angle form used by RoLabelImg and the
//! four-vertex polygon form used by DOTA.

/// Decimal places kept for coordinates and extents
pub const COORD_DECIMALS: i32 = 1;

/// Decimal places kept for angles (radians)
pub const ANGLE_DECIMALS: i32 = 4;

/// A 2D point in image coordinates (x right, y down)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn rounded(self, decimals: i32) -> Self {
        Self::new(round_to(self.x, decimals), round_to(self.y, decimals))
    }
}

/// A rotated box given by its center, extents and rotation about the center
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CenterBox {
    pub cx: f64,
    pub cy: f64,
    /// Extent along the box's first edge
    pub w: f64,
    /// Extent along the box's second edge
    pub h: f64,
    /// Rotation in radians
    pub angle: f64,
}

impl CenterBox {
    pub const fn new(cx: f64, cy: f64, w: f64, h: f64, angle: f64) -> Self {
        Self { cx, cy, w, h, angle }
    }

    /// Axis-aligned box from its min/max corners, as stored in a `<bndbox>`
    pub fn from_corners(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::new(
            (xmin + xmax) / 2.0,
            (ymin + ymax) / 2.0,
            xmax - xmin,
            ymax - ymin,
            0.0,
        )
    }

    /// Exact vertices in top-left, top-right, bottom-right, bottom-left order
    /// of the unrotated box
    pub fn corners(&self) -> Polygon4 {
        let center = Point::new(self.cx, self.cy);
        let (half_w, half_h) = (self.w / 2.0, self.h / 2.0);
        let (x_min, y_min) = (self.cx - half_w, self.cy - half_h);
        let (x_max, y_max) = (self.cx + half_w, self.cy + half_h);

        let corners = [
            Point::new(x_min, y_min),
            Point::new(x_max, y_min),
            Point::new(x_max, y_max),
            Point::new(x_min, y_max),
        ];

        Polygon4(corners.map(|p| rotate_point(center, p, -self.angle)))
    }

    fn rounded(self) -> Self {
        Self {
            cx: round_to(self.cx, COORD_DECIMALS),
            cy: round_to(self.cy, COORD_DECIMALS),
            w: round_to(self.w, COORD_DECIMALS),
            h: round_to(self.h, COORD_DECIMALS),
            angle: round_to(self.angle, ANGLE_DECIMALS),
        }
    }
}

/// A quadrilateral read as one edge cycle P1 -> P2 -> P3 -> P4
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Polygon4(pub [Point; 4]);

impl Polygon4 {
    pub fn from_coords(coords: [f64; 8]) -> Self {
        let [x1, y1, x2, y2, x3, y3, x4, y4] = coords;
        Self([
            Point::new(x1, y1),
            Point::new(x2, y2),
            Point::new(x3, y3),
            Point::new(x4, y4),
        ])
    }

    /// Flatten to x1, y1, ..., x4, y4
    pub fn coords(&self) -> [f64; 8] {
        let [p1, p2, p3, p4] = self.0;
        [p1.x, p1.y, p2.x, p2.y, p3.x, p3.y, p4.x, p4.y]
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.0
    }

    /// Exact center box, assuming P1/P3 are opposite corners, P1 -> P2 runs
    /// along the width and P1 -> P4 along the height.
    pub fn to_center_box(&self) -> CenterBox {
        let [p1, p2, p3, p4] = self.0;
        CenterBox {
            cx: (p1.x + p3.x) / 2.0,
            cy: (p1.y + p3.y) / 2.0,
            w: p1.distance(&p2),
            h: p1.distance(&p4),
            angle: (p2.y - p1.y).atan2(p2.x - p1.x),
        }
    }
}

/// Rotate `point` about `center` by `theta` radians.
///
/// Uses the matrix `[cos, sin; -sin, cos]`, which turns clockwise for positive
/// `theta` in y-up axes. Pass `-angle` to rotate by a box's own angle.
pub fn rotate_point(center: Point, point: Point, theta: f64) -> Point {
    let (x_off, y_off) = (point.x - center.x, point.y - center.y);
    let (sin_t, cos_t) = theta.sin_cos();
    Point {
        x: center.x + cos_t * x_off + sin_t * y_off,
        y: center.y - sin_t * x_off + cos_t * y_off,
    }
}

/// RoLabelImg box to DOTA vertices, coordinates rounded to one decimal
pub fn center_box_to_polygon(bbox: &CenterBox) -> Polygon4 {
    Polygon4(bbox.corners().0.map(|p| p.rounded(COORD_DECIMALS)))
}

/// DOTA vertices to RoLabelImg box. Extents are rounded to one decimal and
/// the angle to four.
pub fn polygon_to_center_box(polygon: &Polygon4) -> CenterBox {
    polygon.to_center_box().rounded()
}

/// Reorder vertices clockwise (in y-down image coordinates) starting from the
/// top-most, then left-most, point.
pub fn order_clockwise_from_top_left(polygon: &Polygon4) -> Polygon4 {
    let mut points = polygon.0;
    points.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let anchor = points[0];
    let angle_from_anchor = |p: &Point| (p.y - anchor.y).atan2(p.x - anchor.x);
    points[1..].sort_by(|a, b| angle_from_anchor(a).total_cmp(&angle_from_anchor(b)));

    Polygon4(points)
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
