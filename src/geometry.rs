//! Rectangles, direction vectors and play-field bounds.
//!
//! Coordinates follow screen conventions: the origin is the top-left corner
//! of the field and y grows downwards.

use crate::error::GameError;

/// Size of the play field in logical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 2D direction or displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `radians` measured from +x towards +y.
    pub fn from_angle(radians: f32) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Rotates by `theta` using `(x cos + y sin, -x sin + y cos)`, which on a
    /// y-down screen turns the vector counter-clockwise.
    pub fn rotated(self, theta: f32) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self::new(cos * self.x + sin * self.y, -sin * self.x + cos * self.y)
    }
}

/// Axis-aligned rectangle used for both drawing and collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle centred at `(cx, cy)`
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> (f32, f32) {
        (self.center_x(), self.center_y())
    }

    /// Moves the rectangle by `delta`
    pub fn translate(&mut self, delta: Vector) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Returns `(inside_horizontally, inside_vertically)` for `rect` in `field`.
pub fn bounds_check(rect: &Rect, field: &Field) -> (bool, bool) {
    let horizontal = !(rect.left() < 0.0 || rect.right() > field.width);
    let vertical = !(rect.top() < 0.0 || rect.bottom() > field.height);
    (horizontal, vertical)
}

/// True when `rect` lies inside `field` on both axes.
pub fn is_inside(rect: &Rect, field: &Field) -> bool {
    bounds_check(rect, field) == (true, true)
}

/// Unit vector pointing from the centre of `origin` to the centre of `target`.
pub fn direction_to(origin: &Rect, target: &Rect) -> Result<Vector, GameError> {
    let (ox, oy) = origin.center();
    let (tx, ty) = target.center();
    let delta = Vector::new(tx - ox, ty - oy);
    let norm = delta.length();
    if norm == 0.0 || !norm.is_finite() {
        return Err(GameError::DegenerateDirection { x: ox, y: oy });
    }
    Ok(Vector::new(delta.x / norm, delta.y / norm))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Field {
        Field::new(600.0, 700.0)
    }

    #[test]
    fn test_rect_from_center() {
        let rect = Rect::from_center(300.0, 600.0, 50.0, 40.0);
        assert_eq!(rect.left(), 275.0);
        assert_eq!(rect.top(), 580.0);
        assert_eq!(rect.center(), (300.0, 600.0));
    }

    #[test]
    fn test_bounds_check_axes() {
        let f = field();
        assert_eq!(bounds_check(&Rect::new(0.0, 0.0, 600.0, 700.0), &f), (true, true));
        assert_eq!(bounds_check(&Rect::new(-1.0, 10.0, 10.0, 10.0), &f), (false, true));
        assert_eq!(bounds_check(&Rect::new(595.0, 10.0, 10.0, 10.0), &f), (false, true));
        assert_eq!(bounds_check(&Rect::new(10.0, -0.5, 10.0, 10.0), &f), (true, false));
        assert_eq!(bounds_check(&Rect::new(10.0, 695.0, 10.0, 10.0), &f), (true, false));
        assert_eq!(bounds_check(&Rect::new(-5.0, 800.0, 10.0, 10.0), &f), (false, false));
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert!(overlapping.overlaps(&a));
    }

    #[test]
    fn test_direction_to_points_at_target() {
        let origin = Rect::from_center(0.0, 0.0, 10.0, 10.0);
        let target = Rect::from_center(3.0, 4.0, 20.0, 20.0);
        let dir = direction_to(&origin, &target).unwrap();
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_direction_to_same_center_is_error() {
        let origin = Rect::from_center(100.0, 100.0, 10.0, 10.0);
        let target = Rect::from_center(100.0, 100.0, 40.0, 40.0);
        assert_eq!(
            direction_to(&origin, &target),
            Err(GameError::DegenerateDirection { x: 100.0, y: 100.0 })
        );
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let v = Vector::new(1.0, 0.0).rotated(std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y + 1.0).abs() < 1e-6);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_bounds_check_matches_edges(
                x in -100.0f32..700.0,
                y in -100.0f32..800.0,
                w in 1.0f32..100.0,
                h in 1.0f32..100.0,
            ) {
                let f = field();
                let rect = Rect::new(x, y, w, h);
                let (horizontal, vertical) = bounds_check(&rect, &f);
                prop_assert_eq!(!horizontal, rect.left() < 0.0 || rect.right() > f.width);
                prop_assert_eq!(!vertical, rect.top() < 0.0 || rect.bottom() > f.height);
            }

            #[test]
            fn test_direction_is_unit_length(
                ax in 0.0f32..600.0,
                ay in 0.0f32..700.0,
                bx in 0.0f32..600.0,
                by in 0.0f32..700.0,
            ) {
                prop_assume!((ax - bx).abs() > 0.01 || (ay - by).abs() > 0.01);
                let a = Rect::from_center(ax, ay, 10.0, 10.0);
                let b = Rect::from_center(bx, by, 10.0, 10.0);
                let dir = direction_to(&a, &b).unwrap();
                prop_assert!((dir.x * dir.x + dir.y * dir.y - 1.0).abs() < 1e-4);
            }
        }
    }
}
