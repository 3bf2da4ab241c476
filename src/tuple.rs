use std::ops::{ Add, AddAssign, Sub, SubAssign, Neg, Mul, Div };

use crate::feq;

/// A point (or vector) on the canvas plane.
///
/// Equality is approximate, like every other coordinate type in this crate:
/// two points compare equal when each component is within `FEQ_EPSILON`.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl PartialEq for Point2 {
    fn eq(&self, other: &Point2) -> bool {
        feq(self.x, other.x) && feq(self.y, other.y)
    }
}

/// A point (or vector) in scene space.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PartialEq for Point3 {
    fn eq(&self, other: &Point3) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Point2 {
        Point2 { x, y }
    }

    pub fn zero() -> Point2 {
        Point2 { x: 0.0, y: 0.0 }
    }

    pub fn dot(&self, other: &Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn len(&self) -> f64 {
        self.len2().sqrt()
    }

    pub fn len2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Scales the vector to length one.
    ///
    /// The zero vector has no direction; normalizing it yields `NaN`
    /// components. Guard the call, or use `checked_unit`.
    pub fn unit(&self) -> Point2 {
        let len = self.len();
        Point2 { x: self.x / len, y: self.y / len }
    }

    /// Like `unit`, but `None` for the zero vector.
    pub fn checked_unit(&self) -> Option<Point2> {
        if self.len2() == 0.0 {
            None
        } else {
            Some(self.unit())
        }
    }

    /// Rotates the vector by 90 degrees clockwise, `(x, y) -> (y, -x)`.
    pub fn perpendicular(&self) -> Point2 {
        Point2 { x: self.y, y: -self.x }
    }
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Point3 {
        Point3 { x, y, z }
    }

    pub fn zero() -> Point3 {
        Point3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// The same value on all three axes.
    pub fn splat(v: f64) -> Point3 {
        Point3 { x: v, y: v, z: v }
    }

    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Point3) -> Point3 {
        Point3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(&self) -> f64 {
        self.len2().sqrt()
    }

    pub fn len2(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Scales the vector to length one.
    ///
    /// Normalizing the zero vector yields `NaN` components; callers must
    /// guard against it or use `checked_unit`.
    pub fn unit(&self) -> Point3 {
        let len = self.len();
        Point3 { x: self.x / len, y: self.y / len, z: self.z / len }
    }

    /// Like `unit`, but `None` for the zero vector.
    pub fn checked_unit(&self) -> Option<Point3> {
        if self.len2() == 0.0 {
            None
        } else {
            Some(self.unit())
        }
    }

    /// Drops the `z` component.
    pub fn xy(&self) -> Point2 {
        Point2 { x: self.x, y: self.y }
    }

    /// Rotates the point about the X axis by `degrees`.
    ///
    /// Rotations are counter-clockwise when looking from the positive end of
    /// the axis toward the origin.
    ///
    /// ```
    /// # use bezier_canvas::tuple::Point3;
    /// let p = Point3::new(0.0, 1.0, 0.0).rotate_x(90.0);
    /// assert_eq!(p, Point3::new(0.0, 0.0, 1.0));
    /// ```
    pub fn rotate_x(&self, degrees: f64) -> Point3 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point3 {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    /// Rotates the point about the Y axis by `degrees`.
    pub fn rotate_y(&self, degrees: f64) -> Point3 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point3 {
            x: self.z * sin + self.x * cos,
            y: self.y,
            z: self.z * cos - self.x * sin,
        }
    }

    /// Rotates the point about the Z axis by `degrees`.
    pub fn rotate_z(&self, degrees: f64) -> Point3 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point3 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }
}

impl From<Point3> for Point2 {
    fn from(p: Point3) -> Point2 {
        p.xy()
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(v: [f64; 2]) -> Point2 {
        Point2 { x: v[0], y: v[1] }
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(v: [f64; 3]) -> Point3 {
        Point3 { x: v[0], y: v[1], z: v[2] }
    }
}

/// Signed doubled area spanned by two plane vectors, `a.x * b.y - a.y * b.x`.
///
/// ```
/// # use bezier_canvas::tuple::{ Point2, det };
/// let a = Point2::new(2.0, 0.0);
/// let b = Point2::new(0.0, 3.0);
/// assert_eq!(det(a, b), 6.0);
/// assert_eq!(det(b, a), -6.0);
/// ```
pub fn det(a: Point2, b: Point2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// The "shear determinant" of two scene vectors.
///
/// Sums the three planar determinants taken over (x, y), (y, z) and (z, x).
/// This is the building block of `Triangle3::area`.
pub fn det3(a: Point3, b: Point3) -> f64 {
    a.x * b.y - a.y * b.x
        + a.y * b.z - a.z * b.y
        + a.z * b.x - a.x * b.z
}

/// Componentwise product of two plane points.
pub fn mult2(a: Point2, b: Point2) -> Point2 {
    Point2 { x: a.x * b.x, y: a.y * b.y }
}

/// Componentwise product of two scene points.
pub fn mult3(a: Point3, b: Point3) -> Point3 {
    Point3 { x: a.x * b.x, y: a.y * b.y, z: a.z * b.z }
}

/// Componentwise quotient of two plane points.
///
/// If any component of the divisor is zero the dividend is returned as is.
pub fn div2(a: Point2, b: Point2) -> Point2 {
    if b.x * b.y == 0.0 {
        a
    } else {
        Point2 { x: a.x / b.x, y: a.y / b.y }
    }
}

/// Componentwise quotient of two scene points.
///
/// If any component of the divisor is zero the dividend is returned as is.
pub fn div3(a: Point3, b: Point3) -> Point3 {
    if b.x * b.y * b.z == 0.0 {
        a
    } else {
        Point3 { x: a.x / b.x, y: a.y / b.y, z: a.z / b.z }
    }
}

impl Add for Point2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self { x: self.x + other.x, y: self.y + other.y }
    }
}

impl AddAssign for Point2 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Point2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self { x: self.x - other.x, y: self.y - other.y }
    }
}

impl SubAssign for Point2 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Point2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self { x: self.x * other, y: self.y * other }
    }
}

/// Scalar division. Dividing by zero gives the zero vector.
impl Div<f64> for Point2 {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        if other == 0.0 {
            return Point2::zero();
        }

        Self { x: self.x / other, y: self.y / other }
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z
        }
    }
}

impl AddAssign for Point3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z
        }
    }
}

impl SubAssign for Point3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Point3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y, z: -self.z }
    }
}

/// Implements scalar right-multiplication for a scene point.
///
/// ```
/// # use bezier_canvas::tuple::Point3;
/// let p = Point3::new(1.0, -2.0, 3.0);
/// assert_eq!(p * 2.0, Point3::new(2.0, -4.0, 6.0));
/// ```
impl Mul<f64> for Point3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other
        }
    }
}

impl Mul<Point3> for f64 {
    type Output = Point3;

    fn mul(self, other: Point3) -> Point3 {
        other * self
    }
}

/// Scalar division. Dividing by zero gives the zero vector.
impl Div<f64> for Point3 {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        if other == 0.0 {
            return Point3::zero();
        }

        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other
        }
    }
}

/* Tests */

#[test]
fn add_and_sub_points() {
    let a = Point3::new(3.0, -2.0, 5.0);
    let b = Point3::new(-2.0, 3.0, 1.0);

    assert_eq!(a + b, Point3::new(1.0, 1.0, 6.0));
    assert_eq!(a - b, Point3::new(5.0, -5.0, 4.0));
    assert_eq!(-a, Point3::new(-3.0, 2.0, -5.0));
}

#[test]
fn divide_by_zero_is_zero_vector() {
    assert_eq!(Point3::new(1.0, 2.0, 3.0) / 0.0, Point3::zero());
    assert_eq!(Point2::new(4.0, -1.0) / 0.0, Point2::zero());
    assert_eq!(Point2::new(4.0, -1.0) / 2.0, Point2::new(2.0, -0.5));
}

#[test]
fn length_of_vectors() {
    let v = Point3::new(1.0, 2.0, 3.0);
    assert_eq!(v.len(), f64::sqrt(14.0));
    assert_eq!(v.len2(), 14.0);
    assert_eq!(Point2::new(3.0, 4.0).len(), 5.0);
}

#[test]
fn normalize_vectors() {
    assert_eq!(Point3::new(4.0, 0.0, 0.0).unit(), Point3::new(1.0, 0.0, 0.0));
    assert_eq!(Point2::new(0.0, -2.0).unit(), Point2::new(0.0, -1.0));
    assert!(Point3::zero().unit().x.is_nan());
    assert_eq!(Point3::zero().checked_unit(), None);
    assert_eq!(Point2::zero().checked_unit(), None);
}

#[test]
fn dot_and_cross() {
    let a = Point3::new(1.0, 2.0, 3.0);
    let b = Point3::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
    assert_eq!(a.cross(&b), Point3::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Point3::new(1.0, -2.0, 1.0));
    assert!(feq(a.cross(&b).dot(&a), 0.0));
    assert!(feq(a.cross(&b).dot(&b), 0.0));
}

#[test]
fn det_is_antisymmetric() {
    let pairs = [
        (Point2::new(1.0, 2.0), Point2::new(3.0, 4.0)),
        (Point2::new(-5.5, 0.25), Point2::new(7.0, -2.0)),
        (Point2::new(0.0, 0.0), Point2::new(9.0, 1.0)),
    ];

    for (a, b) in pairs.iter() {
        assert!(feq(det(*a, *b), -det(*b, *a)));
    }
}

#[test]
fn shear_determinant() {
    let a = Point3::new(1.0, 0.0, 0.0);
    let b = Point3::new(0.0, 1.0, 0.0);

    // Only the (x, y) plane contributes here.
    assert_eq!(det3(a, b), 1.0);
    assert_eq!(det3(b, a), -1.0);
}

#[test]
fn elementwise_mult_and_div() {
    let a = Point3::new(2.0, 6.0, -4.0);
    let b = Point3::new(2.0, 3.0, 4.0);

    assert_eq!(mult3(a, b), Point3::new(4.0, 18.0, -16.0));
    assert_eq!(div3(a, b), Point3::new(1.0, 2.0, -1.0));
    assert_eq!(div3(a, Point3::new(1.0, 0.0, 1.0)), a);
    assert_eq!(mult2(Point2::new(2.0, 3.0), Point2::new(4.0, 5.0)),
        Point2::new(8.0, 15.0));
    assert_eq!(div2(Point2::new(2.0, 3.0), Point2::new(0.0, 5.0)),
        Point2::new(2.0, 3.0));
}

#[test]
fn rotate_quarter_turns() {
    let x = Point3::new(1.0, 0.0, 0.0);
    let y = Point3::new(0.0, 1.0, 0.0);
    let z = Point3::new(0.0, 0.0, 1.0);

    assert_eq!(y.rotate_x(90.0), z);
    assert_eq!(z.rotate_y(90.0), x);
    assert_eq!(x.rotate_z(90.0), y);
}

#[test]
fn rotation_round_trips() {
    let points = [
        Point3::new(1.0, 2.0, 3.0),
        Point3::new(-40.0, 0.5, 17.25),
        Point3::new(0.0, -9.0, 0.0),
    ];
    let angles = [0.0, 13.0, -45.0, 90.0, 271.5];

    for p in points.iter() {
        for theta in angles.iter() {
            assert_eq!(p.rotate_x(*theta).rotate_x(-theta), *p);
            assert_eq!(p.rotate_y(*theta).rotate_y(-theta), *p);
            assert_eq!(p.rotate_z(*theta).rotate_z(-theta), *p);
        }
    }
}

#[test]
fn perpendicular_turns_clockwise() {
    let v = Point2::new(1.0, 0.0);
    assert_eq!(v.perpendicular(), Point2::new(0.0, -1.0));
    assert!(feq(v.dot(&v.perpendicular()), 0.0));
}
