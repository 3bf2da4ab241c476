use crate::tuple::{ Point2, Point3, det, det3 };

/// An ordered pair of plane points.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Segment2 {
    pub p1: Point2,
    pub p2: Point2,
}

/// An ordered pair of scene points.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Segment3 {
    pub p1: Point3,
    pub p2: Point3,
}

/// An ordered triple of plane points.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Triangle2 {
    pub p1: Point2,
    pub p2: Point2,
    pub p3: Point2,
}

/// An ordered triple of scene points.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Triangle3 {
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl Segment2 {
    pub fn new(p1: Point2, p2: Point2) -> Segment2 {
        Segment2 { p1, p2 }
    }

    /// The direction vector `p2 - p1`.
    pub fn vector(&self) -> Point2 {
        self.p2 - self.p1
    }

    pub fn len(&self) -> f64 {
        self.vector().len()
    }

    pub fn len2(&self) -> f64 {
        self.vector().len2()
    }

    /// Determinant of the two endpoints taken as vectors.
    pub fn det(&self) -> f64 {
        det(self.p1, self.p2)
    }
}

impl Segment3 {
    pub fn new(p1: Point3, p2: Point3) -> Segment3 {
        Segment3 { p1, p2 }
    }

    /// The direction vector `p2 - p1`.
    pub fn vector(&self) -> Point3 {
        self.p2 - self.p1
    }

    pub fn len(&self) -> f64 {
        self.vector().len()
    }

    pub fn len2(&self) -> f64 {
        self.vector().len2()
    }

    /// Shear determinant of the two endpoints taken as vectors.
    pub fn det(&self) -> f64 {
        det3(self.p1, self.p2)
    }

    /// Applies `f` to both endpoints.
    pub fn map<F: Fn(Point3) -> Point3>(&self, f: F) -> Segment3 {
        Segment3 { p1: f(self.p1), p2: f(self.p2) }
    }
}

impl Triangle2 {
    pub fn new(p1: Point2, p2: Point2, p3: Point2) -> Triangle2 {
        Triangle2 { p1, p2, p3 }
    }

    /// Signed doubled area, `det(p2 - p1, p3 - p1)`.
    ///
    /// Positive for counter-clockwise vertex order.
    pub fn doubled_area(&self) -> f64 {
        det(self.p2 - self.p1, self.p3 - self.p1)
    }

    /// Unsigned area.
    ///
    /// ```
    /// # use bezier_canvas::tuple::Point2;
    /// # use bezier_canvas::geometry::Triangle2;
    /// let t = Triangle2::new(
    ///     Point2::new(0.0, 0.0),
    ///     Point2::new(4.0, 0.0),
    ///     Point2::new(0.0, 3.0),
    /// );
    /// assert_eq!(t.area(), 6.0);
    /// ```
    pub fn area(&self) -> f64 {
        self.doubled_area().abs() / 2.0
    }

    pub fn vertices(&self) -> [Point2; 3] {
        [self.p1, self.p2, self.p3]
    }
}

impl Triangle3 {
    pub fn new(p1: Point3, p2: Point3, p3: Point3) -> Triangle3 {
        Triangle3 { p1, p2, p3 }
    }

    /// Signed doubled area measured with the shear determinant.
    pub fn doubled_area(&self) -> f64 {
        det3(self.p2 - self.p1, self.p3 - self.p1)
    }

    pub fn area(&self) -> f64 {
        self.doubled_area().abs() / 2.0
    }

    /// The (unnormalized) normal `(p2 - p1) x (p3 - p1)`.
    pub fn normal(&self) -> Point3 {
        (self.p2 - self.p1).cross(&(self.p3 - self.p1))
    }

    /// Applies `f` to all three vertices.
    pub fn map<F: Fn(Point3) -> Point3>(&self, f: F) -> Triangle3 {
        Triangle3 { p1: f(self.p1), p2: f(self.p2), p3: f(self.p3) }
    }
}

/* Tests */

#[test]
fn segment_vector_and_length() {
    let s = Segment3::new(Point3::new(1.0, 1.0, 1.0), Point3::new(3.0, 4.0, 7.0));

    assert_eq!(s.vector(), Point3::new(2.0, 3.0, 6.0));
    assert_eq!(s.len(), 7.0);
    assert_eq!(s.len2(), 49.0);

    let s = Segment2::new(Point2::new(-1.0, 2.0), Point2::new(2.0, -2.0));
    assert_eq!(s.vector(), Point2::new(3.0, -4.0));
    assert_eq!(s.len(), 5.0);
}

#[test]
fn area_invariant_under_cyclic_permutation() {
    let a = Point2::new(-2.0, -2.0);
    let b = Point2::new(5.0, -1.0);
    let c = Point2::new(0.5, 3.0);

    let t1 = Triangle2::new(a, b, c);
    let t2 = Triangle2::new(b, c, a);
    let t3 = Triangle2::new(c, a, b);

    assert_eq!(t1.doubled_area(), t2.doubled_area());
    assert_eq!(t1.doubled_area(), t3.doubled_area());
    assert_eq!(Triangle2::new(a, c, b).doubled_area(), -t1.doubled_area());
}

#[test]
fn triangle_normal_is_perpendicular() {
    use crate::feq;

    let t = Triangle3::new(
        Point3::new(1.0, 0.0, 2.0),
        Point3::new(-3.0, 4.0, 0.5),
        Point3::new(2.0, 2.0, -1.0),
    );
    let n = t.normal();

    assert!(feq(n.dot(&(t.p2 - t.p1)), 0.0));
    assert!(feq(n.dot(&(t.p3 - t.p1)), 0.0));
}

#[test]
fn flat_triangle3_area_matches_plane() {
    let t = Triangle3::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(0.0, 3.0, 0.0),
    );

    assert_eq!(t.area(), 6.0);
    assert_eq!(t.normal(), Point3::new(0.0, 0.0, 12.0));
}
