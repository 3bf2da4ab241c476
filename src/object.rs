use log::{ debug, warn };

use crate::consts::{ LINE_DEFAULT_SCALE, TRIANGLE_DEFAULT_SCALE,
    BEZIER_DEFAULT_SCALE, MIN_SPLIT_DEPTH, MAX_SPLIT_DEPTH };
use crate::geometry::{ Segment3, Triangle3 };
use crate::tuple::Point3;

/// Something placed in the scene.
///
/// Objects keep their geometry in model space together with a uniform
/// `scale` and a translation (`middle`). Rotations act on the model-space
/// geometry, around the model origin; the scale and translation are applied
/// only when the object is shot, so the final position of a vertex `p` is
/// `p * scale + middle`.
pub trait Object3D {
    fn scale(&self) -> f64;
    fn middle(&self) -> Point3;
    fn middle_mut(&mut self) -> &mut Point3;

    /// Replaces every model-space point `p` with `f(p)`.
    fn map_points<F: Fn(Point3) -> Point3>(&mut self, f: F);

    /// Drops all geometry, keeping scale and translation.
    fn clear(&mut self);

    /// Moves the object by `offset`.
    fn translate(&mut self, offset: Point3) {
        *self.middle_mut() += offset;
    }

    fn rotate_x(&mut self, degrees: f64) {
        self.map_points(|p| p.rotate_x(degrees));
    }

    fn rotate_y(&mut self, degrees: f64) {
        self.map_points(|p| p.rotate_y(degrees));
    }

    fn rotate_z(&mut self, degrees: f64) {
        self.map_points(|p| p.rotate_z(degrees));
    }

    /// Scene position of a model-space point.
    fn place(&self, p: Point3) -> Point3 {
        p * self.scale() + self.middle()
    }
}

/// A set of line segments.
#[derive(Clone, Debug, PartialEq)]
pub struct LineObject {
    pub scale: f64,
    pub middle: Point3,
    pub lines: Vec<Segment3>,
}

impl Default for LineObject {
    fn default() -> LineObject {
        LineObject {
            scale: LINE_DEFAULT_SCALE,
            middle: Point3::zero(),
            lines: Vec::new(),
        }
    }
}

impl LineObject {
    pub fn new() -> LineObject {
        Default::default()
    }

    pub fn add_line(&mut self, p1: Point3, p2: Point3) {
        self.lines.push(Segment3::new(p1, p2));
    }

    pub fn add_segment(&mut self, segment: Segment3) {
        self.lines.push(segment);
    }
}

impl Object3D for LineObject {
    fn scale(&self) -> f64 {
        self.scale
    }

    fn middle(&self) -> Point3 {
        self.middle
    }

    fn middle_mut(&mut self) -> &mut Point3 {
        &mut self.middle
    }

    fn map_points<F: Fn(Point3) -> Point3>(&mut self, f: F) {
        for line in self.lines.iter_mut() {
            *line = line.map(&f);
        }
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

/// A triangle mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleObject {
    pub scale: f64,
    pub middle: Point3,
    pub triangles: Vec<Triangle3>,
}

impl Default for TriangleObject {
    fn default() -> TriangleObject {
        TriangleObject {
            scale: TRIANGLE_DEFAULT_SCALE,
            middle: Point3::zero(),
            triangles: Vec::new(),
        }
    }
}

impl TriangleObject {
    pub fn new() -> TriangleObject {
        Default::default()
    }

    pub fn add_triangle(&mut self, p1: Point3, p2: Point3, p3: Point3) {
        self.triangles.push(Triangle3::new(p1, p2, p3));
    }

    pub fn add(&mut self, triangle: Triangle3) {
        self.triangles.push(triangle);
    }
}

impl Object3D for TriangleObject {
    fn scale(&self) -> f64 {
        self.scale
    }

    fn middle(&self) -> Point3 {
        self.middle
    }

    fn middle_mut(&mut self) -> &mut Point3 {
        &mut self.middle
    }

    fn map_points<F: Fn(Point3) -> Point3>(&mut self, f: F) {
        for triangle in self.triangles.iter_mut() {
            *triangle = triangle.map(&f);
        }
    }

    fn clear(&mut self) {
        self.triangles.clear();
    }
}

/// Parameter direction of a patch split.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Along each row of control points.
    Rows,

    /// Along each column of control points.
    Columns,
}

/// One piece of a composite Bezier surface: a grid of control points.
///
/// `grid[j][k]` is the control point in row `j`, column `k`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Patch {
    pub grid: Vec<Vec<Point3>>,
}

impl Patch {
    pub fn new(grid: Vec<Vec<Point3>>) -> Patch {
        Patch { grid }
    }

    /// Whether the patch is a bicubic 4x4 grid, the only shape that can be
    /// split.
    pub fn is_bicubic(&self) -> bool {
        self.grid.len() == 4 && self.grid.iter().all(|row| row.len() == 4)
    }

    /// The corner control points, clockwise from `grid[0][0]`, or `None` for
    /// an empty or ragged patch.
    pub fn corners(&self) -> Option<[Point3; 4]> {
        let first = self.grid.first()?;
        let last = self.grid.last()?;

        Some([*first.first()?, *first.last()?, *last.last()?, *last.first()?])
    }

    /// Splits a bicubic patch in two at parameter 0.5 along `direction`.
    ///
    /// Each row (or column) is treated as a cubic Bezier curve and bisected
    /// with de Casteljau's construction. The first half keeps the curve's
    /// start, the second half its end. Patches that aren't 4x4 give `None`.
    pub fn split(&self, direction: Direction) -> Option<(Patch, Patch)> {
        if !self.is_bicubic() {
            return None;
        }

        let g = &self.grid;
        let mut a = vec![vec![Point3::zero(); 4]; 4];
        let mut b = vec![vec![Point3::zero(); 4]; 4];

        for j in 0..4 {
            match direction {
                Direction::Rows => {
                    let (left, right) = bisect([g[j][0], g[j][1], g[j][2], g[j][3]]);
                    a[j].copy_from_slice(&left);
                    b[j].copy_from_slice(&right);
                },

                Direction::Columns => {
                    let (low, high) = bisect([g[0][j], g[1][j], g[2][j], g[3][j]]);
                    for i in 0..4 {
                        a[i][j] = low[i];
                        b[i][j] = high[i];
                    }
                }
            }
        }

        Some((Patch::new(a), Patch::new(b)))
    }
}

/// Bisects a cubic Bezier curve given by four control points.
///
/// Successive pairwise midpoints, three levels deep, meet at the curve point
/// for t = 0.5.
fn bisect(c: [Point3; 4]) -> ([Point3; 4], [Point3; 4]) {
    let ab = (c[0] + c[1]) / 2.0;
    let bc = (c[1] + c[2]) / 2.0;
    let cd = (c[2] + c[3]) / 2.0;
    let abc = (ab + bc) / 2.0;
    let bcd = (bc + cd) / 2.0;
    let mid = (abc + bcd) / 2.0;

    ([c[0], ab, abc, mid], [mid, bcd, cd, c[3]])
}

/// A surface made of Bezier patches.
#[derive(Clone, Debug, PartialEq)]
pub struct BezierObject {
    pub scale: f64,
    pub middle: Point3,
    pub patches: Vec<Patch>,
}

impl Default for BezierObject {
    fn default() -> BezierObject {
        BezierObject {
            scale: BEZIER_DEFAULT_SCALE,
            middle: Point3::zero(),
            patches: Vec::new(),
        }
    }
}

impl BezierObject {
    pub fn new() -> BezierObject {
        Default::default()
    }

    pub fn add_patch(&mut self, patch: Patch) {
        self.patches.push(patch);
    }

    /// Subdivides every patch once in each direction.
    ///
    /// Every bicubic patch becomes four. Other patches pass through
    /// unchanged.
    pub fn split(&mut self) {
        self.split_pass(Direction::Rows);
        self.split_pass(Direction::Columns);
    }

    /// Runs `split` `n` times.
    ///
    /// Only depths from 1 to 6 are accepted; anything else leaves the object
    /// alone.
    ///
    /// ```
    /// # use bezier_canvas::object::{ BezierObject, Patch };
    /// # use bezier_canvas::tuple::Point3;
    /// let mut bez = BezierObject::new();
    /// bez.add_patch(Patch::new(vec![vec![Point3::zero(); 4]; 4]));
    ///
    /// bez.split_times(2);
    /// assert_eq!(bez.patches.len(), 16);
    ///
    /// bez.split_times(7);
    /// assert_eq!(bez.patches.len(), 16);
    /// ```
    pub fn split_times(&mut self, n: i32) {
        if n < MIN_SPLIT_DEPTH || n > MAX_SPLIT_DEPTH {
            warn!("ignoring split depth {} outside {}..={}",
                n, MIN_SPLIT_DEPTH, MAX_SPLIT_DEPTH);
            return;
        }

        for _ in 0..n {
            self.split();
        }
    }

    /// Splits each current patch in two, reading from the old list and
    /// writing into a fresh one.
    fn split_pass(&mut self, direction: Direction) {
        let mut next = Vec::with_capacity(self.patches.len() * 2);

        for patch in self.patches.iter() {
            match patch.split(direction) {
                Some((a, b)) => {
                    next.push(a);
                    next.push(b);
                },
                None => next.push(patch.clone()),
            }
        }

        debug!("{:?} split pass: {} -> {} patches",
            direction, self.patches.len(), next.len());
        self.patches = next;
    }

    /// Number of control points over all patches.
    pub fn point_count(&self) -> usize {
        self.patches.iter()
            .map(|p| p.grid.iter().map(|row| row.len()).sum::<usize>())
            .sum()
    }
}

impl Object3D for BezierObject {
    fn scale(&self) -> f64 {
        self.scale
    }

    fn middle(&self) -> Point3 {
        self.middle
    }

    fn middle_mut(&mut self) -> &mut Point3 {
        &mut self.middle
    }

    fn map_points<F: Fn(Point3) -> Point3>(&mut self, f: F) {
        for patch in self.patches.iter_mut() {
            for row in patch.grid.iter_mut() {
                for p in row.iter_mut() {
                    *p = f(*p);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.patches.clear();
    }
}

/// A bicubic patch shaped like a shallow dome over `[0, 3] x [0, 3]`.
#[cfg(test)]
fn dome() -> Patch {
    let heights = [
        [0.0, 1.0, 1.0, 0.0],
        [1.0, 3.0, 2.5, 1.0],
        [0.5, 2.0, 3.0, 1.0],
        [0.0, 1.0, 0.5, 0.0],
    ];

    Patch::new((0..4).map(|j| {
        (0..4).map(|k| Point3::new(k as f64, j as f64, heights[j][k])).collect()
    }).collect())
}

/// Evaluates a bicubic patch at `(u, v)` with Bernstein polynomials.
#[cfg(test)]
fn evaluate(patch: &Patch, u: f64, v: f64) -> Point3 {
    fn bernstein(t: f64) -> [f64; 4] {
        let s = 1.0 - t;
        [s * s * s, 3.0 * s * s * t, 3.0 * s * t * t, t * t * t]
    }

    let bu = bernstein(u);
    let bv = bernstein(v);
    let mut p = Point3::zero();
    for j in 0..4 {
        for k in 0..4 {
            p += patch.grid[j][k] * (bv[j] * bu[k]);
        }
    }

    p
}

/* Tests */

#[test]
fn translate_accumulates() {
    let mut lines = LineObject::new();
    lines.add_line(Point3::zero(), Point3::new(1.0, 0.0, 0.0));
    lines.translate(Point3::new(1.0, 2.0, 3.0));
    lines.translate(Point3::new(-1.0, 0.0, 1.0));

    assert_eq!(lines.middle, Point3::new(0.0, 2.0, 4.0));
    assert_eq!(lines.lines[0].p2, Point3::new(1.0, 0.0, 0.0));
}

#[test]
fn rotation_leaves_translation_alone() {
    let mut mesh = TriangleObject::new();
    mesh.add_triangle(
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
    );
    mesh.translate(Point3::new(5.0, 5.0, 5.0));
    mesh.rotate_z(90.0);

    assert_eq!(mesh.middle, Point3::new(5.0, 5.0, 5.0));
    assert_eq!(mesh.triangles[0].p1, Point3::new(0.0, 1.0, 0.0));
    assert_eq!(mesh.triangles[0].p2, Point3::new(-1.0, 0.0, 0.0));
    assert_eq!(mesh.place(mesh.triangles[0].p1), Point3::new(5.0, 6.0, 5.0));
}

#[test]
fn objects_rotate_every_point() {
    let mut bez = BezierObject::new();
    bez.add_patch(dome());
    let before = bez.clone();

    bez.rotate_x(30.0);
    bez.rotate_y(-75.0);
    bez.rotate_y(75.0);
    bez.rotate_x(-30.0);

    assert_eq!(bez, before);

    bez.rotate_x(90.0);
    assert_eq!(bez.patches[0].grid[1][0], Point3::new(0.0, -1.0, 1.0));
}

#[test]
fn clear_drops_geometry() {
    let mut lines = LineObject::new();
    lines.add_segment(Segment3::new(Point3::zero(), Point3::zero()));
    lines.translate(Point3::new(1.0, 1.0, 1.0));
    lines.clear();
    assert!(lines.lines.is_empty());
    assert_eq!(lines.middle, Point3::new(1.0, 1.0, 1.0));

    let mut bez = BezierObject::new();
    bez.add_patch(dome());
    bez.clear();
    assert!(bez.patches.is_empty());
}

#[test]
fn default_scales() {
    assert_eq!(LineObject::new().scale, 1.0);
    assert_eq!(TriangleObject::new().scale, 1.0);
    assert_eq!(BezierObject::new().scale, 100.0);
}

#[test]
fn bisect_matches_curve_midpoint() {
    let c = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 2.0, 0.0),
        Point3::new(3.0, 2.0, 1.0),
        Point3::new(4.0, 0.0, 0.0),
    ];
    let (left, right) = bisect(c);

    // B(0.5) = (c0 + 3 c1 + 3 c2 + c3) / 8
    let mid = (c[0] + c[1] * 3.0 + c[2] * 3.0 + c[3]) / 8.0;
    assert_eq!(left[3], mid);
    assert_eq!(right[0], mid);
    assert_eq!(left[0], c[0]);
    assert_eq!(right[3], c[3]);
}

#[test]
fn split_preserves_corners() {
    let patch = dome();
    let corners = patch.corners().unwrap();

    let mut bez = BezierObject::new();
    bez.add_patch(patch);
    bez.split();

    assert_eq!(bez.patches.len(), 4);

    let sub_corners: Vec<Point3> = bez.patches.iter()
        .flat_map(|p| p.corners().unwrap().to_vec())
        .collect();

    for corner in corners.iter() {
        assert!(sub_corners.iter().any(|c| c.x == corner.x
            && c.y == corner.y && c.z == corner.z));
    }

    // Each quarter keeps exactly one outer corner of the original.
    assert_eq!(bez.patches[0].grid[0][0], corners[0]);
    assert_eq!(bez.patches[1].grid[3][0], corners[3]);
    assert_eq!(bez.patches[2].grid[0][3], corners[1]);
    assert_eq!(bez.patches[3].grid[3][3], corners[2]);
}

#[test]
fn split_row_pass_keeps_row_ends() {
    let patch = dome();
    let (a, b) = patch.split(Direction::Rows).unwrap();

    for j in 0..4 {
        assert_eq!(a.grid[j][0], patch.grid[j][0]);
        assert_eq!(b.grid[j][3], patch.grid[j][3]);
        assert_eq!(a.grid[j][3], b.grid[j][0]);
    }
}

#[test]
fn split_keeps_the_surface() {
    let patch = dome();
    let mut bez = BezierObject::new();
    bez.add_patch(patch.clone());
    bez.split();

    // The quarters share the original's center point, and a sub-patch
    // evaluated anywhere lands on the original surface.
    assert_eq!(evaluate(&bez.patches[0], 1.0, 1.0), evaluate(&patch, 0.5, 0.5));
    assert_eq!(evaluate(&bez.patches[0], 0.5, 0.5), evaluate(&patch, 0.25, 0.25));
    assert_eq!(evaluate(&bez.patches[3], 0.2, 0.6), evaluate(&patch, 0.6, 0.8));
}

#[test]
fn split_counts_grow_by_four() {
    let mut initial = BezierObject::new();
    initial.add_patch(dome());
    initial.add_patch(dome());

    for n in 1..=6 {
        let mut bez = initial.clone();
        bez.split_times(n);
        assert_eq!(bez.patches.len(), 2 * 4usize.pow(n as u32));
        assert_eq!(bez.point_count(), bez.patches.len() * 16);
    }
}

#[test]
fn split_depth_out_of_range_is_ignored() {
    let mut bez = BezierObject::new();
    bez.add_patch(dome());

    for n in [-1, 0, 7, 100].iter() {
        bez.split_times(*n);
        assert_eq!(bez.patches.len(), 1);
    }
}

#[test]
fn non_bicubic_patches_pass_through() {
    let small = Patch::new(vec![vec![Point3::zero(); 3]; 3]);
    assert!(!small.is_bicubic());
    assert_eq!(small.split(Direction::Rows), None);

    let mut bez = BezierObject::new();
    bez.add_patch(small.clone());
    bez.add_patch(dome());
    bez.split();

    assert_eq!(bez.patches.len(), 5);
    assert_eq!(bez.patches[0], small);
}
