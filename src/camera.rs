use log::debug;
use serde::{ Serialize, Deserialize };

use crate::canvas::{ Canvas, Brush };
use crate::consts::{ DEFAULT_FOCUS, DEFAULT_CAMERA_HEIGHT, DEFAULT_ZOOM };
use crate::geometry::{ Segment2, Segment3, Triangle2, Triangle3 };
use crate::object::{ Object3D, LineObject, TriangleObject, BezierObject };
use crate::tuple::{ Point2, Point3 };

/// A pinhole camera looking down the negative Z axis.
///
/// The camera sits at `(0, 0, height)` and its focal point another `focus`
/// further up the axis. It has no other position or orientation; move the
/// objects instead.
///
/// ```text
///     |-   focus   -|-  height  -|
///     O-------------O------------O
///   focal       camera        scene
///   point      (screen)      origin
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    pub focus: f64,
    pub height: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Camera {
        Camera {
            focus: DEFAULT_FOCUS,
            height: DEFAULT_CAMERA_HEIGHT,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera {
    pub fn new(focus: f64, height: f64, zoom: f64) -> Camera {
        Camera { focus, height, zoom }
    }

    /// Projects a scene point onto the screen plane.
    ///
    /// With `d = height - p.z + focus`, the result is
    /// `zoom * focus * (p.x, p.y) / d`. Points at `p.z == height + focus`
    /// sit on the focal point and divide by zero; keeping geometry away from
    /// it is up to the caller.
    ///
    /// ```
    /// # use bezier_canvas::camera::Camera;
    /// # use bezier_canvas::tuple::{ Point2, Point3 };
    /// let camera = Camera::new(10000.0, 1000.0, 1.0);
    /// let p = camera.project(Point3::new(100.0, 50.0, 0.0));
    /// assert_eq!(p, Point2::new(90.9091, 45.4545));
    /// ```
    pub fn project(&self, p: Point3) -> Point2 {
        let dist = self.height - p.z;
        let fd = dist + self.focus;

        Point2::new(
            (self.zoom * p.x * self.focus) / fd,
            (self.zoom * p.y * self.focus) / fd,
        )
    }

    pub fn project_segment(&self, s: &Segment3) -> Segment2 {
        Segment2::new(self.project(s.p1), self.project(s.p2))
    }

    pub fn project_triangle(&self, t: &Triangle3) -> Triangle2 {
        Triangle2::new(self.project(t.p1), self.project(t.p2),
            self.project(t.p3))
    }

    pub fn project_points(&self, points: &[Point3]) -> Vec<Point2> {
        points.iter().map(|p| self.project(*p)).collect()
    }

    /// Shoots a closed polygon through scene points.
    pub fn shoot_path(&self, points: &[Point3], canvas: &mut Canvas,
        brush: &Brush) {
        canvas.connect(&self.project_points(points), brush.color);
    }

    /// Shoots every segment of a line object.
    pub fn shoot_lines(&self, object: &LineObject, canvas: &mut Canvas,
        brush: &Brush) {
        for line in object.lines.iter() {
            let s = self.project_segment(&line.map(|p| object.place(p)));
            canvas.segment(&s, brush.color);
        }

        debug!("shot {} lines", object.lines.len());
    }

    /// Shoots every triangle of a mesh, outlined or filled per the brush.
    pub fn shoot_triangles(&self, object: &TriangleObject, canvas: &mut Canvas,
        brush: &Brush) {
        for triangle in object.triangles.iter() {
            let t = self.project_triangle(&triangle.map(|p| object.place(p)));
            canvas.draw_triangle(&t, brush);
        }

        debug!("shot {} triangles (solid: {})", object.triangles.len(),
            brush.solid);
    }

    /// Shoots the control net of every patch.
    ///
    /// Each control point is joined to its right and lower neighbors in the
    /// grid. The surface itself is not evaluated; split the object first for
    /// a smoother look.
    pub fn shoot_bezier(&self, object: &BezierObject, canvas: &mut Canvas,
        brush: &Brush) {
        for patch in object.patches.iter() {
            let net: Vec<Vec<Point2>> = patch.grid.iter()
                .map(|row| row.iter()
                    .map(|p| self.project(object.place(*p)))
                    .collect())
                .collect();

            for (j, row) in net.iter().enumerate() {
                for (k, p) in row.iter().enumerate() {
                    if let Some(right) = row.get(k + 1) {
                        canvas.line(*p, *right, brush.color);
                    }
                    if let Some(below) = net.get(j + 1).and_then(|r| r.get(k)) {
                        canvas.line(*p, *below, brush.color);
                    }
                }
            }
        }

        debug!("shot {} patches", object.patches.len());
    }
}

/// Scene objects the camera knows how to shoot.
pub trait Shoot {
    fn shoot(&self, camera: &Camera, canvas: &mut Canvas, brush: &Brush);
}

impl Shoot for LineObject {
    fn shoot(&self, camera: &Camera, canvas: &mut Canvas, brush: &Brush) {
        camera.shoot_lines(self, canvas, brush);
    }
}

impl Shoot for TriangleObject {
    fn shoot(&self, camera: &Camera, canvas: &mut Canvas, brush: &Brush) {
        camera.shoot_triangles(self, canvas, brush);
    }
}

impl Shoot for BezierObject {
    fn shoot(&self, camera: &Camera, canvas: &mut Canvas, brush: &Brush) {
        camera.shoot_bezier(self, canvas, brush);
    }
}

/* Tests */

#[test]
fn projection_scenario() {
    let camera = Camera::new(10000.0, 1000.0, 1.0);
    let p = camera.project(Point3::new(100.0, 50.0, 0.0));

    assert!((p.x - 100.0 * 10000.0 / 11000.0).abs() < 1e-9);
    assert!((p.y - 50.0 * 10000.0 / 11000.0).abs() < 1e-9);
}

#[test]
fn default_camera() {
    assert_eq!(Camera::default(), Camera::new(10000.0, 1000.0, 1.0));
}

#[test]
fn closer_points_project_larger() {
    let camera = Camera::default();
    let far = camera.project(Point3::new(10.0, 0.0, -500.0));
    let near = camera.project(Point3::new(10.0, 0.0, 500.0));

    assert!(near.x > far.x);
    assert_eq!(camera.project(Point3::new(0.0, 0.0, 123.0)), Point2::zero());
}

#[test]
fn zoom_scales_projection() {
    let p = Point3::new(30.0, -20.0, 10.0);
    let one = Camera::new(500.0, 100.0, 1.0).project(p);
    let three = Camera::new(500.0, 100.0, 3.0).project(p);

    assert_eq!(three, one * 3.0);
}

#[test]
fn pair_and_triple_projection_is_componentwise() {
    let camera = Camera::new(100.0, 50.0, 2.0);
    let a = Point3::new(1.0, 2.0, 3.0);
    let b = Point3::new(-4.0, 5.0, -6.0);
    let c = Point3::new(7.0, 0.0, 9.0);

    let s = camera.project_segment(&Segment3::new(a, b));
    assert_eq!(s, Segment2::new(camera.project(a), camera.project(b)));

    let t = camera.project_triangle(&Triangle3::new(a, b, c));
    assert_eq!(t.p3, camera.project(c));

    assert_eq!(camera.project_points(&[a, c]), vec![camera.project(a), camera.project(c)]);
}

#[test]
fn shoot_lines_applies_translation() {
    use crate::color::Color;

    // An orthographic-looking camera: huge focus, so x' ~ x.
    let camera = Camera::new(1e12, 0.0, 1.0);
    let mut object = LineObject::new();
    object.add_line(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 0.0, 0.0));
    object.translate(Point3::new(0.0, 3.0, 0.0));

    let mut canvas = Canvas::new(16, 16).unwrap();
    object.shoot(&camera, &mut canvas, &Brush::new(Color::red()));

    assert_eq!(canvas.get(Point2::new(2.0, 3.0)), Color::red());
    assert_eq!(canvas.get(Point2::new(2.0, 0.0)), Color::black());
}

#[test]
fn shoot_triangles_solid_and_outline() {
    use crate::color::Color;

    let camera = Camera::new(1e12, 0.0, 1.0);
    let mut mesh = TriangleObject::new();
    mesh.add_triangle(
        Point3::new(-0.6, -0.6, 0.0),
        Point3::new(0.6, -0.6, 0.0),
        Point3::new(-0.6, 0.6, 0.0),
    );
    mesh.scale = 5.0;

    let mut outline = Canvas::new(16, 16).unwrap();
    mesh.shoot(&camera, &mut outline, &Brush::new(Color::white()));
    assert_eq!(outline.get(Point2::new(-1.0, -1.0)), Color::black());

    let mut solid = Canvas::new(16, 16).unwrap();
    mesh.shoot(&camera, &mut solid, &Brush::solid(Color::white()));
    assert_eq!(solid.get(Point2::new(-1.0, -1.0)), Color::white());
}

#[test]
fn shoot_bezier_draws_control_net() {
    use crate::color::Color;
    use crate::object::Patch;

    let camera = Camera::new(1e12, 0.0, 1.0);
    let grid = (0..4).map(|j| {
        (0..4).map(|k| Point3::new(k as f64 - 1.5, j as f64 - 1.5, 0.0)).collect()
    }).collect();

    let mut bez = BezierObject::new();
    bez.scale = 4.0;
    bez.add_patch(Patch::new(grid));

    let mut canvas = Canvas::new(32, 32).unwrap();
    bez.shoot(&camera, &mut canvas, &Brush::new(Color::green()));

    // Net lines sit 4 pixels apart; cell centers stay dark.
    assert_eq!(canvas.get(Point2::new(-6.0, -6.0)), Color::green());
    assert_eq!(canvas.get(Point2::new(6.0, 6.0)), Color::green());
    assert_eq!(canvas.get(Point2::new(0.0, -6.0)), Color::green());
    assert_eq!(canvas.get(Point2::new(-2.0, 0.0)), Color::green());
    assert_eq!(canvas.get(Point2::new(0.0, 0.0)), Color::black());
    assert_eq!(canvas.get(Point2::new(8.0, 8.0)), Color::black());
}

#[test]
fn shoot_path_closes_polygon() {
    use crate::color::Color;

    let camera = Camera::new(1e12, 0.0, 1.0);
    let points = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(5.0, 0.0, 0.0),
        Point3::new(5.0, 5.0, 0.0),
    ];

    let mut canvas = Canvas::new(16, 16).unwrap();
    camera.shoot_path(&points, &mut canvas, &Brush::new(Color::blue()));

    assert_eq!(canvas.get(Point2::new(3.0, 3.0)), Color::blue());
    assert_eq!(canvas.get(Point2::new(5.0, 2.0)), Color::blue());
}
