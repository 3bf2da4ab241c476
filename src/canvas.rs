use std::ops::RangeInclusive;

use crate::color::Color;
use crate::consts::{ MAX_PIXELS, FILL_EPSILON, CIRCLE_SEGMENTS };
use crate::error::CanvasError;
use crate::geometry::{ Segment2, Triangle2 };
use crate::tuple::{ Point2, det };

/// How a shape should be put on the canvas.
///
/// Drawing calls never consult hidden state: the color (and, for closed
/// shapes, whether to fill them) always travels with the call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Brush {
    pub color: Color,

    /// Fill closed shapes instead of outlining them.
    pub solid: bool,
}

impl Brush {
    /// An outlining brush.
    pub fn new(color: Color) -> Brush {
        Brush { color, solid: false }
    }

    /// A filling brush.
    pub fn solid(color: Color) -> Brush {
        Brush { color, solid: true }
    }
}

impl Default for Brush {
    fn default() -> Brush {
        Brush::new(Color::white())
    }
}

/// A canvas for drawing pixels.
///
/// The canvas owns a `width * height` grid of colors stored row by row,
/// starting from buffer row 0. Drawing happens in *logical* coordinates:
/// a logical point `p` lands on the buffer cell `floor(origin + p)`.
/// By default the origin sits at the buffer center, so logical `(0, 0)` is
/// the middle of the picture.
///
/// Anything that falls outside the buffer is ignored when written and reads
/// back as black. Shapes routinely hang over the edges, so this is not an
/// error.
///
/// # Examples
///
/// ```
/// # use bezier_canvas::canvas::Canvas;
/// # use bezier_canvas::color::Color;
/// # use bezier_canvas::tuple::Point2;
/// let mut canvas = Canvas::new(8, 8).unwrap();
/// canvas.set(Point2::new(1.0, -2.0), Color::red());
/// assert_eq!(canvas.get(Point2::new(1.0, -2.0)), Color::red());
/// assert_eq!(canvas.get(Point2::new(100.0, 0.0)), Color::black());
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,

    /// Buffer position of logical `(0, 0)`.
    origin: Point2,

    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a black canvas with the origin at its center.
    ///
    /// Fails if the canvas would hold more than `MAX_PIXELS` samples.
    pub fn new(width: usize, height: usize) -> Result<Canvas, CanvasError> {
        let mut canvas = Canvas::default();
        canvas.set_size(width, height)?;
        Ok(canvas)
    }

    /// Reallocates the canvas, discarding its contents.
    ///
    /// The new buffer is black and the origin moves to its center. An
    /// oversized request is rejected and leaves the canvas untouched.
    pub fn set_size(&mut self, width: usize, height: usize)
        -> Result<(), CanvasError> {
        match width.checked_mul(height) {
            Some(n) if n <= MAX_PIXELS => {},
            _ => return Err(CanvasError::TooLarge { width, height }),
        }

        self.width = width;
        self.height = height;
        self.pixels = vec![Color::black(); width * height];
        self.set_origin_center();

        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin(&self) -> Point2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point2) {
        self.origin = origin;
    }

    pub fn set_origin_center(&mut self) {
        self.origin = Point2::new(
            (self.width / 2) as f64,
            (self.height / 2) as f64,
        );
    }

    /// The samples, row by row from buffer row 0.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Overwrites the samples, row by row from buffer row 0.
    ///
    /// Extra input is ignored; if the input is short, the remaining samples
    /// keep their colors.
    pub fn load_pixels(&mut self, pixels: &[Color]) {
        for (dst, src) in self.pixels.iter_mut().zip(pixels) {
            *dst = *src;
        }
    }

    /// Paints the whole canvas one color.
    pub fn fill(&mut self, color: Color) {
        for pixel in self.pixels.iter_mut() {
            *pixel = color;
        }
    }

    /// Writes a color in buffer coordinates (column `x`, row `y`).
    ///
    /// Out-of-bounds pixels are ignored.
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = color;
    }

    /// Reads a color in buffer coordinates, `None` when out of bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Buffer index of a logical point, if it lands inside the buffer.
    fn index(&self, p: Point2) -> Option<usize> {
        let q = self.origin + p;
        let x = q.x.floor();
        let y = q.y.floor();

        // Written so that NaN coordinates fall through to `None`.
        if !(x >= 0.0 && y >= 0.0
            && x < self.width as f64 && y < self.height as f64) {
            return None;
        }

        Some((y as usize) * self.width + (x as usize))
    }

    /// Sets a logical point. Points off the canvas are dropped.
    pub fn set(&mut self, p: Point2, color: Color) {
        if let Some(i) = self.index(p) {
            self.pixels[i] = color;
        }
    }

    /// Sets every point of a list.
    pub fn set_points(&mut self, points: &[Point2], color: Color) {
        for p in points {
            self.set(*p, color);
        }
    }

    /// Reads a logical point. Points off the canvas read as black.
    pub fn get(&self, p: Point2) -> Color {
        match self.index(p) {
            Some(i) => self.pixels[i],
            None => Color::black(),
        }
    }

    /// Integer logical columns covering the buffer.
    fn columns(&self) -> std::ops::Range<i64> {
        let ox = self.origin.x.floor() as i64;
        0i64.saturating_sub(ox)..(self.width as i64).saturating_sub(ox)
    }

    /// Integer logical rows covering the buffer.
    fn rows(&self) -> std::ops::Range<i64> {
        let oy = self.origin.y.floor() as i64;
        0i64.saturating_sub(oy)..(self.height as i64).saturating_sub(oy)
    }

    /// Logical x values worth visiting, with a one-pixel margin.
    fn x_limits(&self) -> (i64, i64) {
        (
            ((-self.origin.x).floor() as i64).saturating_sub(1),
            ((self.width as f64 - self.origin.x).ceil() as i64).saturating_add(1),
        )
    }

    /// Logical y values worth visiting, with a one-pixel margin.
    fn y_limits(&self) -> (i64, i64) {
        (
            ((-self.origin.y).floor() as i64).saturating_sub(1),
            ((self.height as f64 - self.origin.y).ceil() as i64).saturating_add(1),
        )
    }

    /// Draws a straight line with a floating point DDA.
    ///
    /// The axis with the larger extent drives: the line visits every integer
    /// stop on that axis from `p1` toward `p2` and interpolates the other
    /// coordinate. Horizontal and vertical lines are the special cases where
    /// the interpolated coordinate stays constant. A zero-length line sets a
    /// single point.
    pub fn line(&mut self, p1: Point2, p2: Point2, color: Color) {
        if ![p1.x, p1.y, p2.x, p2.y].iter().all(|v| v.is_finite()) {
            return;
        }

        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;

        if dx == 0.0 && dy == 0.0 {
            self.set(p1, color);
        } else if dx.abs() >= dy.abs() {
            let (lo, hi) = self.x_limits();
            for x in stops(p1.x, p2.x, lo, hi) {
                let x = x as f64;
                let y = p1.y + (dy * (x - p1.x)) / dx;
                self.set(Point2::new(x, y), color);
            }
        } else {
            let (lo, hi) = self.y_limits();
            for y in stops(p1.y, p2.y, lo, hi) {
                let y = y as f64;
                let x = p1.x + (dx * (y - p1.y)) / dy;
                self.set(Point2::new(x, y), color);
            }
        }
    }

    pub fn segment(&mut self, s: &Segment2, color: Color) {
        self.line(s.p1, s.p2, color);
    }

    /// Outlines a triangle.
    pub fn triangle(&mut self, t: &Triangle2, color: Color) {
        self.line(t.p1, t.p2, color);
        self.line(t.p1, t.p3, color);
        self.line(t.p2, t.p3, color);
    }

    /// Fills a triangle.
    ///
    /// Every integer logical point of the canvas is tested: it lies inside
    /// when the three doubled areas it forms with the triangle's edges add up
    /// to no more than the triangle's own doubled area. Points exactly on an
    /// edge are inside.
    /// The edges are then stroked as well, so the fill covers every pixel
    /// the outline would set.
    ///
    /// ```
    /// # use bezier_canvas::canvas::Canvas;
    /// # use bezier_canvas::color::Color;
    /// # use bezier_canvas::geometry::Triangle2;
    /// # use bezier_canvas::tuple::Point2;
    /// let mut canvas = Canvas::new(8, 8).unwrap();
    /// let t = Triangle2::new(
    ///     Point2::new(-2.0, -2.0),
    ///     Point2::new(2.0, -2.0),
    ///     Point2::new(0.0, 2.0),
    /// );
    /// canvas.solid_triangle(&t, Color::white());
    /// assert_eq!(canvas.get(Point2::new(0.0, 0.0)), Color::white());
    /// assert_eq!(canvas.get(Point2::new(-4.0, -4.0)), Color::black());
    /// ```
    pub fn solid_triangle(&mut self, t: &Triangle2, color: Color) {
        let area = t.doubled_area().abs();
        let limit = area + FILL_EPSILON * area.max(1.0);

        for y in self.rows() {
            for x in self.columns() {
                let p = Point2::new(x as f64, y as f64);
                let sum = det(p - t.p1, p - t.p2).abs()
                    + det(p - t.p2, p - t.p3).abs()
                    + det(p - t.p3, p - t.p1).abs();

                if sum <= limit {
                    self.set(p, color);
                }
            }
        }

        // The area test can miss pixels the DDA puts just past an edge.
        self.triangle(t, color);
    }

    /// Outlines or fills a triangle depending on the brush.
    pub fn draw_triangle(&mut self, t: &Triangle2, brush: &Brush) {
        if brush.solid {
            self.solid_triangle(t, brush.color);
        } else {
            self.triangle(t, brush.color);
        }
    }

    /// Outlines the two triangles `(p1, p2, p3)` and `(p1, p2, p4)`.
    pub fn quad(&mut self, p1: Point2, p2: Point2, p3: Point2, p4: Point2,
        color: Color) {
        self.triangle(&Triangle2::new(p1, p2, p3), color);
        self.triangle(&Triangle2::new(p1, p2, p4), color);
    }

    /// Outlines a circle as a polyline of half-degree steps.
    pub fn circle(&mut self, center: Point2, radius: f64, color: Color) {
        let mut last = center + Point2::new(radius, 0.0);
        for n in 0..=CIRCLE_SEGMENTS {
            let theta = (n as f64 / 2.0).to_radians();
            let now = Point2::new(
                theta.cos() * radius + center.x,
                theta.sin() * radius + center.y,
            );
            self.line(last, now, color);
            last = now;
        }
    }

    /// Fills a disc: every integer logical point within `radius` of `center`.
    pub fn ball(&mut self, center: Point2, radius: f64, color: Color) {
        let r2 = radius * radius;

        for y in self.rows() {
            for x in self.columns() {
                let p = Point2::new(x as f64, y as f64);
                if (p - center).len2() <= r2 {
                    self.set(p, color);
                }
            }
        }
    }

    /// The four corners of the square centered on `center` with one corner
    /// at `corner`, in drawing order.
    fn square_corners(center: Point2, corner: Point2) -> [Point2; 4] {
        let v1 = corner - center;
        let v2 = v1.perpendicular();

        [center + v1, center + v2, center - v1, center - v2]
    }

    /// Outlines a square given its center and one corner.
    pub fn square(&mut self, center: Point2, corner: Point2, color: Color) {
        self.connect(&Canvas::square_corners(center, corner), color);
    }

    /// Fills a square given its center and one corner.
    pub fn solid_square(&mut self, center: Point2, corner: Point2,
        color: Color) {
        let [a, b, c, d] = Canvas::square_corners(center, corner);
        self.solid_triangle(&Triangle2::new(a, c, b), color);
        self.solid_triangle(&Triangle2::new(a, c, d), color);
    }

    /// Draws a closed polygon through the points, in order.
    pub fn connect(&mut self, points: &[Point2], color: Color) {
        let (first, last) = match (points.first(), points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return,
        };

        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color);
        }
        self.line(first, last, color);
    }

    /// Draws an edge between every two distinct points of the list.
    pub fn frame(&mut self, points: &[Point2], color: Color) {
        for (i, p) in points.iter().enumerate() {
            for q in points.iter().skip(i + 1) {
                self.line(*p, *q, color);
            }
        }
    }
}

/// Integer stops a DDA visits going from `from` to `to`, clipped to
/// `lo..=hi`.
///
/// The walk starts at `from` truncated toward zero and covers every integer
/// up to (or down to) `to`. Stops come back in ascending order either way.
fn stops(from: f64, to: f64, lo: i64, hi: i64) -> RangeInclusive<i64> {
    let start = from as i64;
    let (a, b) = if to >= from {
        (start, to.floor() as i64)
    } else {
        (to.ceil() as i64, start)
    };

    a.max(lo)..=b.min(hi)
}

/// Logical integer coordinates of every pixel set to `color`.
#[cfg(test)]
fn lit(canvas: &Canvas, color: Color) -> Vec<(i64, i64)> {
    let mut out = Vec::new();
    for y in canvas.rows() {
        for x in canvas.columns() {
            if canvas.get(Point2::new(x as f64, y as f64)) == color {
                out.push((x, y));
            }
        }
    }

    out
}

/* Tests */

#[test]
fn new_canvas_is_black() {
    let canvas = Canvas::new(10, 20).unwrap();

    assert_eq!(canvas.width(), 10);
    assert_eq!(canvas.height(), 20);
    assert_eq!(canvas.origin(), Point2::new(5.0, 10.0));
    assert!(canvas.pixels().iter().all(|&c| c == Color::black()));
}

#[test]
fn oversized_canvas_is_rejected() {
    assert_eq!(Canvas::new(1921, 1080),
        Err(CanvasError::TooLarge { width: 1921, height: 1080 }));
    assert!(Canvas::new(1920, 1080).is_ok());
    assert!(Canvas::new(usize::MAX, 2).is_err());
}

#[test]
fn failed_resize_keeps_contents() {
    let mut canvas = Canvas::new(4, 4).unwrap();
    canvas.set(Point2::zero(), Color::red());

    assert!(canvas.set_size(4000, 4000).is_err());
    assert_eq!(canvas.width(), 4);
    assert_eq!(canvas.height(), 4);
    assert_eq!(canvas.get(Point2::zero()), Color::red());

    canvas.set_size(6, 2).unwrap();
    assert_eq!(canvas.pixels().len(), 12);
    assert_eq!(canvas.get(Point2::zero()), Color::black());
}

#[test]
fn set_then_get_round_trips() {
    let mut canvas = Canvas::new(6, 5).unwrap();
    let c = Color::rgb(12, 34, 56);

    for y in canvas.rows() {
        for x in canvas.columns() {
            let p = Point2::new(x as f64, y as f64);
            canvas.set(p, c);
            assert_eq!(canvas.get(p), c);
        }
    }
}

#[test]
fn out_of_bounds_reads_black() {
    let mut canvas = Canvas::new(4, 4).unwrap();
    canvas.fill(Color::white());

    for p in [
        Point2::new(-3.0, 0.0),
        Point2::new(2.0, 0.0),
        Point2::new(0.0, 2.0),
        Point2::new(0.0, -2.5),
        Point2::new(f64::NAN, 0.0),
    ].iter() {
        canvas.set(*p, Color::red());
        assert_eq!(canvas.get(*p), Color::black());
    }

    assert!(canvas.pixels().iter().all(|&c| c == Color::white()));
}

#[test]
fn origin_offsets_addressing() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.set_origin(Point2::new(0.0, 0.0));
    canvas.set(Point2::new(2.0, 3.0), Color::blue());

    assert_eq!(canvas.read_pixel(2, 3), Some(Color::blue()));
    assert_eq!(canvas.read_pixel(8, 0), None);
}

#[test]
fn solid_triangle_scenario() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.set_origin(Point2::new(4.0, 4.0));
    canvas.fill(Color::black());

    let t = Triangle2::new(
        Point2::new(-2.0, -2.0),
        Point2::new(2.0, -2.0),
        Point2::new(0.0, 2.0),
    );
    canvas.solid_triangle(&t, Color::white());

    assert_eq!(canvas.get(Point2::new(0.0, 0.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(-4.0, -4.0)), Color::black());
    assert_eq!(canvas.get(Point2::new(-2.0, -2.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(0.0, 2.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(-2.0, 1.0)), Color::black());
}

#[test]
fn horizontal_and_vertical_lines() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.line(Point2::new(-3.0, 1.0), Point2::new(3.0, 1.0), Color::red());

    let row: Vec<_> = (-3..=3).map(|x| (x, 1)).collect();
    assert_eq!(lit(&canvas, Color::red()), row);

    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.line(Point2::new(2.0, 4.0), Point2::new(2.0, -1.0), Color::red());

    let column: Vec<_> = (-1..=4).map(|y| (2, y)).collect();
    assert_eq!(lit(&canvas, Color::red()), column);
}

#[test]
fn lines_are_direction_aware() {
    let a = Point2::new(-5.0, -2.0);
    let b = Point2::new(4.0, 3.0);

    let mut forward = Canvas::new(20, 20).unwrap();
    forward.line(a, b, Color::white());

    let mut backward = Canvas::new(20, 20).unwrap();
    backward.line(b, a, Color::white());

    // x drives: one pixel per column, ten columns.
    assert_eq!(lit(&forward, Color::white()).len(), 10);
    assert_eq!(forward, backward);
}

#[test]
fn steep_line_steps_along_y() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.line(Point2::new(0.0, 0.0), Point2::new(2.0, 6.0), Color::white());

    let pixels = lit(&canvas, Color::white());
    assert_eq!(pixels.len(), 7);
    assert!(pixels.contains(&(0, 0)));
    assert!(pixels.contains(&(1, 3)));
    assert!(pixels.contains(&(2, 6)));
}

#[test]
fn zero_length_line_sets_one_pixel() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.line(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0), Color::green());

    assert_eq!(lit(&canvas, Color::green()), vec![(1, 1)]);
}

#[test]
fn far_away_lines_are_clipped() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.line(Point2::new(-1e15, 0.0), Point2::new(1e15, 0.0), Color::white());

    assert_eq!(lit(&canvas, Color::white()).len(), 8);
}

#[test]
fn outline_pixels_are_inside_fill() {
    let t = Triangle2::new(
        Point2::new(-3.0, -3.0),
        Point2::new(3.0, -3.0),
        Point2::new(-3.0, 3.0),
    );

    let mut outline = Canvas::new(12, 12).unwrap();
    outline.triangle(&t, Color::white());

    let mut solid = Canvas::new(12, 12).unwrap();
    solid.draw_triangle(&t, &Brush::solid(Color::white()));

    let filled = lit(&solid, Color::white());
    for p in lit(&outline, Color::white()) {
        assert!(filled.contains(&p), "{:?} is outlined but not filled", p);
    }
}

#[test]
fn fill_covers_skewed_outlines() {
    let triangles = [
        [[0.0, 0.0], [5.0, -2.0], [0.0, 5.0]],
        [[-7.0, -3.0], [6.0, 1.0], [-2.0, 8.0]],
        [[1.5, -8.25], [8.0, 7.0], [-6.5, 2.75]],
        [[-9.0, 9.0], [-8.0, -9.0], [9.0, 0.5]],
        [[3.0, 3.0], [-4.0, 2.0], [0.0, -1.0]],
    ];

    for v in triangles.iter() {
        let t = Triangle2::new(v[0].into(), v[1].into(), v[2].into());

        let mut outline = Canvas::new(20, 20).unwrap();
        outline.triangle(&t, Color::white());

        let mut solid = Canvas::new(20, 20).unwrap();
        solid.solid_triangle(&t, Color::white());

        let filled = lit(&solid, Color::white());
        for p in lit(&outline, Color::white()) {
            assert!(filled.contains(&p), "{:?} of {:?} is outlined but not filled", p, v);
        }
    }
}

#[test]
fn fractional_negative_origin_reaches_every_column() {
    let mut canvas = Canvas::new(4, 4).unwrap();
    canvas.set_origin(Point2::new(-0.5, -0.5));

    // Logical 1..=4 maps onto buffer 0..=3.
    canvas.ball(Point2::new(2.5, 2.5), 10.0, Color::white());

    assert!(canvas.pixels().iter().all(|&c| c == Color::white()));
}

#[test]
fn extreme_origin_does_not_overflow() {
    let mut canvas = Canvas::new(6, 6).unwrap();
    canvas.set_origin(Point2::new(-1e30, 1e30));

    canvas.line(Point2::new(-5.0, -5.0), Point2::new(5.0, 5.0), Color::white());
    canvas.ball(Point2::zero(), 3.0, Color::white());
    canvas.solid_triangle(&Triangle2::new(
        Point2::new(0.0, 0.0),
        Point2::new(3.0, 0.0),
        Point2::new(0.0, 3.0),
    ), Color::white());

    assert!(lit(&canvas, Color::white()).is_empty());
}

#[test]
fn circle_is_hollow() {
    let mut canvas = Canvas::new(40, 40).unwrap();
    canvas.circle(Point2::zero(), 10.0, Color::white());

    assert_eq!(canvas.get(Point2::new(10.0, 0.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(0.0, 10.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(-10.0, 0.0)), Color::white());
    assert_eq!(canvas.get(Point2::zero()), Color::black());
}

#[test]
fn ball_is_filled() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    canvas.ball(Point2::new(1.0, 1.0), 3.0, Color::white());

    let pixels = lit(&canvas, Color::white());
    assert!(pixels.contains(&(1, 1)));
    assert!(pixels.contains(&(4, 1)));
    assert!(pixels.contains(&(1, -2)));
    assert!(!pixels.contains(&(4, 4)));
    assert!(pixels.iter().all(|&(x, y)| (x - 1).pow(2) + (y - 1).pow(2) <= 9));
}

#[test]
fn squares_from_center_and_corner() {
    let center = Point2::zero();
    let corner = Point2::new(3.0, 3.0);

    let mut outline = Canvas::new(16, 16).unwrap();
    outline.square(center, corner, Color::white());

    for p in [(3.0, 3.0), (3.0, -3.0), (-3.0, -3.0), (-3.0, 3.0), (0.0, 3.0)].iter() {
        assert_eq!(outline.get(Point2::new(p.0, p.1)), Color::white());
    }
    assert_eq!(outline.get(center), Color::black());

    let mut solid = Canvas::new(16, 16).unwrap();
    solid.solid_square(center, corner, Color::white());

    assert_eq!(lit(&solid, Color::white()).len(), 49);
}

#[test]
fn connect_closes_polygon() {
    let points = [
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        Point2::new(4.0, 4.0),
    ];

    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.connect(&points, Color::white());

    // The closing edge runs along the diagonal.
    assert_eq!(canvas.get(Point2::new(2.0, 2.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(4.0, 2.0)), Color::white());

    let mut empty = Canvas::new(4, 4).unwrap();
    empty.connect(&[], Color::white());
    assert_eq!(lit(&empty, Color::white()).len(), 0);
}

#[test]
fn frame_joins_every_pair() {
    let points = [
        Point2::new(-4.0, -4.0),
        Point2::new(4.0, -4.0),
        Point2::new(4.0, 4.0),
        Point2::new(-4.0, 4.0),
    ];

    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.frame(&points, Color::white());

    // Both diagonals cross the middle.
    assert_eq!(canvas.get(Point2::zero()), Color::white());
    assert_eq!(canvas.get(Point2::new(2.0, -2.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(-2.0, -2.0)), Color::white());
}

#[test]
fn quad_draws_two_triangles() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.quad(
        Point2::new(0.0, 0.0),
        Point2::new(4.0, 0.0),
        Point2::new(0.0, 4.0),
        Point2::new(0.0, -4.0),
        Color::white(),
    );

    assert_eq!(canvas.get(Point2::new(0.0, 3.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(0.0, -3.0)), Color::white());
}

#[test]
fn set_points_and_load_pixels() {
    let mut canvas = Canvas::new(2, 2).unwrap();
    canvas.set_points(&[Point2::new(-1.0, -1.0), Point2::new(0.0, 0.0)], Color::red());

    assert_eq!(canvas.read_pixel(0, 0), Some(Color::red()));
    assert_eq!(canvas.read_pixel(1, 1), Some(Color::red()));

    canvas.load_pixels(&[Color::blue(); 3]);
    assert_eq!(canvas.pixels(), &[Color::blue(), Color::blue(), Color::blue(), Color::red()]);
}
