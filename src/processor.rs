use log::debug;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::consts::MAX_PIXELS;
use crate::error::CanvasError;
use crate::tuple::Point2;

/// A rectangle of logical canvas coordinates.
///
/// Columns `left..right` and rows `down..up`; the upper bounds are
/// exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    pub left: i64,
    pub right: i64,
    pub down: i64,
    pub up: i64,
}

impl Region {
    /// Builds a region from any two opposite corners.
    ///
    /// ```
    /// # use bezier_canvas::processor::Region;
    /// # use bezier_canvas::tuple::Point2;
    /// let r = Region::from_corners(Point2::new(5.0, -1.0), Point2::new(-3.0, 7.0));
    /// assert_eq!(r, Region { left: -3, right: 5, down: -1, up: 7 });
    /// ```
    pub fn from_corners(p1: Point2, p2: Point2) -> Region {
        let (left, right) = if p1.x >= p2.x { (p2.x, p1.x) } else { (p1.x, p2.x) };
        let (down, up) = if p1.y >= p2.y { (p2.y, p1.y) } else { (p1.y, p2.y) };

        Region {
            left: left as i64,
            right: right as i64,
            down: down as i64,
            up: up as i64,
        }
    }

    /// The region covering a whole canvas.
    pub fn of(canvas: &Canvas) -> Region {
        let o = canvas.origin();
        Region::from_corners(
            Point2::new(-o.x, -o.y),
            Point2::new(canvas.width() as f64 - o.x, canvas.height() as f64 - o.y),
        )
    }
}

/// Filters applied to a rectangular part of a canvas.
///
/// The processor borrows the canvas for as long as it lives and remembers
/// only the active region.
pub struct Processor<'a> {
    canvas: &'a mut Canvas,
    region: Region,
}

impl<'a> Processor<'a> {
    /// Creates a processor whose region is the whole canvas.
    pub fn new(canvas: &'a mut Canvas) -> Processor<'a> {
        let region = Region::of(canvas);
        Processor { canvas, region }
    }

    pub fn canvas(&self) -> &Canvas {
        self.canvas
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Resets the region to the whole canvas.
    pub fn rerange_all(&mut self) {
        self.region = Region::of(self.canvas);
    }

    /// Sets the region from two opposite corners.
    pub fn rerange(&mut self, p1: Point2, p2: Point2) {
        self.region = Region::from_corners(p1, p2);
    }

    /// Outlines the region's border pixels.
    pub fn draw_range(&mut self, color: Color) {
        let Region { left, right, down, up } = self.region;
        let l = left as f64;
        let r = right.saturating_sub(1) as f64;
        let d = down as f64;
        let u = up.saturating_sub(1) as f64;

        self.canvas.line(Point2::new(r, u), Point2::new(r, d), color);
        self.canvas.line(Point2::new(r, u), Point2::new(l, u), color);
        self.canvas.line(Point2::new(l, u), Point2::new(l, d), color);
        self.canvas.line(Point2::new(l, d), Point2::new(r, d), color);
    }

    /// Blurs the region with a disc kernel.
    ///
    /// Every region pixel that lies on the canvas becomes the mean of all
    /// canvas pixels within Euclidean distance `radius` of it. Means are
    /// taken over the unfiltered image, so the result does not depend on
    /// scan order.
    ///
    /// ```
    /// # use bezier_canvas::canvas::Canvas;
    /// # use bezier_canvas::color::Color;
    /// # use bezier_canvas::processor::Processor;
    /// # use bezier_canvas::tuple::Point2;
    /// let mut canvas = Canvas::new(5, 5).unwrap();
    /// canvas.set(Point2::new(0.0, 0.0), Color::rgb(250, 250, 250));
    ///
    /// Processor::new(&mut canvas).blur(1).unwrap();
    /// assert_eq!(canvas.get(Point2::new(0.0, 0.0)), Color::rgb(50, 50, 50));
    /// ```
    pub fn blur(&mut self, radius: u32) -> Result<(), CanvasError> {
        let width = self.canvas.width();
        let height = self.canvas.height();
        // Canvas::new and set_size already refuse such sizes.
        if width * height > MAX_PIXELS {
            return Err(CanvasError::TooLarge { width, height });
        }

        let r = radius as i64;
        let w = width as i64;
        let h = height as i64;
        let origin = self.canvas.origin();
        let ox = origin.x.floor() as i64;
        let oy = origin.y.floor() as i64;

        // Clip the region to the buffer, in buffer coordinates.
        let x0 = self.region.left.saturating_add(ox).max(0);
        let x1 = self.region.right.saturating_add(ox).min(w);
        let y0 = self.region.down.saturating_add(oy).max(0);
        let y1 = self.region.up.saturating_add(oy).min(h);

        debug!("blurring buffer columns {}..{}, rows {}..{} with radius {}",
            x0, x1, y0, y1, radius);

        let mut out = self.canvas.pixels().to_vec();
        for y in y0..y1 {
            for x in x0..x1 {
                let (mut red, mut green, mut blue, mut count) = (0u32, 0u32, 0u32, 0u32);

                for j in (y - r).max(0)..=(y + r).min(h - 1) {
                    for i in (x - r).max(0)..=(x + r).min(w - 1) {
                        let (dx, dy) = (i - x, j - y);
                        if dx * dx + dy * dy > r.saturating_mul(r) {
                            continue;
                        }

                        if let Some(c) = self.canvas.read_pixel(i as usize, j as usize) {
                            red += c.r as u32;
                            green += c.g as u32;
                            blue += c.b as u32;
                            count += 1;
                        }
                    }
                }

                // The pixel itself is always in its own kernel.
                out[(y * w + x) as usize] = Color::rgb(
                    (red / count) as u8,
                    (green / count) as u8,
                    (blue / count) as u8,
                );
            }
        }

        self.canvas.load_pixels(&out);
        Ok(())
    }

    /// Moves the region to the given corners, then blurs it.
    pub fn blur_region(&mut self, p1: Point2, p2: Point2, radius: u32)
        -> Result<(), CanvasError> {
        self.rerange(p1, p2);
        self.blur(radius)
    }
}

/* Tests */

#[test]
fn default_region_covers_canvas() {
    let mut canvas = Canvas::new(10, 6).unwrap();
    let processor = Processor::new(&mut canvas);

    assert_eq!(processor.region(), Region { left: -5, right: 5, down: -3, up: 3 });
}

#[test]
fn rerange_normalizes_corners() {
    let mut canvas = Canvas::new(10, 6).unwrap();
    let mut processor = Processor::new(&mut canvas);

    processor.rerange(Point2::new(2.0, -1.0), Point2::new(-4.0, 3.0));
    assert_eq!(processor.region(), Region { left: -4, right: 2, down: -1, up: 3 });

    processor.rerange_all();
    assert_eq!(processor.region(), Region::of(processor.canvas()));
}

#[test]
fn blur_spreads_a_single_pixel() {
    let mut canvas = Canvas::new(7, 7).unwrap();
    canvas.set(Point2::zero(), Color::rgb(100, 200, 255));

    Processor::new(&mut canvas).blur(1).unwrap();

    // Interior kernels of radius 1 hold five pixels.
    let spread = Color::rgb(20, 40, 51);
    assert_eq!(canvas.get(Point2::new(0.0, 0.0)), spread);
    assert_eq!(canvas.get(Point2::new(1.0, 0.0)), spread);
    assert_eq!(canvas.get(Point2::new(-1.0, 0.0)), spread);
    assert_eq!(canvas.get(Point2::new(0.0, 1.0)), spread);
    assert_eq!(canvas.get(Point2::new(0.0, -1.0)), spread);
    assert_eq!(canvas.get(Point2::new(1.0, 1.0)), Color::black());
    assert_eq!(canvas.get(Point2::new(2.0, 0.0)), Color::black());
}

#[test]
fn blur_kernel_shrinks_at_edges() {
    let mut canvas = Canvas::new(4, 4).unwrap();
    canvas.write_pixel(0, 0, Color::rgb(90, 90, 90));

    Processor::new(&mut canvas).blur(1).unwrap();

    // The corner kernel holds only three pixels.
    assert_eq!(canvas.read_pixel(0, 0), Some(Color::rgb(30, 30, 30)));
    assert_eq!(canvas.read_pixel(1, 0), Some(Color::rgb(22, 22, 22)));
}

#[test]
fn blur_keeps_uniform_color() {
    let mut canvas = Canvas::new(9, 9).unwrap();
    canvas.fill(Color::rgb(7, 77, 177));

    Processor::new(&mut canvas).blur(3).unwrap();

    assert!(canvas.pixels().iter().all(|&c| c == Color::rgb(7, 77, 177)));
}

#[test]
fn blur_stays_in_region() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.set(Point2::new(-1.0, 0.0), Color::white());
    canvas.set(Point2::new(1.0, 0.0), Color::white());

    let mut processor = Processor::new(&mut canvas);
    processor.blur_region(Point2::new(-4.0, -4.0), Point2::new(0.0, 4.0), 1).unwrap();

    // Left of the cut is blurred, right of it is untouched.
    assert_eq!(canvas.get(Point2::new(-1.0, 0.0)), Color::rgb(51, 51, 51));
    assert_eq!(canvas.get(Point2::new(1.0, 0.0)), Color::white());
    assert_eq!(canvas.get(Point2::new(2.0, 0.0)), Color::black());
}

#[test]
fn zero_radius_blur_is_identity() {
    let mut canvas = Canvas::new(5, 5).unwrap();
    canvas.set(Point2::new(1.0, 1.0), Color::red());
    let before = canvas.clone();

    Processor::new(&mut canvas).blur(0).unwrap();

    assert_eq!(canvas, before);
}

#[test]
fn draw_range_outlines_region() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    let mut processor = Processor::new(&mut canvas);
    processor.rerange(Point2::new(-2.0, -2.0), Point2::new(3.0, 3.0));
    processor.draw_range(Color::green());

    assert_eq!(canvas.get(Point2::new(-2.0, -2.0)), Color::green());
    assert_eq!(canvas.get(Point2::new(2.0, 2.0)), Color::green());
    assert_eq!(canvas.get(Point2::new(0.0, 2.0)), Color::green());
    assert_eq!(canvas.get(Point2::new(0.0, 0.0)), Color::black());
    assert_eq!(canvas.get(Point2::new(3.0, 3.0)), Color::black());
}

#[test]
fn huge_region_corners_blur_whole_canvas() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    canvas.set(Point2::zero(), Color::rgb(250, 250, 250));
    let mut whole = canvas.clone();

    let mut processor = Processor::new(&mut canvas);
    processor.blur_region(Point2::new(-1e20, -1e20), Point2::new(1e20, 1e20), 1).unwrap();
    processor.draw_range(Color::green());

    Processor::new(&mut whole).blur(1).unwrap();
    assert_eq!(canvas, whole);
}

#[test]
fn huge_radius_averages_everything() {
    let mut canvas = Canvas::new(4, 4).unwrap();
    canvas.write_pixel(0, 0, Color::rgb(160, 160, 160));

    Processor::new(&mut canvas).blur(u32::MAX).unwrap();

    assert!(canvas.pixels().iter().all(|&c| c == Color::rgb(10, 10, 10)));
}

#[test]
fn blur_passes_the_pixel_cap_check() {
    // The largest canvas allowed is still blurrable; one more pixel cannot
    // even be built.
    assert!(Canvas::new(MAX_PIXELS + 1, 1).is_err());

    let mut canvas = Canvas::new(MAX_PIXELS, 1).unwrap();
    assert!(Processor::new(&mut canvas).blur(0).is_ok());
}
