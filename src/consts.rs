// Canvas limits
pub const MAX_PIXELS: usize = 2_073_600;
pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Slack for the area-sum membership test of solid triangles
pub const FILL_EPSILON: f64 = 1e-9;

// Camera defaults
pub const DEFAULT_FOCUS: f64 = 10000.0;
pub const DEFAULT_CAMERA_HEIGHT: f64 = 1000.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

// Object defaults
pub const LINE_DEFAULT_SCALE: f64 = 1.0;
pub const TRIANGLE_DEFAULT_SCALE: f64 = 1.0;
pub const BEZIER_DEFAULT_SCALE: f64 = 100.0;

// Bezier subdivision depth accepted by `BezierObject::split_times`
pub const MIN_SPLIT_DEPTH: i32 = 1;
pub const MAX_SPLIT_DEPTH: i32 = 6;

// Circles are drawn as a polyline of half-degree steps
pub const CIRCLE_SEGMENTS: usize = 720;

// Bitmap layout
pub const BMP_HEADER_SIZE: usize = 54;
pub const BMP_INFO_SIZE: u32 = 40;
pub const BMP_BITS_PER_PIXEL: u16 = 24;
