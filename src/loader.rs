use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use log::{ debug, warn };

use crate::geometry::{ Segment3, Triangle3 };
use crate::object::{ LineObject, TriangleObject, BezierObject, Patch };
use crate::tuple::Point3;

/// Reads whitespace separated numbers, one at a time.
struct Numbers<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Numbers<'a> {
    fn new(text: &'a str) -> Numbers<'a> {
        Numbers { tokens: text.split_whitespace() }
    }

    fn float(&mut self) -> Option<f64> {
        self.tokens.next()?.parse().ok()
    }

    fn count(&mut self) -> Option<usize> {
        self.tokens.next()?.parse().ok()
    }

    fn point(&mut self) -> Option<Point3> {
        Some(Point3::new(self.float()?, self.float()?, self.float()?))
    }
}

/// Reads a geometry file, treating a missing or unreadable file as empty.
fn read_or_empty(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            warn!("could not read {:?} ({}), using an empty object", path, e);
            String::new()
        }
    }
}

/// Parses line segments: six numbers per segment,
/// `x1 y1 z1 x2 y2 z2`.
///
/// Reading stops at the first malformed or incomplete record; everything
/// before it is kept.
///
/// ```
/// # use bezier_canvas::loader::parse_lines;
/// let lines = parse_lines("0 0 0 1 1 1\n2 2 2 3 3 3");
/// assert_eq!(lines.lines.len(), 2);
/// ```
pub fn parse_lines(text: &str) -> LineObject {
    let mut numbers = Numbers::new(text);
    let mut object = LineObject::new();

    loop {
        match (numbers.point(), numbers.point()) {
            (Some(p1), Some(p2)) => object.add_segment(Segment3::new(p1, p2)),
            _ => break,
        }
    }

    if object.lines.len() * 6 != text.split_whitespace().count() {
        warn!("line list ends with a malformed record after {} lines",
            object.lines.len());
    }

    object
}

/// Parses triangles: nine numbers per triangle.
///
/// Reading stops at the first malformed or incomplete record; everything
/// before it is kept.
pub fn parse_triangles(text: &str) -> TriangleObject {
    let mut numbers = Numbers::new(text);
    let mut object = TriangleObject::new();

    loop {
        match (numbers.point(), numbers.point(), numbers.point()) {
            (Some(p1), Some(p2), Some(p3)) => {
                object.add(Triangle3::new(p1, p2, p3))
            },
            _ => break,
        }
    }

    if object.triangles.len() * 9 != text.split_whitespace().count() {
        warn!("triangle list ends with a malformed record after {} triangles",
            object.triangles.len());
    }

    object
}

/// Parses a patch list.
///
/// A sample file with a single bilinear patch looks like this:
///
/// ```text
/// 1
/// 1 1
/// 0 0 0   1 0 0
/// 0 1 0   1 1 0
/// ```
///
/// The first number is the patch count. Each patch starts with its width
/// and height `w h`, followed by `h + 1` rows of `w + 1` points. Patches
/// whose grid isn't square are skipped. A truncated or malformed patch ends
/// the read; the patches before it are kept.
pub fn parse_bezier(text: &str) -> BezierObject {
    let mut numbers = Numbers::new(text);
    let mut object = BezierObject::new();

    let count = match numbers.count() {
        Some(count) => count,
        None => {
            if !text.trim().is_empty() {
                warn!("patch list doesn't start with a patch count");
            }
            return object;
        }
    };

    for n in 0..count {
        match read_patch(&mut numbers) {
            Some(patch) if is_square(&patch) => object.add_patch(patch),
            Some(_) => warn!("skipping patch {}: control grid isn't square", n),
            None => {
                warn!("patch list is truncated at patch {} of {}", n, count);
                break;
            }
        }
    }

    debug!("parsed {} of {} patches", object.patches.len(), count);
    object
}

fn read_patch(numbers: &mut Numbers) -> Option<Patch> {
    let width = numbers.count()?;
    let height = numbers.count()?;

    let mut grid = Vec::new();
    for _ in 0..=height {
        let mut row = Vec::new();
        for _ in 0..=width {
            row.push(numbers.point()?);
        }
        grid.push(row);
    }

    Some(Patch::new(grid))
}

fn is_square(patch: &Patch) -> bool {
    let n = patch.grid.len();
    patch.grid.iter().all(|row| row.len() == n)
}

/// Loads a line object from a file. A missing file gives an empty object.
pub fn load_lines<P: AsRef<Path>>(path: P) -> LineObject {
    parse_lines(&read_or_empty(path.as_ref()))
}

/// Loads a triangle object from a file. A missing file gives an empty
/// object.
pub fn load_triangles<P: AsRef<Path>>(path: P) -> TriangleObject {
    parse_triangles(&read_or_empty(path.as_ref()))
}

/// Loads a Bezier object from a patch file. A missing file gives an empty
/// object.
pub fn load_bezier<P: AsRef<Path>>(path: P) -> BezierObject {
    parse_bezier(&read_or_empty(path.as_ref()))
}

/* Tests */

#[test]
fn line_records() {
    let lines = load_lines("./models/axes.lines");

    assert_eq!(lines.lines.len(), 3);
    assert_eq!(lines.lines[0].p1, Point3::zero());
    assert_eq!(lines.lines[0].p2, Point3::new(100.0, 0.0, 0.0));
    assert_eq!(lines.lines[2].p2, Point3::new(0.0, 0.0, 100.0));
}

#[test]
fn triangle_records() {
    let mesh = load_triangles("./models/tetrahedron.tri");

    assert_eq!(mesh.triangles.len(), 4);
    assert_eq!(mesh.triangles[3].p1, Point3::new(0.0, 0.0, 0.0));
    assert_eq!(mesh.triangles[3].p3, Point3::new(0.0, 50.0, 0.0));
}

#[test]
fn patch_records() {
    let bez = load_bezier("./models/wave.bpt");

    assert_eq!(bez.patches.len(), 2);
    assert!(bez.patches.iter().all(|p| p.is_bicubic()));
    assert_eq!(bez.patches[0].grid[0][0], Point3::new(-1.5, -1.5, 0.0));
    assert_eq!(bez.patches[1].grid[3][3], Point3::new(3.0, 1.5, 0.0));
}

#[test]
fn missing_files_are_empty() {
    assert!(load_lines("./models/does-not-exist").lines.is_empty());
    assert!(load_triangles("./models/does-not-exist").triangles.is_empty());
    assert!(load_bezier("./models/does-not-exist").patches.is_empty());
}

#[test]
fn truncated_patch_list_keeps_complete_patches() {
    let bez = load_bezier("./models/truncated.bpt");

    assert_eq!(bez.patches.len(), 1);
    assert!(bez.patches[0].is_bicubic());
}

#[test]
fn partial_records_are_dropped() {
    let lines = parse_lines("0 0 0 1 1 1\n2 2 2 3 3");
    assert_eq!(lines.lines.len(), 1);

    let mesh = parse_triangles("0 0 0 1 0 0 0 1 0 oops 1 1 1 1 1 1 1 1");
    assert_eq!(mesh.triangles.len(), 1);

    assert!(parse_lines("").lines.is_empty());
    assert!(parse_bezier("not a number").patches.is_empty());
}

#[test]
fn bilinear_patch_from_text() {
    let bez = parse_bezier("1\n1 1\n0 0 0 1 0 0\n0 1 0 1 1 0\n");

    assert_eq!(bez.patches.len(), 1);
    assert_eq!(bez.patches[0].grid.len(), 2);
    assert_eq!(bez.patches[0].grid[1][0], Point3::new(0.0, 1.0, 0.0));
    assert!(!bez.patches[0].is_bicubic());
}

#[test]
fn rectangular_patches_are_skipped() {
    let bez = parse_bezier("2\n1 0\n0 0 0 1 0 0\n1 1\n0 0 0 1 0 0\n0 1 0 1 1 0\n");

    assert_eq!(bez.patches.len(), 1);
    assert_eq!(bez.patches[0].grid.len(), 2);
}
