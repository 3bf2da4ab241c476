use std::convert::TryFrom;
use std::fs;
use std::path::{ Path, PathBuf };

use log::{ debug, warn };
use serde::{ Serialize, Deserialize };

use crate::camera::{ Camera, Shoot };
use crate::canvas::{ Canvas, Brush };
use crate::color::Color;
use crate::consts::{ DEFAULT_WIDTH, DEFAULT_HEIGHT };
use crate::error::SceneError;
use crate::loader;
use crate::object::{ Object3D, LineObject, TriangleObject, BezierObject, Patch };
use crate::processor::Processor;
use crate::tuple::{ Point2, Point3 };

/// A loaded object, ready to shoot.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneObject {
    Lines(LineObject),
    Triangles(TriangleObject),
    Bezier(BezierObject),
}

impl Shoot for SceneObject {
    fn shoot(&self, camera: &Camera, canvas: &mut Canvas, brush: &Brush) {
        match self {
            SceneObject::Lines(o) => o.shoot(camera, canvas, brush),
            SceneObject::Triangles(o) => o.shoot(camera, canvas, brush),
            SceneObject::Bezier(o) => o.shoot(camera, canvas, brush),
        }
    }
}

/// Blur applied once every object has been shot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Blur {
    pub radius: u32,
    /// Opposite corners in logical coordinates; `None` blurs the whole
    /// canvas.
    pub region: Option<(Point2, Point2)>,
}

pub struct Scene {
    pub width: usize,
    pub height: usize,
    /// Logical origin in buffer coordinates; `None` centers it.
    pub origin: Option<Point2>,
    pub background: Color,
    pub camera: Camera,
    pub objects: Vec<(SceneObject, Brush)>,
    pub blur: Option<Blur>,
}

impl Scene {
    /// Builds a scene from a JSON description.
    ///
    /// Geometry paths are used as written, relative to the working
    /// directory.
    pub fn from_json(text: &str) -> Result<Scene, SceneError> {
        let scene_json: SceneJson = serde_json::from_str(text)?;
        Scene::try_from(scene_json)
    }

    /// Reads a scene file. Relative geometry paths in it are taken relative
    /// to the scene file's own directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene, SceneError> {
        let path = path.as_ref();
        let mut scene_json: SceneJson = serde_json::from_str(&fs::read_to_string(path)?)?;

        if let Some(dir) = path.parent() {
            scene_json.rebase(dir);
        }

        Scene::try_from(scene_json)
    }

    /// Draws the scene onto `canvas`: background, objects in order, then the
    /// blur if there is one.
    pub fn render(&self, canvas: &mut Canvas) -> Result<(), SceneError> {
        canvas.fill(self.background);
        match self.origin {
            Some(origin) => canvas.set_origin(origin),
            None => canvas.set_origin_center(),
        }

        for (object, brush) in self.objects.iter() {
            object.shoot(&self.camera, canvas, brush);
        }
        debug!("shot {} objects", self.objects.len());

        if let Some(blur) = self.blur {
            let mut processor = Processor::new(canvas);
            match blur.region {
                Some((p1, p2)) => processor.blur_region(p1, p2, blur.radius)?,
                None => processor.blur(blur.radius)?,
            }
        }

        Ok(())
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = SceneError;

    fn try_from(scene_json: SceneJson) -> Result<Scene, SceneError> {
        let background = parse_color(&scene_json.background)?;

        let objects = scene_json.objects.iter()
            .map(|o| Ok((o.build(), Brush { color: parse_color(&o.color)?, solid: o.solid })))
            .collect::<Result<Vec<_>, SceneError>>()?;

        let blur = scene_json.blur.map(|b| {
            let region = match (b.from, b.to) {
                (Some(from), Some(to)) => Some((from.into(), to.into())),
                (None, None) => None,
                _ => {
                    warn!("blur needs both `from` and `to`; blurring the whole canvas");
                    None
                },
            };
            Blur { radius: b.radius, region }
        });

        Ok(Scene {
            width: scene_json.width,
            height: scene_json.height,
            origin: scene_json.origin.map(Point2::from),
            background,
            camera: scene_json.camera,
            objects,
            blur,
        })
    }
}

fn parse_color(name: &str) -> Result<Color, SceneError> {
    Color::from_name(name).ok_or_else(|| SceneError::UnknownColor(name.to_string()))
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_height() -> usize {
    DEFAULT_HEIGHT
}

fn default_background() -> String {
    "black".to_string()
}

fn default_color() -> String {
    "white".to_string()
}

/// The scene file as written.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneJson {
    #[serde(default = "default_width")]
    width: usize,
    #[serde(default = "default_height")]
    height: usize,
    #[serde(default)]
    origin: Option<[f64; 2]>,
    #[serde(default = "default_background")]
    background: String,
    #[serde(default)]
    camera: Camera,
    #[serde(default)]
    objects: Vec<ObjectJson>,
    #[serde(default)]
    blur: Option<BlurJson>,
}

impl SceneJson {
    fn rebase(&mut self, dir: &Path) {
        for object in self.objects.iter_mut() {
            if let Some(path) = object.path.as_mut() {
                if path.is_relative() {
                    *path = dir.join(&*path);
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Lines,
    Triangles,
    Bezier,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Axis {
    X,
    Y,
    Z,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
struct RotateJson {
    axis: Axis,
    degrees: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ObjectJson {
    kind: Kind,
    #[serde(default)]
    path: Option<PathBuf>,
    /// Inline geometry: pairs of points for lines, triples for triangles,
    /// and 16 row-major control points per bicubic patch.
    #[serde(default)]
    points: Vec<[f64; 3]>,
    #[serde(default)]
    scale: Option<f64>,
    #[serde(default)]
    translate: [f64; 3],
    #[serde(default)]
    rotate: Vec<RotateJson>,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default)]
    solid: bool,
    #[serde(default)]
    split: i32,
}

impl ObjectJson {
    fn build(&self) -> SceneObject {
        let points: Vec<Point3> = self.points.iter().map(|&p| p.into()).collect();

        let mut object = match self.kind {
            Kind::Lines => {
                let mut lines = self.path.as_ref()
                    .map(loader::load_lines)
                    .unwrap_or_default();
                for pair in whole_chunks(&points, 2, "lines") {
                    lines.add_line(pair[0], pair[1]);
                }
                SceneObject::Lines(lines)
            },
            Kind::Triangles => {
                let mut mesh = self.path.as_ref()
                    .map(loader::load_triangles)
                    .unwrap_or_default();
                for t in whole_chunks(&points, 3, "triangles") {
                    mesh.add_triangle(t[0], t[1], t[2]);
                }
                SceneObject::Triangles(mesh)
            },
            Kind::Bezier => {
                let mut bez = self.path.as_ref()
                    .map(loader::load_bezier)
                    .unwrap_or_default();
                for grid in whole_chunks(&points, 16, "bezier") {
                    bez.add_patch(Patch::new(grid.chunks(4).map(|row| row.to_vec()).collect()));
                }
                SceneObject::Bezier(bez)
            },
        };

        match &mut object {
            SceneObject::Lines(o) => {
                o.scale = self.scale.unwrap_or(o.scale);
                self.arrange(o);
            },
            SceneObject::Triangles(o) => {
                o.scale = self.scale.unwrap_or(o.scale);
                self.arrange(o);
            },
            SceneObject::Bezier(o) => {
                o.scale = self.scale.unwrap_or(o.scale);
                self.arrange(o);
                if self.split != 0 {
                    o.split_times(self.split);
                }
            },
        }

        object
    }

    fn arrange<O: Object3D>(&self, object: &mut O) {
        for r in self.rotate.iter() {
            match r.axis {
                Axis::X => object.rotate_x(r.degrees),
                Axis::Y => object.rotate_y(r.degrees),
                Axis::Z => object.rotate_z(r.degrees),
            }
        }
        object.translate(self.translate.into());
    }
}

/// Splits inline points into groups of `n`, dropping an incomplete tail.
fn whole_chunks<'a>(points: &'a [Point3], n: usize, kind: &str)
    -> std::slice::ChunksExact<'a, Point3> {
    if points.len() % n != 0 {
        warn!("dropping {} trailing inline points of a {} object",
            points.len() % n, kind);
    }
    points.chunks_exact(n)
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
struct BlurJson {
    radius: u32,
    #[serde(default)]
    from: Option<[f64; 2]>,
    #[serde(default)]
    to: Option<[f64; 2]>,
}

/* Tests */

#[test]
fn defaults_fill_missing_fields() {
    let scene = Scene::from_json("{}").unwrap();

    assert_eq!((scene.width, scene.height), (640, 480));
    assert_eq!(scene.origin, None);
    assert_eq!(scene.background, Color::black());
    assert_eq!(scene.camera, Camera::default());
    assert!(scene.objects.is_empty());
    assert!(scene.blur.is_none());
}

#[test]
fn unknown_color_is_an_error() {
    let result = Scene::from_json(r#"{ "background": "mauve-ish" }"#);
    assert!(matches!(result, Err(SceneError::UnknownColor(name)) if name == "mauve-ish"));

    let result = Scene::from_json(r#"{ "objects": [ { "kind": "lines", "color": "nope" } ] }"#);
    assert!(matches!(result, Err(SceneError::UnknownColor(_))));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(matches!(Scene::from_json("{ width: 3"), Err(SceneError::Json(_))));
    assert!(matches!(
        Scene::from_json(r#"{ "objects": [ { "kind": "spheres" } ] }"#),
        Err(SceneError::Json(_))
    ));
}

#[test]
fn objects_take_inline_points_and_placement() {
    let scene = Scene::from_json(r#"{
        "objects": [
            {
                "kind": "lines",
                "points": [[1, 0, 0], [2, 0, 0], [9, 9, 9]],
                "rotate": [{ "axis": "z", "degrees": 90 }],
                "translate": [0, 0, 5],
                "color": "red"
            },
            { "kind": "triangles", "points": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "solid": true }
        ]
    }"#).unwrap();

    assert_eq!(scene.objects.len(), 2);

    match &scene.objects[0] {
        (SceneObject::Lines(lines), brush) => {
            assert_eq!(lines.lines.len(), 1);
            assert_eq!(lines.lines[0].p2, Point3::new(0.0, 2.0, 0.0));
            assert_eq!(lines.middle, Point3::new(0.0, 0.0, 5.0));
            assert_eq!(*brush, Brush::new(Color::red()));
        },
        other => panic!("expected lines, got {:?}", other),
    }

    match &scene.objects[1] {
        (SceneObject::Triangles(mesh), brush) => {
            assert_eq!(mesh.triangles.len(), 1);
            assert_eq!(*brush, Brush::solid(Color::white()));
        },
        other => panic!("expected triangles, got {:?}", other),
    }
}

#[test]
fn rotations_apply_in_order() {
    let scene = Scene::from_json(r#"{
        "objects": [ {
            "kind": "lines",
            "points": [[0, 0, 0], [1, 0, 0]],
            "rotate": [{ "axis": "z", "degrees": 90 }, { "axis": "x", "degrees": 90 }]
        } ]
    }"#).unwrap();

    match &scene.objects[0].0 {
        SceneObject::Lines(lines) => assert_eq!(lines.lines[0].p2, Point3::new(0.0, 0.0, 1.0)),
        other => panic!("expected lines, got {:?}", other),
    }
}

#[test]
fn bezier_objects_split() {
    let scene = Scene::from_json(r#"{
        "objects": [ { "kind": "bezier", "path": "./models/wave.bpt", "split": 2 } ]
    }"#).unwrap();

    match &scene.objects[0].0 {
        SceneObject::Bezier(bez) => assert_eq!(bez.patches.len(), 2 * 16),
        other => panic!("expected bezier, got {:?}", other),
    }
}

#[test]
fn blur_region_needs_both_corners() {
    let scene = Scene::from_json(r#"{ "blur": { "radius": 2, "from": [-4, -4], "to": [4, 4] } }"#)
        .unwrap();
    let blur = scene.blur.unwrap();
    assert_eq!(blur.radius, 2);
    assert_eq!(blur.region, Some((Point2::new(-4.0, -4.0), Point2::new(4.0, 4.0))));

    let scene = Scene::from_json(r#"{ "blur": { "radius": 1, "from": [0, 0] } }"#).unwrap();
    assert_eq!(scene.blur.unwrap().region, None);
}

#[test]
fn render_draws_background_and_objects() {
    let scene = Scene::from_json(r#"{
        "width": 16,
        "height": 16,
        "background": "blue",
        "camera": { "focus": 1e12, "height": 0 },
        "objects": [ {
            "kind": "triangles",
            "points": [[-0.6, -0.6, 0], [0.6, -0.6, 0], [-0.6, 0.6, 0]],
            "scale": 5,
            "solid": true,
            "color": "red"
        } ]
    }"#).unwrap();

    let mut canvas = Canvas::new(scene.width, scene.height).unwrap();
    scene.render(&mut canvas).unwrap();

    assert_eq!(canvas.origin(), Point2::new(8.0, 8.0));
    assert_eq!(canvas.get(Point2::new(-1.0, -1.0)), Color::red());
    assert_eq!(canvas.get(Point2::new(7.0, 7.0)), Color::blue());
}

#[test]
fn render_applies_blur() {
    let scene = Scene::from_json(r#"{
        "width": 5,
        "height": 5,
        "origin": [2, 2],
        "camera": { "focus": 1e12, "height": 0 },
        "objects": [ { "kind": "lines", "points": [[0, 0, 0], [0, 0, 0]] } ],
        "blur": { "radius": 1 }
    }"#).unwrap();

    let mut canvas = Canvas::new(5, 5).unwrap();
    scene.render(&mut canvas).unwrap();

    // One white pixel spread over its five-pixel disc.
    assert_eq!(canvas.read_pixel(2, 2), Some(Color::rgb(51, 51, 51)));
    assert_eq!(canvas.read_pixel(3, 2), Some(Color::rgb(51, 51, 51)));
    assert_eq!(canvas.read_pixel(0, 0), Some(Color::black()));

    let mut sharp = Scene::from_json(r#"{ "width": 5, "height": 5 }"#).unwrap();
    sharp.blur = None;
    sharp.render(&mut canvas).unwrap();
    assert!(canvas.pixels().iter().all(|&c| c == Color::black()));
}

#[test]
fn load_resolves_paths_next_to_scene() {
    let scene = Scene::load("./scenes/demo.json").unwrap();

    assert!(!scene.objects.is_empty());
    assert!(scene.objects.iter().all(|(object, _)| match object {
        SceneObject::Lines(o) => !o.lines.is_empty(),
        SceneObject::Triangles(o) => !o.triangles.is_empty(),
        SceneObject::Bezier(o) => !o.patches.is_empty(),
    }));
}
