pub mod consts;

pub mod tuple;
pub mod geometry;

pub mod color;
pub mod canvas;
pub mod processor;

pub mod object;
pub mod loader;
pub mod camera;

pub mod bitmap;
pub mod scene;

pub mod error;

use consts::FEQ_EPSILON;

pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
