use std::fs::{ self, File };
use std::io::{ BufWriter, Write };
use std::path::Path;

use log::{ debug, warn };

use crate::canvas::Canvas;
use crate::color::Color;
use crate::consts::{ BMP_HEADER_SIZE, BMP_INFO_SIZE, BMP_BITS_PER_PIXEL };
use crate::error::BitmapError;

/// The 54-byte header of an uncompressed bitmap file.
///
/// This is the 14-byte file header followed by the 40-byte info header.
/// A positive `height` means rows are stored bottom-up, a negative one
/// top-down.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BitmapHeader {
    pub file_size: u32,
    pub data_offset: u32,
    pub info_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub data_size: u32,
}

/// Bytes per stored row: three per pixel, padded to a multiple of four.
fn row_size(width: usize) -> usize {
    (width * 3 + 3) & !3
}

impl BitmapHeader {
    /// The header for a 24-bit image of the given size.
    pub fn new(width: usize, height: usize) -> BitmapHeader {
        let data_size = (row_size(width) * height) as u32;

        BitmapHeader {
            file_size: BMP_HEADER_SIZE as u32 + data_size,
            data_offset: BMP_HEADER_SIZE as u32,
            info_size: BMP_INFO_SIZE,
            width: width as i32,
            height: height as i32,
            planes: 1,
            bits_per_pixel: BMP_BITS_PER_PIXEL,
            compression: 0,
            data_size,
        }
    }

    pub fn to_bytes(&self) -> [u8; BMP_HEADER_SIZE] {
        let mut out = [0u8; BMP_HEADER_SIZE];
        out[0] = b'B';
        out[1] = b'M';
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        // bytes 6..10 are reserved
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out[14..18].copy_from_slice(&self.info_size.to_le_bytes());
        out[18..22].copy_from_slice(&self.width.to_le_bytes());
        out[22..26].copy_from_slice(&self.height.to_le_bytes());
        out[26..28].copy_from_slice(&self.planes.to_le_bytes());
        out[28..30].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[30..34].copy_from_slice(&self.compression.to_le_bytes());
        out[34..38].copy_from_slice(&self.data_size.to_le_bytes());
        // resolution and palette fields stay zero

        out
    }

    pub fn parse(bytes: &[u8]) -> Result<BitmapHeader, BitmapError> {
        if bytes.len() < BMP_HEADER_SIZE {
            return Err(BitmapError::Truncated);
        }
        if &bytes[0..2] != b"BM" {
            return Err(BitmapError::Signature);
        }

        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        let u32_at = |i: usize| u32::from_le_bytes(
            [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        let i32_at = |i: usize| i32::from_le_bytes(
            [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);

        Ok(BitmapHeader {
            file_size: u32_at(2),
            data_offset: u32_at(10),
            info_size: u32_at(14),
            width: i32_at(18),
            height: i32_at(22),
            planes: u16_at(26),
            bits_per_pixel: u16_at(28),
            compression: u32_at(30),
            data_size: u32_at(34),
        })
    }
}

/// Encodes a canvas as a 24-bit bitmap.
///
/// Buffer row 0 is stored first, which bitmaps read as the bottom row; so
/// logical +y points up in the picture.
pub fn encode(canvas: &Canvas) -> Vec<u8> {
    let (width, height) = (canvas.width(), canvas.height());
    let header = BitmapHeader::new(width, height);
    let padding = row_size(width) - width * 3;

    let mut out = Vec::with_capacity(header.file_size as usize);
    out.extend_from_slice(&header.to_bytes());

    for row in canvas.pixels().chunks(width.max(1)) {
        for c in row {
            out.extend_from_slice(&[c.b, c.g, c.r]);
        }
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    out
}

/// Decodes a 24-bit uncompressed bitmap into a canvas.
///
/// Both bottom-up and top-down files are accepted. Images with more than
/// `MAX_PIXELS` pixels are rejected.
pub fn decode(bytes: &[u8]) -> Result<Canvas, BitmapError> {
    let header = BitmapHeader::parse(bytes)?;

    if header.bits_per_pixel != BMP_BITS_PER_PIXEL || header.compression != 0 {
        return Err(BitmapError::Unsupported {
            bits: header.bits_per_pixel,
            compression: header.compression,
        });
    }
    if header.width <= 0 || header.height == 0 || header.height == i32::MIN {
        return Err(BitmapError::Dimensions {
            width: header.width,
            height: header.height,
        });
    }

    let width = header.width as usize;
    let height = header.height.abs() as usize;
    let bottom_up = header.height > 0;
    let mut canvas = Canvas::new(width, height)?;

    let stride = row_size(width);
    let start = header.data_offset as usize;
    let data = bytes.get(start..).ok_or(BitmapError::Truncated)?;
    if data.len() < stride * height {
        return Err(BitmapError::Truncated);
    }

    for (r, row) in data.chunks(stride).take(height).enumerate() {
        let y = if bottom_up { r } else { height - 1 - r };
        for (x, bgr) in row.chunks(3).take(width).enumerate() {
            canvas.write_pixel(x, y, Color::rgb(bgr[2], bgr[1], bgr[0]));
        }
    }

    Ok(canvas)
}

/// Writes a canvas to a bitmap file.
pub fn save<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<(), BitmapError> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(&encode(canvas))?;
    out.flush()?;

    debug!("saved {}x{} bitmap to {:?}", canvas.width(), canvas.height(), path);
    Ok(())
}

/// Reads a canvas from a bitmap file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Canvas, BitmapError> {
    decode(&fs::read(path)?)
}

/// Draws into a fresh canvas bound to `path`, then saves it.
///
/// The canvas is saved whether `draw` succeeds or fails. If `draw` fails its
/// error is returned (a failed save is only logged then); otherwise a failed
/// save is the error.
///
/// ```no_run
/// # use bezier_canvas::bitmap::render_to;
/// # use bezier_canvas::color::Color;
/// # use bezier_canvas::error::BitmapError;
/// # use bezier_canvas::tuple::Point2;
/// render_to("out.bmp", 64, 64, |canvas| {
///     canvas.circle(Point2::zero(), 20.0, Color::white());
///     Ok::<(), BitmapError>(())
/// }).unwrap();
/// ```
pub fn render_to<P, T, E, F>(path: P, width: usize, height: usize, draw: F)
    -> Result<T, E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut Canvas) -> Result<T, E>,
    E: From<BitmapError>,
{
    let mut canvas = Canvas::new(width, height).map_err(BitmapError::from)?;

    let outcome = draw(&mut canvas);
    let saved = save(&canvas, path.as_ref());

    match (outcome, saved) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), saved) => {
            if let Err(save_error) = saved {
                warn!("could not save {:?} after a failed render: {}",
                    path.as_ref(), save_error);
            }
            Err(e)
        }
    }
}

/// A path in the system temp directory unique to this test and process.
#[cfg(test)]
fn scratch(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("bezier-canvas-{}-{}.bmp", name, std::process::id()))
}

/* Tests */

#[test]
fn header_layout() {
    let bytes = BitmapHeader::new(2, 3).to_bytes();

    assert_eq!(&bytes[0..2], b"BM");
    assert_eq!(u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]), 54 + 24);
    assert_eq!(bytes[10], 54);
    assert_eq!(bytes[14], 40);
    assert_eq!(bytes[18], 2);
    assert_eq!(bytes[22], 3);
    assert_eq!(bytes[26], 1);
    assert_eq!(bytes[28], 24);
    assert_eq!(BitmapHeader::parse(&bytes).unwrap(), BitmapHeader::new(2, 3));
}

#[test]
fn rows_are_padded_and_bgr() {
    let mut canvas = Canvas::new(1, 2).unwrap();
    canvas.write_pixel(0, 0, Color::rgb(1, 2, 3));
    canvas.write_pixel(0, 1, Color::rgb(4, 5, 6));

    let bytes = encode(&canvas);
    assert_eq!(bytes.len(), 54 + 8);
    assert_eq!(&bytes[54..], &[3, 2, 1, 0, 6, 5, 4, 0]);
}

#[test]
fn decode_restores_canvas() {
    let mut canvas = Canvas::new(5, 3).unwrap();
    canvas.write_pixel(0, 0, Color::red());
    canvas.write_pixel(4, 2, Color::rgb(9, 8, 7));
    canvas.write_pixel(2, 1, Color::blue());

    assert_eq!(decode(&encode(&canvas)).unwrap(), canvas);
}

#[test]
fn decode_top_down_rows() {
    let mut canvas = Canvas::new(1, 2).unwrap();
    canvas.write_pixel(0, 0, Color::red());
    canvas.write_pixel(0, 1, Color::green());

    let mut bytes = encode(&canvas);
    bytes[22..26].copy_from_slice(&(-2i32).to_le_bytes());

    let flipped = decode(&bytes).unwrap();
    assert_eq!(flipped.read_pixel(0, 0), Some(Color::green()));
    assert_eq!(flipped.read_pixel(0, 1), Some(Color::red()));
}

#[test]
fn decode_rejects_bad_input() {
    let canvas = Canvas::new(2, 2).unwrap();
    let good = encode(&canvas);

    assert!(matches!(decode(&good[..20]), Err(BitmapError::Truncated)));
    assert!(matches!(decode(&good[..60]), Err(BitmapError::Truncated)));

    let mut bad = good.clone();
    bad[0] = b'X';
    assert!(matches!(decode(&bad), Err(BitmapError::Signature)));

    let mut bad = good.clone();
    bad[28] = 32;
    assert!(matches!(decode(&bad), Err(BitmapError::Unsupported { bits: 32, .. })));

    let mut bad = good.clone();
    bad[18..22].copy_from_slice(&0i32.to_le_bytes());
    assert!(matches!(decode(&bad), Err(BitmapError::Dimensions { .. })));
}

#[test]
fn decode_rejects_oversized_images() {
    let header = BitmapHeader::new(2000, 2000).to_bytes();

    assert!(matches!(decode(&header), Err(BitmapError::Canvas(_))));
}

#[test]
fn save_and_load_file() {
    let path = scratch("save-load");
    let mut canvas = Canvas::new(3, 3).unwrap();
    canvas.write_pixel(1, 1, Color::rgb(10, 20, 30));

    save(&canvas, &path).unwrap();
    let loaded = load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, canvas);
}

#[test]
fn render_to_saves_on_failure() {
    let path = scratch("render-failure");

    let result: Result<(), BitmapError> = render_to(&path, 4, 4, |canvas| {
        canvas.fill(Color::white());
        Err(BitmapError::Signature)
    });
    assert!(matches!(result, Err(BitmapError::Signature)));

    let loaded = load(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert!(loaded.pixels().iter().all(|&c| c == Color::white()));
}

#[test]
fn render_to_returns_value() {
    let path = scratch("render-value");

    let n = render_to(&path, 2, 2, |_| Ok::<_, BitmapError>(42)).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(n, 42);
}

#[test]
fn render_to_rejects_oversized_canvas() {
    let path = scratch("render-oversized");

    let result = render_to(&path, 5000, 5000, |_| Ok::<_, BitmapError>(()));
    assert!(matches!(result, Err(BitmapError::Canvas(_))));
    assert!(!path.exists());
}
