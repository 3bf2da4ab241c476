use std::ops::{ Add, Sub };

/// A color.
///
/// Represented with 8-bit red, green and blue channels, which is exactly
/// what ends up in a 24-bit bitmap.
///
/// # Examples
///
/// Construct the color red:
///
/// ```
/// # use bezier_canvas::color::Color;
/// let red = Color::red();
/// assert_eq!(red, Color::rgb(255, 0, 0));
/// ```
///
/// Channel arithmetic saturates instead of wrapping:
///
/// ```
/// # use bezier_canvas::color::Color;
/// let bright = Color::rgb(200, 200, 200) + Color::rgb(100, 100, 100);
/// assert_eq!(bright, Color::white());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// Creates a color from a `0xRRGGBB` value.
    ///
    /// Values above `0xFFFFFF` don't describe a color and give `None`.
    pub fn from_hex(hex: u32) -> Option<Color> {
        if hex > 0xFF_FFFF {
            return None;
        }

        Some(Color {
            r: (hex >> 16) as u8,
            g: (hex >> 8) as u8,
            b: hex as u8,
        })
    }

    /// Looks a color up by name.
    ///
    /// Recognized names: `black`, `white`, `gray`, `red`, `green`, `blue`,
    /// `light_red`, `light_green`, `light_blue`, `dark_red`, `dark_green`,
    /// `navy`, `silver`, `aqua`, `purple`, `violet`, `sky_blue`, `yellow`,
    /// `orange` and `olive`. Anything else gives `None`.
    ///
    /// ```
    /// # use bezier_canvas::color::Color;
    /// assert_eq!(Color::from_name("sky_blue"), Some(Color::rgb(135, 206, 235)));
    /// assert_eq!(Color::from_name("chartreuse"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Color> {
        let color = match name {
            "black" => Color::black(),
            "white" => Color::white(),
            "gray" => Color::rgb(127, 127, 127),
            "red" => Color::red(),
            "green" => Color::green(),
            "blue" => Color::blue(),
            "light_red" => Color::rgb(255, 127, 127),
            "light_green" => Color::rgb(127, 255, 127),
            "light_blue" => Color::rgb(127, 127, 255),
            "dark_red" => Color::rgb(127, 0, 0),
            "dark_green" => Color::rgb(0, 127, 0),
            "navy" => Color::rgb(0, 0, 127),
            "silver" => Color::rgb(192, 192, 192),
            "aqua" => Color::rgb(0, 255, 255),
            "purple" => Color::rgb(128, 0, 128),
            "violet" => Color::rgb(238, 130, 238),
            "sky_blue" => Color::rgb(135, 206, 235),
            "yellow" => Color::rgb(255, 255, 0),
            "orange" => Color::rgb(255, 80, 0),
            "olive" => Color::rgb(128, 128, 0),
            _ => return None,
        };

        Some(color)
    }

    /// The color black.
    pub const fn black() -> Color {
        Color { r: 0, g: 0, b: 0 }
    }

    /// The color white.
    pub const fn white() -> Color {
        Color { r: 255, g: 255, b: 255 }
    }

    /// The color red.
    pub const fn red() -> Color {
        Color { r: 255, g: 0, b: 0 }
    }

    /// The color green.
    pub const fn green() -> Color {
        Color { r: 0, g: 255, b: 0 }
    }

    /// The color blue.
    pub const fn blue() -> Color {
        Color { r: 0, g: 0, b: 255 }
    }

    /// Flattens the color to the gray of its channel mean.
    ///
    /// This is a plain arithmetic mean, not a luminance weighting.
    pub fn avg(&self) -> Color {
        let mean = ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8;
        Color { r: mean, g: mean, b: mean }
    }
}

/// Adds two colors, clamping each channel at 255.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }
}

/// Subtracts one color from another, clamping each channel at 0.
impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r.saturating_sub(other.r),
            g: self.g.saturating_sub(other.g),
            b: self.b.saturating_sub(other.b),
        }
    }
}

#[test]
fn add_colors_saturates() {
    let c1 = Color::rgb(200, 200, 200);
    let c2 = Color::rgb(100, 100, 100);

    assert_eq!(c1 + c2, Color::rgb(255, 255, 255));
    assert_eq!(Color::rgb(1, 2, 3) + Color::rgb(10, 20, 30), Color::rgb(11, 22, 33));
}

#[test]
fn subtract_colors_saturates() {
    let c1 = Color::rgb(10, 10, 10);
    let c2 = Color::rgb(50, 50, 50);

    assert_eq!(c1 - c2, Color::rgb(0, 0, 0));
    assert_eq!(Color::rgb(90, 60, 30) - Color::rgb(10, 60, 40), Color::rgb(80, 0, 0));
}

#[test]
fn average_channels() {
    assert_eq!(Color::rgb(30, 60, 90).avg(), Color::rgb(60, 60, 60));
    assert_eq!(Color::white().avg(), Color::white());
    assert_eq!(Color::rgb(1, 1, 0).avg(), Color::black());
}

#[test]
fn hex_colors() {
    assert_eq!(Color::from_hex(0x123456), Some(Color::rgb(0x12, 0x34, 0x56)));
    assert_eq!(Color::from_hex(0xFFFFFF), Some(Color::white()));
    assert_eq!(Color::from_hex(0x1000000), None);
}

#[test]
fn named_colors() {
    assert_eq!(Color::from_name("black"), Some(Color::black()));
    assert_eq!(Color::from_name("orange"), Some(Color::rgb(255, 80, 0)));
    assert_eq!(Color::from_name("navy"), Some(Color::rgb(0, 0, 127)));
    assert_eq!(Color::from_name("Red"), None);
}
