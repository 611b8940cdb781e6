/// Linear RGB colors used for point tinting
use nom::{
    bytes::complete::take_while_m_n,
    character::complete::char,
    combinator::{all_consuming, map_res, opt},
    sequence::{preceded, tuple},
    IResult,
};

use crate::error::{GalaxyError, Result};

/// An RGB triple with each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    /// Interpolate towards `other`. `t` is clamped so the result stays
    /// between the two endpoints.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Clamp every channel into [0, 1]; NaN channels become 0.
    pub fn clamped(self) -> Rgb {
        fn channel(v: f32) -> f32 {
            if v.is_nan() {
                0.0
            } else {
                v.clamp(0.0, 1.0)
            }
        }
        Rgb::new(channel(self.r), channel(self.g), channel(self.b))
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(input: &str) -> Result<Rgb> {
        match all_consuming(hex_color)(input.trim()) {
            Ok((_, color)) => Ok(color),
            Err(_) => Err(GalaxyError::InvalidColor(input.to_string())),
        }
    }

    pub fn to_hex(self) -> String {
        let [r, g, b] = self.clamped().to_array().map(|c| (c * 255.0).round() as u8);
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

pub(crate) fn hex_color(input: &str) -> IResult<&str, Rgb> {
    let (input, (r, g, b)) = preceded(
        opt(char('#')),
        tuple((hex_channel, hex_channel, hex_channel)),
    )(input)?;
    Ok((
        input,
        Rgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0),
    ))
}

fn hex_channel(input: &str) -> IResult<&str, u8> {
    map_res(
        take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()),
        |digits| u8::from_str_radix(digits, 16),
    )(input)
}
