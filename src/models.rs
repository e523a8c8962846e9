use std::fmt;
use std::str::FromStr;

use image::{Rgb, RgbImage};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use crate::error::CoinError;

/// RGB annotation color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = CoinError;

    /// Parse `#RRGGBB` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoinError::invalid(format!(
                "color must be #RRGGBB, got {s:?}"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| CoinError::invalid(format!("bad color {s:?}: {e}")))
        };
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = CoinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb([color.r, color.g, color.b])
    }
}

/// Boundary of a connected foreground region in an edge map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Minimum enclosing circle of a contour that passed the radius filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateCircle {
    /// Index into [`DetectionResult::contours`].
    pub contour_index: usize,
    pub center: (f32, f32),
    pub radius: f32,
}

impl CandidateCircle {
    /// Center rounded to the nearest pixel, as drawn on the annotated image.
    pub fn pixel_center(&self) -> (i32, i32) {
        (self.center.0.round() as i32, self.center.1.round() as i32)
    }

    pub fn pixel_radius(&self) -> i32 {
        self.radius.round() as i32
    }
}

/// Output of a single detection run. Owned entirely by the caller.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// Copy of the input with every admitted coin outlined.
    pub annotated: RgbImage,
    /// Number of admitted coins.
    pub count: usize,
    /// Every external contour found, before radius filtering.
    pub contours: Vec<Contour>,
    pub candidates: Vec<CandidateCircle>,
}
