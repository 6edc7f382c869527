// src/color.rs
//! Цвета настроек рендеринга
//!
//! Цвет задаётся в конфигурации строкой: `"#rrggbb"`, `"#rrggbbaa"` или
//! одним из именованных цветов (`"red"`, `"blue"`, `"grey"`, `"white"`, ...).
//! Именованные цвета совпадают с таблицей HTML/CSS.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::MapError;

/// RGBA-цвет, сериализуется как строка `#rrggbb` (или `#rrggbbaa`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 4]);

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("grey", [128, 128, 128]),
    ("gray", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("brown", [165, 42, 42]),
    ("gold", [255, 215, 0]),
    ("teal", [0, 128, 128]),
];

impl Color {
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const RED: Color = Color([255, 0, 0, 255]);
    pub const BLUE: Color = Color([0, 0, 255, 255]);
    pub const GREY: Color = Color([128, 128, 128, 255]);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 255])
    }

    #[must_use]
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            // `from_str_radix` принимает знак, поэтому цифры проверяются заранее
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(MapError::InvalidColor(s.to_string()));
            }
            let channel = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| MapError::InvalidColor(s.to_string()))
            };
            return match hex.len() {
                6 => Ok(Color([channel(0)?, channel(2)?, channel(4)?, 255])),
                8 => Ok(Color([channel(0)?, channel(2)?, channel(4)?, channel(6)?])),
                _ => Err(MapError::InvalidColor(s.to_string())),
            };
        }

        let lower = trimmed.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|&(_, [r, g, b])| Color::rgb(r, g, b))
            .ok_or_else(|| MapError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = MapError;

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
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}
