// src/render/label.rs
//! Подписи регионов
//!
//! Подпись — имя региона и, если у региона есть владелец, вторая строка
//! с инициалами гильдии в угловых скобках (`<RSC>`). Блок строк центрируется
//! на точке привязки: каждая строка выравнивается по центру по горизонтали,
//! весь блок — по вертикали. Под текстом рисуется непрозрачная подложка,
//! расширенная на `PLATE_MARGIN` пикселей, чтобы подпись читалась на любом фоне.
//!
//! Растеризация текста скрыта за трейтом [`LabelFace`]; рабочая реализация —
//! [`FontFace`] поверх TrueType-шрифта.

use std::fs;
use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use rusttype::{Font, Scale, point};

use crate::error::{MapError, Result};
use crate::model::{Claimant, Region};

/// Расстояние между строками подписи в пикселях
pub const LINE_SPACING: i32 = 4;

/// Насколько подложка выступает за границы текста
pub const PLATE_MARGIN: i32 = 1;

/// Измерение и отрисовка одной строки текста заданного размера
pub trait LabelFace {
    /// Высота строки в пикселях
    fn line_height(&self) -> u32;

    /// Ширина строки в пикселях
    fn line_width(&self, line: &str) -> u32;

    /// Рисует строку; `(x, y)` — левый верхний угол строки
    fn draw_line(&self, canvas: &mut RgbaImage, x: i32, y: i32, line: &str, color: Rgba<u8>);
}

/// TrueType-шрифт фиксированного размера
pub struct FontFace {
    font: Font<'static>,
    scale: Scale,
}

impl FontFace {
    /// Создаёт шрифт из байтов TTF/OTF; `None`, если данные не разобрались
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>, font_size: u32) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self {
            font,
            scale: Scale::uniform(font_size as f32),
        })
    }

    /// Загружает шрифт из файла
    pub fn load(path: &Path, font_size: u32) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| MapError::io(path, e))?;
        Self::from_bytes(bytes, font_size).ok_or_else(|| MapError::InvalidFont {
            path: path.to_path_buf(),
        })
    }
}

impl LabelFace for FontFace {
    fn line_height(&self) -> u32 {
        let v = self.font.v_metrics(self.scale);
        (v.ascent - v.descent).ceil() as u32
    }

    fn line_width(&self, line: &str) -> u32 {
        self.font
            .layout(line, self.scale, point(0.0, 0.0))
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .fold(0.0_f32, f32::max)
            .ceil() as u32
    }

    fn draw_line(&self, canvas: &mut RgbaImage, x: i32, y: i32, line: &str, color: Rgba<u8>) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, line);
    }
}

/// Текст подписи: имя региона и `<ИНИЦИАЛЫ>` владельца второй строкой
#[must_use]
pub fn label_text(region: &Region, owner: Option<&Claimant>) -> String {
    match owner {
        Some(guild) => format!("{}\n<{}>", region.name, guild.initials),
        None => region.name.clone(),
    }
}

/// Строка подписи с уже вычисленной позицией
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Размещённая подпись: строки и охватывающий их прямоугольник
/// (`right`/`bottom` не включаются)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLayout {
    pub lines: Vec<PlacedLine>,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl LabelLayout {
    /// Прямоугольник подложки: текст плюс `PLATE_MARGIN` с каждой стороны
    #[must_use]
    pub fn plate(&self) -> Rect {
        Rect::at(self.left - PLATE_MARGIN, self.top - PLATE_MARGIN).of_size(
            (self.right - self.left + 2 * PLATE_MARGIN) as u32,
            (self.bottom - self.top + 2 * PLATE_MARGIN) as u32,
        )
    }
}

/// Размещает многострочный текст по центру точки `anchor`
pub fn layout_label(face: &dyn LabelFace, text: &str, anchor: (f32, f32)) -> LabelLayout {
    let line_height = face.line_height() as i32;
    let lines: Vec<&str> = text.split('\n').collect();
    let count = lines.len() as i32;
    let block_height = count * line_height + (count - 1) * LINE_SPACING;

    let top = (anchor.1 - block_height as f32 / 2.0).round() as i32;
    let mut left = i32::MAX;
    let mut right = i32::MIN;

    let placed = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let width = face.line_width(line) as i32;
            let x = (anchor.0 - width as f32 / 2.0).round() as i32;
            left = left.min(x);
            right = right.max(x + width);
            PlacedLine {
                text: (*line).to_string(),
                x,
                y: top + i as i32 * (line_height + LINE_SPACING),
            }
        })
        .collect();

    LabelLayout {
        lines: placed,
        left,
        top,
        right,
        bottom: top + block_height,
    }
}

/// Рисует подложку, затем текст поверх неё
pub fn draw_label(
    canvas: &mut RgbaImage,
    face: &dyn LabelFace,
    layout: &LabelLayout,
    plate_color: Rgba<u8>,
    text_color: Rgba<u8>,
) {
    draw_filled_rect_mut(canvas, layout.plate(), plate_color);
    for line in &layout.lines {
        face.draw_line(canvas, line.x, line.y, &line.text, text_color);
    }
}

/// Предсказуемый «шрифт» для тестов: каждый непробельный символ —
/// закрашенный блок шириной `advance` и высотой `line_height`.
#[cfg(test)]
pub(crate) struct BlockFace {
    pub advance: u32,
    pub line_height: u32,
}

#[cfg(test)]
impl LabelFace for BlockFace {
    fn line_height(&self) -> u32 {
        self.line_height
    }

    fn line_width(&self, line: &str) -> u32 {
        line.chars().count() as u32 * self.advance
    }

    fn draw_line(&self, canvas: &mut RgbaImage, x: i32, y: i32, line: &str, color: Rgba<u8>) {
        for (i, ch) in line.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let rect = Rect::at(x + (i as u32 * self.advance) as i32, y)
                .of_size(self.advance, self.line_height);
            draw_filled_rect_mut(canvas, rect, color);
        }
    }
}
