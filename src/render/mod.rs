// src/render/mod.rs
//! Наложение владений на карту континента
//!
//! ## Порядок проходов
//!
//! Результат зависит от порядка отрисовки, поэтому проходы строго
//! последовательны:
//!
//! 1. **Заливка** — копия базового изображения, на которую непрозрачно
//!    заливаются полигоны регионов цветом фракции владельца.
//! 2. **Смешивание** — база и слой заливки смешиваются с долей `blend_ratio`:
//!    рельеф остаётся видимым под тонировкой.
//! 3. **Контуры и подписи** — для каждого региона по очереди: контур,
//!    подложка подписи, текст подписи.
//!
//! Регионы обрабатываются в порядке, заданном вызывающим кодом, в обоих
//! проходах: более поздние регионы перекрывают более ранние. Перекрытия
//! не обнаруживаются и не разрешаются.

pub mod blend;
pub mod label;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point;
use tracing::debug;

use crate::color::Color;
use crate::config::RenderSettings;
use crate::error::{MapError, Result};
use crate::geometry::{Vertex, centroid, validate_polygon};
use crate::model::{Claimant, Region};
use crate::ownership::{FactionPalette, resolve_fill_color, resolve_owner};

pub use blend::blend;
pub use label::{FontFace, LabelFace, LabelLayout, draw_label, label_text, layout_label};

/// Параметры оформления одного прохода рендеринга
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub blend_ratio: f32,
    pub outline_width: u32,
    pub outline_color: Color,
    pub label_bg_color: Color,
    pub label_text_color: Color,
    pub palette: FactionPalette,
}

impl OverlayStyle {
    #[must_use]
    pub fn from_settings(settings: &RenderSettings) -> Self {
        Self {
            blend_ratio: settings.blend_ratio,
            outline_width: settings.outline_width,
            outline_color: settings.outline_color,
            label_bg_color: settings.label_bg_color,
            label_text_color: settings.label_text_color,
            palette: settings.palette(),
        }
    }
}

/// Рисует карту владений поверх `base` и возвращает новое изображение.
///
/// # Параметры
/// * `base` — рабочая копия карты континента (не изменяется)
/// * `regions` — регионы континента, в порядке отрисовки
/// * `claimants` — претенденты; порядок определяет владельца при пересечении заявок
/// * `style` — доля смешивания, толщина контура, цвета
/// * `face` — шрифт подписей
///
/// # Ошибки
/// - `MapError::InvalidPolygon` — вырожденный или самопересекающийся полигон
/// - `MapError::UnmappedFaction` — у фракции владельца нет цвета
///
/// Файлов не пишет: сохранение — забота вызывающего кода.
pub fn render(
    base: &RgbaImage,
    regions: &[Region],
    claimants: &[Claimant],
    style: &OverlayStyle,
    face: &dyn LabelFace,
) -> Result<RgbaImage> {
    for region in regions {
        validate_polygon(&region.vertices).map_err(|reason| MapError::InvalidPolygon {
            region: region.name.clone(),
            reason,
        })?;
    }

    // === 1. Заливка на копии ===
    let mut overlay = base.clone();
    for region in regions {
        let fill = resolve_fill_color(region, claimants, &style.palette)?;
        draw_polygon_mut(&mut overlay, &to_points(&region.vertices), fill.to_rgba());
    }

    // === 2. Смешивание ===
    let mut img = blend(base, &overlay, style.blend_ratio);
    drop(overlay);

    // === 3. Контуры и подписи ===
    let outline = style.outline_color.to_rgba();
    let plate = style.label_bg_color.to_rgba();
    let ink = style.label_text_color.to_rgba();
    for region in regions {
        draw_outline(&mut img, &region.vertices, style.outline_width, outline);

        let owner = resolve_owner(region, claimants);
        let text = label_text(region, owner);
        let anchor = centroid(&region.vertices)?;
        let layout = layout_label(face, &text, anchor);
        draw_label(&mut img, face, &layout, plate, ink);

        debug!(
            region = %region.name,
            owner = owner.map_or("-", |c| c.name.as_str()),
            x = anchor.0,
            y = anchor.1,
            "region drawn"
        );
    }

    Ok(img)
}

fn to_points(vertices: &[Vertex]) -> Vec<Point<i32>> {
    vertices.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

/// Контур полигона толщиной `width` пикселей.
///
/// Толстая линия — несколько параллельных отрезков, сдвинутых поперёк
/// преобладающего направления ребра.
fn draw_outline(canvas: &mut RgbaImage, vertices: &[Vertex], width: u32, color: Rgba<u8>) {
    let width = width.max(1) as i32;
    let low = -(width - 1) / 2;
    let high = low + width - 1;

    for (i, &(x0, y0)) in vertices.iter().enumerate() {
        let (x1, y1) = vertices[(i + 1) % vertices.len()];
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        for offset in low..=high {
            let (dx, dy) = if steep { (offset, 0) } else { (0, offset) };
            draw_line_segment_mut(
                canvas,
                ((x0 + dx) as f32, (y0 + dy) as f32),
                ((x1 + dx) as f32, (y1 + dy) as f32),
                color,
            );
        }
    }
}
