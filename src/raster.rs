// src/raster.rs
//! Работа с растровыми файлами: рабочая копия, обрезка по зоне, сохранение JPEG
//!
//! ## Рабочая копия
//!
//! Исходные карты континентов слишком велики, чтобы рисовать по ним напрямую
//! с приемлемой скоростью. `downsample` пережимает исходник в JPEG с низким
//! качеством: размер в пикселях **не меняется**, теряется только точность
//! цвета. Поэтому координаты регионов и зон действуют и для рабочей копии.
//!
//! ## Обрезка
//!
//! `crop` вырезает прямоугольник зоны без пересэмплирования: результат
//! пиксель в пиксель совпадает с соответствующей областью источника.

use std::fs;
use std::path::Path;

use image::buffer::ConvertBuffer;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, ImageFormat, RgbImage, RgbaImage, imageops};

use crate::error::{MapError, Result};
use crate::geometry::Bounds;

/// Открывает изображение любого поддерживаемого формата и приводит к RGBA
pub fn open_image(path: &Path) -> Result<RgbaImage> {
    let bytes = fs::read(path).map_err(|e| MapError::io(path, e))?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

/// Кодирует RGB-изображение в JPEG заданного качества
pub fn encode_jpeg(rgb: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, quality).encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ColorType::Rgb8,
    )?;
    Ok(bytes)
}

/// Создаёт рабочую копию исходной карты.
///
/// # Алгоритм
/// 1. Декодирует `source_path`
/// 2. Пережимает в JPEG с качеством `quality` (1–100)
/// 3. Записывает результат в `dest_path`
/// 4. Возвращает декодированную пережатую копию
///
/// # Ошибки
/// Ошибки чтения, декодирования, кодирования и записи передаются как есть.
pub fn downsample(source_path: &Path, dest_path: &Path, quality: u8) -> Result<RgbaImage> {
    let bytes = fs::read(source_path).map_err(|e| MapError::io(source_path, e))?;
    let source = image::load_from_memory(&bytes)?;

    let encoded = encode_jpeg(&source.to_rgb8(), quality)?;
    fs::write(dest_path, &encoded).map_err(|e| MapError::io(dest_path, e))?;

    Ok(image::load_from_memory_with_format(&encoded, ImageFormat::Jpeg)?.to_rgba8())
}

/// Вырезает из изображения прямоугольник `bounds`.
///
/// # Ошибки
/// `MapError::CropOutOfBounds`, если прямоугольник вырожден или выходит за
/// пределы изображения.
///
/// # Пример
/// ```
/// use claimmap::geometry::Bounds;
/// use claimmap::raster::crop;
/// use image::RgbaImage;
///
/// let continent = RgbaImage::new(50, 60);
/// let zone = crop(&continent, Bounds::new(10, 20, 15, 25)).unwrap();
/// assert_eq!(zone.dimensions(), (5, 5));
/// ```
pub fn crop(image: &RgbaImage, bounds: Bounds) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    if !bounds.fits_within(width, height) {
        return Err(MapError::CropOutOfBounds {
            bounds,
            width,
            height,
        });
    }
    Ok(imageops::crop_imm(
        image,
        bounds.west,
        bounds.north,
        bounds.width(),
        bounds.height(),
    )
    .to_image())
}

/// Сохраняет изображение в JPEG (альфа-канал отбрасывается)
pub fn save_jpeg(image: &RgbaImage, path: &Path, quality: u8) -> Result<()> {
    let rgb: RgbImage = image.convert();
    let encoded = encode_jpeg(&rgb, quality)?;
    fs::write(path, encoded).map_err(|e| MapError::io(path, e))
}
