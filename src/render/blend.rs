use image::RgbaImage;

/// Линейное смешивание двух слоёв одного размера:
/// `out = base · (1 − ratio) + overlay · ratio` для каждого канала.
///
/// # Panics
/// Если размеры слоёв различаются.
#[must_use]
pub fn blend(base: &RgbaImage, overlay: &RgbaImage, ratio: f32) -> RgbaImage {
    assert_eq!(
        base.dimensions(),
        overlay.dimensions(),
        "blended layers must have equal dimensions"
    );
    let keep = 1.0 - ratio;
    let mut out = base.clone();
    for (dst, &src) in out.iter_mut().zip(overlay.iter()) {
        let mixed = f32::from(*dst) * keep + f32::from(src) * ratio;
        *dst = mixed.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    fn solid(color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(4, 3, Rgba(color))
    }

    #[test]
    fn ratio_bounds_select_a_layer() {
        let base = solid([10, 20, 30, 255]);
        let overlay = solid([200, 100, 0, 255]);
        assert_eq!(blend(&base, &overlay, 0.0), base);
        assert_eq!(blend(&base, &overlay, 1.0), overlay);
    }

    #[test]
    fn thirty_percent_tint() {
        let base = solid([0, 128, 0, 255]);
        let overlay = solid([255, 0, 0, 255]);
        let out = blend(&base, &overlay, 0.3);
        assert_eq!(*out.get_pixel(2, 1), Rgba([77, 90, 0, 255]));
    }

    #[test]
    #[should_panic(expected = "equal dimensions")]
    fn mismatched_layers_panic() {
        let _ = blend(&RgbaImage::new(2, 2), &RgbaImage::new(3, 2), 0.5);
    }
}
