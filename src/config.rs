// src/config.rs
//! Настройки рендеринга карты
//!
//! Этот модуль определяет все параметры, управляющие наложением и подписями:
//! - Сила тонировки регионов (`blend_ratio`)
//! - Толщина контуров и размер шрифта подписей
//! - Цвета: фон подписи, текст, контур, незанятые регионы
//! - Соответствие фракция → цвет заливки
//! - Качество JPEG для рабочей копии и результатов
//!
//! Раздел `[render]` набора данных десериализуется в [`RenderSettings`];
//! любое пропущенное поле получает значение по умолчанию.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{MapError, Result};
use crate::model::Faction;
use crate::ownership::FactionPalette;

/// Параметры рендеринга одной карты континента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Доля слоя заливки при смешивании:
    /// - `0.0` — заливки не видно,
    /// - `0.3` — 30% заливки / 70% исходной карты (по умолчанию),
    /// - `1.0` — заливка полностью перекрывает рельеф.
    #[serde(default = "default_blend_ratio")]
    pub blend_ratio: f32,

    /// Толщина контура региона в пикселях (≥ 1)
    #[serde(default = "default_outline_width")]
    pub outline_width: u32,

    /// Размер шрифта подписи в пикселях (≥ 1)
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Путь к TrueType-шрифту для подписей.
    /// Относительный путь разрешается от каталога файла набора данных.
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// Цвет подложки под подписью
    #[serde(default = "default_label_bg_color")]
    pub label_bg_color: Color,

    #[serde(default = "default_label_text_color")]
    pub label_text_color: Color,

    #[serde(default = "default_outline_color")]
    pub outline_color: Color,

    /// Цвет регионов, которыми никто не владеет
    #[serde(default = "default_unclaimed_color")]
    pub unclaimed_color: Color,

    /// Цвет заливки для каждой фракции
    #[serde(default = "default_faction_colors")]
    pub faction_colors: BTreeMap<Faction, Color>,

    /// Качество JPEG рабочей копии континента (1–100).
    /// Низкое значение заметно уменьшает файл, разрешение не меняется.
    #[serde(default = "default_working_quality")]
    pub working_quality: u8,

    /// Качество JPEG итоговых карт континентов и зон (1–100)
    #[serde(default = "default_output_quality")]
    pub output_quality: u8,
}

fn default_blend_ratio() -> f32 {
    0.3
}
fn default_outline_width() -> u32 {
    1
}
fn default_font_size() -> u32 {
    20
}
fn default_label_bg_color() -> Color {
    Color::WHITE
}
fn default_label_text_color() -> Color {
    Color::BLACK
}
fn default_outline_color() -> Color {
    Color::BLACK
}
fn default_unclaimed_color() -> Color {
    Color::GREY
}
fn default_faction_colors() -> BTreeMap<Faction, Color> {
    BTreeMap::from([
        (Faction::new("Horde"), Color::RED),
        (Faction::new("Alliance"), Color::BLUE),
    ])
}
fn default_working_quality() -> u8 {
    10
}
fn default_output_quality() -> u8 {
    75
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            blend_ratio: default_blend_ratio(),
            outline_width: default_outline_width(),
            font_size: default_font_size(),
            font_path: None,
            label_bg_color: default_label_bg_color(),
            label_text_color: default_label_text_color(),
            outline_color: default_outline_color(),
            unclaimed_color: default_unclaimed_color(),
            faction_colors: default_faction_colors(),
            working_quality: default_working_quality(),
            output_quality: default_output_quality(),
        }
    }
}

impl RenderSettings {
    /// Проверяет диапазоны значений.
    ///
    /// # Ошибки
    /// `MapError::InvalidSettings` с именем первого некорректного поля.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.blend_ratio) {
            return Err(MapError::InvalidSettings(format!(
                "blend_ratio must be within 0.0-1.0, got {}",
                self.blend_ratio
            )));
        }
        if self.outline_width == 0 {
            return Err(MapError::InvalidSettings(
                "outline_width must be >= 1".to_string(),
            ));
        }
        if self.font_size == 0 {
            return Err(MapError::InvalidSettings(
                "font_size must be >= 1".to_string(),
            ));
        }
        for (field, quality) in [
            ("working_quality", self.working_quality),
            ("output_quality", self.output_quality),
        ] {
            if !(1..=100).contains(&quality) {
                return Err(MapError::InvalidSettings(format!(
                    "{field} must be within 1-100, got {quality}"
                )));
            }
        }
        Ok(())
    }

    /// Палитра заливки для резолвера владения
    #[must_use]
    pub fn palette(&self) -> FactionPalette {
        FactionPalette::new(self.faction_colors.clone(), self.unclaimed_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = RenderSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.blend_ratio, 0.3);
        assert_eq!(settings.faction_colors[&Faction::new("Horde")], Color::RED);
    }

    #[test]
    fn empty_table_uses_defaults() {
        let settings: RenderSettings = toml::from_str("").unwrap();
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn parses_custom_colors() {
        let settings: RenderSettings = toml::from_str(
            r##"
            blend_ratio = 0.5
            unclaimed_color = "#101010"

            [faction_colors]
            Scourge = "purple"
            "##,
        )
        .unwrap();
        assert_eq!(settings.blend_ratio, 0.5);
        assert_eq!(settings.unclaimed_color, Color::rgb(16, 16, 16));
        assert_eq!(settings.faction_colors.len(), 1);
        assert_eq!(
            settings.faction_colors[&Faction::new("Scourge")],
            Color::rgb(128, 0, 128)
        );
    }

    #[test]
    fn invalid_color_is_a_parse_error() {
        let parsed: std::result::Result<RenderSettings, _> =
            toml::from_str(r#"label_bg_color = "not-a-color""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn invalid_blend_ratio() {
        let settings = RenderSettings {
            blend_ratio: 1.5,
            ..RenderSettings::default()
        };
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("blend_ratio"), "Error should mention blend_ratio: {err}");
    }

    #[test]
    fn invalid_outline_width() {
        let settings = RenderSettings {
            outline_width: 0,
            ..RenderSettings::default()
        };
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("outline_width"), "{err}");
    }

    #[test]
    fn invalid_quality() {
        let settings = RenderSettings {
            output_quality: 0,
            ..RenderSettings::default()
        };
        let err = settings.validate().unwrap_err().to_string();
        assert!(err.contains("output_quality"), "{err}");
    }
}
