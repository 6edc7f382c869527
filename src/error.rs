// src/error.rs
//! Ошибки рендеринга карты
//!
//! Все сбои фатальны: конвейер не пропускает «плохие» регионы и не выдаёт
//! частично верную карту. Варианты сгруппированы так же, как они возникают:
//! - **конфигурация** — ссылки на неизвестные регионы, фракции без цвета,
//!   некорректные настройки и набор данных;
//! - **геометрия** — пустые или вырожденные полигоны, прямоугольник обрезки
//!   за пределами изображения;
//! - **ввод-вывод** — чтение/запись файлов и кодеки изображений.

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Bounds;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("claimant '{claimant}' claims unknown region '{region}'")]
    UnknownRegion { claimant: String, region: String },

    #[error("faction '{faction}' of claimant '{claimant}' has no configured color")]
    UnmappedFaction { claimant: String, faction: String },

    #[error("invalid render settings: {0}")]
    InvalidSettings(String),

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("invalid color '{0}'")]
    InvalidColor(String),

    #[error("cannot load font from {}", path.display())]
    InvalidFont { path: PathBuf },

    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("centroid of an empty polygon is undefined")]
    EmptyPolygon,

    #[error("region '{region}' has an invalid polygon: {reason}")]
    InvalidPolygon { region: String, reason: String },

    #[error("crop rectangle {bounds} exceeds image of {width}×{height}")]
    CropOutOfBounds {
        bounds: Bounds,
        width: u32,
        height: u32,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, MapError>;

impl MapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
