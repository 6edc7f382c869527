// src/model.rs
//! Сущности карты: континенты, зоны, регионы и претенденты (гильдии)
//!
//! Иерархия строгая: регион → зона → континент, ссылки по имени.
//! Претендент ссылается на регионы тоже по имени, а не на сами объекты:
//! списки владений задаются независимо от геометрии и разрешаются при рендеринге.
//! Все структуры неизменяемы после загрузки набора данных.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Vertex};

/// Континент: исходная карта высокого разрешения и её рабочая копия
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Continent {
    pub name: String,
    /// Исходное изображение (обычно PNG высокого разрешения)
    pub source_image: PathBuf,
    /// Куда записывается пережатая рабочая копия (JPEG)
    pub working_image: PathBuf,
}

/// Зона — именованный прямоугольник на карте континента, по нему режется кроп
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    /// Имя континента, на карте которого лежит зона
    pub continent: String,
    pub bounds: Bounds,
}

/// Регион (территория) — единица владения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Уникально во всём наборе данных
    pub name: String,
    pub zone: String,
    /// Открытый контур в пикселях континента, первая вершина в конце не повторяется
    pub vertices: Vec<Vertex>,
}

/// Фракция претендента. Набор фракций открыт: допустимы те,
/// для которых в настройках задан цвет.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Faction(pub String);

impl Faction {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Претендент (гильдия), владеющий регионами по именам
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claimant {
    pub name: String,
    /// Короткая метка для подписи, например `RSC`
    pub initials: String,
    pub faction: Faction,
    #[serde(default)]
    pub claims: Vec<String>,
}

impl Claimant {
    #[must_use]
    pub fn claims(&self, region_name: &str) -> bool {
        self.claims.iter().any(|c| c == region_name)
    }
}
