// src/dataset.rs
//! Набор данных карты
//!
//! Вся география и все владения описываются декларативно в одном файле
//! (TOML или JSON, по расширению), а не в коде:
//!
//! ```toml
//! [render]
//! blend_ratio = 0.3
//! font_path = "fonts/DejaVuSans.ttf"
//!
//! [[continents]]
//! name = "Kalimdor"
//! source_image = "highres/kalimdor.png"
//! working_image = "lowres_kalimdor.jpg"
//!
//! [[zones]]
//! name = "Barrens"
//! continent = "Kalimdor"
//! bounds = { west = 2901, north = 5136, east = 4760, south = 8413 }
//!
//! [[regions]]
//! name = "Ratchet"
//! zone = "Barrens"
//! vertices = [[4160, 6300], [4160, 6530], [4480, 6530], [4480, 6300]]
//!
//! [[claimants]]
//! name = "Red Sand Charter"
//! initials = "RSC"
//! faction = "Horde"
//! claims = ["Ratchet"]
//! ```
//!
//! Относительные пути к изображениям и шрифту разрешаются от каталога,
//! в котором лежит сам файл набора данных.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::RenderSettings;
use crate::error::{MapError, Result};
use crate::geometry::validate_polygon;
use crate::model::{Claimant, Continent, Region, Zone};

/// Полный набор данных: настройки, география и претенденты
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Atlas {
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub continents: Vec<Continent>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub regions: Vec<Region>,
    /// Порядок важен: при пересечении заявок побеждает первый
    #[serde(default)]
    pub claimants: Vec<Claimant>,
}

impl Atlas {
    /// Загружает набор данных из файла `.toml` или `.json`.
    ///
    /// # Ошибки
    /// - `MapError::Io` — файл не читается
    /// - `MapError::Parse` — синтаксис или неизвестное расширение
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| MapError::io(path, e))?;
        let parse_error = |message: String| MapError::Parse {
            path: path.to_path_buf(),
            message,
        };

        let mut atlas: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?,
            Some("json") => {
                serde_json::from_str(&contents).map_err(|e| parse_error(e.to_string()))?
            }
            other => {
                return Err(parse_error(format!(
                    "unsupported dataset extension {other:?}, expected .toml or .json"
                )));
            }
        };

        if let Some(base) = path.parent() {
            atlas.resolve_paths(base);
        }
        Ok(atlas)
    }

    /// Делает относительные пути абсолютными относительно `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for continent in &mut self.continents {
            if continent.source_image.is_relative() {
                continent.source_image = base.join(&continent.source_image);
            }
            if continent.working_image.is_relative() {
                continent.working_image = base.join(&continent.working_image);
            }
        }
        if let Some(font) = self.render.font_path.as_mut()
            && font.is_relative()
        {
            *font = base.join(&*font);
        }
    }

    /// Структурная проверка набора данных.
    ///
    /// # Проверяется
    /// - настройки рендеринга в допустимых диапазонах
    /// - имена континентов, зон и регионов уникальны
    /// - имя зоны не совпадает с именем континента, оба годятся как имя файла
    /// - зона ссылается на существующий континент, регион — на существующую зону
    /// - прямоугольник зоны не вырожден (`west < east`, `north < south`)
    /// - полигон региона простой
    /// - инициалы претендента не пусты
    ///
    /// Ссылки претендентов на регионы проверяет [`crate::integrity::check_claims`].
    pub fn validate(&self) -> Result<()> {
        self.render.validate()?;

        let continents = unique_names("continent", self.continents.iter().map(|c| c.name.as_str()))?;
        let zones = unique_names("zone", self.zones.iter().map(|z| z.name.as_str()))?;
        unique_names("region", self.regions.iter().map(|r| r.name.as_str()))?;

        // Имена континентов и зон становятся именами файлов в одном каталоге
        for name in continents.iter().chain(zones.iter()) {
            check_file_name(name)?;
        }
        if let Some(name) = self.zones.iter().find(|z| continents.contains(z.name.as_str())) {
            return Err(MapError::InvalidDataset(format!(
                "zone name '{}' collides with a continent name",
                name.name
            )));
        }

        for zone in &self.zones {
            if !continents.contains(zone.continent.as_str()) {
                return Err(MapError::InvalidDataset(format!(
                    "zone '{}' references unknown continent '{}'",
                    zone.name, zone.continent
                )));
            }
            if !zone.bounds.is_well_formed() {
                return Err(MapError::InvalidDataset(format!(
                    "zone '{}' has malformed bounds {}",
                    zone.name, zone.bounds
                )));
            }
        }

        for region in &self.regions {
            if !zones.contains(region.zone.as_str()) {
                return Err(MapError::InvalidDataset(format!(
                    "region '{}' references unknown zone '{}'",
                    region.name, region.zone
                )));
            }
            validate_polygon(&region.vertices).map_err(|reason| MapError::InvalidPolygon {
                region: region.name.clone(),
                reason,
            })?;
        }

        if let Some(claimant) = self.claimants.iter().find(|c| c.initials.trim().is_empty()) {
            return Err(MapError::InvalidDataset(format!(
                "claimant '{}' has empty initials",
                claimant.name
            )));
        }
        Ok(())
    }

    /// Зоны, лежащие на данном континенте, в порядке набора данных
    pub fn zones_of<'a>(&'a self, continent: &'a Continent) -> impl Iterator<Item = &'a Zone> + 'a {
        self.zones
            .iter()
            .filter(move |z| z.continent == continent.name)
    }

    /// Регионы, чьи зоны лежат на данном континенте, в порядке набора данных
    #[must_use]
    pub fn regions_of(&self, continent: &Continent) -> Vec<Region> {
        let zone_names: HashSet<&str> = self.zones_of(continent).map(|z| z.name.as_str()).collect();
        self.regions
            .iter()
            .filter(|r| zone_names.contains(r.zone.as_str()))
            .cloned()
            .collect()
    }
}

/// Имя годится для `<output_dir>/<name>.jpg`: не пустое, без разделителей
/// пути и не `.`/`..`
fn check_file_name(name: &str) -> Result<()> {
    if name.trim().is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(MapError::InvalidDataset(format!(
            "name '{name}' cannot be used as an output file name"
        )));
    }
    Ok(())
}

fn unique_names<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(MapError::InvalidDataset(format!(
                "duplicate {kind} name '{name}'"
            )));
        }
    }
    Ok(seen)
}
