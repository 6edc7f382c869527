// src/pipeline.rs
//! Полный прогон: набор данных → карты континентов → карты зон
//!
//! ## Этапы
//!
//! 1. Проверка набора данных, ссылок претендентов и цветов фракций —
//!    до любой записи на диск.
//! 2. Для каждого континента:
//!    - рабочая копия исходной карты (`raster::downsample`);
//!    - проверка, что все зоны континента помещаются в изображение;
//!    - наложение владений (`render::render`) по регионам этого континента;
//!    - сохранение `<континент>.jpg`;
//!    - обрезка и сохранение `<зона>.jpg` для каждой его зоны.
//!
//! Любая ошибка останавливает прогон: частично верная карта хуже отсутствующей.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::dataset::Atlas;
use crate::error::{MapError, Result};
use crate::integrity::{check_claims, check_factions, check_zone_bounds};
use crate::raster::{crop, downsample, save_jpeg};
use crate::render::{LabelFace, OverlayStyle, render};

/// Расширение всех итоговых изображений
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Записанные файлы
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtlasReport {
    pub continent_maps: Vec<PathBuf>,
    pub zone_maps: Vec<PathBuf>,
}

/// Путь итогового изображения: `<output_dir>/<name>.jpg`
#[must_use]
pub fn output_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(format!("{name}.{OUTPUT_EXTENSION}"))
}

/// Проверки, которые должны пройти до любого рендеринга
pub fn preflight(atlas: &Atlas) -> Result<()> {
    atlas.validate()?;
    check_claims(&atlas.regions, &atlas.claimants)?;
    check_factions(&atlas.claimants, &atlas.render.palette())?;
    Ok(())
}

/// Рендерит все континенты и зоны набора данных в `output_dir`.
///
/// # Параметры
/// * `atlas` — проверенный или непроверенный набор данных (проверка повторяется)
/// * `face` — шрифт подписей
/// * `output_dir` — каталог результатов, создаётся при необходимости
///
/// # Ошибки
/// Первая же ошибка любого этапа, см. [`MapError`].
pub fn render_atlas(atlas: &Atlas, face: &dyn LabelFace, output_dir: &Path) -> Result<AtlasReport> {
    preflight(atlas)?;
    fs::create_dir_all(output_dir).map_err(|e| MapError::io(output_dir, e))?;

    let settings = &atlas.render;
    let style = OverlayStyle::from_settings(settings);
    let mut report = AtlasReport::default();

    for continent in &atlas.continents {
        info!(
            continent = %continent.name,
            source = %continent.source_image.display(),
            "preparing working copy"
        );
        let working = downsample(
            &continent.source_image,
            &continent.working_image,
            settings.working_quality,
        )?;
        let (width, height) = working.dimensions();
        check_zone_bounds(atlas.zones_of(continent), width, height)?;

        let regions = atlas.regions_of(continent);
        info!(
            continent = %continent.name,
            width,
            height,
            regions = regions.len(),
            "rendering overlay"
        );
        let annotated = render(&working, &regions, &atlas.claimants, &style, face)?;

        let continent_path = output_path(output_dir, &continent.name);
        save_jpeg(&annotated, &continent_path, settings.output_quality)?;
        info!(path = %continent_path.display(), "continent map saved");
        report.continent_maps.push(continent_path);

        for zone in atlas.zones_of(continent) {
            let zone_img = crop(&annotated, zone.bounds)?;
            let zone_path = output_path(output_dir, &zone.name);
            save_jpeg(&zone_img, &zone_path, settings.output_quality)?;
            debug!(zone = %zone.name, bounds = %zone.bounds, "zone cropped");
            info!(path = %zone_path.display(), "zone map saved");
            report.zone_maps.push(zone_path);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::geometry::Bounds;
    use crate::model::{Claimant, Continent, Faction, Region, Zone};
    use crate::render::label::BlockFace;

    fn face() -> BlockFace {
        BlockFace {
            advance: 3,
            line_height: 5,
        }
    }

    fn atlas_in(dir: &Path) -> Atlas {
        let source = dir.join("kalimdor.png");
        RgbaImage::from_pixel(200, 150, Rgba([90, 140, 60, 255]))
            .save(&source)
            .unwrap();

        Atlas {
            continents: vec![Continent {
                name: "Kalimdor".to_string(),
                source_image: source,
                working_image: dir.join("lowres_kalimdor.jpg"),
            }],
            zones: vec![
                Zone {
                    name: "Ashenvale".to_string(),
                    continent: "Kalimdor".to_string(),
                    bounds: Bounds::new(0, 0, 120, 60),
                },
                Zone {
                    name: "Barrens".to_string(),
                    continent: "Kalimdor".to_string(),
                    bounds: Bounds::new(50, 50, 200, 150),
                },
            ],
            regions: vec![
                Region {
                    name: "Felfire Hill".to_string(),
                    zone: "Ashenvale".to_string(),
                    vertices: vec![(10, 10), (10, 50), (60, 50), (50, 10)],
                },
                Region {
                    name: "Ratchet".to_string(),
                    zone: "Barrens".to_string(),
                    vertices: vec![(100, 80), (100, 140), (180, 140), (180, 80)],
                },
            ],
            claimants: vec![Claimant {
                name: "Red Sand Charter".to_string(),
                initials: "RSC".to_string(),
                faction: Faction::new("Horde"),
                claims: vec!["Ratchet".to_string()],
            }],
            ..Atlas::default()
        }
    }

    #[test]
    fn renders_continent_and_zone_maps() {
        let dir = tempfile::tempdir().unwrap();
        let atlas = atlas_in(dir.path());
        let out = dir.path().join("out");

        let report = render_atlas(&atlas, &face(), &out).unwrap();

        assert_eq!(report.continent_maps, vec![out.join("Kalimdor.jpg")]);
        assert_eq!(
            report.zone_maps,
            vec![out.join("Ashenvale.jpg"), out.join("Barrens.jpg")]
        );
        assert!(dir.path().join("lowres_kalimdor.jpg").exists());

        let continent = image::open(&report.continent_maps[0]).unwrap();
        assert_eq!((continent.width(), continent.height()), (200, 150));
        let barrens = image::open(&report.zone_maps[1]).unwrap();
        assert_eq!((barrens.width(), barrens.height()), (150, 100));
    }

    #[test]
    fn unknown_claim_stops_before_any_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut atlas = atlas_in(dir.path());
        atlas.claimants[0].claims.push("Orgrimmar".to_string());
        let out = dir.path().join("out");

        let err = render_atlas(&atlas, &face(), &out).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Red Sand Charter"), "{message}");
        assert!(message.contains("Orgrimmar"), "{message}");
        assert!(!out.exists());
        assert!(!dir.path().join("lowres_kalimdor.jpg").exists());
    }

    #[test]
    fn zone_outside_continent_image_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut atlas = atlas_in(dir.path());
        atlas.zones[1].bounds = Bounds::new(50, 50, 250, 150);
        let out = dir.path().join("out");

        let err = render_atlas(&atlas, &face(), &out).unwrap_err();
        assert!(matches!(err, MapError::CropOutOfBounds { width: 200, height: 150, .. }));
        assert!(!out.join("Kalimdor.jpg").exists());
    }

    #[test]
    fn output_names_follow_display_names() {
        assert_eq!(
            output_path(Path::new("maps"), "Stonetalon Mountains"),
            Path::new("maps").join("Stonetalon Mountains.jpg")
        );
    }
}
