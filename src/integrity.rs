// src/integrity.rs
//! Предполётные проверки перед рендерингом
//!
//! Ошибка здесь прерывает весь запуск: неверно настроенный набор данных
//! не должен молча превращаться в неверную карту.

use std::collections::HashSet;

use crate::error::{MapError, Result};
use crate::model::{Claimant, Region, Zone};
use crate::ownership::FactionPalette;

/// Проверяет, что каждое заявленное имя региона существует в `regions`.
///
/// Останавливается на первом неизвестном имени и сообщает претендента и регион.
pub fn check_claims(regions: &[Region], claimants: &[Claimant]) -> Result<()> {
    let known: HashSet<&str> = regions.iter().map(|r| r.name.as_str()).collect();
    for claimant in claimants {
        if let Some(unknown) = claimant.claims.iter().find(|name| !known.contains(name.as_str())) {
            return Err(MapError::UnknownRegion {
                claimant: claimant.name.clone(),
                region: unknown.clone(),
            });
        }
    }
    Ok(())
}

/// Проверяет, что у фракции каждого претендента есть цвет заливки
pub fn check_factions(claimants: &[Claimant], palette: &FactionPalette) -> Result<()> {
    match claimants
        .iter()
        .find(|c| palette.color_of(&c.faction).is_none())
    {
        Some(c) => Err(MapError::UnmappedFaction {
            claimant: c.name.clone(),
            faction: c.faction.to_string(),
        }),
        None => Ok(()),
    }
}

/// Проверяет, что прямоугольники зон лежат внутри изображения континента
pub fn check_zone_bounds<'a>(
    zones: impl IntoIterator<Item = &'a Zone>,
    width: u32,
    height: u32,
) -> Result<()> {
    for zone in zones {
        if !zone.bounds.fits_within(width, height) {
            return Err(MapError::CropOutOfBounds {
                bounds: zone.bounds,
                width,
                height,
            });
        }
    }
    Ok(())
}
