// src/ownership.rs
//! Определение владельца региона и цвета его заливки
//!
//! ## Контракт порядка
//!
//! Претенденты просматриваются строго в порядке, переданном вызывающим кодом,
//! и побеждает **первый**, в чьём списке есть имя региона. Если два претендента
//! (ошибочно) заявляют один регион, результат зависит от порядка списка, а не от
//! какого-либо множества: порядок претендентов — часть входных данных.

use std::collections::BTreeMap;

use crate::color::Color;
use crate::error::{MapError, Result};
use crate::model::{Claimant, Faction, Region};

/// Соответствие фракция → цвет плюс цвет незанятых регионов
#[derive(Debug, Clone, PartialEq)]
pub struct FactionPalette {
    colors: BTreeMap<Faction, Color>,
    unclaimed: Color,
}

impl FactionPalette {
    #[must_use]
    pub fn new(colors: BTreeMap<Faction, Color>, unclaimed: Color) -> Self {
        Self { colors, unclaimed }
    }

    #[must_use]
    pub fn color_of(&self, faction: &Faction) -> Option<Color> {
        self.colors.get(faction).copied()
    }

    #[must_use]
    pub fn unclaimed(&self) -> Color {
        self.unclaimed
    }
}

/// Возвращает первого претендента, заявившего регион, или `None`
#[must_use]
pub fn resolve_owner<'a>(region: &Region, claimants: &'a [Claimant]) -> Option<&'a Claimant> {
    claimants.iter().find(|c| c.claims(&region.name))
}

/// Цвет заливки региона: цвет фракции владельца либо цвет незанятого региона.
///
/// # Ошибки
/// `MapError::UnmappedFaction`, если у фракции владельца нет цвета в палитре.
pub fn resolve_fill_color(
    region: &Region,
    claimants: &[Claimant],
    palette: &FactionPalette,
) -> Result<Color> {
    match resolve_owner(region, claimants) {
        None => Ok(palette.unclaimed()),
        Some(owner) => {
            palette
                .color_of(&owner.faction)
                .ok_or_else(|| MapError::UnmappedFaction {
                    claimant: owner.name.clone(),
                    faction: owner.faction.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(name: &str) -> Region {
        Region {
            name: name.to_string(),
            zone: "Barrens".to_string(),
            vertices: vec![(0, 0), (0, 10), (10, 10), (10, 0)],
        }
    }

    fn guild(name: &str, initials: &str, faction: &str, claims: &[&str]) -> Claimant {
        Claimant {
            name: name.to_string(),
            initials: initials.to_string(),
            faction: Faction::new(faction),
            claims: claims.iter().map(ToString::to_string).collect(),
        }
    }

    fn palette() -> FactionPalette {
        FactionPalette::new(
            BTreeMap::from([
                (Faction::new("Horde"), Color::RED),
                (Faction::new("Alliance"), Color::BLUE),
            ]),
            Color::GREY,
        )
    }

    #[test]
    fn single_claimant_found_at_any_position() {
        let outpost = region("Outpost");
        let red = guild("RedGuild", "RG", "Horde", &["Outpost"]);
        let a = guild("A", "A", "Alliance", &["Ratchet"]);
        let b = guild("B", "B", "Alliance", &[]);

        for claimants in [
            vec![red.clone(), a.clone(), b.clone()],
            vec![a.clone(), red.clone(), b.clone()],
            vec![a.clone(), b.clone(), red.clone()],
        ] {
            let owner = resolve_owner(&outpost, &claimants).unwrap();
            assert_eq!(owner.name, "RedGuild");
        }
    }

    #[test]
    fn first_listed_wins_on_overlap() {
        let outpost = region("Outpost");
        let horde = guild("RedGuild", "RG", "Horde", &["Outpost"]);
        let alliance = guild("BlueGuild", "BG", "Alliance", &["Ratchet", "Outpost"]);

        let claimants = vec![horde.clone(), alliance.clone()];
        assert_eq!(resolve_owner(&outpost, &claimants).unwrap().name, "RedGuild");
        assert_eq!(resolve_fill_color(&outpost, &claimants, &palette()).unwrap(), Color::RED);

        let claimants = vec![alliance, horde];
        assert_eq!(resolve_owner(&outpost, &claimants).unwrap().name, "BlueGuild");
        assert_eq!(resolve_fill_color(&outpost, &claimants, &palette()).unwrap(), Color::BLUE);
    }

    #[test]
    fn unclaimed_region_gets_unclaimed_color() {
        let claimants = vec![guild("RedGuild", "RG", "Horde", &["Ratchet"])];
        let outpost = region("Outpost");
        assert!(resolve_owner(&outpost, &claimants).is_none());
        assert_eq!(resolve_fill_color(&outpost, &claimants, &palette()).unwrap(), Color::GREY);
        assert_eq!(resolve_fill_color(&outpost, &[], &palette()).unwrap(), Color::GREY);
    }

    #[test]
    fn unmapped_faction_is_an_error() {
        let claimants = vec![guild("Cult", "CD", "Scourge", &["Outpost"])];
        let err = resolve_fill_color(&region("Outpost"), &claimants, &palette()).unwrap_err();
        match err {
            MapError::UnmappedFaction { claimant, faction } => {
                assert_eq!(claimant, "Cult");
                assert_eq!(faction, "Scourge");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn names_match_exactly() {
        let claimants = vec![guild("RedGuild", "RG", "Horde", &["outpost"])];
        assert!(resolve_owner(&region("Outpost"), &claimants).is_none());
    }
}
