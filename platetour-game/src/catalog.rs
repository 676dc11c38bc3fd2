//! Static country and vehicle lookup data.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{FIRST_LEVEL, MAX_LEVEL};

const DEFAULT_CATALOG_JSON: &str = include_str!("../assets/catalog.json");

/// Errors raised when catalog data is inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("invalid catalog json: {0}")]
    Parse(String),
    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: &'static str, id: String },
    #[error("{kind} `{id}` unlocks at level {level}, outside 1..={max}")]
    LevelOutOfRange {
        kind: &'static str,
        id: String,
        level: u8,
        max: u8,
    },
    #[error("no country is assigned to level {level}")]
    MissingCountry { level: u8 },
}

/// A destination on the world tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    pub display_name: String,
    pub unlock_level: u8,
}

/// A cosmetic vehicle the player can drive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub display_name: String,
    pub unlock_level: u8,
}

/// Container for all lookup data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
}

impl Catalog {
    /// Create an empty catalog (useful for tests)
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            countries: Vec::new(),
            vehicles: Vec::new(),
        }
    }

    /// Load catalog data from a JSON string without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into a catalog.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// The catalog shipped with the game.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled asset is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(DEFAULT_CATALOG_JSON)?;
        catalog.validate(MAX_LEVEL)?;
        Ok(catalog)
    }

    /// Check ids are unique, levels are in range and every level past the
    /// first has a country to visit.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self, max_level: u8) -> Result<(), CatalogError> {
        let mut seen = BTreeSet::new();
        for country in &self.countries {
            check_entry("country", &country.id, country.unlock_level, max_level, &mut seen)?;
        }
        seen.clear();
        for vehicle in &self.vehicles {
            check_entry("vehicle", &vehicle.id, vehicle.unlock_level, max_level, &mut seen)?;
        }
        for level in (FIRST_LEVEL + 1)..=max_level {
            if self.country_for_level(level).is_none() {
                return Err(CatalogError::MissingCountry { level });
            }
        }
        Ok(())
    }

    /// The country a player travels to on reaching `level`.
    #[must_use]
    pub fn country_for_level(&self, level: u8) -> Option<&Country> {
        self.countries.iter().find(|c| c.unlock_level == level)
    }

    #[must_use]
    pub fn country(&self, id: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    /// Vehicles whose threshold is exactly `level`.
    pub fn vehicles_at_level(&self, level: u8) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(move |v| v.unlock_level == level)
    }

    /// Vehicles available from the start of a tour.
    pub fn starter_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles
            .iter()
            .filter(|v| v.unlock_level <= FIRST_LEVEL)
    }
}

fn check_entry(
    kind: &'static str,
    id: &str,
    level: u8,
    max_level: u8,
    seen: &mut BTreeSet<String>,
) -> Result<(), CatalogError> {
    if !seen.insert(id.to_string()) {
        return Err(CatalogError::DuplicateId {
            kind,
            id: id.to_string(),
        });
    }
    if !(FIRST_LEVEL..=max_level).contains(&level) {
        return Err(CatalogError::LevelOutOfRange {
            kind,
            id: id.to_string(),
            level,
            max: max_level,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_covers_every_level() {
        let catalog = Catalog::bundled().unwrap();
        for level in 1..=MAX_LEVEL {
            assert!(catalog.country_for_level(level).is_some(), "level {level}");
        }
        assert_eq!(catalog.country_for_level(2).unwrap().id, "france");
        assert!(catalog.vehicles_at_level(5).any(|v| v.id == "school_bus"));
        assert_eq!(catalog.starter_vehicles().count(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let catalog = Catalog::from_json(
            r#"{"vehicles": [
                {"id": "car", "display_name": "Car", "unlock_level": 1},
                {"id": "car", "display_name": "Car 2", "unlock_level": 2}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            catalog.validate(2),
            Err(CatalogError::DuplicateId {
                kind: "vehicle",
                id: "car".to_string()
            })
        );
    }

    #[test]
    fn missing_country_is_reported() {
        let catalog = Catalog::from_json(
            r#"{"countries": [{"id": "spain", "display_name": "España", "unlock_level": 1}]}"#,
        )
        .unwrap();
        assert_eq!(
            catalog.validate(3),
            Err(CatalogError::MissingCountry { level: 2 })
        );
    }

    #[test]
    fn out_of_range_level_is_reported() {
        let catalog = Catalog::from_json(
            r#"{"countries": [{"id": "mars", "display_name": "Marte", "unlock_level": 11}]}"#,
        )
        .unwrap();
        assert!(matches!(
            catalog.validate(10),
            Err(CatalogError::LevelOutOfRange { level: 11, .. })
        ));
    }
}
