//! Material catalog lookups.
//!
//! The engine only ever reads from a catalog. Persistence, price refreshes
//! and administrative edits belong to whatever owns the catalog.

use serde::{Deserialize, Serialize};

use super::Material;

/// Read-only lookup of active materials by name.
pub trait MaterialCatalog {
    /// Active material with exactly this name.
    fn find(&self, name: &str) -> Option<&Material>;

    /// Active material whose trimmed name matches ignoring ASCII case.
    fn find_ignore_case(&self, name: &str) -> Option<&Material>;
}

/// In-memory catalog keyed by material name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    materials: Vec<Material>,
}

impl Catalog {
    pub const fn new() -> Self {
        Catalog { materials: Vec::new() }
    }

    /// Build a catalog, later entries replacing earlier ones of the same name.
    pub fn from_materials(materials: impl IntoIterator<Item = Material>) -> Self {
        let mut catalog = Catalog::new();
        for material in materials {
            catalog.insert(material);
        }
        catalog
    }

    /// Insert a material, replacing any existing one with the same name.
    pub fn insert(&mut self, material: Material) {
        match self.materials.iter_mut().find(|m| m.name == material.name) {
            Some(existing) => *existing = material,
            None => self.materials.push(material),
        }
    }

    /// Look up a material regardless of its active flag.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialCatalog for Catalog {
    fn find(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.is_active && m.name == name)
    }

    fn find_ignore_case(&self, name: &str) -> Option<&Material> {
        let wanted = name.trim();
        self.materials
            .iter()
            .find(|m| m.is_active && m.name.trim().eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog() -> Catalog {
        Catalog::from_materials([
            Material::new("Bullnose Insulator", "each", dec!(2.46)),
            Material::new("Claw Insulator", "each", dec!(0.69)).inactive(),
            Material::new("Triplex", "each", dec!(45.00)),
        ])
    }

    #[test]
    fn test_exact_lookup() {
        let catalog = catalog();
        assert!(catalog.find("Triplex").is_some());
        assert!(catalog.find("triplex").is_none());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let catalog = catalog();
        let found = catalog.find_ignore_case("  bullnose INSULATOR ").unwrap();
        assert_eq!(found.name, "Bullnose Insulator");
    }

    #[test]
    fn test_inactive_materials_are_hidden() {
        let catalog = catalog();
        assert!(catalog.find("Claw Insulator").is_none());
        assert!(catalog.find_ignore_case("claw insulator").is_none());
        assert!(catalog.get("Claw Insulator").is_some());
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let mut catalog = catalog();
        catalog.insert(Material::new("Triplex", "each", dec!(50.00)));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.find("Triplex").unwrap().default_price, dec!(50.00));
    }

    #[test]
    fn test_serializes_as_array() {
        let catalog = Catalog::from_materials([Material::new("Triplex", "each", dec!(45))]);
        let json = serde_json::to_value(&catalog).unwrap();
        assert!(json.is_array());
        let roundtrip: Catalog = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, catalog);
    }
}
