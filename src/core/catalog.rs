//! Unit catalog
//!
//! The catalog is deserialized from a JSON document once, validated once, and
//! then shared read-only by every session. The raw `*Config` structs mirror the
//! document; `Category`/`Unit` are the validated forms the engine works with.

use crate::shared::error::{CatalogError, CatalogResult, ConversionError, ConversionResult};
use crate::shared::types::{CategoryDTO, UnitDTO};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Catalog shipped with the crate
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Process-wide copy of the built-in catalog, loaded on first use
static SHARED_CATALOG: OnceCell<Catalog> = OnceCell::new();

// ============================================================================
// Document schema
// ============================================================================

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    categories: Vec<CategoryConfig>,
}

#[derive(Debug, Deserialize)]
struct CategoryConfig {
    name: String,
    units: Vec<UnitConfig>,
}

#[derive(Debug, Deserialize)]
struct UnitConfig {
    name: String,
    symbol: String,
    factor: f64,
    // Older catalog documents call this field `type`
    #[serde(default, alias = "type")]
    family: Option<String>,
    #[serde(default)]
    offset: Option<f64>,
}

// ============================================================================
// Validated model
// ============================================================================

/// Families of units that need a dedicated converter instead of a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitFamily {
    Temperature,
}

impl UnitFamily {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "temperature" => Some(UnitFamily::Temperature),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnitFamily::Temperature => "temperature",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Unit {
    pub name: String,
    pub symbol: String,
    /// Ratio to the category's base unit; only meaningful for linear units
    pub factor: f64,
    pub family: Option<UnitFamily>,
    /// Reserved for families that need an additive shift
    pub offset: Option<f64>,
}

impl Unit {
    pub fn is_linear(&self) -> bool {
        self.family.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub units: Vec<Unit>,
}

impl Category {
    pub fn find_unit(&self, symbol: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.symbol == symbol)
    }

    /// Conversion needs somewhere to convert from and to
    pub fn is_convertible(&self) -> bool {
        self.units.len() >= 2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Parse and validate a catalog document
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        let catalog = Self::validate(document)?;
        tracing::info!(categories = catalog.categories.len(), "unit catalog loaded");
        Ok(catalog)
    }

    /// Read a catalog document from disk
    pub async fn load_from_file(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CatalogError::Io(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// The catalog embedded in the crate
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Shared, immutable built-in catalog. Loaded once; later calls reuse it.
    pub fn shared() -> CatalogResult<&'static Catalog> {
        SHARED_CATALOG.get_or_try_init(Self::builtin)
    }

    fn validate(document: CatalogDocument) -> CatalogResult<Self> {
        if document.categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_categories = HashSet::new();
        let mut categories = Vec::with_capacity(document.categories.len());

        for (index, raw) in document.categories.into_iter().enumerate() {
            let name = raw.name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::BlankCategoryName(index));
            }
            if !seen_categories.insert(name.clone()) {
                return Err(CatalogError::DuplicateCategory(name));
            }
            if raw.units.is_empty() {
                return Err(CatalogError::EmptyCategory(name));
            }

            let mut seen_symbols = HashSet::new();
            let mut units = Vec::with_capacity(raw.units.len());
            for unit in raw.units {
                units.push(validate_unit(&name, unit, &mut seen_symbols)?);
            }

            categories.push(Category { name, units });
        }

        Ok(Self { categories })
    }

    pub fn list_categories(&self) -> &[Category] {
        &self.categories
    }

    /// Validation guarantees at least one category
    pub fn first_category(&self) -> &Category {
        &self.categories[0]
    }

    pub fn find_category(&self, name: &str) -> ConversionResult<&Category> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConversionError::UnknownCategory(name.to_string()))
    }

    pub fn find_unit(&self, category: &str, symbol: &str) -> ConversionResult<&Unit> {
        self.find_category(category)?
            .find_unit(symbol)
            .ok_or_else(|| ConversionError::UnknownUnit {
                category: category.to_string(),
                symbol: symbol.to_string(),
            })
    }

    /// Categories and units in display order, shaped for the frontend
    pub fn categories_dto(&self) -> Vec<CategoryDTO> {
        self.categories
            .iter()
            .map(|category| CategoryDTO {
                name: category.name.clone(),
                units: category
                    .units
                    .iter()
                    .map(|unit| UnitDTO {
                        symbol: unit.symbol.clone(),
                        name: unit.name.clone(),
                        family: unit.family.map(|f| f.as_str().to_string()),
                    })
                    .collect(),
            })
            .collect()
    }
}

fn validate_unit(
    category: &str,
    raw: UnitConfig,
    seen_symbols: &mut HashSet<String>,
) -> CatalogResult<Unit> {
    let name = raw.name.trim().to_string();
    let symbol = raw.symbol.trim().to_string();

    for (field, value) in [("name", &name), ("symbol", &symbol)] {
        if value.is_empty() {
            return Err(CatalogError::BlankUnitField {
                category: category.to_string(),
                field: field.to_string(),
            });
        }
    }

    if !seen_symbols.insert(symbol.clone()) {
        return Err(CatalogError::DuplicateSymbol {
            category: category.to_string(),
            symbol,
        });
    }

    let family = match raw.family.as_deref() {
        None => None,
        Some(tag) => Some(UnitFamily::from_tag(tag).ok_or_else(|| CatalogError::UnknownFamily {
            category: category.to_string(),
            symbol: symbol.clone(),
            family: tag.to_string(),
        })?),
    };

    // Family units ignore the factor, so only linear units are checked
    if family.is_none() && !(raw.factor.is_finite() && raw.factor > 0.0) {
        return Err(CatalogError::InvalidFactor {
            category: category.to_string(),
            symbol,
            factor: raw.factor,
        });
    }

    Ok(Unit {
        name,
        symbol,
        factor: raw.factor,
        family,
        offset: raw.offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_json(symbol: &str, factor: f64) -> String {
        format!(r#"{{ "name": "{symbol}", "symbol": "{symbol}", "factor": {factor} }}"#)
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.first_category().name, "Length");
        assert!(catalog.list_categories().len() >= 4);
        assert!(catalog.find_category("Temperature").is_ok());
    }

    #[test]
    fn test_shared_returns_same_instance() {
        let a = Catalog::shared().unwrap();
        let b = Catalog::shared().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_find_unit() {
        let catalog = Catalog::builtin().unwrap();
        let km = catalog.find_unit("Length", "km").unwrap();
        assert_eq!(km.factor, 1000.0);
        assert!(km.is_linear());

        let fahrenheit = catalog.find_unit("Temperature", "°F").unwrap();
        assert_eq!(fahrenheit.family, Some(UnitFamily::Temperature));
    }

    #[test]
    fn test_find_unit_unknown_symbol() {
        let catalog = Catalog::builtin().unwrap();
        let err = catalog.find_unit("Length", "parsec").unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownUnit {
                category: "Length".to_string(),
                symbol: "parsec".to_string(),
            }
        );
    }

    #[test]
    fn test_find_category_unknown() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.find_category("Currency").unwrap_err(),
            ConversionError::UnknownCategory("Currency".to_string())
        );
    }

    #[test]
    fn test_legacy_type_key_is_accepted() {
        let json = r#"{ "categories": [ { "name": "Temperature", "units": [
            { "name": "Celsius", "symbol": "°C", "factor": 1, "type": "temperature" },
            { "name": "Kelvin", "symbol": "K", "factor": 1, "type": "temperature" }
        ] } ] }"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        let kelvin = catalog.find_unit("Temperature", "K").unwrap();
        assert_eq!(kelvin.family, Some(UnitFamily::Temperature));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert_eq!(
            Catalog::from_json_str(r#"{ "categories": [] }"#).unwrap_err(),
            CatalogError::Empty
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Catalog::from_json_str("{ not json").unwrap_err(),
            CatalogError::Parse(_)
        ));
    }

    #[test]
    fn test_rejects_missing_factor() {
        let json = r#"{ "categories": [ { "name": "Length", "units": [
            { "name": "Meter", "symbol": "m" }
        ] } ] }"#;
        assert!(matches!(Catalog::from_json_str(json).unwrap_err(), CatalogError::Parse(_)));
    }

    #[test]
    fn test_rejects_duplicate_symbol() {
        let json = format!(
            r#"{{ "categories": [ {{ "name": "Length", "units": [ {}, {} ] }} ] }}"#,
            unit_json("m", 1.0),
            unit_json("m", 2.0)
        );
        assert_eq!(
            Catalog::from_json_str(&json).unwrap_err(),
            CatalogError::DuplicateSymbol {
                category: "Length".to_string(),
                symbol: "m".to_string(),
            }
        );
    }

    #[test]
    fn test_same_symbol_in_different_categories_is_fine() {
        let json = format!(
            r#"{{ "categories": [
                {{ "name": "Length", "units": [ {} ] }},
                {{ "name": "Other", "units": [ {} ] }}
            ] }}"#,
            unit_json("m", 1.0),
            unit_json("m", 1.0)
        );
        assert!(Catalog::from_json_str(&json).is_ok());
    }

    #[test]
    fn test_rejects_non_positive_factor() {
        for factor in ["0", "-1.5"] {
            let json = format!(
                r#"{{ "categories": [ {{ "name": "Length", "units": [
                    {{ "name": "Meter", "symbol": "m", "factor": {factor} }}
                ] }} ] }}"#
            );
            assert!(matches!(
                Catalog::from_json_str(&json).unwrap_err(),
                CatalogError::InvalidFactor { .. }
            ));
        }
    }

    #[test]
    fn test_family_units_skip_factor_check() {
        let json = r#"{ "categories": [ { "name": "Temperature", "units": [
            { "name": "Celsius", "symbol": "°C", "factor": 0, "family": "temperature" }
        ] } ] }"#;
        assert!(Catalog::from_json_str(json).is_ok());
    }

    #[test]
    fn test_rejects_unknown_family() {
        let json = r#"{ "categories": [ { "name": "Sound", "units": [
            { "name": "Decibel", "symbol": "dB", "factor": 1, "family": "logarithmic" }
        ] } ] }"#;
        assert_eq!(
            Catalog::from_json_str(json).unwrap_err(),
            CatalogError::UnknownFamily {
                category: "Sound".to_string(),
                symbol: "dB".to_string(),
                family: "logarithmic".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_category_and_blank_fields() {
        let dup = format!(
            r#"{{ "categories": [
                {{ "name": "Length", "units": [ {} ] }},
                {{ "name": "Length", "units": [ {} ] }}
            ] }}"#,
            unit_json("m", 1.0),
            unit_json("km", 1000.0)
        );
        assert_eq!(
            Catalog::from_json_str(&dup).unwrap_err(),
            CatalogError::DuplicateCategory("Length".to_string())
        );

        let blank_symbol = r#"{ "categories": [ { "name": "Length", "units": [
            { "name": "Meter", "symbol": "  ", "factor": 1 }
        ] } ] }"#;
        assert!(matches!(
            Catalog::from_json_str(blank_symbol).unwrap_err(),
            CatalogError::BlankUnitField { field, .. } if field == "symbol"
        ));

        let empty_units = r#"{ "categories": [ { "name": "Length", "units": [] } ] }"#;
        assert_eq!(
            Catalog::from_json_str(empty_units).unwrap_err(),
            CatalogError::EmptyCategory("Length".to_string())
        );
    }

    #[test]
    fn test_categories_dto_preserves_order() {
        let catalog = Catalog::builtin().unwrap();
        let dto = catalog.categories_dto();
        assert_eq!(dto.len(), catalog.list_categories().len());
        assert_eq!(dto[0].units[0].symbol, "m");
        let temperature = dto.iter().find(|c| c.name == "Temperature").unwrap();
        assert!(temperature.units.iter().all(|u| u.family.as_deref() == Some("temperature")));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let json = format!(
            r#"{{ "categories": [ {{ "name": "Length", "units": [ {}, {} ] }} ] }}"#,
            unit_json("m", 1.0),
            unit_json("km", 1000.0)
        );
        tokio::fs::write(&path, json).await.unwrap();

        let catalog = Catalog::load_from_file(&path).await.unwrap();
        assert_eq!(catalog.first_category().units.len(), 2);
    }

    #[tokio::test]
    async fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load_from_file(dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
