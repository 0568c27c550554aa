//! Error taxonomy for the conversion engine
//!
//! Catalog errors are fatal at startup. Conversion errors are recoverable and
//! the session turns them into "no result". Every variant is serializable so a
//! UI bridge can forward it as-is.

use thiserror::Error;
use serde::Serialize;

/// Problems found while loading or validating a catalog document
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum CatalogError {
    /// The document could not be read
    #[error("Failed to read catalog: {0}")]
    Io(String),

    /// The document is not valid catalog JSON
    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Catalog contains no categories")]
    Empty,

    #[error("Category at position {0} has a blank name")]
    BlankCategoryName(usize),

    #[error("Duplicate category name: {0}")]
    DuplicateCategory(String),

    #[error("Category '{0}' has no units")]
    EmptyCategory(String),

    #[error("Category '{category}' has a unit with a blank {field}")]
    BlankUnitField { category: String, field: String },

    #[error("Duplicate symbol '{symbol}' in category '{category}'")]
    DuplicateSymbol { category: String, symbol: String },

    /// Linear units need a strictly positive, finite factor
    #[error("Unit '{symbol}' in category '{category}' has invalid factor {factor}")]
    InvalidFactor { category: String, symbol: String, factor: f64 },

    #[error("Unit '{symbol}' in category '{category}' has unknown family '{family}'")]
    UnknownFamily { category: String, symbol: String, family: String },
}

/// Failures while converting a value between two units
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum ConversionError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown unit '{symbol}' in category '{category}'")]
    UnknownUnit { category: String, symbol: String },

    /// The two units disagree on family membership, which means the catalog
    /// data is inconsistent
    #[error("Cannot convert between '{from}' and '{to}' (incompatible units)")]
    IncompatibleUnits { from: String, to: String },

    #[error("Unsupported temperature unit: {0}")]
    UnsupportedTemperatureUnit(String),

    #[error("Input value is not a finite number")]
    InvalidInput,

    /// The input was finite but the result overflowed `f64`
    #[error("Result is out of range")]
    OutOfRange,
}

/// Umbrella error for callers that mix loading and converting
#[derive(Error, Debug, Serialize)]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Catalog Error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Conversion Error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Settings Error: {0}")]
    Settings(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Settings(format!("Serialization error: {}", err))
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Parse(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
pub type CatalogResult<T> = Result<T, CatalogError>;
pub type ConversionResult<T> = Result<T, ConversionError>;
