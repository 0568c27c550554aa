//! Unit converter engine
//!
//! A data-driven converter: categories and units come from a JSON catalog,
//! linear units convert through factors, and unit families such as temperature
//! get a dedicated converter. `ConversionSession` is what a converter view
//! drives.

pub mod core;
pub mod logging;
pub mod shared;

pub use crate::core::catalog::{Catalog, Category, Unit, UnitFamily};
pub use crate::core::conversion::{
    convert, convert_linear, convert_temperature, ConversionStrategy, Converter, TemperatureScale,
};
pub use crate::core::format::{format_number, format_number_with, FormatOptions};
pub use crate::core::session::{create_session, ConversionSession};
pub use crate::shared::error::{AppError, AppResult, CatalogError, ConversionError};
pub use crate::shared::settings::ConverterSettings;
pub use crate::shared::types::{
    CategoryDTO, ConvertUnitsRequest, ConvertUnitsResponse, SessionSnapshot, UnitDTO,
};
