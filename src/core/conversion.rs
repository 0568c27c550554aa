//! Conversion resolver with enum dispatch
//!
//! Looks up both units, picks a strategy from their family tags and runs it.
//! Strategies are enum variants rather than trait objects; adding a family
//! means adding a variant and a match arm in `Converter::select`.

use crate::core::catalog::{Catalog, Unit, UnitFamily};
use crate::core::format::format_number;
use crate::shared::error::{ConversionError, ConversionResult};
use crate::shared::types::{ConvertUnitsRequest, ConvertUnitsResponse};
use enum_dispatch::enum_dispatch;

pub mod linear;
pub mod temperature;

pub use linear::{convert_linear, LinearConverter};
pub use temperature::{convert_temperature, TemperatureConverter, TemperatureScale};

/// Common capability of every conversion strategy
#[enum_dispatch]
pub trait ConversionStrategy {
    fn convert(&self, value: f64, from: &Unit, to: &Unit) -> ConversionResult<f64>;
}

#[enum_dispatch(ConversionStrategy)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Converter {
    Linear(LinearConverter),
    Temperature(TemperatureConverter),
}

impl Converter {
    /// Pick the strategy for a unit pair.
    ///
    /// Both units must be linear or both must belong to the same family.
    /// Anything else means the catalog mixes families within one category.
    pub fn select(from: &Unit, to: &Unit) -> ConversionResult<Self> {
        match (from.family, to.family) {
            (None, None) => Ok(Converter::Linear(LinearConverter)),
            (Some(a), Some(b)) if a == b => Ok(match a {
                UnitFamily::Temperature => Converter::Temperature(TemperatureConverter),
            }),
            _ => Err(ConversionError::IncompatibleUnits {
                from: from.symbol.clone(),
                to: to.symbol.clone(),
            }),
        }
    }
}

/// Convert `value` between two units of the named category
pub fn convert(
    catalog: &Catalog,
    category: &str,
    from_symbol: &str,
    to_symbol: &str,
    value: f64,
) -> ConversionResult<f64> {
    let from = catalog.find_unit(category, from_symbol)?;
    let to = catalog.find_unit(category, to_symbol)?;

    if !value.is_finite() {
        return Err(ConversionError::InvalidInput);
    }

    let result = Converter::select(from, to)?.convert(value, from, to)?;
    if !result.is_finite() {
        return Err(ConversionError::OutOfRange);
    }

    tracing::debug!(
        category,
        from = from_symbol,
        to = to_symbol,
        value,
        result,
        "converted"
    );

    Ok(result)
}

impl Catalog {
    pub fn convert(
        &self,
        category: &str,
        from_symbol: &str,
        to_symbol: &str,
        value: f64,
    ) -> ConversionResult<f64> {
        convert(self, category, from_symbol, to_symbol, value)
    }

    /// One-shot conversion for callers that don't keep a session around
    pub fn convert_request(&self, request: ConvertUnitsRequest) -> ConversionResult<ConvertUnitsResponse> {
        let result = self.convert(&request.category, &request.from_unit, &request.to_unit, request.amount)?;

        Ok(ConvertUnitsResponse {
            result,
            formatted_result: format_number(result),
            from_unit: request.from_unit,
            to_unit: request.to_unit,
        })
    }
}
