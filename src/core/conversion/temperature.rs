//! Temperature conversion
//!
//! Temperatures are affine, so a single factor can't express them. Every
//! conversion pivots through Celsius. No rounding happens here.

use super::ConversionStrategy;
use crate::core::catalog::Unit;
use crate::shared::error::{ConversionError, ConversionResult};

const KELVIN_OFFSET: f64 = 273.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureScale {
    /// Recognise a scale from a catalog symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "°C" | "C" | "℃" => Some(TemperatureScale::Celsius),
            "°F" | "F" | "℉" => Some(TemperatureScale::Fahrenheit),
            "K" => Some(TemperatureScale::Kelvin),
            _ => None,
        }
    }

    fn of(unit: &Unit) -> ConversionResult<Self> {
        Self::from_symbol(&unit.symbol)
            .ok_or_else(|| ConversionError::UnsupportedTemperatureUnit(unit.symbol.clone()))
    }

    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => value,
            TemperatureScale::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            TemperatureScale::Kelvin => value - KELVIN_OFFSET,
        }
    }

    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            TemperatureScale::Celsius => celsius,
            TemperatureScale::Fahrenheit => (celsius * 9.0 / 5.0) + 32.0,
            TemperatureScale::Kelvin => celsius + KELVIN_OFFSET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemperatureConverter;

impl ConversionStrategy for TemperatureConverter {
    fn convert(&self, value: f64, from: &Unit, to: &Unit) -> ConversionResult<f64> {
        convert_temperature(value, from, to)
    }
}

/// Convert between Celsius, Fahrenheit and Kelvin.
///
/// Fails with `UnsupportedTemperatureUnit` for any other symbol instead of
/// falling back to a factor.
pub fn convert_temperature(value: f64, from: &Unit, to: &Unit) -> ConversionResult<f64> {
    let from_scale = TemperatureScale::of(from)?;
    let to_scale = TemperatureScale::of(to)?;
    Ok(to_scale.from_celsius(from_scale.to_celsius(value)))
}
