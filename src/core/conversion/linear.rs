use super::ConversionStrategy;
use crate::core::catalog::Unit;
use crate::shared::error::ConversionResult;

/// Factor-based conversion through the category's base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinearConverter;

impl ConversionStrategy for LinearConverter {
    fn convert(&self, value: f64, from: &Unit, to: &Unit) -> ConversionResult<f64> {
        Ok(convert_linear(value, from, to))
    }
}

/// `value * from.factor / to.factor`.
///
/// Factors are trusted to share a base; positivity was checked at load time.
pub fn convert_linear(value: f64, from: &Unit, to: &Unit) -> f64 {
    let base_value = value * from.factor;
    base_value / to.factor
}
