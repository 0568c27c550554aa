//! Conversion session
//!
//! Holds what one converter view has selected and recomputes the output
//! after every change. Sessions borrow the catalog read-only, so any number of
//! them can run side by side without sharing state.

use crate::core::catalog::{Catalog, Category, Unit};
use crate::core::conversion::convert;
use crate::core::format::{format_number_with, FormatOptions};
use crate::shared::error::{ConversionError, ConversionResult};
use crate::shared::settings::ConverterSettings;
use crate::shared::types::SessionSnapshot;

/// Input value a fresh session starts with
const DEFAULT_INPUT: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct ConversionSession<'a> {
    catalog: &'a Catalog,
    category: &'a Category,
    from_unit: Option<String>,
    to_unit: Option<String>,
    input_value: f64,
    output: Option<f64>,
    last_error: Option<ConversionError>,
    format: FormatOptions,
}

/// Open a session on the catalog's first category
pub fn create_session(catalog: &Catalog) -> ConversionSession<'_> {
    ConversionSession::new(catalog)
}

impl<'a> ConversionSession<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self::open(catalog, catalog.first_category(), DEFAULT_INPUT, FormatOptions::default())
    }

    /// Open a session using the configured default category, input and formatting
    pub fn with_settings(catalog: &'a Catalog, settings: &ConverterSettings) -> Self {
        let category = match settings.default_category.as_deref() {
            Some(name) => catalog.find_category(name).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "default category not in catalog, using the first one");
                catalog.first_category()
            }),
            None => catalog.first_category(),
        };
        Self::open(catalog, category, settings.default_input, settings.format)
    }

    fn open(catalog: &'a Catalog, category: &'a Category, input_value: f64, format: FormatOptions) -> Self {
        let mut session = Self {
            catalog,
            category,
            from_unit: None,
            to_unit: None,
            input_value,
            output: None,
            last_error: None,
            format,
        };
        session.reset_units();
        session.recompute();
        session
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Switch category and reset both units to its first two.
    ///
    /// An unknown name leaves the session as it was.
    pub fn select_category(&mut self, name: &str) -> ConversionResult<()> {
        self.category = self.catalog.find_category(name)?;
        self.reset_units();
        self.recompute();
        Ok(())
    }

    pub fn select_from_unit(&mut self, symbol: &str) {
        self.from_unit = Some(symbol.to_string());
        self.recompute();
    }

    pub fn select_to_unit(&mut self, symbol: &str) {
        self.to_unit = Some(symbol.to_string());
        self.recompute();
    }

    pub fn set_input_value(&mut self, value: f64) {
        self.input_value = value;
        self.recompute();
    }

    /// Exchange the units. The previous output becomes the input, so the
    /// swap reads as the inverse conversion.
    pub fn swap_units(&mut self) {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
        if let Some(previous) = self.output {
            self.input_value = previous;
        }
        self.recompute();
    }

    fn reset_units(&mut self) {
        if self.category.is_convertible() {
            self.from_unit = Some(self.category.units[0].symbol.clone());
            self.to_unit = Some(self.category.units[1].symbol.clone());
        } else {
            self.from_unit = None;
            self.to_unit = None;
        }
    }

    fn recompute(&mut self) {
        let (Some(from), Some(to)) = (&self.from_unit, &self.to_unit) else {
            self.output = None;
            self.last_error = None;
            return;
        };

        let result = convert(self.catalog, &self.category.name, from, to, self.input_value);
        match result {
            Ok(value) => {
                self.output = Some(value);
                self.last_error = None;
            }
            Err(e) => {
                tracing::debug!(category = %self.category.name, error = %e, "no conversion result");
                self.output = None;
                self.last_error = Some(e);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn category(&self) -> &'a Category {
        self.category
    }

    pub fn available_units(&self) -> &'a [Unit] {
        &self.category.units
    }

    pub fn is_convertible(&self) -> bool {
        self.category.is_convertible()
    }

    pub fn from_unit(&self) -> Option<&str> {
        self.from_unit.as_deref()
    }

    pub fn to_unit(&self) -> Option<&str> {
        self.to_unit.as_deref()
    }

    pub fn input_value(&self) -> f64 {
        self.input_value
    }

    /// Full-precision output, or `None` when there is no result
    pub fn raw_output(&self) -> Option<f64> {
        self.output
    }

    /// Formatted output, or `None` when there is no result
    pub fn display_output(&self) -> Option<String> {
        self.output.map(|v| format_number_with(v, &self.format))
    }

    /// Why the last recomputation produced no result
    pub fn last_error(&self) -> Option<&ConversionError> {
        self.last_error.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            category: self.category.name.clone(),
            from_unit: self.from_unit.clone(),
            to_unit: self.to_unit.clone(),
            input_value: self.input_value,
            raw_output: self.output,
            display_output: self.display_output(),
            error: self.last_error.as_ref().map(|e| e.to_string()),
        }
    }
}
