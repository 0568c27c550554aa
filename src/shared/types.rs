use serde::{Deserialize, Serialize};
use ts_rs::TS;

// Rich Unit Data Transfer Object for frontend select boxes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct UnitDTO {
    pub symbol: String,         // e.g. "m", "°F"
    pub name: String,           // e.g. "Meter", "Fahrenheit"
    pub family: Option<String>, // e.g. "temperature"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct CategoryDTO {
    pub name: String,
    pub units: Vec<UnitDTO>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct ConvertUnitsRequest {
    pub category: String,
    pub amount: f64,
    pub from_unit: String,
    pub to_unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct ConvertUnitsResponse {
    pub result: f64,
    pub formatted_result: String,
    pub from_unit: String,
    pub to_unit: String,
}

/// Everything a converter view needs to render itself in one payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
pub struct SessionSnapshot {
    pub category: String,
    pub from_unit: Option<String>,
    pub to_unit: Option<String>,
    pub input_value: f64,
    pub raw_output: Option<f64>,
    pub display_output: Option<String>,
    /// Why there is no output, if there is none
    pub error: Option<String>,
}
