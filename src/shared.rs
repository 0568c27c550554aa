pub mod types;
pub mod settings;
pub mod error;


// Re-export the error types for convenience
pub use error::{AppError, AppResult, CatalogError, ConversionError};
