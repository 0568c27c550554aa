pub mod catalog;
pub mod conversion;
pub mod format;
pub mod session;
