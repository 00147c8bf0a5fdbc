//! Export core modules shared by the converter binary.

#[cfg(feature = "excel")]
pub mod excel_core;
