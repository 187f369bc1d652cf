//! Input and output formats: the JSON catalog, CSV session scripts and CSV
//! listings.

pub mod csv;
pub mod json;
