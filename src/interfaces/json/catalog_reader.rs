use crate::domain::catalog::Catalog;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Loads the static catalog from JSON.
///
/// The document holds `products` (in catalog order) and `categories`. Every
/// record is validated before the catalog is handed out.
pub struct CatalogReader;

impl CatalogReader {
    pub fn from_reader<R: Read>(source: R) -> Result<Catalog> {
        let catalog: Catalog = serde_json::from_reader(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
