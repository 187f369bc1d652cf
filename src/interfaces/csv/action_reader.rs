use crate::domain::action::SessionAction;
use crate::error::{Result, StorefrontError};
use std::io::Read;

/// Shopper session script in CSV form: `action, product, size, color, quantity`.
///
/// Cells are trimmed and an empty cell reads as "not given", so
/// `advance, , , ,` and a bare `advance` row mean the same thing. Rows may stop
/// after the last column they need.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// One item per data row. A bad row (unknown action, non-numeric
    /// quantity) becomes an `Err` for that row only and the script goes on.
    pub fn actions(self) -> impl Iterator<Item = Result<SessionAction>> {
        self.reader
            .into_deserialize()
            .map(|row| row.map_err(StorefrontError::from))
    }
}
