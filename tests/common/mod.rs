use std::io::{Error, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub const CATALOG: &str = "tests/fixtures/catalog.json";
pub const ACTIONS_HEADER: [&str; 5] = ["action", "product", "size", "color", "quantity"];

/// Writes an actions CSV with the standard header followed by `rows`.
pub fn actions_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "{}", ACTIONS_HEADER.join(", ")).unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

/// Generates `rows` add actions cycling through the fixture catalog ids.
pub fn generate_add_actions(path: &Path, rows: usize) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(ACTIONS_HEADER)?;

    for i in 0..rows {
        let product = (i % 10 + 1).to_string();
        wtr.write_record(["add", &product, "", "", "1"])?;
    }

    wtr.flush()?;
    Ok(())
}
