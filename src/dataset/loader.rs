//! Reading records from comma-separated files

use std::{fs::File, io::Read, path::Path};

use tracing::{info, warn};

use super::record::GameRecord;

/// Records read from one source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedDataset {
    /// Well-formed records, in file order
    pub records: Vec<GameRecord>,
    /// Lines that could not be decoded
    pub skipped: usize,
}

/// Read every record from `reader`, skipping malformed lines.
///
/// Lines are comma-separated without a header row. A bad line is logged and
/// counted but never aborts the read.
pub fn read_records<R: Read>(reader: R) -> LoadedDataset {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut dataset = LoadedDataset::default();
    for row in csv_reader.records() {
        match decode_row(row) {
            Ok(record) => dataset.records.push(record),
            Err((line, err)) => {
                warn!(line, error = %err, "skipping dataset record");
                dataset.skipped += 1;
            }
        }
    }
    dataset
}

/// Decode one csv row, pairing any failure with the file line it starts on
fn decode_row(row: csv::Result<csv::StringRecord>) -> Result<GameRecord, (u64, crate::Error)> {
    match row {
        Ok(row) => {
            let line = row.position().map_or(0, |pos| pos.line());
            let fields: Vec<&str> = row.iter().collect();
            GameRecord::from_fields(&fields, line).map_err(|err| (line, err))
        }
        Err(err) => {
            let line = err.position().map_or(0, |pos| pos.line());
            Err((line, crate::Error::from(err)))
        }
    }
}

/// Load all records from the file at `path`
///
/// # Errors
///
/// `DatasetUnreadable` when the file cannot be opened.
pub fn load_records(path: impl AsRef<Path>) -> crate::Result<LoadedDataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| crate::Error::DatasetUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_records(file);
    info!(
        path = %path.display(),
        records = dataset.records.len(),
        skipped = dataset.skipped,
        "dataset loaded"
    );
    Ok(dataset)
}
