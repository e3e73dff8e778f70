use std::io::Read;
use std::path::Path;

use crate::error::DataError;
use crate::models::{DrawRecord, PICK_COUNT};

pub const DEFAULT_DELIMITER: u8 = b';';

/// Parses `draw_id;date;n1..n6`. Trailing columns are ignored.
pub fn parse_record(record: &csv::StringRecord) -> Result<DrawRecord, String> {
    let get = |idx: usize| -> Result<&str, String> {
        record
            .get(idx)
            .map(str::trim)
            .ok_or_else(|| format!("missing field at index {}", idx))
    };

    let raw_id = get(0)?;
    let draw_id = raw_id
        .parse::<u32>()
        .map_err(|_| format!("invalid draw id '{}'", raw_id))?;
    let date = get(1)?.to_string();

    let numbers = (2..2 + PICK_COUNT)
        .map(|idx| {
            let s = get(idx)?;
            s.parse::<u8>()
                .map_err(|_| format!("cannot parse '{}' (index {})", s, idx))
        })
        .collect::<Result<Vec<u8>, String>>()?;

    Ok(DrawRecord {
        draw_id,
        date,
        numbers,
    })
}

/// Reads every row, failing on the first one that cannot be parsed.
pub fn read_records_from<R: Read>(reader: R, delimiter: u8) -> Result<Vec<DrawRecord>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        // header is line 1
        let line = i as u64 + 2;
        let row = row.map_err(|e| DataError::Malformed {
            line,
            reason: e.to_string(),
        })?;
        if row.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        let record = parse_record(&row).map_err(|reason| DataError::Malformed { line, reason })?;
        records.push(record);
    }
    Ok(records)
}

pub fn read_records(path: &Path, delimiter: u8) -> Result<Vec<DrawRecord>, DataError> {
    let file = std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    let records = read_records_from(file, delimiter)?;
    tracing::info!(path = %path.display(), rows = records.len(), "dataset read");
    Ok(records)
}
