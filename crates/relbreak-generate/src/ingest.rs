use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use relbreak_core::{Individual, validate_records};

use crate::errors::SourceError;

/// Read existing records from a headered CSV file.
///
/// Columns are matched case-insensitively: `name` and `address` are
/// required, `id` is optional and defaults to the 1-based row ordinal.
pub fn read_records_csv(path: &Path) -> Result<Vec<Individual>, SourceError> {
    let file = File::open(path)?;
    let records = read_records(file)?;
    debug!(path = %path.display(), records = records.len(), "records ingested");
    Ok(records)
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<Individual>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    };
    let id_col = column("id");
    let name_col = column("name")
        .ok_or_else(|| SourceError::invalid_argument("input csv is missing a 'name' column"))?;
    let address_col = column("address").ok_or_else(|| {
        SourceError::invalid_argument("input csv is missing an 'address' column")
    })?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        let field = |col: usize| row.get(col).unwrap_or_default().to_string();
        let id = id_col
            .map(field)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| (index + 1).to_string());
        records.push(Individual::new(id, field(name_col), field(address_col)));
    }

    validate_records(&records)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_original_tool_layout() {
        let input = "Name,Address\nAda Lovelace,1 Main St\nGrace Hopper,2 Oak Ave\n";
        let records = read_records(input.as_bytes()).expect("read records");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[1].name, "Grace Hopper");
        assert_eq!(records[1].original_address, "2 Oak Ave");
        assert!(records[1].assigned_address.is_none());
    }

    #[test]
    fn keeps_explicit_ids() {
        let input = "id,name,address\nu-9,Ada,1 Main St\nu-3,Grace,2 Oak Ave\n";
        let records = read_records(input.as_bytes()).expect("read records");
        assert_eq!(records[0].id, "u-9");
        assert_eq!(records[1].id, "u-3");
    }

    #[test]
    fn rejects_missing_address_column() {
        let err = read_records("id,name\n1,Ada\n".as_bytes()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_blank_address() {
        let err = read_records("name,address\nAda,\n".as_bytes()).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let input = "id,name,address\n1,Ada,A\n1,Grace,B\n";
        let err = read_records(input.as_bytes()).unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
