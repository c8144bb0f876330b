//! Product record loading from delimited input tables.
//!
//! Records keep their column order so generated documents list properties in
//! the same order as the source table.
use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Column holding the unique product identifier.
pub const ID_COLUMN: &str = "ProductID";
/// Column holding the human-readable product name.
pub const NAME_COLUMN: &str = "ProductName";

/// One row of product data, with fields in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    fields: Vec<(String, String)>,
}

impl ProductRecord {
    /// Build a record from ordered `(column, value)` pairs.
    ///
    /// Fails when the identifier or name column is absent or blank, or when
    /// the identifier could not serve as a file name stem.
    pub fn from_fields(fields: Vec<(String, String)>) -> Result<Self> {
        let record = Self { fields };
        for column in [ID_COLUMN, NAME_COLUMN] {
            match record.get(column) {
                Some(value) if !value.trim().is_empty() => {}
                _ => return Err(anyhow!("missing required field {column}")),
            }
        }
        let id = record.id();
        if id.contains(['/', '\\']) || id == "." || id == ".." {
            return Err(anyhow!("{ID_COLUMN} {id:?} must not contain path separators"));
        }
        Ok(record)
    }

    pub fn id(&self) -> &str {
        self.get(ID_COLUMN).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.get(NAME_COLUMN).unwrap_or_default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }

    /// All fields, identifying columns included.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Fields other than the identifier and name.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields()
            .filter(|(key, _)| *key != ID_COLUMN && *key != NAME_COLUMN)
    }

    /// Render fields as an aligned two-column listing for prompts.
    pub fn to_listing(&self) -> String {
        let width = self.fields.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        self.fields
            .iter()
            .map(|(key, value)| format!("{key:<width$}    {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Load all product records from a CSV file with a header row.
pub fn load_records(path: &Path) -> Result<Vec<ProductRecord>> {
    let file = File::open(path).with_context(|| format!("open input table {}", path.display()))?;
    read_records(BufReader::new(file))
        .with_context(|| format!("read input table {}", path.display()))
}

fn read_records<R: std::io::Read>(reader: R) -> Result<Vec<ProductRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("read header row")?.clone();
    for column in [ID_COLUMN, NAME_COLUMN] {
        if !headers.iter().any(|header| header == column) {
            return Err(anyhow!("input table has no {column} column"));
        }
    }

    let mut records = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        // +2 for 1-indexed rows and the header
        let row_num = row_idx + 2;
        let row = result.with_context(|| format!("parse row {row_num}"))?;
        let fields = headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let value = row.get(idx).unwrap_or_default();
                (header.to_string(), value.to_string())
            })
            .collect();
        let record = ProductRecord::from_fields(fields).with_context(|| format!("row {row_num}"))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "ProductID,ProductName,Voltage,MaxSpeed\n\
                         A-50,Aero Fan,220V,3000 RPM\n\
                         B-10, Blender ,110V,\n";

    #[test]
    fn reads_records_in_order_with_trimmed_values() {
        let records = read_records(TABLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id(), "A-50");
        assert_eq!(records[1].name(), "Blender");
        assert_eq!(records[1].get("MaxSpeed"), Some(""));
    }

    #[test]
    fn attributes_skip_identifying_columns() {
        let records = read_records(TABLE.as_bytes()).unwrap();
        let attributes: Vec<_> = records[0].attributes().collect();
        assert_eq!(
            attributes,
            vec![("Voltage", "220V"), ("MaxSpeed", "3000 RPM")]
        );
    }

    #[test]
    fn short_rows_fill_missing_columns_with_empty_text() {
        let table = "ProductID,ProductName,Voltage\nC-1,Clock\n";
        let records = read_records(table.as_bytes()).unwrap();
        assert_eq!(records[0].get("Voltage"), Some(""));
    }

    #[test]
    fn missing_name_column_is_rejected() {
        let err = read_records("ProductID,Voltage\nA,1\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("ProductName"));
    }

    #[test]
    fn blank_identifier_is_rejected_with_row_number() {
        let err = read_records("ProductID,ProductName\n,Fan\n".as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("row 2"));
    }

    #[test]
    fn identifier_with_path_separator_is_rejected() {
        let err = read_records("ProductID,ProductName\n../escape,Fan\n".as_bytes()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("row 2"));
        assert!(message.contains("path separators"));

        let err = read_records("ProductID,ProductName\nA-1,Fan\nsub\\dir,Lamp\n".as_bytes())
            .unwrap_err();
        assert!(format!("{err:#}").contains("row 3"));
        assert!(read_records("ProductID,ProductName\n..,Fan\n".as_bytes()).is_err());
    }

    #[test]
    fn listing_aligns_values() {
        let records = read_records(TABLE.as_bytes()).unwrap();
        let listing = records[0].to_listing();
        assert!(listing.contains("ProductID      A-50"));
        assert!(listing.contains("Voltage        220V"));
    }
}
