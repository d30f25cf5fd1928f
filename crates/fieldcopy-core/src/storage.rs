//! Domain record to storage row adapters
//!
//! Storage rows are untyped mappings whose column names follow a fixed
//! convention: the identifier columns are `id_` and `ref_id_`, every other
//! column is the field name upper-cased behind an `F_` prefix. Bookkeeping
//! fields never reach storage.
//!
//! The adapters are plain [`CopyOptions`] over the general executors, exposed
//! through [`storage_options`] and [`domain_options`] so callers can extend
//! them.
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use crate::catalog::{Record, SlotMap};
use crate::copy::{
    copy_map_list_to_record_list, copy_map_to_record, copy_record_list_to_map_list,
    copy_record_to_map, CopyReport,
};
use crate::error::Result;
use crate::resolve::{CopyOptions, CopyOptionsBuilder};
use crate::types::ValueKind;
use crate::witness::{MapList, RecordList};

/// Prefix carried by every convention-named storage column
pub const COLUMN_PREFIX: &str = "F_";

/// Fields that are never written to storage
pub const BOOKKEEPING_FIELDS: &[&str] = &["form_data_rev", "serial_version_uid"];

/// Identifier fields and their storage columns
const IDENTIFIERS: &[(&str, &str)] = &[("id", "id_"), ("ref_id", "ref_id_")];

/// Options for domain record -> storage row copies
pub fn storage_options() -> CopyOptionsBuilder {
    CopyOptions::builder()
        .explicit_mapping(IDENTIFIERS.iter().copied())
        .ignore_source(BOOKKEEPING_FIELDS.iter().copied())
        .rename(|name| format!("{}{}", COLUMN_PREFIX, name.to_uppercase()))
}

/// Options for storage row -> domain record copies
pub fn domain_options() -> CopyOptionsBuilder {
    CopyOptions::builder()
        .explicit_mapping(IDENTIFIERS.iter().map(|&(field, column)| (column, field)))
        .rename(|column| {
            column
                .chars()
                .skip(COLUMN_PREFIX.len())
                .collect::<String>()
                .to_lowercase()
        })
}

/// Render a domain record as a storage row
pub fn to_storage_row<R: Record>(record: &R) -> Result<(SlotMap, CopyReport)> {
    let options = storage_options().build()?;
    let mut row = SlotMap::new();
    let report = copy_record_to_map(record, &mut row, &options)?;
    Ok((row, report))
}

/// Fill a domain record from a storage row
pub fn from_storage_row<R: Record>(row: &SlotMap, record: &mut R) -> Result<CopyReport> {
    let options = domain_options().build()?;
    copy_map_to_record(row, record, &options)
}

/// Render domain records as storage rows
pub fn to_storage_rows<R: Record>(records: &[R]) -> Result<(MapList, CopyReport)> {
    let options = storage_options().build()?;
    let mut rows = MapList::of(ValueKind::Any);
    let report = copy_record_list_to_map_list(records, &mut rows, &options)?;
    Ok((rows, report))
}

/// Append one domain record per storage row to `records`
///
/// Column names are taken from the first row.
pub fn from_storage_rows<R: Record>(
    rows: &[SlotMap],
    records: &mut RecordList<R>,
) -> Result<CopyReport> {
    let options = domain_options().build()?;
    copy_map_list_to_record_list(rows, records, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::Value;

    crate::record! {
        #[derive(Debug, Clone, Default, PartialEq)]
        struct Budget {
            id: String,
            ref_id: String,
            mj: Option<i64>,
            kmmc: String,
            form_data_rev: Option<i64>,
        }
    }

    fn budget() -> Budget {
        Budget {
            id: "1".to_string(),
            ref_id: "2".to_string(),
            mj: Some(3),
            kmmc: "rent".to_string(),
            form_data_rev: Some(9),
        }
    }

    #[test]
    fn test_storage_row_columns() {
        let (row, report) = to_storage_row(&budget()).unwrap();
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["F_KMMC", "F_MJ", "id_", "ref_id_"]);
        assert_eq!(row.get("F_MJ"), Some(&Value::I64(3)));
        assert!(report.is_clean());
    }

    #[test]
    fn test_round_trip_drops_bookkeeping() {
        let (row, _) = to_storage_row(&budget()).unwrap();
        let mut restored = Budget::default();
        from_storage_row(&row, &mut restored).unwrap();
        assert_eq!(
            restored,
            Budget {
                form_data_rev: None,
                ..budget()
            }
        );
    }

    #[test]
    fn test_unknown_columns_are_not_bound() {
        let row: SlotMap = [("id_", "1"), ("F_OTHER", "x"), ("F_KMMC", "k")].into_iter().collect();
        let mut record = Budget::default();
        let report = from_storage_row(&row, &mut record).unwrap();
        assert_eq!(record.kmmc, "k");
        assert_eq!(report.copied_targets(), vec!["id", "kmmc"]);
    }

    #[test]
    fn test_storage_options_extend() {
        let options = storage_options().ignore_source(["kmmc"]).build().unwrap();
        let mut row = SlotMap::new();
        copy_record_to_map(&budget(), &mut row, &options).unwrap();
        assert!(!row.contains_key("F_KMMC"));
        assert!(row.contains_key("F_MJ"));
    }

    #[test]
    fn test_list_adapters() {
        let (rows, _) = to_storage_rows(&[budget(), budget()]).unwrap();
        assert_eq!(rows.len(), 2);

        let mut records: RecordList<Budget> = RecordList::untyped();
        let err = from_storage_rows(&rows, &mut records).unwrap_err();
        assert!(matches!(err, Error::ElementTypeUnknown { .. }));

        let mut records: RecordList<Budget> = RecordList::with_default();
        from_storage_rows(&rows, &mut records).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].ref_id, "2");
    }
}
