//! Copies whose source is a record
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use super::{transfer, CopyReport, MapSlotsMut, RecordSlots, RecordSlotsMut};
use crate::catalog::{Catalog, Record, SlotMap};
use crate::error::{Error, Result};
use crate::resolve::{resolve, CopyOptions};
use crate::witness::{MapList, RecordList};

/// Copy a record's fields into another record
pub fn copy_record_to_record<S, T>(
    source: &S,
    target: &mut T,
    options: &CopyOptions,
) -> Result<CopyReport>
where
    S: Record,
    T: Record,
{
    let table = resolve(Catalog::of_record::<S>(), Catalog::of_record::<T>(), options);
    let mut report = CopyReport::new();
    transfer(&table, &RecordSlots(source), &mut RecordSlotsMut(target), None, &mut report)?;
    Ok(report)
}

/// [`copy_record_to_record`] with identical names only
pub fn copy_record_to_record_default<S: Record, T: Record>(
    source: &S,
    target: &mut T,
) -> Result<CopyReport> {
    copy_record_to_record(source, target, &CopyOptions::default())
}

/// Copy each record into a new element appended to `target`
///
/// New elements come from the list's element type witness. Nothing is
/// appended unless every element was built and copied.
pub fn copy_record_list_to_record_list<S, T>(
    source: &[S],
    target: &mut RecordList<T>,
    options: &CopyOptions,
) -> Result<CopyReport>
where
    S: Record,
    T: Record,
{
    if source.is_empty() {
        return Ok(CopyReport::new());
    }
    let _span = tracing::debug_span!(
        "copy_list",
        from = S::schema().name,
        to = T::schema().name,
        len = source.len()
    )
    .entered();

    let witness = target.element_type()?.clone();
    let table = resolve(Catalog::of_record::<S>(), Catalog::of_record::<T>(), options);

    let mut report = CopyReport::new();
    let mut staged = Vec::with_capacity(source.len());
    for (index, item) in source.iter().enumerate() {
        let mut element = witness.instantiate().map_err(|err| Error::Instantiation {
            type_name: T::schema().name.to_string(),
            index,
            source: err,
        })?;
        transfer(
            &table,
            &RecordSlots(item),
            &mut RecordSlotsMut(&mut element),
            Some(index),
            &mut report,
        )?;
        staged.push(element);
    }
    target.append(staged);
    Ok(report)
}

/// [`copy_record_list_to_record_list`] with identical names only
pub fn copy_record_list_to_record_list_default<S: Record, T: Record>(
    source: &[S],
    target: &mut RecordList<T>,
) -> Result<CopyReport> {
    copy_record_list_to_record_list(source, target, &CopyOptions::default())
}

/// Copy a record's fields into a mapping
///
/// Values are coerced to the mapping's declared value type; an untyped mapping
/// receives them unchanged.
pub fn copy_record_to_map<S: Record>(
    source: &S,
    target: &mut SlotMap,
    options: &CopyOptions,
) -> Result<CopyReport> {
    let table = resolve(Catalog::of_record::<S>(), Catalog::open(target), options);
    let mut report = CopyReport::new();
    let mut slots = MapSlotsMut { map: target, coerce: true };
    transfer(&table, &RecordSlots(source), &mut slots, None, &mut report)?;
    Ok(report)
}

/// [`copy_record_to_map`] with identical names only
pub fn copy_record_to_map_default<S: Record>(
    source: &S,
    target: &mut SlotMap,
) -> Result<CopyReport> {
    copy_record_to_map(source, target, &CopyOptions::default())
}

/// Copy each record into a new mapping appended to `target`
///
/// The list must declare the value type of its mappings.
pub fn copy_record_list_to_map_list<S: Record>(
    source: &[S],
    target: &mut MapList,
    options: &CopyOptions,
) -> Result<CopyReport> {
    if source.is_empty() {
        return Ok(CopyReport::new());
    }
    let _span = tracing::debug_span!(
        "copy_list",
        from = S::schema().name,
        to = "map",
        len = source.len()
    )
    .entered();

    let value_type = target.value_type()?;
    let table = resolve(Catalog::of_record::<S>(), Catalog::Open(Vec::new()), options);

    let mut report = CopyReport::new();
    let mut staged = Vec::with_capacity(source.len());
    for (index, item) in source.iter().enumerate() {
        let mut element = SlotMap::typed(value_type);
        let mut slots = MapSlotsMut {
            map: &mut element,
            coerce: true,
        };
        transfer(&table, &RecordSlots(item), &mut slots, Some(index), &mut report)?;
        staged.push(element);
    }
    target.append(staged);
    Ok(report)
}

/// [`copy_record_list_to_map_list`] with identical names only
pub fn copy_record_list_to_map_list_default<S: Record>(
    source: &[S],
    target: &mut MapList,
) -> Result<CopyReport> {
    copy_record_list_to_map_list(source, target, &CopyOptions::default())
}
