//! Copies whose source is a mapping
//!
//! List forms take their source catalog from the first mapping in the list.
//! Keys that only later mappings carry are not copied, and a first mapping
//! without keys leaves nothing to resolve, so the call returns without
//! touching the destination.
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use super::{transfer, CopyReport, MapSlots, MapSlotsMut, RecordSlotsMut};
use crate::catalog::{Catalog, Record, SlotMap};
use crate::error::{Error, Result};
use crate::resolve::{resolve, CopyOptions, TieBreaker};
use crate::witness::{MapList, RecordList};

/// Copy a mapping's entries into a record's fields
pub fn copy_map_to_record<T: Record>(
    source: &SlotMap,
    target: &mut T,
    options: &CopyOptions,
) -> Result<CopyReport> {
    let table = resolve(Catalog::of_map(source), Catalog::of_record::<T>(), options);
    let mut report = CopyReport::new();
    transfer(&table, &MapSlots(source), &mut RecordSlotsMut(target), None, &mut report)?;
    Ok(report)
}

/// [`copy_map_to_record`] with identical names only
pub fn copy_map_to_record_default<T: Record>(
    source: &SlotMap,
    target: &mut T,
) -> Result<CopyReport> {
    copy_map_to_record(source, target, &CopyOptions::default())
}

/// Copy each mapping into a new record appended to `target`
pub fn copy_map_list_to_record_list<T: Record>(
    source: &[SlotMap],
    target: &mut RecordList<T>,
    options: &CopyOptions,
) -> Result<CopyReport> {
    let Some(first) = source.first().filter(|m| !m.is_empty()) else {
        return Ok(CopyReport::new());
    };
    let _span = tracing::debug_span!(
        "copy_list",
        from = "map",
        to = T::schema().name,
        len = source.len()
    )
    .entered();

    let witness = target.element_type()?.clone();
    let table = resolve(Catalog::of_map(first), Catalog::of_record::<T>(), options);

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
            &MapSlots(item),
            &mut RecordSlotsMut(&mut element),
            Some(index),
            &mut report,
        )?;
        staged.push(element);
    }
    target.append(staged);
    Ok(report)
}

/// [`copy_map_list_to_record_list`] with identical names only
pub fn copy_map_list_to_record_list_default<T: Record>(
    source: &[SlotMap],
    target: &mut RecordList<T>,
) -> Result<CopyReport> {
    copy_map_list_to_record_list(source, target, &CopyOptions::default())
}

/// Copy a mapping's entries into another mapping
///
/// Values are copied as they are, whatever value type `target` declares.
/// With a predicate tie-breaker only keys `target` already has are written;
/// otherwise any resolved name becomes a key.
pub fn copy_map_to_map(
    source: &SlotMap,
    target: &mut SlotMap,
    options: &CopyOptions,
) -> Result<CopyReport> {
    let target_catalog = match options.tie_breaker {
        Some(TieBreaker::Matches(_)) => Catalog::of_map(target),
        _ => Catalog::open(target),
    };
    let table = resolve(Catalog::of_map(source), target_catalog, options);
    let mut report = CopyReport::new();
    let mut slots = MapSlotsMut { map: target, coerce: false };
    transfer(&table, &MapSlots(source), &mut slots, None, &mut report)?;
    Ok(report)
}

/// [`copy_map_to_map`] with identical names only
pub fn copy_map_to_map_default(source: &SlotMap, target: &mut SlotMap) -> Result<CopyReport> {
    copy_map_to_map(source, target, &CopyOptions::default())
}

/// Copy each mapping into a new mapping appended to `target`
///
/// Values are copied as they are, so the list's value type witness is not
/// required; new mappings take it when present.
pub fn copy_map_list_to_map_list(
    source: &[SlotMap],
    target: &mut MapList,
    options: &CopyOptions,
) -> Result<CopyReport> {
    let Some(first) = source.first().filter(|m| !m.is_empty()) else {
        return Ok(CopyReport::new());
    };
    let _span =
        tracing::debug_span!("copy_list", from = "map", to = "map", len = source.len()).entered();

    let table = resolve(Catalog::of_map(first), Catalog::Open(Vec::new()), options);

    let mut report = CopyReport::new();
    let mut staged = Vec::with_capacity(source.len());
    for (index, item) in source.iter().enumerate() {
        let mut element = target.new_map();
        let mut slots = MapSlotsMut {
            map: &mut element,
            coerce: false,
        };
        transfer(&table, &MapSlots(item), &mut slots, Some(index), &mut report)?;
        staged.push(element);
    }
    target.append(staged);
    Ok(report)
}

/// [`copy_map_list_to_map_list`] with identical names only
pub fn copy_map_list_to_map_list_default(
    source: &[SlotMap],
    target: &mut MapList,
) -> Result<CopyReport> {
    copy_map_list_to_map_list(source, target, &CopyOptions::default())
}
