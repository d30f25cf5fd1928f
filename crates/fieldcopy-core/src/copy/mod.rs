//! Copy executors
//!
//! Eight operations move values between records and mappings, in single and
//! list form:
//!
//! | source  | destination | single                    | list                               |
//! |---------|-------------|---------------------------|------------------------------------|
//! | record  | record      | [`copy_record_to_record`] | [`copy_record_list_to_record_list`] |
//! | record  | mapping     | [`copy_record_to_map`]    | [`copy_record_list_to_map_list`]    |
//! | mapping | record      | [`copy_map_to_record`]    | [`copy_map_list_to_record_list`]    |
//! | mapping | mapping     | [`copy_map_to_map`]       | [`copy_map_list_to_map_list`]       |
//!
//! Each resolves a [`NameTable`](crate::resolve::NameTable) and walks it,
//! coercing every value to the destination slot's declared type. Mapping to
//! mapping copies are raw: values are never coerced. Every operation has a
//! `*_default` form that copies identical names only.
//!
//! Slot access failures are collected into the returned [`CopyReport`] and the
//! copy carries on. Coercion, element type and instantiation failures abort
//! the call; list copies then leave the destination list as it was.
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

pub mod map;
pub mod record;
pub mod report;


pub use map::{
    copy_map_list_to_map_list, copy_map_list_to_map_list_default, copy_map_list_to_record_list,
    copy_map_list_to_record_list_default, copy_map_to_map, copy_map_to_map_default,
    copy_map_to_record, copy_map_to_record_default,
};
pub use record::{
    copy_record_list_to_map_list, copy_record_list_to_map_list_default,
    copy_record_list_to_record_list, copy_record_list_to_record_list_default, copy_record_to_map,
    copy_record_to_map_default, copy_record_to_record, copy_record_to_record_default,
};
pub use report::{CopyReport, SkippedSlot, SlotEntry};

use crate::catalog::{Record, SlotMap};
use crate::coerce::coerce;
use crate::error::{AccessError, Result};
use crate::resolve::NameTable;
use crate::types::{FieldType, Value};

/// Read side of a copy
pub(crate) trait SlotSource {
    fn read_slot(&self, slot: &str) -> std::result::Result<Option<Value>, AccessError>;
}

/// Write side of a copy
pub(crate) trait SlotTarget {
    /// Declared type to coerce into; `None` writes the value as read
    fn slot_type(&self, slot: &str) -> Option<FieldType>;

    fn write_slot(&mut self, slot: &str, value: Value) -> std::result::Result<(), AccessError>;
}

pub(crate) struct RecordSlots<'a, R>(pub &'a R);

pub(crate) struct RecordSlotsMut<'a, R>(pub &'a mut R);

pub(crate) struct MapSlots<'a>(pub &'a SlotMap);

pub(crate) struct MapSlotsMut<'a> {
    pub map: &'a mut SlotMap,
    pub coerce: bool,
}

impl<R: Record> SlotSource for RecordSlots<'_, R> {
    fn read_slot(&self, slot: &str) -> std::result::Result<Option<Value>, AccessError> {
        self.0.read(slot)
    }
}

impl<R: Record> SlotTarget for RecordSlotsMut<'_, R> {
    fn slot_type(&self, slot: &str) -> Option<FieldType> {
        R::schema().field(slot).map(|f| f.ty)
    }

    fn write_slot(&mut self, slot: &str, value: Value) -> std::result::Result<(), AccessError> {
        let schema = R::schema();
        match schema.field(slot) {
            Some(field) if !field.is_writable() => Err(AccessError::ReadOnly {
                owner: schema.name.to_string(),
                slot: slot.to_string(),
            }),
            Some(_) => self.0.write(slot, value),
            None => Err(AccessError::UnknownSlot {
                owner: schema.name.to_string(),
                slot: slot.to_string(),
            }),
        }
    }
}

impl SlotSource for MapSlots<'_> {
    fn read_slot(&self, slot: &str) -> std::result::Result<Option<Value>, AccessError> {
        Ok(self.0.get(slot).cloned())
    }
}

impl SlotTarget for MapSlotsMut<'_> {
    fn slot_type(&self, _slot: &str) -> Option<FieldType> {
        self.coerce.then(|| FieldType::nullable(self.map.value_type()))
    }

    fn write_slot(&mut self, slot: &str, value: Value) -> std::result::Result<(), AccessError> {
        self.map.insert(slot, value);
        Ok(())
    }
}

/// Move one value per name table entry from `source` into `target`
///
/// Every entry is read and coerced before the first write, so a coercion
/// failure leaves `target` untouched.
pub(crate) fn transfer<S, T>(
    table: &NameTable,
    source: &S,
    target: &mut T,
    element: Option<usize>,
    report: &mut CopyReport,
) -> Result<()>
where
    S: SlotSource,
    T: SlotTarget,
{
    let mut staged = Vec::with_capacity(table.len());
    let mut outcome = CopyReport::new();
    for (target_name, source_name) in table.iter() {
        let value = match source.read_slot(source_name) {
            Ok(value) => value,
            Err(e) => {
                outcome.record_skipped(element, target_name, source_name, e);
                continue;
            }
        };
        let value = match target.slot_type(target_name) {
            Some(ty) => coerce(value, ty, target_name)?,
            None => value,
        };
        match value {
            Some(value) => staged.push((target_name, source_name, value)),
            None => outcome.record_declined(element, target_name, source_name),
        }
    }

    for (target_name, source_name, value) in staged {
        match target.write_slot(target_name, value) {
            Ok(()) => outcome.record_copied(element, target_name, source_name),
            Err(e) => outcome.record_skipped(element, target_name, source_name, e),
        }
    }
    report.merge(outcome);
    Ok(())
}
