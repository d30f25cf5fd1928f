//! Destination collections that carry their element type
//!
//! A list-shaped copy creates new destination elements before any of them
//! exist, so the destination collection has to say how to make one. A
//! [`RecordList`] carries a [`Witness`] (a fallible no-argument constructor);
//! a [`MapList`] carries the declared value type of the mappings it holds.
//! Collections built without that evidence are rejected with
//! [`Error::ElementTypeUnknown`] and [`Error::ValueTypeUnknown`].
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use crate::catalog::SlotMap;
use crate::error::{Error, Result};
use crate::types::ValueKind;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// No-argument constructor for a destination element type
pub struct Witness<T> {
    construct: Arc<dyn Fn() -> anyhow::Result<T> + Send + Sync>,
}

impl<T> Witness<T> {
    pub fn new<F>(construct: F) -> Self
    where
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self {
            construct: Arc::new(construct),
        }
    }

    pub fn instantiate(&self) -> anyhow::Result<T> {
        (self.construct)()
    }
}

impl<T: Default> Witness<T> {
    /// Witness backed by `T::default()`
    pub fn of_default() -> Self {
        Self::new(|| Ok(T::default()))
    }
}

impl<T> Clone for Witness<T> {
    fn clone(&self) -> Self {
        Self {
            construct: Arc::clone(&self.construct),
        }
    }
}

impl<T> fmt::Debug for Witness<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Witness<{}>", std::any::type_name::<T>())
    }
}

/// Destination list of records
pub struct RecordList<T> {
    items: Vec<T>,
    witness: Option<Witness<T>>,
}

impl<T> RecordList<T> {
    /// List without an element type witness; list copies into it fail
    pub fn untyped() -> Self {
        Self {
            items: Vec::new(),
            witness: None,
        }
    }

    pub fn with_witness(witness: Witness<T>) -> Self {
        Self {
            items: Vec::new(),
            witness: Some(witness),
        }
    }

    pub fn with_constructor<F>(construct: F) -> Self
    where
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Self::with_witness(Witness::new(construct))
    }

    /// Recover the element type of this list
    pub fn element_type(&self) -> Result<&Witness<T>> {
        self.witness.as_ref().ok_or_else(|| Error::ElementTypeUnknown {
            collection: std::any::type_name::<T>().to_string(),
        })
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub(crate) fn append(&mut self, staged: Vec<T>) {
        self.items.extend(staged);
    }
}

impl<T: Default> RecordList<T> {
    /// List whose elements are built with `T::default()`
    pub fn with_default() -> Self {
        Self::with_witness(Witness::of_default())
    }
}

impl<T> Deref for RecordList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T: fmt::Debug> fmt::Debug for RecordList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordList")
            .field("items", &self.items)
            .field("witness", &self.witness)
            .finish()
    }
}

/// Destination list of mappings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapList {
    items: Vec<SlotMap>,
    value_type: Option<ValueKind>,
}

impl MapList {
    /// List without a value type witness
    pub fn untyped() -> Self {
        Self::default()
    }

    /// List of mappings whose values are declared as `value_type`
    pub fn of(value_type: ValueKind) -> Self {
        Self {
            items: Vec::new(),
            value_type: Some(value_type),
        }
    }

    /// Recover the value type of the mappings in this list
    pub fn value_type(&self) -> Result<ValueKind> {
        self.value_type.ok_or(Error::ValueTypeUnknown)
    }

    /// Fresh element: typed when the witness is present, untyped otherwise
    pub fn new_map(&self) -> SlotMap {
        SlotMap::typed(self.value_type.unwrap_or(ValueKind::Any))
    }

    pub fn push(&mut self, item: SlotMap) {
        self.items.push(item);
    }

    pub fn into_vec(self) -> Vec<SlotMap> {
        self.items
    }

    pub(crate) fn append(&mut self, staged: Vec<SlotMap>) {
        self.items.extend(staged);
    }
}

impl Deref for MapList {
    type Target = [SlotMap];

    fn deref(&self) -> &[SlotMap] {
        &self.items
    }
}
