//! Slot catalogs for records and string-keyed mappings
//!
//! A record exposes its copyable slots through the [`Record`] trait: a static
//! [`Schema`] listing every declared instance field, plus read and write
//! accessors keyed by field name. The [`record!`](crate::record) macro derives
//! all of it from a plain struct definition, private fields included. A
//! mapping is a [`SlotMap`]; its slots are its current keys.
//!
//! [`Catalog`] is the name list one side of a copy contributes to name
//! resolution.
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use crate::error::AccessError;
use crate::types::{FieldType, Value, ValueKind};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether a slot accepts writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    ReadWrite,
    ReadOnly,
}

/// One declared field of a record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub ty: FieldType,
    pub access: Access,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            access: Access::ReadWrite,
        }
    }

    pub const fn read_only(mut self) -> Self {
        self.access = Access::ReadOnly;
        self
    }

    pub fn is_writable(&self) -> bool {
        self.access == Access::ReadWrite
    }
}

/// Accessor table of a record type, in declaration order
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.to_string()).collect()
    }
}

/// A structured record whose declared fields can be read and written by name
pub trait Record {
    /// The record type's declared instance fields
    fn schema() -> &'static Schema;

    /// Read a slot; `Ok(None)` means the slot holds no value
    fn read(&self, slot: &str) -> Result<Option<Value>, AccessError>;

    /// Write a value that already has the slot's declared kind
    fn write(&mut self, slot: &str, value: Value) -> Result<(), AccessError>;
}

/// A Rust type that can live in a record slot
pub trait SlotValue: Sized {
    const FIELD_TYPE: FieldType;

    fn to_value(&self) -> Option<Value>;

    /// `None` when `value` is not of this slot's kind
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! slot_value_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl SlotValue for $ty {
                const FIELD_TYPE: FieldType = FieldType::required(ValueKind::$variant);

                fn to_value(&self) -> Option<Value> {
                    Some(Value::$variant(self.clone()))
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

slot_value_scalar! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    char => Char,
    bool => Bool,
    String => Text,
    NaiveDateTime => DateTime,
}

impl<T: SlotValue> SlotValue for Option<T> {
    const FIELD_TYPE: FieldType = FieldType::nullable(T::FIELD_TYPE.kind);

    fn to_value(&self) -> Option<Value> {
        self.as_ref().and_then(T::to_value)
    }

    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }
}

impl SlotValue for Value {
    const FIELD_TYPE: FieldType = FieldType::required(ValueKind::Any);

    fn to_value(&self) -> Option<Value> {
        Some(self.clone())
    }

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

/// Declare a struct and derive its [`Record`] accessor table
///
/// A field marked `#[read_only]` is catalogued with [`Access::ReadOnly`]; the
/// marker is stripped from the emitted struct.
///
/// ```
/// fieldcopy_core::record! {
///     #[derive(Debug, Default)]
///     pub struct Person {
///         name: String,
///         age: Option<i32>,
///         #[read_only]
///         created: String,
///     }
/// }
///
/// use fieldcopy_core::{Access, Record};
/// assert_eq!(Person::schema().names(), vec!["name", "age", "created"]);
/// assert_eq!(Person::schema().field("created").unwrap().access, Access::ReadOnly);
/// ```
#[macro_export]
macro_rules! record {
    (@fields $header:tt $name:ident $done:tt [$($attrs:tt)*] $access:ident ;) => {
        $crate::record!(@emit $header $name $done);
    };
    (@fields $header:tt $name:ident $done:tt [$($attrs:tt)*] $access:ident ;
        #[read_only] $($rest:tt)*
    ) => {
        $crate::record!(@fields $header $name $done [$($attrs)*] ReadOnly ; $($rest)*);
    };
    (@fields $header:tt $name:ident $done:tt [$($attrs:tt)*] $access:ident ;
        #[$field_meta:meta] $($rest:tt)*
    ) => {
        $crate::record!(
            @fields $header $name $done [$($attrs)* #[$field_meta]] $access ; $($rest)*
        );
    };
    (@fields $header:tt $name:ident [$($done:tt)*] [$($attrs:tt)*] $access:ident ;
        $field_vis:vis $field:ident : $ty:ty $(, $($rest:tt)*)?
    ) => {
        $crate::record!(
            @fields $header $name
            [$($done)* { [$($attrs)*] [$field_vis] $field [$ty] $access }]
            [] ReadWrite ; $($($rest)*)?
        );
    };

    (@emit [$($header:tt)*] $name:ident [$(
        { [$($field_attr:tt)*] [$field_vis:vis] $field:ident [$ty:ty] $access:ident }
    )*]) => {
        $($header)* {
            $(
                $($field_attr)*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::catalog::Record for $name {
            fn schema() -> &'static $crate::catalog::Schema {
                static SCHEMA: $crate::catalog::Schema = $crate::catalog::Schema {
                    name: stringify!($name),
                    fields: &[
                        $(
                            $crate::catalog::FieldDescriptor {
                                name: stringify!($field),
                                ty: <$ty as $crate::catalog::SlotValue>::FIELD_TYPE,
                                access: $crate::catalog::Access::$access,
                            },
                        )*
                    ],
                };
                &SCHEMA
            }

            fn read(
                &self,
                slot: &str,
            ) -> ::std::result::Result<
                ::std::option::Option<$crate::types::Value>,
                $crate::error::AccessError,
            > {
                $(
                    if slot == stringify!($field) {
                        return Ok($crate::catalog::SlotValue::to_value(&self.$field));
                    }
                )*
                Err($crate::error::AccessError::UnknownSlot {
                    owner: stringify!($name).to_string(),
                    slot: slot.to_string(),
                })
            }

            fn write(
                &mut self,
                slot: &str,
                value: $crate::types::Value,
            ) -> ::std::result::Result<(), $crate::error::AccessError> {
                $(
                    if slot == stringify!($field) {
                        if $crate::catalog::Access::$access == $crate::catalog::Access::ReadOnly {
                            return Err($crate::error::AccessError::ReadOnly {
                                owner: stringify!($name).to_string(),
                                slot: slot.to_string(),
                            });
                        }
                        let found = value.kind();
                        return match <$ty as $crate::catalog::SlotValue>::from_value(value) {
                            Some(v) => {
                                self.$field = v;
                                Ok(())
                            }
                            None => Err($crate::error::AccessError::TypeMismatch {
                                owner: stringify!($name).to_string(),
                                slot: slot.to_string(),
                                expected: <$ty as $crate::catalog::SlotValue>::FIELD_TYPE.kind,
                                found,
                            }),
                        };
                    }
                )*
                let _ = value;
                Err($crate::error::AccessError::UnknownSlot {
                    owner: stringify!($name).to_string(),
                    slot: slot.to_string(),
                })
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($body:tt)* }
    ) => {
        $crate::record!(@fields [$(#[$meta])* $vis struct $name] $name [] [] ReadWrite ; $($body)*);
    };
}

/// A string-keyed mapping with a declared value type
///
/// Keys iterate in sorted order. The declared type is `ValueKind::Any` for an
/// untyped mapping; values are coerced to it when a record is copied in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotMap {
    entries: BTreeMap<String, Value>,
    value_type: ValueKind,
}

impl Default for SlotMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotMap {
    /// Untyped mapping
    pub fn new() -> Self {
        Self::typed(ValueKind::Any)
    }

    /// Mapping whose values are declared as `value_type`
    pub fn typed(value_type: ValueKind) -> Self {
        Self {
            entries: BTreeMap::new(),
            value_type,
        }
    }

    pub fn value_type(&self) -> ValueKind {
        self.value_type
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build an untyped mapping from a JSON object; `null` and nested values are skipped
    pub fn from_json(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        object
            .iter()
            .filter_map(|(k, v)| Value::from_json(v).map(|v| (k.clone(), v)))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SlotMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SlotMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Slot names one side of a copy contributes to name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Catalog {
    /// Only the listed names exist
    Closed(Vec<String>),
    /// Destination mapping: any name may be written; the listed names are
    /// the keys present when the copy started
    Open(Vec<String>),
}

impl Catalog {
    /// Declared fields of a record type
    pub fn of_record<R: Record>() -> Self {
        Catalog::Closed(R::schema().names())
    }

    /// Key set of a source mapping, snapshotted now
    pub fn of_map(map: &SlotMap) -> Self {
        Catalog::Closed(map.keys().map(str::to_string).collect())
    }

    /// A destination mapping, seeded with its current keys
    pub fn open(map: &SlotMap) -> Self {
        Catalog::Open(map.keys().map(str::to_string).collect())
    }

    pub fn names(&self) -> &[String] {
        match self {
            Catalog::Closed(names) | Catalog::Open(names) => names,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Catalog::Open(_))
    }

    /// Whether `name` may be bound on this side
    pub fn accepts(&self, name: &str) -> bool {
        match self {
            Catalog::Closed(names) => names.iter().any(|n| n == name),
            Catalog::Open(_) => true,
        }
    }

    /// Same kind of catalog with only the names `keep` approves
    pub fn retain(self, keep: impl Fn(&str) -> bool) -> Self {
        match self {
            Catalog::Closed(names) => {
                Catalog::Closed(names.into_iter().filter(|n| keep(n)).collect())
            }
            Catalog::Open(names) => Catalog::Open(names.into_iter().filter(|n| keep(n)).collect()),
        }
    }
}
