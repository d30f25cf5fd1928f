//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! values, mappings and naming rules for property testing.

#![cfg(test)]

use crate::catalog::SlotMap;
use crate::resolve::NamingRules;
use crate::types::Value;
use chrono::{NaiveDate, NaiveDateTime};
use proptest::collection::{btree_map, btree_set};
use proptest::prelude::*;

/// Strategy for generating slot names from a small alphabet so that
/// collisions between source and target names are frequent
pub fn slot_name_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

/// Strategy for generating date-times with second precision
pub fn date_time_strategy() -> impl Strategy<Value = NaiveDateTime> {
    (1970i32..2100, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(year, month, day, hour, minute, second)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(hour, minute, second))
                .unwrap_or_default()
        },
    )
}

/// Strategy for generating scalar values of every kind
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i8>().prop_map(Value::I8),
        any::<i16>().prop_map(Value::I16),
        any::<i32>().prop_map(Value::I32),
        any::<i64>().prop_map(Value::I64),
        (-1.0e6f32..1.0e6).prop_map(Value::F32),
        (-1.0e12f64..1.0e12).prop_map(Value::F64),
        any::<char>().prop_map(Value::Char),
        any::<bool>().prop_map(Value::Bool),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::Text),
        date_time_strategy().prop_map(Value::DateTime),
    ]
}

/// Strategy for generating integer text that fits an `i64`
pub fn integer_text_strategy() -> impl Strategy<Value = (i64, String)> {
    any::<i64>().prop_map(|n| (n, n.to_string()))
}

/// Strategy for generating untyped mappings
pub fn slot_map_strategy() -> impl Strategy<Value = SlotMap> {
    btree_map(slot_name_strategy(), value_strategy(), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Strategy for generating naming rules without a restriction to the
/// explicit mapping
pub fn naming_rules_strategy() -> impl Strategy<Value = NamingRules> {
    (
        btree_set(slot_name_strategy(), 0..3),
        btree_set(slot_name_strategy(), 0..3),
        btree_map(slot_name_strategy(), slot_name_strategy(), 0..3),
        any::<bool>(),
    )
        .prop_map(
            |(ignore_source_fields, ignore_target_fields, explicit_mapping, ignore_same)| {
                NamingRules {
                    ignore_source_fields,
                    ignore_target_fields,
                    explicit_mapping,
                    restrict_to_explicit: false,
                    ignore_same,
                }
            },
        )
}
