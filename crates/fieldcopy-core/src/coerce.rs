//! Scalar type coercion
//!
//! [`coerce`] converts one value into the declared type of a destination
//! slot. The decision is a lookup in a small table keyed by the
//! (source kind, target kind) pair, see [`conversion`]:
//!
//! - the value already satisfies the target kind: it passes through unchanged
//! - the target is text: the value's `Display` form is used
//! - the value is text and the target is a number, char or bool: the text is
//!   parsed with the target's grammar, and a parse failure is an error
//! - anything else declines, leaving the destination slot untouched
//!
//! Text that is neither `"true"` nor `"false"` (in any case) declines when the
//! target is boolean. Text is never parsed into a date-time.
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::types::{FieldType, Value, ValueKind};
use std::str::FromStr;

/// Outcome of the (source kind, target kind) dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// Value is stored as is
    Identity,
    /// Value is rendered through `Display`
    Stringify,
    /// Text is parsed into the target kind
    Parse,
    /// No conversion exists; the slot is left untouched
    Decline,
}

/// Look up how a value of `from` reaches a slot of kind `to`
pub fn conversion(from: ValueKind, to: ValueKind) -> Conversion {
    if from.satisfies(to) {
        return Conversion::Identity;
    }
    match (from, to) {
        (_, ValueKind::Text) => Conversion::Stringify,
        (ValueKind::Text, to) if to.is_integer() || to.is_float() => Conversion::Parse,
        (ValueKind::Text, ValueKind::Char | ValueKind::Bool) => Conversion::Parse,
        _ => Conversion::Decline,
    }
}

/// Convert `value` into the declared type of the slot named `slot`
///
/// Returns `Ok(None)` when there is nothing to write: the value is absent or
/// no conversion exists. `slot` is only used for error reporting.
pub fn coerce(value: Option<Value>, target: FieldType, slot: &str) -> Result<Option<Value>> {
    let Some(value) = value else {
        return Ok(None);
    };
    let to = target.normalized();
    match conversion(value.kind(), to) {
        Conversion::Identity => Ok(Some(value)),
        Conversion::Stringify => Ok(Some(Value::Text(value.to_string()))),
        Conversion::Parse => match value {
            Value::Text(text) => parse_text(&text, to, slot),
            other => Ok(decline(&other, to, slot)),
        },
        Conversion::Decline => Ok(decline(&value, to, slot)),
    }
}

fn decline(value: &Value, to: ValueKind, slot: &str) -> Option<Value> {
    log::trace!("No conversion from {} to {} for `{}`", value.kind(), to, slot);
    None
}

/// Parse text using the grammar of the target kind
fn parse_text(text: &str, to: ValueKind, slot: &str) -> Result<Option<Value>> {
    let value = match to {
        ValueKind::I8 => parse_number(text, to, slot, Value::I8)?,
        ValueKind::I16 => parse_number(text, to, slot, Value::I16)?,
        ValueKind::I32 => parse_number(text, to, slot, Value::I32)?,
        ValueKind::I64 => parse_number(text, to, slot, Value::I64)?,
        ValueKind::F32 => parse_number(text, to, slot, Value::F32)?,
        ValueKind::F64 => parse_number(text, to, slot, Value::F64)?,
        ValueKind::Char => {
            let first = text.chars().next().ok_or_else(|| parse_error(text, to, slot))?;
            Value::Char(first)
        }
        ValueKind::Bool => {
            if text.eq_ignore_ascii_case("true") {
                Value::Bool(true)
            } else if text.eq_ignore_ascii_case("false") {
                Value::Bool(false)
            } else {
                return Ok(decline(&Value::Text(text.to_string()), to, slot));
            }
        }
        _ => return Ok(decline(&Value::Text(text.to_string()), to, slot)),
    };
    Ok(Some(value))
}

fn parse_number<T: FromStr>(
    text: &str,
    to: ValueKind,
    slot: &str,
    wrap: fn(T) -> Value,
) -> Result<Value> {
    text.parse::<T>()
        .map(wrap)
        .map_err(|_| parse_error(text, to, slot))
}

fn parse_error(text: &str, to: ValueKind, slot: &str) -> Error {
    Error::Coercion {
        from: ValueKind::Text,
        to,
        value: text.to_string(),
        slot: slot.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn to(kind: ValueKind) -> FieldType {
        FieldType::required(kind)
    }

    #[test]
    fn test_absent_value_yields_nothing() {
        assert_eq!(coerce(None, to(ValueKind::I32), "age").unwrap(), None);
    }

    #[test]
    fn test_identity() {
        let result = coerce(Some(Value::I32(5)), to(ValueKind::I32), "age").unwrap();
        assert_eq!(result, Some(Value::I32(5)));

        let result =
            coerce(Some(Value::I32(5)), FieldType::nullable(ValueKind::I32), "age").unwrap();
        assert_eq!(result, Some(Value::I32(5)));
    }

    #[test]
    fn test_any_target_accepts_everything() {
        let result = coerce(Some(Value::F64(1.5)), FieldType::any(), "x").unwrap();
        assert_eq!(result, Some(Value::F64(1.5)));
    }

    #[test]
    fn test_text_to_i64() {
        let result = coerce(Some("42".into()), to(ValueKind::I64), "id").unwrap();
        assert_eq!(result, Some(Value::I64(42)));
    }

    #[test]
    fn test_integer_to_text() {
        let result = coerce(Some(Value::I32(42)), to(ValueKind::Text), "id").unwrap();
        assert_eq!(result, Some(Value::Text("42".to_string())));
    }

    #[test]
    fn test_date_time_to_text() {
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(1, 2, 3)
            .unwrap();
        let result = coerce(Some(Value::DateTime(dt)), to(ValueKind::Text), "birth").unwrap();
        assert_eq!(result, Some(Value::Text("2000-01-01 01:02:03".to_string())));
    }

    #[test]
    fn test_text_to_bool_literals() {
        let t = coerce(Some("true".into()), to(ValueKind::Bool), "flag").unwrap();
        assert_eq!(t, Some(Value::Bool(true)));
        let f = coerce(Some("FaLsE".into()), to(ValueKind::Bool), "flag").unwrap();
        assert_eq!(f, Some(Value::Bool(false)));
    }

    #[test]
    fn test_text_to_bool_other_text_declines() {
        // Numeric text is not read as a positivity test.
        assert_eq!(coerce(Some("1".into()), to(ValueKind::Bool), "flag").unwrap(), None);
        assert_eq!(coerce(Some("yes".into()), to(ValueKind::Bool), "flag").unwrap(), None);
        assert_eq!(coerce(Some("-2.5".into()), to(ValueKind::Bool), "flag").unwrap(), None);
    }

    #[test]
    fn test_text_to_char_takes_first() {
        let result = coerce(Some("abc".into()), to(ValueKind::Char), "initial").unwrap();
        assert_eq!(result, Some(Value::Char('a')));
    }

    #[test]
    fn test_empty_text_to_char_fails() {
        let err = coerce(Some("".into()), to(ValueKind::Char), "initial").unwrap_err();
        assert!(matches!(err, Error::Coercion { to: ValueKind::Char, .. }));
    }

    #[test]
    fn test_bad_number_is_an_error() {
        let err = coerce(Some("abc".into()), to(ValueKind::I32), "age").unwrap_err();
        match err {
            Error::Coercion { from, to, value, slot } => {
                assert_eq!(from, ValueKind::Text);
                assert_eq!(to, ValueKind::I32);
                assert_eq!(value, "abc");
                assert_eq!(slot, "age");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        assert!(coerce(Some("300".into()), to(ValueKind::I8), "b").is_err());
    }

    #[test]
    fn test_text_to_float() {
        let result = coerce(Some("1.75".into()), to(ValueKind::F64), "height").unwrap();
        assert_eq!(result, Some(Value::F64(1.75)));
    }

    #[test]
    fn test_numeric_kinds_do_not_convert_into_each_other() {
        assert_eq!(coerce(Some(Value::I32(1)), to(ValueKind::I64), "n").unwrap(), None);
        assert_eq!(coerce(Some(Value::I64(1)), to(ValueKind::I32), "n").unwrap(), None);
        assert_eq!(coerce(Some(Value::Bool(true)), to(ValueKind::I32), "n").unwrap(), None);
    }

    #[test]
    fn test_text_to_date_time_declines() {
        let result = coerce(Some("2000-01-01 01:02:03".into()), to(ValueKind::DateTime), "birth");
        assert_eq!(result.unwrap(), None);
    }

    #[test]
    fn test_conversion_table() {
        assert_eq!(conversion(ValueKind::Text, ValueKind::Text), Conversion::Identity);
        assert_eq!(conversion(ValueKind::Bool, ValueKind::Text), Conversion::Stringify);
        assert_eq!(conversion(ValueKind::Text, ValueKind::F32), Conversion::Parse);
        assert_eq!(conversion(ValueKind::Text, ValueKind::DateTime), Conversion::Decline);
        assert_eq!(conversion(ValueKind::Char, ValueKind::I8), Conversion::Decline);
    }
}
