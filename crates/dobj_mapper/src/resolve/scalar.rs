use alloc::format;
use alloc::string::{String, ToString};

use serde_json::Number;

use super::FieldType;
use crate::error::{Error, Result};
use crate::hydrate::Resolved;
use crate::info::{ScalarKind, TypeTag};
use crate::record::value_kind;
use crate::ser::{FieldValue, SerializeOptions};
use crate::Value;

/// Leniently converts `value` to the scalar `kind`.
///
/// Values of the requested kind pass unchanged, numeric strings become
/// numbers, numbers and booleans become strings, and `0`/`1`,
/// `"true"`/`"false"` become booleans. Returns `None` for values that have
/// no interpretation, including `null`.
///
/// # Examples
///
/// ```
/// use dobj_mapper::info::ScalarKind;
/// use dobj_mapper::resolve::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce(ScalarKind::Int, &json!(" 42 ")), Some(json!(42)));
/// assert_eq!(coerce(ScalarKind::Float, &json!("2.5")), Some(json!(2.5)));
/// assert_eq!(coerce(ScalarKind::String, &json!(7)), Some(json!("7")));
/// assert_eq!(coerce(ScalarKind::Bool, &json!("0")), Some(json!(false)));
/// assert_eq!(coerce(ScalarKind::Int, &json!([1])), None);
/// ```
pub fn coerce(kind: ScalarKind, value: &Value) -> Option<Value> {
    match kind {
        ScalarKind::Int => coerce_int(value).map(Value::Number),
        ScalarKind::Float => coerce_float(value)
            .and_then(Number::from_f64)
            .map(Value::Number),
        ScalarKind::String => coerce_string(value).map(Value::String),
        ScalarKind::Bool => coerce_bool(value).map(Value::Bool),
    }
}

fn coerce_int(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.clone()),
        Value::Number(n) => n.as_f64().and_then(integral),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Number::from)
                .or_else(|_| s.parse::<u64>().map(Number::from))
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(integral))
        }
        Value::Bool(b) => Some(Number::from(u8::from(*b))),
        _ => None,
    }
}

fn integral(f: f64) -> Option<Number> {
    (f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64)
        .then(|| Number::from(f as i64))
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

#[cold]
fn zero_fallback(raw: &Value, ty: &str) {
    log::warn!("cannot read {} value as `{ty}`, using the zero value", value_kind(raw));
}

fn unexpected(resolved: &Resolved, ty: &str) -> Error {
    Error::mismatch(format!("expected a `{ty}` value, found {}", resolved.kind()))
}

// -----------------------------------------------------------------------------
// Implementations

macro_rules! impl_int_field {
    ($($ty:ident),* $(,)?) => {$(
        impl FieldType for $ty {
            #[inline]
            fn type_tag() -> TypeTag {
                TypeTag::Scalar(ScalarKind::Int)
            }

            fn from_resolved(resolved: Resolved) -> Result<Self> {
                let raw = match resolved {
                    Resolved::Null | Resolved::Value(Value::Null) => return Ok(0),
                    Resolved::Value(raw) => raw,
                    other => return Err(unexpected(&other, stringify!($ty))),
                };
                let number = coerce_int(&raw);
                let narrowed = number.as_ref().and_then(|n| {
                    n.as_i64()
                        .and_then(|v| $ty::try_from(v).ok())
                        .or_else(|| n.as_u64().and_then(|v| $ty::try_from(v).ok()))
                });
                Ok(narrowed.unwrap_or_else(|| {
                    zero_fallback(&raw, stringify!($ty));
                    0
                }))
            }
        }

        impl FieldValue for $ty {
            #[inline]
            fn to_value(&self, _options: SerializeOptions) -> Value {
                Value::from(*self)
            }
        }
    )*};
}

impl_int_field!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float_field {
    ($($ty:ident),* $(,)?) => {$(
        impl FieldType for $ty {
            #[inline]
            fn type_tag() -> TypeTag {
                TypeTag::Scalar(ScalarKind::Float)
            }

            fn from_resolved(resolved: Resolved) -> Result<Self> {
                match resolved {
                    Resolved::Null | Resolved::Value(Value::Null) => Ok(0.0),
                    Resolved::Value(raw) => Ok(coerce_float(&raw).map_or_else(
                        || {
                            zero_fallback(&raw, stringify!($ty));
                            0.0
                        },
                        |f| f as $ty,
                    )),
                    other => Err(unexpected(&other, stringify!($ty))),
                }
            }
        }

        impl FieldValue for $ty {
            #[inline]
            fn to_value(&self, _options: SerializeOptions) -> Value {
                Value::from(*self)
            }
        }
    )*};
}

impl_float_field!(f32, f64);

impl FieldType for String {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Scalar(ScalarKind::String)
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        match resolved {
            Resolved::Null | Resolved::Value(Value::Null) => Ok(String::new()),
            Resolved::Value(Value::String(s)) => Ok(s),
            Resolved::Value(raw) => Ok(coerce_string(&raw).unwrap_or_else(|| {
                zero_fallback(&raw, "String");
                String::new()
            })),
            Resolved::Temporal(dt) => Ok(dt.to_rfc3339()),
            other => Err(unexpected(&other, "String")),
        }
    }
}

impl FieldValue for String {
    #[inline]
    fn to_value(&self, _options: SerializeOptions) -> Value {
        Value::String(self.clone())
    }
}

impl FieldType for bool {
    #[inline]
    fn type_tag() -> TypeTag {
        TypeTag::Scalar(ScalarKind::Bool)
    }

    fn from_resolved(resolved: Resolved) -> Result<Self> {
        match resolved {
            Resolved::Null | Resolved::Value(Value::Null) => Ok(false),
            Resolved::Value(raw) => Ok(coerce_bool(&raw).unwrap_or_else(|| {
                zero_fallback(&raw, "bool");
                false
            })),
            other => Err(unexpected(&other, "bool")),
        }
    }
}

impl FieldValue for bool {
    #[inline]
    fn to_value(&self, _options: SerializeOptions) -> Value {
        Value::Bool(*self)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FieldType, coerce};
    use crate::hydrate::Resolved;
    use crate::info::ScalarKind;

    fn resolve<T: FieldType>(raw: serde_json::Value) -> T {
        T::from_resolved(Resolved::Value(raw)).unwrap()
    }

    #[test]
    fn ints_are_lenient() {
        assert_eq!(resolve::<i64>(json!(12)), 12);
        assert_eq!(resolve::<i64>(json!("12")), 12);
        assert_eq!(resolve::<i32>(json!(3.0)), 3);
        assert_eq!(resolve::<u8>(json!(true)), 1);
        assert_eq!(resolve::<u64>(json!(u64::MAX)), u64::MAX);
        assert_eq!(coerce(ScalarKind::Int, &json!(-9_223_372_036_854_775_808.0_f64)), Some(json!(i64::MIN)));
        // uninterpretable or out of range: zero
        assert_eq!(resolve::<i64>(json!("twelve")), 0);
        assert_eq!(resolve::<i64>(json!(1.5)), 0);
        assert_eq!(resolve::<i64>(json!(9_223_372_036_854_775_808.0_f64)), 0);
        assert_eq!(resolve::<u8>(json!(300)), 0);
        assert_eq!(resolve::<u32>(json!(-1)), 0);
        assert_eq!(i16::from_resolved(Resolved::Null).unwrap(), 0);
    }

    #[test]
    fn floats_strings_bools() {
        assert_eq!(resolve::<f64>(json!("2.5")), 2.5);
        assert_eq!(resolve::<f32>(json!(4)), 4.0);
        assert_eq!(resolve::<f64>(json!({})), 0.0);

        assert_eq!(resolve::<String>(json!("x")), "x");
        assert_eq!(resolve::<String>(json!(10)), "10");
        assert_eq!(resolve::<String>(json!(false)), "false");
        assert_eq!(resolve::<String>(json!([1])), "");

        assert!(resolve::<bool>(json!(1)));
        assert!(resolve::<bool>(json!("TRUE")));
        assert!(!resolve::<bool>(json!("0")));
        assert!(!resolve::<bool>(json!("maybe")));
    }

    #[test]
    fn coerce_rejects_structures() {
        for kind in [ScalarKind::Int, ScalarKind::Float, ScalarKind::String, ScalarKind::Bool] {
            assert_eq!(coerce(kind, &json!(null)), None);
            assert_eq!(coerce(kind, &json!({"a": 1})), None);
        }
        assert_eq!(coerce(ScalarKind::Int, &json!("-7")), Some(json!(-7)));
    }
}
