//! Wire mappings - structural serialization of models
//!
//! A model turns itself into an insertion-ordered [`Mapping`] keyed by wire
//! keys. Field values convert through [`WireValue`]:
//! - sequences convert element by element
//! - nested models convert through their own `to_mapping`
//! - maps convert value by value
//! - primitives pass through unchanged

use std::collections::BTreeMap;

use serde_json::Value;

use crate::schema::FieldSpec;

/// Insertion-ordered key/value structure produced by `to_mapping`
pub type Mapping = serde_json::Map<String, Value>;

/// Capability of models that serialize to a [`Mapping`]
pub trait Serializable {
    fn to_mapping(&self) -> Mapping;

    /// Deterministic pretty-printed rendering (debugging/logging only)
    fn to_text(&self) -> String {
        format!("{:#}", Value::Object(self.to_mapping()))
    }
}

/// Conversion of a single field value into its wire form
pub trait WireValue {
    fn to_wire(&self) -> Value;
}

/// Implement [`WireValue`] for models by recursing into `to_mapping`
macro_rules! impl_wire_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::mapping::WireValue for $ty {
                fn to_wire(&self) -> ::serde_json::Value {
                    ::serde_json::Value::Object($crate::mapping::Serializable::to_mapping(self))
                }
            }
        )+
    };
}
pub(crate) use impl_wire_value;

/// Write one field into `map` under its wire key
///
/// Unset optional fields are left out entirely. Unset required fields
/// (possible only with validation disabled) are written as `null`.
pub fn put_field<T: WireValue + ?Sized>(map: &mut Mapping, field: &FieldSpec, value: Option<&T>) {
    match value {
        Some(v) => {
            map.insert(field.wire_key.to_string(), v.to_wire());
        }
        None if field.required => {
            map.insert(field.wire_key.to_string(), Value::Null);
        }
        None => {}
    }
}

// ─────────────────────────────────────────────────────────────
// Primitives
// ─────────────────────────────────────────────────────────────

impl WireValue for str {
    fn to_wire(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl WireValue for String {
    fn to_wire(&self) -> Value {
        Value::String(self.clone())
    }
}

impl WireValue for bool {
    fn to_wire(&self) -> Value {
        Value::Bool(*self)
    }
}

impl WireValue for i64 {
    fn to_wire(&self) -> Value {
        Value::from(*self)
    }
}

impl WireValue for u64 {
    fn to_wire(&self) -> Value {
        Value::from(*self)
    }
}

impl WireValue for f64 {
    fn to_wire(&self) -> Value {
        // NaN/inf have no JSON form
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

impl WireValue for Value {
    fn to_wire(&self) -> Value {
        self.clone()
    }
}

// ─────────────────────────────────────────────────────────────
// Containers
// ─────────────────────────────────────────────────────────────

impl<T: WireValue + ?Sized> WireValue for &T {
    fn to_wire(&self) -> Value {
        (**self).to_wire()
    }
}

impl<T: WireValue> WireValue for Option<T> {
    fn to_wire(&self) -> Value {
        match self {
            Some(v) => v.to_wire(),
            None => Value::Null,
        }
    }
}

impl<T: WireValue> WireValue for [T] {
    fn to_wire(&self) -> Value {
        Value::Array(self.iter().map(WireValue::to_wire).collect())
    }
}

impl<T: WireValue> WireValue for Vec<T> {
    fn to_wire(&self) -> Value {
        self.as_slice().to_wire()
    }
}

impl<V: WireValue> WireValue for BTreeMap<String, V> {
    fn to_wire(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_wire()))
                .collect(),
        )
    }
}
