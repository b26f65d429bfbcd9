//! Conversions between [`Value`] and `serde_json::Value`.

use indexmap::IndexMap;
use serde_json::{Map, Number};

use crate::{Kind, Tree, Value, ValueError};

/// Largest magnitude below which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            // serde_json numbers are always finite, so as_f64 cannot fail
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<serde_json::Value> for Tree {
    fn from(value: serde_json::Value) -> Self {
        Tree::new(Value::from(value))
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(number(*n)?),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(serde_json::Value::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(pairs) => {
                let mut resolved = IndexMap::with_capacity(pairs.len());
                for (k, v) in pairs {
                    resolved.shift_remove(k.as_str());
                    resolved.insert(k.as_str(), v);
                }
                let mut map = Map::with_capacity(resolved.len());
                for (k, v) in resolved {
                    map.insert(k.to_owned(), serde_json::Value::try_from(v)?);
                }
                serde_json::Value::Object(map)
            }
            Value::Element(_) => {
                return Err(ValueError::TypeMismatch {
                    expected: Kind::Object,
                    found: Kind::Element,
                })
            }
        })
    }
}

impl TryFrom<&Tree> for serde_json::Value {
    type Error = ValueError;

    fn try_from(tree: &Tree) -> Result<Self, Self::Error> {
        serde_json::Value::try_from(&tree.to_value())
    }
}

fn number(n: f64) -> Result<Number, ValueError> {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER && !(n == 0.0 && n.is_sign_negative()) {
        return Ok(Number::from(n as i64));
    }
    Number::from_f64(n).ok_or(ValueError::NonFinite(n))
}
