//! Dynamically typed values.
//!
//! Records keep their fields in order; two records with the same fields in a
//! different order are different values.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Record(Vec<(String, Value)>),
    /// An in-band failure; flows downstream like any other value.
    Error(String),
}

impl Value {
    pub fn record<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Record(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Parse one JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let json: serde_json::Value = serde_json::from_str(s)?;
        Ok(Value::from(json))
    }

    /// Bytes become a `0x` hex string, errors an `{"error": ...}` object and
    /// non-finite floats `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            Value::Null => J::Null,
            Value::Bool(b) => J::Bool(*b),
            Value::Int(n) => J::Number((*n).into()),
            Value::Uint(n) => J::Number((*n).into()),
            Value::Float(f) => Number::from_f64(*f).map_or(J::Null, J::Number),
            Value::String(s) => J::String(s.clone()),
            Value::Bytes(b) => J::String(hex(b)),
            Value::Array(items) => J::Array(items.iter().map(Value::to_json).collect()),
            Value::Record(fields) => J::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            Value::Error(msg) => {
                let mut m = Map::new();
                m.insert("error".into(), J::String(msg.clone()));
                J::Object(m)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match json {
            J::Null => Value::Null,
            J::Bool(b) => Value::Bool(b),
            J::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::Uint(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            J::String(s) => Value::String(s),
            J::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            J::Object(m) => Value::Record(m.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
        }
    }
}

fn hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(2 + bytes.len() * 2);
    s.push_str("0x");
    for b in bytes {
        use std::fmt::Write as _;
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

fn is_plain_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("{:?}", s))
}

/// Compact ZSON-style text: `{a:{b:1},"c d":[1,2]}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Uint(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => f.write_str(&quoted(s)),
            Value::Bytes(b) => f.write_str(&hex(b)),
            Value::Array(items) => {
                f.write_str("[")?;
                for (k, v) in items.iter().enumerate() {
                    if k > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", v)?;
                }
                f.write_str("]")
            }
            Value::Record(fields) => {
                f.write_str("{")?;
                for (k, (name, v)) in fields.iter().enumerate() {
                    if k > 0 {
                        f.write_str(",")?;
                    }
                    if is_plain_name(name) {
                        f.write_str(name)?;
                    } else {
                        f.write_str(&quoted(name))?;
                    }
                    write!(f, ":{}", v)?;
                }
                f.write_str("}")
            }
            Value::Error(msg) => write!(f, "error({})", quoted(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_order_is_kept() {
        let v = Value::from_json_str(r#"{"z":1,"a":{"b":true},"m":null}"#).unwrap();
        let Value::Record(fields) = &v else {
            panic!("expected record, got {v:?}");
        };
        let names: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(v.to_json().to_string(), r#"{"z":1,"a":{"b":true},"m":null}"#);
    }

    #[test]
    fn numbers() {
        assert_eq!(Value::from_json_str("-3").unwrap(), Value::Int(-3));
        assert_eq!(
            Value::from_json_str("18446744073709551615").unwrap(),
            Value::Uint(u64::MAX)
        );
        assert_eq!(Value::from_json_str("1.5").unwrap(), Value::Float(1.5));
        assert_eq!(Value::Float(f64::INFINITY).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn display_is_compact() {
        let v = Value::record([
            ("a", Value::record([("b", Value::Int(1))])),
            ("c d", Value::Array(vec![Value::String("x".into()), Value::Float(2.0)])),
            ("e", Value::Bytes(vec![0xde, 0xad])),
        ]);
        assert_eq!(v.to_string(), r#"{a:{b:1},"c d":["x",2.0],e:0xdead}"#);
        assert_eq!(Value::Error("boom".into()).to_string(), r#"error("boom")"#);
    }

    #[test]
    fn error_values_serialize_as_objects() {
        let v = Value::Error("unflatten: dup".into());
        assert_eq!(v.to_json().to_string(), r#"{"error":"unflatten: dup"}"#);
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(Value::from_json_str("{").is_err());
    }
}
