//! Type values and sort ordering. Pure data; rendering lives in `flowir-fmt`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type tag carried by a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Null,
    Bool,
    Int64,
    Uint64,
    Float64,
    Duration,
    Time,
    String,
    Bytes,
    Ip,
    Net,
    Regexp,
}

impl PrimitiveType {
    pub fn name(self) -> &'static str {
        use PrimitiveType::*;
        match self {
            Null => "null",
            Bool => "bool",
            Int64 => "int64",
            Uint64 => "uint64",
            Float64 => "float64",
            Duration => "duration",
            Time => "time",
            String => "string",
            Bytes => "bytes",
            Ip => "ip",
            Net => "net",
            Regexp => "regexp",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
}

/// A type used as a first-class value (`type<...>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Primitive { name: String },
    Record { fields: Vec<TypeField> },
    Array { elem: Box<Type> },
    Set { elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    Union { types: Vec<Type> },
    Enum { symbols: Vec<String> },
    Error { inner: Box<Type> },
    /// Reference to a previously named type.
    Named { name: String },
    /// Binds `name` to `ty`.
    Def { name: String, ty: Box<Type> },
}

impl Type {
    pub fn primitive(name: impl Into<String>) -> Self {
        Type::Primitive { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Asc => f.write_str("asc"),
            Order::Desc => f.write_str("desc"),
        }
    }
}

/// Sort layout of stored data: an order over one or more key paths.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub order: Order,
    #[serde(default)]
    pub keys: Vec<Vec<String>>,
}

impl Layout {
    pub fn new(order: Order, keys: Vec<Vec<String>>) -> Self {
        Self { order, keys }
    }

    /// A layout with no keys carries no ordering information.
    pub fn is_nil(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(&key.join("."))?;
        }
        write!(f, ":{}", self.order)
    }
}
