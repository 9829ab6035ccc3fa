//! Scalar value and column data-type vocabulary shared by the wire format.
//!
//! `Value` is the decoded form of a `const` expression literal; `DataType`
//! is the decoded form of a `schema` column type override on `read_csv`/
//! `read_ndjson`. Neither type ever appears inside the engine itself —
//! both are lowered to `polars` equivalents at the boundary in
//! [`crate::engine::dtype`] and [`crate::expression::basics`].

use polars::prelude::{DataType as PolarsDataType, Expr, LiteralValue};
use serde::{Deserialize, Serialize};

/// A scalar wire value: one of the five primitive kinds the spec allows
/// as an expression constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Value {
    /// Lowers the scalar to a `polars` literal expression.
    pub fn to_polars(&self) -> Expr {
        match self {
            Value::String(s) => Expr::Literal(LiteralValue::String(s.clone())),
            Value::Int(i) => Expr::Literal(LiteralValue::Int64(*i)),
            Value::Float(f) => Expr::Literal(LiteralValue::Float64(*f)),
            Value::Bool(b) => Expr::Literal(LiteralValue::Boolean(*b)),
            Value::Null => Expr::Literal(LiteralValue::Null),
        }
    }
}

/// The recognized named column data types (`spec.md` §3).
///
/// Unknown type names fail to decode rather than silently falling back
/// to a default — serde's own "unknown variant" error on this enum,
/// surfaced through [`crate::error::DecodeError::Malformed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Int,
    Long,
    Float,
    Double,
    String,
    Bool,
}

impl DataType {
    pub fn to_polars(self) -> PolarsDataType {
        match self {
            DataType::Int => PolarsDataType::Int32,
            DataType::Long => PolarsDataType::Int64,
            DataType::Float => PolarsDataType::Float32,
            DataType::Double => PolarsDataType::Float64,
            DataType::String => PolarsDataType::String,
            DataType::Bool => PolarsDataType::Boolean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_maps_to_expected_polars_types() {
        assert_eq!(DataType::Int.to_polars(), PolarsDataType::Int32);
        assert_eq!(DataType::Long.to_polars(), PolarsDataType::Int64);
        assert_eq!(DataType::Double.to_polars(), PolarsDataType::Float64);
        assert_eq!(DataType::Bool.to_polars(), PolarsDataType::Boolean);
    }

    #[test]
    fn value_deserializes_untagged() {
        let v: Value = serde_json::from_str("42").unwrap();
        assert_eq!(v, Value::Int(42));
        let v: Value = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(v, Value::String("hi".into()));
        let v: Value = serde_json::from_str("null").unwrap();
        assert_eq!(v, Value::Null);
    }
}
