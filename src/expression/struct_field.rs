//! Struct field access (`spec.md` §3 "Struct field"); grounded on
//! `original_source/expression/struct.py`'s single `struct.field` call.
//! A null struct in a row yields null in that row — the engine's own
//! `struct().field` semantics, nothing bespoke here.

use polars::prelude::*;

pub fn struct_field(r#struct: Expr, field: &str) -> Expr {
    r#struct.struct_().field_by_name(field)
}
