//! Comparison, arithmetic, boolean, and leaf expression helpers.
//!
//! Grounded on the teacher's single-match-arm dispatch style; the actual
//! per-operator lowering table is adapted from
//! `original_source/expression/basics.py`'s operator maps.

use super::Expression;
use polars::prelude::*;

/// `log2(x) = ln(x) / ln(2)` — the natural log divided by a literal, not
/// the engine's own `log2` kernel, so edge-case handling of non-positive
/// inputs matches the natural-log path exactly (`spec.md` §4.1).
pub fn log2(value: Expr) -> Expr {
    value.log(std::f64::consts::E) / lit(std::f64::consts::LN_2)
}

/// Empty `and` is `true`, broadcast as a column-shaped literal.
pub fn and(operands: &[Expression]) -> PolarsResult<Expr> {
    if operands.is_empty() {
        return Ok(lit(true));
    }
    let exprs = operands
        .iter()
        .map(Expression::to_polars)
        .collect::<PolarsResult<Vec<_>>>()?;
    Ok(all_horizontal(exprs)?)
}

/// Empty `or` is `false`, broadcast as a column-shaped literal.
pub fn or(operands: &[Expression]) -> PolarsResult<Expr> {
    if operands.is_empty() {
        return Ok(lit(false));
    }
    let exprs = operands
        .iter()
        .map(Expression::to_polars)
        .collect::<PolarsResult<Vec<_>>>()?;
    Ok(any_horizontal(exprs)?)
}

/// Empty `min` is a typed null literal.
pub fn min_horizontal(operands: &[Expression]) -> PolarsResult<Expr> {
    if operands.is_empty() {
        return Ok(lit(NULL));
    }
    let exprs = operands
        .iter()
        .map(Expression::to_polars)
        .collect::<PolarsResult<Vec<_>>>()?;
    polars::prelude::min_horizontal(exprs)
}

/// Empty `max` is a typed null literal.
pub fn max_horizontal(operands: &[Expression]) -> PolarsResult<Expr> {
    if operands.is_empty() {
        return Ok(lit(NULL));
    }
    let exprs = operands
        .iter()
        .map(Expression::to_polars)
        .collect::<PolarsResult<Vec<_>>>()?;
    polars::prelude::max_horizontal(exprs)
}
