//! String operators (`spec.md` §3 "String").
//!
//! Ported operator-for-operator from `original_source/expression/string.py`;
//! `substring`'s `length`/`end` mutual-exclusion and bounds checks are
//! raised here as `PolarsError::ComputeError` rather than threaded back
//! through `StructuralError` — expression nodes are not given a step
//! index/tag to attribute a `StructuralError` to, so the violation
//! surfaces through `WorkflowError::Engine` at plan-construction time
//! instead of `WorkflowError::Structural`.

use super::Expression;
use polars::prelude::*;

pub fn str_join(operands: &[Expression], delimiter: Option<&str>) -> PolarsResult<Expr> {
    let exprs = operands
        .iter()
        .map(Expression::to_polars)
        .collect::<PolarsResult<Vec<_>>>()?;
    Ok(concat_str(exprs, delimiter.unwrap_or(""), false))
}

pub fn to_upper(value: Expr) -> Expr {
    value.str().to_uppercase()
}

pub fn to_lower(value: Expr) -> Expr {
    value.str().to_lowercase()
}

pub fn str_len(value: Expr) -> Expr {
    value.str().len_chars()
}

pub fn substring(value: Expr, start: Expr, length: Option<i64>, end: Option<i64>) -> PolarsResult<Expr> {
    if length.is_some() && end.is_some() {
        return Err(PolarsError::ComputeError(
            "substring cannot have both 'length' and 'end' set".into(),
        ));
    }
    if let Some(length) = length {
        if length < 0 {
            return Err(PolarsError::ComputeError(
                "substring 'length' cannot be negative".into(),
            ));
        }
    }

    let length_expr: Expr = match (length, end) {
        (Some(length), None) => lit(length),
        (None, Some(end)) => {
            // `end < start` can only be checked here when `start` is a
            // literal; non-literal `start` defers the check to the
            // engine at materialization, per §4.1's "semantic type
            // mismatches are deferred to engine execution."
            if let Expr::Literal(LiteralValue::Int64(start_value)) = &start {
                if end < *start_value {
                    return Err(PolarsError::ComputeError(
                        format!("substring 'end' ({end}) cannot be less than 'start' ({start_value})").into(),
                    ));
                }
            }
            lit(end) - start.clone()
        }
        (None, None) => lit(i64::MAX),
    };

    Ok(value.str().slice(start, length_expr))
}

pub fn str_replace(
    value: Expr,
    pattern: Expr,
    replacement: Expr,
    replace_all: bool,
    literal: bool,
) -> Expr {
    if replace_all {
        value.str().replace_all(pattern, replacement, literal)
    } else {
        value.str().replace(pattern, replacement, literal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_rejects_both_length_and_end() {
        let err = substring(lit("hi"), lit(0i64), Some(1), Some(2)).unwrap_err();
        assert!(matches!(err, PolarsError::ComputeError(_)));
    }

    #[test]
    fn substring_rejects_negative_length() {
        let err = substring(lit("hi"), lit(0i64), Some(-1), None).unwrap_err();
        assert!(matches!(err, PolarsError::ComputeError(_)));
    }

    #[test]
    fn substring_rejects_end_before_literal_start() {
        let err = substring(lit("hi"), lit(5i64), None, Some(1)).unwrap_err();
        assert!(matches!(err, PolarsError::ComputeError(_)));
    }

    #[test]
    fn substring_with_neither_bound_succeeds() {
        assert!(substring(lit("hi"), lit(0i64), None, None).is_ok());
    }
}
