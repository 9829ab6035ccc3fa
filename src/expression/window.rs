//! Window functions (`spec.md` §3/§4.1 "Window"), ported from
//! `original_source/expression/window.py`.

use super::Expression;
use polars::prelude::*;

/// Dense ordinal rank within `partition_by`, computed over a composite
/// `order_by` sort key; `descending` applies uniformly to every
/// `order_by` entry (`spec.md` §9 Open Question — no per-column
/// direction).
pub fn rank(order_by: &[Expression], partition_by: &[Expression], descending: bool) -> PolarsResult<Expr> {
    if order_by.is_empty() {
        return Err(PolarsError::ComputeError(
            "rank requires at least one 'order_by' expression".into(),
        ));
    }

    let order_exprs = order_by
        .iter()
        .map(Expression::to_polars)
        .collect::<PolarsResult<Vec<_>>>()?;

    let rank_expr = as_struct(order_exprs).rank(
        RankOptions {
            method: RankMethod::Ordinal,
            descending,
        },
        None,
    );

    if partition_by.is_empty() {
        Ok(rank_expr)
    } else {
        let partitions = partition_by
            .iter()
            .map(Expression::to_polars)
            .collect::<PolarsResult<Vec<_>>>()?;
        Ok(rank_expr.over(partitions))
    }
}

/// Cumulative sum within `partition_by`, after sorting each partition's
/// rows by `[value] ++ additional_order_by` (value participates as the
/// primary sort key — `spec.md` §9 Open Question, resolved value-first
/// per the spec's explicit direction).
pub fn cumsum(
    value: &Expression,
    additional_order_by: &[Expression],
    partition_by: &[Expression],
    descending: bool,
) -> PolarsResult<Expr> {
    let value_expr = value.to_polars()?;

    let mut sort_keys = vec![value_expr.clone()];
    for expr in additional_order_by {
        sort_keys.push(expr.to_polars()?);
    }
    let descending_flags = vec![descending; sort_keys.len()];

    let sorted = value_expr.sort_by(
        sort_keys,
        SortMultipleOptions::default().with_order_descending_multi(descending_flags),
    );
    let cumsum_expr = sorted.cum_sum(false);

    if partition_by.is_empty() {
        Ok(cumsum_expr)
    } else {
        let partitions = partition_by
            .iter()
            .map(Expression::to_polars)
            .collect::<PolarsResult<Vec<_>>>()?;
        Ok(cumsum_expr.over(partitions))
    }
}
