//! Property-based tests for the algebraic identities the workflow's
//! testable-properties scenario list calls out: boolean identities,
//! horizontal reducer identities, substring bounds, rank bounds, and
//! the cumsum law.

use polars::df;
use polars::prelude::*;
use proptest::prelude::*;
use tableflow::expression::Expression;
use tableflow::value::Value;

fn col(name: &str) -> Expression {
    Expression::Col { name: name.to_string() }
}

fn int(v: i64) -> Expression {
    Expression::Const { value: Value::Int(v) }
}

fn single_row_frame() -> LazyFrame {
    df! { "x" => [1i64] }.unwrap().lazy()
}

proptest! {
    /// Empty `and` is a literal `true`, broadcast over however many rows
    /// the current frame has (`spec.md` §4.1).
    #[test]
    fn empty_and_is_true_over_n_rows(n in 1usize..20) {
        let values: Vec<i64> = (0..n as i64).collect();
        let lf = df! { "x" => values }.unwrap().lazy();
        let expr = Expression::And { operands: vec![] }.to_polars().unwrap();
        let result = lf.select([expr.alias("r")]).collect().unwrap();
        let flags: Vec<bool> = result.column("r").unwrap().bool().unwrap().into_no_null_iter().collect();
        prop_assert_eq!(flags.len(), n);
        prop_assert!(flags.iter().all(|b| *b));
    }

    /// Empty `or` is a literal `false`, broadcast the same way.
    #[test]
    fn empty_or_is_false_over_n_rows(n in 1usize..20) {
        let values: Vec<i64> = (0..n as i64).collect();
        let lf = df! { "x" => values }.unwrap().lazy();
        let expr = Expression::Or { operands: vec![] }.to_polars().unwrap();
        let result = lf.select([expr.alias("r")]).collect().unwrap();
        let flags: Vec<bool> = result.column("r").unwrap().bool().unwrap().into_no_null_iter().collect();
        prop_assert_eq!(flags.len(), n);
        prop_assert!(flags.iter().all(|b| !*b));
    }

    /// Empty `min`/`max` are typed nulls, not a decode or engine error.
    #[test]
    fn empty_min_max_are_null(_n in 0usize..5) {
        let lf = single_row_frame();
        let min_expr = Expression::Min { operands: vec![] }.to_polars().unwrap();
        let max_expr = Expression::Max { operands: vec![] }.to_polars().unwrap();
        let result = lf.select([min_expr.alias("mn"), max_expr.alias("mx")]).collect().unwrap();
        prop_assert_eq!(result.column("mn").unwrap().null_count(), 1);
        prop_assert_eq!(result.column("mx").unwrap().null_count(), 1);
    }

    /// `substring(value, start, length)` never panics and always slices
    /// within `[start, start+length)`, truncated at the string's end.
    #[test]
    fn substring_length_form_matches_str_slicing(
        text in "[a-z]{0,12}",
        start in 0i64..6,
        length in 0i64..6,
    ) {
        let lf = df! { "s" => [text.as_str()] }.unwrap().lazy();
        let expr = Expression::Substring {
            value: Box::new(col("s")),
            start: Box::new(int(start)),
            length: Some(length),
            end: None,
        }
        .to_polars()
        .unwrap();
        let result = lf.select([expr.alias("r")]).collect().unwrap();
        let got: Option<&str> = result.column("r").unwrap().str().unwrap().get(0);

        let chars: Vec<char> = text.chars().collect();
        let start_idx = (start as usize).min(chars.len());
        let end_idx = (start_idx + length as usize).min(chars.len());
        let expected: String = chars[start_idx..end_idx].iter().collect();

        prop_assert_eq!(got.unwrap_or(""), expected.as_str());
    }

    /// Within a single partition, `rank`'s values form exactly `{1..n}`.
    #[test]
    fn rank_values_form_the_set_one_to_n(n in 1usize..15) {
        let values: Vec<i64> = (0..n as i64).rev().collect();
        let ids: Vec<i64> = (0..n as i64).collect();
        let lf = df! { "value" => values, "id" => ids }.unwrap().lazy();
        let expr = Expression::Rank {
            order_by: vec![col("value")],
            partition_by: vec![],
            descending: false,
        }
        .to_polars()
        .unwrap();
        let result = lf.select([expr.alias("rank")]).collect().unwrap();
        let mut ranks: Vec<i64> = result
            .column("rank")
            .unwrap()
            .cast(&DataType::Int64)
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        ranks.sort_unstable();
        let expected: Vec<i64> = (1..=n as i64).collect();
        prop_assert_eq!(ranks, expected);
    }

    /// With non-negative values the running sum is monotonically
    /// non-decreasing, so its maximum is the final cumulative value —
    /// which must equal the sum of every entry in the partition
    /// (`spec.md` §9 "Cumsum law").
    #[test]
    fn cumsum_final_value_equals_partition_sum(values in prop::collection::vec(0i64..50, 1..15)) {
        let order: Vec<i64> = (0..values.len() as i64).collect();
        let lf = df! { "value" => values.clone(), "order_col" => order }.unwrap().lazy();
        let expr = Expression::Cumsum {
            value: Box::new(col("value")),
            additional_order_by: vec![col("order_col")],
            partition_by: vec![],
            descending: false,
        }
        .to_polars()
        .unwrap();
        let result = lf.select([expr.alias("running")]).collect().unwrap();
        let running: Vec<i64> = result.column("running").unwrap().i64().unwrap().into_no_null_iter().collect();
        let total: i64 = values.iter().sum();
        prop_assert_eq!(*running.iter().max().unwrap(), total);
    }
}
