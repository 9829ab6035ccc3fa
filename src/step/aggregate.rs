//! `aggregate` (`spec.md` §3/§4.2): group by key expressions, evaluate
//! aggregation expressions per group. Not present in
//! `original_source`'s kept files; grounded directly in the spec and in
//! `polars`'s own `group_by`/`agg` idiom.
//!
//! `spec.md` §3 calls aggregation expressions "engine primitives" rather
//! than part of the tagged `Expression` algebra (which has no `sum`,
//! `mean`, `count`, … reduction tags at all). This mirrors how `hash`
//! and `string_distance` keep their own small wire vocabularies
//! (`hash_type`, `metric`) separate from the expression tree proper —
//! `AggregationFunction` plays that role here: a closed tagged enum of
//! the reduction kernels `polars`'s own `group_by().agg()` exposes,
//! wrapping one operand `Expression` each.

use super::TableSpace;
use crate::engine;
use crate::error::WorkflowResult;
use crate::expression::Expression;
use polars::prelude::Expr;
use serde::{Deserialize, Serialize};

/// A single `group_by` key: a name and the expression producing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupKey {
    pub name: String,
    pub expression: Expression,
}

/// The reduction kernel family `polars`'s own aggregation context
/// supports; closed and tagged the same way the rest of the wire
/// format is (`spec.md` §9 "closed sum type, not open dispatch").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "snake_case")]
pub enum AggregationFunction {
    Sum { value: Expression },
    Mean { value: Expression },
    Min { value: Expression },
    Max { value: Expression },
    Count,
    First { value: Expression },
    Last { value: Expression },
    NUnique { value: Expression },
    Median { value: Expression },
    Std { value: Expression },
    Var { value: Expression },
}

impl AggregationFunction {
    fn to_polars(&self) -> WorkflowResult<Expr> {
        use AggregationFunction::*;
        Ok(match self {
            Sum { value } => value.to_polars()?.sum(),
            Mean { value } => value.to_polars()?.mean(),
            Min { value } => value.to_polars()?.min(),
            Max { value } => value.to_polars()?.max(),
            Count => polars::prelude::len(),
            First { value } => value.to_polars()?.first(),
            Last { value } => value.to_polars()?.last(),
            NUnique { value } => value.to_polars()?.n_unique(),
            Median { value } => value.to_polars()?.median(),
            Std { value } => value.to_polars()?.std(1),
            Var { value } => value.to_polars()?.var(1),
        })
    }
}

/// `{name, function}` pair naming one aggregation output column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationDefinition {
    pub name: String,
    #[serde(flatten)]
    pub function: AggregationFunction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub table: String,
    pub output_table: String,
    pub group_by: Vec<GroupKey>,
    pub aggregations: Vec<AggregationDefinition>,
}

impl Aggregate {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        let lf = engine::require_table(&table_space, &self.table, step_index, step_tag)?.clone();

        let group_keys = self
            .group_by
            .iter()
            .map(|k| Ok(k.expression.to_polars()?.alias(k.name.as_str())))
            .collect::<WorkflowResult<Vec<Expr>>>()?;
        let agg_exprs = self
            .aggregations
            .iter()
            .map(|a| Ok(a.function.to_polars()?.alias(a.name.as_str())))
            .collect::<WorkflowResult<Vec<Expr>>>()?;

        let grouped = lf.group_by(group_keys).agg(agg_exprs);
        table_space.insert(self.output_table.clone(), grouped);
        Ok((table_space, Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregation_definition_decodes_tagged_function() {
        let json = serde_json::json!({
            "name": "total",
            "function": "sum",
            "value": {"type": "col", "name": "amount"}
        });
        let def: AggregationDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(def.name, "total");
        assert!(matches!(def.function, AggregationFunction::Sum { .. }));
    }

    #[test]
    fn count_aggregation_needs_no_value() {
        let json = serde_json::json!({"name": "n", "function": "count"});
        let def: AggregationDefinition = serde_json::from_value(json).unwrap();
        assert!(matches!(def.function, AggregationFunction::Count));
    }
}
