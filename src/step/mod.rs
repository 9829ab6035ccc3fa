//! The step algebra (`spec.md` §3/§4.2): a closed, tagged sum type of
//! table-transforming operations, each folding `(table_space, settings)`
//! into `(table_space', sink_plans)`.
//!
//! Mirrors the expression algebra's shape — one `#[serde(tag = "type")]`
//! enum, one exhaustive `execute` dispatch — but each variant additionally
//! touches the table space, so dispatch lives on `Step` directly rather
//! than delegating to a `to_polars`-style pure lowering function.

pub mod aggregate;
pub mod columns;
pub mod concatenate;
pub mod filter;
pub mod io;
pub mod join;
pub mod sort;

use crate::config::GlobalSettings;
use crate::engine::SinkPlan;
use crate::error::WorkflowResult;
use polars::prelude::LazyFrame;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Table name → lazy plan, value-semantic between steps (`spec.md` §4.3).
pub type TableSpace = BTreeMap<String, LazyFrame>;

/// `{name, expression}` pair shared by `add_columns`/`select`-family
/// steps. `aggregate`'s group keys and aggregation definitions have
/// their own types (`step::aggregate::GroupKey`/`AggregationDefinition`)
/// since aggregation functions are not part of the `Expression` algebra.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub expression: crate::expression::Expression,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Step {
    #[serde(rename = "read_csv")]
    ReadCsv(io::ReadCsv),
    #[serde(rename = "read_ndjson")]
    ReadNdjson(io::ReadNdjson),
    #[serde(rename = "write_csv")]
    WriteCsv(io::WriteCsv),
    #[serde(rename = "write_ndjson")]
    WriteNdjson(io::WriteNdjson),
    #[serde(rename = "write_json")]
    WriteJson(io::WriteJson),
    #[serde(rename = "add_columns")]
    AddColumns(columns::AddColumns),
    #[serde(rename = "select")]
    Select(columns::Select),
    #[serde(rename = "with_columns")]
    WithColumns(columns::WithColumns),
    #[serde(rename = "without_columns")]
    WithoutColumns(columns::WithoutColumns),
    #[serde(rename = "filter")]
    Filter(filter::Filter),
    #[serde(rename = "join")]
    Join(join::Join),
    #[serde(rename = "aggregate")]
    Aggregate(aggregate::Aggregate),
    #[serde(rename = "concatenate")]
    Concatenate(concatenate::Concatenate),
    #[serde(rename = "sort")]
    Sort(sort::Sort),
}

impl Step {
    fn tag(&self) -> &'static str {
        match self {
            Step::ReadCsv(_) => "read_csv",
            Step::ReadNdjson(_) => "read_ndjson",
            Step::WriteCsv(_) => "write_csv",
            Step::WriteNdjson(_) => "write_ndjson",
            Step::WriteJson(_) => "write_json",
            Step::AddColumns(_) => "add_columns",
            Step::Select(_) => "select",
            Step::WithColumns(_) => "with_columns",
            Step::WithoutColumns(_) => "without_columns",
            Step::Filter(_) => "filter",
            Step::Join(_) => "join",
            Step::Aggregate(_) => "aggregate",
            Step::Concatenate(_) => "concatenate",
            Step::Sort(_) => "sort",
        }
    }

    /// Runs this step against `table_space`, returning the updated space
    /// and any sink plans this step appended. `step_index` is only used
    /// to attribute errors (`spec.md` §7 "User-visible behavior").
    pub fn execute(
        &self,
        table_space: TableSpace,
        settings: &GlobalSettings,
        step_index: usize,
    ) -> WorkflowResult<(TableSpace, Vec<SinkPlan>)> {
        let tag = self.tag();
        match self {
            Step::ReadCsv(step) => step.execute(table_space, settings, step_index, tag),
            Step::ReadNdjson(step) => step.execute(table_space, settings, step_index, tag),
            Step::WriteCsv(step) => step.execute(table_space, settings, step_index, tag),
            Step::WriteNdjson(step) => step.execute(table_space, settings, step_index, tag),
            Step::WriteJson(step) => step.execute(table_space, settings, step_index, tag),
            Step::AddColumns(step) => step.execute(table_space, step_index, tag),
            Step::Select(step) => step.execute(table_space, step_index, tag),
            Step::WithColumns(step) => step.execute(table_space, step_index, tag),
            Step::WithoutColumns(step) => step.execute(table_space, step_index, tag),
            Step::Filter(step) => step.execute(table_space, step_index, tag),
            Step::Join(step) => step.execute(table_space, step_index, tag),
            Step::Aggregate(step) => step.execute(table_space, step_index, tag),
            Step::Concatenate(step) => step.execute(table_space, step_index, tag),
            Step::Sort(step) => step.execute(table_space, step_index, tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_tag_round_trips_through_json() {
        let json = serde_json::json!({
            "type": "select",
            "table": "t",
            "columns": ["a", "b"]
        });
        let step: Step = serde_json::from_value(json).unwrap();
        assert!(matches!(step, Step::Select(_)));
        assert_eq!(step.tag(), "select");
    }

    #[test]
    fn unknown_step_tag_fails_to_decode() {
        let json = serde_json::json!({"type": "not_a_real_step"});
        let result: Result<Step, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }
}
