//! `filter(input_table, output_table, condition)` (`spec.md` §3/§4.2).

use super::TableSpace;
use crate::engine;
use crate::error::WorkflowResult;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub input_table: String,
    pub output_table: String,
    pub condition: crate::expression::Expression,
}

impl Filter {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        let lf = engine::require_table(&table_space, &self.input_table, step_index, step_tag)?.clone();
        let predicate = self.condition.to_polars()?;
        table_space.insert(self.output_table.clone(), lf.filter(predicate));
        Ok((table_space, Vec::new()))
    }
}
