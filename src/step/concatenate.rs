//! `concatenate` (`spec.md` §3/§4.2): vertical concat of N tables with
//! identical column sets. Schema mismatches surface as engine errors at
//! materialization, not here.

use super::TableSpace;
use crate::engine;
use crate::error::WorkflowResult;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concatenate {
    pub tables: Vec<String>,
    pub output_table: String,
}

impl Concatenate {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        let frames = self
            .tables
            .iter()
            .map(|t| Ok(engine::require_table(&table_space, t, step_index, step_tag)?.clone()))
            .collect::<Result<Vec<LazyFrame>, crate::error::StructuralError>>()?;

        let stacked = concat(&frames, UnionArgs::default())?;
        table_space.insert(self.output_table.clone(), stacked);
        Ok((table_space, Vec::new()))
    }
}
