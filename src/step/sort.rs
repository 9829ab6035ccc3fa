//! `sort(table, by, descending?)` (`spec.md` §3/§4.2): stable sort with
//! per-column direction, or a single direction broadcast to every column.

use super::TableSpace;
use crate::engine;
use crate::error::{StructuralError, WorkflowResult};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescendingSpec {
    Scalar(bool),
    PerColumn(Vec<bool>),
}

impl Default for DescendingSpec {
    fn default() -> Self {
        DescendingSpec::Scalar(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sort {
    pub table: String,
    pub by: Vec<String>,
    #[serde(default)]
    pub descending: DescendingSpec,
}

impl Sort {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        let lf = engine::require_table(&table_space, &self.table, step_index, step_tag)?.clone();

        let descending = match &self.descending {
            DescendingSpec::Scalar(value) => vec![*value; self.by.len()],
            DescendingSpec::PerColumn(values) => {
                if values.len() != self.by.len() {
                    return Err(StructuralError::InvalidParameters {
                        step_index,
                        step_tag,
                        message: format!(
                            "sort 'descending' length ({}) must match 'by' length ({})",
                            values.len(),
                            self.by.len()
                        ),
                    }
                    .into());
                }
                values.clone()
            }
        };

        let sorted = lf.sort(
            self.by.clone(),
            SortMultipleOptions::default()
                .with_order_descending_multi(descending)
                .with_maintain_order(true),
        );
        table_space.insert(self.table.clone(), sorted);
        Ok((table_space, Vec::new()))
    }
}
