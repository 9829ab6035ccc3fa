//! `add_columns`, `select`, `with_columns`, `without_columns`
//! (`spec.md` §3/§4.2). All four act **in place** on a single named
//! table; none change the table space's key set.

use super::{ColumnDefinition, TableSpace};
use crate::engine;
use crate::error::WorkflowResult;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// `add_columns(table, columns)`: appends `[expression AS name, …]` in
/// one atomic `with_columns` call, ported from
/// `original_source/steps/add_columns.py`. Every expression sees the
/// pre-step schema — later entries cannot reference earlier ones added
/// in the same step, because `polars::LazyFrame::with_columns` resolves
/// all expressions against the input schema simultaneously.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddColumns {
    pub table: String,
    pub columns: Vec<ColumnDefinition>,
}

impl AddColumns {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        let lf = engine::require_table(&table_space, &self.table, step_index, step_tag)?.clone();

        let exprs = self
            .columns
            .iter()
            .map(|c| Ok(c.expression.to_polars()?.alias(c.name.as_str())))
            .collect::<WorkflowResult<Vec<Expr>>>()?;

        let lf = if exprs.is_empty() { lf } else { lf.with_columns(exprs) };
        table_space.insert(self.table.clone(), lf);
        Ok((table_space, Vec::new()))
    }
}

/// `select(table, columns)`: keep only the named columns, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Select {
    pub table: String,
    pub columns: Vec<String>,
}

impl Select {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        let lf = engine::require_table(&table_space, &self.table, step_index, step_tag)?.clone();
        let lf = lf.select(self.columns.iter().map(|c| col(c.as_str())).collect::<Vec<_>>());
        table_space.insert(self.table.clone(), lf);
        Ok((table_space, Vec::new()))
    }
}

/// `with_columns(table, columns)`: alias for `add_columns`'s contract —
/// kept as a distinct tag because the wire format names them separately
/// (`spec.md` §6), not because the lowering differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithColumns {
    pub table: String,
    pub columns: Vec<ColumnDefinition>,
}

impl WithColumns {
    pub fn execute(
        &self,
        table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        AddColumns {
            table: self.table.clone(),
            columns: self.columns.clone(),
        }
        .execute(table_space, step_index, step_tag)
    }
}

/// `without_columns(table, columns)`: drop the named columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithoutColumns {
    pub table: String,
    pub columns: Vec<String>,
}

impl WithoutColumns {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        let lf = engine::require_table(&table_space, &self.table, step_index, step_tag)?.clone();
        let lf = lf.drop(self.columns.iter().map(|c| c.as_str()).collect::<Vec<_>>());
        table_space.insert(self.table.clone(), lf);
        Ok((table_space, Vec::new()))
    }
}
