//! `read_csv`, `read_ndjson`, `write_csv`, `write_ndjson`, `write_json`
//! (`spec.md` §3/§4.2), ported from `original_source/steps/io.py`.

use super::TableSpace;
use crate::config::GlobalSettings;
use crate::engine::{self, path, ColumnSchema as EngineColumnSchema, ScanOptions, SinkPlan};
use crate::error::{StructuralError, WorkflowResult};
use crate::value::DataType;
use serde::{Deserialize, Serialize};

/// A single entry of a `read_*` step's `schema` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSchema {
    pub column: String,
    #[serde(default)]
    pub r#type: Option<DataType>,
    #[serde(default)]
    pub null_value: Option<String>,
}

fn to_engine_schema(schema: &[ColumnSchema]) -> Vec<EngineColumnSchema> {
    schema
        .iter()
        .map(|c| EngineColumnSchema {
            column: c.column.clone(),
            r#type: c.r#type,
            null_value: c.null_value.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadCsv {
    pub file: String,
    pub name: String,
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub schema: Vec<ColumnSchema>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub n_rows: Option<usize>,
}

impl ReadCsv {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        settings: &GlobalSettings,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<SinkPlan>)> {
        let resolved = path::resolve(&settings.root_folder, &self.file, step_index, step_tag)?;
        let options = ScanOptions {
            delimiter: self.delimiter.as_ref().and_then(|d| d.chars().next()),
            schema: to_engine_schema(&self.schema),
            columns: self.columns.clone(),
            n_rows: self.n_rows,
        };
        let lf = engine::scan_csv(resolved, &options)?;
        table_space.insert(self.name.clone(), lf);
        Ok((table_space, Vec::new()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadNdjson {
    pub file: String,
    pub name: String,
    #[serde(default)]
    pub schema: Vec<ColumnSchema>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub n_rows: Option<usize>,
}

impl ReadNdjson {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        settings: &GlobalSettings,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<SinkPlan>)> {
        let resolved = path::resolve(&settings.root_folder, &self.file, step_index, step_tag)?;
        let options = ScanOptions {
            delimiter: None,
            schema: to_engine_schema(&self.schema),
            columns: self.columns.clone(),
            n_rows: self.n_rows,
        };
        let lf = engine::scan_ndjson(resolved, &options)?;
        table_space.insert(self.name.clone(), lf);
        Ok((table_space, Vec::new()))
    }
}

fn select_columns(
    table_space: &TableSpace,
    table: &str,
    columns: &Option<Vec<String>>,
    step_index: usize,
    step_tag: &'static str,
) -> Result<polars::prelude::LazyFrame, StructuralError> {
    let lf = engine::require_table(table_space, table, step_index, step_tag)?.clone();
    Ok(match columns {
        Some(columns) => lf.select(
            columns
                .iter()
                .map(|c| polars::prelude::col(c.as_str()))
                .collect::<Vec<_>>(),
        ),
        None => lf,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteCsv {
    pub table: String,
    pub file: String,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub delimiter: Option<String>,
}

impl WriteCsv {
    pub fn execute(
        &self,
        table_space: TableSpace,
        settings: &GlobalSettings,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<SinkPlan>)> {
        let selected = select_columns(&table_space, &self.table, &self.columns, step_index, step_tag)?;
        let resolved = path::resolve(&settings.root_folder, &self.file, step_index, step_tag)?;
        let delimiter = self.delimiter.as_ref().and_then(|d| d.chars().next());
        let sink = SinkPlan::csv(selected, resolved, delimiter);
        // write_* never modifies the table space (spec.md §3).
        Ok((table_space, vec![sink]))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteNdjson {
    pub table: String,
    pub file: String,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl WriteNdjson {
    pub fn execute(
        &self,
        table_space: TableSpace,
        settings: &GlobalSettings,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<SinkPlan>)> {
        let selected = select_columns(&table_space, &self.table, &self.columns, step_index, step_tag)?;
        let resolved = path::resolve(&settings.root_folder, &self.file, step_index, step_tag)?;
        let sink = SinkPlan::ndjson(selected, resolved);
        Ok((table_space, vec![sink]))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteJson {
    pub table: String,
    pub file: String,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

impl WriteJson {
    pub fn execute(
        &self,
        table_space: TableSpace,
        settings: &GlobalSettings,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<SinkPlan>)> {
        let selected = select_columns(&table_space, &self.table, &self.columns, step_index, step_tag)?;
        let resolved = path::resolve(&settings.root_folder, &self.file, step_index, step_tag)?;
        let sink = SinkPlan::json(selected, resolved);
        Ok((table_space, vec![sink]))
    }
}
