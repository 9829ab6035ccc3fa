//! Columnar-engine adapter (`spec.md` §4.4).
//!
//! The rest of the crate never touches `polars` scan/sink builders or
//! kernel-level APIs directly — every boundary crossing goes through
//! this module (or its `path`/`hash`/`distance` submodules). Steps and
//! expressions compose `LazyFrame`/`Expr` values that this module
//! produces; they never construct scan or sink operations themselves.

pub mod distance;
pub mod hash;
pub mod path;

use crate::error::StructuralError;
use crate::value::DataType;
use polars::prelude::*;
use std::path::PathBuf;

/// A column's schema override, decoded from a `read_csv`/`read_ndjson`
/// step's `schema` list (`spec.md` §3).
#[derive(Debug, Clone)]
pub struct ColumnSchema {
    pub column: String,
    pub r#type: Option<DataType>,
    pub null_value: Option<String>,
}

/// Options common to `read_csv`/`read_ndjson`, already resolved to an
/// absolute/validated path by [`path::resolve`].
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub delimiter: Option<char>,
    pub schema: Vec<ColumnSchema>,
    pub columns: Option<Vec<String>>,
    pub n_rows: Option<usize>,
}

impl ScanOptions {
    fn dtype_overrides(&self) -> Option<Schema> {
        let mut fields: Vec<(PlSmallStr, DataType_)> = Vec::new();
        for col in &self.schema {
            if let Some(ty) = col.r#type {
                fields.push((col.column.as_str().into(), ty.to_polars()));
            }
        }
        if fields.is_empty() {
            None
        } else {
            Some(Schema::from_iter(fields))
        }
    }

    fn null_values(&self) -> Option<NullValues> {
        let mut map = PlHashMap::new();
        for col in &self.schema {
            if let Some(null_value) = &col.null_value {
                map.insert(PlSmallStr::from(col.column.as_str()), null_value.clone());
            }
        }
        if map.is_empty() {
            None
        } else {
            Some(NullValues::Named(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ))
        }
    }
}

// polars::prelude re-exports `DataType` under the same name our wire
// vocabulary does; alias to keep the two unambiguous in this module.
use polars::prelude::DataType as DataType_;

/// Scans a CSV file into a `LazyFrame` (`read_csv`).
pub fn scan_csv(path: PathBuf, options: &ScanOptions) -> PolarsResult<LazyFrame> {
    let mut args = ScanArgsCSV::default();
    if let Some(delimiter) = options.delimiter {
        args.parse_options = args
            .parse_options
            .clone()
            .with_separator(delimiter as u8);
    }
    if let Some(n_rows) = options.n_rows {
        args.n_rows = Some(n_rows);
    }
    if let Some(schema) = options.dtype_overrides() {
        args.schema = Some(std::sync::Arc::new(schema));
    }
    if let Some(null_values) = options.null_values() {
        args.parse_options = args.parse_options.clone().with_null_values(Some(null_values));
    }

    let mut lf = LazyCsvReader::new(path).with_options(args).finish()?;
    if let Some(columns) = &options.columns {
        lf = lf.select(columns.iter().map(|c| col(c.as_str())).collect::<Vec<_>>());
    }
    Ok(lf)
}

/// Scans a newline-delimited JSON file into a `LazyFrame` (`read_ndjson`).
pub fn scan_ndjson(path: PathBuf, options: &ScanOptions) -> PolarsResult<LazyFrame> {
    let mut args = ScanArgsNdJson::default();
    if let Some(n_rows) = options.n_rows {
        args.n_rows = Some(n_rows);
    }
    if let Some(schema) = options.dtype_overrides() {
        args.schema = Some(std::sync::Arc::new(schema));
    }

    let mut lf = LazyJsonLineReader::new(path).with_options(args).finish()?;
    if let Some(columns) = &options.columns {
        lf = lf.select(columns.iter().map(|c| col(c.as_str())).collect::<Vec<_>>());
    }
    Ok(lf)
}

/// A deferred write, produced by a `write_*` step and executed only
/// when the workflow driver materializes all sinks in one batch
/// (`spec.md` §4.3 "Laziness").
pub struct SinkPlan {
    frame: LazyFrame,
    path: PathBuf,
    format: SinkFormat,
    delimiter: Option<char>,
}

enum SinkFormat {
    Csv,
    Ndjson,
    Json,
}

impl SinkPlan {
    pub fn csv(frame: LazyFrame, path: PathBuf, delimiter: Option<char>) -> Self {
        SinkPlan {
            frame,
            path,
            format: SinkFormat::Csv,
            delimiter,
        }
    }

    pub fn ndjson(frame: LazyFrame, path: PathBuf) -> Self {
        SinkPlan {
            frame,
            path,
            format: SinkFormat::Ndjson,
            delimiter: None,
        }
    }

    pub fn json(frame: LazyFrame, path: PathBuf) -> Self {
        SinkPlan {
            frame,
            path,
            format: SinkFormat::Json,
            delimiter: None,
        }
    }

    /// Executes the write. Called only from the workflow driver's final
    /// batch-materialization pass, never from a step's `execute`.
    ///
    /// All three formats collect the plan eagerly before writing: the
    /// streaming `sink_*` builders' signatures have churned release to
    /// release, while the eager writers below (`CsvWriter`/`JsonWriter`)
    /// are the stable surface the teacher's own I/O code builds on.
    /// Laziness up to this single point is preserved regardless — no
    /// step before the workflow driver's final pass calls `collect`.
    pub fn materialize(self) -> PolarsResult<()> {
        let mut df = self.frame.collect()?;
        let file = std::fs::File::create(&self.path).map_err(|e| {
            PolarsError::ComputeError(format!("failed to create {:?}: {e}", self.path).into())
        })?;

        match self.format {
            SinkFormat::Csv => {
                let mut writer = CsvWriter::new(file);
                if let Some(delimiter) = self.delimiter {
                    writer = writer.with_separator(delimiter as u8);
                }
                writer.finish(&mut df)
            }
            SinkFormat::Ndjson => JsonWriter::new(file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(&mut df),
            SinkFormat::Json => JsonWriter::new(file)
                .with_json_format(JsonFormat::Json)
                .finish(&mut df),
        }
    }
}

/// Looks up `table` in the table space, naming the step and the known
/// tables in the error if it is absent (`spec.md` §4.2 "Missing table").
pub fn require_table<'a>(
    space: &'a std::collections::BTreeMap<String, LazyFrame>,
    table: &str,
    step_index: usize,
    step_tag: &'static str,
) -> Result<&'a LazyFrame, StructuralError> {
    space.get(table).ok_or_else(|| StructuralError::MissingTable {
        step_index,
        step_tag,
        table: table.to_string(),
        known: space.keys().cloned().collect(),
    })
}
