//! Error taxonomy (`spec.md` §7): decode, structural, engine, and I/O
//! errors, each reported with enough context to name the offending step.

use thiserror::Error;

/// Errors raised while decoding a workflow document before any step runs
/// (`spec.md` §7.1). Unknown data-type names, expression tags, and step
/// tags are all rejected by the same path: serde's own "unknown variant"
/// error on the relevant tagged enum, which already names the offending
/// tag and the document path it occurred at — there is no separate
/// decode phase after serde's that would need its own error variants.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("malformed workflow document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Invariant violations raised while a step constructs its lazy plan
/// (`spec.md` §7.2) — fatal, reported with the offending step's position.
#[derive(Error, Debug)]
pub enum StructuralError {
    #[error("step {step_index} ({step_tag}): table '{table}' not found in tablespace; known tables: {known:?}")]
    MissingTable {
        step_index: usize,
        step_tag: &'static str,
        table: String,
        known: Vec<String>,
    },

    #[error("step {step_index} ({step_tag}): {message}")]
    InvalidParameters {
        step_index: usize,
        step_tag: &'static str,
        message: String,
    },
}

/// The single error type the workflow driver and CLI report through.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Structural(#[from] StructuralError),

    #[error("engine error: {0}")]
    Engine(#[from] polars::prelude::PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;
