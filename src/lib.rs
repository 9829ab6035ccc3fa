//! # tableflow
//!
//! A declarative, JSON-driven data-table workflow engine: an external
//! orchestrator emits a workflow document — a linear sequence of steps
//! that read tabular inputs, derive columns through composable
//! expression trees, filter/join/aggregate/sort/concatenate tables, and
//! write outputs. This crate decodes that document, plans a lazy
//! dataflow against `polars`, and executes it.
//!
//! ## Module organization
//!
//! | Module | Responsibility |
//! |---|---|
//! | [`value`] | scalar `Value` and column `DataType` wire vocabulary |
//! | [`expression`] | the tagged expression algebra and its lowering to `polars::prelude::Expr` |
//! | [`step`] | the tagged step algebra, the table space, and each step's `execute` |
//! | [`workflow`] | the workflow document and the driver that folds steps and materializes sinks |
//! | [`engine`] | the columnar-engine adapter: scan/sink, hash kernels, string-distance kernels, path resolution |
//! | [`config`] | hierarchical configuration loading |
//! | [`error`] | the error taxonomy steps and the driver report through |

pub mod config;
pub mod engine;
pub mod error;
pub mod expression;
pub mod step;
pub mod value;
pub mod workflow;

pub use config::{Config, GlobalSettings};
pub use error::{WorkflowError, WorkflowResult};
pub use workflow::Workflow;
