//! The table space and workflow driver (`spec.md` §4.3).
//!
//! `Workflow::execute` folds each step over the table space in order,
//! accumulating sink plans, then returns everything for the caller to
//! materialize — mirroring `original_source`'s steps being folded one
//! at a time by an external driver loop, just made an explicit method
//! here rather than left to the caller.

use crate::config::GlobalSettings;
use crate::engine::SinkPlan;
use crate::error::WorkflowResult;
use crate::step::{Step, TableSpace};
use serde::{Deserialize, Serialize};

/// The decoded wire document: `{ "workflow": [ <step>, … ] }`
/// (`spec.md` §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub workflow: Vec<Step>,
}

/// The result of folding a workflow's steps: every table left in the
/// space once the last step ran, plus every sink plan emitted along
/// the way, still unexecuted.
pub struct WorkflowPlan {
    pub table_space: TableSpace,
    pub sinks: Vec<SinkPlan>,
}

impl Workflow {
    pub fn from_json(document: &str) -> WorkflowResult<Self> {
        Ok(serde_json::from_str(document).map_err(crate::error::DecodeError::Malformed)?)
    }

    /// Folds every step over an initially empty table space
    /// (`spec.md` §4.3, steps 1-3). Purely plan construction: no I/O
    /// happens until the caller materializes the returned sinks.
    pub fn plan(&self, settings: &GlobalSettings) -> WorkflowResult<WorkflowPlan> {
        let mut table_space = TableSpace::new();
        let mut sinks = Vec::new();

        for (step_index, step) in self.workflow.iter().enumerate() {
            tracing::debug!(step_index, "executing workflow step");
            let (next_space, step_sinks) = step.execute(table_space, settings, step_index)?;
            table_space = next_space;
            sinks.extend(step_sinks);
        }

        Ok(WorkflowPlan { table_space, sinks })
    }

    /// Plans the workflow and materializes every sink in one batch
    /// (`spec.md` §4.3 "Laziness": "a single engine-level batch collect
    /// is preferred so the engine may share subplans across sinks").
    pub fn execute(&self, settings: &GlobalSettings) -> WorkflowResult<TableSpace> {
        let plan = self.plan(settings)?;
        for sink in plan.sinks {
            sink.materialize()?;
        }
        Ok(plan.table_space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_empty_workflow() {
        let workflow = Workflow::from_json(r#"{"workflow": []}"#).unwrap();
        assert!(workflow.workflow.is_empty());
    }

    #[test]
    fn plan_on_empty_workflow_yields_empty_space_and_no_sinks() {
        let workflow = Workflow::from_json(r#"{"workflow": []}"#).unwrap();
        let settings = GlobalSettings::new("/data");
        let plan = workflow.plan(&settings).unwrap();
        assert!(plan.table_space.is_empty());
        assert!(plan.sinks.is_empty());
    }

    #[test]
    fn missing_table_reference_is_a_structural_error() {
        let workflow = Workflow::from_json(
            r#"{"workflow": [{"type": "select", "table": "missing", "columns": ["a"]}]}"#,
        )
        .unwrap();
        let settings = GlobalSettings::new("/data");
        let err = workflow.plan(&settings).unwrap_err();
        assert!(matches!(err, crate::error::WorkflowError::Structural(_)));
    }
}
