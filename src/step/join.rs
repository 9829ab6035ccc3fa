//! `join` (`spec.md` §3/§4.2), ported from `original_source/steps/join.py`.

use super::TableSpace;
use crate::engine;
use crate::error::{StructuralError, WorkflowResult};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinHow {
    Inner,
    Left,
    Right,
    Outer,
    Cross,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Join {
    pub left_table: String,
    pub right_table: String,
    pub output_table: String,
    pub how: JoinHow,
    #[serde(default)]
    pub left_on: Option<Vec<String>>,
    #[serde(default)]
    pub right_on: Option<Vec<String>>,
    #[serde(default)]
    pub left_columns: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub right_columns: Option<BTreeMap<String, String>>,
}

/// Applies an `{original → new}` rename map as a pre-join projection —
/// how callers avoid column-name collisions (`spec.md` §4.2).
fn apply_rename(lf: LazyFrame, rename: &Option<BTreeMap<String, String>>) -> LazyFrame {
    match rename {
        Some(map) if !map.is_empty() => lf.select(
            map.iter()
                .map(|(original, new_name)| col(original.as_str()).alias(new_name.as_str()))
                .collect::<Vec<_>>(),
        ),
        _ => lf,
    }
}

impl Join {
    pub fn execute(
        &self,
        mut table_space: TableSpace,
        step_index: usize,
        step_tag: &'static str,
    ) -> WorkflowResult<(TableSpace, Vec<engine::SinkPlan>)> {
        let left = engine::require_table(&table_space, &self.left_table, step_index, step_tag)?.clone();
        let right = engine::require_table(&table_space, &self.right_table, step_index, step_tag)?.clone();

        let left = apply_rename(left, &self.left_columns);
        let right = apply_rename(right, &self.right_columns);

        let joined = if self.how == JoinHow::Cross {
            left.join(right, [], [], JoinArgs::new(JoinType::Cross))
        } else {
            let left_on = self.left_on.clone().ok_or_else(|| StructuralError::InvalidParameters {
                step_index,
                step_tag,
                message: format!("join requires 'left_on' for how={:?}", self.how),
            })?;
            let right_on = self.right_on.clone().ok_or_else(|| StructuralError::InvalidParameters {
                step_index,
                step_tag,
                message: format!("join requires 'right_on' for how={:?}", self.how),
            })?;
            if left_on.is_empty() || right_on.len() != left_on.len() {
                return Err(StructuralError::InvalidParameters {
                    step_index,
                    step_tag,
                    message: "join 'left_on'/'right_on' must be non-empty and equal length".to_string(),
                }
                .into());
            }

            let join_type = match self.how {
                JoinHow::Inner => JoinType::Inner,
                JoinHow::Left => JoinType::Left,
                JoinHow::Right => JoinType::Right,
                JoinHow::Outer => JoinType::Full,
                JoinHow::Cross => unreachable!(),
            };

            let left_on = left_on.iter().map(|c| col(c.as_str())).collect::<Vec<_>>();
            let right_on = right_on.iter().map(|c| col(c.as_str())).collect::<Vec<_>>();
            left.join(right, left_on, right_on, JoinArgs::new(join_type))
        };

        // `outer` joins with coinciding key names surface the engine's
        // own `_right` suffix; the core does not auto-coalesce it
        // (`spec.md` §9 "Join column-collision policy").
        table_space.insert(self.output_table.clone(), joined);
        Ok((table_space, Vec::new()))
    }
}
