//! `when_then_otherwise` (`spec.md` §3 "Conditional"); the first matching
//! `when` wins, folding right-to-left over the `conditions` list so the
//! first entry takes precedence, same as the teacher's chained
//! `when().then()` builder style would over a `match` arm.

use super::Expression;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhenThen {
    pub when: Expression,
    pub then: Expression,
}

pub fn when_then_otherwise(conditions: &[WhenThen], otherwise: &Expression) -> PolarsResult<Expr> {
    if conditions.is_empty() {
        return Err(PolarsError::ComputeError(
            "when_then_otherwise requires at least one condition".into(),
        ));
    }

    let mut result = otherwise.to_polars()?;
    for clause in conditions.iter().rev() {
        result = when(clause.when.to_polars()?)
            .then(clause.then.to_polars()?)
            .otherwise(result);
    }
    Ok(result)
}
