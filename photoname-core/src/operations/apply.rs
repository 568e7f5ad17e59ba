use super::Workspace;
use crate::apply::execute;
use crate::history::UndoLog;
use crate::lock::StateLock;
use crate::model::SelectionItem;
use crate::output::ApplyResult;
use crate::plan::Plan;
use crate::preview::preview;
use crate::template::resolve_template;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Execute a saved plan: `plan_path`, or the one the last preview saved.
///
/// The default plan is deleted once executed; an explicit plan file is kept.
pub fn apply_operation(plan_path: Option<&Path>, working_dir: Option<&Path>) -> Result<ApplyResult> {
    let workspace = Workspace::load(working_dir)?;
    let _lock = StateLock::acquire(&workspace.state_dir())
        .context("Failed to acquire lock for photoname operation")?;

    let default_plan = workspace.plan_path();
    let path = plan_path.unwrap_or(default_plan.as_path());
    let plan = Plan::load(path)?;
    tracing::debug!(path = %path.display(), rows = plan.rows.len(), "loaded plan");

    let result = execute_plan(&workspace, plan);

    if plan_path.is_none() {
        if let Err(e) = fs::remove_file(&default_plan) {
            tracing::warn!(path = %default_plan.display(), error = %e, "failed to delete plan file");
        }
    }

    Ok(result)
}

/// Plan `items` and execute the result in one step, without a saved plan.
pub fn apply_items_operation(
    items: &[SelectionItem],
    template: Option<&str>,
    working_dir: Option<&Path>,
) -> Result<ApplyResult> {
    let workspace = Workspace::load(working_dir)?;
    let _lock = StateLock::acquire(&workspace.state_dir())
        .context("Failed to acquire lock for photoname operation")?;

    let template = workspace.template(template);
    let template = resolve_template(&template).to_string();
    let rows = preview(items, &template);

    Ok(execute_plan(&workspace, Plan::new(template, rows)))
}

fn execute_plan(workspace: &Workspace, plan: Plan) -> ApplyResult {
    let Plan { template, mut rows, .. } = plan;
    let log = UndoLog::new(workspace.log_path());
    let result = execute(&mut rows, &log);

    ApplyResult {
        template,
        rows,
        result,
        log_path: log.path().to_path_buf(),
    }
}
