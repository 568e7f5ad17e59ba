use super::Workspace;
use crate::model::SelectionItem;
use crate::output::PreviewResult;
use crate::plan::Plan;
use crate::preview::preview;
use crate::template::resolve_template;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Plan renames for `items` and save the plan for a later `apply_operation`.
///
/// If the plan cannot be saved, any older saved plan is removed so `apply`
/// never runs rows that were not just shown.
pub fn preview_operation(
    items: &[SelectionItem],
    template: Option<&str>,
    working_dir: Option<&Path>,
) -> Result<PreviewResult> {
    let workspace = Workspace::load(working_dir)?;
    let template = workspace.template(template);
    let template = resolve_template(&template).to_string();
    let rows = preview(items, &template);

    let plan_path = workspace.plan_path();
    let plan = Plan::new(template, rows);
    let saved = match plan.save(&plan_path) {
        Ok(()) => Some(plan_path),
        Err(e) => {
            tracing::warn!(
                path = %plan_path.display(),
                error = %format!("{e:#}"),
                "could not save plan; pass the files to apply directly"
            );
            if plan_path.exists() {
                fs::remove_file(&plan_path)?;
            }
            None
        },
    };

    Ok(PreviewResult {
        template: plan.template,
        rows: plan.rows,
        plan_path: saved,
    })
}
