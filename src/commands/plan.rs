//! Plan command implementation

use std::path::{Path, PathBuf};

use crate::cli::PlanArgs;
use crate::commands::helpers;
use crate::error::Result;
use crate::pipeline::freezer::process_env;
use crate::pipeline::{Plan, metadata};
use crate::process::SystemRunner;
use crate::ui;

/// Run plan command
pub fn run(workspace: Option<PathBuf>, config: Option<&Path>, args: PlanArgs) -> Result<()> {
    let (workspace, config) = helpers::load_context(workspace, config)?;
    let editor = metadata::editor_for(&config.metadata, &workspace, &SystemRunner);
    let plan = Plan::build(
        &workspace,
        &config,
        &args.freezer_args,
        editor.as_ref(),
        process_env,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display(&plan);
    }
    Ok(())
}

/// Print a plan in human-readable form
pub fn display(plan: &Plan) {
    ui::field("Workspace:", &plan.workspace.display().to_string());
    match &plan.preflight {
        Some(cmd) => ui::field("Preflight:", &cmd.command_line()),
        None => ui::field("Preflight:", "skipped (version generator present)"),
    }
    ui::field("Version:", &plan.version.command_line());
    ui::field("Freezer:", &plan.freezer.command_line());
    ui::field("Bundle:", &plan.bundle.display().to_string());
    ui::field(
        "Metadata:",
        &format!("{} ({})", plan.info_plist.display(), plan.editor),
    );
    for edit in &plan.edits {
        ui::detail(&edit.to_string());
    }
}
