//! Build command implementation

use std::path::{Path, PathBuf};

use crate::cli::BuildArgs;
use crate::commands::{helpers, plan};
use crate::error::Result;
use crate::pipeline::freezer::process_env;
use crate::pipeline::{BuildOptions, Pipeline, Plan, metadata};
use crate::process::SystemRunner;
use crate::ui;

/// Run build command
pub fn run(workspace: Option<PathBuf>, config: Option<&Path>, args: BuildArgs) -> Result<()> {
    let (workspace, config) = helpers::load_context(workspace, config)?;
    let runner = SystemRunner;
    let editor = metadata::editor_for(&config.metadata, &workspace, &runner);

    if args.dry_run {
        ui::dry_run_banner();
        let plan = Plan::build(
            &workspace,
            &config,
            &args.freezer_args,
            editor.as_ref(),
            process_env,
        )?;
        plan::display(&plan);
        return Ok(());
    }

    let options = BuildOptions {
        passthrough: args.freezer_args,
        clean: args.clean,
    };
    let mut pipeline = Pipeline::new(&workspace, &config, &runner, editor.as_ref());
    let report = pipeline.run(&options, process_env)?;

    ui::success(
        &format!("Built {} {}", config.name, report.version.version),
        &report.bundle_path,
    );
    ui::detail(&format!("patched {}", report.info_plist.display()));
    Ok(())
}
