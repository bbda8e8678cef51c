use anyhow::Result;

use super::super::args::TransformCommand;
use super::helper::{finish, load_project, source_dir};
use super::{CommandResult, CommandSummary, TransformSummary};
use crate::core::{pipeline::Pipeline, rewrite::NextAppRouterInspector};

pub fn transform(cmd: TransformCommand) -> Result<CommandResult> {
    let project = load_project(&cmd.common)?;
    let source_dir = source_dir(&cmd.dir)?;

    let report = Pipeline::new(&project.root, &project.config, &NextAppRouterInspector)
        .verbose(cmd.common.verbose)
        .transform(&source_dir, cmd.dry_run)?;

    let failure_count = report.rewrite.failures.len();
    Ok(finish(
        CommandSummary::Transform(TransformSummary {
            root: project.root,
            report,
        }),
        failure_count,
    ))
}
