use anyhow::Result;

use super::super::args::ExtractCommand;
use super::helper::{finish, load_project, source_dir};
use super::{CommandResult, CommandSummary, ExtractSummary};
use crate::core::{
    pipeline::{ExtractOptions, Pipeline},
    rewrite::NextAppRouterInspector,
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let project = load_project(&cmd.common)?;
    let source_dir = source_dir(&cmd.dir)?;

    let options = ExtractOptions {
        dry_run: cmd.dry_run,
        backup: cmd.backup,
        cleanup: cmd.cleanup,
    };

    let report = Pipeline::new(&project.root, &project.config, &NextAppRouterInspector)
        .verbose(cmd.common.verbose)
        .extract(&source_dir, options)?;

    let failure_count = report.rewrite.failures.len();
    Ok(finish(
        CommandSummary::Extract(ExtractSummary {
            root: project.root,
            cleanup: cmd.cleanup,
            report,
        }),
        failure_count,
    ))
}
