use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, extract::extract, init::init, transform::transform},
};

/// Dispatch to the command handler.
///
/// Returns `Err` when the command aborts (parse error, missing catalog,
/// config error); file-scoped failures are counted in the result.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Transform(cmd)) => transform(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
