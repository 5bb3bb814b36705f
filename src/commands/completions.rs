//! Shell completion generation

use clap::CommandFactory;
use clap_complete::Shell;

use crate::Cli;

/// Write completions for `shell` to stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "huectl", &mut std::io::stdout());
}
