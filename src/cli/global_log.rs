use std::io::Write;

use super::{find_repo, log, Cli, Result};

use clap::{App, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("global-log").about("Show every commit ever made, in ID order")
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    match find_repo::from_matches(args).and_then(|repo| repo.global_log()) {
        Ok(commits) => {
            for commit in &commits {
                log::print_commit(cli, commit)?;
            }
            writeln!(cli)?;
            Ok(())
        }
        Err(err) => cli.report(err),
    }
}
