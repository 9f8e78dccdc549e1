use std::io::Write;

use super::{find_repo, Cli, Result};

use crate::repo::MergeOutcome;

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("merge")
        .about("Merge another branch into the current branch")
        .arg(
            Arg::with_name("branch")
                .required(true)
                .help("Branch to merge from (or remote/branch)"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let branch = args.value_of("branch").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.merge(branch)) {
        Ok(outcome) => print_outcome(cli, outcome),
        Err(err) => cli.report(err),
    }
}

/// Shared with `pull`, which ends in the same merge.
pub(crate) fn print_outcome(cli: &mut Cli, outcome: MergeOutcome) -> Result {
    match outcome {
        MergeOutcome::AlreadyAncestor => {
            writeln!(cli, "Given branch is an ancestor of the current branch.")?;
        }
        MergeOutcome::FastForwarded => {
            writeln!(cli, "Current branch fast-forwarded.")?;
        }
        MergeOutcome::Merged { conflicts, .. } => {
            if !conflicts.is_empty() {
                writeln!(cli, "Encountered a merge conflict.")?;
            }
        }
    }
    Ok(())
}
