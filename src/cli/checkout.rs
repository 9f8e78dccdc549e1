use std::io::Write;

use super::{find_repo, Cli, Result};

use crate::repo;

use clap::{App, Arg, ArgMatches, SubCommand};

/// Three spellings share one subcommand, as in the original git
/// syntax: `checkout <branch>`, `checkout -- <file>`, and
/// `checkout <commit> -- <file>`.
pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("checkout")
        .about("Restore a branch, or one file, into the working directory")
        .arg(Arg::with_name("target").help("Branch name, or commit prefix when restoring a file"))
        .arg(
            Arg::with_name("file")
                .last(true)
                .help("File to restore (after --)"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let outcome = match (args.value_of("target"), args.value_of("file")) {
        (Some(branch), None) => {
            find_repo::from_matches(args).and_then(|repo| repo.checkout_branch(branch))
        }
        (None, Some(file)) => {
            find_repo::from_matches(args).and_then(|repo| repo.checkout_file_from_head(file))
        }
        (Some(commit), Some(file)) => find_repo::from_matches(args)
            .and_then(|repo| repo.checkout_file_from_commit(commit, file)),
        (None, None) => {
            writeln!(cli, "Incorrect operands.")?;
            return Ok(());
        }
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(repo::Error::NoSuchBranch(_)) => {
            writeln!(cli, "No such branch exists.")?;
            Ok(())
        }
        Err(repo::Error::FileNotFound(_)) => {
            writeln!(cli, "File does not exist in that commit.")?;
            Ok(())
        }
        Err(err) => cli.report(err),
    }
}
