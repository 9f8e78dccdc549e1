use std::io::Write;

use super::{find_repo, merge, Cli, Result};

use crate::repo;

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("pull")
        .about("Fetch a remote branch, then merge it into the current branch")
        .arg(Arg::with_name("remote").required(true).help("Remote name"))
        .arg(Arg::with_name("branch").required(true).help("Branch name"))
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let remote = args.value_of("remote").unwrap();
    let branch = args.value_of("branch").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.pull(remote, branch)) {
        Ok(outcome) => merge::print_outcome(cli, outcome),
        Err(repo::Error::RemoteNotFound(_)) => {
            writeln!(cli, "Remote directory not found.")?;
            Ok(())
        }
        Err(err) => cli.report(err),
    }
}
