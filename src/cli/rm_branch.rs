use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("rm-branch")
        .about("Delete a branch pointer, leaving its commits in place")
        .arg(Arg::with_name("name").required(true).help("Branch name"))
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let name = args.value_of("name").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.rm_branch(name)) {
        Ok(()) => Ok(()),
        Err(err) => cli.report(err),
    }
}
