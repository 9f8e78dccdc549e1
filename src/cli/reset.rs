use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("reset")
        .about("Move the current branch to a commit and match the working directory to it")
        .arg(
            Arg::with_name("commit")
                .required(true)
                .help("Commit ID, or a unique prefix of one"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let commit = args.value_of("commit").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.reset(commit)) {
        Ok(()) => Ok(()),
        Err(err) => cli.report(err),
    }
}
