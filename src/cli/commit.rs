use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("commit")
        .about("Record the staged changes as a new commit")
        .arg(
            Arg::with_name("message")
                .required(true)
                .help("Commit message"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let message = args.value_of("message").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.commit(message)) {
        Ok(_) => Ok(()),
        Err(err) => cli.report(err),
    }
}
