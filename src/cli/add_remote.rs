use std::path::Path;

use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("add-remote")
        .about("Register another repository under a name")
        .arg(Arg::with_name("name").required(true).help("Remote name"))
        .arg(
            Arg::with_name("location")
                .required(true)
                .help("Path to the other repository"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let name = args.value_of("name").unwrap();
    let location = args.value_of("location").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.add_remote(name, Path::new(location)))
    {
        Ok(()) => Ok(()),
        Err(err) => cli.report(err),
    }
}
