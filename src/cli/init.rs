use super::{find_repo, Cli, Result};

use crate::repo::Repository;

use clap::{App, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("init").about("Create an empty repository in the working directory")
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let work_dir = find_repo::work_dir_from(args)?;

    match Repository::init(&work_dir) {
        Ok(_) => Ok(()),
        Err(err) => cli.report(err),
    }
}
