use std::io::Write;

use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("find")
        .about("List the IDs of commits whose message contains the given text")
        .arg(
            Arg::with_name("message")
                .required(true)
                .help("Text to look for"),
        )
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let needle = args.value_of("message").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.find(needle)) {
        Ok(ids) => {
            if ids.is_empty() {
                writeln!(cli, "Found no commit with that message.")?;
            } else {
                for id in &ids {
                    writeln!(cli, "{}", id)?;
                }
                writeln!(cli)?;
            }
            Ok(())
        }
        Err(err) => cli.report(err),
    }
}
