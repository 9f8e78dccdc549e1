use std::io::Write;

use super::{find_repo, Cli, Result};

use crate::object::Commit;

use chrono::{Local, TimeZone};
use clap::{App, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("log").about("Show the current branch's history, newest first")
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    match find_repo::from_matches(args).and_then(|repo| repo.log()) {
        Ok(commits) => {
            for commit in &commits {
                print_commit(cli, commit)?;
            }
            Ok(())
        }
        Err(err) => cli.report(err),
    }
}

/// One log entry: a `===` rule, the full ID, the date, the message,
/// and a blank separator line.
pub(crate) fn print_commit(cli: &mut Cli, commit: &Commit) -> Result {
    writeln!(cli, "===")?;
    writeln!(cli, "commit {}", commit.id())?;
    writeln!(cli, "Date {}", date_string(commit.timestamp()))?;
    writeln!(cli, "{}", commit.message())?;
    writeln!(cli)?;
    Ok(())
}

fn date_string(timestamp: i64) -> String {
    // e.g. "Thu Nov 9 20:00:05 2017 -0800"
    match Local.timestamp_opt(timestamp, 0).single() {
        Some(date) => date.format("%a %b %-d %H:%M:%S %Y %z").to_string(),
        None => timestamp.to_string(),
    }
}
