use std::io::Write;

use super::{find_repo, Cli, Result};

use clap::{App, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("status").about("Summarize branches and pending changes")
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let report = match find_repo::from_matches(args).and_then(|repo| repo.status()) {
        Ok(report) => report,
        Err(err) => return cli.report(err),
    };

    writeln!(cli, "=== Branches ===")?;
    writeln!(cli, "*{}", report.current_branch)?;
    for branch in &report.branches {
        if branch != &report.current_branch {
            writeln!(cli, "{}", branch)?;
        }
    }
    writeln!(cli)?;

    writeln!(cli, "=== Staged Files ===")?;
    for filename in &report.staged {
        writeln!(cli, "{}", filename)?;
    }
    writeln!(cli)?;

    writeln!(cli, "=== Removed Files ===")?;
    for filename in &report.removed {
        writeln!(cli, "{}", filename)?;
    }
    writeln!(cli)?;

    writeln!(cli, "=== Modifications Not Staged For Commit ===")?;
    writeln!(cli)?;

    writeln!(cli, "=== Untracked Files ===")?;
    writeln!(cli)?;

    writeln!(cli)?;
    Ok(())
}
