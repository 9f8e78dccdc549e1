use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("rm-remote")
        .about("Forget a registered remote")
        .arg(Arg::with_name("name").required(true).help("Remote name"))
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let name = args.value_of("name").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.rm_remote(name)) {
        Ok(()) => Ok(()),
        Err(err) => cli.report(err),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;

    #[test]
    fn unknown_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let dirstr = dir.path().to_str().unwrap();

        Cli::run_with_args(vec!["mingit", "-C", dirstr, "init"]).unwrap();
        let stdout =
            Cli::run_with_args(vec!["mingit", "-C", dirstr, "rm-remote", "origin"]).unwrap();

        assert_eq!(stdout, b"A remote with that name does not exist.\n" as &[u8]);
    }
}
