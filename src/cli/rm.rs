use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("rm")
        .about("Unstage a file, or mark a tracked file for removal")
        .arg(Arg::with_name("file").required(true).help("File to remove"))
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let filename = args.value_of("file").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.remove(filename)) {
        Ok(()) => Ok(()),
        Err(err) => cli.report(err),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;

    #[test]
    fn untracked_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let dirstr = dir.path().to_str().unwrap();
        std::fs::write(dir.path().join("wug.txt"), "This is a wug.\n").unwrap();

        Cli::run_with_args(vec!["mingit", "-C", dirstr, "init"]).unwrap();
        let stdout = Cli::run_with_args(vec!["mingit", "-C", dirstr, "rm", "wug.txt"]).unwrap();

        assert_eq!(stdout, b"No reason to remove the file.\n" as &[u8]);
    }
}
