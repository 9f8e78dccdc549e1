use super::{find_repo, Cli, Result};

use clap::{App, Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("add")
        .about("Stage a file's current content for the next commit")
        .arg(Arg::with_name("file").required(true).help("File to stage"))
}

pub(crate) fn run(cli: &mut Cli, args: &ArgMatches) -> Result {
    let filename = args.value_of("file").unwrap();

    match find_repo::from_matches(args).and_then(|repo| repo.add(filename)) {
        Ok(()) => Ok(()),
        Err(err) => cli.report(err),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::Cli;

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let dirstr = dir.path().to_str().unwrap();

        Cli::run_with_args(vec!["mingit", "-C", dirstr, "init"]).unwrap();
        let stdout = Cli::run_with_args(vec!["mingit", "-C", dirstr, "add", "wug.txt"]).unwrap();

        assert_eq!(stdout, b"File does not exist.\n" as &[u8]);
    }

    #[test]
    fn staged_file_shows_in_status() {
        let dir = tempfile::tempdir().unwrap();
        let dirstr = dir.path().to_str().unwrap();
        std::fs::write(dir.path().join("wug.txt"), "This is a wug.\n").unwrap();

        Cli::run_with_args(vec!["mingit", "-C", dirstr, "init"]).unwrap();
        let stdout = Cli::run_with_args(vec!["mingit", "-C", dirstr, "add", "wug.txt"]).unwrap();
        assert_eq!(stdout, b"" as &[u8]);

        let status = Cli::run_with_args(vec!["mingit", "-C", dirstr, "status"]).unwrap();
        let status = String::from_utf8(status).unwrap();
        assert!(status.contains("=== Staged Files ===\nwug.txt\n"));
    }
}
