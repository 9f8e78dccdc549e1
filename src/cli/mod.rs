//! Command-line front end: one subcommand per repository operation.
//!
//! Expected failures (a missing file, a branch that already exists)
//! print their one-line explanation on stdout and count as success;
//! only a damaged repository or I/O trouble makes the process exit
//! nonzero.

use std::error::Error;
use std::io::Write;

use clap::{crate_version, App, AppSettings, Arg, ArgMatches};

use crate::repo;

mod add;
mod add_remote;
mod branch;
mod checkout;
mod commit;
mod fetch;
mod find;
mod find_repo;
mod global_log;
mod init;
mod log;
mod merge;
mod pull;
mod push;
mod reset;
mod rm;
mod rm_branch;
mod rm_remote;
mod status;

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("mingit")
        .version(crate_version!())
        .about("Minimal single-user version control")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("workdir")
                .short("C")
                .value_name("dir")
                .takes_value(true)
                .global(true)
                .help("Run as if started in this directory"),
        )
        .subcommand(init::subcommand())
        .subcommand(add::subcommand())
        .subcommand(rm::subcommand())
        .subcommand(commit::subcommand())
        .subcommand(log::subcommand())
        .subcommand(global_log::subcommand())
        .subcommand(find::subcommand())
        .subcommand(status::subcommand())
        .subcommand(checkout::subcommand())
        .subcommand(branch::subcommand())
        .subcommand(rm_branch::subcommand())
        .subcommand(reset::subcommand())
        .subcommand(merge::subcommand())
        .subcommand(add_remote::subcommand())
        .subcommand(rm_remote::subcommand())
        .subcommand(push::subcommand())
        .subcommand(fetch::subcommand())
        .subcommand(pull::subcommand())
}

pub type Result = std::result::Result<(), Box<dyn Error>>;

pub struct Cli<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdout: &'a mut dyn Write,
}

impl<'a> Cli<'a> {
    pub fn run(&mut self) -> Result {
        let matches = self.arg_matches.clone();
        // ^^ Need an independent copy of matches so we can still pass
        // the Cli struct through to subcommand imps.

        match matches.subcommand() {
            ("init", Some(args)) => init::run(self, args),
            ("add", Some(args)) => add::run(self, args),
            ("rm", Some(args)) => rm::run(self, args),
            ("commit", Some(args)) => commit::run(self, args),
            ("log", Some(args)) => log::run(self, args),
            ("global-log", Some(args)) => global_log::run(self, args),
            ("find", Some(args)) => find::run(self, args),
            ("status", Some(args)) => status::run(self, args),
            ("checkout", Some(args)) => checkout::run(self, args),
            ("branch", Some(args)) => branch::run(self, args),
            ("rm-branch", Some(args)) => rm_branch::run(self, args),
            ("reset", Some(args)) => reset::run(self, args),
            ("merge", Some(args)) => merge::run(self, args),
            ("add-remote", Some(args)) => add_remote::run(self, args),
            ("rm-remote", Some(args)) => rm_remote::run(self, args),
            ("push", Some(args)) => push::run(self, args),
            ("fetch", Some(args)) => fetch::run(self, args),
            ("pull", Some(args)) => pull::run(self, args),
            _ => unreachable!(),
            // unreachable: Should have exited out with appropriate help or
            // error message if no subcommand was given.
        }
    }

    /// Print the canonical one-line explanation for an expected
    /// failure and swallow it. Anything that points at a damaged
    /// repository falls through to `main` and a nonzero exit.
    pub(crate) fn report(&mut self, err: repo::Error) -> Result {
        use repo::Error::*;

        let message = match &err {
            NotInitialized => "Not in an initialized mingit directory.",
            AlreadyInitialized => {
                "A mingit version-control system already exists in the current directory"
            }
            FileNotFound(_) => "File does not exist.",
            NothingToStage(_) => "File cannot be staged.",
            NothingToRemove(_) => "No reason to remove the file.",
            EmptyCommitMessage => "Please enter a commit message.",
            NothingToCommit => "No changes added to the commit.",
            NoSuchBranch(_) => "A branch with that name does not exist.",
            NoSuchCommit(_) => "No commit with that id exists.",
            BranchAlreadyExists(_) => "A branch with that name already exists.",
            CannotRemoveCurrentBranch => "Cannot remove the current branch.",
            CannotCheckoutCurrentBranch(_) => "No need to checkout the current branch.",
            UntrackedFileConflict => {
                "There is an untracked file in the way; delete it, or add and commit it first."
            }
            MergeWithUncommittedChanges => "You have uncommitted changes.",
            CannotMergeSelf => "Cannot merge a branch with itself.",
            RemoteNotFound(_) => "A remote with that name does not exist.",
            RemoteAlreadyExists(_) => "A remote with that name already exists.",
            NoSuchRemoteBranch(_) => "That remote does not have that branch.",
            RequirePullFirst => "Please pull down remote changes before pushing.",
            _ => return Err(err.into()),
        };

        writeln!(self, "{}", message)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(itr: I) -> std::result::Result<Vec<u8>, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut stdout = Vec::new();

        Cli {
            arg_matches: app().get_matches_from_safe(itr)?,
            stdout: &mut stdout,
        }
        .run()?;

        Ok(stdout)
    }
}

impl<'a> Write for Cli<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    #[test]
    fn no_subcommand_prints_help() {
        let mut cmd = Command::cargo_bin("mingit").unwrap();
        cmd.assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::starts_with("mingit 0."))
            .stderr(predicate::str::contains("USAGE:"));
    }

    #[test]
    fn version() {
        let mut cmd = Command::cargo_bin("mingit").unwrap();
        cmd.arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("mingit 0."))
            .stderr("");
    }

    #[test]
    fn commands_require_an_initialized_directory() {
        let dir = tempfile::tempdir().unwrap();
        let dirstr = dir.path().to_str().unwrap();

        let stdout = super::Cli::run_with_args(vec!["mingit", "-C", dirstr, "status"]).unwrap();
        assert_eq!(stdout, b"Not in an initialized mingit directory.\n" as &[u8]);
    }
}
