use std::env;
use std::path::PathBuf;

use clap::ArgMatches;

use crate::repo::{self, Repository};

/// Honor the global `-C <dir>` flag, defaulting to the process's
/// current directory.
pub(crate) fn work_dir_from(args: &ArgMatches) -> repo::Result<PathBuf> {
    match args.value_of("workdir") {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(env::current_dir()?),
    }
}

pub(crate) fn from_matches(args: &ArgMatches) -> repo::Result<Repository> {
    Repository::open(&work_dir_from(args)?)
}
