use std::io::{self, Write};
use std::process::exit;

use mingit::cli::{app, Cli};

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let arg_matches = app().get_matches();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let result = Cli {
        arg_matches,
        stdout: &mut stdout,
    }
    .run();

    let code = match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    };

    stdout.flush().unwrap_or(());
    exit(code);
}
