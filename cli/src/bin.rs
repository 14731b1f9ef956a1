use std::{
    error::Error,
    io::{self, Write},
};

use tracing_subscriber::EnvFilter;

mod app;
pub(crate) use app::App;

mod cmds;
mod find_repo;
mod format;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Environment variable holding the log filter, e.g. `GITLET_LOG=debug`.
const LOG_ENV: &str = "GITLET_LOG";

#[allow(unused_must_use)]
#[cfg(not(tarpaulin_include))]
fn main() {
    // Kept small: everything reachable from here is covered through `App`.

    init_logging();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut app = App {
        arg_matches: app::clap_app().get_matches(),
        stdout: &mut stdout,
        work_dir: None,
    };

    let r = app.run();

    app.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", err);
            exit_code(err.as_ref())
        }
    });
}

#[cfg(not(tarpaulin_include))]
fn init_logging() {
    // Logs go to stderr so stdout stays command output.
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Map a command failure to the process exit status.
pub(crate) fn exit_code(err: &(dyn Error + 'static)) -> i32 {
    match err.downcast_ref::<gitlet_core::repo::Error>() {
        Some(err) => err.exit_code(),
        None => 101,
    }
}
