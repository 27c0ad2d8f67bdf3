pub mod dashboard;
pub mod export;
pub mod import;
pub mod init;
pub mod layer;
pub mod point;
pub mod sync;

use anyhow::{bail, Result};
use casemap::{io::snapshot::SessionSnapshot, Session};

use crate::cli::Cli;

/// Load the session named on the command line. It must have been created with `init`.
pub(crate) fn load_session(cli: &Cli) -> Result<Session> {
    if !cli.session.exists() {
        bail!("No session at {} (run `casemap init` first)", cli.session.display());
    }
    let (name, store) = SessionSnapshot::read_from_file(&cli.session)?.into_store()?;
    Ok(Session::with_store(&name, store))
}

/// Persist the session and print any notices it collected.
pub(crate) fn save_session(cli: &Cli, session: &mut Session) -> Result<()> {
    for notice in session.take_notices() {
        eprintln!("{notice}");
    }
    SessionSnapshot::new(&session.name, &session.store).write_to_file(&cli.session)
}
