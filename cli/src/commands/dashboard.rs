use anyhow::Result;
use casemap::dashboard::Dashboard;

use crate::cli::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    let session = super::load_session(cli)?;
    print!("{}", Dashboard::compute(&session.store.flatten()));
    Ok(())
}
