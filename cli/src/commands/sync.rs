use anyhow::Result;
use casemap::sync::CsvFileTable;

use crate::cli::{Cli, SyncCommand};

pub fn run(cli: &Cli, cmd: &SyncCommand) -> Result<()> {
    let mut session = super::load_session(cli)?;

    let changed = match cmd {
        SyncCommand::Push { table } => {
            session.push(&mut CsvFileTable::new(table));
            false
        }
        SyncCommand::Pull { table } => session.pull(&mut CsvFileTable::new(table)),
    };

    if changed {
        return super::save_session(cli, &mut session);
    }
    for notice in session.take_notices() {
        eprintln!("{notice}");
    }
    Ok(())
}
