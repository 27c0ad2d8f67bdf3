use anyhow::{bail, Result};
use casemap::{Session, SessionConfig};
use tracing::info;

use crate::cli::{Cli, InitArgs};

pub fn run(cli: &Cli, args: &InitArgs) -> Result<()> {
    if cli.session.exists() && !args.force {
        bail!("Refusing to overwrite existing session: {} (use --force)", cli.session.display());
    }

    let mut config = match &args.config {
        Some(path) => SessionConfig::read_from_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(name) = &args.name {
        config.project_name = name.clone();
    }

    let mut session = Session::init(&config);
    info!("[init] project={} layers={}", session.name, session.store.num_layers());
    super::save_session(cli, &mut session)?;
    println!("Created session '{}' with {} layers -> {}", session.name, session.store.num_layers(), cli.session.display());
    Ok(())
}
