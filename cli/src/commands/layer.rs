use anyhow::Result;

use crate::cli::{Cli, LayerCommand};

pub fn run(cli: &Cli, cmd: &LayerCommand) -> Result<()> {
    let mut session = super::load_session(cli)?;
    let store = &mut session.store;

    match cmd {
        LayerCommand::Add { name, color, hidden } => {
            let layer = store.create_layer(name, color, !hidden)?;
            println!("Created layer '{}' ({})", layer.name(), layer.color());
        }
        LayerCommand::Remove { name } => {
            let layer = store.delete_layer(name)?;
            println!("Deleted layer '{}' and {} cases", layer.name(), layer.len());
        }
        LayerCommand::Style { name, color, visible } => {
            store.set_layer_style(name, color.as_deref(), *visible)?;
            println!("Updated layer '{name}'");
        }
        LayerCommand::Rename { old, new } => {
            store.rename_layer(old, new)?;
            println!("Renamed layer '{old}' -> '{new}'");
        }
        LayerCommand::List => {
            for layer in store.layers() {
                let shown = if layer.visible() { "visible" } else { "hidden" };
                println!("{}\t{}\t{}\t{} cases", layer.name(), layer.color(), shown, layer.len());
            }
            return Ok(());
        }
    }

    super::save_session(cli, &mut session)
}
