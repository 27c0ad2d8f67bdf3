use anyhow::Result;
use casemap::{sync::CsvFileTable, CaseProperties, PropertiesPatch, ResponsibleParty};

use crate::cli::{Cli, PointCommand, PropertyArgs};

impl PropertyArgs {
    fn to_properties(&self) -> CaseProperties {
        CaseProperties {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            date: self.date.clone().unwrap_or_default(),
            responsible: self.responsible.as_deref().map(ResponsibleParty::parse_lossy).unwrap_or_default(),
            region: self.region.clone().unwrap_or_default(),
            subregion: self.subregion.clone().unwrap_or_default(),
            impact: self.impact.clone(),
            evidence_url: self.evidence_url.clone(),
        }
    }

    /// Blank values clear the optional fields.
    fn to_patch(&self) -> PropertiesPatch {
        PropertiesPatch {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            responsible: self.responsible.as_deref().map(ResponsibleParty::parse_lossy),
            region: self.region.clone(),
            subregion: self.subregion.clone(),
            impact: self.impact.clone().map(Some),
            evidence_url: self.evidence_url.clone().map(Some),
        }
    }
}

pub fn run(cli: &Cli, cmd: &PointCommand) -> Result<()> {
    let mut session = super::load_session(cli)?;

    match cmd {
        PointCommand::Add { layer, lon, lat, props, sync } => {
            let properties = props.to_properties();
            let id = match sync {
                Some(path) => session.append_synced(&mut CsvFileTable::new(path), layer, *lon, *lat, properties)?,
                None => session.store.append_feature(layer, *lon, *lat, properties)?.id().clone(),
            };
            let feature = session.store.locate(&id).and_then(|(l, i)| session.store.feature(l, i).ok());
            if let Some(feature) = feature.filter(|f| !f.in_wgs84_bounds()) {
                eprintln!("warning: ({}, {}) is outside WGS84 bounds", feature.lon(), feature.lat());
            }
            println!("Added case {id} to '{layer}'");
        }
        PointCommand::Delete { layer, index } => {
            let feature = session.store.delete_feature(layer, *index)?;
            println!("Deleted case {} from '{layer}'", feature.id());
        }
        PointCommand::Edit { layer, index, props } => {
            let feature = session.store.update_feature_properties(layer, *index, props.to_patch())?;
            println!("Updated case {}", feature.id());
        }
        PointCommand::Move { layer, index, lon, lat } => {
            let feature = session.store.move_feature(layer, *index, *lon, *lat)?;
            println!("Moved case {} to ({}, {})", feature.id(), feature.lon(), feature.lat());
        }
        PointCommand::List { layer } => {
            for l in session.store.layers().iter().filter(|l| layer.as_deref().is_none_or(|name| l.name() == name)) {
                for (i, f) in l.features().iter().enumerate() {
                    let p = f.properties();
                    println!("{}\t{i}\t{}\t{}\t{}\t{}\t{}", l.name(), f.id(), f.lon(), f.lat(), p.title, p.date);
                }
            }
            return Ok(());
        }
    }

    super::save_session(cli, &mut session)
}
