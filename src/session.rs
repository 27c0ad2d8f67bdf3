//! Explicit per-user context object: project name, Layer Store and user-visible notices.

use std::fmt;

use tracing::warn;

use crate::{
    config::SessionConfig,
    feature::{CaseProperties, FeatureId},
    store::{LayerStore, StoreError},
    sync::{append_one, pull_replace, push_replace, ExternalTable, PullOutcome},
};

/// A message meant for the user, recorded instead of failing the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Info(msg) => write!(f, "{msg}"),
            Notice::Warning(msg) => write!(f, "warning: {msg}"),
        }
    }
}

/// One interactive session. Sync failures never abort it: they become
/// [`Notice::Warning`]s and leave the store unchanged.
#[derive(Debug, Clone)]
pub struct Session {
    pub name: String,
    pub store: LayerStore,
    notices: Vec<Notice>,
}

impl Session {
    /// Start a session with the configured default layers.
    pub fn init(config: &SessionConfig) -> Self {
        Self::with_store(&config.project_name, LayerStore::with_layers(&config.default_layers))
    }

    /// Resume a session around an existing store.
    pub fn with_store(name: &str, store: LayerStore) -> Self {
        Self { name: name.to_string(), store, notices: Vec::new() }
    }

    pub fn notices(&self) -> &[Notice] { &self.notices }

    /// Hand over and clear the pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn has_warnings(&self) -> bool {
        self.notices.iter().any(|n| matches!(n, Notice::Warning(_)))
    }

    fn warn(&mut self, message: String) {
        warn!("[session] {message}");
        self.notices.push(Notice::Warning(message));
    }

    fn info(&mut self, message: String) {
        self.notices.push(Notice::Info(message));
    }

    /// Replace the external table with the local store. Returns whether it succeeded.
    pub fn push(&mut self, table: &mut dyn ExternalTable) -> bool {
        match push_replace(&self.store, table) {
            Ok(count) => {
                self.info(format!("Replaced external table with {count} cases"));
                true
            }
            Err(e) => {
                self.warn(format!("Sync failed, external table not updated: {e}"));
                false
            }
        }
    }

    /// Reload the local store from the external table. Returns whether the store was replaced.
    pub fn pull(&mut self, table: &mut dyn ExternalTable) -> bool {
        match pull_replace(&mut self.store, table) {
            Ok(PullOutcome::Replaced(report)) => {
                self.info(format!(
                    "Loaded {} cases in {} layers ({} rows skipped)",
                    report.imported, report.layers, report.skipped
                ));
                true
            }
            Ok(PullOutcome::NoData) => {
                self.info("External table has no data; keeping local cases".to_string());
                false
            }
            Ok(PullOutcome::NothingValid(report)) => {
                self.warn(format!("None of the {} external rows were valid; keeping local cases", report.skipped));
                false
            }
            Err(e) => {
                self.warn(format!("Sync failed, local cases kept: {e}"));
                false
            }
        }
    }

    /// Add a case locally, then append it to the table.
    /// The local append stands even when the remote append fails.
    pub fn append_synced(
        &mut self,
        table: &mut dyn ExternalTable,
        layer: &str,
        lon: f64,
        lat: f64,
        properties: CaseProperties,
    ) -> Result<FeatureId, StoreError> {
        let feature = self.store.append_feature(layer, lon, lat, properties)?.clone();
        let color = self.store.layer(layer).map(|l| l.color().to_string()).unwrap_or_default();
        if let Err(e) = append_one(table, &feature, &color) {
            self.warn(format!("Case saved locally but not synced: {e}"));
        }
        Ok(feature.id().clone())
    }
}
