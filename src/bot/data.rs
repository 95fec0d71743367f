use std::fmt;
use std::sync::Arc;

use crate::config::Settings;
use crate::services::store::SettingsStore;

/// Shared data available to all commands and handlers
pub struct Data {
    pub settings: Settings,
    /// Settings and moderation ledgers, loaded before the client starts
    pub store: SettingsStore,
}

impl Data {
    pub fn new(settings: Settings, store: SettingsStore) -> Self {
        Self { settings, store }
    }
}

impl fmt::Debug for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("command_prefix", &self.settings.command_prefix)
            .field("active_mutes", &self.store.mutes.active_mutes(chrono::Utc::now()).len())
            .finish_non_exhaustive()
    }
}

pub type Context<'a> = poise::Context<'a, Arc<Data>, crate::bot::error::Error>;
