//! The moderation state of the whole bot, opened once at startup.

use sqlx::SqlitePool;
use tracing::info;

use crate::bot::error::Error;
use crate::services::moderation::{BlacklistLedger, MuteLedger};
use crate::services::settings::{FreezeMutes, GuildSettingsStore};

/// Every persisted table, constructed explicitly and handed to whoever needs it.
///
/// `open` creates all tables first and loads them afterwards; nothing may
/// read from the store before `open` has returned.
pub struct SettingsStore {
    pub guilds: GuildSettingsStore,
    pub freeze_mutes: FreezeMutes,
    pub mutes: MuteLedger,
    pub blacklist: BlacklistLedger,
}

impl SettingsStore {
    pub async fn open(pool: SqlitePool) -> Result<Self, Error> {
        let store = Self {
            guilds: GuildSettingsStore::new(pool.clone()),
            freeze_mutes: FreezeMutes::new(pool.clone()),
            mutes: MuteLedger::new(pool.clone()),
            blacklist: BlacklistLedger::new(pool),
        };

        info!("Creating settings tables");
        store.guilds.create_tables().await?;
        store.freeze_mutes.create_table().await?;
        store.mutes.create_table().await?;
        store.blacklist.create_table().await?;

        info!("Loading settings tables");
        store.guilds.load_from_db().await?;
        store.freeze_mutes.load_from_db().await?;
        store.mutes.load_from_db().await?;
        store.blacklist.load_from_db().await?;

        info!("All settings tables loaded");
        Ok(store)
    }
}
