use serenity::all::{ChannelId, GuildId, RoleId};
use sqlx::SqlitePool;
use tracing::info;

use crate::bot::error::Error;
use crate::db::models::GuildSettingsRecord;
use crate::db::tables::GuildSettingSchema;
use crate::db::KeyedTable;

/// Fallbacks for guilds that never configured a setting
pub trait GuildDefaults {
    /// The guild's system channel
    fn default_channel(&self, guild_id: GuildId) -> Option<ChannelId>;

    /// A role whose name is "antarctica", ignoring case
    fn default_mute_role(&self, guild_id: GuildId) -> Option<RoleId>;
}

/// Per-guild trash channel, mute channel and mute role
pub struct GuildSettingsStore {
    trash_channels: KeyedTable<GuildSettingSchema<ChannelId>>,
    mute_channels: KeyedTable<GuildSettingSchema<ChannelId>>,
    mute_roles: KeyedTable<GuildSettingSchema<RoleId>>,
}

impl GuildSettingsStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            trash_channels: KeyedTable::new(pool.clone(), GuildSettingSchema::trash_channels()),
            mute_channels: KeyedTable::new(pool.clone(), GuildSettingSchema::mute_channels()),
            mute_roles: KeyedTable::new(pool, GuildSettingSchema::mute_roles()),
        }
    }

    pub async fn create_tables(&self) -> Result<(), Error> {
        self.trash_channels.create_table().await?;
        self.mute_channels.create_table().await?;
        self.mute_roles.create_table().await?;
        Ok(())
    }

    pub async fn load_from_db(&self) -> Result<(), Error> {
        self.trash_channels.load_from_db().await?;
        self.mute_channels.load_from_db().await?;
        self.mute_roles.load_from_db().await?;
        Ok(())
    }

    // Trash channel

    pub fn get_trash_channel(&self, guild_id: GuildId) -> Option<ChannelId> {
        self.trash_channels.get(&guild_id)
    }

    pub async fn set_trash_channel(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), Error> {
        self.trash_channels.set(guild_id, channel_id).await?;
        info!("Guild {} trash channel set to {}", guild_id, channel_id);
        Ok(())
    }

    pub async fn set_trash_channel_by_id(&self, guild_id: u64, channel_id: ChannelId) -> Result<(), Error> {
        self.trash_channels.set_by_id(guild_id, channel_id).await
    }

    pub fn resolve_trash_channel(&self, guild_id: GuildId, defaults: &impl GuildDefaults) -> Option<ChannelId> {
        self.get_trash_channel(guild_id)
            .or_else(|| defaults.default_channel(guild_id))
    }

    // Mute channel

    pub fn get_mute_channel(&self, guild_id: GuildId) -> Option<ChannelId> {
        self.mute_channels.get(&guild_id)
    }

    pub async fn set_mute_channel(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), Error> {
        self.mute_channels.set(guild_id, channel_id).await?;
        info!("Guild {} mute channel set to {}", guild_id, channel_id);
        Ok(())
    }

    pub async fn set_mute_channel_by_id(&self, guild_id: u64, channel_id: ChannelId) -> Result<(), Error> {
        self.mute_channels.set_by_id(guild_id, channel_id).await
    }

    pub fn resolve_mute_channel(&self, guild_id: GuildId, defaults: &impl GuildDefaults) -> Option<ChannelId> {
        self.get_mute_channel(guild_id)
            .or_else(|| defaults.default_channel(guild_id))
    }

    // Mute role

    pub fn get_mute_role(&self, guild_id: GuildId) -> Option<RoleId> {
        self.mute_roles.get(&guild_id)
    }

    pub async fn set_mute_role(&self, guild_id: GuildId, role_id: RoleId) -> Result<(), Error> {
        self.mute_roles.set(guild_id, role_id).await?;
        info!("Guild {} mute role set to {}", guild_id, role_id);
        Ok(())
    }

    pub async fn set_mute_role_by_id(&self, guild_id: u64, role_id: RoleId) -> Result<(), Error> {
        self.mute_roles.set_by_id(guild_id, role_id).await
    }

    pub fn resolve_mute_role(&self, guild_id: GuildId, defaults: &impl GuildDefaults) -> Option<RoleId> {
        self.get_mute_role(guild_id)
            .or_else(|| defaults.default_mute_role(guild_id))
    }

    /// Configured values only, without fallbacks
    pub fn record(&self, guild_id: GuildId) -> GuildSettingsRecord {
        GuildSettingsRecord {
            guild_id,
            trash_channel_id: self.get_trash_channel(guild_id),
            mute_channel_id: self.get_mute_channel(guild_id),
            mute_role_id: self.get_mute_role(guild_id),
        }
    }
}
