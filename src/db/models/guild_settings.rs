use serenity::all::{ChannelId, GuildId, RoleId};

/// Everything a guild has configured. `None` means "use the fallback".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSettingsRecord {
    pub guild_id: GuildId,
    pub trash_channel_id: Option<ChannelId>,
    pub mute_channel_id: Option<ChannelId>,
    pub mute_role_id: Option<RoleId>,
}
