mod blacklist;
mod freeze_mutes;
mod guild_setting;
mod mutes;

pub use blacklist::BlacklistSchema;
pub use freeze_mutes::FreezeMuteSchema;
pub use guild_setting::GuildSettingSchema;
pub use mutes::MuteSchema;
