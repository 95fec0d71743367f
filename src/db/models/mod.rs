mod guild_settings;
mod mute_record;

pub use guild_settings::GuildSettingsRecord;
pub use mute_record::MuteRecord;
