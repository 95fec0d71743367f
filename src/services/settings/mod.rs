pub mod freeze;
pub mod guild_settings;

pub use freeze::FreezeMutes;
pub use guild_settings::{GuildDefaults, GuildSettingsStore};
