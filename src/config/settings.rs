use std::env;

use crate::bot::error::Error;

/// Single storage file holding every settings and ledger table
pub const DEFAULT_DATABASE_URL: &str = "sqlite://settings.db?mode=rwc";

pub const DEFAULT_COMMAND_PREFIX: &str = "!";

#[derive(Debug, Clone)]
pub struct Settings {
    pub discord_token: String,
    pub database_url: String,
    /// Prefix for freeform commands such as `!region`
    pub command_prefix: String,
    /// Register slash commands in this guild only
    pub guild_id: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Config("DISCORD_TOKEN environment variable not set".into()))?;

        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let command_prefix = lookup("COMMAND_PREFIX")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());

        let guild_id = lookup("GUILD_ID").and_then(|s| s.parse::<u64>().ok());

        Ok(Self {
            discord_token,
            database_url,
            command_prefix,
            guild_id,
        })
    }
}
