use serenity::http::HttpError;
use serenity::model::ModelError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("Discord API error: {0}")]
    Serenity(#[from] serenity::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid snowflake id: {0}")]
    InvalidId(u64),

    #[error("Bot is muted: {0}")]
    BotMuted(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        Error::Custom(msg.into())
    }

    /// Variant name, used when logging a failure nobody classified.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::StorageUnavailable(_) => "StorageUnavailable",
            Error::Serenity(_) => "Serenity",
            Error::Config(_) => "Config",
            Error::PermissionDenied(_) => "PermissionDenied",
            Error::InvalidId(_) => "InvalidId",
            Error::BotMuted(_) => "BotMuted",
            Error::Custom(_) => "Custom",
        }
    }
}

/// Failure of the external role mutation capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoleMutationError {
    #[error("Lacking permissions to change role.")]
    Forbidden,

    #[error("Error connecting to discord.")]
    Network(String),
}

impl From<serenity::Error> for RoleMutationError {
    fn from(err: serenity::Error) -> Self {
        match &err {
            serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
                if response.status_code.as_u16() == 403 =>
            {
                RoleMutationError::Forbidden
            }
            serenity::Error::Model(ModelError::InvalidPermissions { .. }) => {
                RoleMutationError::Forbidden
            }
            _ => RoleMutationError::Network(err.to_string()),
        }
    }
}
