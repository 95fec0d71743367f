use std::time::Duration;

/// What a cooldown is counted against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketScope {
    Global,
    User,
    Member,
    Guild,
    Channel,
    Category,
}

/// Every way a command invocation can fail before or while running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFailure {
    /// A check refused the invoker
    Unauthorized,
    /// The bot is freeze-muted in this guild
    BotMuted { detail: String },
    MissingArguments,
    MalformedArgument { message: String },
    UnknownCommand,
    /// A settings or ledger write could not be persisted
    StorageUnavailable { message: String },
    RateLimited {
        rate: u32,
        per: Duration,
        retry_after: Duration,
        scope: BucketScope,
    },
    /// The command body itself failed; classified by what it wraps
    InvocationFailed(Box<CommandFailure>),
    /// Anything nobody anticipated
    Unclassified {
        original_kind: String,
        message: String,
    },
}

impl CommandFailure {
    pub fn wrap(inner: CommandFailure) -> Self {
        CommandFailure::InvocationFailed(Box::new(inner))
    }

    pub fn unclassified(original_kind: impl Into<String>, message: impl Into<String>) -> Self {
        CommandFailure::Unclassified {
            original_kind: original_kind.into(),
            message: message.into(),
        }
    }
}

/// Who ran what, for rendering log and reply text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub author_name: String,
    pub author_mention: String,
    pub prefix: String,
    pub command: String,
}

impl Invocation {
    /// `!region`, as the invoker typed it
    pub fn invoked(&self) -> String {
        format!("{}{}", self.prefix, self.command)
    }
}
