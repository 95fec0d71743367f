use tracing::{debug, error, info, warn};

use crate::services::errors::failure::{CommandFailure, Invocation};
use crate::services::errors::wording::{format_seconds, rate_words, scope_suffix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

/// How a failure is logged and what, if anything, the invoker is told
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub log_message: String,
    pub user_message: Option<String>,
    /// Log the whole failure, not just the summary line
    pub full_diagnostic: bool,
}

impl Classification {
    fn log_only(severity: Severity, log_message: String) -> Self {
        Self {
            severity,
            log_message,
            user_message: None,
            full_diagnostic: false,
        }
    }

    fn with_reply(severity: Severity, log_message: String, user_message: String) -> Self {
        Self {
            severity,
            log_message,
            user_message: Some(user_message),
            full_diagnostic: false,
        }
    }

    /// Write the log line at the classified severity
    pub fn emit(&self, failure: &CommandFailure) {
        match self.severity {
            Severity::Debug => debug!("{}", self.log_message),
            Severity::Info => info!("{}", self.log_message),
            Severity::Warn => warn!("{}", self.log_message),
            Severity::Error => error!("{}", self.log_message),
        }

        if self.full_diagnostic {
            error!("Full diagnostic: {:#?}", failure);
        }
    }
}

/// Map a failure to its log line and reply. Pure; nothing is sent or logged.
pub fn classify(failure: &CommandFailure, invocation: &Invocation) -> Classification {
    let user = &invocation.author_name;
    let mention = &invocation.author_mention;
    let invoked = invocation.invoked();

    match failure {
        CommandFailure::BotMuted { detail } => {
            Classification::log_only(Severity::Info, format!("Bot is muted: {}", detail))
        }

        CommandFailure::Unauthorized => Classification::log_only(
            Severity::Warn,
            format!("Check failure: {} tried to illegally invoke {}", user, invoked),
        ),

        CommandFailure::MissingArguments => Classification::with_reply(
            Severity::Warn,
            format!(
                "Check failure: {} tried executing {} with too few arguments",
                user, invoked
            ),
            format!(
                "{} You need to specify some arguments to invoke {}, or I won't know what to do.",
                mention, invoked
            ),
        ),

        CommandFailure::MalformedArgument { message } => Classification::with_reply(
            Severity::Warn,
            format!(
                "Bad arguments: {} while using command {}: {}",
                user, invoked, message
            ),
            format!(
                "{} That's not quite the information I need to execute that command.",
                mention
            ),
        ),

        CommandFailure::UnknownCommand => Classification::log_only(
            Severity::Debug,
            format!("Command not found: {} tried to use {}", user, invoked),
        ),

        CommandFailure::StorageUnavailable { message } => Classification {
            severity: Severity::Error,
            log_message: format!(
                "Storage unavailable: {} tried to use {}: {}",
                user, invoked, message
            ),
            user_message: Some(format!("{} Couldn't save that to my database.", mention)),
            full_diagnostic: true,
        },

        CommandFailure::RateLimited {
            rate,
            per,
            retry_after,
            scope,
        } => Classification::with_reply(
            Severity::Info,
            format!("Cooldown: {} is rate limited on {}", user, invoked),
            format!(
                "{} The command **{}** can only be used {} every {}{}.\nTry again in {}.",
                mention,
                invoked,
                rate_words(*rate),
                format_seconds(per.as_secs()),
                scope_suffix(*scope),
                format_seconds(retry_after.as_secs()),
            ),
        ),

        CommandFailure::InvocationFailed(inner) => match inner.as_ref() {
            CommandFailure::Unclassified { original_kind, .. } => Classification {
                severity: Severity::Error,
                log_message: format!("{}: {} tried to use {}", original_kind, user, invoked),
                user_message: None,
                full_diagnostic: true,
            },
            other => classify(other, invocation),
        },

        CommandFailure::Unclassified {
            original_kind,
            message,
        } => Classification {
            severity: Severity::Error,
            log_message: format!("Unclassified error ({}): {}", original_kind, message),
            user_message: None,
            full_diagnostic: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::services::errors::failure::BucketScope;

    fn invocation() -> Invocation {
        Invocation {
            author_name: "smud".to_string(),
            author_mention: "<@42>".to_string(),
            prefix: "!".to_string(),
            command: "region".to_string(),
        }
    }

    #[test]
    fn test_rate_limit_reply() {
        let failure = CommandFailure::RateLimited {
            rate: 1,
            per: Duration::from_secs(90),
            retry_after: Duration::from_secs(125),
            scope: BucketScope::User,
        };

        let classification = classify(&failure, &invocation());
        assert_eq!(
            classification.user_message.as_deref(),
            Some(
                "<@42> The command **!region** can only be used once every 1 min 30 sec per user.\n\
                 Try again in 2 min 5 sec."
            )
        );
        assert!(!classification.full_diagnostic);
    }

    #[test]
    fn test_short_rate_limit_uses_seconds() {
        let failure = CommandFailure::RateLimited {
            rate: 3,
            per: Duration::from_secs(30),
            retry_after: Duration::from_secs(12),
            scope: BucketScope::Guild,
        };

        let reply = classify(&failure, &invocation()).user_message.unwrap();
        assert!(reply.contains("three times every 30 sec per server."));
        assert!(reply.ends_with("Try again in 12 sec."));
    }

    #[test]
    fn test_unauthorized_is_log_only() {
        let classification = classify(&CommandFailure::Unauthorized, &invocation());
        assert_eq!(classification.severity, Severity::Warn);
        assert_eq!(classification.user_message, None);
        assert!(classification.log_message.contains("smud tried to illegally invoke !region"));
    }

    #[test]
    fn test_argument_failures_reply() {
        let missing = classify(&CommandFailure::MissingArguments, &invocation());
        assert!(missing.user_message.unwrap().starts_with("<@42> You need to specify"));

        let malformed = classify(
            &CommandFailure::MalformedArgument {
                message: "not a number".into(),
            },
            &invocation(),
        );
        assert!(malformed.log_message.ends_with("not a number"));
        assert!(malformed.user_message.is_some());
    }

    #[test]
    fn test_wrapped_failure_unwraps() {
        let wrapped = CommandFailure::wrap(CommandFailure::MissingArguments);
        assert_eq!(
            classify(&wrapped, &invocation()),
            classify(&CommandFailure::MissingArguments, &invocation())
        );
    }

    #[test]
    fn test_wrapped_unclassified_keeps_kind_and_hides_details() {
        let wrapped = CommandFailure::wrap(CommandFailure::unclassified(
            "StorageUnavailable",
            "database is locked",
        ));

        let classification = classify(&wrapped, &invocation());
        assert_eq!(classification.severity, Severity::Error);
        assert_eq!(
            classification.log_message,
            "StorageUnavailable: smud tried to use !region"
        );
        assert_eq!(classification.user_message, None);
        assert!(classification.full_diagnostic);
    }

    #[test]
    fn test_unclassified_never_reaches_user() {
        let classification = classify(
            &CommandFailure::unclassified("Panic", "index out of bounds"),
            &invocation(),
        );
        assert_eq!(classification.user_message, None);
        assert!(classification.full_diagnostic);
        assert!(classification.log_message.contains("index out of bounds"));
    }

    #[test]
    fn test_wrapped_storage_failure_tells_invoker() {
        let wrapped = CommandFailure::wrap(CommandFailure::StorageUnavailable {
            message: "attempted to acquire a connection on a closed pool".into(),
        });

        let classification = classify(&wrapped, &invocation());
        assert_eq!(classification.severity, Severity::Error);
        assert!(classification.full_diagnostic);
        assert_eq!(
            classification.user_message.as_deref(),
            Some("<@42> Couldn't save that to my database.")
        );
        assert!(classification
            .log_message
            .starts_with("Storage unavailable: smud tried to use !region"));
    }

    #[test]
    fn test_unknown_command_and_bot_muted_are_quiet() {
        let unknown = classify(&CommandFailure::UnknownCommand, &invocation());
        assert_eq!(unknown.severity, Severity::Debug);
        assert_eq!(unknown.user_message, None);

        let muted = classify(
            &CommandFailure::BotMuted {
                detail: "smud @ guild: region".into(),
            },
            &invocation(),
        );
        assert_eq!(muted.user_message, None);
    }
}
