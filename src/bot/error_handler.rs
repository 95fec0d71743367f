use std::sync::Arc;
use std::time::Duration;

use poise::{CooldownConfig, FrameworkError};
use tracing::{error, warn};

use crate::bot::data::{Context, Data};
use crate::bot::error::Error;
use crate::services::errors::{classify, BucketScope, CommandFailure, Invocation};
use crate::utils::formatting::mention_user;

/// Framework `on_error` hook: classify the failure, log it, reply if the classifier says so
pub async fn on_error(error: FrameworkError<'_, Arc<Data>, Error>) {
    match error {
        FrameworkError::Setup { error, .. } => {
            error!("Failed to set up the framework: {:?}", error);
        }

        FrameworkError::EventHandler { error, .. } => {
            error!("Event handler failed: {:?}", error);
        }

        FrameworkError::UnknownCommand {
            msg,
            prefix,
            msg_content,
            ..
        } => {
            let invocation = Invocation {
                author_name: msg.author.name.clone(),
                author_mention: mention_user(msg.author.id),
                prefix: prefix.to_string(),
                command: msg_content
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            };
            let failure = CommandFailure::UnknownCommand;
            classify(&failure, &invocation).emit(&failure);
        }

        other => {
            let Some(ctx) = other.ctx() else {
                error!("Framework error: {}", other);
                return;
            };

            let failure = failure_from_framework(&other, ctx);
            report(ctx, &failure).await;
        }
    }
}

fn failure_from_framework(error: &FrameworkError<'_, Arc<Data>, Error>, ctx: Context<'_>) -> CommandFailure {
    match error {
        FrameworkError::Command { error, .. } => CommandFailure::wrap(failure_from_error(error)),

        FrameworkError::CommandCheckFailed { error: Some(error), .. } => failure_from_error(error),

        FrameworkError::CommandCheckFailed { error: None, .. }
        | FrameworkError::MissingUserPermissions { .. }
        | FrameworkError::NotAnOwner { .. }
        | FrameworkError::GuildOnly { .. }
        | FrameworkError::DmOnly { .. }
        | FrameworkError::NsfwOnly { .. } => CommandFailure::Unauthorized,

        FrameworkError::ArgumentParse { input: None, .. }
        | FrameworkError::SubcommandRequired { .. } => CommandFailure::MissingArguments,

        FrameworkError::ArgumentParse { error, input: Some(input), .. } => {
            CommandFailure::MalformedArgument {
                message: format!("{} ({:?})", error, input),
            }
        }

        FrameworkError::CooldownHit { remaining_cooldown, .. } => {
            let (per, scope) = ctx
                .command()
                .cooldown_config
                .read()
                .ok()
                .and_then(|config| cooldown_window(&config))
                .unwrap_or((*remaining_cooldown, BucketScope::Global));

            CommandFailure::RateLimited {
                rate: 1,
                per,
                retry_after: *remaining_cooldown,
                scope,
            }
        }

        FrameworkError::CommandPanic { payload, .. } => CommandFailure::unclassified(
            "Panic",
            payload.clone().unwrap_or_else(|| "no payload".to_string()),
        ),

        other => CommandFailure::unclassified("FrameworkError", other.to_string()),
    }
}

/// Translate an error a command body or check returned
pub fn failure_from_error(error: &Error) -> CommandFailure {
    match error {
        Error::PermissionDenied(_) => CommandFailure::Unauthorized,
        Error::InvalidId(id) => CommandFailure::MalformedArgument {
            message: format!("{} is not a valid id", id),
        },
        Error::BotMuted(detail) => CommandFailure::BotMuted {
            detail: detail.clone(),
        },
        Error::StorageUnavailable(e) => CommandFailure::StorageUnavailable {
            message: e.to_string(),
        },
        other => CommandFailure::unclassified(other.kind(), other.to_string()),
    }
}

/// The cooldown window that applies to a command, narrowest bucket first
pub fn cooldown_window(config: &CooldownConfig) -> Option<(Duration, BucketScope)> {
    [
        (config.user, BucketScope::User),
        (config.member, BucketScope::Member),
        (config.channel, BucketScope::Channel),
        (config.guild, BucketScope::Guild),
        (config.global, BucketScope::Global),
    ]
    .into_iter()
    .find_map(|(window, scope)| window.map(|window| (window, scope)))
}

async fn report(ctx: Context<'_>, failure: &CommandFailure) {
    let invocation = Invocation {
        author_name: ctx.author().name.clone(),
        author_mention: mention_user(ctx.author().id),
        prefix: ctx.prefix().to_string(),
        command: ctx.command().qualified_name.clone(),
    };

    let classification = classify(failure, &invocation);
    classification.emit(failure);

    if let Some(message) = classification.user_message {
        if let Err(e) = ctx.say(message).await {
            warn!("Failed to send error reply: {:?}", e);
        }
    }
}
