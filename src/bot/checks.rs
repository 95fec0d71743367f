use serenity::all::{Cache, GuildId, Member, Permissions};
use tracing::debug;

use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::utils::formatting::mention_user;

/// Result of checking whether the invoker may run a moderator command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    NotInGuild,
    NotModerator,
}

/// Moderators are members holding the administrator permission
pub fn is_administrator(permissions: Permissions) -> bool {
    permissions.administrator()
}

/// Guild-wide permissions of `member`, from the interaction payload or the cache
pub fn member_permissions(cache: &Cache, guild_id: GuildId, member: &Member) -> Permissions {
    if let Some(permissions) = member.permissions {
        return permissions;
    }

    cache
        .guild(guild_id)
        .map(|guild| guild.member_permissions(member))
        .unwrap_or_else(Permissions::empty)
}

pub async fn authorize_command(ctx: Context<'_>) -> Authorization {
    let Some(guild_id) = ctx.guild_id() else {
        return Authorization::NotInGuild;
    };

    let Some(member) = ctx.author_member().await else {
        return Authorization::NotModerator;
    };

    if is_administrator(member_permissions(ctx.cache(), guild_id, &member)) {
        Authorization::Granted
    } else {
        Authorization::NotModerator
    }
}

/// poise check for moderator-only commands; tells the invoker why they were refused
pub async fn moderator_check(ctx: Context<'_>) -> Result<bool, Error> {
    match authorize_command(ctx).await {
        Authorization::Granted => Ok(true),
        Authorization::NotInGuild => {
            ctx.say("Don't you try to sneak into my DMs and mod me!").await?;
            Ok(false)
        }
        Authorization::NotModerator => {
            ctx.say(format!(
                "{} Only mods are allowed to use that command.",
                mention_user(ctx.author().id)
            ))
            .await?;
            Ok(false)
        }
    }
}

/// Global check: while the bot is freeze-muted in a guild only `freezemute` runs there
pub async fn freeze_check(ctx: Context<'_>) -> Result<bool, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(true);
    };

    let command = &ctx.command().name;
    if command == "freezemute" || !ctx.data().store.freeze_mutes.is_freeze_muted(guild_id) {
        return Ok(true);
    }

    let guild_name = ctx
        .guild()
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| guild_id.to_string());

    debug!("Blocked {} in freeze-muted guild {}", command, guild_id);
    Err(Error::BotMuted(format!(
        "{} @ {}: {}",
        ctx.author().name,
        guild_name,
        command
    )))
}
