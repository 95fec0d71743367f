use poise::serenity_prelude::{GuildChannel, Role};

use crate::bot::checks::moderator_check;
use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::services::roles::CacheDefaults;
use crate::utils::formatting::{mention_channel, mention_role};

/// Configure where this server mutes and dumps things
#[poise::command(
    prefix_command,
    slash_command,
    subcommands("mute_role", "mute_channel", "trash_channel", "show"),
    guild_only
)]
pub async fn settings(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `mute-role`, `mute-channel`, `trash-channel`, `show`")
        .await?;
    Ok(())
}

/// Set the role handed out to muted users
#[poise::command(prefix_command, slash_command, rename = "mute-role", check = "moderator_check", guild_only)]
pub async fn mute_role(
    ctx: Context<'_>,
    #[description = "Role given to muted users"] role: Role,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    ctx.data().store.guilds.set_mute_role(guild_id, role.id).await?;

    let embed = embeds::success_embed()
        .title("Mute Role Set")
        .description(format!("Muted users will now get {}", mention_role(role.id)));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Set the channel muted users are sent to
#[poise::command(prefix_command, slash_command, rename = "mute-channel", check = "moderator_check", guild_only)]
pub async fn mute_channel(
    ctx: Context<'_>,
    #[description = "Channel for muted users"]
    #[channel_types("Text")]
    channel: GuildChannel,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    ctx.data().store.guilds.set_mute_channel(guild_id, channel.id).await?;

    let embed = embeds::success_embed()
        .title("Mute Channel Set")
        .description(format!("Set mute channel to {}", mention_channel(channel.id)));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Set the channel deleted and filtered messages end up in
#[poise::command(prefix_command, slash_command, rename = "trash-channel", check = "moderator_check", guild_only)]
pub async fn trash_channel(
    ctx: Context<'_>,
    #[description = "Channel for trashed messages"]
    #[channel_types("Text")]
    channel: GuildChannel,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    ctx.data().store.guilds.set_trash_channel(guild_id, channel.id).await?;

    let embed = embeds::success_embed()
        .title("Trash Channel Set")
        .description(format!("Set trash channel to {}", mention_channel(channel.id)));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Show this server's settings, including fallbacks
#[poise::command(prefix_command, slash_command, check = "moderator_check", guild_only)]
pub async fn show(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let store = &ctx.data().store.guilds;
    let record = store.record(guild_id);
    let defaults = CacheDefaults::new(ctx.cache());

    let lines = [
        format!(
            "Mute role: {}",
            describe_setting(
                record.mute_role_id.map(mention_role),
                store.resolve_mute_role(guild_id, &defaults).map(mention_role),
            )
        ),
        format!(
            "Mute channel: {}",
            describe_setting(
                record.mute_channel_id.map(mention_channel),
                store.resolve_mute_channel(guild_id, &defaults).map(mention_channel),
            )
        ),
        format!(
            "Trash channel: {}",
            describe_setting(
                record.trash_channel_id.map(mention_channel),
                store.resolve_trash_channel(guild_id, &defaults).map(mention_channel),
            )
        ),
    ];
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();

    let embed = embeds::info_embed()
        .title("Server Settings")
        .description(embeds::bullet_list(&lines));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

fn describe_setting(configured: Option<String>, resolved: Option<String>) -> String {
    match (configured, resolved) {
        (Some(configured), _) => configured,
        (None, Some(fallback)) => format!("{} (default)", fallback),
        (None, None) => "not set".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_setting() {
        assert_eq!(describe_setting(Some("<@&1>".into()), Some("<@&1>".into())), "<@&1>");
        assert_eq!(describe_setting(None, Some("<#2>".into())), "<#2> (default)");
        assert_eq!(describe_setting(None, None), "not set");
    }
}
