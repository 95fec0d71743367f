use crate::bot::checks::moderator_check;
use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;

/// Silence the bot in this server, or let it speak again
#[poise::command(prefix_command, slash_command, check = "moderator_check", guild_only)]
pub async fn freezemute(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let muted = ctx
        .data()
        .store
        .freeze_mutes
        .toggle_freeze_mute(guild_id)
        .await?;

    let embed = if muted {
        embeds::warning_embed()
            .title("Muted")
            .description("I'll ignore every command here except `freezemute`.")
    } else {
        embeds::success_embed()
            .title("Unmuted")
            .description("I'm listening again.")
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
