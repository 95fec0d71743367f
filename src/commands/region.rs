use poise::serenity_prelude::RoleId;

use crate::bot::checks::{is_administrator, member_permissions};
use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::services::region::{handle_region, RegionInvocation};
use crate::services::roles::{CacheDefaults, DiscordRoles};

/// Pick your region, list the regions, or (mods) edit the region blacklist
#[poise::command(
    prefix_command,
    slash_command,
    aliases("regions"),
    user_cooldown = 10,
    guild_only
)]
pub async fn region(
    ctx: Context<'_>,
    #[rest]
    #[description = "A region, \"list\", or \"blacklist @user\""]
    text: Option<String>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let member = ctx
        .author_member()
        .await
        .ok_or(Error::custom("Could not look up the invoking member"))?;

    let is_mod = is_administrator(member_permissions(ctx.cache(), guild_id, &member));
    let author_roles: Vec<RoleId> = member.roles.clone();
    let guild_roles: Vec<(RoleId, String)> = ctx
        .cache()
        .guild(guild_id)
        .map(|guild| {
            guild
                .roles
                .values()
                .map(|role| (role.id, role.name.clone()))
                .collect()
        })
        .unwrap_or_default();

    let data = ctx.data();
    let invocation = RegionInvocation {
        guild_id,
        author_id: ctx.author().id,
        author_roles: &author_roles,
        guild_roles: &guild_roles,
        is_mod,
        prefix: &data.settings.command_prefix,
    };

    let roles = DiscordRoles::new(&ctx.serenity_context().http, guild_id);
    let defaults = CacheDefaults::new(ctx.cache());
    let reply = handle_region(
        &data.store,
        &roles,
        &defaults,
        &invocation,
        text.as_deref().unwrap_or_default(),
    )
    .await;

    ctx.say(reply).await?;
    Ok(())
}
