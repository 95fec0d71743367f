use std::sync::Arc;

use chrono::Utc;
use poise::serenity_prelude::{self as serenity, FullEvent};
use tracing::{debug, info};

use crate::bot::data::Data;
use crate::bot::error::Error;

pub async fn event_handler(
    _ctx: &serenity::Context,
    event: &FullEvent,
    _framework: poise::FrameworkContext<'_, Arc<Data>, Error>,
    data: &Arc<Data>,
) -> Result<(), Error> {
    match event {
        FullEvent::Ready { data_about_bot, .. } => {
            info!(
                "Bot ready as {} in {} guilds, {} active mutes, {} blacklisted users",
                data_about_bot.user.name,
                data_about_bot.guilds.len(),
                data.store.mutes.active_mutes(Utc::now()).len(),
                data.store.blacklist.blacklisted_users().len()
            );
        }

        FullEvent::GuildCreate { guild, .. } => {
            debug!(
                "Guild {} available, freeze muted: {}",
                guild.id,
                data.store.freeze_mutes.is_freeze_muted(guild.id)
            );
        }

        FullEvent::GuildDelete { incomplete, .. } => {
            // Settings are kept; the guild may come back
            debug!("Guild {} removed", incomplete.id);
        }

        _ => {}
    }

    Ok(())
}
