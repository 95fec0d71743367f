use std::sync::Arc;

use poise::serenity_prelude::{self as serenity, GatewayIntents, GuildId};
use tracing::{error, info, warn};

use crate::bot::checks::freeze_check;
use crate::bot::data::Data;
use crate::bot::error::Error;
use crate::bot::error_handler::on_error;
use crate::commands;
use crate::config::Settings;
use crate::handlers::event_handler::event_handler;
use crate::services::store::SettingsStore;

pub async fn run(settings: Settings, store: SettingsStore) -> Result<(), Error> {
    let data = Arc::new(Data::new(settings.clone(), store));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::region::region(),
                commands::freezemute::freezemute(),
                commands::settings::settings(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(settings.command_prefix.clone()),
                ..Default::default()
            },
            command_check: Some(|ctx| Box::pin(freeze_check(ctx))),
            event_handler: |ctx, event, framework, data| {
                Box::pin(event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as {}", ready.user.name);

                // Register commands globally or per-guild based on GUILD_ID env var
                match data.settings.guild_id {
                    Some(guild_id) => {
                        let guild_id = GuildId::new(guild_id);
                        info!(
                            "Registering {} commands in guild {}",
                            framework.options().commands.len(),
                            guild_id
                        );

                        if let Err(e) =
                            poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                                .await
                        {
                            error!("Failed to register guild commands: {:?}", e);
                            error!("Re-invite URL: https://discord.com/api/oauth2/authorize?client_id={}&permissions=0&scope=bot%20applications.commands", ready.user.id);
                            return Err(Error::Serenity(e));
                        }
                    }
                    None => {
                        info!(
                            "Registering {} commands globally",
                            framework.options().commands.len()
                        );

                        match poise::builtins::register_globally(ctx, &framework.options().commands).await {
                            Ok(_) => {
                                info!("Note: Global commands can take up to 1 hour to appear in all servers");
                            }
                            Err(e) => {
                                error!("Failed to register commands globally: {:?}", e);
                                return Err(Error::Serenity(e));
                            }
                        }
                    }
                }

                let muted_guilds = ready
                    .guilds
                    .iter()
                    .filter(|guild| data.store.freeze_mutes.is_freeze_muted(guild.id))
                    .count();
                if muted_guilds > 0 {
                    warn!("Freeze muted in {} of {} guilds", muted_guilds, ready.guilds.len());
                }

                Ok(data)
            })
        })
        .build();

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(&settings.discord_token, intents)
        .framework(framework)
        .await
        .map_err(Error::Serenity)?;

    info!("Starting Discord client...");
    client.start().await.map_err(Error::Serenity)
}
