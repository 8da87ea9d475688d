use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;
use twilight_standby::Standby;

use rustls::crypto::ring::default_provider;

use pager_commands::handle_message;
use pager_core::{BotIdentity, Config, Context};
use pager_utils::embed::avatar_url;
use pager_utils::pagination::{DiscordPlatform, SharedPlatform};
use pager_utils::shutdown;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let token = config.token.clone();

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(token.clone()));
    let me = http.current_user().await?.model().await?;
    let bot = BotIdentity {
        id: me.id,
        avatar_url: Some(avatar_url(me.id, me.avatar)),
    };

    // Every gateway event is fed through standby so sessions can wait on it
    let standby = Arc::new(Standby::new());
    let platform: SharedPlatform = Arc::new(DiscordPlatform::new(
        Arc::clone(&http),
        Arc::clone(&standby),
        me.id,
    ));

    let (trigger, stopping) = shutdown::channel();
    let ctx = Context::new(Arc::clone(&http), platform, config, bot, trigger.subscribe());

    tokio::spawn(async move {
        if let Err(source) = tokio::signal::ctrl_c().await {
            error!(?source, "failed to listen for ctrl-c");
            return;
        }
        info!("shutting down, closing open pagination sessions");
        trigger.trigger();
    });

    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::MESSAGE_CONTENT
        | Intents::GUILD_MESSAGE_REACTIONS
        | Intents::DIRECT_MESSAGES
        | Intents::DIRECT_MESSAGE_REACTIONS;

    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!(bot_id = me.id.get(), "connecting to the gateway");

    loop {
        let item = tokio::select! {
            item = shard.next_event(EventTypeFlags::all()) => item,
            () = stopping.wait() => break,
        };

        let Some(item) = item else {
            info!("gateway stream ended");
            break;
        };

        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        standby.process(&event);

        match event {
            Event::Ready(ready) => {
                info!(user = %ready.user.name, "ready");
            }
            Event::MessageCreate(msg) => {
                // Sessions wait on later events, so handlers must not block this loop
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "command failed");
                    }
                });
            }
            _ => {} // Ignore unused events
        }
    }

    Ok(())
}
