use std::sync::Arc;

use anyhow::{Context as _, Result};
use bot::{
    Data, Error, command,
    config::Config,
    health, logging,
    reply::{self, ChannelSink},
};
use poise::{Framework, FrameworkOptions};
use serenity::all::{ClientBuilder, FullEvent, GatewayIntents};
use stock::{QuoteClient, TickerExtractor};
use tracing::{error, info, info_span};
use tracing_futures::Instrument;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let _log_guard = logging::init(config.log.as_ref())?;

    let extractor = Arc::new(TickerExtractor::default());
    let quote_client = Arc::new(
        QuoteClient::new(config.quote_api_base.clone(), config.quote_timeout)
            .context("init quote client failed")?,
    );

    health::spawn(config.port, config.version.clone());
    if let Some(url) = config.keep_alive_url.clone() {
        health::spawn_keep_alive(url, health::KEEP_ALIVE_EVERY);
    }

    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    let framework = Framework::builder()
        .options(FrameworkOptions::<Data, Error> {
            event_handler: |serenity_ctx, event, _framework_ctx, data: &Data| {
                Box::pin(async move {
                    if let FullEvent::Message { new_message } = event
                        && !new_message.author.bot
                    {
                        let span = info_span!(
                            "message",
                            channel_id = %new_message.channel_id,
                            message_id = %new_message.id
                        );
                        let sink =
                            ChannelSink::new(serenity_ctx.http.clone(), new_message.channel_id);

                        reply::respond(
                            data.quote_client.as_ref(),
                            &data.extractor,
                            &new_message.content,
                            &sink,
                        )
                        .instrument(span)
                        .await;
                    }
                    Ok(())
                })
            },
            commands: command::commands(),
            ..Default::default()
        })
        .setup({
            let extractor = Arc::clone(&extractor);
            let quote_client = Arc::clone(&quote_client);
            let version = config.version.clone();

            move |ctx, ready, framework| {
                let extractor = Arc::clone(&extractor);
                let quote_client = Arc::clone(&quote_client);
                let version = version.clone();

                Box::pin(async move {
                    info!(
                        "{} [{}] connected successfully! version={}",
                        ready.user.name, ready.user.id, version
                    );

                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                    Ok(Data {
                        extractor,
                        quote_client,
                    })
                })
            }
        })
        .build();

    let mut client = ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await
        .context("Err creating client")?;

    let client_task = tokio::spawn(async move {
        if let Err(why) = client.start().await {
            error!("Client error: {why:?}");
        }
    });

    tokio::select! {
        res = shutdown_signal() => res?,
        _ = client_task => error!("Discord client stopped"),
    }

    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::{
            select,
            signal::unix::{SignalKind, signal},
        };
        let mut sigterm =
            signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
        let mut sigint =
            signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
        select! {
            _ = sigterm.recv() => {},
            _ = sigint.recv()  => {},
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for ctrl-c")?;
    }

    Ok(())
}
