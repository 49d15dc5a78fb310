use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use game_lobby_bot::bot::Router;
use game_lobby_bot::config::AppConfig;
use game_lobby_bot::polling::{FixedDelay, PollingSupervisor};
use game_lobby_bot::transport::{TelegramTransport, TelegramUpdateSource};
use game_lobby_bot::webhook;
use teloxide::prelude::*;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,game_lobby_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load and validate configuration early
    let config = AppConfig::from_env()?;
    config.validate()?;
    info!("{}", config.summary());

    // Initialize the bot with custom client configuration for better reliability
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.bot.http_timeout_secs))
        .build()
        .context("Failed to create HTTP client")?;
    let bot = Bot::with_client(config.bot.token.clone(), client);

    let transport = Arc::new(TelegramTransport::new(bot.clone()));
    let router = Arc::new(Router::new(transport, config.webapp_url.clone()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Webhook ingress shares the router with the polling path
    let webhook_router = Arc::clone(&router);
    let webhook_shutdown = shutdown_rx.clone();
    let secret_path = webhook::webhook_path(&config.bot.token);
    let port = config.server.port;
    tokio::spawn(async move {
        if let Err(e) =
            webhook::run_webhook_server(port, secret_path, webhook_router, webhook_shutdown).await
        {
            error!(error = %e, "Webhook server failed");
        }
    });

    // Ctrl-C triggers the graceful stop of the fetch loop
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received, stopping bot");
            let _ = shutdown_tx.send(true);
        }
    });

    let source = TelegramUpdateSource::new(bot, config.polling.request_timeout_secs);
    let mut supervisor = PollingSupervisor::new(
        source,
        router,
        Box::new(FixedDelay::new(Duration::from_secs(
            config.polling.restart_delay_secs,
        ))),
        Duration::from_millis(config.polling.interval_ms),
    );

    info!("Bot is starting...");
    supervisor.run(shutdown_rx).await;
    info!("Bot stopped");

    Ok(())
}
