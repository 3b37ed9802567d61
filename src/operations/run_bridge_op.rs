use crate::app_config::BridgeConfig;
use crate::bot::nx_bot::{BotSettings, NxBot};
use crate::bot::recipient::Recipient;
use crate::camera::nx_client::NxClient;
use crate::relay::snapshot_relay::SnapshotRelay;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;

impl From<&BridgeConfig> for BotSettings {
    fn from(config: &BridgeConfig) -> Self {
        BotSettings {
            token: config.tg_token.clone(),
            http_ip_port: config.http_ip_port.clone(),
            user_whitelist: config.tg_user_whitelist.clone(),
            group_whitelist: config.tg_group_whitelist.clone(),
        }
    }
}

/// Connects to Nx, builds the bot with one button per camera and runs until the bot stops.
pub async fn handle_run_bridge(config: &BridgeConfig) -> Result<()> {
    let connect_start_time = Instant::now();
    let nx_client = NxClient::connect(&config.nx_ip_port, &config.nx_user, &config.nx_pass)
        .await
        .with_context(|| format!("Failed to connect to Nx API at '{}'", config.nx_ip_port))?;
    info!("🔗 Connected to Nx API at {} in {:?}", config.nx_ip_port, connect_start_time.elapsed());

    let cameras = nx_client
        .get_cameras()
        .await
        .context("Failed to retrieve cameras from Nx API")?;

    let mut bot = NxBot::new(BotSettings::from(config)).context("Failed to create Nx Telegram bot")?;
    for camera in cameras {
        debug!("  Adding camera button '{}' ({})", camera.name, camera.id);
        bot.add_camera(camera.id, camera.name);
    }
    if bot.keyboard().is_empty() {
        warn!("⚠️ Nx server reported no cameras; the keyboard will be empty.");
    }
    info!("🤖 Created Nx Telegram bot with {} camera button(s)", bot.keyboard().len());

    let recipients: Vec<Recipient> = config
        .tg_motion_recipients
        .iter()
        .map(|raw| Recipient::parse(raw))
        .collect();
    let relay = SnapshotRelay::new(Arc::new(nx_client), Arc::new(bot.sender()), recipients);
    tokio::spawn(relay.run(bot.subscribe()));

    info!(
        "🚀 Starting Nx Telegram bot and motion-event HTTP server on {}",
        config.http_ip_port
    );
    bot.start().await.context("Nx Telegram bot stopped with an error")?;
    Ok(())
}
