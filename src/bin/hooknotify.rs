use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;
use url::Url;

use hooknotify::config::{ServiceConfig, TelegramConfig, DEFAULT_TELEGRAM_API_URL};
use hooknotify::github::server::{create_app, ServerState};
use hooknotify::github::WebhookSecret;
use hooknotify::telegram::{ChatId, TelegramNotifier};

#[derive(clap::Parser)]
struct Opts {
    /// Secret used to authenticate webhooks.
    #[arg(long, env = "GITHUB_CLIENT_SECRET")]
    webhook_secret: String,

    /// Token of the Telegram bot that sends the messages.
    #[arg(long, env = "TELEGRAM_TOKEN")]
    telegram_token: String,

    /// Group chat that receives the messages. The sign is ignored.
    #[arg(long, env = "TELEGRAM_CHAT_ID", allow_negative_numbers = true)]
    telegram_chat_id: ChatId,

    /// Base URL of the Telegram Bot API.
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_TELEGRAM_API_URL)]
    telegram_api_url: Url,

    /// Port of the webhook server.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

impl From<Opts> for ServiceConfig {
    fn from(opts: Opts) -> Self {
        Self {
            address: SocketAddr::from(([0, 0, 0, 0], opts.port)),
            webhook_secret: WebhookSecret::new(opts.webhook_secret),
            chat_id: opts.telegram_chat_id,
            telegram: TelegramConfig {
                token: SecretString::new(opts.telegram_token),
                api_url: opts.telegram_api_url,
            },
        }
    }
}

async fn server(config: ServiceConfig) -> anyhow::Result<()> {
    let notifier = TelegramNotifier::new(config.telegram)?;
    match notifier.get_me().await {
        Ok(bot) => tracing::info!(
            "Sending messages as {} to chat {}",
            bot.username.as_deref().unwrap_or(&bot.first_name),
            config.chat_id.effective()
        ),
        Err(error) => tracing::error!("Cannot authenticate Telegram bot: {error}"),
    }

    let state = ServerState::new(config.webhook_secret, config.chat_id, Arc::new(notifier));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.address)
        .await
        .with_context(|| format!("Cannot bind to {}", config.address))?;
    tracing::info!("Listening on {}", config.address);
    axum::serve(listener, app).await?;
    Ok(())
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    runtime.block_on(server(opts.into()))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
