use std::net::SocketAddr;

use secrecy::SecretString;
use url::Url;

use crate::github::WebhookSecret;
use crate::telegram::ChatId;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Configuration of the service, created once when the process starts.
pub struct ServiceConfig {
    /// Address of the webhook HTTP server.
    pub address: SocketAddr,
    /// Secret shared with GitHub, used to authenticate webhook deliveries.
    pub webhook_secret: WebhookSecret,
    /// Chat that receives the notifications.
    pub chat_id: ChatId,
    pub telegram: TelegramConfig,
}

pub struct TelegramConfig {
    pub token: SecretString,
    /// Base URL of the Bot API, without the `/bot<token>` suffix.
    pub api_url: Url,
}
