//! Delivery of messages to a Telegram group chat through the Bot API.
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use axum::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use url::Url;

use crate::config::TelegramConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Identifier of a chat that receives the notifications.
///
/// Group chats have negative ids in Telegram, but they are usually configured by their
/// magnitude. [`ChatId::effective`] returns the id that is actually sent to the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatId(pub i64);

impl ChatId {
    pub fn effective(&self) -> i64 {
        -self.0.saturating_abs()
    }
}

impl FromStr for ChatId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse().map(ChatId)
    }
}

impl Display for ChatId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("cannot reach Telegram: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected response from Telegram (HTTP {status}): {source}")]
    InvalidResponse {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
    #[error("Telegram rejected the request: {description}")]
    Rejected {
        code: Option<i64>,
        description: String,
    },
}

/// Sends formatted messages to a chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, message: &str, destination: ChatId) -> Result<(), DeliveryError>;
}

/// Telegram bot user, as returned by `getMe`.
#[derive(serde::Deserialize, Debug)]
pub struct BotUser {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

#[derive(Serialize, Debug)]
struct NoParams {}

#[derive(Serialize, Debug)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    disable_web_page_preview: bool,
}

#[derive(serde::Deserialize, Debug)]
struct ApiResponse<R> {
    ok: bool,
    result: Option<R>,
    error_code: Option<i64>,
    description: Option<String>,
}

/// Talks to the Telegram Bot API with a single bot token.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: Url,
    token: SecretString,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Cannot build Telegram HTTP client")?;
        Ok(Self {
            client,
            api_url: config.api_url,
            token: config.token,
        })
    }

    /// Checks that the bot token is valid.
    pub async fn get_me(&self) -> Result<BotUser, DeliveryError> {
        self.call("getMe", &NoParams {}).await
    }

    // The token is part of the path, so the URL must never end up in logs.
    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_url.as_str().trim_end_matches('/'),
            self.token.expose_secret()
        )
    }

    async fn call<P: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        method: &str,
        params: &P,
    ) -> Result<R, DeliveryError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(|error| DeliveryError::Transport(error.without_url()))?;

        let status = response.status().as_u16();
        let response: ApiResponse<R> =
            response
                .json()
                .await
                .map_err(|error| DeliveryError::InvalidResponse {
                    status,
                    source: error.without_url(),
                })?;

        match response {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                error_code,
                description,
                ..
            } => Err(DeliveryError::Rejected {
                code: error_code,
                description: description.unwrap_or_else(|| format!("HTTP {status}")),
            }),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn deliver(&self, message: &str, destination: ChatId) -> Result<(), DeliveryError> {
        let request = SendMessage {
            chat_id: destination.effective(),
            text: message,
            parse_mode: "Markdown",
            disable_web_page_preview: true,
        };
        let _: IgnoredAny = self.call("sendMessage", &request).await?;
        tracing::debug!("Sent message to chat {}", request.chat_id);
        Ok(())
    }
}
