use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::github::payload::GithubEvent;
use crate::github::server::ServerStateRef;

/// GitHub does not send payloads larger than 25 MiB.
const WEBHOOK_BODY_LIMIT: usize = 25 * 1024 * 1024;

/// Reasons why a webhook delivery could not be turned into a [`GithubEvent`].
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("x-github-event header not found")]
    MissingEventHeader,
    #[error("x-hub-signature-256 header not found")]
    MissingSignature,
    #[error("could not authenticate webhook: invalid signature")]
    InvalidSignature,
    #[error("cannot read webhook body: {0}")]
    UnreadableBody(String),
    #[error("cannot parse `{event}` payload: {source}")]
    MalformedPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// axum extractor for GitHub webhook events.
#[derive(Debug)]
pub struct GitHubWebhook(pub GithubEvent);

/// Extracts a webhook event from a HTTP request.
#[async_trait]
impl FromRequest<ServerStateRef> for GitHubWebhook {
    type Rejection = WebhookError;

    async fn from_request(
        request: Request,
        state: &ServerStateRef,
    ) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        // Eagerly load body
        let body: Bytes = axum::body::to_bytes(body, WEBHOOK_BODY_LIMIT)
            .await
            .map_err(|error| {
                tracing::warn!("Parsing webhook body failed: {error:?}");
                WebhookError::UnreadableBody(error.to_string())
            })?;

        // Verify that the request is valid
        let secret = state.get_webhook_secret();
        if let Err(error) = verify_gh_signature(&parts.headers, &body, secret) {
            tracing::warn!("Webhook request failed, could not authenticate webhook: {error}");
            return Err(error);
        }

        match parse_webhook_event(&parts.headers, &body) {
            Ok(event) => Ok(GitHubWebhook(event)),
            Err(error) => {
                tracing::warn!("Cannot parse webhook event: {error:?}");
                Err(error)
            }
        }
    }
}

fn parse_webhook_event(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
) -> Result<GithubEvent, WebhookError> {
    let Some(event_type) = headers.get("x-github-event") else {
        return Err(WebhookError::MissingEventHeader);
    };
    let event_type = String::from_utf8_lossy(event_type.as_bytes());

    let event = GithubEvent::decode(&event_type, body).map_err(|source| {
        WebhookError::MalformedPayload {
            event: event_type.to_string(),
            source,
        }
    })?;
    match &event {
        GithubEvent::Unrecognized(name) => tracing::debug!("Received unknown event type {name}"),
        event => tracing::debug!("Received {} event", event.name()),
    }
    Ok(event)
}

type HmacSha256 = Hmac<Sha256>;

/// Verifies that the request is properly signed by GitHub with SHA-256 and the passed `secret`.
fn verify_gh_signature(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
    secret: &WebhookSecret,
) -> Result<(), WebhookError> {
    let Some(signature) = headers.get("x-hub-signature-256").map(|v| v.as_bytes()) else {
        return Err(WebhookError::MissingSignature);
    };
    let Some(signature) = signature
        .strip_prefix(b"sha256=")
        .and_then(|v| hex::decode(v).ok())
    else {
        return Err(WebhookError::InvalidSignature);
    };

    let mut mac = HmacSha256::new_from_slice(secret.expose().as_bytes())
        .map_err(|_| WebhookError::InvalidSignature)?;
    mac.update(body);
    mac.verify_slice(&signature)
        .map_err(|_| WebhookError::InvalidSignature)
}

/// Wrapper for a secret which is zeroed on drop and can be exposed only through the [`WebhookSecret::expose`] method.
pub struct WebhookSecret(SecretString);

impl WebhookSecret {
    pub fn new(secret: String) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret().as_str()
    }
}
