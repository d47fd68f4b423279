use crate::github::webhook::{GitHubWebhook, WebhookError, WebhookSecret};
use crate::notification::{resolve, Outcome};
use crate::telegram::{ChatId, Notifier};

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use http::StatusCode;
use std::any::Any;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Shared server state for all axum handlers.
pub struct ServerState {
    webhook_secret: WebhookSecret,
    chat_id: ChatId,
    notifier: Arc<dyn Notifier>,
}

impl ServerState {
    pub fn new(
        webhook_secret: WebhookSecret,
        chat_id: ChatId,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            webhook_secret,
            chat_id,
            notifier,
        }
    }

    pub fn get_webhook_secret(&self) -> &WebhookSecret {
        &self.webhook_secret
    }
}

pub type ServerStateRef = Arc<ServerState>;

pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/github", post(github_webhook_handler))
        .route("/health", get(health_handler))
        .layer(ConcurrencyLimitLayer::new(100))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
        .fallback(not_found_handler)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Router panicked: {err:?}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not found")
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "")
}

/// Axum handler that receives a webhook and forwards the resulting message to the chat.
pub async fn github_webhook_handler(
    State(state): State<ServerStateRef>,
    webhook: Result<GitHubWebhook, WebhookError>,
) -> Response {
    match resolve(webhook.map(|GitHubWebhook(event)| event)) {
        Outcome::Failed(error) => error.into_response(),
        Outcome::Suppressed(reason) => {
            tracing::info!("Event was not forwarded: {reason}");
            (StatusCode::OK, reason.to_string()).into_response()
        }
        Outcome::Delivered(message) if message.is_empty() => {
            tracing::debug!("Ignoring event without a message");
            (StatusCode::OK, "").into_response()
        }
        Outcome::Delivered(message) => {
            tracing::debug!("Message:\n{message}");
            match state.notifier.deliver(&message, state.chat_id).await {
                Ok(()) => (StatusCode::OK, format!("Sent:\n{message}")).into_response(),
                Err(error) => {
                    tracing::error!("Cannot deliver message: {error:?}");
                    (StatusCode::BAD_GATEWAY, error.to_string()).into_response()
                }
            }
        }
    }
}
