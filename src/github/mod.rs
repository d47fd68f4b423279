//! Receives GitHub webhook deliveries and decodes them into [`GithubEvent`]s.
pub mod payload;
pub mod server;
mod webhook;

pub use payload::GithubEvent;
pub use webhook::{GitHubWebhook, WebhookError, WebhookSecret};
