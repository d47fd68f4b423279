use crate::github::payload::GithubEvent;
use crate::github::WebhookError;
use crate::notification::extract::extract;
use crate::notification::format::format_event;
use crate::notification::{suppression, NormalizedEvent, Suppression};

/// Result of handling a single webhook delivery.
#[derive(Debug)]
pub enum Outcome {
    /// The message should be sent to the chat. It is empty for unrecognized events.
    Delivered(String),
    /// The event was deliberately not forwarded.
    Suppressed(Suppression),
    /// The delivery could not be decoded, so it never reached extraction.
    Failed(WebhookError),
}

/// Resolves the result of decoding a webhook delivery into an [`Outcome`].
pub fn resolve(decoded: Result<GithubEvent, WebhookError>) -> Outcome {
    match decoded {
        Ok(event) => dispatch(&event),
        Err(error) => Outcome::Failed(error),
    }
}

pub fn dispatch(event: &GithubEvent) -> Outcome {
    let Some(event) = extract(event) else {
        return Outcome::Delivered(String::new());
    };
    if let NormalizedEvent::Crud { .. } | NormalizedEvent::Status { .. } = event {
        if let Some(reason) = suppression(&event) {
            return Outcome::Suppressed(reason);
        }
    }
    Outcome::Delivered(format_event(&event))
}
