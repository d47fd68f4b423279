use std::fmt::{Display, Formatter};

use crate::notification::NormalizedEvent;

/// Actions on issues, pull requests and reviews that are too noisy to be forwarded.
pub const SUPPRESSED_ACTIONS: &[&str] = &[
    "labeled",
    "unlabeled",
    "assigned",
    "unassigned",
    "review_requested",
    "review_request_removed",
    "edited",
];

/// Commit status that is never forwarded.
pub const SUPPRESSED_STATUS: &str = "pending";

/// Reason why an event was not forwarded. This is a deliberate outcome, not a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Suppression {
    PendingStatus,
    Action(String),
}

impl Display for Suppression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Suppression::PendingStatus => write!(f, "Not Allowed: status {SUPPRESSED_STATUS}"),
            Suppression::Action(action) => write!(f, "Not Allowed: action {action}"),
        }
    }
}

pub fn suppression(event: &NormalizedEvent) -> Option<Suppression> {
    match event {
        NormalizedEvent::Status { status, .. } if status.state == SUPPRESSED_STATUS => {
            Some(Suppression::PendingStatus)
        }
        NormalizedEvent::Crud { content, .. }
            if SUPPRESSED_ACTIONS.contains(&content.action.as_str()) =>
        {
            Some(Suppression::Action(content.action.clone()))
        }
        NormalizedEvent::Status { .. }
        | NormalizedEvent::Crud { .. }
        | NormalizedEvent::Comment { .. }
        | NormalizedEvent::Ping => None,
    }
}

pub fn should_suppress(event: &NormalizedEvent) -> bool {
    suppression(event).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{Comment, Content, EventKind, Sender, Status};

    fn sender() -> Sender {
        Sender {
            login: "alice".to_string(),
            profile_url: "https://x/alice".to_string(),
        }
    }

    fn crud(kind: EventKind, action: &str, body: &str) -> NormalizedEvent {
        NormalizedEvent::Crud {
            kind,
            sender: sender(),
            content: Content {
                action: action.to_string(),
                title: "Fix bug".to_string(),
                url: "https://x/pr/5".to_string(),
                body: body.to_string(),
            },
        }
    }

    fn status(state: &str, message: &str) -> NormalizedEvent {
        NormalizedEvent::Status {
            sender: sender(),
            status: Status {
                state: state.to_string(),
                message: message.to_string(),
                url: "https://x/s/9".to_string(),
            },
        }
    }

    #[test]
    fn suppress_noisy_actions_for_every_kind() {
        let kinds = [
            EventKind::Issue,
            EventKind::PullRequest,
            EventKind::PullRequestReview,
        ];
        for kind in kinds {
            for action in SUPPRESSED_ACTIONS {
                for body in ["", "Additions: 3 Deletions: 1"] {
                    let event = crud(kind, action, body);
                    assert_eq!(
                        suppression(&event),
                        Some(Suppression::Action(action.to_string()))
                    );
                }
            }
        }
    }

    #[test]
    fn forward_other_actions() {
        for action in ["opened", "closed", "reopened", "submitted", "synchronize", ""] {
            assert!(!should_suppress(&crud(EventKind::PullRequest, action, "")));
        }
    }

    #[test]
    fn action_match_is_exact() {
        assert!(!should_suppress(&crud(EventKind::Issue, "Labeled", "")));
        assert!(!should_suppress(&crud(EventKind::Issue, "labeled ", "")));
    }

    #[test]
    fn suppress_pending_status() {
        for message in ["", "build started", "[weird](markdown)"] {
            assert_eq!(
                suppression(&status("pending", message)),
                Some(Suppression::PendingStatus)
            );
        }
    }

    #[test]
    fn forward_finished_status() {
        for state in ["success", "failure", "error"] {
            assert!(!should_suppress(&status(state, "build passed")));
        }
    }

    #[test]
    fn never_suppress_comments_and_ping() {
        let comment = NormalizedEvent::Comment {
            kind: EventKind::Issue,
            sender: sender(),
            comment: Comment {
                body: "edited".to_string(),
                url: "https://x/c/1".to_string(),
            },
        };
        assert!(!should_suppress(&comment));
        assert!(!should_suppress(&NormalizedEvent::Ping));
    }

    #[test]
    fn suppression_reason_text() {
        assert_eq!(
            Suppression::PendingStatus.to_string(),
            "Not Allowed: status pending"
        );
        assert_eq!(
            Suppression::Action("labeled".to_string()).to_string(),
            "Not Allowed: action labeled"
        );
    }
}
