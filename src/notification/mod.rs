//! Turns decoded GitHub events into chat messages.
//!
//! Every supported payload is first mapped onto a small [`NormalizedEvent`] model by the
//! [`extract`] functions. The [`suppress`] rules then decide whether the event is worth a
//! notification and the [`format`] functions render it as Markdown text. [`dispatch`] ties
//! these steps together.
use std::fmt::{Display, Formatter};

pub mod dispatch;
pub mod extract;
pub mod format;
pub mod suppress;

pub use dispatch::{dispatch, resolve, Outcome};
pub use suppress::{should_suppress, suppression, Suppression};

/// The user that triggered an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    pub login: String,
    pub profile_url: String,
}

/// A single comment posted on a commit, issue or review thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comment {
    pub body: String,
    pub url: String,
}

/// A CRUD-like change (opened, closed, submitted, ...) of an issue, pull request or review.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    pub action: String,
    pub title: String,
    pub url: String,
    /// Optional details, empty when there are none.
    pub body: String,
}

/// A commit status transition reported by CI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub state: String,
    pub message: String,
    pub url: String,
}

/// What an event happened on. Only used for phrasing the message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Commit,
    Issue,
    PullRequest,
    PullRequestReview,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Commit => "commit",
            EventKind::Issue => "issue",
            EventKind::PullRequest => "pull request",
            EventKind::PullRequestReview => "pull request review",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Platform agnostic representation of a webhook event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NormalizedEvent {
    Comment {
        kind: EventKind,
        sender: Sender,
        comment: Comment,
    },
    Crud {
        kind: EventKind,
        sender: Sender,
        content: Content,
    },
    Status {
        sender: Sender,
        status: Status,
    },
    Ping,
}
