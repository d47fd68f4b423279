//! Maps raw webhook payloads onto the [`NormalizedEvent`] model.
use crate::github::payload::{
    CommentPayload, GithubEvent, IssuesPayload, PullRequestPayload, PullRequestReviewPayload,
    StatusPayload, WebhookUser,
};
use crate::notification::{Comment, Content, EventKind, NormalizedEvent, Sender, Status};

/// Returns `None` for event kinds that we do not present.
pub fn extract(event: &GithubEvent) -> Option<NormalizedEvent> {
    let event = match event {
        GithubEvent::CommitComment(payload) => comment_event(EventKind::Commit, payload),
        GithubEvent::IssueComment(payload) => comment_event(EventKind::Issue, payload),
        GithubEvent::PullRequestReviewComment(payload) => {
            comment_event(EventKind::PullRequest, payload)
        }
        GithubEvent::PullRequestReview(payload) => pull_request_review_event(payload),
        GithubEvent::PullRequest(payload) => pull_request_event(payload),
        GithubEvent::Issues(payload) => issues_event(payload),
        GithubEvent::Status(payload) => status_event(payload),
        GithubEvent::Ping(_) => NormalizedEvent::Ping,
        GithubEvent::Unrecognized(_) => return None,
    };
    Some(event)
}

pub fn comment_event(kind: EventKind, payload: &CommentPayload) -> NormalizedEvent {
    NormalizedEvent::Comment {
        kind,
        sender: sender(&payload.sender),
        comment: Comment {
            body: payload.comment.body.clone(),
            url: payload.comment.html_url.clone(),
        },
    }
}

pub fn pull_request_review_event(payload: &PullRequestReviewPayload) -> NormalizedEvent {
    NormalizedEvent::Crud {
        kind: EventKind::PullRequestReview,
        sender: sender(&payload.sender),
        content: Content {
            action: payload.action.clone(),
            title: payload.pull_request.title.clone(),
            url: payload.pull_request.html_url.clone(),
            body: payload.review.body.clone(),
        },
    }
}

pub fn pull_request_event(payload: &PullRequestPayload) -> NormalizedEvent {
    let pr = &payload.pull_request;
    NormalizedEvent::Crud {
        kind: EventKind::PullRequest,
        sender: sender(&payload.sender),
        content: Content {
            action: payload.action.clone(),
            title: pr.title.clone(),
            url: pr.html_url.clone(),
            body: format!("Additions: {} Deletions: {}", pr.additions, pr.deletions),
        },
    }
}

pub fn issues_event(payload: &IssuesPayload) -> NormalizedEvent {
    NormalizedEvent::Crud {
        kind: EventKind::Issue,
        sender: sender(&payload.sender),
        content: Content {
            action: payload.action.clone(),
            title: payload.issue.title.clone(),
            url: payload.issue.html_url.clone(),
            body: String::new(),
        },
    }
}

pub fn status_event(payload: &StatusPayload) -> NormalizedEvent {
    NormalizedEvent::Status {
        sender: sender(&payload.sender),
        status: Status {
            state: payload.state.clone(),
            message: payload.commit.commit.message.clone(),
            url: payload.commit.html_url.clone(),
        },
    }
}

fn sender(user: &WebhookUser) -> Sender {
    Sender {
        login: user.login.clone(),
        profile_url: user.html_url.clone(),
    }
}
