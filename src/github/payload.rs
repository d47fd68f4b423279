//! Webhook payloads of the GitHub events that we forward.
//!
//! Only the fields needed to build a notification are deserialized. Missing or `null`
//! fields fall back to their defaults (empty strings, zero counts), so a sparse payload
//! only fails to decode when it is not valid JSON or carries a field of the wrong type.
use serde::{Deserialize, Deserializer};

/// A decoded webhook delivery, discriminated by the `X-GitHub-Event` header.
#[derive(Debug)]
pub enum GithubEvent {
    CommitComment(CommentPayload),
    IssueComment(CommentPayload),
    PullRequestReviewComment(CommentPayload),
    PullRequestReview(PullRequestReviewPayload),
    PullRequest(PullRequestPayload),
    Issues(IssuesPayload),
    Status(StatusPayload),
    Ping(PingPayload),
    /// An event kind that we do not know how to present, e.g. `push`.
    Unrecognized(String),
}

impl GithubEvent {
    /// Decodes `body` according to the `X-GitHub-Event` header value.
    pub fn decode(event: &str, body: &[u8]) -> serde_json::Result<Self> {
        let event = match event {
            "commit_comment" => GithubEvent::CommitComment(serde_json::from_slice(body)?),
            "issue_comment" => GithubEvent::IssueComment(serde_json::from_slice(body)?),
            "pull_request_review_comment" => {
                GithubEvent::PullRequestReviewComment(serde_json::from_slice(body)?)
            }
            "pull_request_review" => GithubEvent::PullRequestReview(serde_json::from_slice(body)?),
            "pull_request" => GithubEvent::PullRequest(serde_json::from_slice(body)?),
            "issues" => GithubEvent::Issues(serde_json::from_slice(body)?),
            "status" => GithubEvent::Status(serde_json::from_slice(body)?),
            "ping" => GithubEvent::Ping(serde_json::from_slice(body)?),
            other => GithubEvent::Unrecognized(other.to_string()),
        };
        Ok(event)
    }

    /// Name of the event as sent in the `X-GitHub-Event` header.
    pub fn name(&self) -> &str {
        match self {
            GithubEvent::CommitComment(_) => "commit_comment",
            GithubEvent::IssueComment(_) => "issue_comment",
            GithubEvent::PullRequestReviewComment(_) => "pull_request_review_comment",
            GithubEvent::PullRequestReview(_) => "pull_request_review",
            GithubEvent::PullRequest(_) => "pull_request",
            GithubEvent::Issues(_) => "issues",
            GithubEvent::Status(_) => "status",
            GithubEvent::Ping(_) => "ping",
            GithubEvent::Unrecognized(name) => name,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct WebhookUser {
    #[serde(deserialize_with = "nullable")]
    pub login: String,
    #[serde(deserialize_with = "nullable")]
    pub html_url: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct WebhookComment {
    #[serde(deserialize_with = "nullable")]
    pub body: String,
    #[serde(deserialize_with = "nullable")]
    pub html_url: String,
}

/// Shared by `commit_comment`, `issue_comment` and `pull_request_review_comment`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CommentPayload {
    #[serde(deserialize_with = "nullable")]
    pub sender: WebhookUser,
    #[serde(deserialize_with = "nullable")]
    pub comment: WebhookComment,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct WebhookPullRequest {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub html_url: String,
    #[serde(deserialize_with = "nullable")]
    pub additions: u64,
    #[serde(deserialize_with = "nullable")]
    pub deletions: u64,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct WebhookReview {
    #[serde(deserialize_with = "nullable")]
    pub body: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct PullRequestReviewPayload {
    #[serde(deserialize_with = "nullable")]
    pub action: String,
    #[serde(deserialize_with = "nullable")]
    pub sender: WebhookUser,
    #[serde(deserialize_with = "nullable")]
    pub pull_request: WebhookPullRequest,
    #[serde(deserialize_with = "nullable")]
    pub review: WebhookReview,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct PullRequestPayload {
    #[serde(deserialize_with = "nullable")]
    pub action: String,
    #[serde(deserialize_with = "nullable")]
    pub sender: WebhookUser,
    #[serde(deserialize_with = "nullable")]
    pub pull_request: WebhookPullRequest,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct WebhookIssue {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub html_url: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct IssuesPayload {
    #[serde(deserialize_with = "nullable")]
    pub action: String,
    #[serde(deserialize_with = "nullable")]
    pub sender: WebhookUser,
    #[serde(deserialize_with = "nullable")]
    pub issue: WebhookIssue,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct CommitDetails {
    #[serde(deserialize_with = "nullable")]
    pub message: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct StatusCommit {
    #[serde(deserialize_with = "nullable")]
    pub html_url: String,
    #[serde(deserialize_with = "nullable")]
    pub commit: CommitDetails,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct StatusPayload {
    #[serde(deserialize_with = "nullable")]
    pub state: String,
    #[serde(deserialize_with = "nullable")]
    pub sender: WebhookUser,
    #[serde(deserialize_with = "nullable")]
    pub commit: StatusCommit,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct PingPayload {
    #[serde(deserialize_with = "nullable")]
    pub zen: String,
    pub hook_id: Option<u64>,
}

/// Treats an explicit `null` the same way as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
