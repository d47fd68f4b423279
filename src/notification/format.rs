//! Renders normalized events as Markdown messages.
use crate::notification::{Comment, Content, EventKind, NormalizedEvent, Sender, Status};

pub fn format_event(event: &NormalizedEvent) -> String {
    match event {
        NormalizedEvent::Comment {
            kind,
            sender,
            comment,
        } => format_comment(*kind, sender, comment),
        NormalizedEvent::Crud {
            kind,
            sender,
            content,
        } => format_crud(*kind, sender, content),
        NormalizedEvent::Status { sender, status } => format_status(sender, status),
        NormalizedEvent::Ping => "ping".to_string(),
    }
}

/// Link to the profile of the sender.
pub fn format_sender(sender: &Sender) -> String {
    format!("[{}]({})", sender.login, sender.profile_url)
}

pub fn format_comment(kind: EventKind, sender: &Sender, comment: &Comment) -> String {
    // The "one" typo is part of the message format, do not fix it.
    format!(
        "{} commented one {kind} with:\n\n{}\n\n{}",
        format_sender(sender),
        comment.body,
        comment.url
    )
}

/// The details are only appended when the content has a body.
pub fn format_crud(kind: EventKind, sender: &Sender, content: &Content) -> String {
    let details = if content.body.is_empty() {
        String::new()
    } else {
        format!(" Details:\n{}", content.body)
    };
    format!(
        "{} {} the {kind}: {} {}{details}",
        format_sender(sender),
        content.action,
        content.title,
        content.url
    )
}

pub fn format_status(sender: &Sender, status: &Status) -> String {
    format!(
        "`{}`: [{}]({}) by {}",
        status.state,
        status.message,
        status.url,
        format_sender(sender)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Sender {
        Sender {
            login: "alice".to_string(),
            profile_url: "https://x/alice".to_string(),
        }
    }

    #[test]
    fn format_issue_comment() {
        let event = NormalizedEvent::Comment {
            kind: EventKind::Issue,
            sender: alice(),
            comment: Comment {
                body: "LGTM".to_string(),
                url: "https://x/c/1".to_string(),
            },
        };
        assert_eq!(
            format_event(&event),
            "[alice](https://x/alice) commented one issue with:\n\nLGTM\n\nhttps://x/c/1"
        );
    }

    #[test]
    fn format_review_comment_kind() {
        let message = format_comment(
            EventKind::PullRequest,
            &alice(),
            &Comment {
                body: "nit: typo".to_string(),
                url: "https://x/c/2".to_string(),
            },
        );
        insta::assert_snapshot!(message, @r###"
        [alice](https://x/alice) commented one pull request with:

        nit: typo

        https://x/c/2
        "###);
    }

    #[test]
    fn format_crud_with_details() {
        let event = NormalizedEvent::Crud {
            kind: EventKind::PullRequest,
            sender: alice(),
            content: Content {
                action: "opened".to_string(),
                title: "Fix bug".to_string(),
                url: "https://x/pr/5".to_string(),
                body: "Additions: 3 Deletions: 1".to_string(),
            },
        };
        assert_eq!(
            format_event(&event),
            "[alice](https://x/alice) opened the pull request: Fix bug https://x/pr/5 Details:\nAdditions: 3 Deletions: 1"
        );
    }

    #[test]
    fn format_crud_without_details() {
        let message = format_crud(
            EventKind::Issue,
            &alice(),
            &Content {
                action: "closed".to_string(),
                title: "Crash on start".to_string(),
                url: "https://x/i/7".to_string(),
                body: String::new(),
            },
        );
        assert_eq!(
            message,
            "[alice](https://x/alice) closed the issue: Crash on start https://x/i/7"
        );
    }

    #[test]
    fn format_review_kind_label() {
        let message = format_crud(
            EventKind::PullRequestReview,
            &alice(),
            &Content {
                action: "submitted".to_string(),
                title: "Fix bug".to_string(),
                url: "https://x/pr/5".to_string(),
                body: String::new(),
            },
        );
        insta::assert_snapshot!(message, @"[alice](https://x/alice) submitted the pull request review: Fix bug https://x/pr/5");
    }

    #[test]
    fn format_success_status() {
        let sender = Sender {
            login: "bob".to_string(),
            profile_url: "https://x/bob".to_string(),
        };
        let status = Status {
            state: "success".to_string(),
            message: "build passed".to_string(),
            url: "https://x/s/9".to_string(),
        };
        assert_eq!(
            format_status(&sender, &status),
            "`success`: [build passed](https://x/s/9) by [bob](https://x/bob)"
        );
    }

    #[test]
    fn format_ping() {
        assert_eq!(format_event(&NormalizedEvent::Ping), "ping");
    }

    #[test]
    fn format_is_deterministic() {
        let event = NormalizedEvent::Comment {
            kind: EventKind::Commit,
            sender: alice(),
            comment: Comment {
                body: "first line\nsecond line".to_string(),
                url: "https://x/c/3".to_string(),
            },
        };
        assert_eq!(format_event(&event), format_event(&event.clone()));
    }
}
