//! Outgoing email messages.

use serde::Serialize;

/// Prefix on every subject line.
const SUBJECT_PREFIX: &str = "[Sidemate]";

/// A message ready to be handed to [`crate::EmailDelivery::send`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub subject: String,
    pub body: String,
}

impl Notice {
    /// Contact form submission forwarded to the site administrator.
    pub fn contact(from_email: &str, title: &str, content: &str) -> Self {
        Self {
            subject: format!("{SUBJECT_PREFIX} Contact: {}", title.trim()),
            body: format!("From: {from_email}\n\n{content}"),
        }
    }

    /// Confirmation sent to a user after their account was deleted.
    pub fn account_deleted(nickname: &str) -> Self {
        Self {
            subject: format!("{SUBJECT_PREFIX} Your account has been deleted"),
            body: format!(
                "Hi {nickname},\n\n\
                 Your Sidemate account and all of its projects, comments and bookmarks \
                 have been removed. Thank you for using Sidemate."
            ),
        }
    }
}
