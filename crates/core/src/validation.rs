//! Input validation shared by project, account and comment handlers.
//!
//! Every validator returns [`CoreError::Validation`] with a message that is
//! safe to show to the end user.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::member_type::validate_member_type;

/// Inclusive bounds for `projects.recruit_count`.
pub const MIN_RECRUIT_COUNT: i32 = 1;
pub const MAX_RECRUIT_COUNT: i32 = 100;

/// Maximum length of a single hashtag.
pub const MAX_HASHTAG_LENGTH: usize = 30;

/// Maximum length of a project title.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Nickname length bounds (in characters, not bytes).
pub const MIN_NICKNAME_LENGTH: usize = 2;
pub const MAX_NICKNAME_LENGTH: usize = 20;

/// Maximum comment length in characters.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Maximum report reason length in characters.
pub const MAX_REPORT_REASON_LENGTH: usize = 500;

/// Upper bound on a contact message body.
pub const MAX_CONTACT_CONTENT_LENGTH: usize = 2000;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Validate that `recruit_count` lies in `[MIN_RECRUIT_COUNT, MAX_RECRUIT_COUNT]`.
pub fn validate_recruit_count(recruit_count: i32) -> Result<(), CoreError> {
    if (MIN_RECRUIT_COUNT..=MAX_RECRUIT_COUNT).contains(&recruit_count) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Recruit count must be between {MIN_RECRUIT_COUNT} and {MAX_RECRUIT_COUNT}"
        )))
    }
}

/// Validate a project's hashtag list: at least one entry, none blank or too long.
pub fn validate_hashtags(hashtags: &[String]) -> Result<(), CoreError> {
    if hashtags.is_empty() {
        return Err(CoreError::Validation("At least one hashtag is required".into()));
    }
    for tag in hashtags {
        if tag.trim().is_empty() {
            return Err(CoreError::Validation("Hashtags must not be blank".into()));
        }
        if tag.chars().count() > MAX_HASHTAG_LENGTH {
            return Err(CoreError::Validation(format!(
                "Hashtag '{tag}' exceeds {MAX_HASHTAG_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

/// Validate a project's member type list: at least one entry, all known.
pub fn validate_member_types(member_types: &[String]) -> Result<(), CoreError> {
    if member_types.is_empty() {
        return Err(CoreError::Validation("At least one member type is required".into()));
    }
    member_types.iter().try_for_each(|t| validate_member_type(t))
}

/// Validate a project title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if len == 0 {
        return Err(CoreError::Validation("Title is required".into()));
    }
    if len > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a nickname's length.
pub fn validate_nickname(nickname: &str) -> Result<(), CoreError> {
    let len = nickname.trim().chars().count();
    if !(MIN_NICKNAME_LENGTH..=MAX_NICKNAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Nickname must be between {MIN_NICKNAME_LENGTH} and {MAX_NICKNAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the general shape of an email address.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid email address '{email}'")))
    }
}

/// Validate a non-blank text field with a maximum character count.
pub fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len == 0 {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}
