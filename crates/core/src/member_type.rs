//! Member types recruited by a project and their display ordering.
//!
//! Member types are stored as plain strings so rows written before a new
//! type was introduced still load. Display order is fixed:
//! developer < designer < pm < anyone < anything else.

use crate::error::CoreError;

pub const MEMBER_DEVELOPER: &str = "developer";
pub const MEMBER_DESIGNER: &str = "designer";
pub const MEMBER_PM: &str = "pm";
pub const MEMBER_ANYONE: &str = "anyone";

/// Member types accepted on create and update.
pub const VALID_MEMBER_TYPES: &[&str] =
    &[MEMBER_DEVELOPER, MEMBER_DESIGNER, MEMBER_PM, MEMBER_ANYONE];

/// Sort rank of a member type. Unknown values sort last.
pub fn member_type_rank(member_type: &str) -> i8 {
    match member_type {
        MEMBER_DEVELOPER => -3,
        MEMBER_DESIGNER => -2,
        MEMBER_PM => -1,
        MEMBER_ANYONE => 0,
        _ => 1,
    }
}

/// Sort member types into display order. Stable for equal ranks.
pub fn sort_member_types<S: AsRef<str>>(member_types: &mut [S]) {
    member_types.sort_by_key(|t| member_type_rank(t.as_ref()));
}

/// Validate that `member_type` is one of [`VALID_MEMBER_TYPES`].
pub fn validate_member_type(member_type: &str) -> Result<(), CoreError> {
    if VALID_MEMBER_TYPES.contains(&member_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid member type '{member_type}'. Must be one of: {VALID_MEMBER_TYPES:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_display_order() {
        assert_eq!(member_type_rank("developer"), -3);
        assert_eq!(member_type_rank("designer"), -2);
        assert_eq!(member_type_rank("pm"), -1);
        assert_eq!(member_type_rank("anyone"), 0);
        assert_eq!(member_type_rank("marketer"), 1);
    }

    #[test]
    fn sort_puts_unknown_types_last() {
        let mut types = vec!["anyone", "marketer", "pm", "developer", "designer"];
        sort_member_types(&mut types);
        assert_eq!(types, ["developer", "designer", "pm", "anyone", "marketer"]);
    }

    #[test]
    fn sort_is_stable_for_unknown_types() {
        let mut types = vec![
            "zeta".to_string(),
            "pm".to_string(),
            "alpha".to_string(),
        ];
        sort_member_types(&mut types);
        assert_eq!(types, ["pm", "zeta", "alpha"]);
    }

    #[test]
    fn validate_rejects_unknown_type() {
        assert!(validate_member_type("designer").is_ok());
        let err = validate_member_type("ceo").unwrap_err();
        assert!(err.to_string().contains("Invalid member type 'ceo'"));
    }
}
