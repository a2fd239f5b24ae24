//! Pure diff primitives behind the project update write path.
//!
//! A project update is split into six aspects (text fields, images,
//! hashtags, member types, recruit count, representative image). Each
//! aspect is diffed independently against the persisted state; the
//! persistence layer applies only the resulting deltas and reports a
//! [`ReconcileReport`].
//!
//! Images and member types use set difference. Hashtags are compared as an
//! ordered list and replaced wholesale on any difference.

use std::collections::HashSet;

use serde::Serialize;

/// Result of reconciling one aspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectOutcome {
    Unchanged,
    Updated,
}

impl AspectOutcome {
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Updated
        } else {
            Self::Unchanged
        }
    }

    pub fn is_updated(self) -> bool {
        self == Self::Updated
    }
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// The free-text columns of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectText {
    pub title: String,
    pub content_html: String,
    pub content_markdown: String,
}

/// Text columns that differ from the persisted row. `None` means "keep".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextChanges {
    pub title: Option<String>,
    pub content_html: Option<String>,
    pub content_markdown: Option<String>,
}

impl TextChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content_html.is_none() && self.content_markdown.is_none()
    }
}

/// Build the update set for the text columns, field by field.
pub fn diff_text(existing: &ProjectText, desired: &ProjectText) -> TextChanges {
    TextChanges {
        title: changed_scalar(&existing.title, &desired.title),
        content_html: changed_scalar(&existing.content_html, &desired.content_html),
        content_markdown: changed_scalar(&existing.content_markdown, &desired.content_markdown),
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

/// Return `Some(desired)` when it differs from `existing`.
pub fn changed_scalar<T: PartialEq + Clone>(existing: &T, desired: &T) -> Option<T> {
    (existing != desired).then(|| desired.clone())
}

// ---------------------------------------------------------------------------
// Set-valued aspects (images, member types)
// ---------------------------------------------------------------------------

/// Rows to delete and insert to turn one set into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDelta {
    pub to_delete: Vec<String>,
    pub to_add: Vec<String>,
}

impl SetDelta {
    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_add.is_empty()
    }
}

/// `to_delete = existing − desired`, `to_add = desired − existing`.
///
/// Output order follows the input order and duplicates are collapsed, so
/// repeated URLs in a request never produce repeated inserts.
pub fn diff_set(existing: &[String], desired: &[String]) -> SetDelta {
    let existing_set: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let desired_set: HashSet<&str> = desired.iter().map(String::as_str).collect();

    SetDelta {
        to_delete: ordered_difference(existing, &desired_set),
        to_add: ordered_difference(desired, &existing_set),
    }
}

fn ordered_difference(items: &[String], exclude: &HashSet<&str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| !exclude.contains(item.as_str()) && seen.insert(item.as_str()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Hashtags
// ---------------------------------------------------------------------------

/// What to do with a project's hashtag rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashtagPlan {
    /// Lists are equal element by element.
    Keep,
    /// Delete every existing row, then insert every desired entry in order.
    Replace {
        delete: Vec<String>,
        insert: Vec<String>,
    },
}

/// Compare hashtag lists by exact ordered equality.
pub fn plan_hashtags(existing: &[String], desired: &[String]) -> HashtagPlan {
    if existing == desired {
        HashtagPlan::Keep
    } else {
        HashtagPlan::Replace {
            delete: existing.to_vec(),
            insert: desired.to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Per-aspect outcome of one project update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub text: AspectOutcome,
    pub images: AspectOutcome,
    pub hashtags: AspectOutcome,
    pub member_types: AspectOutcome,
    pub recruit_count: AspectOutcome,
    pub representative_image: AspectOutcome,
}

impl ReconcileReport {
    /// A report where no aspect changed.
    pub fn unchanged() -> Self {
        Self {
            text: AspectOutcome::Unchanged,
            images: AspectOutcome::Unchanged,
            hashtags: AspectOutcome::Unchanged,
            member_types: AspectOutcome::Unchanged,
            recruit_count: AspectOutcome::Unchanged,
            representative_image: AspectOutcome::Unchanged,
        }
    }

    pub fn any_changed(&self) -> bool {
        !self.changed_aspects().is_empty()
    }

    /// Names of the aspects that were written, for logging.
    pub fn changed_aspects(&self) -> Vec<&'static str> {
        [
            ("text", self.text),
            ("images", self.images),
            ("hashtags", self.hashtags),
            ("member_types", self.member_types),
            ("recruit_count", self.recruit_count),
            ("representative_image", self.representative_image),
        ]
        .into_iter()
        .filter(|(_, outcome)| outcome.is_updated())
        .map(|(name, _)| name)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn text(title: &str, html: &str, md: &str) -> ProjectText {
        ProjectText {
            title: title.into(),
            content_html: html.into(),
            content_markdown: md.into(),
        }
    }

    #[test]
    fn identical_text_produces_no_changes() {
        let current = text("t", "<p>x</p>", "x");
        assert!(diff_text(&current, &current.clone()).is_empty());
    }

    #[test]
    fn text_diff_only_contains_changed_fields() {
        let changes = diff_text(&text("old", "<p>x</p>", "x"), &text("new", "<p>x</p>", "y"));
        assert_eq!(changes.title.as_deref(), Some("new"));
        assert_eq!(changes.content_html, None);
        assert_eq!(changes.content_markdown.as_deref(), Some("y"));
    }

    #[test]
    fn image_delta_is_set_difference() {
        let delta = diff_set(&strings(&["u1", "u2"]), &strings(&["u2", "u3"]));
        assert_eq!(delta.to_delete, strings(&["u1"]));
        assert_eq!(delta.to_add, strings(&["u3"]));
    }

    #[test]
    fn applying_delta_yields_desired_set() {
        let existing = strings(&["a", "b", "c", "d"]);
        let desired = strings(&["c", "e", "a", "f"]);
        let delta = diff_set(&existing, &desired);

        let mut result: HashSet<String> = existing.into_iter().collect();
        for url in &delta.to_delete {
            result.remove(url);
        }
        result.extend(delta.to_add.iter().cloned());

        let expected: HashSet<String> = desired.into_iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn equal_sets_in_different_order_are_unchanged() {
        let delta = diff_set(&strings(&["pm", "developer"]), &strings(&["developer", "pm"]));
        assert!(delta.is_empty());
    }

    #[test]
    fn duplicate_desired_entries_are_added_once() {
        let delta = diff_set(&[], &strings(&["u1", "u1"]));
        assert_eq!(delta.to_add, strings(&["u1"]));
    }

    #[test]
    fn equal_hashtag_lists_are_kept() {
        let tags = strings(&["rust", "web"]);
        assert_eq!(plan_hashtags(&tags, &tags.clone()), HashtagPlan::Keep);
    }

    #[test]
    fn one_differing_hashtag_replaces_the_whole_list() {
        let plan = plan_hashtags(&strings(&["a", "b"]), &strings(&["a", "c"]));
        assert_matches!(plan, HashtagPlan::Replace { delete, insert } => {
            assert_eq!(delete, strings(&["a", "b"]));
            assert_eq!(insert, strings(&["a", "c"]));
        });
    }

    #[test]
    fn reordered_hashtags_are_replaced() {
        let plan = plan_hashtags(&strings(&["a", "b"]), &strings(&["b", "a"]));
        assert_matches!(plan, HashtagPlan::Replace { .. });
    }

    #[test]
    fn longer_hashtag_list_is_replaced() {
        let plan = plan_hashtags(&strings(&["a"]), &strings(&["a", "b"]));
        assert_matches!(plan, HashtagPlan::Replace { delete, .. } => {
            assert_eq!(delete, strings(&["a"]));
        });
    }

    #[test]
    fn changed_scalar_compares_values() {
        assert_eq!(changed_scalar(&5, &5), None);
        assert_eq!(changed_scalar(&5, &6), Some(6));
    }

    #[test]
    fn report_lists_changed_aspects() {
        let mut report = ReconcileReport::unchanged();
        assert!(!report.any_changed());

        report.hashtags = AspectOutcome::Updated;
        report.recruit_count = AspectOutcome::Updated;
        assert!(report.any_changed());
        assert_eq!(report.changed_aspects(), ["hashtags", "recruit_count"]);
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let json = serde_json::to_value(AspectOutcome::Unchanged).unwrap();
        assert_eq!(json, "unchanged");
    }
}
