//! Domain records persisted by the store.

use chrono::{DateTime, Local, Utc};

/// A named collection of journal entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One journal record. `project_id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub project_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Markdown shown for this entry: a heading with the local creation
    /// time followed by the body.
    pub fn to_markdown(&self) -> String {
        let stamp = self
            .created_at
            .with_timezone(&Local)
            .format("%a %b %-d %Y, %H:%M");
        let body = self.body.trim_end();
        if body.is_empty() {
            format!("## {stamp}\n")
        } else {
            format!("## {stamp}\n\n{body}\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(body: &str) -> Entry {
        Entry {
            id: 1,
            project_id: 1,
            body: body.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_markdown_starts_with_heading() {
        let md = entry("went for a walk").to_markdown();
        assert!(md.starts_with("## "));
        assert!(md.contains("2024"));
        assert!(md.ends_with("went for a walk\n"));
    }

    #[test]
    fn test_markdown_trims_trailing_whitespace() {
        let md = entry("line\n\n\n").to_markdown();
        assert!(md.ends_with("\n\nline\n"));
    }

    #[test]
    fn test_markdown_empty_body_is_heading_only() {
        let md = entry("").to_markdown();
        assert_eq!(md.lines().count(), 1);
    }
}
