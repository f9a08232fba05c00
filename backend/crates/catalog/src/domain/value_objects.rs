//! Domain Value Objects
//!
//! Validated field types. Lengths are counted in characters, not bytes.

use crate::error::{CatalogError, CatalogResult};
use kernel::id::TagId;
use std::collections::HashSet;
use std::fmt;

fn check_text(field: &str, value: &str, required: bool, max_chars: usize) -> CatalogResult<()> {
    if required && value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max_chars {
        return Err(CatalogError::Validation(format!(
            "{} must be at most {} characters",
            field, max_chars
        )));
    }
    Ok(())
}

macro_rules! text_value {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal, max = $max:expr, required = $required:expr, trim = $trim:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub const MAX_CHARS: usize = $max;

            pub fn parse(value: impl Into<String>) -> CatalogResult<Self> {
                let value: String = value.into();
                let value = if $trim { value.trim().to_string() } else { value };
                check_text($field, &value, $required, $max)?;
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_value!(
    /// Category name, trimmed, 1-50 characters
    CategoryName, field = "name", max = 50, required = true, trim = true
);

text_value!(
    CategoryDescription, field = "description", max = 200, required = false, trim = false
);

text_value!(
    /// Tag name, trimmed, 1-30 characters
    TagName, field = "name", max = 30, required = true, trim = true
);

text_value!(
    /// Prompt title, trimmed, 1-100 characters
    PromptTitle, field = "title", max = 100, required = true, trim = true
);

text_value!(
    /// Markdown body, stored verbatim (leading whitespace matters in markdown)
    PromptContent, field = "content", max = 5000, required = true, trim = false
);

text_value!(
    PromptDescription, field = "description", max = 300, required = false, trim = false
);

/// Tag color as `#RRGGBB`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagColor(String);

impl TagColor {
    pub const DEFAULT: &'static str = "#3b82f6";

    pub fn parse(value: impl Into<String>) -> CatalogResult<Self> {
        let value: String = value.into();
        let value = value.trim();
        let valid = value.len() == 7
            && value.starts_with('#')
            && value[1..].chars().all(|c| c.is_ascii_hexdigit());
        if !valid {
            return Err(CatalogError::Validation(
                "color must be a hex color like #3b82f6".to_string(),
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for TagColor {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

/// Drop repeated ids, keeping first occurrences in order
pub fn dedup_tag_ids(ids: Vec<TagId>) -> Vec<TagId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// Prompt ordering for listings
///
/// All orders are descending; ties fall back to newest first, then id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptSort {
    #[default]
    CreatedAt,
    LikeCount,
    CopyCount,
    /// Composite popularity, see [`crate::domain::services::hot_score`]
    Hot,
}

impl PromptSort {
    /// Unrecognised or missing values fall back to [`PromptSort::CreatedAt`]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("like_count") => PromptSort::LikeCount,
            Some("copy_count") => PromptSort::CopyCount,
            Some("hot") => PromptSort::Hot,
            _ => PromptSort::CreatedAt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptSort::CreatedAt => "created_at",
            PromptSort::LikeCount => "like_count",
            PromptSort::CopyCount => "copy_count",
            PromptSort::Hot => "hot",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::Id;

    #[test]
    fn test_name_is_trimmed_and_bounded() {
        assert_eq!(CategoryName::parse("  Writing ").unwrap().as_str(), "Writing");
        assert!(CategoryName::parse("   ").is_err());
        assert!(CategoryName::parse("").is_err());
        assert!(CategoryName::parse("x".repeat(50)).is_ok());
        assert!(CategoryName::parse("x".repeat(51)).is_err());
        assert!(TagName::parse("y".repeat(31)).is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        // 50 three-byte characters
        assert!(CategoryName::parse("字".repeat(50)).is_ok());
        assert!(PromptTitle::parse("é".repeat(100)).is_ok());
        assert!(PromptTitle::parse("é".repeat(101)).is_err());
    }

    #[test]
    fn test_content_kept_verbatim() {
        let content = PromptContent::parse("    code block\n").unwrap();
        assert_eq!(content.as_str(), "    code block\n");
        assert!(PromptContent::parse("\n\t ").is_err());
        assert!(PromptContent::parse("a".repeat(5001)).is_err());
    }

    #[test]
    fn test_optional_descriptions_may_be_empty() {
        assert!(CategoryDescription::parse("").is_ok());
        assert!(CategoryDescription::parse("d".repeat(201)).is_err());
        assert!(PromptDescription::parse("d".repeat(300)).is_ok());
        assert!(PromptDescription::parse("d".repeat(301)).is_err());
    }

    #[test]
    fn test_tag_color() {
        assert_eq!(TagColor::default().as_str(), "#3b82f6");
        assert!(TagColor::parse("#FF00aa").is_ok());
        assert!(TagColor::parse("FF00aa").is_err());
        assert!(TagColor::parse("#FF00a").is_err());
        assert!(TagColor::parse("#GG0000").is_err());
        assert!(TagColor::parse("#ff00aa00").is_err());
    }

    #[test]
    fn test_dedup_tag_ids_keeps_first_occurrence() {
        let a: TagId = Id::new();
        let b: TagId = Id::new();
        assert_eq!(dedup_tag_ids(vec![a, b, a, b, a]), vec![a, b]);
        assert!(dedup_tag_ids(vec![]).is_empty());
    }

    #[test]
    fn test_sort_parse_lenient() {
        assert_eq!(PromptSort::parse_lenient(None), PromptSort::CreatedAt);
        assert_eq!(PromptSort::parse_lenient(Some("hot")), PromptSort::Hot);
        assert_eq!(PromptSort::parse_lenient(Some("like_count")), PromptSort::LikeCount);
        assert_eq!(PromptSort::parse_lenient(Some("copy_count")), PromptSort::CopyCount);
        assert_eq!(PromptSort::parse_lenient(Some("random")), PromptSort::CreatedAt);
        assert_eq!(PromptSort::Hot.as_str(), "hot");
    }
}
