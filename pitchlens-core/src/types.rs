use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

pub type ReportId = Uuid;

/// The schema version stamped on every report output.
/// Bump this when the output shape changes.
pub const SCHEMA_VERSION: &str = "0.1.0";

// ===== FEEDBACK MODEL =====

/// Semantic tag for a single feedback item.
///
/// Variant order is the display order used by profiles and renderers; it is
/// NOT the classification priority (see `classifier`).
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Category {
    Suggestion,
    Strength,
    Example,
    #[default]
    General,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Suggestion,
        Category::Strength,
        Category::Example,
        Category::General,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Suggestion => "Suggestion",
            Category::Strength => "Strength",
            Category::Example => "Example",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One atomic piece of feedback. `text` is trimmed and never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackItem {
    pub text: String,
    pub category: Category,
}

/// A titled, ordered group of classified items. Never has zero items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackSection {
    pub title: String,
    pub items: Vec<FeedbackItem>,
}

/// Segmenter output: a titled group whose items have not been classified yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawSection {
    pub title: String,
    pub items: Vec<String>,
}

// ===== REPORT =====

/// Serialization-ready wrapper around one processed response.
///
/// `report_id` and `created_at` are fresh per call; everything else is a
/// pure function of the raw text and the config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub schema_version: String,
    pub report_id: ReportId,
    pub created_at: DateTime<Utc>,
    /// SHA-256 of the raw feedback (empty input hashes the empty string)
    pub source_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_feedback: Option<String>,
    pub sections: Vec<FeedbackSection>,
    pub profile: FeedbackProfile,
}

/// Counts computed mechanically from the sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedbackProfile {
    pub total_sections: usize,
    pub total_items: usize,
    pub category_counts: BTreeMap<Category, usize>,
}

impl Default for FeedbackProfile {
    fn default() -> Self {
        Self {
            total_sections: 0,
            total_items: 0,
            category_counts: Category::ALL.iter().map(|c| (*c, 0)).collect(),
        }
    }
}

impl FeedbackProfile {
    pub fn from_sections(sections: &[FeedbackSection]) -> Self {
        let mut profile = Self::default();
        profile.total_sections = sections.len();

        for item in sections.iter().flat_map(|section| &section.items) {
            profile.total_items += 1;
            *profile.category_counts.entry(item.category).or_insert(0) += 1;
        }

        profile
    }

    pub fn count(&self, category: Category) -> usize {
        self.category_counts.get(&category).copied().unwrap_or(0)
    }
}

// Alternate output format structures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatFeedback {
    pub format: String,
    pub items: Vec<FlatItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlatItem {
    pub section: String,
    pub text: String,
    pub category: Category,
}
