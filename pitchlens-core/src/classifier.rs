use crate::config::ClassificationConfig;
use crate::types::Category;
use serde::{Deserialize, Serialize};

/// Built-in keyword table, in evaluation order. First match wins.
///
/// Suggestion is checked before Strength, so "Good job, but consider ..."
/// is a Suggestion. Matching is plain substring on lower-cased text, so
/// "improvement" and "unimproved" both match "improve".
pub const DEFAULT_RULES: &[(Category, &[&str])] = &[
    (Category::Suggestion, &["improve", "consider"]),
    (Category::Strength, &["strength", "good", "well done"]),
    (Category::Example, &["example", "instance"]),
];

/// One ordered classification rule with lower-cased keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new<S: AsRef<str>>(category: Category, keywords: &[S]) -> Self {
        Self {
            category,
            keywords: keywords
                .iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword.as_str()))
    }
}

/// Ordered, short-circuiting keyword classifier.
///
/// Classification depends only on the item text: no title or position input.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    rules: Vec<CategoryRule>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(category, keywords)| CategoryRule::new(*category, *keywords))
                .collect(),
        }
    }

    /// Build from config, keeping only enabled rules and their order.
    pub fn from_config(config: &ClassificationConfig) -> Self {
        Self {
            rules: config
                .rules
                .iter()
                .filter(|rule| rule.enabled)
                .map(|rule| CategoryRule::new(rule.category, rule.keywords.as_slice()))
                .collect(),
        }
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn classify(&self, text: &str) -> Category {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.category)
            .unwrap_or(Category::General)
    }
}

/// Classify with the built-in table.
pub fn classify(text: &str) -> Category {
    let lowered = text.to_lowercase();
    DEFAULT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}
