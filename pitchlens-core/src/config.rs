use crate::classifier::DEFAULT_RULES;
use crate::types::Category;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Default value functions for serde
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedbackConfig {
    /// Keyword rules used to tag each item
    #[serde(default)]
    pub classification: ClassificationConfig,
    /// Carry the raw evaluator text inside the report for debugging
    #[serde(default)]
    pub include_raw_feedback: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassificationConfig {
    /// Rules in evaluation order; the first enabled rule with a matching
    /// keyword decides the category, otherwise the item is General.
    pub rules: Vec<CategoryRuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryRuleConfig {
    pub category: Category,
    pub keywords: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|(category, keywords)| CategoryRuleConfig {
                    category: *category,
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                    enabled: true,
                })
                .collect(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            classification: ClassificationConfig::default(),
            include_raw_feedback: false,
        }
    }
}

impl FeedbackConfig {
    /// Load config from a YAML file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: FeedbackConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback<P: AsRef<Path>>(path: Option<P>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p.as_ref()).unwrap_or_else(|e| {
                tracing::warn!(
                    "Failed to load config from {}, using defaults: {e:#}",
                    p.as_ref().display()
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// An empty keyword would match every item, so reject it up front.
    pub fn validate(&self) -> Result<()> {
        for (index, rule) in self.classification.rules.iter().enumerate() {
            if rule.keywords.iter().any(|k| k.trim().is_empty()) {
                bail!(
                    "classification rule {index} ({}) has an empty keyword",
                    rule.category
                );
            }
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
