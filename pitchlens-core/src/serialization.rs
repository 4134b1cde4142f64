use crate::types::*;
use anyhow::{Context, Result};
use std::path::Path;

/// Output formats understood by `save_with_format`.
pub const OUTPUT_FORMATS: &[&str] = &["sections", "flat"];

impl FeedbackReport {
    pub fn to_flat_format(&self) -> FlatFeedback {
        let items = self
            .sections
            .iter()
            .flat_map(|section| {
                section.items.iter().map(move |item| FlatItem {
                    section: section.title.clone(),
                    text: item.text.clone(),
                    category: item.category,
                })
            })
            .collect();

        FlatFeedback {
            format: "flat".to_string(),
            items,
        }
    }

    pub fn to_json_with_format(&self, format: &str) -> Result<String> {
        let json = match format {
            "flat" => serde_json::to_string_pretty(&self.to_flat_format())?,
            "sections" => serde_json::to_string_pretty(self)?,
            other => {
                tracing::warn!("Unknown output format '{other}', using sections");
                serde_json::to_string_pretty(self)?
            }
        };
        Ok(json)
    }

    pub fn save_with_format<P: AsRef<Path>>(&self, path: P, format: &str) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_with_format(format)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        Ok(())
    }
}
