use crate::classifier::KeywordClassifier;
use crate::config::FeedbackConfig;
use crate::rules::{content_lines, segment};
use crate::types::*;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Captured intermediate outputs from each pipeline stage
/// Used for testing and diagnostics: lets you inspect/compare each boundary
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineStages {
    pub lines: Vec<String>,
    pub segments: Vec<RawSection>,
    pub report: FeedbackReport,
}

/// Simple profiler that collects timings for pipeline steps
pub struct StepProfiler {
    enabled: bool,
    timings: Vec<(String, Duration)>,
}

impl StepProfiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            timings: Vec::new(),
        }
    }

    pub fn time_step<F, R>(&mut self, step_name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.enabled {
            return f();
        }

        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        tracing::info!("⏱️  {}: {}µs", step_name, elapsed.as_micros());
        self.timings.push((step_name.to_string(), elapsed));

        result
    }

    pub fn timings(&self) -> &[(String, Duration)] {
        &self.timings
    }

    pub fn log_summary(&self) {
        if !self.enabled || self.timings.is_empty() {
            return;
        }

        let total: Duration = self.timings.iter().map(|(_, d)| *d).sum();
        for (step, duration) in &self.timings {
            let percentage = if total.is_zero() {
                0.0
            } else {
                (duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            };
            tracing::info!(
                "   {:.<35} {}µs ({:.1}%)",
                step,
                duration.as_micros(),
                percentage
            );
        }
        tracing::info!("   {:.<35} {}µs", "Total", total.as_micros());
    }
}

/// SHA-256 hex digest of the raw feedback. Absent input hashes as empty text.
pub fn feedback_hash(raw: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.unwrap_or_default().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Raw feedback → classified sections. Holds no per-call state, so one
/// processor can serve every response for the lifetime of a view.
#[derive(Debug, Clone)]
pub struct FeedbackProcessor {
    config: FeedbackConfig,
    classifier: KeywordClassifier,
}

impl Default for FeedbackProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackProcessor {
    pub fn new() -> Self {
        Self::with_config(FeedbackConfig::default())
    }

    pub fn with_config(config: FeedbackConfig) -> Self {
        let classifier = KeywordClassifier::from_config(&config.classification);
        Self { config, classifier }
    }

    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    pub fn classifier(&self) -> &KeywordClassifier {
        &self.classifier
    }

    /// Segment, then classify every item. Section and item order are kept.
    pub fn process(&self, raw: Option<&str>) -> Vec<FeedbackSection> {
        let segments = segment(raw);
        self.classify_segments(segments)
    }

    /// Process and wrap the sections in a report with profile and identity.
    pub fn build_report(&self, raw: Option<&str>) -> FeedbackReport {
        self.process_with_profiling(raw, false)
    }

    pub fn process_with_profiling(&self, raw: Option<&str>, profile: bool) -> FeedbackReport {
        let mut profiler = StepProfiler::new(profile);

        let segments = profiler.time_step("Segmentation", || segment(raw));
        let sections = profiler.time_step("Classification", || self.classify_segments(segments));
        let report = profiler.time_step("Report", || self.assemble_report(raw, sections));

        profiler.log_summary();
        report
    }

    /// Run the pipeline and keep every intermediate for inspection.
    pub fn process_capture_stages(&self, raw: Option<&str>) -> PipelineStages {
        let lines = raw
            .map(|text| content_lines(text).map(str::to_string).collect())
            .unwrap_or_default();
        let segments = segment(raw);
        let sections = self.classify_segments(segments.clone());
        let report = self.assemble_report(raw, sections);

        PipelineStages {
            lines,
            segments,
            report,
        }
    }

    fn classify_segments(&self, segments: Vec<RawSection>) -> Vec<FeedbackSection> {
        let sections: Vec<FeedbackSection> = segments
            .into_iter()
            .map(|raw_section| FeedbackSection {
                title: raw_section.title,
                items: raw_section
                    .items
                    .into_iter()
                    .map(|text| {
                        let category = self.classifier.classify(&text);
                        FeedbackItem { text, category }
                    })
                    .collect(),
            })
            .collect();

        tracing::debug!(
            sections = sections.len(),
            items = sections.iter().map(|s| s.items.len()).sum::<usize>(),
            "classified feedback"
        );
        sections
    }

    fn assemble_report(&self, raw: Option<&str>, sections: Vec<FeedbackSection>) -> FeedbackReport {
        FeedbackReport {
            schema_version: SCHEMA_VERSION.to_string(),
            report_id: Uuid::new_v4(),
            created_at: Utc::now(),
            source_hash: feedback_hash(raw),
            raw_feedback: if self.config.include_raw_feedback {
                raw.map(str::to_string)
            } else {
                None
            },
            profile: FeedbackProfile::from_sections(&sections),
            sections,
        }
    }
}

/// Process with the built-in classification table.
pub fn process(raw: Option<&str>) -> Vec<FeedbackSection> {
    FeedbackProcessor::new().process(raw)
}
