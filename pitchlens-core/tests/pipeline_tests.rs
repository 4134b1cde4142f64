//! Pipeline boundary tests: pin down the observable contract.
//!
//! - Segmentation: raw text → titled groups (totality, ordering, drops)
//! - Classification: item text → category (fixed priority)
//! - Pipeline: raw text → classified sections, end to end
//! - Report: schema, profile and identity wrapped around the sections
//! - Responses: service bodies → engine input

use pitchlens_core::responses::{decode_feedback, QuestionsResponse, ScoreResponse};
use pitchlens_core::{
    classify, process, segment, Category, FeedbackConfig, FeedbackItem, FeedbackProcessor,
    FeedbackSection, RawSection,
};

// ============================================================================
// Helpers
// ============================================================================

fn raw(title: &str, items: &[&str]) -> RawSection {
    RawSection {
        title: title.to_string(),
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

fn titles_and_items(sections: &[FeedbackSection]) -> Vec<(String, Vec<String>)> {
    sections
        .iter()
        .map(|s| {
            (
                s.title.clone(),
                s.items.iter().map(|i| i.text.clone()).collect(),
            )
        })
        .collect()
}

const PITCH_FEEDBACK: &str = "Delivery:\nGood pacing overall\nConsider slowing down at minute 2\nContent:\nGreat use of data\nExample of strong opening hook";

// ============================================================================
// Segmentation
// ============================================================================

mod segmentation {
    use super::*;

    #[test]
    fn absent_empty_and_titleless_input_yield_nothing() {
        assert!(segment(None).is_empty());
        assert!(segment(Some("")).is_empty());
        assert!(segment(Some("no titles here\nnone at all")).is_empty());
        assert!(process(None).is_empty());
        assert!(process(Some("")).is_empty());
    }

    #[test]
    fn sections_keep_input_order() {
        assert_eq!(
            segment(Some("A:\nx\nB:\ny\nz")),
            vec![raw("A", &["x"]), raw("B", &["y", "z"])]
        );
    }

    #[test]
    fn dangling_title_is_superseded() {
        assert_eq!(segment(Some("A:\nB:\nx")), vec![raw("B", &["x"])]);
    }

    #[test]
    fn leading_orphan_lines_are_dropped() {
        assert_eq!(segment(Some("x\nA:\ny")), vec![raw("A", &["y"])]);
    }

    #[test]
    fn blank_lines_do_not_change_the_result() {
        let plain = "A:\nx\nB:\ny\nz";
        let padded = "\n  \nA:\n\n\t\nx\n   \nB:\ny\n\n\nz\n  \n";
        assert_eq!(segment(Some(plain)), segment(Some(padded)));
    }

    #[test]
    fn no_section_is_ever_empty() {
        let inputs = [
            "A:",
            "A:\nB:\nC:",
            "A:\n\n\nB:\nx\nC:\n",
            ":\n:\n:",
            "x\ny\nA:\nB:\nz\nC:",
        ];
        for input in inputs {
            for section in segment(Some(input)) {
                assert!(!section.items.is_empty(), "empty section from {input:?}");
            }
        }
    }

    #[test]
    fn items_are_trimmed_and_non_empty() {
        let sections = segment(Some("Notes:\n   lead with the problem   \n\t\n  \tclose strong"));
        assert_eq!(
            sections,
            vec![raw("Notes", &["lead with the problem", "close strong"])]
        );
    }
}

// ============================================================================
// Classification
// ============================================================================

mod classification {
    use super::*;

    #[test]
    fn suggestion_beats_strength() {
        assert_eq!(
            classify("Good job but consider revising the opening"),
            Category::Suggestion
        );
    }

    #[test]
    fn strength_beats_example() {
        // "strong" is not "strength"; only the example keyword matches here
        assert_eq!(
            classify("This is a strong example of pacing"),
            Category::Example
        );
        assert_eq!(
            classify("A real strength, for example the demo"),
            Category::Strength
        );
    }

    #[test]
    fn fallback_is_general() {
        assert_eq!(classify("Great use of data"), Category::General);
        assert_eq!(classify("Slides were readable"), Category::General);
    }

    #[test]
    fn classification_ignores_section_context() {
        let sections = process(Some("Strengths:\nthe chart\nWeaknesses:\nthe chart"));
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].items[0].category, sections[1].items[0].category);
    }
}

// ============================================================================
// Pipeline
// ============================================================================

mod pipeline {
    use super::*;

    #[test]
    fn pitch_feedback_end_to_end() {
        let sections = process(Some(PITCH_FEEDBACK));

        assert_eq!(
            sections,
            vec![
                FeedbackSection {
                    title: "Delivery".to_string(),
                    items: vec![
                        FeedbackItem {
                            text: "Good pacing overall".to_string(),
                            category: Category::Strength,
                        },
                        FeedbackItem {
                            text: "Consider slowing down at minute 2".to_string(),
                            category: Category::Suggestion,
                        },
                    ],
                },
                FeedbackSection {
                    title: "Content".to_string(),
                    items: vec![
                        FeedbackItem {
                            text: "Great use of data".to_string(),
                            category: Category::General,
                        },
                        FeedbackItem {
                            text: "Example of strong opening hook".to_string(),
                            category: Category::Example,
                        },
                    ],
                },
            ]
        );
    }

    #[test]
    fn process_is_deterministic() {
        let processor = FeedbackProcessor::new();
        assert_eq!(
            processor.process(Some(PITCH_FEEDBACK)),
            processor.process(Some(PITCH_FEEDBACK))
        );
        assert_eq!(process(Some(PITCH_FEEDBACK)), processor.process(Some(PITCH_FEEDBACK)));
    }

    #[test]
    fn classification_keeps_segment_order() {
        let input = "A:\nx\nB:\ny\nz";
        let expected: Vec<(String, Vec<String>)> = segment(Some(input))
            .into_iter()
            .map(|s| (s.title, s.items))
            .collect();
        assert_eq!(titles_and_items(&process(Some(input))), expected);
    }

    #[test]
    fn configured_rules_change_categories_not_structure() {
        let config = FeedbackConfig::from_yaml(
            r#"
classification:
  rules:
    - category: Strength
      keywords: [great]
"#,
        )
        .unwrap();
        let custom = FeedbackProcessor::with_config(config).process(Some(PITCH_FEEDBACK));
        let default = process(Some(PITCH_FEEDBACK));

        assert_eq!(titles_and_items(&custom), titles_and_items(&default));
        let categories: Vec<Category> = custom
            .iter()
            .flat_map(|s| s.items.iter().map(|i| i.category))
            .collect();
        assert_eq!(
            categories,
            vec![
                Category::General,
                Category::General,
                Category::Strength,
                Category::General,
            ]
        );
    }
}

// ============================================================================
// Report
// ============================================================================

mod report {
    use super::*;

    #[test]
    fn report_profile_counts_categories() {
        let report = FeedbackProcessor::new().build_report(Some(PITCH_FEEDBACK));

        assert_eq!(report.schema_version, "0.1.0");
        assert_eq!(report.profile.total_sections, 2);
        assert_eq!(report.profile.total_items, 4);
        assert_eq!(report.profile.count(Category::Strength), 1);
        assert_eq!(report.profile.count(Category::Suggestion), 1);
        assert_eq!(report.profile.count(Category::Example), 1);
        assert_eq!(report.profile.count(Category::General), 1);
    }

    #[test]
    fn empty_input_gives_zero_filled_profile() {
        let report = FeedbackProcessor::new().build_report(None);
        assert!(report.sections.is_empty());
        assert_eq!(report.profile.total_items, 0);
        assert_eq!(report.profile.category_counts.len(), 4);
        assert!(report.profile.category_counts.values().all(|c| *c == 0));
    }

    #[test]
    fn reports_differ_only_in_identity() {
        let processor = FeedbackProcessor::new();
        let first = processor.build_report(Some(PITCH_FEEDBACK));
        let second = processor.process_with_profiling(Some(PITCH_FEEDBACK), true);

        assert_ne!(first.report_id, second.report_id);
        assert_eq!(first.source_hash, second.source_hash);
        assert_eq!(first.sections, second.sections);
        assert_eq!(first.profile, second.profile);
    }

    #[test]
    fn report_json_shape() {
        let report = FeedbackProcessor::new().build_report(Some(PITCH_FEEDBACK));
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["report_id"].is_string());
        assert!(json["created_at"].is_string());
        assert!(json.get("raw_feedback").is_none());
        assert_eq!(json["sections"][0]["items"][1]["category"], "Suggestion");
        assert_eq!(json["profile"]["category_counts"]["Example"], 1);
    }
}

// ============================================================================
// Responses
// ============================================================================

mod responses {
    use super::*;

    #[test]
    fn score_body_feeds_the_pipeline() {
        let body = serde_json::json!({
            "attention_score": 81.0,
            "feedback": PITCH_FEEDBACK,
        })
        .to_string();

        let response = ScoreResponse::from_json(&body).unwrap();
        assert_eq!(response.display_score().as_deref(), Some("81.00"));
        assert_eq!(process(response.feedback.as_deref()).len(), 2);
    }

    #[test]
    fn bad_body_degrades_to_no_breakdown() {
        let feedback = decode_feedback("Internal Server Error");
        assert_eq!(feedback, None);
        assert!(process(feedback.as_deref()).is_empty());
    }

    #[test]
    fn questions_body_normalises_entries() {
        let body = r#"{"questions": [{"question": "Who pays?"}, "What is the churn?"]}"#;
        let response = QuestionsResponse::from_json(body).unwrap();
        assert_eq!(response.questions, vec!["Who pays?", "What is the churn?"]);
    }
}
