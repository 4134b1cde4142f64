//! Plain-text rendering for the terminal.

use pitchlens_core::{Category, FeedbackReport};
use std::fmt::Write;

/// Presentation token for each category.
pub fn category_marker(category: Category) -> &'static str {
    match category {
        Category::Suggestion => "💡",
        Category::Strength => "💪",
        Category::Example => "🎯",
        Category::General => "💬",
    }
}

pub fn render_text(report: &FeedbackReport, score: Option<&str>) -> String {
    let mut out = String::new();

    if let Some(score) = score {
        let _ = writeln!(out, "🏆 Score: {score}");
        out.push('\n');
    }

    if report.sections.is_empty() {
        out.push_str("No structured breakdown available.\n");
        return out;
    }

    for section in &report.sections {
        let _ = writeln!(out, "📋 {}", section.title);
        for item in &section.items {
            let _ = writeln!(out, "   {} {}", category_marker(item.category), item.text);
        }
        out.push('\n');
    }

    let profile = &report.profile;
    let _ = writeln!(
        out,
        "📊 {} sections, {} items ({})",
        profile.total_sections,
        profile.total_items,
        Category::ALL
            .iter()
            .map(|c| format!("{} {}", profile.count(*c), c.label().to_lowercase()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    out
}

pub fn render_questions(questions: &[String]) -> String {
    if questions.is_empty() {
        return "No questions received.\n".to_string();
    }

    let mut out = String::from("🎯 Practice Questions\n");
    for (index, question) in questions.iter().enumerate() {
        let _ = writeln!(out, "   {}. {}", index + 1, question);
    }
    out
}
