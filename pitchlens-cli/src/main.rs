use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

// Import from pitchlens-core
use pitchlens_core::responses::{
    decode_feedback, AnswerSubmission, QuestionsResponse, ScoreResponse,
};
use pitchlens_core::serialization::OUTPUT_FORMATS;
use pitchlens_core::{FeedbackConfig, FeedbackProcessor, FeedbackReport, PipelineStages};

// Import CLI utilities
use pitchlens_cli::evaluation_client::DEFAULT_SERVICE_URL;
use pitchlens_cli::render::{render_questions, render_text};
use pitchlens_cli::EvaluationClient;

#[derive(Parser)]
#[command(name = "pitchlens")]
#[command(about = "Structure AI pitch feedback into titled, categorised sections")]
struct Args {
    /// Path to the feedback text or saved service response (reads stdin if not specified)
    #[arg(short, long)]
    input: Option<String>,

    /// What the input holds: raw, score, questions, or judge
    #[arg(short, long, default_value = "raw")]
    response: String,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Output format: text, sections, or flat
    #[arg(short = 'f', long, default_value = "text")]
    output_format: String,

    /// Output file path (prints to stdout if not specified)
    #[arg(short, long)]
    output: Option<String>,

    /// Practice question to answer (sends the answer for judging)
    #[arg(long)]
    question: Option<String>,

    /// Free-text answer to the practice question
    #[arg(long)]
    answer: Option<String>,

    /// Base URL of the evaluation service
    #[arg(long, default_value = DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Log timings of each pipeline step
    #[arg(long)]
    profile: bool,

    /// Dump all intermediate pipeline stage outputs to a directory
    #[arg(long)]
    dump_stages: bool,

    /// Directory for stage dump output
    #[arg(long, default_value = "test_outputs/stages")]
    stages_dir: String,

    /// Show available options and exit
    #[arg(long)]
    show_configs: bool,

    /// Print the built-in config as YAML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.profile);

    if args.show_configs {
        show_help();
        return Ok(());
    }

    if args.print_default_config {
        print!("{}", FeedbackConfig::default().to_yaml()?);
        return Ok(());
    }

    println!("🦀 Pitchlens Feedback Parser");

    let config = match resolve_config_path(args.config.as_deref()) {
        Some(path) => {
            println!("📋 Loading config from: {}", path.display());
            FeedbackConfig::load_with_fallback(Some(&path))
        }
        None => {
            println!("📋 Using default config");
            FeedbackConfig::default()
        }
    };
    let processor = FeedbackProcessor::with_config(config);

    let mut score = None;
    let feedback = if args.question.is_some() || args.answer.is_some() {
        let submission = AnswerSubmission::new(
            args.question.clone().unwrap_or_default(),
            args.answer.clone().unwrap_or_default(),
        )?;
        println!("📤 Sending answer to: {}", args.service_url);
        EvaluationClient::new(&args.service_url).judge_answer(&submission)
    } else {
        let input = read_input(args.input.as_deref())?;
        match args.response.as_str() {
            "raw" => Some(input),
            "judge" => decode_feedback(&input),
            "score" => match ScoreResponse::from_json(&input) {
                Ok(response) => {
                    score = response.display_score();
                    response.feedback
                }
                Err(e) => {
                    tracing::warn!("{e}");
                    None
                }
            },
            "questions" => {
                let response = QuestionsResponse::from_json(&input)?;
                write_output(&render_questions(&response.questions), args.output.as_deref())?;
                return Ok(());
            }
            other => {
                println!("⚠️  Unknown response kind '{other}', treating input as raw text");
                Some(input)
            }
        }
    };

    if feedback.is_none() {
        println!("⚠️  No feedback text received");
    }

    // Stage dump mode: capture and save all intermediates
    if args.dump_stages {
        println!("\n🔬 Pipeline stage dump mode");
        let stages = processor.process_capture_stages(feedback.as_deref());
        save_stages(&stages, &args.stages_dir)?;
        println!("\n✅ All stages dumped to: {}", args.stages_dir);
        return Ok(());
    }

    let report = processor.process_with_profiling(feedback.as_deref(), args.profile);
    println!(
        "✅ {} sections, {} items",
        report.profile.total_sections, report.profile.total_items
    );

    emit_report(&report, score.as_deref(), &args)
}

fn init_tracing(profile: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if profile { "pitchlens_core=info,warn" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Explicit path wins; otherwise use the per-user config if one exists.
fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    dirs::config_dir()
        .map(|dir| dir.join("pitchlens").join("config.yaml"))
        .filter(|path| path.exists())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            println!("📄 Reading: {}", path);
            std::fs::read_to_string(path).with_context(|| format!("Failed to read input {path}"))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read feedback from stdin")?;
            Ok(buffer)
        }
    }
}

fn emit_report(report: &FeedbackReport, score: Option<&str>, args: &Args) -> Result<()> {
    match args.output_format.as_str() {
        "text" => write_output(&render_text(report, score), args.output.as_deref()),
        format => match &args.output {
            Some(path) => {
                report.save_with_format(path, format)?;
                println!("💾 Report saved to: {}", path);
                Ok(())
            }
            None => {
                println!("{}", report.to_json_with_format(format)?);
                Ok(())
            }
        },
    }
}

fn write_output(content: &str, output: Option<&str>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("Failed to write {path}"))?;
            println!("💾 Output saved to: {}", path);
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn show_help() {
    println!("\n📋 Available Configuration Options:");
    println!("  --config <path>          Load custom config file (default: <config dir>/pitchlens/config.yaml)");
    println!("  --input <path>           Feedback text or saved response (default: stdin)");
    println!("  --response <kind>        raw, score, questions, or judge");
    println!("  --output <path>          Output file path (default: stdout)");
    println!("  --output-format <fmt>    text, {}", OUTPUT_FORMATS.join(", "));
    println!("  --question/--answer      Send an answer to the evaluation service for judging");
    println!("  --service-url <url>      Evaluation service base URL (default: {DEFAULT_SERVICE_URL})");
    println!("  --print-default-config   Print the built-in classification rules as YAML");

    println!("\n📄 Output Formats:");
    println!("  text      - Titled sections with a marker per item category (default)");
    println!("  sections  - Full JSON report with profile and source hash");
    println!("  flat      - One JSON row per item: section, text, category");

    println!("\n📝 Usage Examples:");
    println!("  pitchlens -i feedback.txt");
    println!("  pitchlens -i contact_score.json -r score -f sections -o report.json");
    println!("  pitchlens -i questions.json -r questions");
    println!("  pitchlens --question \"Why now?\" --answer \"Costs fell 10x\"");
}

fn save_stages(stages: &PipelineStages, output_dir: &str) -> Result<()> {
    use std::fs;
    fs::create_dir_all(output_dir)?;
    let dir = Path::new(output_dir);

    // Stage 1: Non-blank lines
    let lines_path = dir.join("stage1_lines.json");
    fs::write(&lines_path, serde_json::to_string_pretty(&stages.lines)?)?;
    println!("  💾 {} ({} lines)", lines_path.display(), stages.lines.len());

    // Stage 2: Unclassified segments
    let segments_path = dir.join("stage2_segments.json");
    fs::write(&segments_path, serde_json::to_string_pretty(&stages.segments)?)?;
    println!("  💾 {} ({} segments)", segments_path.display(), stages.segments.len());

    // Stage 3: Final report
    let report_path = dir.join("stage3_report.json");
    stages.report.save_with_format(&report_path, "sections")?;
    println!("  💾 {} ({} sections)", report_path.display(), stages.report.sections.len());

    // Summary file: quick reference for validation scripts
    let summary = serde_json::json!({
        "captured_at": chrono::Utc::now().to_rfc3339(),
        "source_hash": stages.report.source_hash,
        "stage_counts": {
            "lines": stages.lines.len(),
            "segments": stages.segments.len(),
            "sections": stages.report.sections.len(),
            "items": stages.report.profile.total_items,
        }
    });
    let summary_path = dir.join("summary.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&summary)?)?;
    println!("  💾 {}", summary_path.display());

    Ok(())
}
