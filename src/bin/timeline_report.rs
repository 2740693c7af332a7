use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Parser;
use narration_timeline::timeline::plan::DEFAULT_FPS;
use narration_timeline::{
    compute_report, AdScript, NarrationInput, SessionContext, TimelineBuilder, TimelineConfig,
    TimelinePlan,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[path = "timeline_report/json_report_formatter.rs"]
mod json_report_formatter;

#[derive(Debug, Parser)]
#[command(name = "timeline_report")]
#[command(about = "Plan subtitle and scene timelines from narration timing")]
struct Args {
    /// NarrationInput JSON (transcript, optional character timing, durations, assets).
    #[arg(long, env = "TIMELINE_INPUT", required_unless_present = "script", conflicts_with = "script")]
    input: Option<PathBuf>,
    /// Ad script JSON; narration is estimated from the assembled text.
    #[arg(long, env = "TIMELINE_SCRIPT")]
    script: Option<PathBuf>,
    /// Scene image URIs, used with --script.
    #[arg(long = "asset", requires = "script")]
    assets: Vec<String>,
    #[arg(long, env = "TIMELINE_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "TIMELINE_OUT", default_value = "timeline-plan.json")]
    out: PathBuf,
    #[arg(long, env = "TIMELINE_SRT")]
    srt: Option<PathBuf>,
    #[arg(long, env = "TIMELINE_REPORT")]
    report: Option<PathBuf>,
    #[arg(long, env = "TIMELINE_FPS", default_value_t = DEFAULT_FPS)]
    fps: u32,
    /// Directory for session artifacts (timing dump).
    #[arg(long, env = "TIMELINE_ARTIFACT_DIR")]
    artifact_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct PlanDocument<'a> {
    generated_at: &'a str,
    fps: u32,
    frame_count: u64,
    frame_size: (u32, u32),
    plan: &'a TimelinePlan,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!(error = %err, "timeline_report failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    if args.fps == 0 {
        return Err("--fps must be >= 1.".to_string());
    }

    let config = match args.config.as_ref() {
        Some(path) => TimelineConfig::load(path).map_err(|err| err.to_string())?,
        None => TimelineConfig::default(),
    };
    let engine = TimelineBuilder::new(config)
        .build()
        .map_err(|err| err.to_string())?;

    let input = load_input(&args)?;
    let artifact_dir = args
        .artifact_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("narration-timeline"));
    let session = SessionContext::new(artifact_dir);

    let plan = engine
        .plan(&session, &input)
        .map_err(|err| err.to_string())?;
    let generated_at = Utc::now().to_rfc3339();

    let document = PlanDocument {
        generated_at: &generated_at,
        fps: args.fps,
        frame_count: plan.frame_count(args.fps),
        frame_size: plan.frame_size(),
        plan: &plan,
    };
    json_report_formatter::write_json(&args.out, &document, "plan")?;

    if let Some(path) = args.srt.as_ref() {
        let srt = narration_timeline::srt::render(&plan.segments);
        json_report_formatter::write_text(path, &srt, "subtitle")?;
    }

    if let Some(path) = args.report.as_ref() {
        let report = compute_report(&plan, generated_at.clone()).map_err(|err| err.to_string())?;
        for note in &report.notes {
            tracing::warn!(session_id = %plan.session_id, note = %note, "report note");
        }
        json_report_formatter::write_json(path, &report, "report")?;
    }

    if args.artifact_dir.is_some() {
        let characters = input.character_timings.as_deref().unwrap_or(&[]);
        session
            .write_srt(&plan.segments)
            .map_err(|err| err.to_string())?;
        let dump = session
            .write_timing_dump(&input.transcript, &plan.words, characters)
            .map_err(|err| err.to_string())?;
        tracing::info!(path = %dump.display(), "timing dump written");
    }

    tracing::info!(
        session_id = %plan.session_id,
        out = %args.out.display(),
        duration_secs = plan.duration_secs(),
        frame_count = document.frame_count,
        "timeline plan written"
    );
    Ok(())
}

fn load_input(args: &Args) -> Result<NarrationInput, String> {
    if let Some(path) = args.script.as_ref() {
        let script: AdScript = read_json(path, "script")?;
        return Ok(NarrationInput::from_script(&script, args.assets.clone()));
    }
    match args.input.as_ref() {
        Some(path) => read_json(path, "narration input"),
        None => Err("either --input or --script is required.".to_string()),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {what} '{}': {err}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|err| format!("Failed to parse {what} '{}': {err}", path.display()))
}
