//! Narration text assembly.
//!
//! The order and separators here fix the character offsets the segment
//! planner uses for sentence detection; keep them in step with it.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::presets::{VoiceSettings, VoiceTone};
use crate::types::NarrationInput;

/// Advertisement copy as produced by the script-writing collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdScript {
    pub hook: String,
    pub problem: String,
    pub solution: String,
    pub benefits: Vec<String>,
    pub call_to_action: String,
    pub duration_seconds: Option<f64>,
    pub tone: String,
}

/// What is sent to the speech provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrationRequest {
    pub text: String,
    pub tone: VoiceTone,
    pub voice: VoiceSettings,
}

const SYMBOL_REPLACEMENTS: [(char, &str); 23] = [
    ('&', " and "),
    ('%', " percent"),
    ('@', " at "),
    ('#', " number "),
    ('$', " dollar "),
    ('+', " plus "),
    ('=', " equals "),
    ('<', " less than "),
    ('>', " greater than "),
    ('[', ""),
    (']', ""),
    ('{', ""),
    ('}', ""),
    ('|', ""),
    ('\\', ""),
    ('/', " or "),
    ('_', " "),
    ('-', " "),
    ('*', ""),
    ('^', ""),
    ('~', ""),
    ('`', ""),
    ('\u{00A0}', " "),
];

fn repeated_punctuation() -> &'static [(Regex, &'static str); 3] {
    static PATTERNS: OnceLock<[(Regex, &'static str); 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (Regex::new(r"!{2,}").expect("valid pattern"), "!"),
            (Regex::new(r"\?{2,}").expect("valid pattern"), "?"),
            (Regex::new(r"\.{2,}").expect("valid pattern"), "."),
        ]
    })
}

fn whitespace_run() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid pattern"))
}

/// Joins the four narrative parts with ". " in fixed order:
/// hook, "{problem} {solution}", up to two benefits joined by " and ",
/// call to action. Empty parts are skipped.
pub fn assemble_script(script: &AdScript) -> String {
    let benefits = script
        .benefits
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .take(2)
        .collect::<Vec<_>>()
        .join(" and ");
    let parts = [
        script.hook.trim().to_string(),
        format!("{} {}", script.problem.trim(), script.solution.trim()),
        benefits,
        script.call_to_action.trim().to_string(),
    ];
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(". ")
}

/// Normalizes text for speech synthesis: collapses repeated terminators,
/// spells out symbols and collapses whitespace.
pub fn clean_for_speech(text: &str) -> String {
    let mut cleaned = text.to_string();
    for (pattern, replacement) in repeated_punctuation() {
        cleaned = pattern.replace_all(&cleaned, *replacement).into_owned();
    }

    let mut spelled = String::with_capacity(cleaned.len());
    for c in cleaned.chars() {
        match SYMBOL_REPLACEMENTS.iter().find(|(symbol, _)| *symbol == c) {
            Some((_, replacement)) => spelled.push_str(replacement),
            None => spelled.push(c),
        }
    }

    whitespace_run().replace_all(&spelled, " ").trim().to_string()
}

/// Exact transcript to narrate for `script`.
pub fn narration_text(script: &AdScript) -> String {
    clean_for_speech(&assemble_script(script))
}

pub fn narration_request(script: &AdScript) -> NarrationRequest {
    let tone = VoiceTone::from_name(&script.tone);
    NarrationRequest {
        text: narration_text(script),
        tone,
        voice: tone.settings(),
    }
}

impl NarrationInput {
    /// Input for a script whose narration has no provider timing yet.
    pub fn from_script(script: &AdScript, assets: Vec<String>) -> Self {
        Self {
            transcript: narration_text(script),
            character_timings: None,
            measured_duration: None,
            authored_duration: script.duration_seconds,
            assets,
        }
    }
}
