use serde::Serialize;

use crate::unicode::normalize;

use super::rules::{rules, Stage};
use super::segment::{segment_and_capitalize, split_syllables};

/// Full diagnostic trace of one conversion.
#[derive(Debug, Serialize)]
pub struct ExplainResult {
    pub input: String,
    pub normalized: String,
    pub steps: Vec<ExplainStep>,
    /// Syllable chunks before joining (empty when no tone vowel survived).
    pub segments: Vec<String>,
    pub output: String,
}

impl ExplainResult {
    /// Steps that actually rewrote the text.
    pub fn changed_steps(&self) -> impl Iterator<Item = &ExplainStep> {
        self.steps.iter().filter(|s| s.changed)
    }
}

/// The text after a single rule.
#[derive(Debug, Serialize)]
pub struct ExplainStep {
    pub stage: Stage,
    pub rule: &'static str,
    pub pattern: String,
    pub output: String,
    pub changed: bool,
}

/// Run the conversion pipeline, recording the output of every rule.
pub fn explain(text: &str) -> ExplainResult {
    let normalized = normalize(text).into_owned();

    let mut current = normalized.clone();
    let mut steps = Vec::with_capacity(rules().len());
    for rule in rules() {
        // A match can rewrite to identical text (`ah` under the open-a rule).
        let output = rule.apply(&current).into_owned();
        let changed = output != current;
        steps.push(ExplainStep {
            stage: rule.stage(),
            rule: rule.name(),
            pattern: rule.pattern().to_string(),
            output: output.clone(),
            changed,
        });
        current = output;
    }

    let segments = split_syllables(&current);
    let output = segment_and_capitalize(&current);

    ExplainResult {
        input: text.to_string(),
        normalized,
        steps,
        segments,
        output,
    }
}

/// Human-readable rendering; rules that left the text alone are omitted.
pub fn format_text(result: &ExplainResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Explain \"{}\" ===\n", result.input));
    if result.normalized != result.input {
        out.push_str(&format!("  normalized: {}\n", result.normalized));
    }

    let name_width = result
        .changed_steps()
        .map(|s| s.stage.label().len() + s.rule.len() + 3)
        .max()
        .unwrap_or(0);
    for step in result.changed_steps() {
        let name = format!("[{}] {}", step.stage.label(), step.rule);
        out.push_str(&format!("  {:<name_width$} -> {}\n", name, step.output));
    }
    let unchanged = result.steps.len() - result.changed_steps().count();
    out.push_str(&format!("  ({} rules left the text unchanged)\n", unchanged));

    if result.segments.is_empty() {
        out.push_str("  segments: (no tone vowel)\n");
    } else {
        out.push_str(&format!("  segments: {}\n", result.segments.join(" | ")));
    }
    out.push_str(&format!("  output: {}\n", result.output));
    out
}
