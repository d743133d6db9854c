//! Prompt construction for the two kinds of input.
//!
//! Both builders are total: any string, including an empty one, yields a
//! complete instruction. Input validation happens before this point.

use crate::process::ports::{DetailLevel, ResolvedKind};

pub fn build_prompt(kind: ResolvedKind, input: &str, detail: DetailLevel) -> String {
    match kind {
        ResolvedKind::Text => build_text_summary_prompt(input, detail),
        ResolvedKind::Code => build_code_explain_prompt(input, detail),
    }
}

pub fn build_text_summary_prompt(input: &str, detail: DetailLevel) -> String {
    let guidance = match detail {
        DetailLevel::Short => "Provide a 3-5 bullet ultra-concise summary.",
        DetailLevel::Medium => "Provide a concise summary in 5-8 bullets with a short paragraph.",
        DetailLevel::Detailed => {
            "Provide a detailed summary: key points, assumptions, caveats, and actionable insights."
        }
    };

    [
        "You are an expert technical writer.",
        "Summarize the following text clearly for a busy developer.",
        guidance,
        "Use markdown bullets and short sentences. Avoid fluff.",
        "Text:",
        input,
    ]
    .join("\n\n")
}

/// The code is re-fenced after trimming so the model always sees one block.
pub fn build_code_explain_prompt(code: &str, detail: DetailLevel) -> String {
    let guidance = match detail {
        DetailLevel::Short => "Explain in 3-5 bullets what the code does.",
        DetailLevel::Medium => {
            "Explain step-by-step, outline inputs/outputs, and complexity if relevant."
        }
        DetailLevel::Detailed => {
            "Explain deeply: architecture, data flow, edge cases, potential bugs, and improvements."
        }
    };

    [
        "You are a senior software engineer.",
        "Explain this code to a mid-level developer in plain language.",
        guidance,
        "Format the output in markdown with sections (Overview, Steps, Notes).",
        "Code:",
        "```",
        code.trim(),
        "```",
    ]
    .join("\n")
}
