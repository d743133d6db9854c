//! Heuristic input classifier
//!
//! Decides whether free-form input is source code or prose. Each heuristic is
//! a named predicate; the input is code as soon as any predicate matches.
//! This is pattern matching, not parsing: prose with parentheses or a
//! `Label: value` line will be reported as code, and that is accepted.

use crate::process::ports::ResolvedKind;
use regex::Regex;
use std::sync::OnceLock;

pub type Predicate = fn(&str) -> bool;

/// Ordered heuristics. Order only affects which name gets reported.
pub const CODE_HEURISTICS: &[(&str, Predicate)] = &[
    ("code_keyword", has_code_keyword),
    ("structural_punctuation", has_structural_punctuation),
    ("operator_token", has_operator_token),
    ("fenced_block", has_fenced_block),
    ("preprocessor_directive", has_preprocessor_directive),
    ("markup_tag", has_markup_tag),
];

const FENCE: &str = "```";

/// Outcome of classification plus the heuristic that decided it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: ResolvedKind,
    /// Name of the first matching heuristic, `None` for text
    pub matched: Option<&'static str>,
}

pub fn classify(input: &str) -> ResolvedKind {
    classify_with_reason(input).kind
}

pub fn classify_with_reason(input: &str) -> Classification {
    let trimmed = input.trim();

    if trimmed.starts_with(FENCE) && trimmed.ends_with(FENCE) {
        return Classification {
            kind: ResolvedKind::Code,
            matched: Some("fence_wrapped"),
        };
    }

    match CODE_HEURISTICS
        .iter()
        .find(|(_, predicate)| predicate(trimmed))
    {
        Some((name, _)) => Classification {
            kind: ResolvedKind::Code,
            matched: Some(*name),
        },
        None => Classification {
            kind: ResolvedKind::Text,
            matched: None,
        },
    }
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("Failed to compile classifier regex"))
}

/// Common keywords of mainstream languages, any case.
///
/// "Whole word" uses ASCII word characters only, so a keyword glued to a
/// non-Latin letter still counts.
pub fn has_code_keyword(input: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    regex(
        &PATTERN,
        r"(?:^|[^A-Za-z0-9_])(?i:function|const|let|var|class|import|export|def|async|await|public|private|static)(?:[^A-Za-z0-9_]|$)",
    )
    .is_match(input)
}

pub fn has_structural_punctuation(input: &str) -> bool {
    input.contains(&['{', '}', '(', ')', ';', '<', '>'][..])
}

/// `=>`, `::`, or a colon followed by a word (`name: Type`)
pub fn has_operator_token(input: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    regex(&PATTERN, r"=>|::|:\s*[A-Za-z0-9_]+").is_match(input)
}

/// A fenced block anywhere in the input, optionally tagged with a language
pub fn has_fenced_block(input: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    regex(&PATTERN, r"(?is)```[a-z]*.*```").is_match(input)
}

pub fn has_preprocessor_directive(input: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    regex(&PATTERN, r"(?m)^\s*#include\b|^\s*using\s+namespace\b").is_match(input)
}

/// A line opening with an HTML/XML start or end tag
pub fn has_markup_tag(input: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    regex(&PATTERN, r"(?m)^\s*</?[A-Za-z0-9_]+[^>]*>").is_match(input)
}
