//! Surface statistics over a submitted response.
//!
//! Everything here is a pure function of the input text. The task type does
//! not influence the statistics; it only matters once they are scored.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FeedbackError;
use crate::model::AnalysisStats;

// ---------------------------------------------------------------------------
// Pattern tables
// ---------------------------------------------------------------------------

/// Informal phrasing and overused fillers counted against grammar.
const GRAMMAR_ISSUES: &[&str] = &[
    "i am",
    "you are",
    "they are",
    "is not",
    "are not",
    "very",
    "really",
    "a lot",
    "in conclusion",
    "to sum up",
];

/// Connectives used as a coherence proxy.
const TRANSITIONS: &[&str] = &[
    "firstly",
    "secondly",
    "thirdly",
    "furthermore",
    "moreover",
    "in addition",
    "however",
    "nevertheless",
    "on the other hand",
    "consequently",
    "therefore",
    "as a result",
    "in conclusion",
    "to summarize",
    "in summary",
];

/// Less common vocabulary that earns a lexical bonus.
const ADVANCED_VOCABULARY: &[&str] = &[
    "consequently",
    "nevertheless",
    "furthermore",
    "significant",
    "substantial",
    "considerable",
    "beneficial",
    "detrimental",
    "crucial",
    "imperative",
    "fundamental",
    "phenomenon",
];

struct AnalyzerPatterns {
    sentence_break: Regex,
    word: Regex,
    paragraph_break: Regex,
    grammar_issues: Vec<Regex>,
    transitions: Vec<Regex>,
    advanced_vocabulary: Vec<Regex>,
}

impl AnalyzerPatterns {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            sentence_break: Regex::new(r"[.!?]+")?,
            word: Regex::new(r"[a-z]+")?,
            paragraph_break: Regex::new(r"\n\s*\n")?,
            grammar_issues: word_patterns(GRAMMAR_ISSUES)?,
            transitions: word_patterns(TRANSITIONS)?,
            advanced_vocabulary: word_patterns(ADVANCED_VOCABULARY)?,
        })
    }
}

static PATTERNS: Lazy<Result<AnalyzerPatterns, regex::Error>> = Lazy::new(AnalyzerPatterns::compile);

fn patterns() -> Result<&'static AnalyzerPatterns, FeedbackError> {
    PATTERNS.as_ref().map_err(|e| FeedbackError::Pattern {
        name: "analyzer",
        source: e.clone(),
    })
}

/// Compile each phrase into a case-insensitive, word-bounded pattern.
fn word_patterns(phrases: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    phrases
        .iter()
        .map(|p| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(p))))
        .collect()
}

fn count_hits(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|p| p.find_iter(text).count()).sum()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Compute the statistics bundle used by the score calculator.
pub fn analyze(text: &str) -> Result<AnalysisStats, FeedbackError> {
    let patterns = patterns()?;

    let word_count = word_count(text);

    // Never zero, so the average below is always defined.
    let sentence_count = patterns
        .sentence_break
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);

    let lowered = text.to_lowercase();
    let unique_word_count = patterns
        .word
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect::<HashSet<_>>()
        .len();

    let lexical_diversity = if word_count == 0 {
        0.0
    } else {
        unique_word_count as f64 / word_count as f64
    };

    let paragraph_count = patterns
        .paragraph_break
        .split(text)
        .filter(|p| !p.trim().is_empty())
        .count();

    let stats = AnalysisStats {
        word_count,
        sentence_count,
        avg_words_per_sentence: word_count as f64 / sentence_count as f64,
        unique_word_count,
        lexical_diversity,
        paragraph_count,
        transition_hit_count: count_hits(&patterns.transitions, text),
        advanced_vocab_hit_count: count_hits(&patterns.advanced_vocabulary, text),
        grammar_issue_hit_count: count_hits(&patterns.grammar_issues, text),
    };

    tracing::debug!(
        words = stats.word_count,
        sentences = stats.sentence_count,
        paragraphs = stats.paragraph_count,
        unique = stats.unique_word_count,
        "analyzed response"
    );

    Ok(stats)
}
