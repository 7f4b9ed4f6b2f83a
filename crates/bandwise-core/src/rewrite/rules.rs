//! A small ordered rule engine for literal text rewrites.
//!
//! A rule is a pattern plus a replacement strategy. Rule lists are written
//! as static [`RuleSpec`] data, compiled once, and applied in order.

use std::borrow::Cow;

use regex::{Captures, Regex};

/// How the text matched by a rule is replaced.
#[derive(Clone, Copy)]
pub enum Replacement {
    /// Regex template with `${n}` group expansion.
    Template(&'static str),
    /// Fixed text; the first letter is capitalised when the match was.
    MatchCase(&'static str),
    /// Computed from the captures.
    Computed(fn(&Captures<'_>) -> String),
}

impl std::fmt::Debug for Replacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Replacement::Template(t) => f.debug_tuple("Template").field(t).finish(),
            Replacement::MatchCase(t) => f.debug_tuple("MatchCase").field(t).finish(),
            Replacement::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Uncompiled description of a rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub pattern: &'static str,
    pub replacement: Replacement,
}

impl RuleSpec {
    pub const fn template(pattern: &'static str, template: &'static str) -> Self {
        Self {
            pattern,
            replacement: Replacement::Template(template),
        }
    }

    pub const fn match_case(pattern: &'static str, word: &'static str) -> Self {
        Self {
            pattern,
            replacement: Replacement::MatchCase(word),
        }
    }

    pub const fn computed(pattern: &'static str, f: fn(&Captures<'_>) -> String) -> Self {
        Self {
            pattern,
            replacement: Replacement::Computed(f),
        }
    }
}

/// A compiled rewrite rule.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: Replacement,
}

impl RewriteRule {
    pub fn compile(spec: &RuleSpec) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(spec.pattern)?,
            replacement: spec.replacement,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Replace every match in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.replacement {
            Replacement::Template(template) => self.pattern.replace_all(text, template),
            Replacement::MatchCase(word) => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| match_case(&caps[0], word)),
            Replacement::Computed(f) => self.pattern.replace_all(text, f),
        }
    }
}

/// Compile a list of specs, preserving order.
pub fn compile_rules(specs: &[RuleSpec]) -> Result<Vec<RewriteRule>, regex::Error> {
    specs.iter().map(RewriteRule::compile).collect()
}

/// Outcome of running a rule list over some text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub text: String,
    /// Number of rules that matched and were applied.
    pub applied: usize,
}

/// Apply `rules` in order. A rule only counts when it matches; once `limit`
/// rules have been applied the rest are skipped.
pub fn apply_rules(text: &str, rules: &[RewriteRule], limit: Option<usize>) -> RuleOutcome {
    let mut current = text.to_string();
    let mut applied = 0;

    for rule in rules {
        if limit.is_some_and(|max| applied >= max) {
            break;
        }
        if !rule.is_match(&current) {
            continue;
        }
        current = rule.apply(&current).into_owned();
        applied += 1;
    }

    RuleOutcome {
        text: current,
        applied,
    }
}

fn match_case(matched: &str, word: &str) -> String {
    if matched.chars().next().is_some_and(char::is_uppercase) {
        capitalize(word)
    } else {
        word.to_string()
    }
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the pronoun "I" and acronyms
/// such as "UK" untouched.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let second = chars.clone().next();
    let keep = match second {
        _ if first == 'I' && !second.is_some_and(char::is_alphabetic) => true,
        Some(c) => c.is_uppercase(),
        None => false,
    };
    if keep {
        s.to_string()
    } else {
        first.to_lowercase().chain(chars).collect()
    }
}
