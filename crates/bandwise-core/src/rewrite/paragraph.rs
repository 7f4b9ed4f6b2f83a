//! Per-paragraph rewrites for introductions, body paragraphs and conclusions.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, NoExpand, Regex};

use super::rules::{apply_rules, compile_rules, lowercase_first, RewriteRule, RuleSpec};
use crate::error::FeedbackError;
use crate::model::TaskType;

/// Most vocabulary upgrades applied to a single body paragraph.
pub const BODY_VOCABULARY_LIMIT: usize = 4;

/// Sentences shorter than this (in words) may be merged with a neighbour.
const SHORT_SENTENCE_WORDS: usize = 10;

const TASK1_OPENERS: &[RuleSpec] = &[
    RuleSpec::template(
        r"(?i)^The (chart|graph|table|diagram) shows",
        "The ${1} illustrates",
    ),
    RuleSpec::template(
        r"(?i)^The (chart|graph|table|diagram) gives information about",
        "The ${1} provides a detailed breakdown of",
    ),
    RuleSpec::template(
        r"(?i)^The (chart|graph|table|diagram) is about",
        "The ${1} presents data regarding",
    ),
    RuleSpec::template(r"(?i)^This (chart|graph|table|diagram)", "The provided ${1}"),
    RuleSpec::template(
        r"(?i)^(?:In|On) this (chart|graph|table|diagram)",
        "The presented ${1}",
    ),
];

const TASK2_OPENERS: &[RuleSpec] = &[
    RuleSpec::template(
        r"(?i)^I (?:think|believe|feel) that",
        "It is widely acknowledged that",
    ),
    RuleSpec::template(r"(?i)^In my opinion,?", "From my perspective,"),
    RuleSpec::template(r"(?i)^Nowadays,?", "In contemporary society,"),
    RuleSpec::template(r"(?i)^These days,?", "In the modern era,"),
];

const TASK1_CLOSING_CLAUSE: RuleSpec =
    RuleSpec::template(r"\.$", ", illustrating the key trends and patterns.");

const TASK2_CONTEXT_SENTENCE: &str =
    " This issue warrants careful consideration of multiple perspectives.";

/// Informal phrasing replaced in introductions.
const FORMAL_VOCABULARY: &[RuleSpec] = &[
    RuleSpec::match_case(r"(?i)\bvery important\b", "crucial"),
    RuleSpec::match_case(r"(?i)\bbig problem\b", "significant challenge"),
    RuleSpec::match_case(r"(?i)\ba lot of\b", "a substantial number of"),
    RuleSpec::match_case(r"(?i)\bmany people\b", "a considerable proportion of individuals"),
    RuleSpec::match_case(r"(?i)\bgood thing\b", "beneficial aspect"),
    RuleSpec::match_case(r"(?i)\bbad thing\b", "detrimental factor"),
];

/// Literal, case-sensitive grammar fixes.
const GRAMMAR_FIXES: &[RuleSpec] = &[
    RuleSpec::template(r"\bthey is\b", "they are"),
    RuleSpec::template(r"\bthere is many\b", "there are many"),
    RuleSpec::template(r"\bhave went\b", "have gone"),
    RuleSpec::template(r"\bdidn't\b", "did not"),
    RuleSpec::template(r"\bdon't\b", "do not"),
    RuleSpec::template(r"\bcan't\b", "cannot"),
    RuleSpec::template(r"\bwon't\b", "will not"),
];

/// Single-word upgrades for body paragraphs, in priority order.
const BODY_VOCABULARY: &[RuleSpec] = &[
    RuleSpec::match_case(r"(?i)\bgood\b", "beneficial"),
    RuleSpec::match_case(r"(?i)\bbad\b", "detrimental"),
    RuleSpec::match_case(r"(?i)\bbig\b", "substantial"),
    RuleSpec::match_case(r"(?i)\blot\b", "significant amount"),
    RuleSpec::match_case(r"(?i)\bsmall\b", "minimal"),
    RuleSpec::match_case(r"(?i)\bproblem\b", "challenge"),
    RuleSpec::match_case(r"(?i)\bhelp\b", "facilitate"),
    RuleSpec::match_case(r"(?i)\bhard\b", "challenging"),
    RuleSpec::match_case(r"(?i)\beasy\b", "straightforward"),
    RuleSpec::match_case(r"(?i)\bimportant\b", "crucial"),
    RuleSpec::match_case(r"(?i)\bshow\b", "demonstrate"),
    RuleSpec::match_case(r"(?i)\btell\b", "indicate"),
    RuleSpec::match_case(r"(?i)\buse\b", "utilize"),
    RuleSpec::match_case(r"(?i)\bmake\b", "produce"),
    RuleSpec::match_case(r"(?i)\bget\b", "obtain"),
    RuleSpec::match_case(r"(?i)\bstart\b", "commence"),
    RuleSpec::match_case(r"(?i)\bend\b", "conclude"),
    RuleSpec::match_case(r"(?i)\bpeople\b", "individuals"),
    RuleSpec::match_case(r"(?i)\bthink\b", "consider"),
    RuleSpec::match_case(r"(?i)\bsee\b", "observe"),
];

const SENTENCE_PAIR: RuleSpec = RuleSpec::computed(
    r"([^.!?]+[.!?]+)(\s+)([^.!?]+[.!?]+)",
    merge_short_pair,
);

const BODY_TRANSITIONS: &[&str] = &[
    "Furthermore, ",
    "Moreover, ",
    "In addition, ",
    "Additionally, ",
    "What is more, ",
    "Another significant point is that ",
];

const CONCLUSION_STARTERS: &[&str] = &[
    "In conclusion, ",
    "To conclude, ",
    "In light of the above discussion, ",
    "Having considered the various aspects, ",
    "Based on the evidence presented, ",
    "Taking all factors into account, ",
];

const TASK1_SUMMARY_SENTENCE: &str =
    " Overall, the data reveals significant patterns that highlight important trends in the subject matter.";

const TASK2_BALANCE_SENTENCE: &str = " While there are valid arguments on both sides, a balanced \
     approach that considers multiple perspectives would be most effective in addressing this issue.";

pub(crate) struct RuleTables {
    task1_openers: Vec<RewriteRule>,
    task1_closing: RewriteRule,
    task1_academic_verb: Regex,
    task2_openers: Vec<RewriteRule>,
    task2_debate_word: Regex,
    formal: Vec<RewriteRule>,
    grammar_fixes: Vec<RewriteRule>,
    body_transition: Regex,
    awkward_start: Regex,
    body_vocabulary: Vec<RewriteRule>,
    sentence_pair: RewriteRule,
    conclusion_lead: Regex,
    conclusion_opener: Regex,
    task1_summary_word: Regex,
    task2_balance_word: Regex,
}

impl RuleTables {
    fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            task1_openers: compile_rules(TASK1_OPENERS)?,
            task1_closing: RewriteRule::compile(&TASK1_CLOSING_CLAUSE)?,
            task1_academic_verb: Regex::new(
                r"(?i)compare|contrast|illustrate|demonstrate|depict|present|show|portray",
            )?,
            task2_openers: compile_rules(TASK2_OPENERS)?,
            task2_debate_word: Regex::new(
                r"(?i)debate|discuss|controversy|perspective|viewpoint|opinion|argument",
            )?,
            formal: compile_rules(FORMAL_VOCABULARY)?,
            grammar_fixes: compile_rules(GRAMMAR_FIXES)?,
            body_transition: Regex::new(
                r"(?i)^(?:Furthermore|Moreover|In addition|Additionally|Secondly|Another|Next|Subsequently|Following this)",
            )?,
            awkward_start: Regex::new(r"(?i)^(?:The|This|These|Those|It|They)\b")?,
            body_vocabulary: compile_rules(BODY_VOCABULARY)?,
            sentence_pair: RewriteRule::compile(&SENTENCE_PAIR)?,
            conclusion_lead: Regex::new(
                r"(?i)^(?:In conclusion|To conclude|To sum up|In summary|Finally|Lastly)\b",
            )?,
            conclusion_opener: Regex::new(
                r"(?i)^(?:In conclusion|To conclude|To sum up|In summary|Finally|Lastly)\b,?\s+",
            )?,
            task1_summary_word: Regex::new(
                r"(?i)overall|summary|summarize|trend|pattern|significant|noteworthy",
            )?,
            task2_balance_word: Regex::new(
                r"(?i)balance|weigh|consider|although|however|nevertheless|despite|future|recommend",
            )?,
        })
    }
}

static TABLES: Lazy<Result<RuleTables, regex::Error>> = Lazy::new(RuleTables::compile);

pub(crate) fn tables() -> Result<&'static RuleTables, FeedbackError> {
    TABLES.as_ref().map_err(|e| FeedbackError::Pattern {
        name: "rewrite",
        source: e.clone(),
    })
}

/// Rewrite the opening paragraph.
pub(crate) fn introduction(text: &str, task: TaskType, tables: &RuleTables) -> String {
    let opened = match task {
        TaskType::Task1 => {
            let out = apply_rules(text, &tables.task1_openers, None).text;
            if tables.task1_academic_verb.is_match(&out) {
                out
            } else {
                tables.task1_closing.apply(&out).into_owned()
            }
        }
        TaskType::Task2 => {
            let mut out = apply_rules(text, &tables.task2_openers, None).text;
            if !tables.task2_debate_word.is_match(&out) {
                out.push_str(TASK2_CONTEXT_SENTENCE);
            }
            out
        }
    };

    let formal = apply_rules(&opened, &tables.formal, None).text;
    apply_rules(&formal, &tables.grammar_fixes, None).text
}

/// Rewrite a middle paragraph.
pub(crate) fn body<R: Rng + ?Sized>(text: &str, tables: &RuleTables, rng: &mut R) -> String {
    let mut improved = text.to_string();

    if !tables.body_transition.is_match(text) && !tables.awkward_start.is_match(text) {
        let transition = BODY_TRANSITIONS.choose(rng).copied().unwrap_or("Furthermore, ");
        improved = format!("{transition}{}", lowercase_first(text));
    }

    let upgraded = apply_rules(
        &improved,
        &tables.body_vocabulary,
        Some(BODY_VOCABULARY_LIMIT),
    );
    tracing::debug!(applied = upgraded.applied, "body vocabulary upgrades");

    tables.sentence_pair.apply(&upgraded.text).into_owned()
}

/// Rewrite the closing paragraph.
pub(crate) fn conclusion<R: Rng + ?Sized>(
    text: &str,
    task: TaskType,
    tables: &RuleTables,
    rng: &mut R,
) -> String {
    // A bare opener with nothing after it is kept as written.
    let mut improved = if tables.conclusion_lead.is_match(text) {
        let starter = CONCLUSION_STARTERS.choose(rng).copied().unwrap_or("In conclusion, ");
        tables
            .conclusion_opener
            .replace(text, NoExpand(starter))
            .into_owned()
    } else {
        format!("In conclusion, {}", lowercase_first(text))
    };

    match task {
        TaskType::Task1 if !tables.task1_summary_word.is_match(&improved) => {
            improved.push_str(TASK1_SUMMARY_SENTENCE);
        }
        TaskType::Task2 if !tables.task2_balance_word.is_match(&improved) => {
            improved.push_str(TASK2_BALANCE_SENTENCE);
        }
        _ => {}
    }

    improved
}

/// Join two adjacent short sentences as "X, which y".
fn merge_short_pair(caps: &Captures<'_>) -> String {
    let first = &caps[1];
    let second = caps[3].trim();
    let lead = &first[..first.len() - first.trim_start().len()];
    let first = first.trim();

    let short = |s: &str| s.split_whitespace().count() < SHORT_SENTENCE_WORDS;
    if !short(first) || !short(second) {
        return caps[0].to_string();
    }

    let stem = first.trim_end_matches(['.', '!', '?']);
    format!("{lead}{stem}, which {}", lowercase_first(second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn all_tables_compile() {
        assert!(tables().is_ok());
    }

    #[test]
    fn task1_opener_is_upgraded() {
        let t = tables().unwrap();
        let out = introduction("The chart shows sales in 2020.", TaskType::Task1, t);
        assert_eq!(out, "The chart illustrates sales in 2020.");

        let out = introduction("In this graph we see sales.", TaskType::Task1, t);
        assert!(out.starts_with("The presented graph we see sales"));
    }

    #[test]
    fn task1_without_academic_verb_gets_closing_clause() {
        let t = tables().unwrap();
        let out = introduction("Sales rose in 2020.", TaskType::Task1, t);
        assert_eq!(
            out,
            "Sales rose in 2020, illustrating the key trends and patterns."
        );
    }

    #[test]
    fn task2_opener_and_context_sentence() {
        let t = tables().unwrap();
        let out = introduction("I think that cars don't help.", TaskType::Task2, t);
        assert_eq!(
            out,
            "It is widely acknowledged that cars do not help. \
             This issue warrants careful consideration of multiple perspectives."
        );

        let out = introduction("In my opinion, this debate matters.", TaskType::Task2, t);
        assert_eq!(out, "From my perspective, this debate matters.");
    }

    #[test]
    fn formal_vocabulary_in_introduction() {
        let t = tables().unwrap();
        let out = introduction(
            "Many people say this is a big problem and very important to discuss.",
            TaskType::Task2,
            t,
        );
        assert!(out.starts_with("A considerable proportion of individuals say"));
        assert!(out.contains("a significant challenge"));
        assert!(out.contains("crucial to discuss"));
    }

    #[test]
    fn body_gets_transition_and_vocabulary() {
        let t = tables().unwrap();
        let out = body("People think it is good.", t, &mut rng());
        assert!(BODY_TRANSITIONS.iter().any(|tr| out.starts_with(tr)));
        assert!(out.ends_with("individuals consider it is beneficial."));
    }

    #[test]
    fn body_keeps_existing_transition() {
        let t = tables().unwrap();
        let out = body("Moreover, costs are rising sharply across many regions of the country.", t, &mut rng());
        assert!(out.starts_with("Moreover, costs"));
    }

    #[test]
    fn body_vocabulary_is_capped() {
        let t = tables().unwrap();
        let out = body(
            "The good, bad, big and small problem was hard.",
            t,
            &mut rng(),
        );
        assert_eq!(
            out,
            "The beneficial, detrimental, substantial and minimal problem was hard."
        );
    }

    #[test]
    fn short_sentences_are_merged() {
        let t = tables().unwrap();
        let out = body("It rained. We stayed in.", t, &mut rng());
        assert_eq!(out, "It rained, which we stayed in.");
    }

    #[test]
    fn long_sentences_are_not_merged() {
        let t = tables().unwrap();
        let text = "They argued that the policy had failed in almost every region it touched. \
                    It was later replaced.";
        assert_eq!(body(text, t, &mut rng()), text);
    }

    #[test]
    fn conclusion_replaces_stock_opener() {
        let t = tables().unwrap();
        let out = conclusion(
            "To sum up, the future looks bright.",
            TaskType::Task2,
            t,
            &mut rng(),
        );
        assert!(CONCLUSION_STARTERS
            .iter()
            .any(|s| out == format!("{s}the future looks bright.")));
    }

    #[test]
    fn conclusion_prepends_opener_and_closing_sentence() {
        let t = tables().unwrap();
        let out = conclusion("Cars are here to stay.", TaskType::Task2, t, &mut rng());
        assert!(out.starts_with("In conclusion, cars are here to stay."));
        assert!(out.ends_with("addressing this issue."));

        let out = conclusion("Sales grew.", TaskType::Task1, t, &mut rng());
        assert_eq!(
            out,
            format!("In conclusion, sales grew.{TASK1_SUMMARY_SENTENCE}")
        );
    }

    #[test]
    fn bare_conclusion_opener_is_kept() {
        let t = tables().unwrap();
        let out = conclusion("Lastly.", TaskType::Task1, t, &mut rng());
        assert_eq!(out, format!("Lastly.{TASK1_SUMMARY_SENTENCE}"));

        let out = conclusion("Finally", TaskType::Task2, t, &mut rng());
        assert!(out.starts_with("Finally While there are valid arguments"));
    }

    #[test]
    fn merge_preserves_leading_whitespace() {
        let t = tables().unwrap();
        let out = t.sentence_pair.apply("A b. C d. E f. G h.").into_owned();
        assert_eq!(out, "A b, which c d. E f, which g h.");
    }
}
