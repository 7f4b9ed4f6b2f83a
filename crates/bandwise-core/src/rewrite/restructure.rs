//! Templated replacement for responses too short or too flat to rewrite.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FeedbackError;
use crate::model::TaskType;

/// Words per slot in the template.
const GROUP_SIZE: usize = 3;

/// Slots filled from content words; later words are never used.
const GROUP_COUNT: usize = 4;

/// Used when the response has no usable content words at all.
const FILLER: &str = "these factors";

static CONTENT_WORD: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]{4,}\b"));

/// Distinct words of four or more letters, lower-cased, in order of first
/// appearance.
pub fn content_words(text: &str) -> Result<Vec<String>, FeedbackError> {
    let pattern = CONTENT_WORD.as_ref().map_err(|e| FeedbackError::Pattern {
        name: "content-words",
        source: e.clone(),
    })?;

    let mut seen = HashSet::new();
    let mut words: Vec<String> = Vec::new();
    for m in pattern.find_iter(text) {
        let word = m.as_str().to_lowercase();
        if seen.insert(word.clone()) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Hands out comma-joined groups of content words. When the list runs short
/// it wraps around to the start.
struct WordGroups {
    words: Vec<String>,
}

impl WordGroups {
    fn group(&self, index: usize) -> String {
        if self.words.is_empty() {
            return FILLER.to_string();
        }
        let mut picked: Vec<&str> = Vec::with_capacity(GROUP_SIZE);
        for offset in 0..GROUP_SIZE {
            let word = self.words[(index * GROUP_SIZE + offset) % self.words.len()].as_str();
            if !picked.contains(&word) {
                picked.push(word);
            }
        }
        picked.join(", ")
    }
}

/// Build a fresh response around the submission's content words.
pub fn restructure(text: &str, task: TaskType) -> Result<String, FeedbackError> {
    let mut words = content_words(text)?;
    words.truncate(GROUP_COUNT * GROUP_SIZE);
    let groups = WordGroups { words };
    tracing::debug!(words = groups.words.len(), %task, "restructuring response");

    let (g0, g1, g2, g3) = (groups.group(0), groups.group(1), groups.group(2), groups.group(3));

    let paragraphs = match task {
        TaskType::Task1 => vec![
            format!(
                "The graph illustrates {g0} over a specific time period. The data reveals \
                 several significant trends and patterns."
            ),
            format!(
                "First and foremost, there is a notable trend in {g1}. This demonstrates \
                 important changes that occurred during the period shown."
            ),
            format!(
                "Furthermore, when comparing different categories, it is evident that {g2} \
                 exhibited the most significant variations. This highlights the dynamic nature \
                 of the subject being analyzed."
            ),
            format!(
                "In conclusion, the data presents a comprehensive overview of {g0}. The most \
                 noteworthy finding is the relationship between {g3}, which provides valuable \
                 insights into the overall patterns."
            ),
        ],
        TaskType::Task2 => vec![
            format!(
                "In contemporary society, the issue of {g0} has become increasingly significant. \
                 This essay will examine multiple perspectives on this matter."
            ),
            format!(
                "From one perspective, {g1} play a crucial role in shaping how we approach this \
                 issue. Proponents of this view argue that these factors contribute substantially \
                 to addressing the challenges at hand."
            ),
            format!(
                "Conversely, others maintain that {g2} should be the primary focus. This \
                 alternative approach emphasizes different priorities and methodologies for \
                 tackling the same problems."
            ),
            format!(
                "In my view, while both perspectives offer valuable insights, a balanced approach \
                 that incorporates elements from both sides would be most effective. This would \
                 involve careful consideration of {g3} to develop comprehensive solutions."
            ),
            format!(
                "In conclusion, the complex nature of {g0} necessitates a multifaceted approach. \
                 By integrating diverse perspectives and acknowledging various factors, we can \
                 develop more effective strategies for addressing this important issue."
            ),
        ],
    };

    Ok(paragraphs.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_words_are_deduplicated_in_order() {
        let words = content_words("Cars, cars and BIKES are fun. Trains too, cars!").unwrap();
        assert_eq!(words, vec!["cars", "bikes", "trains"]);
    }

    #[test]
    fn content_words_skip_short_and_non_ascii_tokens() {
        let words = content_words("a an the café data 2020").unwrap();
        assert_eq!(words, vec!["data"]);
    }

    #[test]
    fn task1_has_four_paragraphs() {
        let text = "population growth rates across three countries between years";
        let out = restructure(text, TaskType::Task1).unwrap();
        assert_eq!(out.split("\n\n").count(), 4);
        assert!(out.starts_with("The graph illustrates population, growth, rates over"));
    }

    #[test]
    fn task2_has_five_paragraphs() {
        let out = restructure("Should universities teach employment skills", TaskType::Task2).unwrap();
        assert_eq!(out.split("\n\n").count(), 5);
        assert!(out.starts_with("In contemporary society, the issue of should, universities, teach"));
    }

    #[test]
    fn short_word_lists_wrap_around() {
        let groups = WordGroups {
            words: vec!["alpha".into(), "beta".into(), "gamma".into(), "delta".into()],
        };
        assert_eq!(groups.group(0), "alpha, beta, gamma");
        assert_eq!(groups.group(1), "delta, alpha, beta");

        let single = WordGroups {
            words: vec!["data".into()],
        };
        assert_eq!(single.group(2), "data");
    }

    fn distinct_words(n: usize) -> String {
        (0..n)
            .map(|i| {
                let letters: String = (0..4)
                    .map(|k| (b'a' + (i / 26usize.pow(k) % 26) as u8) as char)
                    .collect();
                format!("word{letters}")
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn huge_single_paragraph_is_restructured() {
        let text = distinct_words(60_000);
        assert_eq!(content_words(&text).unwrap().len(), 60_000);

        let out = restructure(&text, TaskType::Task2).unwrap();
        assert_eq!(out.split("\n\n").count(), 5);
        assert!(out.contains("the issue of wordaaaa, wordbaaa, wordcaaa"));
        assert!(out.contains("consideration of wordjaaa, wordkaaa, wordlaaa"));
    }

    #[test]
    fn no_content_words_uses_filler() {
        let out = restructure("a b c", TaskType::Task1).unwrap();
        assert!(out.contains("illustrates these factors over"));
    }
}
