//! Score-band lookup tables.
//!
//! Each criterion owns five bands that together cover `[0, 9]`. A band is
//! an inclusive score range plus the comments that may be shown for it.

use crate::model::Criterion;
use crate::scoring::round_to_tenth;

/// An inclusive score range and its candidate comments.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackBand {
    pub lower: f64,
    pub upper: f64,
    pub candidates: &'static [&'static str],
}

impl FeedbackBand {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.lower && score <= self.upper
    }
}

/// First band, in table order, whose range contains `score`.
///
/// Scores are rounded to one decimal first so values such as `6.9999999`
/// do not slip through the gaps between bands.
pub fn find_band(bands: &[FeedbackBand], score: f64) -> Option<&FeedbackBand> {
    let score = round_to_tenth(score);
    bands.iter().find(|b| b.contains(score))
}

/// Like [`find_band`], but falls back to the lowest band when nothing
/// matches. Clamped scores always match, so the fallback is logged.
pub fn band_or_lowest(bands: &[FeedbackBand], score: f64) -> Option<&FeedbackBand> {
    match find_band(bands, score) {
        Some(band) => Some(band),
        None => {
            tracing::warn!(score, "no feedback band contains score, using lowest band");
            bands.last()
        }
    }
}

/// The band table for a criterion, ordered high to low.
pub fn table(criterion: Criterion) -> &'static [FeedbackBand] {
    match criterion {
        Criterion::TaskAchievement => &TASK_BANDS,
        Criterion::CoherenceAndCohesion => &COHERENCE_BANDS,
        Criterion::LexicalResource => &LEXICAL_BANDS,
        Criterion::GrammaticalRangeAndAccuracy => &GRAMMAR_BANDS,
    }
}

const fn band(lower: f64, upper: f64, candidates: &'static [&'static str]) -> FeedbackBand {
    FeedbackBand {
        lower,
        upper,
        candidates,
    }
}

pub static GRAMMAR_BANDS: [FeedbackBand; 5] = [
    band(8.0, 9.0, &[
        "You use a wide range of structures with full flexibility and accuracy. Rare minor errors occur only as 'slips'.",
        "Your writing demonstrates a wide range of grammatical structures used accurately and appropriately with only very occasional errors.",
        "You produce error-free sentences with a wide variety of grammatical structures and punctuation is consistently accurate.",
    ]),
    band(7.0, 7.9, &[
        "You use a variety of complex structures with good control of grammar and punctuation, though there may be a few errors.",
        "Your writing shows good use of grammar and punctuation but may have occasional errors or minor problems with complex structures.",
        "You produce frequent error-free sentences and use a variety of grammatical structures flexibly.",
    ]),
    band(6.0, 6.9, &[
        "You use a mix of simple and complex sentence forms but with limited flexibility. Errors occur in complex structures but meaning is generally clear.",
        "Your writing has a reasonable range of structures with some errors that do not impede communication.",
        "You make some errors in grammar and punctuation but they rarely reduce communication.",
    ]),
    band(5.0, 5.9, &[
        "You use only a limited range of structures with frequent grammatical errors that cause some difficulty for the reader.",
        "Your writing shows an overuse of simple sentences with some complex sentences containing errors.",
        "You make frequent grammatical errors and punctuation may be faulty; errors cause the reader problems with understanding.",
    ]),
    band(0.0, 4.9, &[
        "Your writing contains numerous grammatical errors that severely impede communication.",
        "You use only a very limited range of structures with only rare use of subordinate clauses.",
        "Your errors in grammar and punctuation predominate and distort the meaning of the text.",
    ]),
];

pub static COHERENCE_BANDS: [FeedbackBand; 5] = [
    band(8.0, 9.0, &[
        "Your response is cohesive with skillful use of cohesive devices. Information and ideas are logically organized with clear progression throughout.",
        "You demonstrate excellent paragraph organization with a wide range of cohesive devices used accurately and appropriately.",
        "Your writing flows seamlessly with sophisticated use of cohesive devices and logical paragraph structure.",
    ]),
    band(7.0, 7.9, &[
        "Your ideas are logically organized with effective use of cohesive devices, though there may be occasional lapses in cohesion.",
        "You use a range of cohesive devices appropriately with good paragraph organization, though there may be occasional overuse.",
        "Your response shows logical progression with a clear central topic in each paragraph, using cohesive devices effectively.",
    ]),
    band(6.0, 6.9, &[
        "Your writing is generally coherent with some effective use of cohesive devices, though not always accurate or appropriate.",
        "You present information with some organization but there may be a lack of overall progression or some repetition.",
        "Your paragraphing is generally logical but may lack internal consistency in places.",
    ]),
    band(5.0, 5.9, &[
        "Your response shows limited organization with inadequate, inaccurate or overuse of cohesive devices.",
        "Your ideas are not arranged coherently and there may be frequent problems with referencing and substitution.",
        "Your paragraphing may be inadequate or not well-developed, affecting the overall coherence.",
    ]),
    band(0.0, 4.9, &[
        "Your writing lacks coherence and there is little use of cohesive devices.",
        "Your ideas are poorly organized with very limited use of cohesive devices.",
        "Your response lacks paragraphing or paragraphs are not logically arranged.",
    ]),
];

pub static LEXICAL_BANDS: [FeedbackBand; 5] = [
    band(8.0, 9.0, &[
        "You use a wide range of vocabulary with very natural and sophisticated control of lexical features. Rare minor errors occur only as 'slips'.",
        "Your vocabulary is precise and sophisticated with very good awareness of style and collocation. Errors are rare and insignificant.",
        "You demonstrate an extensive vocabulary with precise word choice and awareness of less common meanings. Spelling and word formation are almost always accurate.",
    ]),
    band(7.0, 7.9, &[
        "You use a sufficient range of vocabulary to allow some flexibility and precision. There are occasional errors in word choice but these rarely impede communication.",
        "Your vocabulary is appropriate for the task with good awareness of collocation, though there may be some inappropriate word choices.",
        "You use less common vocabulary with awareness of style and collocation, though there may be occasional inaccuracies in word choice and spelling.",
    ]),
    band(6.0, 6.9, &[
        "You have an adequate range of vocabulary for the task, though there may be some inaccuracies in word choice and collocation.",
        "Your vocabulary is generally appropriate but lacks precision in places. Some errors in word formation and spelling occur.",
        "You attempt to use less common vocabulary but with some inaccuracy. Word formation and spelling errors do not impede communication.",
    ]),
    band(5.0, 5.9, &[
        "You have a limited range of vocabulary, with a noticeable tendency to use a narrow range of words.",
        "Your vocabulary is restricted and repetitive, with frequent errors in word choice, spelling and word formation.",
        "You make noticeable errors in spelling and word formation that may cause some difficulty for the reader.",
    ]),
    band(0.0, 4.9, &[
        "Your vocabulary is very limited with little variety and frequent errors that impede communication.",
        "You use only basic vocabulary with significant problems in word formation and spelling.",
        "Your limited vocabulary resources make it difficult to convey precise meaning.",
    ]),
];

pub static TASK_BANDS: [FeedbackBand; 5] = [
    band(8.0, 9.0, &[
        "You've fully addressed all parts of the task with well-developed ideas and appropriate examples.",
        "Your response demonstrates a thorough understanding of the task requirements with relevant, extended and supported ideas.",
        "You've presented a fully developed position with relevant, fully extended and well-supported ideas.",
    ]),
    band(7.0, 7.9, &[
        "You've addressed all parts of the task, though some aspects could be more fully developed.",
        "Your response covers the requirements of the task with relevant ideas that are generally well-developed.",
        "You present a clear position throughout the response with relevant supporting ideas.",
    ]),
    band(6.0, 6.9, &[
        "You've addressed the task, though some parts may be more fully covered than others.",
        "Your response generally addresses the requirements with relevant ideas, but development may be uneven.",
        "Your position is clear but supporting ideas may lack development in places.",
    ]),
    band(5.0, 5.9, &[
        "You've addressed the task only partially, with limited development of ideas.",
        "Your response addresses some requirements of the task but may miss key aspects.",
        "Your position is not always clear and supporting ideas are limited.",
    ]),
    band(0.0, 4.9, &[
        "You've only minimally addressed the task with inadequate development of ideas.",
        "Your response fails to address key requirements of the task.",
        "Your position is difficult to identify and supporting ideas are minimal.",
    ]),
];
