//! Template-based question generation.
//!
//! Each task type has a handful of prompt templates with `{name}` slots and
//! pools of values to fill them with. A generated prompt is checked for
//! leftover slots before it is returned.

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;

use bandwise_core::TaskType;

use crate::error::PromptError;
use crate::Question;

const SUMMARY_INSTRUCTION: &str = "Summarize the information by selecting and reporting the \
    main features, and make comparisons where relevant.";

const TASK1_TEMPLATES: &[&str] = &[
    "The {chart} below shows {dataDescription} between {timeStart} and {timeEnd} in {location}.",
    "The {chart} illustrates {dataDescription} in {location} during the period {timeStart}-{timeEnd}.",
    "The {chart} gives information about {dataDescription} from {timeStart} to {timeEnd}.",
    "The {chart} compares {dataDescription} in {location} over the period from {timeStart} to {timeEnd}.",
    "The {chart} provides information on {dataDescription} between {timeStart} and {timeEnd}.",
];

const CHART_TYPES: &[&str] = &[
    "graph",
    "bar chart",
    "line graph",
    "pie chart",
    "table",
    "diagram",
    "map",
    "flowchart",
    "process diagram",
];

const DATA_DESCRIPTIONS: &[&str] = &[
    "the percentage of people using different types of transportation",
    "the proportion of the population aged 65 and over",
    "changes in average house prices",
    "the amount of money spent on research and development",
    "the number of tourists visiting different countries",
    "the consumption of renewable energy",
    "the literacy rates for men and women",
    "the sales figures for different types of electronic devices",
    "the average working hours per week",
    "the percentage of household income spent on different categories",
    "the number of students enrolled in different university courses",
    "the production and consumption of coffee",
    "the water usage in different sectors",
    "the changes in land use",
    "the rates of recycling for different materials",
];

const TIME_STARTS: &[&str] = &[
    "1980", "1990", "2000", "2005", "2010", "January", "February", "March", "April", "May",
];

const TIME_ENDS: &[&str] = &[
    "2010", "2015", "2020", "2022", "present", "June", "July", "August", "September", "December",
];

const LOCATIONS: &[&str] = &[
    "several countries",
    "four different countries",
    "five major cities",
    "different regions",
    "selected developed countries",
    "developing nations",
    "urban and rural areas",
    "various age groups",
    "different income brackets",
    "six European countries",
    "Australia",
    "the United States",
    "the United Kingdom",
    "Canada",
    "Japan",
    "global markets",
];

/// What a task 2 template needs filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task2Slot {
    TopicPair,
    Statement,
    Question,
    Observation,
}

const TASK2_TEMPLATES: &[(&str, Task2Slot)] = &[
    (
        "Some people believe that {topic1}. Others feel that {topic2}. Discuss both these views \
         and give your own opinion.",
        Task2Slot::TopicPair,
    ),
    (
        "{statement}. To what extent do you agree or disagree with this statement?",
        Task2Slot::Statement,
    ),
    (
        "Some people think that {topic1}, while others believe {topic2}. Discuss both sides and \
         give your opinion.",
        Task2Slot::TopicPair,
    ),
    (
        "{question}? Discuss the advantages and disadvantages of this development.",
        Task2Slot::Question,
    ),
    (
        "In many countries, {observation}. What are the causes of this problem? What solutions \
         can you suggest?",
        Task2Slot::Observation,
    ),
    (
        "{statement}. What are the causes of this trend and what measures could be taken to \
         address it?",
        Task2Slot::Statement,
    ),
];

const TOPIC_PAIRS: &[(&str, &str)] = &[
    (
        "universities should focus on academic skills",
        "universities should prepare students for employment",
    ),
    (
        "governments should spend money on public services",
        "governments should reduce taxes",
    ),
    (
        "children should learn practical skills in school",
        "children should focus on academic subjects",
    ),
    (
        "technology has improved communication between people",
        "technology has made people more isolated",
    ),
    (
        "international tourism benefits local communities",
        "international tourism damages local cultures and environments",
    ),
];

const STATEMENTS: &[&str] = &[
    "The most effective way to reduce crime is to give longer prison sentences",
    "The best way to improve public health is to increase tax on unhealthy foods",
    "In the future, all cars, buses and trucks will be driverless vehicles",
    "The internet has transformed the way we work and communicate",
    "Traditional skills and ways of life are being lost because people no longer practice them",
    "The government should control the amount of violence shown in films and on television",
    "In the modern world, it is not necessary to have many different languages",
    "The most important aspect of a job is the money a person earns",
    "People should be encouraged to use public transportation instead of personal vehicles",
    "The main environmental problem facing the world today is the loss of particular species of plants and animals",
];

const QUESTIONS: &[&str] = &[
    "Should governments spend money on art when they have other important issues to address",
    "Should developing countries focus on environmental protection or economic development",
    "Should children be taught at home by their parents rather than at school by teachers",
    "Should companies be required to hire equal numbers of men and women",
    "Should people be allowed to work from home instead of commuting to an office every day",
];

const OBSERVATIONS: &[&str] = &[
    "people are living in large cities rather than in the countryside",
    "the number of people who are overweight is increasing",
    "traditional shops are being replaced by online shopping",
    "young people are less interested in learning about history and culture",
    "fewer people are reading books and newspapers",
    "more people are choosing not to get married",
    "children are spending less time outdoors",
    "people are working longer hours than in the past",
    "the gap between rich and poor is widening",
    "many traditional skills and crafts are disappearing",
];

static PLACEHOLDER: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"\{[A-Za-z0-9_]+\}"));

fn pick<T: Copy, R: Rng + ?Sized>(
    pool_name: &'static str,
    pool: &[T],
    rng: &mut R,
) -> Result<T, PromptError> {
    pool.choose(rng)
        .copied()
        .ok_or(PromptError::EmptyPool(pool_name))
}

/// Replace the first occurrence of each `{key}` and check nothing is left.
pub fn fill(template: &str, values: &[(&str, &str)]) -> Result<String, PromptError> {
    let mut prompt = template.to_string();
    for (key, value) in values {
        prompt = prompt.replacen(&format!("{{{key}}}"), value, 1);
    }

    let placeholder = PLACEHOLDER
        .as_ref()
        .map_err(|e| PromptError::Pattern(e.to_string()))?;
    if let Some(m) = placeholder.find(&prompt) {
        return Err(PromptError::UnresolvedPlaceholder {
            placeholder: m.as_str().to_string(),
        });
    }
    Ok(prompt)
}

/// Fill a random task 1 template.
pub fn task1_prompt<R: Rng + ?Sized>(rng: &mut R) -> Result<String, PromptError> {
    let template = pick("task1 templates", TASK1_TEMPLATES, rng)?;
    let values = [
        ("chart", pick("chart types", CHART_TYPES, rng)?),
        ("dataDescription", pick("data descriptions", DATA_DESCRIPTIONS, rng)?),
        ("timeStart", pick("time starts", TIME_STARTS, rng)?),
        ("timeEnd", pick("time ends", TIME_ENDS, rng)?),
        ("location", pick("locations", LOCATIONS, rng)?),
    ];
    let prompt = fill(template, &values)?;
    Ok(format!("{prompt} {SUMMARY_INSTRUCTION}"))
}

/// Fill a random task 2 template.
pub fn task2_prompt<R: Rng + ?Sized>(rng: &mut R) -> Result<String, PromptError> {
    let (template, slot) = pick("task2 templates", TASK2_TEMPLATES, rng)?;
    match slot {
        Task2Slot::TopicPair => {
            let (topic1, topic2) = pick("topic pairs", TOPIC_PAIRS, rng)?;
            fill(template, &[("topic1", topic1), ("topic2", topic2)])
        }
        Task2Slot::Statement => {
            fill(template, &[("statement", pick("statements", STATEMENTS, rng)?)])
        }
        Task2Slot::Question => fill(template, &[("question", pick("questions", QUESTIONS, rng)?)]),
        Task2Slot::Observation => fill(
            template,
            &[("observation", pick("observations", OBSERVATIONS, rng)?)],
        ),
    }
}

/// Generate a fresh question for `task`.
pub fn generate_question<R: Rng + ?Sized>(
    task: TaskType,
    rng: &mut R,
) -> Result<Question, PromptError> {
    let prompt = match task {
        TaskType::Task1 => task1_prompt(rng)?,
        TaskType::Task2 => task2_prompt(rng)?,
    };
    Ok(Question::new(
        chrono::Utc::now().timestamp_millis(),
        task,
        prompt,
    ))
}
