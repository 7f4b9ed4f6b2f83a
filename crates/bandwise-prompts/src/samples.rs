//! Fixed sample questions used when generation fails.

use bandwise_core::TaskType;

use crate::Question;

const TASK1_SAMPLES: &[&str] = &[
    "The graph below shows the proportion of the population aged 65 and over between 1940 and \
     2040 in three different countries. Summarize the information by selecting and reporting the \
     main features, and make comparisons where relevant.",
    "The charts below show the percentage of water used for different purposes in six areas of \
     the world. Summarize the information by selecting and reporting the main features, and make \
     comparisons where relevant.",
    "The table below shows the sales made by a coffee shop in an office building on a typical \
     weekday. Summarize the information by selecting and reporting the main features, and make \
     comparisons where relevant.",
];

const TASK2_SAMPLES: &[&str] = &[
    "Some people believe that universities should focus on providing academic skills rather than \
     preparing students for employment. To what extent do you agree or disagree?",
    "In some countries, the number of people who are overweight is increasing. What do you think \
     are the causes of this? What solutions can you suggest?",
    "Some people think that all university students should study whatever they like. Others \
     believe that they should only be allowed to study subjects that will be useful in the future, \
     such as those related to science and technology. Discuss both these views and give your own \
     opinion.",
];

/// All sample questions for `task`, numbered from 1.
pub fn sample_questions(task: TaskType) -> Vec<Question> {
    let prompts = match task {
        TaskType::Task1 => TASK1_SAMPLES,
        TaskType::Task2 => TASK2_SAMPLES,
    };
    prompts
        .iter()
        .zip(1..)
        .map(|(prompt, id)| Question::new(id, task, *prompt))
        .collect()
}
