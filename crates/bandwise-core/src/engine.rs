//! The feedback engine.
//!
//! [`evaluate`] is the synchronous pipeline: analyze, score, comment,
//! rewrite, assemble. [`FeedbackEngine`] wraps it with the simulated latency,
//! RNG seeding and the fallback on internal failure, and can grade several
//! submissions at once.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use futures::stream::{FuturesUnordered, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::aggregate::{assemble, fallback_result};
use crate::analyzer::{analyze, word_count};
use crate::config::EngineConfig;
use crate::error::FeedbackError;
use crate::feedback::CriterionComments;
use crate::model::{FeedbackResult, SubmissionInput, TaskType};
use crate::report::{GradedSubmission, GradingReport};
use crate::rewrite;
use crate::scoring::CriterionScores;

/// Run the full pipeline on a validated submission.
pub fn evaluate<R: Rng + ?Sized>(
    input: &SubmissionInput,
    rng: &mut R,
) -> Result<FeedbackResult, FeedbackError> {
    let task = input.task_type;
    let stats = analyze(&input.text)?;
    let scores = CriterionScores::compute(&stats, task);
    let comments = CriterionComments::generate(&scores, task, stats.word_count, rng);
    let improved = rewrite::improve(&input.text, task, rng)?;

    tracing::debug!(
        %task,
        overall = scores.overall(),
        "graded submission"
    );

    Ok(assemble(&scores, comments, task, improved))
}

/// One named submission in a batch.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub name: String,
    pub text: String,
}

impl BatchItem {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_grade_start(&self, name: &str);
    fn on_grade_complete(&self, entry: &GradedSubmission);
    fn on_batch_complete(&self, total: usize, rejected: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_grade_start(&self, _: &str) {}
    fn on_grade_complete(&self, _: &GradedSubmission) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: Duration) {}
}

/// Grades submissions, never failing past input validation.
#[derive(Debug, Clone, Default)]
pub struct FeedbackEngine {
    config: EngineConfig,
}

impl FeedbackEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Grade a response. Invalid input and internal failures both yield the
    /// fallback result.
    #[tracing::instrument(skip(self, response), fields(chars = response.len()))]
    pub async fn generate_feedback(&self, task_type: &str, response: &str) -> FeedbackResult {
        match self.try_generate_feedback(task_type, response).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("rejected submission: {e}");
                fallback_result(response)
            }
        }
    }

    /// Grade a response, surfacing validation errors. Failures after
    /// validation still degrade to the fallback result.
    #[tracing::instrument(skip(self, response), fields(chars = response.len()))]
    pub async fn try_generate_feedback(
        &self,
        task_type: &str,
        response: &str,
    ) -> Result<FeedbackResult, FeedbackError> {
        let input = SubmissionInput::parse(task_type, response)?;
        Ok(self.grade(&input, 0).await)
    }

    /// Grade a validated submission. `index` offsets the configured seed so
    /// each submission in a batch draws from its own stream.
    pub async fn grade(&self, input: &SubmissionInput, index: u64) -> FeedbackResult {
        self.grade_with(input, index, |input, rng| evaluate(input, rng))
            .await
    }

    /// [`grade`](Self::grade) with the pipeline supplied by the caller.
    pub(crate) async fn grade_with<F>(
        &self,
        input: &SubmissionInput,
        index: u64,
        eval: F,
    ) -> FeedbackResult
    where
        F: FnOnce(&SubmissionInput, &mut StdRng) -> Result<FeedbackResult, FeedbackError>,
    {
        let latency = self.config.simulated_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let mut rng = self.rng_for(index);
        let outcome = catch_unwind(AssertUnwindSafe(|| eval(input, &mut rng)));

        match outcome {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::error!("grading failed, using fallback: {e}");
                fallback_result(&input.text)
            }
            Err(payload) => {
                let e = FeedbackError::Internal(panic_message(payload.as_ref()));
                tracing::error!("grading panicked, using fallback: {e}");
                fallback_result(&input.text)
            }
        }
    }

    /// Grade several submissions of the same task type concurrently.
    /// Entries come back in input order.
    pub async fn grade_batch(
        &self,
        task: TaskType,
        items: Vec<BatchItem>,
        progress: &dyn ProgressReporter,
    ) -> GradingReport {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let created_at = chrono::Utc::now();
        let semaphore = Semaphore::new(self.config.parallelism.max(1));
        let total = items.len();

        let mut futures = FuturesUnordered::new();
        for (index, item) in items.into_iter().enumerate() {
            let semaphore = &semaphore;
            futures.push(async move {
                let word_count = word_count(&item.text);
                let input = match SubmissionInput::new(task, item.text.as_str()) {
                    Ok(input) => input,
                    Err(e) => {
                        tracing::warn!("rejected '{}': {e}", item.name);
                        let entry = GradedSubmission {
                            result: fallback_result(&item.text),
                            name: item.name,
                            word_count,
                            error: Some(e.to_string()),
                        };
                        return (index, entry);
                    }
                };

                let result = match semaphore.acquire().await {
                    Ok(_permit) => {
                        progress.on_grade_start(&item.name);
                        self.grade(&input, index as u64).await
                    }
                    Err(_) => {
                        tracing::error!("semaphore closed, using fallback for '{}'", item.name);
                        fallback_result(&item.text)
                    }
                };

                let entry = GradedSubmission {
                    name: item.name,
                    word_count,
                    result,
                    error: None,
                };
                (index, entry)
            });
        }

        let mut graded = Vec::with_capacity(total);
        while let Some((index, entry)) = futures.next().await {
            progress.on_grade_complete(&entry);
            graded.push((index, entry));
        }
        drop(futures);
        graded.sort_by_key(|(index, _)| *index);

        let entries: Vec<GradedSubmission> = graded.into_iter().map(|(_, e)| e).collect();
        let rejected = entries.iter().filter(|e| e.is_rejected()).count();
        let elapsed = start.elapsed();
        progress.on_batch_complete(total, rejected, elapsed);

        GradingReport {
            run_id,
            created_at,
            task_type: task,
            entries,
            duration_ms: elapsed.as_millis() as u64,
        }
    }

    fn rng_for(&self, index: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index)),
            None => StdRng::from_entropy(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
