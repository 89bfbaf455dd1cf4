//! Simulated analysis tasks
//!
//! A task is submitted with the listing text, stays pending for the
//! configured delay, then resolves with its result. Completions come back over
//! a channel so the UI loop can pick them up on its next tick.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::analysis::{self, HealthReport, ListingAdvice};

/// Default artificial latency for a simulated analysis
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Analyzer, // Text AI advice
    Scorer, // Listing Health Score
}

impl TaskKind {
    pub fn label(self) -> &'static str {
        match self {
            TaskKind::Analyzer => "TAI",
            TaskKind::Scorer => "LHS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutput {
    Advice(ListingAdvice),
    Health(HealthReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub id: TaskId,
    pub output: TaskOutput,
}

/// Lifecycle of one result slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TaskState<T> {
    #[default]
    Idle,
    Pending(TaskId),
    Resolved(T),
}

impl<T> TaskState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskState::Pending(_))
    }

    pub fn result(&self) -> Option<&T> {
        match self {
            TaskState::Resolved(value) => Some(value),
            _ => None,
        }
    }

    /// Resolve only if `id` is the submission this slot is waiting for.
    /// Returns false for stale completions.
    pub fn resolve(&mut self, id: TaskId, value: T) -> bool {
        match self {
            TaskState::Pending(pending) if *pending == id => {
                *self = TaskState::Resolved(value);
                true
            }
            _ => false,
        }
    }
}

/// Wait out the artificial latency, then compute the result
pub async fn simulate(kind: TaskKind, text: &str, delay: Duration) -> TaskOutput {
    tokio::time::sleep(delay).await;
    match kind {
        TaskKind::Analyzer => TaskOutput::Advice(analysis::analyze_listing(text)),
        TaskKind::Scorer => TaskOutput::Health(analysis::score_listing(text)),
    }
}

/// Spawns simulated tasks and collects their completions
pub struct TaskRunner {
    delay: Duration,
    next_id: u64,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl TaskRunner {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            next_id: 1,
            tx,
            rx,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Submit a task over a snapshot of the listing text. Must be called from
    /// within a tokio runtime.
    pub fn submit(&mut self, kind: TaskKind, text: String) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let delay = self.delay;
        tracing::debug!(
            "Submitting {} task {} ({} chars)",
            kind.label(),
            id,
            analysis::listing_length(&text)
        );

        tokio::spawn(async move {
            let output = simulate(kind, &text, delay).await;
            // The runner owns the receiver, so this only fails after shutdown
            if tx.send(Completion { id, output }).is_err() {
                tracing::debug!("Task {} finished after runner shut down", id);
            }
        });

        id
    }

    /// Next finished task, if any, without waiting
    pub fn try_next(&mut self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next finished task
    pub async fn next(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{ADVICE_DECENT, ADVICE_SHORT};

    #[tokio::test(start_paused = true)]
    async fn test_simulate_waits_for_delay() {
        let start = tokio::time::Instant::now();
        let output = simulate(TaskKind::Scorer, "", DEFAULT_DELAY).await;
        assert!(start.elapsed() >= DEFAULT_DELAY);
        match output {
            TaskOutput::Health(report) => assert_eq!(report.score, 42),
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_pending_until_delay() {
        let mut runner = TaskRunner::new(Duration::from_millis(1200));
        let id = runner.submit(TaskKind::Analyzer, "a".repeat(150));

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(runner.try_next().is_none());

        tokio::time::sleep(Duration::from_millis(200)).await;
        let completion = runner.try_next().expect("task should have resolved");
        assert_eq!(completion.id, id);
        assert_eq!(
            completion.output,
            TaskOutput::Advice(analysis::analyze_listing(&"a".repeat(150)))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_ids_are_unique() {
        let mut runner = TaskRunner::new(Duration::from_millis(10));
        let first = runner.submit(TaskKind::Analyzer, String::new());
        let second = runner.submit(TaskKind::Scorer, String::new());
        assert_ne!(first, second);

        let mut seen = vec![
            runner.next().await.unwrap().id,
            runner.next().await.unwrap().id,
        ];
        seen.sort();
        assert_eq!(seen, vec![first, second]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runner_uses_text_at_submit_time() {
        let mut runner = TaskRunner::new(DEFAULT_DELAY);
        let mut text = String::from("short");
        runner.submit(TaskKind::Analyzer, text.clone());
        text.push_str(&"x".repeat(200));

        let completion = runner.next().await.unwrap();
        match completion.output {
            TaskOutput::Advice(advice) => {
                assert_eq!(advice.text, ADVICE_SHORT);
                assert_ne!(advice.text, ADVICE_DECENT);
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }

    #[test]
    fn test_task_state_ignores_stale_completion() {
        let mut slot: TaskState<u8> = TaskState::Pending(TaskId(2));
        assert!(!slot.resolve(TaskId(1), 10));
        assert!(slot.is_pending());
        assert!(slot.resolve(TaskId(2), 20));
        assert_eq!(slot.result(), Some(&20));
        // Already resolved, nothing pending
        assert!(!slot.resolve(TaskId(2), 30));
        assert_eq!(slot.result(), Some(&20));
    }
}
