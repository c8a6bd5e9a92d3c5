//! Progress indication for pipeline steps

use super::PipelineStep;

/// How a step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Succeeded,
    Failed,
}

/// Receives start/finish notifications for each pipeline step
pub trait ProgressReporter {
    fn start(&self, step: PipelineStep, label: &str);
    fn finish(&self, step: PipelineStep, outcome: StepOutcome);
}

/// Keeps a step's progress indication alive and clears it exactly once
///
/// `finish` reports the real outcome. If the guard is dropped without it (an
/// early return, a panic, a cancelled future) the step is reported as failed.
pub struct StepGuard<'a, P: ProgressReporter + ?Sized> {
    reporter: &'a P,
    step: PipelineStep,
    finished: bool,
}

impl<'a, P: ProgressReporter + ?Sized> StepGuard<'a, P> {
    pub fn start(reporter: &'a P, step: PipelineStep, label: &str) -> Self {
        reporter.start(step, label);
        Self {
            reporter,
            step,
            finished: false,
        }
    }

    pub fn finish(mut self, outcome: StepOutcome) {
        self.finished = true;
        self.reporter.finish(self.step, outcome);
    }
}

impl<P: ProgressReporter + ?Sized> Drop for StepGuard<'_, P> {
    fn drop(&mut self) {
        if !self.finished {
            self.reporter.finish(self.step, StepOutcome::Failed);
        }
    }
}

/// Reports progress as tracing events
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn start(&self, step: PipelineStep, label: &str) {
        tracing::info!(%step, "{}", label);
    }

    fn finish(&self, step: PipelineStep, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Succeeded => tracing::info!(%step, "step finished"),
            StepOutcome::Failed => tracing::warn!(%step, "step failed"),
        }
    }
}
