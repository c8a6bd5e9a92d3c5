//! Errors surfaced by the setup pipeline

use crate::pipeline::PipelineStep;
use std::path::PathBuf;
use thiserror::Error;

/// A fatal condition halting the setup at its current step
#[derive(Error, Debug)]
pub enum SetupError {
    /// The configuration handed to the core could not be understood
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Remote fetch or bundled copy failed
    #[error("Could not acquire template: {0:#}")]
    TemplateAcquisition(#[source] anyhow::Error),

    /// Reading, writing or renaming a template file failed
    #[error("Could not set up template file {}: {source}", path.display())]
    Substitution {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external command could not be started at all
    #[error("'{command}' could not be started: {source}")]
    CommandLaunch {
        step: PipelineStep,
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The external command ran and exited with a failure status
    #[error(
        "'{command}' failed. {}\nLogs can be found in {stdout_log} and {stderr_log}",
        step.failure_reason()
    )]
    CommandFailed {
        step: PipelineStep,
        command: String,
        stdout_log: String,
        stderr_log: String,
    },
}

impl SetupError {
    /// The pipeline step that failed, if the error happened inside the pipeline
    pub fn step(&self) -> Option<PipelineStep> {
        match self {
            SetupError::Configuration(_) => None,
            SetupError::TemplateAcquisition(_) => Some(PipelineStep::FetchOrCopyTemplate),
            SetupError::Substitution { .. } => Some(PipelineStep::SubstituteFiles),
            SetupError::CommandLaunch { step, .. } | SetupError::CommandFailed { step, .. } => {
                Some(*step)
            }
        }
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        1
    }
}
