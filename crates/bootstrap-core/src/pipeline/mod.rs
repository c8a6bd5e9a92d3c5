//! The setup pipeline
//!
//! A fixed sequence of steps: acquire the template, substitute placeholders,
//! then run the install, generate and build commands. The first failure halts
//! the run; nothing is retried.

pub mod progress;
pub mod setup;

use crate::product::ProductConfig;
use crate::templates::TemplateSource;
use std::fmt;

pub use progress::{LogProgress, ProgressReporter, StepGuard, StepOutcome};
pub use setup::{SetupPipeline, SetupReport};

/// One stage of the setup pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    FetchOrCopyTemplate,
    SubstituteFiles,
    InstallDependencies,
    GenerateBuildFiles,
    Build,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 5] = [
        PipelineStep::FetchOrCopyTemplate,
        PipelineStep::SubstituteFiles,
        PipelineStep::InstallDependencies,
        PipelineStep::GenerateBuildFiles,
        PipelineStep::Build,
    ];

    /// What went wrong, in the user's terms, when this step fails
    pub fn failure_reason(&self) -> &'static str {
        match self {
            PipelineStep::FetchOrCopyTemplate => "Template could not be acquired.",
            PipelineStep::SubstituteFiles => "Template files could not be set up.",
            PipelineStep::InstallDependencies => "Dependencies could not be installed.",
            PipelineStep::GenerateBuildFiles => "Build files could not be generated.",
            PipelineStep::Build => "Could not build project.",
        }
    }

    /// Progress label shown while the step runs
    pub fn label<C: ProductConfig>(&self, config: &C, source: &TemplateSource) -> String {
        match self {
            PipelineStep::FetchOrCopyTemplate => match source {
                TemplateSource::Remote(url) => format!("Downloading template {}", url),
                TemplateSource::Bundled => "Copying bundled template".to_string(),
            },
            PipelineStep::SubstituteFiles => "Setting up template".to_string(),
            PipelineStep::InstallDependencies => format!("Running {}", config.install_command()),
            PipelineStep::GenerateBuildFiles => format!(
                "Running {} and building project dependencies",
                config.generate_command()
            ),
            PipelineStep::Build => format!("Running {}", config.build_command()),
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStep::FetchOrCopyTemplate => "fetch-template",
            PipelineStep::SubstituteFiles => "substitute-files",
            PipelineStep::InstallDependencies => "install-dependencies",
            PipelineStep::GenerateBuildFiles => "generate-build-files",
            PipelineStep::Build => "build",
        };
        write!(f, "{}", name)
    }
}
