//! The setup pipeline orchestrator

use super::progress::{ProgressReporter, StepGuard, StepOutcome};
use super::PipelineStep;
use crate::config::SetupConfig;
use crate::error::SetupError;
use crate::identity::ProjectIdentity;
use crate::product::ProductConfig;
use crate::runtime::command::{CommandResult, CommandRunner};
use crate::templates::{self, TemplateFetch};
use std::future::Future;
use std::path::Path;

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub identity: ProjectIdentity,
    /// Number of template files substituted
    pub files: usize,
}

/// Drives template acquisition, substitution and the three build commands
pub struct SetupPipeline<'a, C, F, R, P: ?Sized> {
    config: &'a C,
    fetcher: &'a F,
    runner: &'a R,
    progress: &'a P,
}

impl<'a, C, F, R, P> SetupPipeline<'a, C, F, R, P>
where
    C: ProductConfig,
    F: TemplateFetch,
    R: CommandRunner,
    P: ProgressReporter + ?Sized,
{
    pub fn new(config: &'a C, fetcher: &'a F, runner: &'a R, progress: &'a P) -> Self {
        Self {
            config,
            fetcher,
            runner,
            progress,
        }
    }

    /// Run every step in order, stopping at the first failure
    pub async fn run(&self, setup: &SetupConfig) -> Result<SetupReport, SetupError> {
        let destination = setup.destination.as_path();
        let identity = ProjectIdentity::from_path(destination);
        tracing::info!(
            package = %identity.kebab_name,
            destination = %destination.display(),
            "starting setup"
        );

        self.step(
            PipelineStep::FetchOrCopyTemplate,
            &setup.source,
            templates::resolve_template(
                &setup.source,
                destination,
                &setup.bundle_root,
                self.fetcher,
            ),
        )
        .await?;

        let files = self
            .step(
                PipelineStep::SubstituteFiles,
                &setup.source,
                templates::substitute_all(destination, &identity),
            )
            .await?;

        let commands = [
            (PipelineStep::InstallDependencies, self.config.install_command()),
            (PipelineStep::GenerateBuildFiles, self.config.generate_command()),
            (PipelineStep::Build, self.config.build_command()),
        ];
        for (step, command) in commands {
            self.step(
                step,
                &setup.source,
                self.run_command(step, command, destination),
            )
            .await?;
        }

        tracing::info!(package = %identity.kebab_name, "setup complete");
        Ok(SetupReport { identity, files })
    }

    /// Run one step with its progress indication held for the whole duration
    async fn step<T>(
        &self,
        step: PipelineStep,
        source: &templates::TemplateSource,
        work: impl Future<Output = Result<T, SetupError>>,
    ) -> Result<T, SetupError> {
        let label = step.label(self.config, source);
        let guard = StepGuard::start(self.progress, step, &label);

        let result = work.await;
        guard.finish(if result.is_ok() {
            StepOutcome::Succeeded
        } else {
            StepOutcome::Failed
        });
        result
    }

    async fn run_command(
        &self,
        step: PipelineStep,
        command: &str,
        destination: &Path,
    ) -> Result<(), SetupError> {
        let result = self
            .runner
            .run(command, destination)
            .await
            .map_err(|source| SetupError::CommandLaunch {
                step,
                command: command.to_string(),
                source,
            })?;

        if result.success {
            return Ok(());
        }

        tracing::warn!(%step, command, "command failed");
        self.write_diagnostics(destination, &result).await;

        Err(SetupError::CommandFailed {
            step,
            command: command.to_string(),
            stdout_log: self.config.stdout_log(),
            stderr_log: self.config.stderr_log(),
        })
    }

    /// Persist a failed command's output, replacing earlier logs
    async fn write_diagnostics(&self, destination: &Path, result: &CommandResult) {
        let logs = [
            (self.config.stdout_log(), &result.stdout),
            (self.config.stderr_log(), &result.stderr),
        ];
        for (name, contents) in logs {
            let path = destination.join(&name);
            if let Err(e) = tokio::fs::write(&path, contents).await {
                tracing::warn!(path = %path.display(), error = %e, "could not write diagnostic log");
            }
        }
    }
}
