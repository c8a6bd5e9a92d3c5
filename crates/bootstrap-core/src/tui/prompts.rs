//! Charm-style CLI prompts using cliclack

use crate::config::{CreateArgs, SetupConfig};
use crate::confirm::{self, LinePrompt, Prompt};
use crate::error::SetupError;
use crate::pipeline::{PipelineStep, ProgressReporter, SetupPipeline, SetupReport, StepOutcome};
use crate::product::ProductConfig;
use crate::runtime::{ShellRunner, ToolManager};
use crate::templates::{TemplateFetcher, TemplateSource};
use anyhow::Result;
use colored::Colorize;
use std::io;
use std::sync::Mutex;

/// How an interactive run ended
#[derive(Debug)]
pub enum RunOutcome {
    Completed(SetupReport),
    /// The user declined to continue
    Cancelled,
    /// A fatal error, already reported to the user
    Failed(SetupError),
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<RunOutcome> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve configuration before anything touches the disk
    let setup = match SetupConfig::resolve(config, &args) {
        Ok(setup) => setup,
        Err(e) => {
            cliclack::outro_cancel(render_failure(&e))?;
            return Ok(RunOutcome::Failed(e));
        }
    };

    match &setup.source {
        TemplateSource::Remote(url) => cliclack::log::info(format!("Using template {}", url))?,
        TemplateSource::Bundled => cliclack::log::info(format!(
            "Using bundled template from {}",
            setup.bundle_root.display()
        ))?,
    }

    // Step 2: Check the build tool (skip if --skip-tool-check)
    if args.skip_tool_check {
        cliclack::log::info("Skipping tool check")?;
    } else if !handle_tool_check(config, &args)? {
        cliclack::outro_cancel("Setup cancelled.")?;
        return Ok(RunOutcome::Cancelled);
    }

    // Step 3: Confirm a non-empty destination
    let proceed = if console::user_attended() {
        confirm::confirm_destination(&setup.destination, setup.use_defaults, &mut ClackPrompt)?
    } else {
        confirm::confirm_destination(
            &setup.destination,
            setup.use_defaults,
            &mut LinePrompt::stdio(),
        )?
    };
    if !proceed {
        cliclack::outro_cancel("Setup cancelled.")?;
        return Ok(RunOutcome::Cancelled);
    }

    // Step 4: Run the pipeline
    let fetcher = TemplateFetcher::new(config.user_agent());
    let runner = ShellRunner::default();
    let progress = SpinnerProgress::default();
    let pipeline = SetupPipeline::new(config, &fetcher, &runner, &progress);

    match pipeline.run(&setup).await {
        Ok(report) => {
            cliclack::log::success(format!(
                "Set up {} ({} files) in {}",
                report.identity.kebab_name,
                report.files,
                setup.destination.display()
            ))?;
            cliclack::outro(config.success_message())?;
            Ok(RunOutcome::Completed(report))
        }
        Err(e) => {
            cliclack::outro_cancel(render_failure(&e))?;
            Ok(RunOutcome::Failed(e))
        }
    }
}

/// One human-readable report of a fatal error
pub fn render_failure(error: &SetupError) -> String {
    match error {
        SetupError::CommandFailed {
            step,
            command,
            stdout_log,
            stderr_log,
        } => format!(
            "'{}' {} {}\nLogs can be found in {} and {}",
            command,
            "failed.".red(),
            step.failure_reason(),
            stdout_log,
            stderr_log
        ),
        other => match other.step() {
            Some(step) => format!("{} {} {}", step.failure_reason(), "Error:".red(), other),
            None => format!("{} {}", "Error:".red(), other),
        },
    }
}

/// Returns false if the user chose to stop
fn handle_tool_check<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<bool> {
    let tool = ToolManager::new(config.build_tool());

    if tool.is_installed() {
        let version = tool.get_version().unwrap_or_else(|| "unknown".to_string());
        cliclack::log::success(format!(
            "{} installed ({})",
            tool.config().display_name,
            version
        ))?;
        return Ok(true);
    }

    cliclack::log::warning(format!(
        "{} is not installed. Install it with: {}",
        tool.config().display_name,
        tool.config().install_hint
    ))?;

    // In non-interactive mode, just continue
    if args.yes {
        cliclack::log::info(format!(
            "Continuing without {} (--yes mode)",
            tool.config().display_name
        ))?;
        return Ok(true);
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item(
            "continue",
            format!("Continue without {}", tool.config().display_name),
            "the build steps will fail",
        )
        .item(
            "docs",
            format!("Open documentation ({})", tool.config().docs_url),
            "",
        )
        .item("cancel", "Cancel", "")
        .interact()?;

    match action {
        "continue" => Ok(true),
        "docs" => {
            tool.open_docs()?;
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Answers read through cliclack's text input
struct ClackPrompt;

impl Prompt for ClackPrompt {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        let answer: String = cliclack::input(question).placeholder("y/n").interact()?;
        Ok(Some(answer))
    }
}

/// One cliclack spinner per pipeline step
#[derive(Default)]
struct SpinnerProgress {
    active: Mutex<Option<(cliclack::ProgressBar, String)>>,
}

impl ProgressReporter for SpinnerProgress {
    fn start(&self, _step: PipelineStep, label: &str) {
        let spinner = cliclack::spinner();
        spinner.start(label);
        if let Ok(mut active) = self.active.lock() {
            *active = Some((spinner, label.to_string()));
        }
    }

    fn finish(&self, _step: PipelineStep, outcome: StepOutcome) {
        let Some((spinner, label)) = self.active.lock().ok().and_then(|mut active| active.take())
        else {
            return;
        };
        match outcome {
            StepOutcome::Succeeded => spinner.stop(label),
            StepOutcome::Failed => spinner.error(label),
        }
    }
}
