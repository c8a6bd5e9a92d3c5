//! Pesy CLI - Project bootstrapping for esy/pesy Reason projects

use anyhow::Result;
use bootstrap_core::tui::RunOutcome;
use bootstrap_core::{CreateArgs, ProductConfig, ToolConfig};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "PESY_LOG";

/// Pesy product configuration
#[derive(Clone)]
pub struct PesyConfig;

impl ProductConfig for PesyConfig {
    fn name(&self) -> &'static str {
        "pesy"
    }

    fn display_name(&self) -> &'static str {
        "Pesy"
    }

    fn default_template(&self) -> &'static str {
        "github:esy/pesy-reason-template"
    }

    fn template_env(&self) -> &'static str {
        "PESY_TEMPLATE"
    }

    fn bundle_dir_env(&self) -> &'static str {
        "PESY_TEMPLATE_DIR"
    }

    fn install_command(&self) -> &'static str {
        "esy i"
    }

    fn generate_command(&self) -> &'static str {
        "esy pesy"
    }

    fn build_command(&self) -> &'static str {
        "esy build"
    }

    fn success_message(&self) -> String {
        format!("You may now run {}", "'esy test'".green())
    }

    fn build_tool(&self) -> ToolConfig {
        ToolConfig {
            name: "esy",
            display_name: "esy",
            install_hint: "npm install -g esy",
            docs_url: "https://esy.sh/docs/en/getting-started.html",
        }
    }

    fn vendor_tag(&self) -> &'static str {
        "0.1.0-alpha.21"
    }

    fn vendor_url(&self, tag: &str) -> String {
        format!(
            "https://github.com/esy/pesy-reason-template/archive/{}.zip",
            tag
        )
    }
}

#[derive(Parser, Debug)]
#[command(name = "pesy")]
#[command(about = "Bootstrap a new esy/pesy Reason project in the current directory")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Bootstrap a new project (the default)
    Create(CliCreateArgs),
    /// Download the bundled template shipped with the CLI (for development use)
    VendorTemplate(VendorArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct CliCreateArgs {
    /// Template source: 'bundled', github:<owner>/<repo>[#ref] or a zip URL
    #[arg(short, long)]
    pub template: Option<String>,

    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Bundled template root to use instead of the one shipped with the CLI
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Skip the esy installation check
    #[arg(long = "skip-esy")]
    pub skip_esy: bool,

    /// Use defaults and never prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template: args.template,
            directory: args.directory,
            template_dir: args.template_dir,
            skip_tool_check: args.skip_esy,
            yes: args.yes,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct VendorArgs {
    /// Bundle root to vendor into
    #[arg(long = "template-dir", default_value = "templates/pesy")]
    pub template_dir: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn create(config: &PesyConfig, args: CreateArgs) -> Result<()> {
    let outcome = bootstrap_core::run(config, args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match outcome? {
        RunOutcome::Completed(_) | RunOutcome::Cancelled => Ok(()),
        RunOutcome::Failed(e) => std::process::exit(e.exit_code()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();

    let args = Args::parse();
    let config = PesyConfig;

    match args.command {
        Some(Command::Create(create_args)) => create(&config, create_args.into()).await,
        Some(Command::VendorTemplate(vendor_args)) => {
            bootstrap_core::templates::vendor_template(&config, &vendor_args.template_dir).await
        }
        // No subcommand provided, default to create with the top-level flags
        None => create(&config, args.create.into()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootstrap_core::{PipelineStep, TemplateSource};

    #[test]
    fn test_default_template_parses() {
        let source = TemplateSource::parse(PesyConfig.default_template()).unwrap();
        assert!(matches!(source, TemplateSource::Remote(_)));
    }

    #[test]
    fn test_log_file_names() {
        assert_eq!(PesyConfig.stdout_log(), "pesy.stdout.log");
        assert_eq!(PesyConfig.stderr_log(), "pesy.stderr.log");
    }

    #[test]
    fn test_step_labels() {
        let source = TemplateSource::Bundled;
        assert_eq!(
            PipelineStep::InstallDependencies.label(&PesyConfig, &source),
            "Running esy i"
        );
        assert_eq!(
            PipelineStep::GenerateBuildFiles.label(&PesyConfig, &source),
            "Running esy pesy and building project dependencies"
        );
    }

    #[test]
    fn test_flags_without_subcommand() {
        let args = Args::parse_from(["pesy", "--template", "bundled", "-y"]);
        assert!(args.command.is_none());
        let create: CreateArgs = args.create.into();
        assert_eq!(create.template.as_deref(), Some("bundled"));
        assert!(create.yes);
    }

    #[test]
    fn test_vendor_subcommand() {
        let args = Args::parse_from(["pesy", "vendor-template", "--template-dir", "out"]);
        match args.command {
            Some(Command::VendorTemplate(vendor)) => {
                assert_eq!(vendor.template_dir, PathBuf::from("out"))
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
