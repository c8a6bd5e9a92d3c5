//! Bootstrap Core - Shared library for project bootstrapping CLIs
//!
//! This library sets up a native project from a template: it acquires the
//! template (remote archive or bundled copy), rewrites placeholder tokens in
//! file contents and names to match the new project, then drives the build
//! tool through install, build-file generation and build.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Identity derivation, template acquisition,
//!   placeholder substitution, command running
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, the confirmation
//!   gate and `SetupPipeline`
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use bootstrap_core::{pipeline::LogProgress, CreateArgs, SetupConfig, SetupPipeline};
//! use bootstrap_core::{runtime::ShellRunner, templates::TemplateFetcher};
//!
//! let setup = SetupConfig::resolve(&MyConfig, &CreateArgs::default())?;
//! let fetcher = TemplateFetcher::new("myapp");
//! let pipeline = SetupPipeline::new(&MyConfig, &fetcher, &ShellRunner::default(), &LogProgress);
//! let report = pipeline.run(&setup).await?;
//! ```

pub mod config;
pub mod confirm;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod product;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{CreateArgs, SetupConfig};
pub use error::SetupError;
pub use identity::ProjectIdentity;
pub use pipeline::{PipelineStep, SetupPipeline, SetupReport};
pub use product::ProductConfig;
pub use runtime::{CommandResult, CommandRunner, ToolConfig};
pub use templates::{TemplateFetch, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
