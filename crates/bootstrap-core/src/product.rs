//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface that each product (e.g. pesy) must implement
//! to configure the bootstrapping behavior: where templates come from, which
//! external build commands run, and what the user sees when they finish.

use crate::runtime::tool::ToolConfig;

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - Template sources (remote default, bundled root override, vendored archive)
/// - The three external build commands and their diagnostic log files
/// - The build tool that has to be on PATH
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars, log file names)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Template source used when neither a flag nor the env override is set
    fn default_template(&self) -> &'static str;

    /// Environment variable name for overriding the template source
    fn template_env(&self) -> &'static str;

    /// Environment variable name for overriding the bundled template root
    fn bundle_dir_env(&self) -> &'static str;

    /// Command installing the project's dependencies
    fn install_command(&self) -> &'static str;

    /// Command generating the build files
    fn generate_command(&self) -> &'static str;

    /// Command building the project
    fn build_command(&self) -> &'static str;

    /// Message printed once the project has been built
    fn success_message(&self) -> String;

    /// The external build tool driving the three commands
    fn build_tool(&self) -> ToolConfig;

    /// Tag of the bundled template archive
    fn vendor_tag(&self) -> &'static str;

    /// Download URL of the bundled template archive for a tag
    fn vendor_url(&self, tag: &str) -> String;

    /// File receiving a failed command's stdout
    fn stdout_log(&self) -> String {
        format!("{}.stdout.log", self.name())
    }

    /// File receiving a failed command's stderr
    fn stderr_log(&self) -> String {
        format!("{}.stderr.log", self.name())
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
