//! Build tool detection
//!
//! The pipeline's external commands all go through one build tool (e.g. esy).
//! This checks that it is on PATH before anything runs, so a missing tool can be
//! reported up front instead of as a launch failure halfway through.

use anyhow::Result;
use colored::Colorize;
use std::process::Command;

/// Configuration for a CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "esy")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// How the user installs the tool
    pub install_hint: &'static str,
    /// URL to the documentation
    pub docs_url: &'static str,
}

/// Manager for checking a CLI tool
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    /// Create a new tool manager with the given configuration
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Get the tool configuration
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        let locator = if cfg!(windows) { "where" } else { "which" };
        Command::new(locator)
            .arg(self.config.name)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        Command::new(self.config.name)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Open the tool's documentation in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!("Opening {} documentation in your browser...", self.config.display_name).cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}
