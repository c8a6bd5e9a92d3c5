//! External processes
//!
//! This module provides:
//! - The command runner used by the pipeline's build steps
//! - Build tool detection

pub mod command;
pub mod tool;

pub use command::{CommandResult, CommandRunner, ShellRunner};
pub use tool::{ToolConfig, ToolManager};
