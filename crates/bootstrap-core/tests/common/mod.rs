//! Shared fixtures for integration tests

#![allow(dead_code)]

use bootstrap_core::pipeline::{PipelineStep, ProgressReporter, StepOutcome};
use bootstrap_core::{CommandResult, CommandRunner, ProductConfig, TemplateFetch, ToolConfig};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use url::Url;

#[derive(Clone)]
pub struct TestProduct;

impl ProductConfig for TestProduct {
    fn name(&self) -> &'static str {
        "testy"
    }

    fn display_name(&self) -> &'static str {
        "Testy"
    }

    fn default_template(&self) -> &'static str {
        "github:example/testy-template"
    }

    fn template_env(&self) -> &'static str {
        "TESTY_TEMPLATE"
    }

    fn bundle_dir_env(&self) -> &'static str {
        "TESTY_TEMPLATE_DIR"
    }

    fn install_command(&self) -> &'static str {
        "tool install"
    }

    fn generate_command(&self) -> &'static str {
        "tool generate"
    }

    fn build_command(&self) -> &'static str {
        "tool build"
    }

    fn success_message(&self) -> String {
        "done".to_string()
    }

    fn build_tool(&self) -> ToolConfig {
        ToolConfig {
            name: "tool",
            display_name: "Tool",
            install_hint: "install tool",
            docs_url: "https://example.com/docs",
        }
    }

    fn vendor_tag(&self) -> &'static str {
        "1.2.3"
    }

    fn vendor_url(&self, tag: &str) -> String {
        format!("https://example.invalid/template/{}.zip", tag)
    }
}

/// Command runner answering from a script and recording every call
#[derive(Default)]
pub struct ScriptedRunner {
    results: HashMap<String, CommandResult>,
    unlaunchable: Option<String>,
    pub calls: Mutex<Vec<(String, PathBuf)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, result: CommandResult) -> Self {
        self.results.insert(command.to_string(), result);
        self
    }

    pub fn unlaunchable(mut self, command: &str) -> Self {
        self.unlaunchable = Some(command.to_string());
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str, cwd: &Path) -> io::Result<CommandResult> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), cwd.to_path_buf()));
        if self.unlaunchable.as_deref() == Some(command) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "tool: not found"));
        }
        Ok(self
            .results
            .get(command)
            .cloned()
            .unwrap_or_else(|| CommandResult::succeeded("ok")))
    }
}

/// Fetcher that must never be used
pub struct NoFetch;

impl TemplateFetch for NoFetch {
    async fn fetch_into(&self, url: &Url, _destination: &Path) -> anyhow::Result<()> {
        panic!("unexpected fetch of {}", url);
    }
}

/// Fetcher writing a fixed set of files into the destination
pub struct FakeFetch {
    pub files: Vec<(&'static str, &'static str)>,
}

impl TemplateFetch for FakeFetch {
    async fn fetch_into(&self, _url: &Url, destination: &Path) -> anyhow::Result<()> {
        for (path, contents) in &self.files {
            let target = destination.join(path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(target, contents)?;
        }
        Ok(())
    }
}

/// Progress reporter recording start/finish events
#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<(PipelineStep, Option<StepOutcome>)>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<(PipelineStep, Option<StepOutcome>)> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressReporter for RecordingProgress {
    fn start(&self, step: PipelineStep, _label: &str) {
        self.events.lock().unwrap().push((step, None));
    }

    fn finish(&self, step: PipelineStep, outcome: StepOutcome) {
        self.events.lock().unwrap().push((step, Some(outcome)));
    }
}

/// Bundle root holding `files` under a `tree/` template directory
pub fn bundle_with(files: &[(&str, &str)]) -> tempfile::TempDir {
    let bundle = tempfile::tempdir().unwrap();
    std::fs::write(
        bundle.path().join("template.yaml"),
        "name: Test\nversion: 1.0.0\nroot: tree\n",
    )
    .unwrap();
    std::fs::create_dir_all(bundle.path().join("tree")).unwrap();
    for (path, contents) in files {
        let target = bundle.path().join("tree").join(path);
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(target, contents).unwrap();
    }
    bundle
}
