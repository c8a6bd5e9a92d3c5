//! Resolution of CLI arguments and environment into the setup configuration

use crate::error::SetupError;
use crate::product::ProductConfig;
use crate::templates::TemplateSource;
use std::path::{Component, Path, PathBuf};

/// Arguments for the create command, as parsed by the CLI layer
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Template source (`bundled`, `github:<owner>/<repo>[#ref]` or a URL)
    pub template: Option<String>,

    /// Project directory to set up
    pub directory: Option<PathBuf>,

    /// Bundled template root to use instead of the one shipped with the binary
    pub template_dir: Option<PathBuf>,

    /// Skip the build tool check
    pub skip_tool_check: bool,

    /// Use defaults and never prompt
    pub yes: bool,
}

/// Everything the setup pipeline needs to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupConfig {
    pub source: TemplateSource,
    pub destination: PathBuf,
    pub bundle_root: PathBuf,
    pub use_defaults: bool,
}

impl SetupConfig {
    /// Resolve arguments against the process environment and current directory
    pub fn resolve<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<Self, SetupError> {
        let current_dir = std::env::current_dir().map_err(|e| {
            SetupError::Configuration(format!("Cannot determine current directory: {}", e))
        })?;
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));

        Self::resolve_with(config, args, &current_dir, exe_dir.as_deref(), |key| {
            std::env::var(key).ok()
        })
    }

    /// Resolution with every ambient input passed in
    ///
    /// Precedence: flags, then the product's environment variables, then the
    /// product defaults.
    pub fn resolve_with<C: ProductConfig>(
        config: &C,
        args: &CreateArgs,
        current_dir: &Path,
        exe_dir: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SetupError> {
        let raw_source = args
            .template
            .clone()
            .or_else(|| env(config.template_env()).filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| config.default_template().to_string());
        let source = TemplateSource::parse(&raw_source)?;

        let destination = match &args.directory {
            Some(dir) => normalize(&current_dir.join(dir)),
            None => normalize(current_dir),
        };

        let bundle_root = match (&args.template_dir, env(config.bundle_dir_env())) {
            (Some(dir), _) => normalize(&current_dir.join(dir)),
            (None, Some(dir)) if !dir.trim().is_empty() => normalize(&current_dir.join(dir)),
            _ => exe_dir
                .unwrap_or(current_dir)
                .join("templates")
                .join(config.name()),
        };

        Ok(Self {
            source,
            destination,
            bundle_root,
            use_defaults: args.yes,
        })
    }
}

/// Fold `.` and `..` components so the final segment is a real directory name
///
/// Purely lexical: symlinks are not resolved and `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component.as_os_str()),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}
