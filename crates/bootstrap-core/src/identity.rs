//! Project identity derived from the destination directory name

use heck::ToUpperCamelCase;
use std::path::Path;

/// Version written into freshly bootstrapped projects
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Canonical name forms of the package being bootstrapped
///
/// Built once from the destination directory and passed by reference to every
/// stage that needs it. All fields are plain functions of the directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    /// Kebab-case name, including an `@scope/` prefix if there is one
    pub kebab_name: String,
    /// Kebab-case name without the scope
    pub kebab_name_no_scope: String,
    /// UpperCamelCase form of the scope-less name
    pub upper_camel_name: String,
    /// `<name>/library`
    pub library_name: String,
    /// `<name>/test`
    pub test_name: String,
    pub version: String,
}

impl ProjectIdentity {
    /// Derive the identity from the final segment of a destination path
    pub fn from_path(destination: &Path) -> Self {
        let raw = destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_name(&raw)
    }

    /// Derive the identity from a raw directory name
    pub fn from_name(raw: &str) -> Self {
        let kebab_name = kebab_case(raw);
        let kebab_name_no_scope = remove_scope(&kebab_name).to_string();
        let upper_camel_name = upper_camel_case(&kebab_name_no_scope);

        Self {
            library_name: format!("{}/library", kebab_name_no_scope),
            test_name: format!("{}/test", kebab_name_no_scope),
            kebab_name,
            kebab_name_no_scope,
            upper_camel_name,
            version: DEFAULT_VERSION.to_string(),
        }
    }
}

/// Lowercase ASCII letters and digits, every other run of characters collapsed
/// into a single hyphen, no leading or trailing hyphen.
///
/// A leading `@scope/` is kept, with both halves kebab-cased on their own.
pub fn kebab_case(raw: &str) -> String {
    if let Some((scope, name)) = raw.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        let scope = collapse(scope);
        let name = collapse(name);
        if !scope.is_empty() && !name.is_empty() {
            return format!("@{}/{}", scope, name);
        }
    }
    collapse(raw)
}

fn collapse(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    if out.ends_with('-') {
        out.pop();
    }
    out
}

/// Strip an `@scope/` prefix, if any
pub fn remove_scope(kebab: &str) -> &str {
    match kebab.strip_prefix('@').and_then(|rest| rest.split_once('/')) {
        Some((_, name)) => name,
        None => kebab,
    }
}

/// `my-app` -> `MyApp`
pub fn upper_camel_case(kebab: &str) -> String {
    kebab.to_upper_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_plain_name() {
        let id = ProjectIdentity::from_name("my-app");
        assert_eq!(id.kebab_name, "my-app");
        assert_eq!(id.kebab_name_no_scope, "my-app");
        assert_eq!(id.upper_camel_name, "MyApp");
        assert_eq!(id.library_name, "my-app/library");
        assert_eq!(id.test_name, "my-app/test");
        assert_eq!(id.version, "0.0.0");
    }

    #[test]
    fn test_identity_from_path_uses_last_segment() {
        let id = ProjectIdentity::from_path(Path::new("/home/me/projects/Hello World"));
        assert_eq!(id.kebab_name, "hello-world");
        assert_eq!(id.upper_camel_name, "HelloWorld");
    }

    #[test]
    fn test_scoped_name() {
        let id = ProjectIdentity::from_name("@My Org/Cool_Lib");
        assert_eq!(id.kebab_name, "@my-org/cool-lib");
        assert_eq!(id.kebab_name_no_scope, "cool-lib");
        assert_eq!(id.upper_camel_name, "CoolLib");
        assert_eq!(id.library_name, "cool-lib/library");
    }

    #[test]
    fn test_kebab_collapses_separators() {
        assert_eq!(kebab_case("  Foo__Bar!!baz  "), "foo-bar-baz");
        assert_eq!(kebab_case("ALLCAPS"), "allcaps");
        assert_eq!(kebab_case("v2.0-beta"), "v2-0-beta");
        assert_eq!(kebab_case("héllo"), "h-llo");
    }

    #[test]
    fn test_empty_and_degenerate_names() {
        let id = ProjectIdentity::from_name("");
        assert_eq!(id.kebab_name, "");
        assert_eq!(id.upper_camel_name, "");
        assert_eq!(id.library_name, "/library");

        assert_eq!(kebab_case("---"), "");
        assert_eq!(kebab_case("@/x"), "x");
        assert_eq!(kebab_case("@scope/"), "scope");
        assert_eq!(ProjectIdentity::from_path(Path::new("/")).kebab_name, "");
    }

    #[test]
    fn test_kebab_is_idempotent() {
        let samples = [
            "",
            "my-app",
            "My App",
            "@Scope/Some Name",
            "@/x",
            "__init__",
            "a--b--c",
            "héllo wörld",
            "İstanbul",
            "trailing-",
            "-leading",
            "@a/b/c",
        ];
        for sample in samples {
            let once = kebab_case(sample);
            assert_eq!(kebab_case(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_remove_scope_without_scope() {
        assert_eq!(remove_scope("plain"), "plain");
        assert_eq!(remove_scope("@org/pkg"), "pkg");
    }
}
