mod common;

use bootstrap_core::{CreateArgs, ProjectIdentity, SetupConfig, SetupError, TemplateSource};
use common::TestProduct;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn resolve(args: &CreateArgs, env: &[(&str, &str)]) -> Result<SetupConfig, SetupError> {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    SetupConfig::resolve_with(
        &TestProduct,
        args,
        Path::new("/work"),
        Some(Path::new("/opt/testy/bin")),
        |key| env.get(key).cloned(),
    )
}

#[test]
fn test_defaults() {
    let setup = resolve(&CreateArgs::default(), &[]).unwrap();

    match &setup.source {
        TemplateSource::Remote(url) => assert_eq!(
            url.as_str(),
            "https://github.com/example/testy-template/archive/master.zip"
        ),
        other => panic!("unexpected source {:?}", other),
    }
    assert_eq!(setup.destination, PathBuf::from("/work"));
    assert_eq!(
        setup.bundle_root,
        PathBuf::from("/opt/testy/bin/templates/testy")
    );
    assert!(!setup.use_defaults);
}

#[test]
fn test_env_overrides_default_and_flag_overrides_env() {
    let env = [("TESTY_TEMPLATE", "bundled"), ("TESTY_TEMPLATE_DIR", "/srv/bundle")];

    let from_env = resolve(&CreateArgs::default(), &env).unwrap();
    assert_eq!(from_env.source, TemplateSource::Bundled);
    assert_eq!(from_env.bundle_root, PathBuf::from("/srv/bundle"));

    let args = CreateArgs {
        template: Some("https://example.com/t.zip".to_string()),
        template_dir: Some(PathBuf::from("local-bundle")),
        ..Default::default()
    };
    let from_flags = resolve(&args, &env).unwrap();
    assert!(matches!(from_flags.source, TemplateSource::Remote(_)));
    assert_eq!(from_flags.bundle_root, PathBuf::from("/work/local-bundle"));
}

#[test]
fn test_blank_env_is_ignored() {
    let setup = resolve(&CreateArgs::default(), &[("TESTY_TEMPLATE", "  ")]).unwrap();
    assert!(matches!(setup.source, TemplateSource::Remote(_)));
}

#[test]
fn test_directory_and_yes() {
    let relative = CreateArgs {
        directory: Some(PathBuf::from("my-app")),
        yes: true,
        ..Default::default()
    };
    let setup = resolve(&relative, &[]).unwrap();
    assert_eq!(setup.destination, PathBuf::from("/work/my-app"));
    assert!(setup.use_defaults);

    let absolute = CreateArgs {
        directory: Some(PathBuf::from("/elsewhere/app")),
        ..Default::default()
    };
    assert_eq!(
        resolve(&absolute, &[]).unwrap().destination,
        PathBuf::from("/elsewhere/app")
    );
}

#[test]
fn test_unrecognized_source_is_configuration_error() {
    let args = CreateArgs {
        template: Some("svn://example.com/repo".to_string()),
        ..Default::default()
    };
    let err = resolve(&args, &[]).unwrap_err();
    assert!(matches!(err, SetupError::Configuration(_)));
    assert_eq!(err.step(), None);
}

#[test]
fn test_parent_directory_resolves_to_named_destination() {
    let args = CreateArgs {
        directory: Some(PathBuf::from("..")),
        ..Default::default()
    };
    let setup = SetupConfig::resolve_with(
        &TestProduct,
        &args,
        Path::new("/work/my-app/sub"),
        None,
        |_| None,
    )
    .unwrap();

    assert_eq!(setup.destination, PathBuf::from("/work/my-app"));
    assert_eq!(ProjectIdentity::from_path(&setup.destination).kebab_name, "my-app");

    let dotted = CreateArgs {
        directory: Some(PathBuf::from("./other/../my-app/.")),
        ..Default::default()
    };
    assert_eq!(
        resolve(&dotted, &[]).unwrap().destination,
        PathBuf::from("/work/my-app")
    );
}
