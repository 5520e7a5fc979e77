use leptos_portal::{
    error::PortalConfigError, get_config_from_file, get_config_from_str,
    PortalConfig,
};
use std::{fs::File, io::Write};
use tempfile::NamedTempFile;

const UNSET: [(&str, Option<&str>); 3] = [
    ("LEPTOS_PORTAL_HOST_TAG", None),
    ("LEPTOS_PORTAL_USE_SHADOW", None),
    ("LEPTOS_PORTAL_IS_SVG", None),
];

const CONFIG_OK: &str = r#"
host-tag = "app-overlay"
use-shadow = true
"#;

#[test]
fn defaults() {
    let config = PortalConfig::default();
    assert_eq!(config.host_tag, "leptos-portal");
    assert!(!config.use_shadow);
    assert!(!config.is_svg);
    assert_eq!(config.element_tag(), "leptos-portal");
    assert_eq!(PortalConfig::builder().build(), config);
}

#[test]
fn svg_uses_group_element() {
    let config = PortalConfig::builder().is_svg(true).build();
    assert_eq!(config.element_tag(), "g");
}

#[test]
fn try_from_env_defaults() {
    let config =
        temp_env::with_vars(UNSET, || PortalConfig::try_from_env().unwrap());
    assert_eq!(config, PortalConfig::default());
}

#[test]
fn try_from_env_reads_vars() {
    let config = temp_env::with_vars(
        [
            ("LEPTOS_PORTAL_HOST_TAG", Some("my-portal")),
            ("LEPTOS_PORTAL_USE_SHADOW", Some("TRUE")),
            ("LEPTOS_PORTAL_IS_SVG", Some("false")),
        ],
        || PortalConfig::try_from_env().unwrap(),
    );
    assert_eq!(config.host_tag, "my-portal");
    assert!(config.use_shadow);
    assert!(!config.is_svg);
}

#[test]
fn try_from_env_rejects_bad_values() {
    let err = temp_env::with_vars(
        [
            ("LEPTOS_PORTAL_HOST_TAG", None),
            ("LEPTOS_PORTAL_USE_SHADOW", Some("sometimes")),
            ("LEPTOS_PORTAL_IS_SVG", None),
        ],
        PortalConfig::try_from_env,
    );
    assert!(matches!(err, Err(PortalConfigError::ConfigError(_))));

    let err = temp_env::with_vars(
        [
            ("LEPTOS_PORTAL_HOST_TAG", Some("<script>")),
            ("LEPTOS_PORTAL_USE_SHADOW", None),
            ("LEPTOS_PORTAL_IS_SVG", None),
        ],
        PortalConfig::try_from_env,
    );
    assert!(matches!(err, Err(PortalConfigError::InvalidHostTag(tag)) if tag == "<script>"));
}

#[test]
fn from_str_ok() {
    let config =
        temp_env::with_vars(UNSET, || get_config_from_str(CONFIG_OK).unwrap());
    assert_eq!(config.host_tag, "app-overlay");
    assert!(config.use_shadow);
    assert!(!config.is_svg);
}

#[test]
fn from_str_empty_is_default() {
    let config = temp_env::with_vars(UNSET, || get_config_from_str("").unwrap());
    assert_eq!(config, PortalConfig::default());
}

#[test]
fn env_overrides_str() {
    let config = temp_env::with_vars(
        [
            ("LEPTOS_PORTAL_HOST_TAG", Some("env-portal")),
            ("LEPTOS_PORTAL_USE_SHADOW", None),
            ("LEPTOS_PORTAL_IS_SVG", None),
        ],
        || get_config_from_str(CONFIG_OK).unwrap(),
    );
    assert_eq!(config.host_tag, "env-portal");
    assert!(config.use_shadow);
}

#[test]
fn from_str_invalid_toml() {
    let err = temp_env::with_vars(UNSET, || {
        get_config_from_str("- invalid toml -")
    });
    assert!(matches!(err, Err(PortalConfigError::ConfigError(_))));
}

#[test]
fn from_str_invalid_host_tag() {
    let err = temp_env::with_vars(UNSET, || {
        get_config_from_str(r#"host-tag = "9lives""#)
    });
    assert!(matches!(err, Err(PortalConfigError::InvalidHostTag(_))));
}

#[test]
fn from_file_ok() {
    let tmp = NamedTempFile::new().unwrap();
    {
        let mut output = File::create(&tmp).unwrap();
        write!(output, "{CONFIG_OK}").unwrap();
    }

    let config =
        temp_env::with_vars(UNSET, || get_config_from_file(tmp.path()).unwrap());
    assert_eq!(config.host_tag, "app-overlay");
    assert!(config.use_shadow);
}

#[test]
fn from_file_missing() {
    let err = get_config_from_file("this/file/does/not/exist.toml");
    assert!(matches!(err, Err(PortalConfigError::ConfigError(_))));
}
