use crate::error::PortalConfigError;
use config::{Case, Config, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::{env::VarError, sync::LazyLock};
use typed_builder::TypedBuilder;

static HOST_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9-]*$").expect("valid host tag pattern")
});

/// How a portal builds its host element.
///
/// Use [`PortalConfig::builder`] in code, or load it from `LEPTOS_PORTAL_*` environment
/// variables and TOML with [`PortalConfig::try_from_env`] and [`get_config_from_str`].
#[derive(TypedBuilder, Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PortalConfig {
    /// The tag of the host element. Defaults to `leptos-portal`.
    #[builder(setter(into), default = default_host_tag())]
    pub host_tag: String,
    /// Mount the children inside an open shadow root on the host element, isolating their
    /// styles. Falls back to the host element itself where shadow roots are unsupported.
    #[builder(default)]
    pub use_shadow: bool,
    /// Create an SVG `<g>` instead of `host_tag`, for portals that render into an `<svg>`.
    #[builder(default)]
    pub is_svg: bool,
}

fn default_host_tag() -> String {
    "leptos-portal".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            host_tag: default_host_tag(),
            use_shadow: false,
            is_svg: false,
        }
    }
}

impl PortalConfig {
    /// The tag of the element that should be created for the host.
    pub fn element_tag(&self) -> &str {
        if self.is_svg {
            "g"
        } else {
            &self.host_tag
        }
    }

    /// Checks that `host_tag` is a usable element name.
    pub fn validate(self) -> Result<Self, PortalConfigError> {
        if HOST_TAG.is_match(&self.host_tag) {
            Ok(self)
        } else {
            Err(PortalConfigError::InvalidHostTag(self.host_tag))
        }
    }

    /// Reads the configuration from `LEPTOS_PORTAL_HOST_TAG`, `LEPTOS_PORTAL_USE_SHADOW` and
    /// `LEPTOS_PORTAL_IS_SVG`, with defaults for any that are unset.
    pub fn try_from_env() -> Result<Self, PortalConfigError> {
        PortalConfig {
            host_tag: env_w_default("LEPTOS_PORTAL_HOST_TAG", "leptos-portal")?,
            use_shadow: env_bool("LEPTOS_PORTAL_USE_SHADOW")?,
            is_svg: env_bool("LEPTOS_PORTAL_IS_SVG")?,
        }
        .validate()
    }
}

fn env_w_default(
    key: &str,
    default: &str,
) -> Result<String, PortalConfigError> {
    match std::env::var(key) {
        Ok(val) => Ok(val),
        Err(VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(PortalConfigError::ConfigError(format!("{key}: {e}"))),
    }
}

fn env_bool(key: &str) -> Result<bool, PortalConfigError> {
    env_w_default(key, "false")?.to_lowercase().parse().map_err(|_| {
        PortalConfigError::ConfigError(format!("{key}: expected true or false"))
    })
}

/// Loads the configuration from TOML text, e.g.
///
/// ```toml
/// host-tag = "app-overlay"
/// use-shadow = true
/// ```
///
/// `LEPTOS_PORTAL_*` environment variables take precedence over the text.
pub fn get_config_from_str(text: &str) -> Result<PortalConfig, PortalConfigError> {
    let settings = Config::builder()
        .add_source(File::from_str(text, FileFormat::Toml))
        .add_source(
            Environment::with_prefix("LEPTOS_PORTAL")
                .convert_case(Case::Kebab)
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<PortalConfig>()?.validate()
}

/// Loads the configuration from a TOML file at `path`, with the same environment overrides as
/// [`get_config_from_str`].
pub fn get_config_from_file(
    path: impl AsRef<std::path::Path>,
) -> Result<PortalConfig, PortalConfigError> {
    let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        PortalConfigError::ConfigError(format!(
            "{}: {e}",
            path.as_ref().display()
        ))
    })?;
    get_config_from_str(&text)
}
