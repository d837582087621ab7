//! Configuration types for markguard analysis.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from an
//! external file. Every field is optional and falls back to the conventions
//! of the `@kitajs/html` runtime.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`RulesConfig`] - Naming conventions and type identities used by the
//!   analysis.
//!
//! # Example
//!
//! ```
//! # use markguard::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.rules().to_rules().is_ok());
//! ```

use serde::Deserialize;

use markguard_analyzer::Rules;
use markguard_core::types::TypeAlias;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rule configuration section.
    #[serde(default)]
    rules: RulesConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the given rule section.
    pub fn new(rules: RulesConfig) -> Self {
        Self { rules }
    }

    /// Returns the rule configuration.
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }
}

/// The `[rules]` section.
///
/// Unset fields keep the [`Rules`] defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulesConfig {
    /// Attribute text that puts an element in asserted-safe mode.
    #[serde(default)]
    marker_attribute: Option<String>,

    /// Tags whose content is never checked.
    #[serde(default)]
    exempt_tags: Option<Vec<String>>,

    #[serde(default)]
    safe_prefix: Option<String>,

    #[serde(default)]
    unsafe_prefix: Option<String>,

    /// Name of the escaping function, matched case-insensitively.
    #[serde(default)]
    escape_function: Option<String>,

    /// Alias of the rendered-markup type, as `Scope.Name`.
    #[serde(default)]
    rendered_markup: Option<String>,

    /// Alias of the pre-sanitized children type, as `Scope.Name`.
    #[serde(default)]
    sanitized_children: Option<String>,
}

impl RulesConfig {
    /// Set the marker attribute (builder style).
    pub fn with_marker_attribute(mut self, marker: impl Into<String>) -> Self {
        self.marker_attribute = Some(marker.into());
        self
    }

    /// Set the escaping function name (builder style).
    pub fn with_escape_function(mut self, name: impl Into<String>) -> Self {
        self.escape_function = Some(name.into());
        self
    }

    /// Set the rendered-markup alias (builder style).
    pub fn with_rendered_markup(mut self, alias: impl Into<String>) -> Self {
        self.rendered_markup = Some(alias.into());
        self
    }

    /// Build the analysis [`Rules`], applying every configured override.
    ///
    /// # Errors
    ///
    /// Returns an error if a name is empty or a type alias is not of the
    /// form `Name` or `Scope.Name`.
    pub fn to_rules(&self) -> Result<Rules, String> {
        let mut rules = Rules::default();

        if let Some(marker) = &self.marker_attribute {
            rules = rules.with_marker_attribute(non_empty("marker_attribute", marker)?);
        }
        if let Some(tags) = &self.exempt_tags {
            rules = rules.with_exempt_tags(tags.iter().map(String::as_str));
        }
        if let Some(prefix) = &self.safe_prefix {
            rules = rules.with_safe_prefix(non_empty("safe_prefix", prefix)?);
        }
        if let Some(prefix) = &self.unsafe_prefix {
            rules = rules.with_unsafe_prefix(non_empty("unsafe_prefix", prefix)?);
        }
        if let Some(name) = &self.escape_function {
            rules = rules.with_escape_function(non_empty("escape_function", name)?);
        }
        if let Some(alias) = &self.rendered_markup {
            rules = rules.with_rendered_markup(parse_alias("rendered_markup", alias)?);
        }
        if let Some(alias) = &self.sanitized_children {
            rules = rules.with_sanitized_children(parse_alias("sanitized_children", alias)?);
        }

        Ok(rules)
    }
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str, String> {
    if value.trim().is_empty() {
        return Err(format!("Invalid {key} in config: value must not be empty"));
    }
    Ok(value)
}

fn parse_alias(key: &str, value: &str) -> Result<TypeAlias, String> {
    value
        .parse()
        .map_err(|err| format!("Invalid {key} in config: {err}"))
}
