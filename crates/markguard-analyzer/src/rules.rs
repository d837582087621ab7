//! Naming conventions and type identities the analysis relies on.

use markguard_core::types::TypeAlias;
use regex::{Regex, RegexBuilder};

/// The tunable parts of the analysis.
///
/// The defaults follow the conventions of the `@kitajs/html` runtime: a bare
/// `safe` attribute, `escapeHtml(...)` calls, `safe`/`unsafe` variable
/// prefixes, `JSX.Element` for rendered markup and `Html.Children` for
/// pre-sanitized children.
///
/// # Example
///
/// ```
/// # use markguard_analyzer::Rules;
/// let rules = Rules::default().with_escape_function("sanitize");
///
/// assert!(rules.is_escape_call("Html.SANITIZE(name)"));
/// assert!(!rules.is_escape_call("escapeHtml(name)"));
/// ```
#[derive(Debug, Clone)]
pub struct Rules {
    marker_attribute: String,
    exempt_tags: Vec<String>,
    safe_prefix: String,
    unsafe_prefix: String,
    escape_function: String,
    escape_call: Regex,
    rendered_markup: TypeAlias,
    sanitized_children: TypeAlias,
}

impl Default for Rules {
    fn default() -> Self {
        let escape_function = "escapeHtml".to_string();
        Self {
            marker_attribute: "safe".to_string(),
            exempt_tags: vec!["script".to_string()],
            safe_prefix: "safe".to_string(),
            unsafe_prefix: "unsafe".to_string(),
            escape_call: escape_call_pattern(&escape_function),
            escape_function,
            rendered_markup: TypeAlias::scoped("JSX", "Element"),
            sanitized_children: TypeAlias::scoped("Html", "Children"),
        }
    }
}

impl Rules {
    /// Set the attribute text that puts an element in asserted-safe mode.
    pub fn with_marker_attribute(mut self, marker: impl Into<String>) -> Self {
        self.marker_attribute = marker.into();
        self
    }

    /// Replace the tags whose content is never checked.
    pub fn with_exempt_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.exempt_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the expression prefix that asserts a value is already safe.
    pub fn with_safe_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.safe_prefix = prefix.into();
        self
    }

    /// Set the expression prefix that marks a value as deliberately unsafe.
    pub fn with_unsafe_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.unsafe_prefix = prefix.into();
        self
    }

    /// Set the name of the escaping function.
    pub fn with_escape_function(mut self, name: impl Into<String>) -> Self {
        self.escape_function = name.into();
        self.escape_call = escape_call_pattern(&self.escape_function);
        self
    }

    /// Set the alias of the rendered-markup type (`JSX.Element`).
    pub fn with_rendered_markup(mut self, alias: TypeAlias) -> Self {
        self.rendered_markup = alias;
        self
    }

    /// Set the alias of the pre-sanitized children type (`Html.Children`).
    pub fn with_sanitized_children(mut self, alias: TypeAlias) -> Self {
        self.sanitized_children = alias;
        self
    }

    pub fn marker_attribute(&self) -> &str {
        &self.marker_attribute
    }

    pub fn exempt_tags(&self) -> &[String] {
        &self.exempt_tags
    }

    pub fn escape_function(&self) -> &str {
        &self.escape_function
    }

    pub fn rendered_markup(&self) -> &TypeAlias {
        &self.rendered_markup
    }

    pub fn sanitized_children(&self) -> &TypeAlias {
        &self.sanitized_children
    }

    /// Tags compared exactly, e.g. `script` but not `Script`.
    pub fn is_exempt_tag(&self, tag: &str) -> bool {
        self.exempt_tags.iter().any(|exempt| exempt == tag)
    }

    pub fn has_safe_prefix(&self, text: &str) -> bool {
        text.starts_with(&self.safe_prefix)
    }

    pub fn has_unsafe_prefix(&self, text: &str) -> bool {
        text.starts_with(&self.unsafe_prefix)
    }

    /// Matches `escapeHtml(` at the start of `text`, optionally qualified
    /// (`Html.escapeHtml(`), ignoring case.
    pub fn is_escape_call(&self, text: &str) -> bool {
        self.escape_call.is_match(text)
    }
}

fn escape_call_pattern(name: &str) -> Regex {
    RegexBuilder::new(&format!(r"^(?:.+\.)?{}\(", regex::escape(name)))
        .case_insensitive(true)
        .build()
        .expect("escaped function name always forms a valid pattern")
}
