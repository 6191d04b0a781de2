//! Rendering parameters and their LaTeX presets
//!
//! Parameters are an open map from dotted key names to values. Only a few keys
//! (see [`keys`]) carry meaning for this crate; everything else is passed
//! through untouched to the renderer.

pub mod scoped;
pub mod state;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

pub use scoped::{StyleGuard, TempStyle};
pub use state::{OriginalState, StyleState};

/// Recognised parameter keys
pub mod keys {
    pub const PGF_TEXSYSTEM: &str = "pgf.texsystem";
    pub const PGF_PREAMBLE: &str = "pgf.preamble";
    pub const TEXT_USETEX: &str = "text.usetex";
    pub const FONT_FAMILY: &str = "font.family";
    pub const FONT_SERIF: &str = "font.serif";
    pub const FONT_SANS_SERIF: &str = "font.sans-serif";
    pub const FONT_MONOSPACE: &str = "font.monospace";
    pub const FONT_SIZE: &str = "font.size";
    pub const AXES_LABELSIZE: &str = "axes.labelsize";
    pub const AXES_TITLESIZE: &str = "axes.titlesize";
    pub const LEGEND_FONTSIZE: &str = "legend.fontsize";
    pub const XTICK_LABELSIZE: &str = "xtick.labelsize";
    pub const YTICK_LABELSIZE: &str = "ytick.labelsize";
    pub const SAVEFIG_DPI: &str = "savefig.dpi";
    pub const LINES_LINEWIDTH: &str = "lines.linewidth";

    /// Keys that follow the base font size
    pub const FONT_SIZE_KEYS: [&str; 6] = [
        FONT_SIZE,
        AXES_LABELSIZE,
        AXES_TITLESIZE,
        LEGEND_FONTSIZE,
        XTICK_LABELSIZE,
        YTICK_LABELSIZE,
    ];
}

/// Font size used by the LaTeX preset, in points
pub const LATEX_FONT_SIZE: f64 = 8.0;

/// Errors that can occur when loading a style configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read style configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse style configuration TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A single parameter value
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StyleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            StyleValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(f64::from(value))
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<Vec<String>> for StyleValue {
    fn from(value: Vec<String>) -> Self {
        StyleValue::List(value)
    }
}

impl From<Vec<&str>> for StyleValue {
    fn from(value: Vec<&str>) -> Self {
        StyleValue::List(value.into_iter().map(String::from).collect())
    }
}

/// Ordered map of rendering parameters
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct StyleParameters {
    values: BTreeMap<String, StyleValue>,
}

impl StyleParameters {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a parameter, returning the previous value
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(StyleValue::as_number)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(StyleValue::as_bool)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(StyleValue::as_text)
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(StyleValue::as_list)
    }

    /// Font size for `key`, falling back to `font.size`
    ///
    /// Non-numeric sizes (e.g. `"large"`) are treated as unset.
    pub fn font_size(&self, key: &str) -> f64 {
        self.number(key)
            .or_else(|| self.number(keys::FONT_SIZE))
            .unwrap_or(10.0)
    }

    /// Overwrite keys present in `other`, keeping all others
    pub fn merge(&mut self, other: &StyleParameters) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameters matching a typical LaTeX article
    ///
    /// Text goes through XeLaTeX with serif fonts inherited from the document,
    /// and every font size is set to 8pt.
    pub fn latex() -> Self {
        let mut params = Self::new()
            .with(keys::PGF_TEXSYSTEM, "xelatex")
            .with(keys::TEXT_USETEX, true)
            .with(keys::FONT_FAMILY, "serif")
            .with(keys::FONT_SERIF, Vec::<String>::new())
            .with(keys::FONT_SANS_SERIF, Vec::<String>::new())
            .with(keys::FONT_MONOSPACE, Vec::<String>::new())
            .with(
                keys::PGF_PREAMBLE,
                vec![r"\usepackage[utf8x]{inputenc}", r"\usepackage[T1]{fontenc}"],
            );
        for key in keys::FONT_SIZE_KEYS {
            params.set(key, LATEX_FONT_SIZE);
        }
        params
    }

    /// Baseline parameters of the built-in renderer
    pub fn engine_defaults() -> Self {
        let mut params = Self::new()
            .with(keys::PGF_TEXSYSTEM, "pdflatex")
            .with(keys::PGF_PREAMBLE, Vec::<String>::new())
            .with(keys::TEXT_USETEX, false)
            .with(keys::FONT_FAMILY, "sans-serif")
            .with(keys::FONT_SERIF, vec!["DejaVu Serif", "Times New Roman"])
            .with(keys::FONT_SANS_SERIF, vec!["DejaVu Sans", "Arial"])
            .with(keys::FONT_MONOSPACE, vec!["DejaVu Sans Mono", "Courier New"])
            .with(keys::SAVEFIG_DPI, 100.0)
            .with(keys::LINES_LINEWIDTH, 1.5);
        for key in keys::FONT_SIZE_KEYS {
            params.set(key, 10.0);
        }
        params
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A style loaded from a TOML file: parameters plus an optional backend
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub backend: Option<String>,
    #[serde(default)]
    pub params: StyleParameters,
}

impl StyleConfig {
    /// Load a style configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a style configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_preset_sizes() {
        let params = StyleParameters::latex();
        for key in keys::FONT_SIZE_KEYS {
            assert_eq!(params.number(key), Some(LATEX_FONT_SIZE), "{}", key);
        }
        assert_eq!(params.flag(keys::TEXT_USETEX), Some(true));
        assert_eq!(params.text(keys::FONT_FAMILY), Some("serif"));
        assert_eq!(params.list(keys::FONT_SERIF), Some(&[][..]));
        assert_eq!(params.list(keys::PGF_PREAMBLE).map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_merge_overwrites_and_keeps() {
        let mut params = StyleParameters::new().with("a", 1).with("b", "x");
        params.merge(&StyleParameters::new().with("b", "y").with("c", true));
        assert_eq!(params.number("a"), Some(1.0));
        assert_eq!(params.text("b"), Some("y"));
        assert_eq!(params.flag("c"), Some(true));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_font_size_fallback() {
        let params = StyleParameters::new()
            .with(keys::FONT_SIZE, 9.0)
            .with(keys::AXES_TITLESIZE, "large");
        assert_eq!(params.font_size(keys::AXES_LABELSIZE), 9.0);
        assert_eq!(params.font_size(keys::AXES_TITLESIZE), 9.0);
        assert_eq!(StyleParameters::new().font_size(keys::FONT_SIZE), 10.0);
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
backend = "pgf"

[params]
"font.size" = 9
"font.family" = "serif"
"font.serif" = ["Palatino"]
"text.usetex" = true
"lines.linewidth" = 0.8
"#;
        let config = StyleConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.backend.as_deref(), Some("pgf"));
        assert_eq!(config.params.number(keys::FONT_SIZE), Some(9.0));
        assert_eq!(config.params.text(keys::FONT_FAMILY), Some("serif"));
        assert_eq!(
            config.params.list(keys::FONT_SERIF),
            Some(&["Palatino".to_string()][..])
        );
        assert_eq!(config.params.flag(keys::TEXT_USETEX), Some(true));
        assert_eq!(config.params.number(keys::LINES_LINEWIDTH), Some(0.8));
    }

    #[test]
    fn test_parse_config_without_backend() {
        let config = StyleConfig::from_str("[params]\n\"font.size\" = 11\n").expect("Should parse");
        assert_eq!(config.backend, None);
        assert_eq!(config.params.len(), 1);
    }

    #[test]
    fn test_invalid_config_error() {
        let result = StyleConfig::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
