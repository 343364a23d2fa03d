//! Configuration for bayes-rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BayesError, Result};

/// Main classifier configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct BayesConfig {
    /// Scoring parameters
    #[serde(flatten)]
    pub classifier: ClassifierConfig,
    /// Tokenizer settings
    #[serde(default)]
    pub lexer: LexerConfig,
    /// Degenerator settings
    #[serde(default)]
    pub degenerator: DegeneratorConfig,
}

/// Scoring parameters
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassifierConfig {
    /// Maximum number of distinct tokens used for a rating
    #[serde(default = "default_use_relevant")]
    pub use_relevant: usize,
    /// Minimum deviation from 0.5 a token needs to be counted
    #[serde(default = "default_min_dev")]
    pub min_dev: f64,
    /// Robinson's s: strength of the prior
    #[serde(default = "default_rob_s")]
    pub rob_s: f64,
    /// Robinson's x: rating assumed for completely unknown tokens
    #[serde(default = "default_rob_x")]
    pub rob_x: f64,
}

/// Tokenizer settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LexerConfig {
    /// Minimum token length in bytes
    #[serde(default = "default_min_size")]
    pub min_size: usize,
    /// Maximum token length in bytes
    #[serde(default = "default_max_size")]
    pub max_size: usize,
    /// Accept purely numeric tokens
    #[serde(default)]
    pub allow_numbers: bool,
    /// Extract URIs as whole tokens
    #[serde(default = "default_true")]
    pub get_uris: bool,
    /// Extract HTML tags
    #[serde(default)]
    pub get_html: bool,
    /// Extract BBCode tags
    #[serde(default)]
    pub get_bbcode: bool,
}

/// Degenerator settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DegeneratorConfig {
    /// Use full Unicode case mapping (ASCII only when disabled)
    #[serde(default = "default_true")]
    pub multibyte: bool,
    /// Text encoding, only UTF-8 is supported
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

fn default_use_relevant() -> usize {
    15
}

fn default_min_dev() -> f64 {
    0.2
}

fn default_rob_s() -> f64 {
    0.3
}

fn default_rob_x() -> f64 {
    0.5
}

fn default_min_size() -> usize {
    3
}

fn default_max_size() -> usize {
    30
}

fn default_true() -> bool {
    true
}

fn default_encoding() -> String {
    "UTF-8".to_string()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            use_relevant: default_use_relevant(),
            min_dev: default_min_dev(),
            rob_s: default_rob_s(),
            rob_x: default_rob_x(),
        }
    }
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            max_size: default_max_size(),
            allow_numbers: false,
            get_uris: true,
            get_html: false,
            get_bbcode: false,
        }
    }
}

impl Default for DegeneratorConfig {
    fn default() -> Self {
        Self {
            multibyte: true,
            encoding: default_encoding(),
        }
    }
}

impl BayesConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| BayesError::Config(format!("Failed to read config file: {}", e)))?;

        let config: BayesConfig = toml::from_str(&content)
            .map_err(|e| BayesError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let c = &self.classifier;

        if c.use_relevant == 0 {
            return Err(BayesError::Config(
                "use_relevant must be at least 1".to_string(),
            ));
        }

        if !(0.0..=0.5).contains(&c.min_dev) {
            return Err(BayesError::Config(format!(
                "min_dev must lie within [0, 0.5], got {}",
                c.min_dev
            )));
        }

        if c.rob_s.is_nan() || c.rob_s < 0.0 {
            return Err(BayesError::Config(format!(
                "rob_s must not be negative, got {}",
                c.rob_s
            )));
        }

        if !(0.0..=1.0).contains(&c.rob_x) {
            return Err(BayesError::Config(format!(
                "rob_x must lie within [0, 1], got {}",
                c.rob_x
            )));
        }

        if self.lexer.max_size == 0 || self.lexer.min_size > self.lexer.max_size {
            return Err(BayesError::Config(format!(
                "Invalid token size bounds: min_size={} max_size={}",
                self.lexer.min_size, self.lexer.max_size
            )));
        }

        let encoding = self.degenerator.encoding.to_ascii_lowercase();
        if encoding != "utf-8" && encoding != "utf8" {
            return Err(BayesError::Config(format!(
                "Unsupported encoding '{}', only UTF-8 is supported",
                self.degenerator.encoding
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = BayesConfig::default();
        assert_eq!(config.classifier.use_relevant, 15);
        assert_eq!(config.classifier.min_dev, 0.2);
        assert_eq!(config.classifier.rob_s, 0.3);
        assert_eq!(config.classifier.rob_x, 0.5);
        assert_eq!(config.lexer.min_size, 3);
        assert_eq!(config.lexer.max_size, 30);
        assert!(!config.lexer.allow_numbers);
        assert!(config.lexer.get_uris);
        assert!(!config.lexer.get_html);
        assert!(!config.lexer.get_bbcode);
        assert!(config.degenerator.multibyte);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
use_relevant = 10
rob_x = 0.4

[lexer]
min_size = 2
get_html = true
"#;
        let config: BayesConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.classifier.use_relevant, 10);
        assert_eq!(config.classifier.rob_x, 0.4);
        assert_eq!(config.classifier.min_dev, 0.2);
        assert_eq!(config.lexer.min_size, 2);
        assert_eq!(config.lexer.max_size, 30);
        assert!(config.lexer.get_html);
        assert!(config.lexer.get_uris);
        assert_eq!(config.degenerator.encoding, "UTF-8");
    }

    #[test]
    fn test_parse_empty_config() {
        let config: BayesConfig = toml::from_str("").unwrap();
        assert_eq!(config, BayesConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = BayesConfig::default();
        config.classifier.use_relevant = 0;
        assert!(config.validate().is_err());

        let mut config = BayesConfig::default();
        config.classifier.min_dev = 0.7;
        assert!(config.validate().is_err());

        let mut config = BayesConfig::default();
        config.classifier.rob_s = -1.0;
        assert!(config.validate().is_err());

        let mut config = BayesConfig::default();
        config.classifier.rob_x = 1.5;
        assert!(config.validate().is_err());

        let mut config = BayesConfig::default();
        config.lexer.min_size = 40;
        assert!(config.validate().is_err());

        let mut config = BayesConfig::default();
        config.degenerator.encoding = "ISO-8859-1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_dev = 0.1\n\n[degenerator]\nmultibyte = false").unwrap();

        let config = BayesConfig::from_file(file.path()).unwrap();
        assert_eq!(config.classifier.min_dev, 0.1);
        assert!(!config.degenerator.multibyte);
    }

    #[test]
    fn test_from_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rob_x = 2.0").unwrap();

        assert!(matches!(
            BayesConfig::from_file(file.path()),
            Err(BayesError::Config(_))
        ));
    }

    #[test]
    fn test_from_missing_file() {
        assert!(BayesConfig::from_file("/nonexistent/bayes.toml").is_err());
    }
}
