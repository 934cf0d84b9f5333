//! Core types and structures for alias-forge

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::{AliasForgeError, Result};
use crate::variant::{DEFAULT_CHUNK_SIZE, RECOMMENDED_MAX_USERNAME_LENGTH};

/// Tags offered when the user has not typed any
pub const DEFAULT_TAGS: &str = "newsletter\nshopping\nwork\nsocial\ntesting";

/// Variation scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Dot insertion between username characters
    #[default]
    Dot,
    /// Separator + tag appended to the username
    Plus,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Dot => write!(f, "dot"),
            Mode::Plus => write!(f, "plus"),
        }
    }
}

impl FromStr for Mode {
    type Err = AliasForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dot" | "dots" => Ok(Mode::Dot),
            "plus" | "tag" | "tags" => Ok(Mode::Plus),
            other => Err(AliasForgeError::validation(format!("Unknown mode: {}", other))),
        }
    }
}

/// Character placed between the username and a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Separator {
    #[default]
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "_")]
    Underscore,
    #[serde(rename = "-")]
    Hyphen,
}

impl Separator {
    /// All supported separators, in menu order
    pub const ALL: [Separator; 3] = [Separator::Plus, Separator::Underscore, Separator::Hyphen];

    pub fn as_char(&self) -> char {
        match self {
            Separator::Plus => '+',
            Separator::Underscore => '_',
            Separator::Hyphen => '-',
        }
    }

    /// Menu label, e.g. "Plus (+)"
    pub fn label(&self) -> &'static str {
        match self {
            Separator::Plus => "Plus (+)",
            Separator::Underscore => "Underscore (_)",
            Separator::Hyphen => "Hyphen (-)",
        }
    }
}

impl std::fmt::Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Separator {
    type Err = AliasForgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "+" | "plus" => Ok(Separator::Plus),
            "_" | "underscore" => Ok(Separator::Underscore),
            "-" | "hyphen" => Ok(Separator::Hyphen),
            other => Err(AliasForgeError::validation(format!(
                "Unknown separator '{}' (expected +, _ or -)",
                other
            ))),
        }
    }
}

/// One generated candidate address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariationResult {
    pub email: String,
    /// Always false at generation time; set by the store afterwards
    pub is_favorite: bool,
    /// Input address that produced this result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_email: Option<String>,
}

impl VariationResult {
    pub fn new(email: String, source_email: &str) -> Self {
        Self {
            email,
            is_favorite: false,
            source_email: Some(source_email.to_string()),
        }
    }

    /// Number of dots in the local-part
    pub fn dot_count(&self) -> usize {
        let local = self.email.split('@').next().unwrap_or_default();
        local.matches('.').count()
    }

    /// Case-insensitive substring match; an empty filter matches everything
    pub fn matches_filter(&self, filter: &str) -> bool {
        filter.is_empty() || self.email.to_lowercase().contains(&filter.to_lowercase())
    }
}

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub mode: Mode,
    pub separator: Separator,
    /// Free-text tag list (newline or comma separated)
    pub tags: String,
    /// Results per chunk for dot generation
    pub chunk_size: usize,
    /// Username length above which a soft warning is raised
    pub warn_length: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Dot,
            separator: Separator::Plus,
            tags: DEFAULT_TAGS.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            warn_length: RECOMMENDED_MAX_USERNAME_LENGTH,
        }
    }
}

impl GenerationConfig {
    /// Defaults overlaid with `ALIAS_FORGE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(value) = env::var("ALIAS_FORGE_CHUNK_SIZE") {
            config.chunk_size = parse_positive("ALIAS_FORGE_CHUNK_SIZE", &value)?;
        }
        if let Ok(value) = env::var("ALIAS_FORGE_WARN_LENGTH") {
            config.warn_length = parse_positive("ALIAS_FORGE_WARN_LENGTH", &value)?;
        }
        if let Ok(value) = env::var("ALIAS_FORGE_SEPARATOR") {
            config.separator = value
                .parse()
                .map_err(|_| crate::config_error!("ALIAS_FORGE_SEPARATOR must be +, _ or -, got '{}'", value))?;
        }
        if let Ok(value) = env::var("ALIAS_FORGE_TAGS") {
            config.tags = value;
        }

        Ok(config)
    }
}

fn parse_positive(name: &str, value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(crate::config_error!("{} must be a positive integer, got '{}'", name, value)),
    }
}
