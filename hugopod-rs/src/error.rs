//! Error types and exit codes for hugopod.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const VAULT_NOT_FOUND: i32 = 2;
    pub const INVALID_FRONTMATTER: i32 = 3;
    pub const CONFIG_ERROR: i32 = 4;
    pub const EXPORT_FAILED: i32 = 10;
}

/// Main error type for hugopod operations.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Vault not found at: {0}")]
    VaultNotFound(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Failed to serialize frontmatter for '{fname}': {source}")]
    Frontmatter {
        fname: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Note name '{0}' has no path segments")]
    InvalidName(String),

    #[error("Renderer failed for '{fname}': {message}")]
    Render { fname: String, message: String },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Export task for '{fname}' did not complete: {message}")]
    Task { fname: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0} of {1} notes failed to export")]
    BatchFailed(usize, usize),
}

impl ExportError {
    /// Name of the pipeline stage the error came from.
    pub fn stage(&self) -> &'static str {
        match self {
            ExportError::VaultNotFound(_) | ExportError::InvalidFrontmatter { .. } => "load",
            ExportError::ConfigError(_) | ExportError::TomlParse(_) => "config",
            ExportError::Frontmatter { .. } => "frontmatter",
            ExportError::InvalidName(_) => "path",
            ExportError::Render { .. } => "render",
            ExportError::CreateDir { .. } => "create-dir",
            ExportError::Write { .. } => "write",
            ExportError::Task { .. } => "task",
            ExportError::BatchFailed(..) => "export",
            _ => "io",
        }
    }

    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::VaultNotFound(_) => exit_code::VAULT_NOT_FOUND,
            ExportError::InvalidFrontmatter { .. } => exit_code::INVALID_FRONTMATTER,
            ExportError::ConfigError(_) | ExportError::TomlParse(_) => exit_code::CONFIG_ERROR,
            ExportError::BatchFailed(..) => exit_code::EXPORT_FAILED,
            _ => exit_code::GENERAL_ERROR,
        }
    }
}

/// Result type alias for hugopod operations.
pub type Result<T> = std::result::Result<T, ExportError>;
