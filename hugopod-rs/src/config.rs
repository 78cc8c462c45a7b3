//! Export pod configuration.

use crate::error::{ExportError, Result};
use crate::path::DEFAULT_EXTENSION;
use crate::rewrite::{Shortcodes, DEFAULT_PORTAL_SHORTCODE, DEFAULT_REF_SHORTCODE};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Configuration consumed by the export host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodConfig {
    /// Name of the note exported as the vault's top-level `_index`.
    pub fname: String,

    /// Name of the vault to export.
    pub vault_name: String,

    /// Whether placeholder notes for missing ancestors are written.
    pub include_stubs: bool,

    /// Content file extension.
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_portal_shortcode")]
    pub portal_shortcode: String,

    #[serde(default = "default_ref_shortcode")]
    pub ref_shortcode: String,

    /// Any other keys, kept for the host.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_portal_shortcode() -> String {
    DEFAULT_PORTAL_SHORTCODE.to_string()
}

fn default_ref_shortcode() -> String {
    DEFAULT_REF_SHORTCODE.to_string()
}

impl PodConfig {
    pub fn new(fname: impl Into<String>, vault_name: impl Into<String>) -> Self {
        Self {
            fname: fname.into(),
            vault_name: vault_name.into(),
            include_stubs: false,
            extension: default_extension(),
            portal_shortcode: default_portal_shortcode(),
            ref_shortcode: default_ref_shortcode(),
            extra: BTreeMap::new(),
        }
    }

    /// Load a config file. The format is picked from the extension:
    /// `.toml`, `.yml`/`.yaml` or `.json`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ExportError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let config: PodConfig = match ext.as_deref() {
            Some("toml") => toml::from_str(&content)?,
            Some("yml") | Some("yaml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(ExportError::ConfigError(format!(
                    "unsupported config format: {}",
                    path.display()
                )));
            }
        };
        Ok(config)
    }

    /// Default config location: `<config dir>/hugopod/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hugopod").join("config.toml"))
    }

    /// Load from `path` if given, else from [`PodConfig::default_path`] if
    /// that file exists.
    pub fn discover(path: Option<&Path>) -> Result<Option<Self>> {
        match path {
            Some(path) => Self::load(path).map(Some),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load(&path).map(Some),
                _ => Ok(None),
            },
        }
    }

    pub fn shortcodes(&self) -> Shortcodes {
        Shortcodes {
            portal: self.portal_shortcode.clone(),
            reference: self.ref_shortcode.clone(),
        }
    }

    /// JSON schema of the options, as presented to hosts.
    pub fn schema() -> serde_json::Value {
        json!({
            "type": "object",
            "required": ["fname", "vaultName", "includeStubs"],
            "properties": {
                "fname": {
                    "type": "string",
                    "description": "name of the note exported as the vault index",
                },
                "vaultName": {
                    "type": "string",
                    "description": "name of the vault to export",
                },
                "includeStubs": {
                    "type": "boolean",
                    "description": "write placeholder notes for missing ancestors",
                },
                "extension": {
                    "type": "string",
                    "default": DEFAULT_EXTENSION,
                },
                "portalShortcode": {
                    "type": "string",
                    "default": DEFAULT_PORTAL_SHORTCODE,
                },
                "refShortcode": {
                    "type": "string",
                    "default": DEFAULT_REF_SHORTCODE,
                },
            },
            "additionalProperties": true,
        })
    }
}
