use blockforge_compiler_css::{DEFAULT_CLASS_PREFIX, DEFAULT_SCOPE_SELECTOR};
use blockforge_compiler_html::ExportOptions;
use blockforge_editor::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "blockforge.config.json";

/// Blockforge configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Container selector external stylesheets are scoped to
    #[serde(default = "default_scope_selector")]
    pub scope_selector: String,

    /// Prefix for generated style classes
    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,

    /// HTML export defaults
    #[serde(default)]
    pub export: ExportOptions,

    /// Editing defaults
    #[serde(default)]
    pub editor: EditorConfig,
}

fn default_scope_selector() -> String {
    DEFAULT_SCOPE_SELECTOR.to_string()
}

fn default_class_prefix() -> String {
    DEFAULT_CLASS_PREFIX.to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    /// Resolve a command-line path against the working directory
    pub fn resolve(cwd: &str, path: impl AsRef<Path>) -> PathBuf {
        PathBuf::from(cwd).join(path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scope_selector: default_scope_selector(),
            class_prefix: default_class_prefix(),
            export: ExportOptions::default(),
            editor: EditorConfig::default(),
        }
    }
}
