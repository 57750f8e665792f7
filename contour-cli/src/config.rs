//! Configuration loading from `.contour.toml`.
//!
//! The config file is optional; every section falls back to defaults.
//! Parse errors are logged as warnings and never fail a run.
//!
//! ```toml
//! [scanner]
//! ignore = ["vendor/", "dist/"]
//! max_file_size_kb = 1024
//! follow_symlinks = false
//!
//! [output]
//! pretty = true
//! color = true
//! ```

use std::path::Path;

use serde::Deserialize;

/// Default ignore patterns always applied in addition to .gitignore.
const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git/",
    "node_modules/",
    "__pycache__/",
    "*.pyc",
    ".venv/",
    "venv/",
    "target/",
    "dist/",
    "build/",
];

#[derive(Debug, Deserialize, Default)]
pub struct ContourConfig {
    #[serde(default)]
    pub scanner: ScannerSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct ScannerSettings {
    /// Extra glob patterns to exclude during scanning.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Maximum file size to extract, in kilobytes.
    #[serde(default)]
    pub max_file_size_kb: Option<u64>,

    #[serde(default)]
    pub follow_symlinks: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Pretty-print JSON by default.
    #[serde(default)]
    pub pretty: Option<bool>,

    /// Force colored output on or off.
    #[serde(default)]
    pub color: Option<bool>,
}

impl ContourConfig {
    /// Load `.contour.toml` from `root`, falling back to defaults.
    pub fn load(root: &Path) -> Self {
        let path = root.join(".contour.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!("failed to parse .contour.toml: {}", e),
                },
                Err(e) => tracing::warn!("failed to read .contour.toml: {}", e),
            }
        }
        Self::default()
    }

    /// User ignore patterns followed by the built-in defaults.
    pub fn ignore_patterns(&self) -> Vec<String> {
        let mut patterns = self.scanner.ignore.clone();
        for default in DEFAULT_IGNORE_PATTERNS {
            if !patterns.iter().any(|p| p == default) {
                patterns.push(default.to_string());
            }
        }
        patterns
    }

    pub fn max_file_size_bytes(&self) -> Option<u64> {
        self.scanner.max_file_size_kb.map(|kb| kb * 1024)
    }
}
