use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Output file used when nothing else is configured.
pub const DEFAULT_OUTPUT: &str = "content_dump.txt";

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub compare: Option<CompareSection>,
    pub extract: Option<ExtractSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareSection {
    pub first: Option<PathBuf>,
    pub second: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractSection {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Platform config directory path: `<config_dir>/pdfprobe/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pdfprobe").join("config.toml"))
}

/// Load config by cascading CWD `.pdfprobe.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".pdfprobe.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_cmp = base.compare.unwrap_or_default();
    let over_cmp = overlay.compare.unwrap_or_default();
    let base_ext = base.extract.unwrap_or_default();
    let over_ext = overlay.extract.unwrap_or_default();

    ConfigFile {
        compare: Some(CompareSection {
            first: over_cmp.first.or(base_cmp.first),
            second: over_cmp.second.or(base_cmp.second),
            output: over_cmp.output.or(base_cmp.output),
        }),
        extract: Some(ExtractSection {
            input: over_ext.input.or(base_ext.input),
            output: over_ext.output.or(base_ext.output),
        }),
    }
}
