//! Pipeline configuration management.
//!
//! This module provides configuration loading, global verbose flag management,
//! and the default render settings.

mod defaults;

pub use defaults::{PipelineDefaults, DEFAULT_MAX_RENDER_SIZE};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};

use serde::{Deserialize, Serialize};

// Global verbose flag for controlling debug output
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set the global verbose flag. When true, debug messages will be printed.
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Check if verbose mode is enabled.
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Print a message to stderr only if verbose mode is enabled.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::config::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VELUM_CONFIG";

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["velum.yml", "velum.yaml"];

/// Loaded configuration together with its source path and warnings.
pub struct PipelineConfigHandle {
    pub config: PipelineConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl PipelineConfigHandle {
    fn with_config(config: PipelineConfig, source: Option<PathBuf>, warnings: Vec<String>) -> Self {
        Self {
            config,
            source,
            warnings,
        }
    }
}

/// Complete configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    pub defaults: PipelineDefaults,
}

impl PipelineConfig {
    fn sanitize(mut self) -> Self {
        self.defaults.sanitize();
        self
    }

    /// Parse a YAML document and sanitize it.
    pub fn from_yaml(contents: &str) -> Result<Self, String> {
        serde_yaml::from_str::<PipelineConfig>(contents)
            .map(PipelineConfig::sanitize)
            .map_err(|e| format!("Failed to parse pipeline config: {}", e))
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Failed to serialize config: {}", e))
    }
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// Candidates are tried in order; unreadable or unparsable files are recorded
/// as warnings and skipped. Built-in defaults are used when nothing loads.
pub fn load_pipeline_config(custom_path: Option<&Path>) -> PipelineConfigHandle {
    let mut warnings = Vec::new();
    let candidates = get_config_candidates(custom_path);

    for candidate in candidates {
        if !candidate.exists() || !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match PipelineConfig::from_yaml(&contents) {
                Ok(config) => {
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    return PipelineConfigHandle::with_config(config, Some(source), warnings);
                }
                Err(err) => warnings.push(format!("{} ({})", err, candidate.display())),
            },
            Err(err) => warnings.push(format!(
                "Failed to read pipeline config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No pipeline config found; using built-in defaults.".to_string());
    PipelineConfigHandle::with_config(PipelineConfig::default(), None, warnings)
}

/// Get list of config file candidates to try
fn get_config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("velum").join(name));
        }
    }

    candidates
}

static PIPELINE_CONFIG_HANDLE: OnceLock<PipelineConfigHandle> = OnceLock::new();
static PRINT_CONFIG_ONCE: Once = Once::new();

/// Access the global pipeline configuration (loaded once per process).
pub fn pipeline_config_handle() -> &'static PipelineConfigHandle {
    PIPELINE_CONFIG_HANDLE.get_or_init(|| load_pipeline_config(None))
}

/// Print config source and warnings the first time it is requested (only in verbose mode).
pub fn log_config_usage(handle: &PipelineConfigHandle) {
    PRINT_CONFIG_ONCE.call_once(|| {
        if !is_verbose() {
            return;
        }
        if let Some(source) = &handle.source {
            eprintln!("[velum] Loaded pipeline config from {}", source.display());
        } else {
            eprintln!("[velum] Using built-in pipeline defaults");
        }

        for warning in &handle.warnings {
            eprintln!("[velum] Config warning: {}", warning);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Fabric;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let config = PipelineConfig::default();
        assert_eq!(config.defaults.fabric, Fabric::Cortina);
        assert_eq!(config.defaults.max_render_size, 1700);
        assert!(config.defaults.seed.is_none());
        assert!(config.defaults.controls.enable_noise);
    }

    #[test]
    fn test_from_yaml_sanitizes() {
        let yaml = "defaults:\n  fabric: seda\n  seed: 7\n  max_render_size: 0\n  controls:\n    thickness: 5.0\n    clarity: 2.0\n";
        let config = PipelineConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.defaults.fabric, Fabric::Seda);
        assert_eq!(config.defaults.seed, Some(7));
        assert_eq!(config.defaults.max_render_size, 1);
        assert_eq!(config.defaults.controls.thickness, 5.0);
        assert_eq!(config.defaults.controls.clarity, 1.0);
    }

    #[test]
    fn test_from_yaml_rejects_unknown_fabric() {
        let err = PipelineConfig::from_yaml("defaults:\n  fabric: linen\n").unwrap_err();
        assert!(err.contains("Failed to parse"), "{}", err);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("velum.yml");
        fs::write(&path, "defaults:\n  fabric: estofado\n").unwrap();

        let handle = load_pipeline_config(Some(&path));
        assert!(handle.source.is_some());
        assert_eq!(handle.config.defaults.fabric, Fabric::Estofado);
    }

    #[test]
    fn test_load_bad_file_records_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.yml");
        fs::write(&path, "defaults: [not, a, map]\n").unwrap();

        let handle = load_pipeline_config(Some(&path));
        assert!(handle
            .warnings
            .iter()
            .any(|w| w.contains("broken.yml")), "{:?}", handle.warnings);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = PipelineConfig::default();
        config.defaults.fabric = Fabric::Poliester;
        config.defaults.seed = Some(3);
        let yaml = config.to_yaml().unwrap();
        let parsed = PipelineConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.defaults.fabric, Fabric::Poliester);
        assert_eq!(parsed.defaults.seed, Some(3));
    }

    #[test]
    fn test_verbose_flag() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
