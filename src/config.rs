//! Configuration management for doxyplat
//!
//! Settings come from built-in defaults, then environment variables, then an
//! optional TOML file, then command-line flags (highest precedence).
//!
//! # Environment Variables
//!
//! - `DOXYPLAT_VARIABLE`: root variable name - default: "CHIBIOS"
//! - `DOXYPLAT_TEMPLATE`: template path - default: "Doxyfile_html.template"
//! - `DOXYPLAT_OUTPUT`: generated config path - default: "Doxyfile_html"
//! - `DOXYPLAT_FIELD`: field to rewrite - default: "INPUT"
//! - `DOXYPLAT_LOG_LEVEL`: logging level - default: "info"
//!
//! # TOML file
//!
//! ```toml
//! variable = "CHIBIOS"
//! template = "doc/Doxyfile_html.template"
//! output = "doc/Doxyfile_html"
//! field = "INPUT"
//! mandatory_dirs = ["os/hal/dox", "os/hal/src", "os/hal/include"]
//! ```

use crate::doxyfile::DEFAULT_FIELD;
use crate::fragment::{RootPath, DEFAULT_VARIABLE};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_TEMPLATE: &str = "Doxyfile_html.template";
const DEFAULT_OUTPUT: &str = "Doxyfile_html";

/// Shared HAL directories documented for every platform, relative to the root
const DEFAULT_MANDATORY_DIRS: [&str; 5] = [
    "os/hal/dox",
    "os/hal/src",
    "os/hal/include",
    "os/hal/lib/peripherals/flash",
    "os/hal/lib/peripherals/sensors",
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {field} name '{value}': only letters, digits and '_' are allowed")]
    InvalidName { field: &'static str, value: String },

    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to resolve working directory: {0}")]
    WorkingDirectory(io::Error),
}

/// Contents of a `--config` TOML file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub variable: Option<String>,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub field: Option<String>,
    pub mandatory_dirs: Option<Vec<String>>,
}

/// Everything a generation run needs besides the descriptor path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorConfig {
    /// Root variable referenced as `$(VAR)` / `${VAR}` in makefiles
    pub variable: String,

    /// Doxygen config template to read
    pub template_path: PathBuf,

    /// Where the rewritten config is written
    pub output_path: PathBuf,

    /// Template field replaced by the resolved list
    pub field_name: String,

    /// Directories always appended after the resolved list. Relative
    /// entries are taken from the root path.
    pub mandatory_dirs: Vec<String>,
}

impl Default for GeneratorConfig {
    /// Loads from `DOXYPLAT_*` environment variables with defaults
    fn default() -> Self {
        let variable =
            env::var("DOXYPLAT_VARIABLE").unwrap_or_else(|_| DEFAULT_VARIABLE.to_string());
        let template_path = env::var("DOXYPLAT_TEMPLATE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TEMPLATE));
        let output_path = env::var("DOXYPLAT_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT));
        let field_name =
            env::var("DOXYPLAT_FIELD").unwrap_or_else(|_| DEFAULT_FIELD.to_string());

        Self {
            variable,
            template_path,
            output_path,
            field_name,
            mandatory_dirs: DEFAULT_MANDATORY_DIRS
                .iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }
}

impl GeneratorConfig {
    /// Overlays the keys present in the TOML file at `path`
    pub fn merge_file(mut self, path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(variable) = file.variable {
            self.variable = variable;
        }
        if let Some(template) = file.template {
            self.template_path = template;
        }
        if let Some(output) = file.output {
            self.output_path = output;
        }
        if let Some(field) = file.field {
            self.field_name = field;
        }
        if let Some(dirs) = file.mandatory_dirs {
            self.mandatory_dirs = dirs;
        }
        Ok(self)
    }

    /// Anchors template and output paths at the working directory
    pub fn resolve_paths(mut self) -> Result<Self, ConfigError> {
        self.template_path = paths::absolutize_from_cwd(&self.template_path)
            .map_err(ConfigError::WorkingDirectory)?;
        self.output_path = paths::absolutize_from_cwd(&self.output_path)
            .map_err(ConfigError::WorkingDirectory)?;
        Ok(self)
    }

    /// Validates the configuration
    ///
    /// Variable and field names are interpolated into patterns and must be
    /// plain identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_name("variable", &self.variable)?;
        check_name("field", &self.field_name)?;
        Ok(())
    }

    /// The mandatory directories resolved against `root`
    pub fn mandatory_paths(&self, root: &RootPath) -> Vec<String> {
        self.mandatory_dirs
            .iter()
            .map(|dir| {
                paths::absolutize(Path::new(dir), root.path())
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

fn check_name(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidName {
            field,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Doxyplat Configuration:")?;
        writeln!(f, "  Variable: {}", self.variable)?;
        writeln!(f, "  Template: {}", self.template_path.display())?;
        writeln!(f, "  Output: {}", self.output_path.display())?;
        writeln!(f, "  Field: {}", self.field_name)?;
        writeln!(f, "  Mandatory Dirs: {}", self.mandatory_dirs.join(", "))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper to temporarily set environment variables for testing
    struct EnvGuard {
        key: String,
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &str, value: &str) -> Self {
            let old_value = env::var(key).ok();
            env::set_var(key, value);
            Self {
                key: key.to_string(),
                old_value,
            }
        }

        fn unset(key: &str) -> Self {
            let old_value = env::var(key).ok();
            env::remove_var(key);
            Self {
                key: key.to_string(),
                old_value,
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(v) => env::set_var(&self.key, v),
                None => env::remove_var(&self.key),
            }
        }
    }

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = [
            EnvGuard::unset("DOXYPLAT_VARIABLE"),
            EnvGuard::unset("DOXYPLAT_TEMPLATE"),
            EnvGuard::unset("DOXYPLAT_OUTPUT"),
            EnvGuard::unset("DOXYPLAT_FIELD"),
        ];

        let config = GeneratorConfig::default();
        assert_eq!(config.variable, "CHIBIOS");
        assert_eq!(config.template_path, PathBuf::from(DEFAULT_TEMPLATE));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.field_name, "INPUT");
        assert_eq!(config.mandatory_dirs.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_environment_overrides() {
        let _guards = [
            EnvGuard::set("DOXYPLAT_VARIABLE", "SDK_ROOT"),
            EnvGuard::set("DOXYPLAT_TEMPLATE", "doc/template"),
            EnvGuard::set("DOXYPLAT_OUTPUT", "doc/out"),
            EnvGuard::set("DOXYPLAT_FIELD", "FILE_PATTERNS"),
        ];

        let config = GeneratorConfig::default();
        assert_eq!(config.variable, "SDK_ROOT");
        assert_eq!(config.template_path, PathBuf::from("doc/template"));
        assert_eq!(config.output_path, PathBuf::from("doc/out"));
        assert_eq!(config.field_name, "FILE_PATTERNS");
    }

    #[test]
    #[serial]
    fn test_merge_file_overrides_present_keys_only() {
        let _guard = EnvGuard::unset("DOXYPLAT_OUTPUT");
        let file = toml_file("template = \"t.template\"\nmandatory_dirs = [\"docs\"]\n");

        let config = GeneratorConfig::default().merge_file(file.path()).unwrap();
        assert_eq!(config.template_path, PathBuf::from("t.template"));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.mandatory_dirs, vec!["docs".to_string()]);
    }

    #[test]
    fn test_merge_file_rejects_unknown_keys() {
        let file = toml_file("templat = \"typo\"\n");
        let err = GeneratorConfig::default().merge_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_merge_missing_file() {
        let err = GeneratorConfig::default()
            .merge_file(Path::new("/nonexistent/doxyplat.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_validate_rejects_bad_names() {
        let mut config = GeneratorConfig::default();
        config.variable = "CHIBI OS".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidName {
                field: "variable",
                ..
            })
        ));

        config.variable = "CHIBIOS".to_string();
        config.field_name = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidName { field: "field", .. })
        ));
    }

    #[test]
    fn test_resolve_paths_are_absolute() {
        let config = GeneratorConfig::default().resolve_paths().unwrap();
        assert!(config.template_path.is_absolute());
        assert!(config.output_path.is_absolute());
    }

    #[test]
    fn test_mandatory_paths_joined_to_root() {
        let mut config = GeneratorConfig::default();
        config.mandatory_dirs = vec!["os/hal/src".to_string(), "/abs/docs".to_string()];

        let root = RootPath::new("CHIBIOS", "/work/lib");
        assert_eq!(
            config.mandatory_paths(&root),
            vec!["/work/lib/os/hal/src".to_string(), "/abs/docs".to_string()]
        );
    }

    #[test]
    fn test_display() {
        let config = GeneratorConfig::default();
        let display = format!("{}", config);
        assert!(display.contains("Doxyplat Configuration:"));
        assert!(display.contains("Field:"));
    }
}
