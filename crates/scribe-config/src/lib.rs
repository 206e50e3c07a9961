//! `scribe.toml` loading.
//!
//! [`Config::load`] reads an explicit file or the first `scribe.toml` found
//! walking up from the current directory, then layers [`CliSettings`] on top.
//! Without a file every section takes its defaults.
//!
//! `${VAR}` and `${VAR:-default}` references are expanded in
//! `theme.preferences_file` and in each `project.ignore` entry. An unset
//! variable without a default is a [`ConfigError::EnvVar`].

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Command-line overrides. `None` keeps the value from the file.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the preferences file path.
    pub preferences_file: Option<PathBuf>,
    /// Override the toast lifetime in milliseconds.
    pub toast_duration_ms: Option<u64>,
    /// Override the ambient theme preference.
    pub system_default: Option<SystemTheme>,
}

const CONFIG_FILENAME: &str = "scribe.toml";

/// Default preferences file, relative to the config directory.
const DEFAULT_PREFERENCES_FILE: &str = ".scribe/preferences.json";

/// Scribe configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Toast notification settings.
    pub toast: ToastConfig,
    /// Theme settings (paths as raw strings from TOML).
    theme: ThemeConfigRaw,
    /// Project tree settings.
    pub project: ProjectConfig,

    /// Resolved theme configuration (set after loading).
    #[serde(skip)]
    pub theme_resolved: ThemeConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Toast notification configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Default toast lifetime in milliseconds.
    pub duration_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self { duration_ms: 3000 }
    }
}

impl ToastConfig {
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Ambient theme used when no preference has been saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemTheme {
    #[default]
    Light,
    Dark,
}

impl SystemTheme {
    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Raw theme configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ThemeConfigRaw {
    preferences_file: Option<String>,
    system_default: SystemTheme,
}

/// Resolved theme configuration with an absolute preferences path.
#[derive(Debug, Default)]
pub struct ThemeConfig {
    /// JSON file the theme preference is persisted to.
    pub preferences_file: PathBuf,
    pub system_default: SystemTheme,
}

/// Project tree configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Entry names skipped by the file tree listing.
    pub ignore: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            ignore: [".git", "node_modules", ".temp", ".cache"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Unset variable in an expanded field.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`theme.preferences_file`").
        field: String,
        /// Error message (e.g., "${`SCRIBE_HOME`} not set").
        message: String,
    },
}

impl Config {
    /// Load `config_path`, or the discovered `scribe.toml`, or defaults
    /// relative to the current directory, and apply `cli_settings`.
    ///
    /// Overrides are validated together with the file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(path) = &settings.preferences_file {
            self.theme_resolved.preferences_file.clone_from(path);
        }
        if let Some(duration_ms) = settings.toast_duration_ms {
            self.toast.duration_ms = duration_ms;
        }
        if let Some(system_default) = settings.system_default {
            self.theme_resolved.system_default = system_default;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            toast: ToastConfig::default(),
            theme: ThemeConfigRaw::default(),
            project: ProjectConfig::default(),
            theme_resolved: ThemeConfig {
                preferences_file: base.join(DEFAULT_PREFERENCES_FILE),
                system_default: SystemTheme::default(),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content, path)
    }

    /// Parse `content` as if it were read from `path`.
    fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Check value ranges: a positive toast duration, a non-empty
    /// preferences path and no empty ignore entries.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.toast.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "toast.duration_ms must be greater than 0".to_owned(),
            ));
        }
        if self.theme_resolved.preferences_file.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "theme.preferences_file cannot be empty".to_owned(),
            ));
        }
        if self.project.ignore.iter().any(String::is_empty) {
            return Err(ConfigError::Validation(
                "project.ignore entries cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref file) = self.theme.preferences_file {
            self.theme.preferences_file =
                Some(expand::expand_env(file, "theme.preferences_file")?);
        }

        for entry in &mut self.project.ignore {
            *entry = expand::expand_env(entry, "project.ignore")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let preferences_file = self
            .theme
            .preferences_file
            .as_deref()
            .unwrap_or(DEFAULT_PREFERENCES_FILE);

        self.theme_resolved = ThemeConfig {
            preferences_file: config_dir.join(preferences_file),
            system_default: self.theme.system_default,
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.toast.duration_ms, 3000);
        assert_eq!(config.toast.duration(), Duration::from_secs(3));
        assert_eq!(
            config.theme_resolved.preferences_file,
            PathBuf::from("/test/.scribe/preferences.json")
        );
        assert_eq!(config.theme_resolved.system_default, SystemTheme::Light);
        assert_eq!(
            config.project.ignore,
            vec![".git", "node_modules", ".temp", ".cache"]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config = Config::from_toml("", Path::new("/project/scribe.toml")).unwrap();
        assert_eq!(config.toast.duration_ms, 3000);
        assert_eq!(
            config.theme_resolved.preferences_file,
            PathBuf::from("/project/.scribe/preferences.json")
        );
        assert_eq!(
            config.config_path,
            Some(PathBuf::from("/project/scribe.toml"))
        );
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[toast]
duration_ms = 5000

[theme]
preferences_file = "state/prefs.json"
system_default = "dark"

[project]
ignore = [".git", "target"]
"#;
        let config = Config::from_toml(toml, Path::new("/project/scribe.toml")).unwrap();
        assert_eq!(config.toast.duration(), Duration::from_secs(5));
        assert_eq!(
            config.theme_resolved.preferences_file,
            PathBuf::from("/project/state/prefs.json")
        );
        assert!(config.theme_resolved.system_default.is_dark());
        assert_eq!(config.project.ignore, vec![".git", "target"]);
    }

    #[test]
    fn test_absolute_preferences_file_kept() {
        let toml = r#"
[theme]
preferences_file = "/var/lib/scribe/prefs.json"
"#;
        let config = Config::from_toml(toml, Path::new("/project/scribe.toml")).unwrap();
        assert_eq!(
            config.theme_resolved.preferences_file,
            PathBuf::from("/var/lib/scribe/prefs.json")
        );
    }

    #[test]
    fn test_invalid_system_default_is_parse_error() {
        let toml = r#"
[theme]
system_default = "sepia"
"#;
        let result = Config::from_toml(toml, Path::new("/project/scribe.toml"));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let toml = r"
[toast]
duration_ms = 0
";
        let err = Config::from_toml(toml, Path::new("/project/scribe.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("toast.duration_ms"));
    }

    #[test]
    fn test_empty_ignore_entry_rejected() {
        let toml = r#"
[project]
ignore = [".git", ""]
"#;
        let err = Config::from_toml(toml, Path::new("/project/scribe.toml")).unwrap_err();
        assert!(err.to_string().contains("project.ignore"));
    }

    #[test]
    fn test_preferences_file_env_expansion() {
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var("SCRIBE_TEST_STATE_DIR", "/srv/state");
        }
        let toml = r#"
[theme]
preferences_file = "${SCRIBE_TEST_STATE_DIR}/prefs.json"
"#;
        let config = Config::from_toml(toml, Path::new("/project/scribe.toml")).unwrap();
        assert_eq!(
            config.theme_resolved.preferences_file,
            PathBuf::from("/srv/state/prefs.json")
        );
        unsafe {
            std::env::remove_var("SCRIBE_TEST_STATE_DIR");
        }
    }

    #[test]
    fn test_missing_env_var_error() {
        let toml = r#"
[theme]
preferences_file = "${SCRIBE_TEST_NEVER_SET_VAR}/prefs.json"
"#;
        let result = Config::from_toml(toml, Path::new("/project/scribe.toml"));
        assert!(matches!(result, Err(ConfigError::EnvVar { .. })));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let settings = CliSettings {
            preferences_file: Some(PathBuf::from("/tmp/prefs.json")),
            system_default: Some(SystemTheme::Dark),
            ..Default::default()
        };

        config.apply_cli_settings(&settings);

        assert_eq!(
            config.theme_resolved.preferences_file,
            PathBuf::from("/tmp/prefs.json")
        );
        assert!(config.theme_resolved.system_default.is_dark());
        assert_eq!(config.toast.duration_ms, 3000);
    }

    #[test]
    fn test_load_explicit_missing_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing.toml");
        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_explicit_path_with_overrides() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[toast]\nduration_ms = 1000\n").unwrap();

        let settings = CliSettings {
            toast_duration_ms: Some(250),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.toast.duration_ms, 250);
        assert_eq!(
            config.theme_resolved.preferences_file,
            temp.path().join(DEFAULT_PREFERENCES_FILE)
        );
    }

    #[test]
    fn test_load_rejects_zero_duration_override() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            toast_duration_ms: Some(0),
            ..Default::default()
        };
        let result = Config::load(Some(&path), Some(&settings));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
