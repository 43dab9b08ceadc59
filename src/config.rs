// src/config.rs
use crate::domain::clock::ClockZone;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::repository::SeedPolicy;
use crate::util::helper::slugify;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument, trace, warn};

pub const ENV_STORAGE_DIR: &str = "NEWTAB_STORAGE_DIR";
pub const ENV_SEED: &str = "NEWTAB_SEED";

const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClockSettings {
    pub label: String,
    /// IANA name, e.g. "Asia/Dhaka"
    pub timezone: String,
    #[serde(default = "default_time_format")]
    pub format: String,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl ClockSettings {
    fn new(label: &str, timezone: &str) -> Self {
        Self {
            label: label.to_string(),
            timezone: timezone.to_string(),
            format: default_time_format(),
            date_format: default_date_format(),
        }
    }
}

fn default_time_format() -> String {
    "%I:%M:%S %p".to_string()
}

fn default_date_format() -> String {
    "%a, %b %-d".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Directory holding one JSON file per storage key
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// What a first run starts with
    #[serde(default)]
    pub seed: SeedPolicy,

    #[serde(default = "default_icon")]
    pub default_icon: String,

    /// Largest value the storage accepts for a single key
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,

    /// Hold time before a press on a bookmark turns into a drag
    #[serde(default = "default_drag_delay_ms")]
    pub drag_delay_ms: u64,

    #[serde(default = "default_clocks")]
    pub clocks: Vec<ClockSettings>,
}

fn default_storage_dir() -> String {
    "~/.config/newtab".to_string()
}

fn default_icon() -> String {
    "🔖".to_string()
}

fn default_quota_bytes() -> usize {
    DEFAULT_QUOTA_BYTES
}

fn default_drag_delay_ms() -> u64 {
    150
}

fn default_clocks() -> Vec<ClockSettings> {
    vec![
        ClockSettings::new("Sydney", "Australia/Sydney"),
        ClockSettings::new("Dhaka", "Asia/Dhaka"),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            seed: SeedPolicy::default(),
            default_icon: default_icon(),
            quota_bytes: default_quota_bytes(),
            drag_delay_ms: default_drag_delay_ms(),
            clocks: default_clocks(),
        }
    }
}

impl Settings {
    /// Storage directory with `~` and `$VARS` expanded
    pub fn storage_path(&self) -> PathBuf {
        let expanded = shellexpand::full(&self.storage_dir)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| shellexpand::tilde(&self.storage_dir).into_owned());
        PathBuf::from(expanded)
    }

    pub fn drag_delay(&self) -> Duration {
        Duration::from_millis(self.drag_delay_ms)
    }

    /// Validated clock zones; the display slot is derived from the label.
    pub fn clock_zones(&self) -> DomainResult<Vec<ClockZone>> {
        self.clocks
            .iter()
            .enumerate()
            .map(|(i, clock)| {
                let mut slot = slugify(&clock.label);
                if slot.is_empty() {
                    slot = format!("clock-{}", i + 1);
                }
                ClockZone::new(
                    slot,
                    clock.label.clone(),
                    &clock.timezone,
                    clock.format.clone(),
                    clock.date_format.clone(),
                )
                .map_err(|e| e.context(format!("clock '{}'", clock.label)))
            })
            .collect()
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/newtab/config.toml"))
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| DomainError::Io(e).context(format!("reading {}", path.display())))?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::DeserializationError(format!("invalid config {}: {}", path.display(), e))
    })
}

/// Load settings from a config file and environment variables.
///
/// An explicitly given file must exist and parse; the default location is
/// optional and a broken file there only produces a warning.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => read_config_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_config_file(&path).unwrap_or_else(|e| {
                warn!("Ignoring config file: {}", e);
                Settings::default()
            }),
            None => Settings::default(),
        },
    };

    if let Ok(dir) = std::env::var(ENV_STORAGE_DIR) {
        trace!("Using {} from environment: {}", ENV_STORAGE_DIR, dir);
        settings.storage_dir = dir;
    }

    if let Ok(seed) = std::env::var(ENV_SEED) {
        trace!("Using {} from environment: {}", ENV_SEED, seed);
        settings.seed = seed.parse().map_err(|e: DomainError| e.context(ENV_SEED))?;
    }

    debug!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use tempfile::TempDir;

    fn create_temp_config_file(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, content).unwrap();
        (temp_dir, config_path)
    }

    #[test]
    fn given_defaults_when_created_then_documented_values() {
        let settings = Settings::default();
        assert_eq!(settings.seed, SeedPolicy::Empty);
        assert_eq!(settings.default_icon, "🔖");
        assert_eq!(settings.quota_bytes, 5 * 1024 * 1024);
        assert_eq!(settings.drag_delay(), Duration::from_millis(150));
        assert_eq!(settings.clocks.len(), 2);
        assert_eq!(settings.clocks[0].timezone, "Australia/Sydney");
    }

    #[test]
    #[serial]
    fn given_config_file_when_load_then_values_applied_and_rest_defaulted() {
        let _guard = EnvGuard::new();
        env::remove_var(ENV_STORAGE_DIR);
        env::remove_var(ENV_SEED);

        let (_dir, path) = create_temp_config_file(
            r#"
            storage_dir = "/srv/newtab"
            seed = "defaults"

            [[clocks]]
            label = "UTC"
            timezone = "UTC"
            format = "%H:%M"
            "#,
        );

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.storage_dir, "/srv/newtab");
        assert_eq!(settings.seed, SeedPolicy::Defaults);
        assert_eq!(settings.default_icon, "🔖");
        assert_eq!(settings.clocks.len(), 1);
        assert_eq!(settings.clocks[0].date_format, "%a, %b %-d");
    }

    #[test]
    #[serial]
    fn given_env_vars_when_load_then_override_file() {
        let _guard = EnvGuard::new();
        let (_dir, path) = create_temp_config_file(r#"storage_dir = "/from/file""#);
        env::set_var(ENV_STORAGE_DIR, "/from/env");
        env::set_var(ENV_SEED, "defaults");

        let settings = load_settings(Some(&path)).unwrap();

        assert_eq!(settings.storage_dir, "/from/env");
        assert_eq!(settings.seed, SeedPolicy::Defaults);
    }

    #[test]
    #[serial]
    fn given_unknown_seed_in_env_when_load_then_error() {
        let _guard = EnvGuard::new();
        env::set_var(ENV_SEED, "lots");
        let (_dir, path) = create_temp_config_file("");

        assert!(load_settings(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn given_missing_explicit_file_when_load_then_error() {
        let _guard = EnvGuard::new();
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn given_tilde_storage_dir_when_storage_path_then_expanded() {
        let settings = Settings::default();
        let path = settings.storage_path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with(".config/newtab"));
    }

    #[test]
    fn given_default_clocks_when_clock_zones_then_slugged_slots() {
        let zones = Settings::default().clock_zones().unwrap();
        let slots: Vec<_> = zones.iter().map(|z| z.slot.as_str()).collect();
        assert_eq!(slots, vec!["sydney", "dhaka"]);
    }

    #[test]
    fn given_bad_timezone_when_clock_zones_then_error_names_clock() {
        let mut settings = Settings::default();
        settings.clocks = vec![ClockSettings::new("Mars", "Mars/Olympus")];
        let err = settings.clock_zones().unwrap_err();
        assert!(err.to_string().contains("Mars"));
    }

    #[test]
    fn given_default_config_when_generated_then_parses_back() {
        let text = generate_default_config();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
