use clap::{CommandFactory, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, StatsError};

/// Data directory used when neither the CLI, the environment nor the
/// last-used file names one.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Number of tracks shown by `top` when `--count` is omitted.
pub const DEFAULT_TOP_COUNT: u64 = 10;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Charts for your music streaming history
#[derive(Parser, Debug, Clone)]
#[command(
    name = "listen-stats",
    about = "Charts for your music streaming history",
    version
)]
pub struct Settings {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the streaming-history JSON exports
    #[arg(long, global = true, env = "LISTEN_STATS_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// How to present the result
    #[arg(long, global = true, default_value = "chart", value_parser = ["chart", "table", "text", "json"])]
    pub output: String,

    /// Display theme
    #[arg(long, global = true, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, global = true, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long, global = true)]
    pub clear: bool,
}

/// The report to produce.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Most-played tracks of all time
    Top {
        /// Number of tracks to show (1-50)
        #[arg(long, short = 'n', default_value_t = DEFAULT_TOP_COUNT, value_parser = clap::value_parser!(u64).range(1..=50))]
        count: u64,

        /// Comma-separated artist names to leave out
        #[arg(long, short = 'x', default_value = "")]
        exclude: String,
    },

    /// Plays per month
    Monthly {
        /// Artist name (case-insensitive substring)
        #[arg(long, short = 'a', required_unless_present = "all", conflicts_with = "all")]
        artist: Option<String>,

        /// Count every play instead of one artist's
        #[arg(long)]
        all: bool,
    },
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.listen-stats/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".listen-stats").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation. Accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("could not clear {}: {}", config_path.display(), e);
            }
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI and environment always win over the last-used file.
        if !is_arg_explicitly_set(&matches, "data_dir") {
            if let Some(v) = last.data_dir {
                settings.data_dir = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "output") {
            if let Some(v) = last.output {
                settings.output = v;
            }
        }

        settings = Self::apply_debug(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            tracing::debug!("could not persist {}: {}", config_path.display(), e);
        }

        settings
    }

    /// Reject combinations clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(StatsError::Config("--data-dir must not be empty".into()));
        }
        Ok(())
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            data_dir: Some(s.data_dir.clone()),
            theme: Some(s.theme.clone()),
            output: Some(s.output.clone()),
        }
    }
}

/// Returns `true` when `name` was supplied on the command line or through
/// its environment variable (not via default value).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(clap::parser::ValueSource::CommandLine | clap::parser::ValueSource::EnvVariable)
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    fn args(list: &[&str]) -> Vec<std::ffi::OsString> {
        list.iter().map(|s| s.into()).collect()
    }

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            data_dir: Some(PathBuf::from("/music/export")),
            theme: Some("dark".to_string()),
            output: Some("table".to_string()),
        };

        params.save_to(&path).expect("save");
        let loaded = LastUsedParams::load_from(&path);

        assert_eq!(loaded.data_dir, Some(PathBuf::from("/music/export")));
        assert_eq!(loaded.theme, Some("dark".to_string()));
        assert_eq!(loaded.output, Some("table".to_string()));
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);

        LastUsedParams {
            theme: Some("light".to_string()),
            ..Default::default()
        }
        .save_to(&path)
        .expect("save");
        assert!(path.exists());

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists());
    }

    #[test]
    fn test_last_used_params_default_when_missing_or_corrupt() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        assert!(LastUsedParams::load_from(&path).data_dir.is_none());

        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert!(LastUsedParams::load_from(&path).theme.is_none());
    }

    #[test]
    fn test_settings_top_defaults() {
        let settings = Settings::parse_from(["listen-stats", "top"]);
        assert_eq!(
            settings.command,
            Command::Top {
                count: DEFAULT_TOP_COUNT,
                exclude: String::new(),
            }
        );
        assert_eq!(settings.output, "chart");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_top_with_exclusions() {
        let settings =
            Settings::parse_from(["listen-stats", "top", "-n", "25", "--exclude", "Drake, Adele"]);
        assert_eq!(
            settings.command,
            Command::Top {
                count: 25,
                exclude: "Drake, Adele".to_string(),
            }
        );
    }

    #[test]
    fn test_settings_top_count_out_of_range() {
        assert!(Settings::try_parse_from(["listen-stats", "top", "--count", "0"]).is_err());
        assert!(Settings::try_parse_from(["listen-stats", "top", "--count", "51"]).is_err());
        assert!(Settings::try_parse_from(["listen-stats", "top", "--count", "50"]).is_ok());
    }

    #[test]
    fn test_settings_monthly_requires_artist_or_all() {
        assert!(Settings::try_parse_from(["listen-stats", "monthly"]).is_err());
        assert!(
            Settings::try_parse_from(["listen-stats", "monthly", "--artist", "x", "--all"])
                .is_err()
        );

        let settings = Settings::parse_from(["listen-stats", "monthly", "--artist", "Queen"]);
        assert_eq!(
            settings.command,
            Command::Monthly {
                artist: Some("Queen".to_string()),
                all: false,
            }
        );
    }

    #[test]
    fn test_settings_global_flags_after_subcommand() {
        let settings = Settings::parse_from([
            "listen-stats",
            "monthly",
            "--all",
            "--output",
            "json",
            "--data-dir",
            "/tmp/export",
        ]);
        assert_eq!(settings.output, "json");
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/export"));
    }

    #[test]
    fn test_validate_rejects_empty_data_dir() {
        let mut settings = Settings::parse_from(["listen-stats", "top"]);
        settings.data_dir = PathBuf::new();
        assert!(matches!(settings.validate(), Err(StatsError::Config(_))));
    }

    #[test]
    fn test_load_with_last_used_merges_persisted_theme() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        LastUsedParams {
            theme: Some("dark".to_string()),
            output: Some("text".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings =
            Settings::load_with_last_used_impl(args(&["listen-stats", "top"]), &config_path);
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.output, "text");
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        LastUsedParams {
            theme: Some("dark".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        let settings = Settings::load_with_last_used_impl(
            args(&["listen-stats", "--theme", "light", "top"]),
            &config_path,
        );
        assert_eq!(settings.theme, "light");
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        LastUsedParams {
            theme: Some("classic".to_string()),
            ..Default::default()
        }
        .save_to(&config_path)
        .expect("save");

        Settings::load_with_last_used_impl(args(&["listen-stats", "top", "--clear"]), &config_path);
        assert!(!config_path.exists());
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let settings = Settings::load_with_last_used_impl(
            args(&["listen-stats", "top", "--debug"]),
            &tmp_config_path(&tmp),
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            args(&["listen-stats", "top", "--theme", "classic"]),
            &config_path,
        );

        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.theme, Some("classic".to_string()));
    }
}
