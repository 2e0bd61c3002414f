use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::mode::Durations;

pub const APP_DIR: &str = "rolltimer";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "rolltimer.log";

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Clone, Debug, Default)]
#[command(author, version, about = "🥋 rolltimer - A terminal round timer for the mats")]
pub struct Args {
    /// Preparation countdown before a round (e.g. 5s)
    #[arg(short, long, value_parser = parse_duration)]
    pub prepare: Option<u64>,
    /// Length of a round (e.g. 6m)
    #[arg(short = 'R', long, value_parser = parse_duration)]
    pub round: Option<u64>,
    /// Rest after a round (e.g. 1m)
    #[arg(short, long, value_parser = parse_duration)]
    pub rest: Option<u64>,
    /// Length of each hell round (e.g. 2m)
    #[arg(long, value_parser = parse_duration)]
    pub hell_round: Option<u64>,
    #[arg(short = 't', long)]
    pub theme: Option<String>,
    #[arg(long)]
    pub no_notify: bool,
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses `6m`, `90s`, `1m30s`, `1h` or a bare number of seconds.
pub fn parse_duration(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().to_lowercase();
    let mut total = 0u64;
    let mut num = String::new();

    for c in s.chars() {
        let unit = match c {
            '0'..='9' => { num.push(c); continue; }
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return Err("Invalid format".into()),
        };
        total = add_unit(total, &num, unit)?;
        num.clear();
    }
    if !num.is_empty() {
        total = add_unit(total, &num, 1)?;
    }

    if total > 0 { Ok(total) } else { Err("Duration must be > 0".into()) }
}

fn add_unit(total: u64, num: &str, unit: u64) -> std::result::Result<u64, String> {
    let n = num.parse::<u64>().map_err(|_| match unit {
        3600 => "Invalid hours",
        60 => "Invalid minutes",
        _ => "Invalid seconds",
    })?;
    n.checked_mul(unit)
        .and_then(|secs| total.checked_add(secs))
        .ok_or_else(|| "Duration too large".into())
}

// ============================================================================
// Config File
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub durations: Durations,
    pub theme: String,
    pub notifications: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: Durations::default(),
            theme: "gold".into(),
            notifications: true,
        }
    }
}

impl Config {
    /// Reads the config file, falling back to defaults when it is missing
    /// or unreadable. Zero durations are replaced by their defaults.
    pub fn load(path: &Path) -> Self {
        let mut config: Self = match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => {
                tracing::debug!("no config at {}, using defaults", path.display());
                Self::default()
            }
        };

        let replaced = config.durations.replace_zeros();
        if !replaced.is_empty() {
            tracing::warn!(
                "durations must be > 0; using defaults for {} in {}",
                replaced.join(", "),
                path.display()
            );
        }
        config
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(p) = args.prepare { self.durations.prepare = p; }
        if let Some(r) = args.round { self.durations.round = r; }
        if let Some(r) = args.rest { self.durations.rest = r; }
        if let Some(h) = args.hell_round { self.durations.hell_round = h; }
        if let Some(t) = &args.theme { self.theme = t.clone(); }
        if args.no_notify { self.notifications = false; }
    }
}

pub fn app_path(filename: &str) -> anyhow::Result<PathBuf> {
    let dir = PathBuf::from(".").join(APP_DIR);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir.join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_units() {
        assert_eq!(parse_duration("6m"), Ok(360));
        assert_eq!(parse_duration("90s"), Ok(90));
        assert_eq!(parse_duration("1m30s"), Ok(90));
        assert_eq!(parse_duration(" 2M "), Ok(120));
        assert_eq!(parse_duration("45"), Ok(45));
        assert_eq!(parse_duration("1h"), Ok(3600));
    }

    #[test]
    fn rejects_bad_durations() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("5x").is_err());
        assert!(parse_duration("m").is_err());
        assert_eq!(parse_duration("99999999999999999h"), Err("Duration too large".into()));
        assert_eq!(parse_duration("18446744073709551615s1s"), Err("Duration too large".into()));
        assert!(parse_duration("99999999999999999999999s").is_err());
    }

    #[test]
    fn cli_overrides_config() {
        let args = Args::parse_from(["rolltimer", "--round", "5m", "--rest", "30s", "--no-notify", "-t", "nord"]);
        let mut config = Config::default();
        config.apply_args(&args);
        assert_eq!(config.durations.round, 300);
        assert_eq!(config.durations.rest, 30);
        assert_eq!(config.durations.prepare, 5);
        assert_eq!(config.theme, "nord");
        assert!(!config.notifications);
    }

    #[test]
    fn missing_config_file_gives_defaults() {
        let path = std::env::temp_dir().join("rolltimer-does-not-exist.json");
        assert_eq!(Config::load(&path), Config::default());
    }

    #[test]
    fn partial_config_file_is_merged_with_defaults() {
        let path = std::env::temp_dir().join(format!("rolltimer-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"theme": "dracula", "durations": {"rest": 90}}"#).unwrap();
        let config = Config::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(config.theme, "dracula");
        assert_eq!(config.durations.rest, 90);
        assert_eq!(config.durations.round, 360);
        assert!(config.notifications);
    }

    #[test]
    fn zero_durations_in_config_file_use_defaults() {
        let path = std::env::temp_dir().join(format!("rolltimer-zero-{}.json", std::process::id()));
        fs::write(&path, r#"{"durations": {"prepare": 0, "round": 0, "rest": 30}}"#).unwrap();
        let config = Config::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(config.durations.prepare, 5);
        assert_eq!(config.durations.round, 360);
        assert_eq!(config.durations.rest, 30);
        assert_eq!(config.durations.hell_round, 120);
    }
}
