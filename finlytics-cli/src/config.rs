use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use finlytics_export::ExportFormat;
use finlytics_ingest::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::{ensure_finlytics_home, finlytics_home};

/// Overrides `service.base_url`
pub const BASE_URL_ENV: &str = "FINLYTICS_API_BASE_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceSection {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportSection {
    pub output_dir: PathBuf,
    /// "xlsx" or "csv"
    pub format: String,
    /// IANA zone for the date in export file names; UTC when unset
    pub timezone: Option<String>,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 120,
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            format: "xlsx".to_string(),
            timezone: None,
        }
    }
}

impl Config {
    /// Base URL after applying the environment override, if non-empty.
    pub fn base_url(&self, env_override: Option<&str>) -> String {
        match env_override.map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.service.base_url.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.service.timeout_secs)
    }

    pub fn export_format(&self) -> Result<ExportFormat> {
        self.export
            .format
            .parse()
            .map_err(|e: String| anyhow!(e))
            .context("export.format in config.toml")
    }

    pub fn timezone(&self) -> Result<Option<Tz>> {
        match self.export.timezone.as_deref() {
            None => Ok(None),
            Some(name) => name
                .parse::<Tz>()
                .map(Some)
                .map_err(|e| anyhow!("export.timezone {name:?}: {e}")),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(finlytics_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_finlytics_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(&Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.service.base_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.export_format().unwrap(), ExportFormat::Xlsx);
        assert_eq!(cfg.timezone().unwrap(), None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let cfg = parse_config(
            r#"
[service]
base_url = "https://parser.example.com"

[export]
format = "csv"
timezone = "Africa/Johannesburg"
"#,
        )
        .unwrap();
        assert_eq!(cfg.service.base_url, "https://parser.example.com");
        assert_eq!(cfg.service.timeout_secs, 120);
        assert_eq!(cfg.export.output_dir, PathBuf::from("."));
        assert_eq!(cfg.export_format().unwrap(), ExportFormat::Csv);
        assert_eq!(cfg.timezone().unwrap(), Some(chrono_tz::Africa::Johannesburg));
    }

    #[test]
    fn test_env_override() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url(None), "http://127.0.0.1:8000");
        assert_eq!(cfg.base_url(Some("  ")), "http://127.0.0.1:8000");
        assert_eq!(cfg.base_url(Some("http://10.0.0.2:9000")), "http://10.0.0.2:9000");
    }

    #[test]
    fn test_bad_values_are_reported() {
        let cfg = parse_config("[export]\nformat = \"pdf\"\ntimezone = \"Mars/Olympus\"\n").unwrap();
        assert!(cfg.export_format().is_err());
        assert!(cfg.timezone().is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(parse_config(&s).unwrap(), cfg);
    }
}
