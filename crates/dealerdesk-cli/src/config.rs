// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use dealerdesk_table::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_DEBOUNCE};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "dealerdesk";
pub const CONFIG_PATH_ENV: &str = "DEALERDESK_CONFIG_PATH";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub table: Table,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            table: Table::default(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    pub page_size: Option<i64>,
    pub search_debounce: Option<String>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            page_size: Some(DEFAULT_PAGE_SIZE as i64),
            search_debounce: Some(format!("{}ms", DEFAULT_SEARCH_DEBOUNCE.as_millis())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    pub filter: Option<String>,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            filter: Some(DEFAULT_LOG_FILTER.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and keep values under [table] and [logging]",
                    path.display()
                )
            })?;
        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(size) = self.table.page_size
            && size <= 0
        {
            bail!(
                "table.page_size in {} must be positive, got {}",
                path.display(),
                size
            );
        }

        if let Some(debounce) = &self.table.search_debounce {
            let parsed = parse_duration(debounce)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "table.search_debounce in {} must be positive, got {}",
                    path.display(),
                    debounce
                );
            }
        }

        if let Some(filter) = &self.logging.filter
            && filter.trim().is_empty()
        {
            bail!(
                "logging.filter in {} is empty; use a level such as \"warn\" or remove the key",
                path.display()
            );
        }

        Ok(())
    }

    pub fn page_size(&self) -> usize {
        self.table
            .page_size
            .and_then(|size| usize::try_from(size).ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn search_debounce(&self) -> Result<Duration> {
        match &self.table.search_debounce {
            Some(raw) => parse_duration(raw),
            None => Ok(DEFAULT_SEARCH_DEBOUNCE),
        }
    }

    pub fn log_filter(&self) -> &str {
        self.logging.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# dealerdesk config\n# Place this file at: {}\n\nversion = 1\n\n[table]\n# Rows per page; fixed for a session.\npage_size = {}\n# Quiet period before a typed search is committed.\nsearch_debounce = \"{}ms\"\n\n[logging]\n# tracing filter directives; RUST_LOG takes precedence.\nfilter = \"{}\"\n",
            path.display(),
            DEFAULT_PAGE_SIZE,
            DEFAULT_SEARCH_DEBOUNCE.as_millis(),
            DEFAULT_LOG_FILTER,
        )
    }
}

pub fn parse_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 2s)")
}
