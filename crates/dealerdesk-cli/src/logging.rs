// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured directives when it is set.
pub fn resolve_filter(configured: &str, env_override: Option<&str>) -> Result<EnvFilter> {
    let directives = env_override
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(configured);
    EnvFilter::try_new(directives).with_context(|| {
        format!("invalid log filter {directives:?}; use a level such as \"warn\" or \"dealerdesk_table=debug\"")
    })
}

/// Installs the global subscriber. Logs go to stderr so `--json` output on
/// stdout stays machine-readable.
pub fn init(configured: &str) -> Result<()> {
    let env_override = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(configured, env_override.as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))
}

#[cfg(test)]
mod tests {
    use super::resolve_filter;
    use anyhow::Result;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn configured_filter_applies_without_env() -> Result<()> {
        let filter = resolve_filter("dealerdesk_table=debug", None)?;
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        Ok(())
    }

    #[test]
    fn env_override_wins_unless_blank() -> Result<()> {
        let overridden = resolve_filter("warn", Some("trace"))?;
        assert_eq!(overridden.max_level_hint(), Some(LevelFilter::TRACE));
        let blank = resolve_filter("warn", Some("  "))?;
        assert_eq!(blank.max_level_hint(), Some(LevelFilter::WARN));
        Ok(())
    }

    #[test]
    fn invalid_directives_are_reported() {
        let error = resolve_filter("dealerdesk=loud", None).expect_err("bad level should fail");
        assert!(error.to_string().contains("invalid log filter"));
    }
}
