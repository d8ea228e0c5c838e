use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use giveaway_core::FilterConfig;
use giveaway_engine::LoopTimings;
use serde::Deserialize;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://www.steamgifts.com";

/// Run configuration as written by the setup wizard.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AppConfig {
    /// Value of the site's session cookie.
    pub cookie: String,
    pub filter: FilterConfig,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub log_to_file: bool,
    #[serde(default)]
    pub timings: TimingOverrides,
}

/// Optional overrides, in seconds, for the loop's pauses.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TimingOverrides {
    pub entry_pause: Option<u64>,
    pub no_listings_wait: Option<u64>,
    pub no_points_wait: Option<u64>,
    pub network_failure_wait: Option<u64>,
}

impl TimingOverrides {
    pub fn to_loop_timings(&self) -> LoopTimings {
        let defaults = LoopTimings::default();
        let pick = |value: Option<u64>, fallback: Duration| {
            value.map(Duration::from_secs).unwrap_or(fallback)
        };
        LoopTimings {
            entry_pause: pick(self.entry_pause, defaults.entry_pause),
            no_listings_wait: pick(self.no_listings_wait, defaults.no_listings_wait),
            no_points_wait: pick(self.no_points_wait, defaults.no_points_wait),
            network_failure_wait: pick(self.network_failure_wait, defaults.network_failure_wait),
        }
    }
}

impl AppConfig {
    pub fn base_url(&self) -> anyhow::Result<Url> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(raw).with_context(|| format!("invalid base_url {raw:?}"))
    }
}

pub(crate) fn load(path: &Path) -> anyhow::Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    parse(&content).with_context(|| format!("invalid config in {}", path.display()))
}

fn parse(content: &str) -> anyhow::Result<AppConfig> {
    let mut config: AppConfig = ron::from_str(content)?;
    config.cookie = config.cookie.trim().to_string();
    if config.cookie.is_empty() {
        bail!("cookie is empty");
    }
    config.filter = config.filter.normalized();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use giveaway_core::Variant;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"(
        cookie: " abc123 ",
        filter: (
            variant: Special,
            enter_pinned: true,
            min_points: 50,
            ignored_words: ["Soundtrack", ""],
        ),
        timings: (no_points_wait: Some(60)),
    )"#;

    #[test]
    fn loads_full_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ron");
        fs::write(&path, SAMPLE).unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.cookie, "abc123");
        assert_eq!(config.filter.variant, Variant::Special);
        assert!(config.filter.enter_pinned);
        assert_eq!(config.filter.min_points, 50);
        assert_eq!(config.filter.ignored_words, vec!["soundtrack"]);
        assert_eq!(config.base_url().unwrap().as_str(), "https://www.steamgifts.com/");

        let timings = config.timings.to_loop_timings();
        assert_eq!(timings.no_points_wait, Duration::from_secs(60));
        assert_eq!(timings.no_listings_wait, Duration::from_secs(120));
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = parse(r#"(cookie: "x", filter: (variant: All))"#).unwrap();
        assert!(!config.filter.enter_pinned);
        assert_eq!(config.filter.min_points, 0);
        assert!(!config.log_to_file);
        assert_eq!(config.timings.to_loop_timings(), LoopTimings::default());
    }

    #[test]
    fn empty_cookie_is_rejected() {
        assert!(parse(r#"(cookie: "  ", filter: (variant: All))"#).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(load(&temp.path().join("absent.ron")).is_err());
    }
}
