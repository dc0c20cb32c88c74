//! Launch and navigation configuration.

use serde::{Deserialize, Serialize};

/// Environment variable forcing headed or headless operation.
pub const ENV_HEADLESS: &str = "CONVEYOR_HEADLESS";
/// Environment variable overriding the navigation deadline, in milliseconds.
pub const ENV_NAV_TIMEOUT_MS: &str = "CONVEYOR_NAV_TIMEOUT_MS";

const DEFAULT_NAV_TIMEOUT_MS: u64 = 30_000;

/// Page session configuration.
///
/// Defaults describe the conventional automation window: 1000x900 pixels at
/// the top-left corner, incognito, headless. `CONVEYOR_HEADLESS=0` (or
/// `false`/`no`/`off`) switches to headed operation without touching code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub headless: bool,
    /// Window width and height in pixels.
    pub window_size: (u32, u32),
    /// Window origin on screen.
    pub window_position: (u32, u32),
    /// Whether the session starts from a clean profile.
    pub incognito: bool,
    /// Deadline applied to `goto` operations.
    pub nav_timeout_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            window_size: (1000, 900),
            window_position: (0, 0),
            incognito: true,
            nav_timeout_ms: default_nav_timeout_ms(),
        }
    }
}

impl PageConfig {
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    pub fn with_nav_timeout_ms(mut self, nav_timeout_ms: u64) -> Self {
        self.nav_timeout_ms = nav_timeout_ms;
        self
    }
}

fn default_headless() -> bool {
    match std::env::var(ENV_HEADLESS) {
        Ok(value) => !matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        Err(_) => true,
    }
}

fn default_nav_timeout_ms() -> u64 {
    std::env::var(ENV_NAV_TIMEOUT_MS)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_NAV_TIMEOUT_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn defaults_describe_the_standard_window() {
        std::env::remove_var(ENV_HEADLESS);
        std::env::remove_var(ENV_NAV_TIMEOUT_MS);
        let config = PageConfig::default();

        assert!(config.headless);
        assert_eq!(config.window_size, (1000, 900));
        assert_eq!(config.window_position, (0, 0));
        assert!(config.incognito);
        assert_eq!(config.nav_timeout_ms, 30_000);
    }

    #[test]
    #[serial]
    fn headless_env_accepts_the_usual_spellings() {
        for value in ["0", "false", "NO", " off "] {
            std::env::set_var(ENV_HEADLESS, value);
            assert!(!PageConfig::default().headless, "value {value:?}");
        }
        std::env::set_var(ENV_HEADLESS, "1");
        assert!(PageConfig::default().headless);
        std::env::remove_var(ENV_HEADLESS);
    }

    #[test]
    #[serial]
    fn nav_timeout_env_overrides_default() {
        std::env::set_var(ENV_NAV_TIMEOUT_MS, "1500");
        assert_eq!(PageConfig::default().nav_timeout_ms, 1500);
        std::env::set_var(ENV_NAV_TIMEOUT_MS, "not-a-number");
        assert_eq!(PageConfig::default().nav_timeout_ms, 30_000);
        std::env::remove_var(ENV_NAV_TIMEOUT_MS);
    }

    #[test]
    fn builders_override_fields() {
        let config = PageConfig::default()
            .with_headless(false)
            .with_window_size(1280, 720)
            .with_nav_timeout_ms(5_000);

        assert!(!config.headless);
        assert_eq!(config.window_size, (1280, 720));
        assert_eq!(config.nav_timeout_ms, 5_000);
    }
}
