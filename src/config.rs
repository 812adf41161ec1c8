//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::tour::planner::DEFAULT_AUTO_LAUNCH_DELAY;

/// Tour service configuration.
#[derive(Debug, Clone)]
pub struct TourConfig {
    /// libSQL database file holding the settings table.
    pub db_path: PathBuf,
    /// HTTP port for the tour API.
    pub port: u16,
    /// Wait between the tour engine loading and the automatic launch.
    pub auto_launch_delay: Duration,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/clinic-tour.db"),
            port: 8080,
            auto_launch_delay: DEFAULT_AUTO_LAUNCH_DELAY,
        }
    }
}

impl TourConfig {
    /// Build config from environment variables, falling back to defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let db_path = lookup("CLINIC_TOUR_DB_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let port: u16 = lookup("CLINIC_TOUR_PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        let auto_launch_delay = lookup("CLINIC_TOUR_AUTO_LAUNCH_DELAY_MS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.auto_launch_delay);

        Self {
            db_path,
            port,
            auto_launch_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> TourConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TourConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.db_path, PathBuf::from("./data/clinic-tour.db"));
        assert_eq!(config.port, 8080);
        assert_eq!(config.auto_launch_delay, Duration::from_secs(1));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("CLINIC_TOUR_DB_PATH", "/var/lib/tour.db"),
            ("CLINIC_TOUR_PORT", "9090"),
            ("CLINIC_TOUR_AUTO_LAUNCH_DELAY_MS", "250"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/var/lib/tour.db"));
        assert_eq!(config.port, 9090);
        assert_eq!(config.auto_launch_delay, Duration::from_millis(250));
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = config_from(&[
            ("CLINIC_TOUR_PORT", "not-a-port"),
            ("CLINIC_TOUR_AUTO_LAUNCH_DELAY_MS", "-5"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.auto_launch_delay, Duration::from_secs(1));
    }
}
