use std::{env, path::PathBuf, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/queue.json";
const DEFAULT_API_URL: &str = "/api";
const DEFAULT_GROUP_ID: &str = "default";
const DEFAULT_RECEIVE_WAIT_SECS: u64 = 3;

/// Runtime settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub data_path: PathBuf,
    /// Endpoint URL baked into the rendered page.
    pub api_url: String,
    pub message_group_id: String,
    pub receive_wait: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            message_group_id: DEFAULT_GROUP_ID.to_string(),
            receive_wait: Duration::from_secs(DEFAULT_RECEIVE_WAIT_SECS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);
        let data_path = lookup("QUEUE_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);
        let api_url = lookup("API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.api_url);
        let message_group_id = lookup("MESSAGE_GROUP_ID")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.message_group_id);
        let receive_wait = lookup("RECEIVE_WAIT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.receive_wait);

        Self {
            port,
            data_path,
            api_url,
            message_group_id,
            receive_wait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.data_path, PathBuf::from("data/queue.json"));
        assert_eq!(settings.api_url, "/api");
        assert_eq!(settings.receive_wait, Duration::from_secs(3));
    }

    #[test]
    fn values_override_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("API_URL", "https://example.test/prod/api"),
            ("RECEIVE_WAIT_SECS", "0"),
            ("MESSAGE_GROUP_ID", "orders"),
        ]));
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.api_url, "https://example.test/prod/api");
        assert_eq!(settings.receive_wait, Duration::ZERO);
        assert_eq!(settings.message_group_id, "orders");
    }

    #[test]
    fn garbage_numbers_fall_back() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("RECEIVE_WAIT_SECS", "-1"),
        ]));
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.receive_wait, Duration::from_secs(3));
    }
}
