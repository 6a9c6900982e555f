// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

use std::time::Duration;

/// 这些是默认值，环境变量中没有定义（或无法解析）时使用
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "auth_token";
pub const DEFAULT_SESSION_RETRY_DELAY_MS: u64 = 1000;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_PER_PAGE: u32 = 10;

pub const ENV_API_URL: &str = "THATNEWAI_API_URL";
pub const ENV_TOKEN_KEY: &str = "THATNEWAI_TOKEN_KEY";
pub const ENV_RETRY_DELAY_MS: &str = "THATNEWAI_RETRY_DELAY_MS";
pub const ENV_DEBOUNCE_MS: &str = "THATNEWAI_DEBOUNCE_MS";
pub const ENV_PER_PAGE: &str = "THATNEWAI_PER_PAGE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// localStorage 中保存令牌的 key
    pub token_storage_key: String,
    /// 会话恢复失败后，重试前等待的时间
    pub session_retry_delay: Duration,
    pub search_debounce: Duration,
    pub default_per_page: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_string(),
            session_retry_delay: Duration::from_millis(DEFAULT_SESSION_RETRY_DELAY_MS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            default_per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl ClientConfig {
    /// 从任意 key-value 来源读取配置，读不到就用默认值
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let millis = |key: &str, fallback: Duration| {
            non_empty(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(fallback)
        };

        Self {
            api_base_url: non_empty(ENV_API_URL).unwrap_or(defaults.api_base_url),
            token_storage_key: non_empty(ENV_TOKEN_KEY).unwrap_or(defaults.token_storage_key),
            session_retry_delay: millis(ENV_RETRY_DELAY_MS, defaults.session_retry_delay),
            search_debounce: millis(ENV_DEBOUNCE_MS, defaults.search_debounce),
            default_per_page: non_empty(ENV_PER_PAGE)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.default_per_page),
        }
    }

    /// 读取进程环境变量
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])), ClientConfig::default());
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
        assert_eq!(config.token_storage_key, "auth_token");
        assert_eq!(config.session_retry_delay, Duration::from_secs(1));
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.default_per_page, 10);
    }

    #[test]
    fn test_overrides_are_read() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.thatnewai.com/api"),
            (ENV_TOKEN_KEY, "tok"),
            (ENV_RETRY_DELAY_MS, "250"),
            (ENV_DEBOUNCE_MS, " 150 "),
            (ENV_PER_PAGE, "24"),
        ]));
        assert_eq!(config.api_base_url, "https://api.thatnewai.com/api");
        assert_eq!(config.token_storage_key, "tok");
        assert_eq!(config.session_retry_delay, Duration::from_millis(250));
        assert_eq!(config.search_debounce, Duration::from_millis(150));
        assert_eq!(config.default_per_page, 24);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "   "),
            (ENV_RETRY_DELAY_MS, "soon"),
            (ENV_PER_PAGE, "0"),
        ]));
        assert_eq!(config, ClientConfig::default());
    }
}
