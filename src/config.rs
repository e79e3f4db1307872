// Finder configuration: source, search window, headcount and HTTP settings
use chrono::{Duration, NaiveDateTime};
use reqwest::Url;

use crate::error::{FinderError, Result};
use crate::product::parse_timestamp;
use crate::report::FitCriteria;

pub const DEFAULT_SOURCE_URL: &str = "http://www.mocky.io/v2/58ff37f2110000070cf5ff16";
pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_TRAVELLERS: u32 = 1;

pub const TIMEOUT_ENV: &str = "PRODUCT_FINDER_TIMEOUT_MS";
pub const USER_AGENT_ENV: &str = "PRODUCT_FINDER_USER_AGENT";

pub const USAGE: &str = "\
Usage: product-finder [URL] [startTime] [endTime] [numberOfTravellers]

Arguments:
  URL                 Endpoint to retrieve data (default: http://www.mocky.io/v2/58ff37f2110000070cf5ff16)
  startTime           Window start YYYY-MM-DDTHH:MM (default: now - 30 days)
  endTime             Window end YYYY-MM-DDTHH:MM (default: now)
  numberOfTravellers  Number of travellers, at least 1 (default: 1)

Environment:
  PRODUCT_FINDER_TIMEOUT_MS   HTTP timeout in milliseconds (default: 10000)
  PRODUCT_FINDER_USER_AGENT   User-Agent header sent to the endpoint
  RUST_LOG                    Log filter for stderr output (default: warn)";

// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            user_agent: format!("product-finder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Values absent from the lookup keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            config.timeout_ms = timeout.trim().parse().map_err(|_| {
                FinderError::InvalidConfig(format!(
                    "{} must be a number of milliseconds, got '{}'",
                    TIMEOUT_ENV, timeout
                ))
            })?;
        }

        if let Some(user_agent) = lookup(USER_AGENT_ENV).filter(|ua| !ua.is_empty()) {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    pub source_url: String,
    pub criteria: FitCriteria,
    pub client: ClientConfig,
}

impl FinderConfig {
    /// Configuration used when no arguments are given: the default endpoint,
    /// a window covering the last 30 days up to `now`, and one traveller.
    ///
    /// `now` is used as given, seconds included, so a slot starting at the
    /// minute the default window opens does not fit unless `now` is on a whole
    /// minute.
    pub fn defaults(now: NaiveDateTime) -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            criteria: FitCriteria {
                window_start: now - Duration::days(DEFAULT_WINDOW_DAYS),
                window_end: now,
                travellers: DEFAULT_TRAVELLERS,
            },
            client: ClientConfig::default(),
        }
    }

    /// Reads the positional arguments `URL startTime endTime numberOfTravellers`.
    ///
    /// Missing or empty arguments fall back to [`FinderConfig::defaults`].
    pub fn from_args<I, S>(args: I, now: NaiveDateTime) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        if args.len() > 4 {
            return Err(FinderError::InvalidConfig(format!(
                "expected at most 4 arguments, got {}",
                args.len()
            )));
        }

        let arg = |index: usize| args.get(index).map(|a| a.trim()).filter(|a| !a.is_empty());
        let mut config = Self::defaults(now);

        if let Some(url) = arg(0) {
            config.source_url = url.to_string();
        }
        validate_url(&config.source_url)?;

        if let Some(start) = arg(1) {
            config.criteria.window_start = parse_argument("startTime", start)?;
        }

        if let Some(end) = arg(2) {
            config.criteria.window_end = parse_argument("endTime", end)?;
        }

        if let Some(travellers) = arg(3) {
            let travellers: i64 = travellers.parse().map_err(|_| {
                FinderError::InvalidConfig(format!(
                    "numberOfTravellers must be an integer, got '{}'",
                    travellers
                ))
            })?;
            config.criteria.travellers = validate_travellers(travellers)?;
        }

        Ok(config)
    }

    pub fn with_client(mut self, client: ClientConfig) -> Self {
        self.client = client;
        self
    }
}

pub fn validate_travellers(travellers: i64) -> Result<u32> {
    if travellers < 1 {
        return Err(FinderError::InvalidParty(travellers));
    }
    u32::try_from(travellers).map_err(|_| {
        FinderError::InvalidConfig(format!("numberOfTravellers {} is too large", travellers))
    })
}

// Only absolute http(s) URLs are accepted
pub fn validate_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|_| FinderError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(parsed),
        _ => Err(FinderError::InvalidUrl(url.to_string())),
    }
}

fn parse_argument(name: &str, value: &str) -> Result<NaiveDateTime> {
    parse_timestamp(value).ok_or_else(|| FinderError::InvalidTimestamp {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use test_case::test_case;

    fn ts(value: &str) -> NaiveDateTime {
        parse_timestamp(value).unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-05-31T18:42:37", "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = FinderConfig::from_args(Vec::<String>::new(), now()).unwrap();

        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.criteria.window_start, now() - Duration::days(30));
        assert_eq!(config.criteria.window_end, now());
        assert_eq!(config.criteria.travellers, 1);
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn test_all_arguments() {
        let config = FinderConfig::from_args(
            [
                "https://example.com/availabilities",
                "2024-01-01T09:00",
                "2024-01-01T12:00",
                "2",
            ],
            now(),
        )
        .unwrap();

        assert_eq!(config.source_url, "https://example.com/availabilities");
        assert_eq!(
            config.criteria,
            FitCriteria {
                window_start: ts("2024-01-01T09:00"),
                window_end: ts("2024-01-01T12:00"),
                travellers: 2,
            }
        );
    }

    #[test]
    fn test_empty_arguments_fall_back_to_defaults() {
        let config = FinderConfig::from_args(["", "", "2024-06-01T00:00"], now()).unwrap();

        assert_eq!(config.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(config.criteria.window_start, now() - Duration::days(30));
        assert_eq!(config.criteria.window_end, ts("2024-06-01T00:00"));
    }

    #[test_case(vec!["not a url"]; "#1 garbage")]
    #[test_case(vec!["ftp://example.com/file"]; "#2 unsupported scheme")]
    #[test_case(vec!["/relative/path"]; "#3 relative path")]
    fn test_invalid_url(args: Vec<&str>) {
        let result = FinderConfig::from_args(args, now());
        assert!(matches!(result, Err(FinderError::InvalidUrl(_))));
    }

    #[test_case(vec!["", "2024-01-01"], "startTime"; "#1 start without time")]
    #[test_case(vec!["", "", "01/01/2024 10:00"], "endTime"; "#2 end in wrong format")]
    #[test_case(vec!["", "2024-1-1T9:00"], "startTime"; "#3 start not zero padded")]
    #[test_case(vec!["", "", "+2024-01-01T10:00"], "endTime"; "#4 end with signed year")]
    fn test_invalid_timestamp(args: Vec<&str>, expected_name: &str) {
        match FinderConfig::from_args(args, now()) {
            Err(FinderError::InvalidTimestamp { name, .. }) => assert_eq!(name, expected_name),
            other => panic!("Expected invalid timestamp error, got {:?}", other),
        }
    }

    #[test_case("0", 0; "#1 zero")]
    #[test_case("-3", -3; "#2 negative")]
    fn test_invalid_party(travellers: &str, expected: i64) {
        let result = FinderConfig::from_args(["", "", "", travellers], now());
        match result {
            Err(FinderError::InvalidParty(value)) => assert_eq!(value, expected),
            other => panic!("Expected invalid party error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_window_keeps_seconds() {
        let config = FinderConfig::defaults(now());
        let window_opens = ts("2024-05-01T18:42");
        assert!(config.criteria.window_start > window_opens);

        let product =
            crate::product::AvailabilityRecord::new(10, 30, 1, window_opens).unwrap();
        assert!(!product.fits(
            &config.criteria.window_start,
            &config.criteria.window_end,
            1
        ));
    }

    #[test]
    fn test_non_numeric_party() {
        let result = FinderConfig::from_args(["", "", "", "two"], now());
        assert!(matches!(result, Err(FinderError::InvalidConfig(_))));
    }

    #[test]
    fn test_too_many_arguments() {
        let result = FinderConfig::from_args(["", "", "", "1", "extra"], now());
        assert!(matches!(result, Err(FinderError::InvalidConfig(_))));
    }

    #[test]
    fn test_client_config_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(TIMEOUT_ENV, "2500"), (USER_AGENT_ENV, "tester/1.0")]);
        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.user_agent, "tester/1.0");
    }

    #[test]
    fn test_client_config_rejects_bad_timeout() {
        let result = ClientConfig::from_lookup(|key| {
            (key == TIMEOUT_ENV).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(FinderError::InvalidConfig(_))));
    }
}
