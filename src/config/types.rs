//! Configuration types and CLI options.
//!
//! Every option can be given as a flag or through the environment (a `.env`
//! file is loaded by the binary before parsing). The configuration is read
//! once at startup and never mutated afterwards.

use std::fmt;
use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_DIAGNOSTIC_URL, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_PUBLIC_DIR, DEFAULT_SCRAPE_DEADLINE_SECS, DEFAULT_USER_AGENT, MAX_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scheme used to talk to a proxy relay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RelayScheme {
    /// Plain HTTP proxy (CONNECT tunnel for https targets)
    #[default]
    Http,
    /// TLS connection to the proxy itself
    Https,
}

impl RelayScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayScheme::Http => "http",
            RelayScheme::Https => "https",
        }
    }
}

impl fmt::Display for RelayScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Basic credentials presented to the custom relay.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyCredentials {
    pub username: String,
    pub password: String,
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Immutable proxy routing configuration.
///
/// Built once from [`Config`] and handed to the fetcher; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Route fetches through relays at all
    pub enabled: bool,
    /// `host:port` of the custom relay, if any
    pub relay_address: Option<String>,
    /// Scheme used to reach every relay
    pub relay_scheme: RelayScheme,
    /// Credentials for the custom relay (only when both parts are configured)
    pub credentials: Option<ProxyCredentials>,
    /// Per-attempt timeout in seconds
    pub timeout_seconds: u64,
    /// `host:port` of fallback relays, tried in order after the custom relay
    pub fallback_relays: Vec<String>,
    /// Try the direct chain before any relay
    pub prefer_direct_first: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            relay_address: None,
            relay_scheme: RelayScheme::Http,
            credentials: None,
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            fallback_relays: Vec::new(),
            prefer_direct_first: false,
        }
    }
}

impl ProxyConfig {
    /// Returns the custom relay address if one is set and non-blank.
    pub fn custom_relay(&self) -> Option<&str> {
        self.relay_address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }

    /// Returns `true` when routing is enabled and at least one relay exists.
    pub fn has_relays(&self) -> bool {
        self.enabled && (self.custom_relay().is_some() || !self.fallback_relays.is_empty())
    }
}

/// Service configuration.
///
/// Parsed from the command line with environment fallbacks, or constructed
/// programmatically (see [`Config::default`]).
///
/// # Examples
///
/// ```no_run
/// use scrape_api::Config;
///
/// let config = Config {
///     port: 8080,
///     proxy_enabled: true,
///     proxy_address: Some("relay.internal:3128".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "scrape_api", version, about)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Directory served under `/public` and used for `/` and `/demo`
    #[arg(long, env = "PUBLIC_DIR", default_value = DEFAULT_PUBLIC_DIR)]
    pub public_dir: PathBuf,

    /// HTTP User-Agent header value for outbound fetches
    #[arg(long, env = "USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-attempt fetch timeout in seconds
    #[arg(
        long,
        env = "PROXY_TIMEOUT",
        default_value_t = DEFAULT_FETCH_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub timeout_seconds: u64,

    /// Deadline in seconds for the whole fetch-with-fallback sequence
    #[arg(
        long,
        env = "SCRAPE_TIMEOUT",
        default_value_t = DEFAULT_SCRAPE_DEADLINE_SECS,
        value_parser = clap::value_parser!(u64).range(1..=MAX_TIMEOUT_SECS)
    )]
    pub deadline_seconds: u64,

    /// Route fetches through the configured relays
    #[arg(long, env = "PROXY_ENABLED", value_parser = FalseyValueParser::new())]
    pub proxy_enabled: bool,

    /// Custom relay as `host:port`
    #[arg(long, env = "PROXY_ADDRESS")]
    pub proxy_address: Option<String>,

    /// Scheme used to reach relays
    #[arg(long, env = "PROXY_SCHEME", value_enum, default_value_t = RelayScheme::Http)]
    pub proxy_scheme: RelayScheme,

    /// Username for the custom relay
    #[arg(long, env = "PROXY_USERNAME")]
    pub proxy_username: Option<String>,

    /// Password for the custom relay
    #[arg(long, env = "PROXY_PASSWORD", hide_env_values = true)]
    pub proxy_password: Option<String>,

    /// Comma-separated fallback relays (`host:port`), tried after the custom relay
    #[arg(long, env = "PROXY_FALLBACKS", value_delimiter = ',')]
    pub proxy_fallbacks: Vec<String>,

    /// Try direct access (and the http downgrade) before any relay
    #[arg(long, env = "PROXY_PREFER_DIRECT", value_parser = FalseyValueParser::new())]
    pub prefer_direct_first: bool,

    /// URL probed by `/api/test-proxy`
    #[arg(long, env = "PROXY_TEST_URL", default_value = DEFAULT_DIAGNOSTIC_URL)]
    pub diagnostic_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECS,
            deadline_seconds: DEFAULT_SCRAPE_DEADLINE_SECS,
            proxy_enabled: false,
            proxy_address: None,
            proxy_scheme: RelayScheme::Http,
            proxy_username: None,
            proxy_password: None,
            proxy_fallbacks: Vec::new(),
            prefer_direct_first: false,
            diagnostic_url: DEFAULT_DIAGNOSTIC_URL.to_string(),
        }
    }
}

impl Config {
    /// Builds the immutable proxy configuration.
    ///
    /// Credentials are kept only when both username and password are
    /// non-empty; blank fallback entries are dropped.
    pub fn proxy_config(&self) -> ProxyConfig {
        let credentials = match (&self.proxy_username, &self.proxy_password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(ProxyCredentials {
                    username: username.clone(),
                    password: password.clone(),
                })
            }
            _ => None,
        };

        ProxyConfig {
            enabled: self.proxy_enabled,
            relay_address: self.proxy_address.clone(),
            relay_scheme: self.proxy_scheme,
            credentials,
            timeout_seconds: self.timeout_seconds,
            fallback_relays: self
                .proxy_fallbacks
                .iter()
                .map(|relay| relay.trim().to_string())
                .filter(|relay| !relay.is_empty())
                .collect(),
            prefer_direct_first: self.prefer_direct_first,
        }
    }
}
