use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub app: AppSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// No default: the process refuses to start without a port.
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: None, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
    #[serde(default = "default_true")]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
            auto_migrate: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self { allowed_origins: default_allowed_origins() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_login_max_attempts")]
    pub login_max_attempts: u32,
    #[serde(default = "default_login_window_secs")]
    pub login_window_secs: u64,
    /// Key clients on the first X-Forwarded-For hop. Only safe behind a proxy that sets it.
    #[serde(default)]
    pub trust_forwarded_for: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            login_max_attempts: default_login_max_attempts(),
            login_window_secs: default_login_window_secs(),
            trust_forwarded_for: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSection {
    #[serde(default = "default_environment")]
    pub environment: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self { environment: default_environment() }
    }
}

impl AppSection {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }
fn default_true() -> bool { true }
fn default_allowed_origins() -> Vec<String> { vec!["http://localhost:5173".into()] }
fn default_login_max_attempts() -> u32 { 5 }
fn default_login_window_secs() -> u64 { 900 }
fn default_environment() -> String { "production".into() }

/// Read `CONFIG_PATH` (or `config.toml`); a missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !std::path::Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

pub fn from_toml_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// File (if any), then process environment, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.apply_overrides(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay values from an environment-like lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = Some(port);
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.trim().parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(n) = lookup("LOGIN_MAX_ATTEMPTS").and_then(|v| v.trim().parse::<u32>().ok()) {
            self.rate_limit.login_max_attempts = n;
        }
        if let Some(n) = lookup("LOGIN_WINDOW_SECS").and_then(|v| v.trim().parse::<u64>().ok()) {
            self.rate_limit.login_window_secs = n;
        }
        if let Some(v) = lookup("TRUST_FORWARDED_FOR") {
            self.rate_limit.trust_forwarded_for = matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        if let Some(env) = lookup("APP_ENV") {
            self.app.environment = env;
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        self.cors.normalize();
        self.rate_limit.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        match self.port {
            None => return Err(anyhow!("server.port is not set; provide PORT or server.port in config.toml")),
            Some(0) => return Err(anyhow!("server.port must be within 1..=65535")),
            Some(_) => {}
        }
        if self.worker_threads.map_or(true, |w| w == 0) {
            self.worker_threads = Some(4);
        }
        Ok(())
    }

    /// `host:port`; only meaningful after validation.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port.unwrap_or_default())
    }
}

impl DatabaseConfig {
    pub fn is_sqlite(&self) -> bool {
        self.url.to_lowercase().starts_with("sqlite:")
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set DATABASE_URL or database.url in config.toml"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl CorsConfig {
    /// Browsers send `Origin` without a trailing slash.
    fn normalize(&mut self) {
        for origin in &mut self.allowed_origins {
            while origin.ends_with('/') {
                origin.pop();
            }
        }
        self.allowed_origins.retain(|o| !o.is_empty());
    }
}

impl RateLimitConfig {
    fn validate(&self) -> Result<()> {
        if self.login_max_attempts == 0 {
            return Err(anyhow!("rate_limit.login_max_attempts must be >= 1"));
        }
        if self.login_window_secs == 0 {
            return Err(anyhow!("rate_limit.login_window_secs must be >= 1"));
        }
        Ok(())
    }
}
