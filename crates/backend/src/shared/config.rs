use contracts::dashboards::d400_superstore::{Grouping, Metric, Selection};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    /// Directory the config was read from; relative paths resolve against it
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    pub path: String,
}

/// Initial selector values
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub state: String,
    pub city: Option<String>,
    #[serde(default)]
    pub metric: Metric,
    #[serde(default)]
    pub grouping: Grouping,
    pub product: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Selection::default().into()
    }
}

impl From<Selection> for DashboardConfig {
    fn from(s: Selection) -> Self {
        Self {
            state: s.state,
            city: s.city,
            metric: s.metric,
            grouping: s.grouping,
            product: s.product,
        }
    }
}

impl From<DashboardConfig> for Selection {
    fn from(c: DashboardConfig) -> Self {
        Self {
            state: c.state,
            city: c.city,
            metric: c.metric,
            grouping: c.grouping,
            product: c.product,
        }
    }
}

fn default_static_dir() -> String {
    "static".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 5000
static_dir = "static"

[dataset]
path = "data/SampleSuperstore.csv"

[dashboard]
state = "California"
city = "Los Angeles"
metric = "sales"
grouping = "state"
product = "Bookcases"
"#;

const CONFIG_FILE: &str = "config.toml";

/// Load configuration from config.toml
///
/// Search order:
/// 1. Current working directory
/// 2. Next to the executable
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = vec![std::env::current_dir()?];
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.to_path_buf());
        }
    }

    for dir in candidates {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            return load_config_from(&config_path);
        }
    }

    tracing::info!("config.toml not found, using default embedded configuration");
    parse_config(DEFAULT_CONFIG, None)
}

pub fn load_config_from(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents, path.parent().map(Path::to_path_buf))
}

fn parse_config(contents: &str, base_dir: Option<PathBuf>) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    config.base_dir = base_dir;
    Ok(config)
}

impl Config {
    /// Socket address the HTTP server binds to
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr: SocketAddr = format!("{}:{}", self.server.host, self.server.port).parse()?;
        Ok(addr)
    }

    /// Dataset path, resolved against the config directory when relative
    pub fn dataset_path(&self) -> PathBuf {
        self.resolve(&self.dataset.path)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.resolve(&self.server.static_dir)
    }

    fn resolve(&self, path_str: &str) -> PathBuf {
        let path = Path::new(path_str);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
