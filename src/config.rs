use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub logging: LoggingConfig,
    pub browser: BrowserConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub root: PathBuf,
    pub entry_file: String,
    pub index_files: Vec<String>,
    pub directory_listing: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    pub auto_open: bool,
}

impl Config {
    /// Load configuration: hard defaults, then an optional `corserve` config
    /// file in the working directory, then `CORSERVE_*` environment variables.
    ///
    /// With neither present this yields the stock development setup:
    /// `localhost:8080`, serving the current directory, `index.html` as the
    /// entry marker.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("corserve").required(false))
            .add_source(config::Environment::with_prefix("CORSERVE"))
            .set_default("server.host", "localhost")?
            .set_default("server.port", 8080)?
            .set_default("site.root", ".")?
            .set_default("site.entry_file", "index.html")?
            .set_default(
                "site.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .set_default("site.directory_listing", true)?
            .set_default("logging.access_log", true)?
            .set_default("browser.auto_open", true)?
            .build()?;

        settings.try_deserialize()
    }

    /// Resolve `host:port` to a socket address. Uses name resolution so
    /// `localhost` works as a host value.
    pub fn socket_addr(&self) -> std::io::Result<SocketAddr> {
        let authority = format!("{}:{}", self.server.host, self.server.port);
        authority.to_socket_addrs()?.next().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrNotAvailable,
                format!("no address resolved for '{authority}'"),
            )
        })
    }

    /// URL the browser gets pointed at.
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.server.host, self.server.port)
    }

    /// Verify the entry marker file exists under the site root.
    ///
    /// Returns the missing path on failure so the caller can print it.
    pub fn check_entry_marker(&self) -> Result<(), PathBuf> {
        let marker = self.site.root.join(&self.site.entry_file);
        if marker.is_file() {
            Ok(())
        } else {
            Err(marker)
        }
    }
}

/// Immutable per-process state shared with every connection task.
pub struct AppState {
    pub config: Config,
    /// Canonical site root, used for path containment checks.
    pub root: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = config.site.root.canonicalize()?;
        Ok(Self { config, root })
    }
}
