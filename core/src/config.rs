//! Connection parameters, read from a sectioned `key = value` file.
//!
//! The file follows the usual INI conventions: `[section]` headers,
//! `key = value` or `key: value` pairs, `#` and `;` comment lines.
//! Keys are case-insensitive and stored lowercased. Keys in `[DEFAULT]`
//! apply to every section that does not set them itself.

use crate::error::{ConfigError, ConnectError};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "database.ini";
pub const DEFAULT_PG_SCHEMA: &str = "production";
const DEFAULT_SECTION: &str = "DEFAULT";

/// Parameters of one config section, keyed by lowercased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials(BTreeMap<String, String>);

impl Credentials {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into().to_lowercase(), value.into());
    }

    fn inherit(&mut self, defaults: &Credentials) {
        for (key, value) in &defaults.0 {
            self.0.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
}

/// Parse every section of an INI-style document.
pub fn parse_sections(text: &str) -> Result<BTreeMap<String, Credentials>, ConfigError> {
    let mut sections: BTreeMap<String, Credentials> = BTreeMap::new();
    let mut current: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }

        let split = line.find(['=', ':']).ok_or_else(|| ConfigError::Malformed {
            line: idx + 1,
            text: line.to_string(),
        })?;
        let (key, value) = (line[..split].trim(), line[split + 1..].trim());
        if key.is_empty() {
            return Err(ConfigError::Malformed {
                line: idx + 1,
                text: line.to_string(),
            });
        }

        let section = current
            .as_ref()
            .ok_or(ConfigError::NoSection { line: idx + 1 })?;
        if let Some(params) = sections.get_mut(section) {
            params.insert(key, value);
        }
    }

    Ok(sections)
}

/// Read `path` and return the parameters of `section`, with `[DEFAULT]`
/// keys filled in. `DEFAULT` itself is not a selectable section.
pub fn load_credentials(path: &str, section: &str) -> Result<Credentials, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.to_string(),
        source,
    })?;
    let mut sections = parse_sections(&content)?;
    let defaults = sections.remove(DEFAULT_SECTION).unwrap_or_default();
    let mut params = sections
        .remove(section)
        .ok_or_else(|| ConfigError::MissingSection {
            section: section.to_string(),
            path: path.to_string(),
        })?;
    params.inherit(&defaults);
    Ok(params)
}

/// Database dialect; also names the config section to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    pub fn section_name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgresql",
            Dialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.section_name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgresql" | "postgres" => Ok(Dialect::Postgres),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(format!("unknown dialect '{other}' (expected postgresql or sqlite)")),
        }
    }
}

/// PostgreSQL connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
    pub pool_size: u32,
    /// Seconds to wait for the pool to establish its first connection.
    pub connect_timeout: u64,
    pub schema: Option<String>,
}

impl PgConfig {
    /// Client configuration built field by field, so credentials containing
    /// spaces, quotes or backslashes pass through untouched.
    #[cfg(feature = "postgres")]
    pub fn to_client_config(&self) -> postgres::Config {
        let mut config = postgres::Config::new();
        config
            .host(&self.host)
            .port(self.port)
            .dbname(&self.database)
            .user(&self.user)
            .connect_timeout(std::time::Duration::from_secs(self.connect_timeout));
        if let Some(ref password) = self.password {
            config.password(password);
        }
        config
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    pub path: PathBuf,
    pub schema: Option<String>,
}

/// Typed data source configuration built from a credentials section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Postgres(PgConfig),
    Sqlite(SqliteConfig),
}

impl SourceConfig {
    pub fn from_credentials(dialect: Dialect, creds: &Credentials) -> Result<Self, ConnectError> {
        match dialect {
            Dialect::Postgres => {
                let database = creds
                    .get("database")
                    .or_else(|| creds.get("dbname"))
                    .ok_or(ConnectError::MissingParameter("database"))?;
                let user = creds
                    .get("username")
                    .or_else(|| creds.get("user"))
                    .ok_or(ConnectError::MissingParameter("username"))?;
                Ok(SourceConfig::Postgres(PgConfig {
                    host: creds.get("host").unwrap_or("localhost").to_string(),
                    port: parse_param(creds, "port", 5432)?,
                    database: database.to_string(),
                    user: user.to_string(),
                    password: creds.get("password").map(str::to_string),
                    pool_size: parse_param(creds, "pool_size", 4)?,
                    connect_timeout: parse_param(creds, "connect_timeout", 10)?,
                    schema: schema_param(creds, Some(DEFAULT_PG_SCHEMA)),
                }))
            }
            Dialect::Sqlite => {
                let path = creds
                    .get("path")
                    .ok_or(ConnectError::MissingParameter("path"))?;
                Ok(SourceConfig::Sqlite(SqliteConfig {
                    path: PathBuf::from(path),
                    schema: schema_param(creds, None),
                }))
            }
        }
    }

    pub fn schema(&self) -> Option<&str> {
        match self {
            SourceConfig::Postgres(pg) => pg.schema.as_deref(),
            SourceConfig::Sqlite(lite) => lite.schema.as_deref(),
        }
    }
}

fn parse_param<T: std::str::FromStr>(
    creds: &Credentials,
    key: &'static str,
    default: T,
) -> Result<T, ConnectError> {
    match creds.get(key) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConnectError::InvalidParameter {
            key,
            value: raw.to_string(),
        }),
    }
}

// An explicitly empty `schema =` means unqualified table names.
fn schema_param(creds: &Credentials, default: Option<&str>) -> Option<String> {
    match creds.get("schema") {
        Some("") => None,
        Some(s) => Some(s.to_string()),
        None => default.map(str::to_string),
    }
}
