use crate::error::*;

use log::LevelFilter;
use once_cell::sync::OnceCell;
use serde::*;
use std::fs;
use std::io;
use std::path::*;

/// Fixed location of the configuration file. Never taken from the environment.
pub const CONFIG_PATH: &'static str = "/etc/git-lfs-shell/config.toml";

/// The only forced command the restricted shell hands over to the helper.
pub const ALLOWED_COMMAND: &'static str = "git-lfs-authenticate";

pub const HELPER_PATH: &'static str = "/usr/local/bin/git-lfs-authenticate";

pub const BANNER_PATH: &'static str = "/opt/git_lfs_server/info.txt";

pub const CLIENT_PATH: &'static str = "/usr/bin/curl";

/// argv[0] of the HTTP client, so it shows up under the helper's name.
pub const CLIENT_NAME: &'static str = "git-lfs-authenticate";

pub const ENDPOINT: &'static str = "https://git-lfs.example.org/api/token_factory";

pub const LOG_LEVEL: LevelFilter = LevelFilter::Warn;

static CONFIG: OnceCell<Config> = OnceCell::new();

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_level: LevelFilter,
    pub shell: ShellConfig,
    pub authenticate: AuthenticateConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    pub helper_path: PathBuf,
    pub banner_path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthenticateConfig {
    pub client_path: PathBuf,
    pub client_name: String,
    pub endpoint: String,
    /// Use this netrc file instead of the client's default lookup.
    pub netrc_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LOG_LEVEL,
            shell: ShellConfig::default(),
            authenticate: AuthenticateConfig::default(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            helper_path: PathBuf::from(HELPER_PATH),
            banner_path: PathBuf::from(BANNER_PATH),
        }
    }
}

impl Default for AuthenticateConfig {
    fn default() -> Self {
        Self {
            client_path: PathBuf::from(CLIENT_PATH),
            client_name: CLIENT_NAME.to_string(),
            endpoint: ENDPOINT.to_string(),
            netrc_file: None,
        }
    }
}

impl Config {
    /// Reads `path`, falling back to the built-in defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(Error::ConfigRead { path: path.to_path_buf(), source }),
        };
        toml::from_str(&text).map_err(|source| Error::ConfigParse { path: path.to_path_buf(), source })
    }
}

/// Resolves the process-wide configuration from [`CONFIG_PATH`] on first use.
pub fn init() -> Result<&'static Config, Error> {
    CONFIG.get_or_try_init(|| Config::load(Path::new(CONFIG_PATH)))
}
