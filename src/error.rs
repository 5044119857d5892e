use nix::errno::Errno;
use nix::unistd::Uid;
use std::ffi::NulError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub const NOT_ELEVATED: u8 = 1;
pub const IDENTITY_LOOKUP_FAILURE: u8 = 2;
pub const INVALID_ARGUMENTS: u8 = 3;
pub const BANNER_FAILURE: u8 = 4;
pub const CONFIG_FAILURE: u8 = 5;
pub const EXEC_FAILURE: u8 = 126;
pub const ARGUMENT_ENCODING_FAILURE: u8 = 255;

#[derive(Debug, Error)]
pub enum Error {
    #[error("expected {expected} arguments, got {actual}")]
    InvalidArguments { expected: usize, actual: usize },

    #[error("no passwd entry for uid {0}")]
    UnknownUser(Uid),

    #[error("passwd lookup for uid {uid} failed: {source}")]
    UserLookup { uid: Uid, source: Errno },

    #[error("not running with elevated privileges (is the setuid bit set?)")]
    NotElevated,

    #[error("argument cannot be passed to exec: {0}")]
    ArgumentEncoding(#[from] NulError),

    #[error("cannot open banner {path}: {source}")]
    BannerOpen { path: PathBuf, source: io::Error },

    #[error("failed to render banner: {0}")]
    BannerWrite(#[source] io::Error),

    #[error("cannot read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("invalid config {path}: {source}")]
    ConfigParse { path: PathBuf, source: toml::de::Error },

    #[error("failed to execute {program}: {source}")]
    Exec { program: PathBuf, source: Errno },
}

impl Error {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::NotElevated => NOT_ELEVATED,
            Error::UnknownUser(_) | Error::UserLookup { .. } => IDENTITY_LOOKUP_FAILURE,
            Error::InvalidArguments { .. } => INVALID_ARGUMENTS,
            Error::BannerOpen { .. } | Error::BannerWrite(_) => BANNER_FAILURE,
            Error::ConfigRead { .. } | Error::ConfigParse { .. } => CONFIG_FAILURE,
            Error::Exec { .. } => EXEC_FAILURE,
            Error::ArgumentEncoding(_) => ARGUMENT_ENCODING_FAILURE,
        }
    }
}
