use crate::error::*;

use nix::errno::Errno;
use nix::unistd::{self, Uid, User};
use std::env;
use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

/// Longest hostname the banner will print (HOST_NAME_MAX on Linux).
pub const HOSTNAME_MAX: usize = 64;

/// Arguments and user ids of the running process, captured once at startup.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub args: Vec<OsString>,
    pub real_uid: Uid,
    pub effective_uid: Uid,
}

impl Invocation {
    pub fn capture() -> Self {
        Self {
            args: env::args_os().collect(),
            real_uid: unistd::getuid(),
            effective_uid: unistd::geteuid(),
        }
    }

    /// The setuid bit is in effect: effective and real uid differ.
    pub fn is_elevated(&self) -> bool {
        self.real_uid != self.effective_uid
    }
}

/// The invoking (real) user. Never derived from the effective uid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub uid: Uid,
    pub username: String,
}

pub enum Privilege {
    Elevated(Identity),
    NotElevated,
}

impl Privilege {
    /// Checks that the setuid bit is in effect and resolves the caller.
    ///
    /// When real and effective uid are equal no lookup is attempted.
    pub fn check(invocation: &Invocation, users: &impl UserDirectory) -> Result<Self, Error> {
        if !invocation.is_elevated() {
            return Ok(Privilege::NotElevated);
        }
        let uid = invocation.real_uid;
        match users.username(uid) {
            Ok(Some(username)) => Ok(Privilege::Elevated(Identity { uid, username })),
            Ok(None) => Err(Error::UnknownUser(uid)),
            Err(source) => Err(Error::UserLookup { uid, source }),
        }
    }
}

pub trait UserDirectory {
    fn username(&self, uid: Uid) -> Result<Option<String>, Errno>;
}

/// The system passwd database.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemUsers;

impl UserDirectory for SystemUsers {
    fn username(&self, uid: Uid) -> Result<Option<String>, Errno> {
        Ok(User::from_uid(uid)?.map(|user| user.name))
    }
}

/// Local hostname, cut to [`HOSTNAME_MAX`] bytes.
pub fn hostname() -> Result<Vec<u8>, Errno> {
    let mut name = unistd::gethostname()?.into_vec();
    name.truncate(HOSTNAME_MAX);
    Ok(name)
}
