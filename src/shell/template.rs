//! PAM-style banner rendering.
//!
//! `%u` is the invoking user, `%h` the hostname and `%%` a literal percent.
//! Any other escape is printed as is, and a `%` at end of file is dropped.

use crate::error::*;
use crate::identity::*;

use nix::unistd::Uid;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

/// Values substituted into the banner. Looked up each time an escape is met.
pub trait Substitutions {
    fn user(&self) -> Option<Vec<u8>>;
    fn host(&self) -> Option<Vec<u8>>;
}

/// Substitutions for the real user of this process.
pub struct SystemSubstitutions<U> {
    pub real_uid: Uid,
    pub users: U,
}

impl<U: UserDirectory> Substitutions for SystemSubstitutions<U> {
    fn user(&self) -> Option<Vec<u8>> {
        self.users.username(self.real_uid).ok().flatten().map(String::into_bytes)
    }

    fn host(&self) -> Option<Vec<u8>> {
        hostname().ok()
    }
}

/// Streams the banner at `path` to `out`, expanding escapes.
pub fn render(path: &Path, subst: &impl Substitutions, out: &mut impl Write) -> Result<(), Error> {
    let file = File::open(path).map_err(|source| Error::BannerOpen { path: path.to_path_buf(), source })?;
    render_from(BufReader::new(file), subst, out).map_err(Error::BannerWrite)
}

pub fn render_from(input: impl Read, subst: &impl Substitutions, out: &mut impl Write) -> io::Result<()> {
    let mut bytes = input.bytes();
    while let Some(c) = bytes.next() {
        let c = c?;
        if c != b'%' {
            out.write_all(&[c])?;
            continue;
        }
        let Some(escape) = bytes.next() else { break };
        match escape? {
            b'u' => {
                if let Some(user) = subst.user() {
                    out.write_all(&user)?;
                }
            }
            b'h' => {
                if let Some(host) = subst.host() {
                    out.write_all(&host)?;
                }
            }
            b'%' => out.write_all(b"%")?,
            other => out.write_all(&[b'%', other])?,
        }
    }
    out.flush()
}
