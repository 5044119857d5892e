use crate::error::*;

use nix::unistd::execve;
use std::convert::Infallible;
use std::ffi::*;
use std::os::unix::ffi::OsStrExt;
use std::path::*;

/// A prepared process-image replacement. Nothing runs after a successful [`Exec::replace`].
#[derive(Debug)]
pub struct Exec {
    program: PathBuf,
    path: CString,
    argv: Vec<CString>,
}

impl Exec {
    pub fn new<I, S>(program: &Path, argv: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let path = CString::new(program.as_os_str().as_bytes())?;
        let argv = argv.into_iter()
            .map(|arg| CString::new(arg.as_ref().as_bytes()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { program: program.to_path_buf(), path, argv })
    }

    pub fn argv(&self) -> &[CString] {
        &self.argv
    }

    /// Replaces the current process with `program`, with an empty environment.
    /// Only returns on failure.
    pub fn replace(self) -> Result<Infallible, Error> {
        let envp: [&CStr; 0] = [];
        execve(&self.path, &self.argv, &envp).map_err(|source| Error::Exec { program: self.program, source })
    }
}
