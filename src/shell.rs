pub mod template;
pub mod tokenize;

/// argv[0], the `-c` flag and the forced command.
pub const SHELL_ARGS: usize = 3;

#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch<'a> {
    /// Hand the tokenized command to the helper.
    Helper(ParsedCommand<'a>),
    /// Any other command: print the banner and succeed.
    Banner,
    /// Not invoked as `sh -c <command>`.
    InvalidShape { actual: usize },
}

/// Decides what to do with the shell's arguments. Exactly one outcome per invocation.
pub fn classify(args: &[OsString]) -> Dispatch<'_> {
    if args.len() != SHELL_ARGS {
        return Dispatch::InvalidShape { actual: args.len() };
    }
    let command = args[2].as_os_str();
    if is_allowed_command(command) {
        Dispatch::Helper(tokenize(command))
    } else {
        Dispatch::Banner
    }
}

/// True for `git-lfs-authenticate` alone or followed by whitespace, never for a longer name.
/// Compared as bytes; the rest of the command need not be UTF-8.
pub fn is_allowed_command(command: &OsStr) -> bool {
    match command.as_bytes().strip_prefix(ALLOWED_COMMAND.as_bytes()) {
        Some(rest) => rest.first().map_or(true, u8::is_ascii_whitespace),
        None => false,
    }
}

/// Runs the restricted shell. Returns only if the helper was not dispatched.
pub fn run(args: &[OsString], config: &Config, subst: &impl Substitutions, out: &mut impl Write) -> Result<(), Error> {
    match classify(args) {
        Dispatch::Helper(command) => {
            debug!("dispatching to {}", config.shell.helper_path.display());
            let exec = Exec::new(&config.shell.helper_path, command.tokens())?;
            match exec.replace()? {}
        }
        Dispatch::Banner => {
            info!("forced command not permitted, showing banner");
            render(&config.shell.banner_path, subst, out)
        }
        Dispatch::InvalidShape { actual } => {
            info!("invoked with {actual} arguments, showing banner");
            if let Err(err) = render(&config.shell.banner_path, subst, out) {
                warn!("{err}");
            }
            Err(Error::InvalidArguments { expected: SHELL_ARGS, actual })
        }
    }
}


use crate::config::*;
use crate::error::*;
use crate::exec::Exec;

use log::*;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::os::unix::ffi::OsStrExt;

use self::template::*;
use self::tokenize::*;
