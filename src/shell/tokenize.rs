//! Splitting of the SSH forced command into an argument vector.
//!
//! Only the minimum needed by git-lfs clients is supported: tokens are separated
//! by single spaces, and a token that *starts* with `"` runs up to the next `"`.
//! There is no escaping and no nesting. A closing quote ends the token; anything
//! after it up to the next space is dropped. An unmatched quote makes the rest of
//! the input one token. The command is scanned as bytes, so it need not be UTF-8.

use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;

/// Program name plus at most three arguments.
pub const MAX_TOKENS: usize = 4;

/// Tokens borrowed from the forced command. Never more than [`MAX_TOKENS`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    tokens: Vec<&'a OsStr>,
}

impl<'a> ParsedCommand<'a> {
    pub fn tokens(&self) -> &[&'a OsStr] {
        &self.tokens
    }
}

pub fn tokenize(command: &OsStr) -> ParsedCommand<'_> {
    let bytes = command.as_bytes();
    let mut tokens = Vec::with_capacity(MAX_TOKENS);
    // start of the token being scanned; None after a closing quote
    let mut start = Some(0);
    let mut quoted = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' if quoted => {
                if let Some(s) = start.take() {
                    tokens.push(OsStr::from_bytes(&bytes[s..i]));
                }
                quoted = false;
            }
            b' ' if !quoted => {
                if let Some(s) = start.take() {
                    tokens.push(OsStr::from_bytes(&bytes[s..i]));
                }
                if tokens.len() == MAX_TOKENS {
                    return ParsedCommand { tokens };
                }
                if bytes.get(i + 1) == Some(&b'"') {
                    quoted = true;
                    i += 1;
                }
                start = Some(i + 1);
            }
            _ => {}
        }
        i += 1;
    }
    if let Some(s) = start {
        tokens.push(OsStr::from_bytes(&bytes[s..]));
    }
    ParsedCommand { tokens }
}
