//! Restricted login shell that lets a user run exactly one command,
//! `git-lfs-authenticate`, through a setuid helper that requests a Git LFS token.
//!
//! ```text
//! sshd -> restricted_sh -c "<forced command>" -> git-lfs-authenticate <project> <command> -> curl
//! ```
//!
//! Everything else a caller sends gets the banner from [`shell::template`].

pub mod authenticate;
pub mod config;
pub mod error;
pub mod exec;
pub mod identity;
pub mod logging;
pub mod shell;
