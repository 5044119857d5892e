/*
Setuid helper that requests a Git LFS token for the calling user.

Usage: git-lfs-authenticate PROJECT COMMAND

- Must be owned by root with the setuid bit set; refuses to run otherwise.
- The user sent to the token endpoint is looked up from the real uid.
- Replaces itself with the HTTP client, which POSTs user, project and command
  with credentials from netrc. No environment is passed on.
*/

fn main() -> ExitCode {
    // 呼び出したユーザーの取得
    let invocation = Invocation::capture();

    // uid の確認、設定の読み込み、exec
    match authenticate::start(&invocation, config::init, &SystemUsers) {
        Ok(never) => match never {},
        Err(err) => {
            logging::init(LOG_LEVEL);
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

use git_lfs_shell::authenticate;
use git_lfs_shell::config::{self, LOG_LEVEL};
use git_lfs_shell::identity::*;
use git_lfs_shell::logging;
use log::error;
use std::process::ExitCode;
