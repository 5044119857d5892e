/*
Restricted login shell for the git-lfs account.

sshd runs this as `restricted_sh -c "<forced command>"`.
- `git-lfs-authenticate [project] [command]` replaces this process with the setuid helper, with an empty environment.
- Anything else prints the banner and exits 0. The command itself is never echoed.
- Any other argument count prints the banner and exits with the invalid-arguments status.
*/

fn main() -> ExitCode {
    // 設定の読み込み
    let config = match config::init() {
        Ok(config) => config,
        Err(err) => {
            logging::init(LOG_LEVEL);
            error!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };
    logging::init(config.log_level);

    // 引数の取得
    let invocation = Invocation::capture();
    let subst = SystemSubstitutions { real_uid: invocation.real_uid, users: SystemUsers };

    let stdout = stdout();
    let mut out = stdout.lock();
    match shell::run(&invocation.args, config, &subst, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if !matches!(err, Error::InvalidArguments { .. }) {
                error!("{err}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}

use git_lfs_shell::config::{self, LOG_LEVEL};
use git_lfs_shell::error::Error;
use git_lfs_shell::identity::*;
use git_lfs_shell::logging;
use git_lfs_shell::shell;
use git_lfs_shell::shell::template::SystemSubstitutions;
use log::error;
use std::io::stdout;
use std::process::ExitCode;
