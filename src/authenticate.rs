//! The setuid helper: turns `git-lfs-authenticate <project> <command>` into a
//! token request performed by the HTTP client.

/// Program name, project and command.
pub const HELPER_ARGS: usize = 3;

/// Form fields of the token request, in submission order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestFields {
    pub user: OsString,
    pub project: OsString,
    pub command: OsString,
}

impl RequestFields {
    pub fn new(identity: &Identity, project: &OsStr, command: &OsStr) -> Self {
        Self {
            user: field("user", OsStr::new(&identity.username)),
            project: field("project", project),
            command: field("command", command),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &OsStr> {
        [self.user.as_os_str(), self.project.as_os_str(), self.command.as_os_str()].into_iter()
    }
}

fn field(key: &str, value: &OsStr) -> OsString {
    let mut field = OsString::from(format!("{key}="));
    field.push(value);
    field
}

/// Runs the privilege, identity and argument checks in that order.
/// No fields are built unless the process is elevated.
pub fn prepare(invocation: &Invocation, users: &impl UserDirectory) -> Result<RequestFields, Error> {
    let identity = match Privilege::check(invocation, users)? {
        Privilege::Elevated(identity) => identity,
        Privilege::NotElevated => return Err(Error::NotElevated),
    };
    let [_, project, command] = invocation.args.as_slice() else {
        return Err(Error::InvalidArguments { expected: HELPER_ARGS, actual: invocation.args.len() });
    };
    Ok(RequestFields::new(&identity, project, command))
}

/// argv of the HTTP client: authenticate from netrc, no progress output,
/// fail on HTTP errors, POST the fields form-encoded.
pub fn client_args(config: &AuthenticateConfig, fields: &RequestFields) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![config.client_name.clone().into()];
    match &config.netrc_file {
        Some(path) => {
            args.push("--netrc-file".into());
            args.push(path.clone().into());
        }
        None => args.push("--netrc".into()),
    }
    args.push("--silent".into());
    args.push("--fail".into());
    args.push("--show-error".into());
    for field in fields.iter() {
        args.push("--data-raw".into());
        args.push(field.to_os_string());
    }
    args.push(config.endpoint.clone().into());
    args
}

/// Builds the request and replaces this process with the HTTP client.
pub fn run(invocation: &Invocation, config: &AuthenticateConfig, users: &impl UserDirectory) -> Result<Infallible, Error> {
    let fields = prepare(invocation, users)?;
    let exec = Exec::new(&config.client_path, client_args(config, &fields))?;
    debug!("requesting token via {}", config.client_path.display());
    exec.replace()
}

/// Helper entry point. The uid check runs before the config is read, so a
/// non-setuid helper always fails as not elevated.
pub fn start<'a>(
    invocation: &Invocation,
    load_config: impl FnOnce() -> Result<&'a Config, Error>,
    users: &impl UserDirectory,
) -> Result<Infallible, Error> {
    if !invocation.is_elevated() {
        return Err(Error::NotElevated);
    }
    let config = load_config()?;
    logging::init(config.log_level);
    run(invocation, &config.authenticate, users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::tests::{invocation, FakeUsers};
    use std::io;
    use std::path::PathBuf;

    fn strings(args: &[OsString]) -> Vec<&str> {
        args.iter().map(|arg| arg.to_str().unwrap()).collect()
    }

    #[test]
    fn not_elevated_is_refused_for_any_arguments() {
        let users = FakeUsers::with(1000, "alice");
        for args in [&["git-lfs-authenticate", "my/project", "download"][..], &[], &["x"], &["a", "b", "c", "d"]] {
            let err = prepare(&invocation(1000, 1000, args), &users).unwrap_err();
            assert!(matches!(err, Error::NotElevated));
            assert_eq!(err.exit_code(), NOT_ELEVATED);
        }
    }

    #[test]
    fn identity_is_checked_before_arguments() {
        let err = prepare(&invocation(1000, 0, &["git-lfs-authenticate"]), &FakeUsers::default()).unwrap_err();
        assert_eq!(err.exit_code(), IDENTITY_LOOKUP_FAILURE);
    }

    #[test]
    fn wrong_argument_count_is_refused() {
        let users = FakeUsers::with(1000, "alice");
        for args in [&["git-lfs-authenticate", "my/project"][..], &["git-lfs-authenticate", "a", "b", "c"]] {
            let err = prepare(&invocation(1000, 0, args), &users).unwrap_err();
            assert!(matches!(err, Error::InvalidArguments { expected: 3, .. }));
            assert_eq!(err.exit_code(), INVALID_ARGUMENTS);
        }
    }

    #[test]
    fn fields_use_the_real_user() {
        let users = FakeUsers::with(1000, "alice");
        let fields = prepare(&invocation(1000, 0, &["git-lfs-authenticate", "my/project", "do it"]), &users).unwrap();
        assert_eq!(fields.iter().map(|f| f.to_str().unwrap()).collect::<Vec<_>>(), ["user=alice", "project=my/project", "command=do it"]);
    }

    #[test]
    fn client_args_in_order() {
        let users = FakeUsers::with(1000, "alice");
        let fields = prepare(&invocation(1000, 0, &["git-lfs-authenticate", "my/project", "download"]), &users).unwrap();
        let args = client_args(&AuthenticateConfig::default(), &fields);
        assert_eq!(strings(&args), [
            "git-lfs-authenticate",
            "--netrc",
            "--silent",
            "--fail",
            "--show-error",
            "--data-raw", "user=alice",
            "--data-raw", "project=my/project",
            "--data-raw", "command=download",
            "https://git-lfs.example.org/api/token_factory",
        ]);
    }

    #[test]
    fn client_args_with_netrc_file() {
        let config = AuthenticateConfig {
            netrc_file: Some(PathBuf::from("/etc/git-lfs-shell/netrc")),
            ..AuthenticateConfig::default()
        };
        let identity = Identity { uid: nix::unistd::Uid::from_raw(1000), username: "alice".to_string() };
        let fields = RequestFields::new(&identity, OsStr::new("p"), OsStr::new("upload"));
        let args = client_args(&config, &fields);
        assert_eq!(strings(&args[..4]), ["git-lfs-authenticate", "--netrc-file", "/etc/git-lfs-shell/netrc", "--silent"]);
        assert!(!args.iter().any(|arg| arg == "--netrc"));
    }

    #[test]
    fn run_without_privilege_never_execs() {
        let config = AuthenticateConfig { client_path: PathBuf::from("/bin/true"), ..AuthenticateConfig::default() };
        let err = run(&invocation(1000, 1000, &["git-lfs-authenticate", "p", "c"]), &config, &FakeUsers::with(1000, "alice"))
            .unwrap_err();
        assert!(matches!(err, Error::NotElevated));
    }

    #[test]
    fn run_reports_missing_client() {
        let dir = tempfile::tempdir().unwrap();
        let config = AuthenticateConfig { client_path: dir.path().join("curl"), ..AuthenticateConfig::default() };
        let err = run(&invocation(1000, 0, &["git-lfs-authenticate", "p", "c"]), &config, &FakeUsers::with(1000, "alice"))
            .unwrap_err();
        assert_eq!(err.exit_code(), EXEC_FAILURE);
    }

    #[test]
    fn start_checks_privilege_before_config() {
        let broken_config = || -> Result<&'static Config, Error> {
            Err(Error::ConfigRead {
                path: PathBuf::from("/etc/git-lfs-shell/config.toml"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        };
        let users = FakeUsers::with(1000, "alice");

        let err = start(&invocation(1000, 1000, &["git-lfs-authenticate", "p", "c"]), broken_config, &users).unwrap_err();
        assert_eq!(err.exit_code(), NOT_ELEVATED);

        let err = start(&invocation(1000, 0, &["git-lfs-authenticate", "p", "c"]), broken_config, &users).unwrap_err();
        assert_eq!(err.exit_code(), CONFIG_FAILURE);
    }

    #[test]
    fn start_uses_the_loaded_client() {
        let dir = tempfile::tempdir().unwrap();
        let config: &'static Config = Box::leak(Box::new(Config {
            authenticate: AuthenticateConfig { client_path: dir.path().join("curl"), ..AuthenticateConfig::default() },
            ..Config::default()
        }));
        let err = start(&invocation(1000, 0, &["git-lfs-authenticate", "p", "c"]), || Ok(config), &FakeUsers::with(1000, "alice"))
            .unwrap_err();
        assert!(matches!(err, Error::Exec { ref program, .. } if *program == dir.path().join("curl")));
    }
}

use crate::config::{AuthenticateConfig, Config};
use crate::error::*;
use crate::exec::Exec;
use crate::identity::*;
use crate::logging;

use log::debug;
use std::convert::Infallible;
use std::ffi::{OsStr, OsString};
