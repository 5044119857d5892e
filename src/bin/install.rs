use std::{error::Error, path::Path, process::Command};

use git_lfs_shell::config::{Config, CONFIG_PATH};

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::load(Path::new("default.toml"))?;
    let install_dir = prompt("Install dir for restricted_sh: ")?;

    for command in install_commands(&install_dir, &config) {
        run_command(&command)?;
    }

    Ok(())
}

fn install_commands(install_dir: &str, config: &Config) -> Vec<String> {
    let helper = config.shell.helper_path.display();
    let banner = config.shell.banner_path.display();
    let config_dir = parent_dir(Path::new(CONFIG_PATH));
    let banner_dir = parent_dir(&config.shell.banner_path);

    vec![
        "cargo build --release --bin restricted_sh --bin git-lfs-authenticate".to_string(),
        format!("mkdir -p {install_dir}"),
        format!("cp -T target/release/restricted_sh {install_dir}/restricted_sh"),
        format!("sudo cp -T target/release/git-lfs-authenticate {helper}"),
        format!("sudo chown root:root {helper}"),
        format!("sudo chmod u+s {helper}"),
        format!("sudo mkdir -p {config_dir}"),
        format!("sudo cp -T default.toml {CONFIG_PATH}"),
        format!("sudo mkdir -p {banner_dir}"),
        format!("sudo cp -nT info.txt {banner}"),
    ]
}

fn parent_dir(path: &Path) -> String {
    path.parent().map_or("/".into(), |dir| dir.display().to_string())
}

fn prompt(ask: &str) -> Result<String, Box<dyn Error>> {
    use std::io::*;
    let mut stdout = stdout();
    stdout.write_all(ask.as_bytes())?;
    stdout.flush()?;
    let mut input = String::new();
    stdin().read_line(&mut input)?;
    let input = input.trim();
    if input.is_empty() {
        return Err("install dir is required".into());
    }
    Ok(input.to_string())
}

fn run_command(command: &str) -> Result<(), Box<dyn Error>> {
    println!("$ {}", command);
    let mut command = command.split_ascii_whitespace();
    let program = command.next().ok_or("empty command")?.to_string();
    let args = command.map(str::to_string).collect::<Vec<_>>();
    let status = Command::new(program).args(&args).spawn()?.wait()?;
    if !status.success() {
        return Err(format!("command failed with {status}").into());
    }
    Ok(())
}
