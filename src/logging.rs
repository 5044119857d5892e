use env_logger::{Builder, Target};
use log::LevelFilter;

/// Installs the stderr logger at `level`. `RUST_LOG` is not consulted.
pub fn init(level: LevelFilter) {
    let _ = Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .target(Target::Stderr)
        .try_init();
}
