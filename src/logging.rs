use log::LevelFilter;
use std::io::Write;

/// Installs `env_logger`. `RUST_LOG` is honoured first, then `level`
/// overrides it for this crate. Logs go to stderr so page text on stdout
/// stays clean.
pub fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder
        .filter_module("browrooms", level)
        .target(env_logger::Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        });
    builder.try_init()
}
