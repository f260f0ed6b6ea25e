use log::SetLoggerError;

/// Install the process logger. Level defaults to `info`; `RUST_LOG`
/// overrides it. Fails if another logger is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
}
