use env_logger::Builder;
use log::LevelFilter;

// Log level comes from the --debug flag first, then the resolved config, then "info".
pub fn initialize_logging(config_level: Option<&str>, cli_matches: &clap::ArgMatches) {
    let mut builder = Builder::new();

    let log_level_str = if cli_matches.get_flag("debug") {
        "debug".to_string()
    } else {
        config_level.unwrap_or("info").to_string()
    };

    let level = match log_level_str.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        s => {
            eprintln!("Unrecognized log level '{}', defaulting to info.", s);
            LevelFilter::Info
        }
    };
    builder.filter_level(level);

    // hyper and reqwest are chatty at debug; keep them at warn unless tracing.
    if level < LevelFilter::Trace {
        let quiet = level.min(LevelFilter::Warn);
        builder.filter_module("hyper", quiet);
        builder.filter_module("hyper_util", quiet);
        builder.filter_module("reqwest", quiet);
    }

    builder.try_init().unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e);
    });
}
