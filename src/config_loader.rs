use crate::app_config::BridgeConfig;
use crate::common::list_utils::{parse_int_list, parse_string_list};
use crate::errors::AppError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Instant;

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

pub const ENV_NX_IP_PORT: &str = "NX_IP_PORT";
pub const ENV_NX_USER: &str = "NX_USER";
pub const ENV_NX_PASS: &str = "NX_PASS";
pub const ENV_HTTP_IP_PORT: &str = "HTTP_IP_PORT";
pub const ENV_TG_TOKEN: &str = "TG_TOKEN";
pub const ENV_TG_USER_WHITELIST: &str = "TG_USER_WHITELIST";
pub const ENV_TG_GROUP_WHITELIST: &str = "TG_GROUP_WHITELIST";
pub const ENV_TG_MOTION_RECIPIENTS: &str = "TG_MOTION_RECIPIENTS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Loads the bridge settings: environment first, `path` as fallback, then validation.
pub fn load_config(path: &Path) -> Result<BridgeConfig> {
    debug!("📄 Resolving configuration (env + '{}')", path.display());
    let start_time = Instant::now();

    let env_config = load_from_env().context("Failed to read configuration from environment 🌱")?;
    let file_config = load_from_file(path)
        .with_context(|| format!("Failed to load configuration file '{}' 📖", path.display()))?;
    if file_config.is_none() {
        debug!("No configuration file at '{}', using environment only.", path.display());
    }

    let config = resolve(env_config, file_config);
    validate(&config).context("Configuration validation failed 👎")?;

    info!("✅ Configuration resolved in {:?}", start_time.elapsed());
    Ok(config)
}

pub fn load_from_env() -> Result<BridgeConfig, AppError> {
    load_from_lookup(|key| env::var(key).ok())
}

/// Builds a config from an arbitrary key lookup; unset keys read as empty.
pub fn load_from_lookup<F>(lookup: F) -> Result<BridgeConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).unwrap_or_default();

    let tg_user_whitelist = parse_int_list(ENV_TG_USER_WHITELIST, &get(ENV_TG_USER_WHITELIST))?;
    let tg_group_whitelist = parse_int_list(ENV_TG_GROUP_WHITELIST, &get(ENV_TG_GROUP_WHITELIST))?;
    let tg_motion_recipients = parse_string_list(&get(ENV_TG_MOTION_RECIPIENTS));
    let log_level = Some(get(ENV_LOG_LEVEL).trim().to_string()).filter(|s| !s.is_empty());

    Ok(BridgeConfig {
        nx_ip_port: get(ENV_NX_IP_PORT),
        nx_user: get(ENV_NX_USER),
        nx_pass: get(ENV_NX_PASS),
        http_ip_port: get(ENV_HTTP_IP_PORT),
        tg_token: get(ENV_TG_TOKEN),
        tg_user_whitelist,
        tg_group_whitelist,
        tg_motion_recipients,
        log_level,
    })
}

/// Reads the YAML config file. `Ok(None)` means there is no file at `path`.
pub fn load_from_file(path: &Path) -> Result<Option<BridgeConfig>, AppError> {
    let config_str = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::Io(format!(
                "Failed to read configuration file '{}': {}",
                path.display(),
                e
            )))
        }
    };
    if config_str.trim().is_empty() {
        return Ok(Some(BridgeConfig::default()));
    }
    let config: BridgeConfig = serde_yaml::from_str(&config_str).map_err(|e| {
        AppError::Config(format!("Failed to parse YAML configuration '{}': {}", path.display(), e))
    })?;
    Ok(Some(config))
}

/// Merges the two sources field by field. Any non-empty environment value wins.
pub fn resolve(env_config: BridgeConfig, file_config: Option<BridgeConfig>) -> BridgeConfig {
    let Some(mut merged) = file_config else {
        return env_config;
    };

    overwrite_if_set(&mut merged.nx_ip_port, env_config.nx_ip_port);
    overwrite_if_set(&mut merged.nx_user, env_config.nx_user);
    overwrite_if_set(&mut merged.nx_pass, env_config.nx_pass);
    overwrite_if_set(&mut merged.http_ip_port, env_config.http_ip_port);
    overwrite_if_set(&mut merged.tg_token, env_config.tg_token);
    if !env_config.tg_user_whitelist.is_empty() {
        merged.tg_user_whitelist = env_config.tg_user_whitelist;
    }
    if !env_config.tg_group_whitelist.is_empty() {
        merged.tg_group_whitelist = env_config.tg_group_whitelist;
    }
    if !env_config.tg_motion_recipients.is_empty() {
        merged.tg_motion_recipients = env_config.tg_motion_recipients;
    }
    if env_config.log_level.is_some() {
        merged.log_level = env_config.log_level;
    }
    merged
}

fn overwrite_if_set(target: &mut String, value: String) {
    if !value.is_empty() {
        *target = value;
    }
}

/// Fails on the first required setting that is still empty.
pub fn validate(config: &BridgeConfig) -> Result<(), AppError> {
    let required = [
        (config.nx_ip_port.is_empty(), "nx_ip_port", ENV_NX_IP_PORT),
        (config.nx_user.is_empty(), "nx_user", ENV_NX_USER),
        (config.nx_pass.is_empty(), "nx_pass", ENV_NX_PASS),
        (config.http_ip_port.is_empty(), "http_ip_port", ENV_HTTP_IP_PORT),
        (config.tg_token.is_empty(), "tg_token", ENV_TG_TOKEN),
        (config.tg_motion_recipients.is_empty(), "tg_motion_recipients", ENV_TG_MOTION_RECIPIENTS),
    ];
    match required.iter().find(|(missing, _, _)| *missing) {
        Some(&(_, yaml_key, env_key)) => Err(AppError::MissingSetting { yaml_key, env_key }),
        None => Ok(()),
    }
}
