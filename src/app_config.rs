use serde::Deserialize;
use std::fmt;

/// Flat settings record for the bridge, as read from `config.yml` or the environment.
///
/// Every field defaults to empty so a partial file deserializes cleanly; the
/// required fields are enforced by `config_loader::validate` after merging.
#[derive(Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    pub nx_ip_port: String,   // e.g. "192.168.1.10:7001"
    pub nx_user: String,
    pub nx_pass: String,
    pub http_ip_port: String, // bind address of the motion webhook, e.g. "0.0.0.0:8080"
    pub tg_token: String,
    pub tg_user_whitelist: Vec<u64>,
    pub tg_group_whitelist: Vec<i64>,
    pub tg_motion_recipients: Vec<String>,
    pub log_level: Option<String>,
}

impl fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("nx_ip_port", &self.nx_ip_port)
            .field("nx_user", &self.nx_user)
            .field("nx_pass", &redacted(&self.nx_pass))
            .field("http_ip_port", &self.http_ip_port)
            .field("tg_token", &redacted(&self.tg_token))
            .field("tg_user_whitelist", &self.tg_user_whitelist)
            .field("tg_group_whitelist", &self.tg_group_whitelist)
            .field("tg_motion_recipients", &self.tg_motion_recipients)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
