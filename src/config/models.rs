use crate::{api::subreg::API_BASE_URL, ip::IP_SERVICE_URL};
use serde::Deserialize;
use std::fmt;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub subreg: RegistrarConfig,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_ip_service_url")]
    pub ip_service_url: String,

    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, message = "Timeout must be greater than 0"))]
    pub timeout_secs: u64,
}

/// Credentials and the record to keep up to date.
/// For `sub.example.org` the domain is `example.org` and the subdomain `sub`.
#[derive(Deserialize, Validate)]
pub struct RegistrarConfig {
    #[validate(length(min = 1, message = "User cannot be empty"))]
    pub user: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,

    #[validate(length(min = 1, message = "Domain cannot be empty"))]
    pub domain: String,

    #[serde(default)]
    pub subdomain: String,
}

fn default_api_url() -> String {
    API_BASE_URL.to_string()
}

fn default_ip_service_url() -> String {
    IP_SERVICE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("subreg", &self.subreg)
            .field("api_url", &self.api_url)
            .field("ip_service_url", &self.ip_service_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for RegistrarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrarConfig")
            .field("user", &self.user)
            .field("password", &"<REDACTED>")
            .field("domain", &self.domain)
            .field("subdomain", &self.subdomain)
            .finish()
    }
}
