use serde::Deserialize;

fn default_http_bind() -> String {
    "0.0.0.0".into()
}

fn default_benefit_api_port() -> u16 {
    8090
}

fn default_extraction_port() -> u16 {
    8091
}

fn default_benefit_api_url() -> String {
    "http://localhost:8090/verify-benefit".into()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_card_number() -> String {
    "4111111111111234".into()
}

/// Service settings read from environment variables (`DATABASE_URL`,
/// `BENEFIT_API_PORT`, ...). An empty `database_url` disables persistence.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub database_url: String,
    #[serde(default = "default_http_bind")]
    pub http_bind: String,
    #[serde(default = "default_benefit_api_port")]
    pub benefit_api_port: u16,
    #[serde(default = "default_extraction_port")]
    pub extraction_port: u16,
    #[serde(default = "default_benefit_api_url")]
    pub benefit_api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_card_number")]
    pub card_number: String,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
    }

    pub fn persistence_enabled(&self) -> bool {
        !self.database_url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_environment() {
        let settings: Settings = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.benefit_api_port, 8090);
        assert_eq!(settings.request_timeout_secs, 10);
        assert_eq!(settings.max_upload_bytes, 10 * 1024 * 1024);
        assert!(!settings.persistence_enabled());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let settings: Settings = config::Config::builder()
            .set_override("database_url", "postgres://db/benefits")
            .unwrap()
            .set_override("benefit_api_port", 9000)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.benefit_api_port, 9000);
        assert!(settings.persistence_enabled());
    }
}
