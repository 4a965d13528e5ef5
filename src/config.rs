use std::env;

const BASE_URL_ENV: &str = "STATEMENT_UPLOADER_BASE_URL";
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1/";

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub base_url: String,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl UploaderConfig {
    pub fn from_env() -> Self {
        Self::from_override(env::var(BASE_URL_ENV).ok())
    }

    fn from_override(base_url: Option<String>) -> Self {
        match base_url {
            Some(url) if !url.trim().is_empty() => Self { base_url: url },
            _ => Self::default(),
        }
    }
}
