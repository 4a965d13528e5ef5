use crate::config::UploaderConfig;
use reqwest::multipart::Form;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use thiserror::Error;

/// Server reply body: a JSON object when the text parses as one,
/// otherwise the raw text (plain strings, HTML error pages).
#[derive(Debug, Clone)]
pub enum ResponseBody {
    Json(Map<String, Value>),
    Text(String),
}

impl ResponseBody {
    fn parse(text: String) -> Self {
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(fields)) => ResponseBody::Json(fields),
            _ => ResponseBody::Text(text),
        }
    }
}

#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: ResponseBody,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("upload failed with status {status}")]
    Status {
        status: StatusCode,
        body: ResponseBody,
    },
}

/// HTTP client bound to the backend base address. Cookies set by the
/// server ride on every subsequent request.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &UploaderConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            http,
        })
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<ApiResponse, ApiError> {
        let url = self.endpoint(path);
        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = ResponseBody::parse(response.text().await?);

        if status.is_success() {
            Ok(ApiResponse { status, body })
        } else {
            Err(ApiError::Status { status, body })
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
