//! HTTP client for the catalog API.

use estate_catalog::{NewProperty, PublicProperty, QueryPage};
use reqwest::{Response, StatusCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Validation(ValidationProblem),

    #[error("server returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Field-attributed validation failure returned by create endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationProblem {
    pub title: String,
    pub status: u16,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for (field, messages) in &self.errors {
            for message in messages {
                write!(f, "\n  {field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Search filters and window for `list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedProperties {
    pub inserted: usize,
    pub items: Vec<PublicProperty>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeedOutcome {
    pub inserted: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("estate-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/properties{}", self.base_url, path)
    }

    pub async fn list(&self, params: &ListParams) -> Result<QueryPage<PublicProperty>> {
        let response = self.http.get(self.url("")).query(params).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// `None` when the server has no listing with this id.
    pub async fn get(&self, id: &str) -> Result<Option<PublicProperty>> {
        let response = self.http.get(self.url(&format!("/{id}"))).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check(response).await?.json().await?))
    }

    pub async fn create(&self, new: &NewProperty) -> Result<PublicProperty> {
        let response = self.http.post(self.url("")).json(new).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Ask the server to generate listings; it clamps `count` to its batch limits.
    pub async fn generate(&self, count: Option<i64>) -> Result<GeneratedProperties> {
        let mut request = self.http.post(self.url("/auto"));
        if let Some(count) = count {
            request = request.query(&[("count", count)]);
        }
        Ok(check(request.send().await?).await?.json().await?)
    }

    pub async fn seed(&self) -> Result<SeedOutcome> {
        let response = self.http.post(self.url("/seed")).send().await?;
        Ok(check(response).await?.json().await?)
    }
}

/// Pass successful responses through; turn the rest into [`ClientError`].
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await?;
    if status == StatusCode::BAD_REQUEST {
        if let Ok(problem) = serde_json::from_str::<ValidationProblem>(&body) {
            return Err(ClientError::Validation(problem));
        }
    }
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.error)
        .unwrap_or(body);
    Err(ClientError::Api { status, message })
}
