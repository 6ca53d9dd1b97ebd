#![allow(dead_code)]

pub mod builders;
pub mod shared;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use estate_catalog::{InMemoryStore, PropertyRecord};
use estate_server::{api::create_router, config::StorageBackend, AppState, Config};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt as _;

pub use builders::*;

/// Router over an in-memory store, driven with `oneshot`.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::new_with_config(|_| {})
    }

    pub fn new_with_config(configure: impl FnOnce(&mut Config)) -> Self {
        Self::with_records(Vec::new(), configure)
    }

    /// App whose store already holds `records`, stored exactly as given.
    pub fn with_records(records: Vec<PropertyRecord>, configure: impl FnOnce(&mut Config)) -> Self {
        shared::init_tracing();

        let mut config = Config::default();
        config.database.backend = StorageBackend::Memory;
        config.catalog.generator_seed = Some(42);
        configure(&mut config);

        let store = Arc::new(InMemoryStore::with_records(records));
        let state = AppState::with_store(config, store.clone());
        let router = create_router(state.clone());

        Self {
            router,
            state,
            store,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<(&str, Bytes)>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path_and_query, body, &[])
            .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<(&str, Bytes)>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let mut builder = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header(header::ACCEPT, "application/json");

        let body = match body {
            Some((content_type, bytes)) => {
                builder = builder.header(header::CONTENT_TYPE, content_type);
                Body::from(bytes)
            }
            None => Body::empty(),
        };

        let mut request = builder.body(body).context("build request")?;
        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    pub async fn get_json(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _, body) = self.request(Method::GET, path_and_query, None).await?;
        Ok((status, parse_json(&body)?))
    }

    pub async fn post_json(
        &self,
        path_and_query: &str,
        value: &Value,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let body = ("application/json", to_json_body(value)?);
        let (status, _, body) = self
            .request(Method::POST, path_and_query, Some(body))
            .await?;
        Ok((status, parse_json(&body)?))
    }

    pub async fn post_form(
        &self,
        path_and_query: &str,
        encoded: &str,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let body = (
            "application/x-www-form-urlencoded",
            Bytes::from(encoded.to_string()),
        );
        let (status, _, body) = self
            .request(Method::POST, path_and_query, Some(body))
            .await?;
        Ok((status, parse_json(&body)?))
    }

    /// Post `fields` as `multipart/form-data` text parts.
    pub async fn post_multipart(
        &self,
        path_and_query: &str,
        fields: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, Value)> {
        let content_type = format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}");
        let body = (content_type.as_str(), multipart_body(fields));
        let (status, _, body) = self
            .request(Method::POST, path_and_query, Some(body))
            .await?;
        Ok((status, parse_json(&body)?))
    }

    pub async fn post_empty(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _, body) = self.request(Method::POST, path_and_query, None).await?;
        Ok((status, parse_json(&body)?))
    }
}

pub fn parse_json(body: &Bytes) -> anyhow::Result<Value> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).with_context(|| {
        format!(
            "response body is not JSON: {}",
            String::from_utf8_lossy(body)
        )
    })
}

pub fn assert_status(actual: StatusCode, expected: StatusCode, context: &str) {
    assert_eq!(actual, expected, "unexpected status for {context}");
}

/// Names of the listed items, in response order.
pub fn item_names(page: &Value) -> Vec<String> {
    page["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
