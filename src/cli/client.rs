use anyhow::{anyhow, Context};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use crate::api::format::PostResource;

#[derive(Debug, Deserialize)]
struct Collection<T> {
    data: Vec<T>,
}

/// Thin HTTP client for `/api/posts`
pub struct PostsClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl PostsClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).with_context(|| format!("invalid API URL: {}", base_url))?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self { http, base_url, token })
    }

    pub async fn list(&self) -> anyhow::Result<Vec<PostResource>> {
        let response = self.send(self.request(Method::GET, "/api/posts")?).await?;
        let collection: Collection<PostResource> = response.json().await?;
        Ok(collection.data)
    }

    pub async fn show(&self, id: i64) -> anyhow::Result<PostResource> {
        let response = self.send(self.request(Method::GET, &format!("/api/posts/{}", id))?).await?;
        Ok(response.json().await?)
    }

    pub async fn create(&self, title: &str) -> anyhow::Result<PostResource> {
        let request = self
            .request(Method::POST, "/api/posts")?
            .json(&json!({ "title": title }));
        Ok(self.send(request).await?.json().await?)
    }

    pub async fn update(&self, id: i64, title: &str) -> anyhow::Result<PostResource> {
        let request = self
            .request(Method::PUT, &format!("/api/posts/{}", id))?
            .json(&json!({ "title": title }));
        Ok(self.send(request).await?.json().await?)
    }

    pub async fn delete(&self, id: i64) -> anyhow::Result<()> {
        self.send(self.request(Method::DELETE, &format!("/api/posts/{}", id))?).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> anyhow::Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let mut builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        Ok(builder)
    }

    /// Send and turn any non-2xx answer into an error carrying the server's message
    async fn send(&self, request: RequestBuilder) -> anyhow::Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: Value = response.json().await.unwrap_or(Value::Null);
        Err(anyhow!(describe_failure(status, &body)))
    }
}

fn describe_failure(status: StatusCode, body: &Value) -> String {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed"));

    match body.get("errors").and_then(Value::as_object) {
        Some(errors) if !errors.is_empty() => {
            let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
            format!("{} ({}): {} [fields: {}]", status.as_u16(), status_code_name(status), message, fields.join(", "))
        }
        _ => format!("{} ({}): {}", status.as_u16(), status_code_name(status), message),
    }
}

fn status_code_name(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown")
}
