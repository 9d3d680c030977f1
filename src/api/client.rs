use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use yansi::Paint;
use std::sync::atomic::{AtomicBool, Ordering};

use super::error::ApiError;

static SILENT: AtomicBool = AtomicBool::new(true);

/// Echo outgoing requests to stdout. The server keeps this off; the CLI turns it on.
pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        println!("{}", msg);
    }
}

pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

/// Admin GraphQL client bound to one shop's endpoint and offline access token.
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl AdminClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>, access_token: impl Into<String>) -> Self {
        AdminClient {
            http,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }

    /// Run one GraphQL operation and decode its `data` member.
    pub async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Option<Value>,
    ) -> Result<T, ApiError> {
        let mut body = serde_json::json!({ "query": query });
        if let Some(v) = variables {
            body["variables"] = v;
        }
        self.log_request(operation, &body);
        tracing::info!(operation, endpoint = %self.endpoint, "Admin API request");

        let resp = self
            .http
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        log_output(format!("Response:\n{}", Paint::new(&text).rgb(100, 100, 100)));

        if !status.is_success() {
            tracing::error!(operation, status = status.as_u16(), "Admin API returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GraphQlResponse<T> =
            serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))?;
        if !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.into_iter().map(|e| e.message).collect();
            tracing::error!(operation, ?messages, "Admin API returned GraphQL errors");
            return Err(ApiError::GraphQl(messages));
        }
        parsed
            .data
            .ok_or_else(|| ApiError::Decode(format!("{} response has no data", operation)))
    }

    fn log_request(&self, operation: &str, body: &Value) {
        if SILENT.load(Ordering::Relaxed) {
            return;
        }
        let mut parts = Vec::new();
        parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
        parts.push(format!("-X {}", Paint::new("POST").fg(yansi::Color::Yellow).bold()));
        parts.push(format!("'{}'", Paint::new(&self.endpoint).fg(yansi::Color::Cyan)));
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new(format!("'{}: <redacted>'", ACCESS_TOKEN_HEADER)).fg(yansi::Color::Magenta)
        ));
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string_pretty(body).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
        log_output(format!("Request ({}):\n{}", operation, parts.join(" ")));
    }
}
